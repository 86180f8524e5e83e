use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::allan::{self, ImuAnalysis};
use crate::config::{AnalysisConfig, KalibrConfig, PlotConfig};
use crate::loader::{self, Series};
use crate::plot;
use crate::report::{self, SummaryReport, KALIBR_FILE_NAME};
use crate::types::Sensor;

/// Inputs for one batch run
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub data: PathBuf,
    pub skip: usize,
    pub output_dir: PathBuf,
    pub analysis: AnalysisConfig,
    pub kalibr: KalibrConfig,
    /// `None` skips plotting
    pub plot: Option<PlotConfig>,
    pub summary_json: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(data: impl Into<PathBuf>) -> Self {
        Self {
            data: data.into(),
            skip: 1,
            output_dir: PathBuf::from("."),
            analysis: AnalysisConfig::default(),
            kalibr: KalibrConfig::default(),
            plot: Some(PlotConfig::default()),
            summary_json: None,
        }
    }
}

/// What a run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub series: Series,
    pub analysis: ImuAnalysis,
    pub kalibr_path: PathBuf,
    /// Plots that rendered successfully
    pub plots: Vec<PathBuf>,
}

/// Load, extract, then emit. Nothing is written until every fit has succeeded,
/// and `imu.yaml` is on disk before any plot is attempted.
pub fn run(opts: &RunOptions) -> Result<RunOutcome> {
    log::info!("Loading {} (skip={})", opts.data.display(), opts.skip);
    let series = loader::load_series(&opts.data, opts.skip)
        .with_context(|| format!("loading {}", opts.data.display()))?;
    log::info!("Loaded {} samples", series.len());

    let analysis = allan::analyze(&series, &opts.analysis).context("extracting Allan-deviation parameters")?;

    for sensor in Sensor::ALL {
        print!("{}", report::render_sensor_report(analysis.summary(sensor)));
    }

    let kalibr_path = opts.output_dir.join(KALIBR_FILE_NAME);
    report::write_kalibr_yaml(&kalibr_path, &analysis, &opts.kalibr).context("writing Kalibr config")?;

    if let Some(path) = opts.summary_json.as_ref() {
        SummaryReport::new(
            &opts.data,
            opts.skip,
            series.len(),
            &opts.analysis,
            &opts.kalibr,
            &analysis,
        )
        .save(path)
        .context("writing JSON summary")?;
    }

    let plots = match opts.plot.as_ref() {
        Some(plot_cfg) => render_plots(&opts.output_dir, &series, &analysis, &opts.analysis, plot_cfg),
        None => {
            log::info!("Plotting disabled");
            Vec::new()
        }
    };

    println!("Writing Kalibr {} file.", KALIBR_FILE_NAME);
    println!("Make sure to update rostopic and rate.");

    Ok(RunOutcome {
        series,
        analysis,
        kalibr_path,
        plots,
    })
}

/// Plot failures are downgraded to warnings; the numeric outputs are already saved.
fn render_plots(
    output_dir: &Path,
    series: &Series,
    analysis: &ImuAnalysis,
    config: &AnalysisConfig,
    plot_cfg: &PlotConfig,
) -> Vec<PathBuf> {
    let mut saved = Vec::new();
    for sensor in Sensor::ALL {
        let path = output_dir.join(plot::plot_file_name(sensor));
        match plot::render_sensor_plot(&path, series, analysis.summary(sensor), config, plot_cfg) {
            Ok(()) => saved.push(path),
            Err(e) => log::warn!("{}", e),
        }
    }
    saved
}
