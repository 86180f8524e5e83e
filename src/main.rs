use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use imu_allan_rs::config::{AnalysisConfig, KalibrConfig, PlotConfig, RandomRateSpan};
use imu_allan_rs::pipeline::{self, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "imu_allan")]
#[command(about = "Extract IMU noise parameters from Allan-deviation logs and write a Kalibr imu.yaml", long_about = None)]
struct Args {
    /// Allan-deviation log (period ax ay az gx gy gz per line, optionally .gz)
    #[arg(long, value_name = "PATH")]
    data: PathBuf,

    /// Keep every Nth row
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    skip: u64,

    /// Directory for imu.yaml and the plots
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// IMU topic written to imu.yaml
    #[arg(long, default_value = "/sensors/imu")]
    rostopic: String,

    /// IMU update rate (Hz) written to imu.yaml
    #[arg(long, default_value_t = 400.0)]
    update_rate: f64,

    /// Period that ends the white-noise window (must appear verbatim in the log)
    #[arg(long, default_value_t = 10.0)]
    breakpoint_period: f64,

    /// Span of the random-rate regression
    #[arg(long, value_enum, default_value_t = RandomRateSpan::FullCurve)]
    random_rate_span: RandomRateSpan,

    /// Also write a JSON summary of every axis
    #[arg(long, value_name = "PATH")]
    summary_json: Option<PathBuf>,

    /// Plot resolution
    #[arg(long, default_value_t = 600)]
    dpi: u32,

    /// Skip acceleration.png / gyro.png
    #[arg(long, default_value_t = false)]
    no_plots: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let opts = RunOptions {
        data: args.data,
        skip: args.skip as usize,
        output_dir: args.output_dir,
        analysis: AnalysisConfig {
            breakpoint_period: args.breakpoint_period,
            random_rate_span: args.random_rate_span,
            ..AnalysisConfig::default()
        },
        kalibr: KalibrConfig {
            rostopic: args.rostopic,
            update_rate: args.update_rate,
        },
        plot: (!args.no_plots).then(|| PlotConfig {
            dpi: args.dpi,
            ..PlotConfig::default()
        }),
        summary_json: args.summary_json,
    };

    pipeline::run(&opts)?;
    Ok(())
}
