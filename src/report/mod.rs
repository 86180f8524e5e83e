pub mod console;
pub mod kalibr;

pub use console::render_sensor_report;
pub use kalibr::{render_kalibr_yaml, write_kalibr_yaml, KALIBR_FILE_NAME};

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::allan::{CalibrationValues, ImuAnalysis};
use crate::config::{AnalysisConfig, KalibrConfig};
use crate::error::{AnalysisError, AnalysisResult};

/// Machine-readable dump of one run
#[derive(Serialize)]
pub struct SummaryReport<'a> {
    pub generated_at: String,
    pub data: String,
    pub skip: usize,
    pub samples: usize,
    pub config: &'a AnalysisConfig,
    pub kalibr: &'a KalibrConfig,
    pub analysis: &'a ImuAnalysis,
    pub accelerometer_calibration: CalibrationValues,
    pub gyroscope_calibration: CalibrationValues,
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        data: &Path,
        skip: usize,
        samples: usize,
        config: &'a AnalysisConfig,
        kalibr: &'a KalibrConfig,
        analysis: &'a ImuAnalysis,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            data: data.display().to_string(),
            skip,
            samples,
            config,
            kalibr,
            analysis,
            accelerometer_calibration: analysis.accelerometer.calibration_values(),
            gyroscope_calibration: analysis.gyroscope.calibration_values(),
        }
    }

    pub fn save(&self, path: &Path) -> AnalysisResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| AnalysisError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote JSON summary to {}", path.display());
        Ok(())
    }
}
