use serde::Serialize;

use super::AxisParameters;
use crate::types::Sensor;

/// Per-sensor aggregate of the three axis results, in the log's native units
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensorSummary {
    pub sensor: Sensor,
    pub axes: Vec<AxisParameters>,
    /// Mean of the white-noise intercepts
    pub noise_density: f64,
    /// Mean of the random-rate intercepts
    pub random_walk: f64,
}

/// Values as written to the calibration file
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CalibrationValues {
    pub noise_density: f64,
    pub random_walk: f64,
}

impl SensorSummary {
    pub fn from_axes(sensor: Sensor, axes: Vec<AxisParameters>) -> Self {
        let n = axes.len().max(1) as f64;
        let noise_density = axes.iter().map(|a| a.white_noise_intercept).sum::<f64>() / n;
        let random_walk = axes.iter().map(|a| a.random_rate_intercept).sum::<f64>() / n;
        Self {
            sensor,
            axes,
            noise_density,
            random_walk,
        }
    }

    /// Unit conversion for the calibration file.
    ///
    /// This is the only place log units are converted: gyro values go from degrees to
    /// radians, accel values pass through. The console report keeps native units.
    pub fn calibration_values(&self) -> CalibrationValues {
        let scale = self.sensor.calibration_scale();
        CalibrationValues {
            noise_density: self.noise_density * scale,
            random_walk: self.random_walk * scale,
        }
    }
}
