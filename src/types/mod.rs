pub mod linalg;

pub use linalg::*;

use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Which instrument a curve came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    Accelerometer,
    Gyroscope,
}

impl Sensor {
    pub const ALL: [Sensor; 2] = [Sensor::Accelerometer, Sensor::Gyroscope];

    /// Prefix used for the Kalibr keys (`accelerometer_noise_density`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            Sensor::Accelerometer => "accelerometer",
            Sensor::Gyroscope => "gyroscope",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Sensor::Accelerometer => "Accelerometer",
            Sensor::Gyroscope => "Gyroscope",
        }
    }

    /// Scale applied when going from log units to calibration-file units.
    ///
    /// Gyro logs are in degrees, Kalibr wants radians. Accel logs are already SI.
    pub fn calibration_scale(&self) -> f64 {
        match self {
            Sensor::Accelerometer => 1.0,
            Sensor::Gyroscope => std::f64::consts::PI / 180.0,
        }
    }

    pub fn units(&self) -> &'static SensorUnits {
        match self {
            Sensor::Accelerometer => &ACCEL_UNITS,
            Sensor::Gyroscope => &GYRO_UNITS,
        }
    }
}

impl Display for Sensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Labels and unit strings for the console report and plots
#[derive(Debug)]
pub struct SensorUnits {
    pub heading: &'static str,
    pub white_noise_label: &'static str,
    pub white_noise_unit: &'static str,
    pub white_noise_hour_unit: &'static str,
    pub bias_unit: &'static str,
    pub bias_hour_unit: &'static str,
    pub random_rate_label: &'static str,
    pub random_rate_unit: &'static str,
    pub deviation_axis_label: &'static str,
}

const ACCEL_UNITS: SensorUnits = SensorUnits {
    heading: "ACCELEROMETER:",
    white_noise_label: "Velocity Random Walk",
    white_noise_unit: "m/s/sqrt(s)",
    white_noise_hour_unit: "m/s/sqrt(hr)",
    bias_unit: "m/s^2",
    bias_hour_unit: "m/hr^2",
    random_rate_label: "Accel Random Walk",
    random_rate_unit: "m/s^2",
    deviation_axis_label: "Allan Deviation m/s^2",
};

const GYRO_UNITS: SensorUnits = SensorUnits {
    heading: "GYROSCOPE:",
    white_noise_label: "Angle Random Walk",
    white_noise_unit: "deg/sqrt(s)",
    white_noise_hour_unit: "deg/sqrt(hr)",
    bias_unit: "deg/s",
    bias_hour_unit: "deg/hr",
    random_rate_label: "Rate Random Walk",
    random_rate_unit: "deg/s",
    deviation_axis_label: "Allan Deviation deg/s",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index inside a 3-column sensor table
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// One of the six analysed curves (accel-x .. gyro-z)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AxisId {
    pub sensor: Sensor,
    pub axis: Axis,
}

impl AxisId {
    pub fn new(sensor: Sensor, axis: Axis) -> Self {
        Self { sensor, axis }
    }
}

impl Display for AxisId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.sensor.key(), self.axis.label().to_lowercase())
    }
}

/// One row of the Allan-deviation log.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub period: f64,
    pub acceleration: Vec3,
    pub rotation_rate: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_id_display() {
        let id = AxisId::new(Sensor::Gyroscope, Axis::Z);
        assert_eq!(id.to_string(), "gyroscope-z");
    }

    #[test]
    fn test_calibration_scale_only_converts_gyro() {
        assert_eq!(Sensor::Accelerometer.calibration_scale(), 1.0);
        assert!((Sensor::Gyroscope.calibration_scale() - 1f64.to_radians()).abs() < 1e-15);
    }

    #[test]
    fn test_axis_columns() {
        let cols: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(cols, vec![0, 1, 2]);
    }
}
