use std::fs;
use std::path::Path;

use crate::allan::ImuAnalysis;
use crate::config::KalibrConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::types::Sensor;

pub const KALIBR_FILE_NAME: &str = "imu.yaml";

/// Shortest round-trip decimal that YAML always reads back as a float
pub fn yaml_float(value: f64) -> String {
    let s = format!("{}", value);
    if s.contains('.') || !value.is_finite() {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Kalibr IMU noise file. Gyro values are in rad (converted by `calibration_values`).
pub fn render_kalibr_yaml(analysis: &ImuAnalysis, kalibr: &KalibrConfig) -> String {
    let mut out = String::new();
    for sensor in Sensor::ALL {
        let values = analysis.summary(sensor).calibration_values();
        out.push_str(&format!("#{}\n", sensor.title()));
        out.push_str(&format!(
            "{}_noise_density: {} \n",
            sensor.key(),
            yaml_float(values.noise_density)
        ));
        out.push_str(&format!(
            "{}_random_walk: {} \n",
            sensor.key(),
            yaml_float(values.random_walk)
        ));
        out.push('\n');
    }
    out.push_str(&format!(
        "rostopic: '{}' #Make sure this is correct\n",
        kalibr.rostopic.replace('\'', "''")
    ));
    out.push_str(&format!(
        "update_rate: {} #Make sure this is correct\n",
        yaml_float(kalibr.update_rate)
    ));
    out.push('\n');
    out
}

/// Write (truncating any existing file) the Kalibr config to `path`.
pub fn write_kalibr_yaml(path: &Path, analysis: &ImuAnalysis, kalibr: &KalibrConfig) -> AnalysisResult<()> {
    fs::write(path, render_kalibr_yaml(analysis, kalibr)).map_err(|source| AnalysisError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote Kalibr config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allan::{AxisParameters, BiasInstability, PowerLawFit, SensorSummary};
    use crate::types::{Axis, AxisId};

    fn summary(sensor: Sensor, wn: f64, rr: f64) -> SensorSummary {
        let line = PowerLawFit {
            slope: 0.5,
            intercept: 0.0,
        };
        let axes = Axis::ALL
            .iter()
            .map(|&axis| AxisParameters {
                axis: AxisId::new(sensor, axis),
                white_noise_intercept: wn,
                random_rate_intercept: rr,
                bias_instability: BiasInstability {
                    value: 1.0,
                    period: 1.0,
                    index: 0,
                },
                white_noise_fit: line,
                random_rate_fit: line,
            })
            .collect();
        SensorSummary::from_axes(sensor, axes)
    }

    fn analysis() -> ImuAnalysis {
        ImuAnalysis {
            breakpoint_index: 5,
            accelerometer: summary(Sensor::Accelerometer, 0.0025, 0.0004),
            gyroscope: summary(Sensor::Gyroscope, 180.0, 90.0),
        }
    }

    #[test]
    fn test_yaml_float() {
        assert_eq!(yaml_float(400.0), "400.0");
        assert_eq!(yaml_float(0.0025), "0.0025");
        assert_eq!(yaml_float(1e-7), "0.0000001");
        assert_eq!(yaml_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_render_layout() {
        let yaml = render_kalibr_yaml(&analysis(), &KalibrConfig::default());
        let pi = std::f64::consts::PI;
        let expected = format!(
            "#Accelerometer\n\
             accelerometer_noise_density: 0.0025 \n\
             accelerometer_random_walk: 0.0004 \n\
             \n\
             #Gyroscope\n\
             gyroscope_noise_density: {} \n\
             gyroscope_random_walk: {} \n\
             \n\
             rostopic: '/sensors/imu' #Make sure this is correct\n\
             update_rate: 400.0 #Make sure this is correct\n\
             \n",
            yaml_float(180.0 * pi / 180.0),
            yaml_float(90.0 * pi / 180.0)
        );
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(KALIBR_FILE_NAME);
        fs::write(&path, "stale contents that are much longer than anything else\n".repeat(50)).unwrap();

        let kalibr = KalibrConfig {
            rostopic: "/imu0".to_string(),
            update_rate: 200.0,
        };
        write_kalibr_yaml(&path, &analysis(), &kalibr).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_kalibr_yaml(&analysis(), &kalibr));
        assert!(written.contains("rostopic: '/imu0'"));
        assert!(written.contains("update_rate: 200.0 "));
    }

    #[test]
    fn test_unwritable_path() {
        let err = write_kalibr_yaml(
            Path::new("/nonexistent-dir/imu.yaml"),
            &analysis(),
            &KalibrConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::FileWrite { .. }));
    }
}
