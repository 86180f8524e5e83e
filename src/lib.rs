//! IMU noise parameters from Allan-deviation logs.
//!
//! Reads a `period ax ay az gx gy gz` Allan-deviation table, fits the white-noise and
//! rate-random-walk power laws on every axis, and writes a Kalibr `imu.yaml` plus
//! log-log diagnostic plots.

pub mod allan;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod types;

pub use allan::{analyze, AxisParameters, ImuAnalysis, SensorSummary};
pub use config::{AnalysisConfig, KalibrConfig, PlotConfig, RandomRateSpan};
pub use error::{AnalysisError, FitError, PlotError};
pub use loader::{load_series, Series};
pub use pipeline::{run, RunOptions, RunOutcome};
