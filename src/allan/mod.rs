//! Allan-deviation parameter extraction
//!
//! Each of the six axis curves gets two bounded-slope power-law fits (white noise,
//! random rate) and a min/argmin search for bias instability. Per-axis results are
//! then averaged into one [`SensorSummary`] per sensor.

pub mod fit;
pub mod summary;

pub use fit::{fit_power_law, PowerLawFit, SlopeBounds};
pub use summary::{CalibrationValues, SensorSummary};

use serde::Serialize;
use std::fmt::{Display, Formatter};

use crate::config::{AnalysisConfig, FitWindow, RandomRateSpan};
use crate::error::{AnalysisError, AnalysisResult, FitError};
use crate::loader::{AxisCurve, Series};
use crate::types::{Axis, AxisId, Sensor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitKind {
    WhiteNoise,
    RandomRate,
}

impl Display for FitKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FitKind::WhiteNoise => write!(f, "white-noise"),
            FitKind::RandomRate => write!(f, "random-rate"),
        }
    }
}

/// Minimum of an Allan-deviation curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BiasInstability {
    pub value: f64,
    pub period: f64,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisParameters {
    pub axis: AxisId,
    /// White-noise fit read at the white-noise evaluation period (tau = 1 s)
    pub white_noise_intercept: f64,
    /// Random-rate fit read at the random-rate evaluation period (tau = 3 s)
    pub random_rate_intercept: f64,
    pub bias_instability: BiasInstability,
    pub white_noise_fit: PowerLawFit,
    pub random_rate_fit: PowerLawFit,
}

/// Everything the emitters need from one run
#[derive(Clone, Debug, Serialize)]
pub struct ImuAnalysis {
    pub breakpoint_index: usize,
    pub accelerometer: SensorSummary,
    pub gyroscope: SensorSummary,
}

impl ImuAnalysis {
    pub fn summary(&self, sensor: Sensor) -> &SensorSummary {
        match sensor {
            Sensor::Accelerometer => &self.accelerometer,
            Sensor::Gyroscope => &self.gyroscope,
        }
    }
}

/// Min and argmin over the whole curve. Ties resolve to the first index.
///
/// Returns `None` for an empty curve.
pub fn bias_instability(curve: &AxisCurve<'_>) -> Option<BiasInstability> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &d) in curve.deviation.iter().enumerate() {
        match best {
            Some((_, v)) if d >= v => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(index, value)| BiasInstability {
        value,
        period: curve.period[index],
        index,
    })
}

fn run_fit(
    axis: AxisId,
    kind: FitKind,
    segment: &AxisCurve<'_>,
    window: &FitWindow,
    config: &AnalysisConfig,
) -> AnalysisResult<(PowerLawFit, f64)> {
    let bounds = SlopeBounds::new(window.target_slope, config.slope_tolerance);
    let fit = fit_power_law(segment, bounds).map_err(|source| AnalysisError::RegressionFailure {
        axis,
        fit: kind,
        source,
    })?;
    let value = fit.eval(window.eval_period);
    log::debug!(
        "{} {} fit over {} points: slope={:.6} intercept={:.6} value@{}={:.6e}",
        axis,
        kind,
        segment.len(),
        fit.slope,
        fit.intercept,
        window.eval_period,
        value
    );
    Ok((fit, value))
}

/// Derive white-noise, random-rate and bias-instability values for one curve.
///
/// `breakpoint` is the index of the breakpoint period: the white-noise fit uses
/// `[0, breakpoint)`.
pub fn extract_axis(
    axis: AxisId,
    curve: &AxisCurve<'_>,
    breakpoint: usize,
    config: &AnalysisConfig,
) -> AnalysisResult<AxisParameters> {
    let empty_curve = || AnalysisError::RegressionFailure {
        axis,
        fit: FitKind::WhiteNoise,
        source: FitError::TooFewPoints { distinct: 0 },
    };
    if curve.is_empty() {
        return Err(empty_curve());
    }

    let white_segment = curve.slice(0, breakpoint);
    let random_segment = match config.random_rate_span {
        RandomRateSpan::FullCurve => *curve,
        RandomRateSpan::AboveBreakpoint => curve.slice(breakpoint, curve.len()),
    };

    let (white_noise_fit, white_noise_intercept) = run_fit(
        axis,
        FitKind::WhiteNoise,
        &white_segment,
        &config.white_noise,
        config,
    )?;
    let (random_rate_fit, random_rate_intercept) = run_fit(
        axis,
        FitKind::RandomRate,
        &random_segment,
        &config.random_rate,
        config,
    )?;

    let bias_instability = bias_instability(curve).ok_or_else(empty_curve)?;

    Ok(AxisParameters {
        axis,
        white_noise_intercept,
        random_rate_intercept,
        bias_instability,
        white_noise_fit,
        random_rate_fit,
    })
}

fn analyze_sensor(
    series: &Series,
    sensor: Sensor,
    breakpoint: usize,
    config: &AnalysisConfig,
) -> AnalysisResult<SensorSummary> {
    let mut axes = Vec::with_capacity(Axis::ALL.len());
    for axis in Axis::ALL {
        let curve = series.curve(sensor, axis);
        axes.push(extract_axis(AxisId::new(sensor, axis), &curve, breakpoint, config)?);
    }
    Ok(SensorSummary::from_axes(sensor, axes))
}

/// Run the extractor over all six axes of `series`.
pub fn analyze(series: &Series, config: &AnalysisConfig) -> AnalysisResult<ImuAnalysis> {
    let breakpoint = series.breakpoint_index(config.breakpoint_period)?;
    log::info!(
        "Breakpoint period {} found at index {} of {}",
        config.breakpoint_period,
        breakpoint,
        series.len()
    );

    let accelerometer = analyze_sensor(series, Sensor::Accelerometer, breakpoint, config)?;
    let gyroscope = analyze_sensor(series, Sensor::Gyroscope, breakpoint, config)?;

    Ok(ImuAnalysis {
        breakpoint_index: breakpoint,
        accelerometer,
        gyroscope,
    })
}
