use serde::Serialize;

use crate::error::FitError;
use crate::loader::AxisCurve;

/// Closed interval the fitted log-log slope is confined to
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopeBounds {
    pub lower: f64,
    pub upper: f64,
}

impl SlopeBounds {
    pub fn new(target_slope: f64, tolerance: f64) -> Self {
        Self {
            lower: target_slope,
            upper: target_slope + tolerance,
        }
    }

    pub fn clamp(&self, slope: f64) -> f64 {
        slope.clamp(self.lower, self.upper)
    }

    pub fn contains(&self, slope: f64) -> bool {
        slope >= self.lower && slope <= self.upper
    }
}

/// Line `ln(d) = slope * ln(tau) + intercept` in log-log space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PowerLawFit {
    pub slope: f64,
    pub intercept: f64,
}

impl PowerLawFit {
    /// Fitted deviation at averaging period `tau`
    pub fn eval(&self, tau: f64) -> f64 {
        (self.slope * tau.ln() + self.intercept).exp()
    }
}

/// Least-squares power-law fit with a bounded slope and a free intercept.
///
/// With the intercept profiled out the residual is a convex quadratic in the slope,
/// so the bounded optimum is the unconstrained slope clamped into `bounds`.
pub fn fit_power_law(curve: &AxisCurve<'_>, bounds: SlopeBounds) -> Result<PowerLawFit, FitError> {
    if curve.period.len() != curve.deviation.len() {
        return Err(FitError::LengthMismatch {
            periods: curve.period.len(),
            deviations: curve.deviation.len(),
        });
    }

    for (index, (&period, &deviation)) in curve.period.iter().zip(curve.deviation.iter()).enumerate() {
        if !(period > 0.0 && deviation > 0.0) {
            return Err(FitError::NonPositive {
                index,
                period,
                deviation,
            });
        }
    }

    let distinct = count_distinct(curve.period.iter().copied());
    if distinct < 2 {
        return Err(FitError::TooFewPoints { distinct });
    }

    let log_tau = curve.period.mapv(f64::ln);
    let log_dev = curve.deviation.mapv(f64::ln);
    // Non-empty (distinct >= 2), so the means exist
    let mean_x = log_tau.mean().unwrap_or(0.0);
    let mean_y = log_dev.mean().unwrap_or(0.0);

    let dx = &log_tau - mean_x;
    let dy = &log_dev - mean_y;
    let sxx = dx.dot(&dx);
    let sxy = dx.dot(&dy);

    let slope = bounds.clamp(sxy / sxx);
    let intercept = mean_y - slope * mean_x;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::NonFinite { slope, intercept });
    }

    Ok(PowerLawFit { slope, intercept })
}

fn count_distinct(values: impl Iterator<Item = f64>) -> usize {
    let mut seen: Vec<f64> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
            if seen.len() >= 2 {
                break;
            }
        }
    }
    seen.len()
}
