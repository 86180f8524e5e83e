use std::fmt::Write;

use crate::allan::SensorSummary;

/// Minutes/hours scale factors for the "per hour" columns
const PER_SQRT_HOUR: f64 = 60.0;
const PER_HOUR: f64 = 3600.0;

/// Fixed 5-decimal number with a leading space when non-negative
pub fn fmt_value(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("{:.5}", value)
    } else {
        format!(" {:.5}", value.abs())
    }
}

/// Human-readable per-axis block for one sensor, in native (log) units.
pub fn render_sensor_report(summary: &SensorSummary) -> String {
    let units = summary.sensor.units();
    let mut out = String::new();

    let _ = writeln!(out, "{}", units.heading);
    for p in &summary.axes {
        let wn = p.white_noise_intercept;
        let _ = writeln!(
            out,
            "{} {}: {} {} {} {}",
            p.axis.axis.label(),
            units.white_noise_label,
            fmt_value(wn),
            units.white_noise_unit,
            fmt_value(wn * PER_SQRT_HOUR),
            units.white_noise_hour_unit
        );
    }
    for p in &summary.axes {
        let bi = p.bias_instability.value;
        let _ = writeln!(
            out,
            "{} Bias Instability: {} {} {} {}",
            p.axis.axis.label(),
            fmt_value(bi),
            units.bias_unit,
            fmt_value(bi * PER_HOUR),
            units.bias_hour_unit
        );
    }
    for p in &summary.axes {
        let _ = writeln!(
            out,
            "{} {}: {} {}",
            p.axis.axis.label(),
            units.random_rate_label,
            fmt_value(p.random_rate_intercept),
            units.random_rate_unit
        );
    }
    out
}
