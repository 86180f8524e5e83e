//! Log-log diagnostic plots of the Allan-deviation curves and fitted lines.

use std::path::Path;

use plotters::prelude::*;

use crate::allan::SensorSummary;
use crate::config::{AnalysisConfig, PlotConfig};
use crate::error::PlotError;
use crate::loader::Series;
use crate::types::{Axis, Sensor};

pub fn plot_file_name(sensor: Sensor) -> &'static str {
    match sensor {
        Sensor::Accelerometer => "acceleration.png",
        Sensor::Gyroscope => "gyro.png",
    }
}

fn axis_color(axis: Axis) -> RGBColor {
    match axis {
        Axis::X => RED,
        Axis::Y => GREEN,
        Axis::Z => BLUE,
    }
}

/// Log-axis ranges covering curves, fit lines and markers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl PlotBounds {
    pub fn compute(series: &Series, summary: &SensorSummary, config: &AnalysisConfig) -> Option<Self> {
        let table = series.table(summary.sensor);
        let mut xs: Vec<f64> = series.period.to_vec();
        xs.push(config.white_noise.eval_period);
        xs.push(config.random_rate.eval_period);

        let mut ys: Vec<f64> = table.iter().copied().collect();
        for p in &summary.axes {
            ys.push(p.white_noise_intercept);
            ys.push(p.random_rate_intercept);
            ys.push(p.bias_instability.value);
            for &t in series.period.iter() {
                ys.push(p.white_noise_fit.eval(t));
                ys.push(p.random_rate_fit.eval(t));
            }
        }

        let x = positive_range(&xs)?;
        let y = positive_range(&ys)?;
        // Half a decade of headroom on y, a little on x
        Some(PlotBounds {
            x: (x.0 / 1.2, x.1 * 1.2),
            y: (y.0 / 3.0, y.1 * 3.0),
        })
    }
}

fn positive_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Render one sensor's figure to `path` as a PNG.
///
/// Headless: the figure goes straight to disk, there is no interactive preview pause.
pub fn render_sensor_plot(
    path: &Path,
    series: &Series,
    summary: &SensorSummary,
    config: &AnalysisConfig,
    plot: &PlotConfig,
) -> Result<(), PlotError> {
    draw(path, series, summary, config, plot).map_err(|e| PlotError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::info!("Saved {} plot to {}", summary.sensor, path.display());
    Ok(())
}

fn draw(
    path: &Path,
    series: &Series,
    summary: &SensorSummary,
    config: &AnalysisConfig,
    plot: &PlotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = PlotBounds::compute(series, summary, config).ok_or("no positive values to plot")?;
    let units = summary.sensor.units();

    let title_px = plot.points(30.0);
    let legend_px = plot.points(25.0);
    let line_px = plot.points(1.5).max(1.0) as u32;
    let marker_px = plot.points(10.0).max(2.0) as u32;

    let root = BitMapBackend::new(path, plot.pixel_size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(summary.sensor.title(), ("sans-serif", title_px))
        .margin(plot.points(10.0) as u32)
        .x_label_area_size(plot.points(60.0) as u32)
        .y_label_area_size(plot.points(90.0) as u32)
        .build_cartesian_2d(
            (bounds.x.0..bounds.x.1).log_scale(),
            (bounds.y.0..bounds.y.1).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("Period (s)")
        .y_desc(units.deviation_axis_label)
        .label_style(("sans-serif", legend_px))
        .axis_desc_style(("sans-serif", title_px))
        .draw()?;

    let period: Vec<f64> = series.period.to_vec();

    for p in &summary.axes {
        let color = axis_color(p.axis.axis);
        let curve = series.curve(summary.sensor, p.axis.axis);
        chart
            .draw_series(LineSeries::new(
                period.iter().copied().zip(curve.deviation.iter().copied()),
                color.stroke_width(line_px),
            ))?
            .label(p.axis.axis.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(6)));
    }

    for (i, p) in summary.axes.iter().enumerate() {
        let fit = p.white_noise_fit;
        let drawn = chart.draw_series(LineSeries::new(
            period.iter().map(|&t| (t, fit.eval(t))),
            MAGENTA.stroke_width(line_px),
        ))?;
        if i + 1 == summary.axes.len() {
            drawn
                .label("White noise fit line")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], MAGENTA.stroke_width(6)));
        }
    }

    for (i, p) in summary.axes.iter().enumerate() {
        let fit = p.random_rate_fit;
        let drawn = chart.draw_series(LineSeries::new(
            period.iter().map(|&t| (t, fit.eval(t))),
            YELLOW.stroke_width(line_px),
        ))?;
        if i + 1 == summary.axes.len() {
            drawn
                .label("Random rate fit line")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 40, y)], YELLOW.stroke_width(6)));
        }
    }

    for p in &summary.axes {
        let color = axis_color(p.axis.axis);
        chart.draw_series(std::iter::once(Circle::new(
            (config.white_noise.eval_period, p.white_noise_intercept),
            marker_px,
            color.filled(),
        )))?;
        chart.draw_series(std::iter::once(Cross::new(
            (config.random_rate.eval_period, p.random_rate_intercept),
            marker_px,
            color.stroke_width(line_px),
        )))?;
        chart.draw_series(std::iter::once(TriangleMarker::new(
            (p.bias_instability.period, p.bias_instability.value),
            marker_px,
            color.filled(),
        )))?;
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", legend_px))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
