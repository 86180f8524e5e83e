use serde::Serialize;

/// Which part of the curve the random-rate regression sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RandomRateSpan {
    /// Every index of the curve (historical behaviour of the Kalibr helper script)
    FullCurve,
    /// Only `[breakpoint, end)`
    AboveBreakpoint,
}

/// Target slope and read-out period for one power-law fit
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitWindow {
    pub target_slope: f64,
    pub eval_period: f64,
}

/// Constants that drive the Allan-deviation extractor
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Period value that ends the white-noise window. Must be present verbatim in the log.
    pub breakpoint_period: f64,
    /// Slope -1/2 component read at tau = 1 s
    pub white_noise: FitWindow,
    /// Slope +1/2 component read at tau = 3 s
    pub random_rate: FitWindow,
    /// Fitted slope is bounded to `[target_slope, target_slope + slope_tolerance]`
    pub slope_tolerance: f64,
    pub random_rate_span: RandomRateSpan,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            breakpoint_period: 10.0,
            white_noise: FitWindow {
                target_slope: -0.5,
                eval_period: 1.0,
            },
            random_rate: FitWindow {
                target_slope: 0.5,
                eval_period: 3.0,
            },
            slope_tolerance: 0.001,
            random_rate_span: RandomRateSpan::FullCurve,
        }
    }
}

/// Passthrough values describing the data source in `imu.yaml`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KalibrConfig {
    pub rostopic: String,
    pub update_rate: f64,
}

impl Default for KalibrConfig {
    fn default() -> Self {
        Self {
            rostopic: "/sensors/imu".to_string(),
            update_rate: 400.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotConfig {
    pub dpi: u32,
    pub width_in: f64,
    pub height_in: f64,
}

impl PlotConfig {
    /// Bitmap size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (self.width_in * self.dpi as f64).round() as u32;
        let h = (self.height_in * self.dpi as f64).round() as u32;
        (w.max(1), h.max(1))
    }

    /// Converts a point size into pixels at this DPI
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            dpi: 600,
            width_in: 16.0,
            height_in: 9.0,
        }
    }
}
