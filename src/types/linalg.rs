//! Array and vector aliases shared by the loader and the extractor.

use nalgebra::Vector3;
use ndarray::{Array1, Array2, ArrayView1};

// ===== Table Dimensions =====
pub const AXES_PER_SENSOR: usize = 3;
pub const MIN_FIELDS_PER_ROW: usize = 1 + 2 * AXES_PER_SENSOR; // period + accel + gyro

// ===== Per-sample Types =====
pub type Vec3 = Vector3<f64>;

// ===== Series Types =====
pub type PeriodArray = Array1<f64>;
pub type SensorTable = Array2<f64>; // N×3, one column per axis
pub type CurveView<'a> = ArrayView1<'a, f64>;
