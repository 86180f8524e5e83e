use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use ndarray::{s, Array1, Array2};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{
    Axis, CurveView, PeriodArray, Sample, Sensor, SensorTable, Vec3, AXES_PER_SENSOR,
    MIN_FIELDS_PER_ROW,
};

/// Allan-deviation log after row selection.
///
/// `period`, `acceleration` and `rotation_rate` are index-aligned: row `i` of each
/// table belongs to `period[i]`.
#[derive(Clone, Debug)]
pub struct Series {
    pub period: PeriodArray,
    pub acceleration: SensorTable,
    pub rotation_rate: SensorTable,
}

/// One column of the series paired with the shared period array
#[derive(Clone, Copy, Debug)]
pub struct AxisCurve<'a> {
    pub period: CurveView<'a>,
    pub deviation: CurveView<'a>,
}

impl<'a> AxisCurve<'a> {
    pub fn len(&self) -> usize {
        self.period.len()
    }

    pub fn is_empty(&self) -> bool {
        self.period.is_empty()
    }

    /// Sub-curve over `[start, end)`
    pub fn slice(&self, start: usize, end: usize) -> AxisCurve<'a> {
        AxisCurve {
            period: self.period.slice_move(s![start..end]),
            deviation: self.deviation.slice_move(s![start..end]),
        }
    }
}

impl Series {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let n = samples.len();
        let period = Array1::from_iter(samples.iter().map(|s| s.period));
        let mut acceleration = Array2::<f64>::zeros((n, AXES_PER_SENSOR));
        let mut rotation_rate = Array2::<f64>::zeros((n, AXES_PER_SENSOR));
        for (i, sample) in samples.iter().enumerate() {
            for j in 0..AXES_PER_SENSOR {
                acceleration[[i, j]] = sample.acceleration[j];
                rotation_rate[[i, j]] = sample.rotation_rate[j];
            }
        }
        Series {
            period,
            acceleration,
            rotation_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.period.len()
    }

    pub fn is_empty(&self) -> bool {
        self.period.is_empty()
    }

    pub fn table(&self, sensor: Sensor) -> &SensorTable {
        match sensor {
            Sensor::Accelerometer => &self.acceleration,
            Sensor::Gyroscope => &self.rotation_rate,
        }
    }

    pub fn curve(&self, sensor: Sensor, axis: Axis) -> AxisCurve<'_> {
        AxisCurve {
            period: self.period.view(),
            deviation: self.table(sensor).column(axis.index()),
        }
    }

    /// First index whose period equals `value` exactly
    pub fn breakpoint_index(&self, value: f64) -> AnalysisResult<usize> {
        self.period
            .iter()
            .position(|&p| p == value)
            .ok_or(AnalysisError::BreakpointNotFound { period: value })
    }
}

/// Load a whitespace-delimited Allan-deviation log, keeping every `skip`-th row.
///
/// Paths ending in `.gz` are decompressed on the fly.
pub fn load_series(path: &Path, skip: usize) -> AnalysisResult<Series> {
    let file = File::open(path).map_err(|source| AnalysisError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let series = if path.extension().map(|e| e == "gz").unwrap_or(false) {
        read_series(BufReader::new(GzDecoder::new(file)), skip)
    } else {
        read_series(BufReader::new(file), skip)
    };
    // Reader-level I/O errors don't know the path; attach it here.
    series.map_err(|e| match e {
        AnalysisError::InputRead { source, .. } => AnalysisError::InputRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse a log from any reader, keeping every `skip`-th data line.
///
/// Whitespace-only lines are not data lines: they are skipped without advancing the
/// row counter, so they never shift which rows `skip` selects.
pub fn read_series<R: BufRead>(reader: R, skip: usize) -> AnalysisResult<Series> {
    if skip == 0 {
        return Err(AnalysisError::InvalidSkip(skip));
    }

    let mut samples = Vec::new();
    let mut counter = 0usize;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AnalysisError::InputRead {
            path: Default::default(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        counter += 1;
        if counter % skip != 0 {
            continue;
        }

        samples.push(parse_row(&line, line_idx + 1)?);
    }

    log::debug!("Kept {} of {} rows (skip={})", samples.len(), counter, skip);
    Ok(Series::from_samples(&samples))
}

fn parse_row(line: &str, line_no: usize) -> AnalysisResult<Sample> {
    let mut values = [0.0f64; MIN_FIELDS_PER_ROW];
    let mut fields = line.split_whitespace();

    for (i, slot) in values.iter_mut().enumerate() {
        let field = fields.next().ok_or_else(|| AnalysisError::InputParse {
            line: line_no,
            reason: format!("expected at least {} fields, found {}", MIN_FIELDS_PER_ROW, i),
        })?;
        let value: f64 = field.parse().map_err(|_| AnalysisError::InputParse {
            line: line_no,
            reason: format!("field {} ({:?}) is not a number", i + 1, field),
        })?;
        if !value.is_finite() {
            return Err(AnalysisError::InputParse {
                line: line_no,
                reason: format!("field {} ({:?}) is not finite", i + 1, field),
            });
        }
        *slot = value;
    }

    Ok(Sample {
        period: values[0],
        acceleration: Vec3::new(values[1], values[2], values[3]),
        rotation_rate: Vec3::new(values[4], values[5], values[6]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn log_text(rows: usize) -> String {
        (1..=rows)
            .map(|i| {
                let t = i as f64;
                format!(
                    "{} {} {} {} {} {} {}\n",
                    t,
                    0.1 * t,
                    0.2 * t,
                    0.3 * t,
                    1.0 * t,
                    2.0 * t,
                    3.0 * t
                )
            })
            .collect()
    }

    #[test]
    fn test_skip_one_keeps_every_row() {
        let series = read_series(Cursor::new(log_text(12)), 1).unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series.acceleration.nrows(), 12);
        assert_eq!(series.rotation_rate.nrows(), 12);
    }

    #[test]
    fn test_skip_keeps_floor_lines_over_skip() {
        for skip in 2..=7 {
            let series = read_series(Cursor::new(log_text(20)), skip).unwrap();
            assert_eq!(series.len(), 20 / skip, "skip={}", skip);
            // counter is 1-based: the first kept row is row `skip`
            assert_eq!(series.period[0], skip as f64);
        }
    }

    #[test]
    fn test_columns_are_aligned() {
        let series = read_series(Cursor::new(log_text(9)), 3).unwrap();
        for (i, &t) in series.period.iter().enumerate() {
            assert!((series.acceleration[[i, 0]] - 0.1 * t).abs() < 1e-12);
            assert!((series.acceleration[[i, 2]] - 0.3 * t).abs() < 1e-12);
            assert!((series.rotation_rate[[i, 1]] - 2.0 * t).abs() < 1e-12);
        }
        let curve = series.curve(Sensor::Gyroscope, Axis::Z);
        assert_eq!(curve.deviation[2], 27.0);
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let text = "1 2 3 4 5 6 7\n2 2 3 4 5 6\n";
        let err = read_series(Cursor::new(text), 1).unwrap_err();
        match err {
            AnalysisError::InputParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_is_parse_error() {
        let text = "1 2 3 4 5 6 abc\n";
        assert!(matches!(
            read_series(Cursor::new(text), 1),
            Err(AnalysisError::InputParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_skipped_rows_are_not_parsed() {
        // Row 1 is malformed but never selected with skip=2
        let text = "bad row\n2 1 1 1 1 1 1\n";
        let series = read_series(Cursor::new(text), 2).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.period[0], 2.0);
    }

    #[test]
    fn test_blank_lines_do_not_advance_counter() {
        let text = "1 1 1 1 1 1 1\n\n3 1 1 1 1 1 1\n   \n4 1 1 1 1 1 1\n";
        let series = read_series(Cursor::new(text), 2).unwrap();
        assert_eq!(series.period.to_vec(), vec![3.0]);
    }

    #[test]
    fn test_extra_fields_and_tabs() {
        let text = "1\t2 3  4 5 6 7 8 9\n";
        let series = read_series(Cursor::new(text), 1).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.rotation_rate[[0, 2]], 7.0);
    }

    #[test]
    fn test_zero_skip_rejected() {
        assert!(matches!(
            read_series(Cursor::new(log_text(3)), 0),
            Err(AnalysisError::InvalidSkip(0))
        ));
    }

    #[test]
    fn test_breakpoint_index() {
        let series = read_series(Cursor::new(log_text(15)), 1).unwrap();
        assert_eq!(series.breakpoint_index(10.0).unwrap(), 9);
        assert!(matches!(
            series.breakpoint_index(10.5),
            Err(AnalysisError::BreakpointNotFound { .. })
        ));
    }

    #[test]
    fn test_load_gzip_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allan.txt.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(log_text(6).as_bytes()).unwrap();
        encoder.finish().unwrap();

        let series = load_series(&path, 2).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.period.to_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_series(Path::new("/nonexistent/allan.txt"), 1).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/allan.txt"));
    }
}
