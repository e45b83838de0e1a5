/// Table projection — the display-ready row sequence derived from the point
/// store and the current calibration.
///
/// The projection is a pure function and never a source of truth: it is
/// re-derived from the live store and inputs whenever either changes, so the
/// displayed table cannot go stale.

use super::calibration::Calibration;
use super::points::PointStore;

/// One derived table row. `calib` is `None` whenever calibration is
/// unavailable — empty in the display, not zero and not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// 1-based display index.
    pub index: usize,
    pub pixel_x: i32,
    pub pixel_y: i32,
    pub calib: Option<(f64, f64)>,
}

impl TableRow {
    pub fn calib_x_string(&self) -> String {
        self.calib.map(|(x, _)| format_sig(x)).unwrap_or_default()
    }

    pub fn calib_y_string(&self) -> String {
        self.calib.map(|(_, y)| format_sig(y)).unwrap_or_default()
    }
}

/// Project every data point through the calibration (when available) into a
/// row sequence with contiguous 1-based indices. Idempotent: unchanged
/// inputs yield identical output.
pub fn project(store: &PointStore, calibration: Option<&Calibration>) -> Vec<TableRow> {
    store
        .data_points()
        .iter()
        .enumerate()
        .map(|(i, p)| TableRow {
            index: i + 1,
            pixel_x: p.pixel_x,
            pixel_y: p.pixel_y,
            calib: calibration.map(|c| c.pixel_to_data(p.pixel_x as f64, p.pixel_y as f64)),
        })
        .collect()
}

/// Format with ~6 significant digits, like C's `%.6g`: fixed notation for
/// magnitudes in `[1e-4, 1e6)`, scientific outside, trailing zeros trimmed.
pub fn format_sig(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return v.to_string();
    }
    let exp = v.abs().log10().floor() as i32;
    if (-4..6).contains(&exp) {
        let decimals = (5 - exp).max(0) as usize;
        let s = format!("{:.*}", decimals, v);
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        }
    } else {
        let s = format!("{:.5e}", v);
        match s.split_once('e') {
            Some((mantissa, exponent)) => {
                let m = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{}e{}", m, exponent)
            }
            None => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digitize::calibration::{Calibration, CalibrationInputs};

    fn calibrated_store() -> (PointStore, CalibrationInputs) {
        let mut store = PointStore::new();
        store.add_axis_point(10, 0).unwrap();
        store.add_axis_point(110, 0).unwrap();
        store.add_axis_point(0, 80).unwrap();
        store.add_axis_point(0, 0).unwrap();
        let inputs = CalibrationInputs {
            x0: "0".into(),
            x1: "100".into(),
            y0: "0".into(),
            y1: "100".into(),
        };
        (store, inputs)
    }

    #[test]
    fn test_rows_carry_calibrated_values() {
        let (mut store, inputs) = calibrated_store();
        store.add_data_point(60, 40);
        let cal = Calibration::current(&store, &inputs).unwrap();
        let rows = project(&store, Some(&cal));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
        assert_eq!((rows[0].pixel_x, rows[0].pixel_y), (60, 40));
        let (x, y) = rows[0].calib.expect("calibrated");
        assert!((x - 50.0).abs() < 1e-9 && (y - 50.0).abs() < 1e-9);
        assert_eq!(rows[0].calib_x_string(), "50");
    }

    #[test]
    fn test_absent_calibration_gives_empty_fields() {
        let mut store = PointStore::new();
        store.add_data_point(3, 4);
        let rows = project(&store, None);
        assert_eq!(rows[0].calib, None);
        assert_eq!(rows[0].calib_x_string(), "");
        assert_eq!(rows[0].calib_y_string(), "");
    }

    #[test]
    fn test_indices_contiguous_after_deletion() {
        let (mut store, inputs) = calibrated_store();
        for x in 0..5 {
            store.add_data_point(x * 10, 50);
        }
        store.remove_data_points(&[0usize, 2].into_iter().collect());
        let cal = Calibration::current(&store, &inputs).unwrap();
        let rows = project(&store, Some(&cal));
        assert_eq!(rows.len(), store.data_points().len());
        let indices: Vec<_> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3], "indices renumber contiguously");
    }

    #[test]
    fn test_projection_is_idempotent() {
        let (mut store, inputs) = calibrated_store();
        store.add_data_point(60, 40);
        store.add_data_point(61, 41);
        let cal = Calibration::current(&store, &inputs).unwrap();
        let a = project(&store, Some(&cal));
        let b = project(&store, Some(&cal));
        assert_eq!(a, b, "unchanged inputs must yield identical rows");
    }

    #[test]
    fn test_format_sig() {
        assert_eq!(format_sig(0.0), "0");
        assert_eq!(format_sig(50.0), "50");
        assert_eq!(format_sig(-7.25), "-7.25");
        assert_eq!(format_sig(0.123456789), "0.123457");
        assert_eq!(format_sig(123456.0), "123456");
        assert_eq!(format_sig(0.000125), "0.000125");
        assert_eq!(format_sig(1.25e-7), "1.25e-7");
        assert_eq!(format_sig(3.0e8), "3e8");
    }
}
