/// Export and plot preparation — flat CSV text and plot series, both built
/// from the current table projection so edits and deletions are reflected.

use thiserror::Error;

use super::calibration::{Calibration, CalibrationError, CalibrationInputs};
use super::points::PointStore;
use super::table::{self, TableRow};

pub const CSV_HEADER: &str = "PixelX,PixelY,CalibX,CalibY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("no data points to export or plot")]
    NoData,
    #[error("{0}")]
    Calibration(#[from] CalibrationError),
}

/// Build the row set for export/plot from the live store and inputs.
///
/// Degenerate axis geometry is the one hard stop: when all 4 axis points
/// exist and all 4 values parse but the pixel spacing is degenerate, the user
/// plausibly believes calibration is set, so we block and ask for
/// re-selection instead of silently exporting pixel-only rows. Any other
/// unavailability degrades to rows with empty calibrated fields.
pub fn export_rows(
    store: &PointStore,
    inputs: &CalibrationInputs,
) -> Result<Vec<TableRow>, ExportError> {
    if store.data_points().is_empty() {
        return Err(ExportError::NoData);
    }
    let calibration = match inputs.parsed() {
        Some(values) => match Calibration::solve(store.axis_points(), &values) {
            Ok(cal) => Some(cal),
            Err(err @ (CalibrationError::DegenerateXAxis | CalibrationError::DegenerateYAxis)) => {
                return Err(err.into());
            }
            Err(CalibrationError::MissingAxisPoints { .. }) => None,
        },
        None => None,
    };
    Ok(table::project(store, calibration.as_ref()))
}

/// Render rows as CSV: integer pixel fields, calibrated fields empty when
/// absent, else ~6 significant digits.
pub fn csv_string(rows: &[TableRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{}\n",
            row.pixel_x,
            row.pixel_y,
            row.calib_x_string(),
            row.calib_y_string(),
        ));
    }
    out
}

/// Point sequence handed to the plot window.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotSeries {
    /// Every row had calibrated coordinates.
    Calibrated(Vec<[f64; 2]>),
    /// Fallback for the whole set — no per-row mixing.
    Pixel(Vec<[f64; 2]>),
}

impl PlotSeries {
    pub fn points(&self) -> &[[f64; 2]] {
        match self {
            PlotSeries::Calibrated(p) | PlotSeries::Pixel(p) => p,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self, PlotSeries::Calibrated(_))
    }
}

/// Calibrated pairs when available for all rows, otherwise raw pixel pairs
/// for the whole set.
pub fn plot_series(rows: &[TableRow]) -> PlotSeries {
    let calibrated: Option<Vec<[f64; 2]>> =
        rows.iter().map(|r| r.calib.map(|(x, y)| [x, y])).collect();
    match calibrated {
        Some(points) => PlotSeries::Calibrated(points),
        None => PlotSeries::Pixel(
            rows.iter()
                .map(|r| [r.pixel_x as f64, r.pixel_y as f64])
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digitize::controller::{CaptureEffect, ImageSize, PointerEvent, Session};

    /// The full reference scenario: 200×100 image, axis clicks
    /// (10,0) (110,0) (0,80) (0,0), values 0/100/0/100, data click (60,40).
    fn reference_session() -> Session {
        let mut s = Session::new();
        s.set_image(ImageSize {
            width: 200,
            height: 100,
        });
        for (x, y) in [(10.0, 0.0), (110.0, 0.0), (0.0, 80.0), (0.0, 0.0)] {
            s.handle(PointerEvent::Click { x, y });
        }
        s.inputs.x0 = "0".into();
        s.inputs.x1 = "100".into();
        s.inputs.y0 = "0".into();
        s.inputs.y1 = "100".into();
        s
    }

    #[test]
    fn test_end_to_end_export() {
        let mut s = reference_session();
        assert_eq!(
            s.handle(PointerEvent::Click { x: 60.0, y: 40.0 }),
            CaptureEffect::DataPointAdded
        );
        let rows = export_rows(&s.store, &s.inputs).expect("export should succeed");
        let csv = csv_string(&rows);
        assert_eq!(csv, "PixelX,PixelY,CalibX,CalibY\n60,40,50,50\n");
    }

    #[test]
    fn test_export_without_calibration_leaves_fields_empty() {
        let mut s = reference_session();
        s.handle(PointerEvent::Click { x: 60.0, y: 40.0 });
        s.inputs.y1 = "not a number".into();
        let rows = export_rows(&s.store, &s.inputs).unwrap();
        let csv = csv_string(&rows);
        assert_eq!(csv, "PixelX,PixelY,CalibX,CalibY\n60,40,,\n");
    }

    #[test]
    fn test_export_empty_store_is_no_data() {
        let s = reference_session();
        assert_eq!(export_rows(&s.store, &s.inputs), Err(ExportError::NoData));
    }

    #[test]
    fn test_degenerate_geometry_blocks_export() {
        let mut s = Session::new();
        s.set_image(ImageSize {
            width: 200,
            height: 100,
        });
        // X0 and X1 in the same pixel column.
        for (x, y) in [(10.0, 0.0), (10.0, 50.0), (0.0, 80.0), (0.0, 0.0)] {
            s.handle(PointerEvent::Click { x, y });
        }
        s.inputs.x0 = "0".into();
        s.inputs.x1 = "100".into();
        s.inputs.y0 = "0".into();
        s.inputs.y1 = "100".into();
        s.handle(PointerEvent::Click { x: 60.0, y: 40.0 });
        assert_eq!(
            export_rows(&s.store, &s.inputs),
            Err(ExportError::Calibration(CalibrationError::DegenerateXAxis))
        );
    }

    #[test]
    fn test_plot_series_all_or_nothing_fallback() {
        let mut s = reference_session();
        s.handle(PointerEvent::Click { x: 60.0, y: 40.0 });
        s.handle(PointerEvent::Click { x: 110.0, y: 80.0 });

        let rows = export_rows(&s.store, &s.inputs).unwrap();
        let series = plot_series(&rows);
        assert!(series.is_calibrated());
        assert_eq!(series.points()[0], [50.0, 50.0]);
        assert_eq!(series.points()[1], [100.0, 0.0]);

        // Break calibration: whole set falls back to pixel pairs.
        s.inputs.x0.clear();
        let rows = export_rows(&s.store, &s.inputs).unwrap();
        let series = plot_series(&rows);
        assert!(!series.is_calibrated());
        assert_eq!(series.points()[0], [60.0, 40.0]);
    }

    #[test]
    fn test_table_consistency_through_view_changes() {
        use crate::digitize::view::ZoomDirection;

        let mut s = reference_session();
        for i in 0..4 {
            s.handle(PointerEvent::Click {
                x: 20.0 + i as f64 * 10.0,
                y: 30.0,
            });
        }
        s.handle(PointerEvent::Wheel {
            x: 50.0,
            y: 50.0,
            direction: ZoomDirection::In,
        });
        s.handle(PointerEvent::PanStart);
        s.handle(PointerEvent::PanDelta { dx: -30.0, dy: 12.0 });
        s.handle(PointerEvent::PanEnd);
        s.store.remove_data_points(&[1usize].into_iter().collect());

        let rows = export_rows(&s.store, &s.inputs).unwrap();
        assert_eq!(rows.len(), s.store.data_points().len());
        let indices: Vec<_> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }
}
