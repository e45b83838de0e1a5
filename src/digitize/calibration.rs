/// Linear axis calibration — maps image-pixel coordinates to chart data
/// coordinates from 4 user-picked axis points and 4 user-entered values.
///
/// Absence of calibration (missing points, unparsable values, degenerate
/// spacing) is a normal state, not a fault: consumers receive `None` and
/// render pixel-only data. The `Result` path exists for explicit
/// export/plot-time validation, where degenerate geometry is a hard stop.

use thiserror::Error;

use super::points::{AxisPoint, AxisRole, PointStore};

/// The four free-text axis value fields, positionally paired with the axis
/// points (X0, X1, Y0, Y1).
#[derive(Debug, Clone, Default)]
pub struct CalibrationInputs {
    pub x0: String,
    pub x1: String,
    pub y0: String,
    pub y1: String,
}

impl CalibrationInputs {
    /// Parse all four fields. `None` unless every field is a finite number —
    /// a parse failure is never an error, just "not calibrated yet".
    pub fn parsed(&self) -> Option<CalibrationValues> {
        let parse = |s: &str| -> Option<f64> {
            let v: f64 = s.trim().parse().ok()?;
            v.is_finite().then_some(v)
        };
        Some(CalibrationValues {
            x0: parse(&self.x0)?,
            x1: parse(&self.x1)?,
            y0: parse(&self.y0)?,
            y1: parse(&self.y1)?,
        })
    }

    pub fn clear(&mut self) {
        self.x0.clear();
        self.x1.clear();
        self.y0.clear();
        self.y1.clear();
    }
}

/// Parsed axis values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationValues {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("need exactly 4 axis points (X0, X1, Y0, Y1), have {have}")]
    MissingAxisPoints { have: usize },
    #[error("X0 and X1 share the same pixel column — reselect the X axis points")]
    DegenerateXAxis,
    #[error("Y0 and Y1 share the same pixel row — reselect the Y axis points")]
    DegenerateYAxis,
}

/// A solved linear calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    x0_val: f64,
    y0_val: f64,
    x0_px: f64,
    y0_py: f64,
    x_scale: f64,
    y_scale: f64,
}

impl Calibration {
    /// Solve the linear mapping from 4 axis points and their values.
    ///
    /// X mapping uses only the X0/X1 pixel columns; Y mapping only the
    /// Y0/Y1 pixel rows.
    pub fn solve(
        axis_points: &[AxisPoint],
        values: &CalibrationValues,
    ) -> Result<Calibration, CalibrationError> {
        if axis_points.len() != 4 {
            return Err(CalibrationError::MissingAxisPoints {
                have: axis_points.len(),
            });
        }
        let px_of = |role: AxisRole| {
            axis_points
                .iter()
                .find(|p| p.role == role)
                .copied()
                // roles are assigned in order by PointStore, so all 4 exist
                .unwrap_or(axis_points[0])
        };
        let x0_px = px_of(AxisRole::X0).pixel_x as f64;
        let x1_px = px_of(AxisRole::X1).pixel_x as f64;
        let y0_py = px_of(AxisRole::Y0).pixel_y as f64;
        let y1_py = px_of(AxisRole::Y1).pixel_y as f64;

        if x1_px == x0_px {
            return Err(CalibrationError::DegenerateXAxis);
        }
        if y0_py == y1_py {
            return Err(CalibrationError::DegenerateYAxis);
        }

        Ok(Calibration {
            x0_val: values.x0,
            y0_val: values.y0,
            x0_px,
            y0_py,
            x_scale: (values.x1 - values.x0) / (x1_px - x0_px),
            // Image y grows downward, data y conventionally grows upward.
            y_scale: (values.y1 - values.y0) / (y0_py - y1_py),
        })
    }

    /// The availability predicate: the calibration currently in effect, or
    /// `None` when any precondition fails.
    pub fn current(store: &PointStore, inputs: &CalibrationInputs) -> Option<Calibration> {
        let values = inputs.parsed()?;
        Calibration::solve(store.axis_points(), &values).ok()
    }

    /// Map an image-pixel coordinate to data coordinates. Fractional inputs
    /// are fine (live cursor readout) as well as integral ones (stored
    /// points).
    pub fn pixel_to_data(&self, pixel_x: f64, pixel_y: f64) -> (f64, f64) {
        (
            self.x0_val + (pixel_x - self.x0_px) * self.x_scale,
            self.y0_val + (self.y0_py - pixel_y) * self.y_scale,
        )
    }
}
