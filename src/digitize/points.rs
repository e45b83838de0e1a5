/// Point store — the authoritative ordered collections of axis and data
/// points, both held in image-pixel space.
///
/// Calibrated coordinates are never stored; they are derived on demand so a
/// calibration change retroactively re-labels every existing point.

use std::collections::BTreeSet;

use thiserror::Error;

/// Role of an axis reference point, assigned by click order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRole {
    X0,
    X1,
    Y0,
    Y1,
}

impl AxisRole {
    pub const ORDER: [AxisRole; 4] = [AxisRole::X0, AxisRole::X1, AxisRole::Y0, AxisRole::Y1];

    /// Role for the nth axis click (0-based). `None` past the fourth.
    pub fn from_index(i: usize) -> Option<AxisRole> {
        Self::ORDER.get(i).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            AxisRole::X0 => "X0",
            AxisRole::X1 => "X1",
            AxisRole::Y0 => "Y0",
            AxisRole::Y1 => "Y1",
        }
    }
}

impl std::fmt::Display for AxisRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the 4 pixel locations defining the calibration reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPoint {
    pub pixel_x: i32,
    pub pixel_y: i32,
    pub role: AxisRole,
}

/// A user-selected sample of the digitized series, image-pixel space only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    pub pixel_x: i32,
    pub pixel_y: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PointStoreError {
    #[error("all 4 axis points are already set")]
    AxisPointsFull,
}

/// Ordered axis and data point collections.
///
/// No pixel-bounds validation happens here: clamping raw pointer input is the
/// controller's job, and the store must also accept points handed back
/// wholesale via `replace_all`.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    axis: Vec<AxisPoint>,
    data: Vec<DataPoint>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next axis point; its role follows click order
    /// (X0, X1, Y0, Y1). Fails once all 4 exist.
    pub fn add_axis_point(&mut self, pixel_x: i32, pixel_y: i32) -> Result<AxisRole, PointStoreError> {
        let role = AxisRole::from_index(self.axis.len()).ok_or(PointStoreError::AxisPointsFull)?;
        self.axis.push(AxisPoint {
            pixel_x,
            pixel_y,
            role,
        });
        Ok(role)
    }

    /// Append a data point. Duplicates are permitted — re-sampling the same
    /// pixel is a legitimate user action.
    pub fn add_data_point(&mut self, pixel_x: i32, pixel_y: i32) {
        self.data.push(DataPoint { pixel_x, pixel_y });
    }

    /// Remove data points by 0-based index. Out-of-range indices are ignored.
    pub fn remove_data_points(&mut self, indices: &BTreeSet<usize>) {
        if indices.is_empty() {
            return;
        }
        let mut i = 0usize;
        self.data.retain(|_| {
            let keep = !indices.contains(&i);
            i += 1;
            keep
        });
    }

    /// Replace the entire data point list (wholesale reconstruction).
    pub fn replace_all(&mut self, points: Vec<DataPoint>) {
        self.data = points;
    }

    pub fn clear_axis_points(&mut self) {
        self.axis.clear();
    }

    pub fn clear_data_points(&mut self) {
        self.data.clear();
    }

    pub fn axis_points(&self) -> &[AxisPoint] {
        &self.axis
    }

    pub fn data_points(&self) -> &[DataPoint] {
        &self.data
    }

    /// True once all 4 axis reference points have been picked.
    pub fn axis_complete(&self) -> bool {
        self.axis.len() == 4
    }
}
