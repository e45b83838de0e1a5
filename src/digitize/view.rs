/// View transform — affine mapping between image-pixel space and screen space
///
/// `screen = image * scale + offset`, componentwise. Zoom is pointer-centric:
/// the image point under the cursor stays put while the scale changes.

/// Zoom step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Multiplicative step per wheel notch. Out is the exact inverse of In,
/// so a zoom-in followed by a zoom-out restores the previous scale.
pub const ZOOM_STEP: f64 = 1.1;

/// Zoom/pan state of the image canvas.
///
/// Invariant: `scale > 0` and finite. `zoom` refuses any step that would
/// break it; `pan` cannot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewState {
    /// Map an image-pixel coordinate to screen space.
    pub fn to_screen(&self, (ix, iy): (f64, f64)) -> (f64, f64) {
        (
            ix * self.scale + self.offset_x,
            iy * self.scale + self.offset_y,
        )
    }

    /// Map a screen coordinate to image-pixel space. Exact inverse of
    /// `to_screen`.
    pub fn to_image(&self, (sx, sy): (f64, f64)) -> (f64, f64) {
        (
            (sx - self.offset_x) / self.scale,
            (sy - self.offset_y) / self.scale,
        )
    }

    /// One zoom step anchored at a screen coordinate. The image point under
    /// the anchor is identical before and after the step.
    ///
    /// Returns `false` (state unchanged) if the resulting scale would be
    /// zero, negative, or non-finite.
    pub fn zoom(&mut self, anchor: (f64, f64), direction: ZoomDirection) -> bool {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };
        let new_scale = self.scale * factor;
        if !(new_scale > 0.0) || !new_scale.is_finite() {
            return false;
        }
        let (ix, iy) = self.to_image(anchor);
        self.scale = new_scale;
        self.offset_x = anchor.0 - ix * self.scale;
        self.offset_y = anchor.1 - iy * self.scale;
        true
    }

    /// Translate the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: (f64, f64), b: (f64, f64), tol: f64) {
        assert!(
            (a.0 - b.0).abs() < tol && (a.1 - b.1).abs() < tol,
            "expected {:?} ≈ {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_to_image_inverts_to_screen() {
        let view = ViewState {
            scale: 2.5,
            offset_x: -40.0,
            offset_y: 17.0,
        };
        let pt = (123.4, 56.7);
        assert_close(view.to_image(view.to_screen(pt)), pt, 1e-12);
        assert_close(view.to_screen(view.to_image(pt)), pt, 1e-12);
    }

    #[test]
    fn test_zoom_is_pointer_centric() {
        // The image point under the anchor must be invariant across a zoom
        // step, for a spread of scales, offsets, and anchors.
        let cases = [
            (1.0, 0.0, 0.0, (100.0, 50.0)),
            (0.37, 250.0, -80.0, (0.0, 0.0)),
            (12.0, -3.5, 9.25, (640.0, 480.0)),
            (0.001, 1.0, 1.0, (33.0, 77.0)),
        ];
        for &(scale, ox, oy, anchor) in &cases {
            for dir in [ZoomDirection::In, ZoomDirection::Out] {
                let mut view = ViewState {
                    scale,
                    offset_x: ox,
                    offset_y: oy,
                };
                let before = view.to_image(anchor);
                assert!(view.zoom(anchor, dir), "zoom step should succeed");
                let after = view.to_image(anchor);
                assert_close(before, after, 1e-9);
            }
        }
    }

    #[test]
    fn test_zoom_in_then_out_restores_scale() {
        let mut view = ViewState::default();
        view.zoom((10.0, 10.0), ZoomDirection::In);
        view.zoom((10.0, 10.0), ZoomDirection::Out);
        assert!((view.scale - 1.0).abs() < 1e-12, "steps should be inverses");
    }

    #[test]
    fn test_zoom_rejects_degenerate_scale() {
        // Underflow to zero must leave the state untouched.
        let mut view = ViewState {
            scale: f64::MIN_POSITIVE,
            offset_x: 5.0,
            offset_y: 5.0,
        };
        let before = view;
        assert!(!view.zoom((0.0, 0.0), ZoomDirection::Out));
        assert_eq!(view, before, "rejected zoom must not mutate state");
    }

    #[test]
    fn test_pan_accumulates() {
        let mut view = ViewState::default();
        view.pan(10.0, -4.0);
        view.pan(2.5, 4.0);
        assert_eq!(view.offset_x, 12.5);
        assert_eq!(view.offset_y, 0.0);
        assert_eq!(view.scale, 1.0, "pan must not touch scale");
    }
}
