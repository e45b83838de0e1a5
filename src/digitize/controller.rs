/// Interaction controller — the point-capture state machine.
///
/// Pointer events are dispatched through an explicit `Session::handle`
/// function so the whole capture flow is deterministically testable without
/// a running UI. The GUI layer only translates egui input into
/// `PointerEvent`s and renders the resulting state.

use super::calibration::{Calibration, CalibrationInputs};
use super::points::PointStore;
use super::view::{ViewState, ZoomDirection};

/// Dimensions of the loaded chart image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Round a raw image-space coordinate to the nearest pixel and clamp it
    /// into `[0, width-1] × [0, height-1]`.
    pub fn clamp(&self, (ix, iy): (f64, f64)) -> (i32, i32) {
        let max_x = self.width.saturating_sub(1) as f64;
        let max_y = self.height.saturating_sub(1) as f64;
        (
            ix.round().clamp(0.0, max_x) as i32,
            iy.round().clamp(0.0, max_y) as i32,
        )
    }
}

/// Pointer input, screen-space coordinates relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary click at a screen position.
    Click { x: f64, y: f64 },
    /// One wheel notch anchored at a screen position.
    Wheel {
        x: f64,
        y: f64,
        direction: ZoomDirection,
    },
    /// Pan press (middle button, or Shift+primary).
    PanStart,
    /// Pan motion delta in screen space.
    PanDelta { dx: f64, dy: f64 },
    /// Pan release. Always resets the panning flag, motion or not.
    PanEnd,
}

/// Which kind of point the next qualifying click captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    AwaitingAxisPoints,
    AwaitingDataPoints,
}

/// What an event did, so the caller knows to re-derive the table projection
/// and repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEffect {
    /// Disqualified or no-op event.
    Ignored,
    /// An axis point was stored (first three clicks).
    AxisPointAdded,
    /// The 4th axis point was stored; now awaiting data points.
    AxisPointsComplete,
    /// A data point was appended.
    DataPointAdded,
    /// Zoom or pan mutated the view transform.
    ViewChanged,
}

/// The digitizing session: the four independent state records plus the
/// capture state machine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub view: ViewState,
    pub inputs: CalibrationInputs,
    pub store: PointStore,
    pub image_size: Option<ImageSize>,
    capture: CaptureState,
    panning: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// The calibration currently in effect, if available.
    pub fn calibration(&self) -> Option<Calibration> {
        Calibration::current(&self.store, &self.inputs)
    }

    /// Install a newly loaded image and reset the capture session for it.
    pub fn set_image(&mut self, size: ImageSize) {
        self.image_size = Some(size);
        self.reset();
    }

    /// Clear points, axis values, view transform, and capture state. The
    /// loaded image survives.
    pub fn reset(&mut self) {
        self.store.clear_axis_points();
        self.store.clear_data_points();
        self.inputs.clear();
        self.view = ViewState::default();
        self.capture = CaptureState::AwaitingAxisPoints;
        self.panning = false;
    }

    /// Dispatch one pointer event. Events are processed strictly in arrival
    /// order; every mutation is a bounded synchronous transformation.
    pub fn handle(&mut self, event: PointerEvent) -> CaptureEffect {
        match event {
            PointerEvent::Click { x, y } => self.handle_click(x, y),
            PointerEvent::Wheel { x, y, direction } => {
                if self.image_size.is_none() {
                    return CaptureEffect::Ignored;
                }
                if self.view.zoom((x, y), direction) {
                    CaptureEffect::ViewChanged
                } else {
                    CaptureEffect::Ignored
                }
            }
            PointerEvent::PanStart => {
                self.panning = true;
                CaptureEffect::Ignored
            }
            PointerEvent::PanDelta { dx, dy } => {
                if self.image_size.is_none() {
                    return CaptureEffect::Ignored;
                }
                self.view.pan(dx, dy);
                CaptureEffect::ViewChanged
            }
            PointerEvent::PanEnd => {
                self.panning = false;
                CaptureEffect::Ignored
            }
        }
    }

    fn handle_click(&mut self, x: f64, y: f64) -> CaptureEffect {
        // Disqualified: no image, or mid-pan (click-to-select suppressed
        // for the whole press/release pair).
        let size = match self.image_size {
            Some(s) if !self.panning => s,
            _ => return CaptureEffect::Ignored,
        };
        let (px, py) = size.clamp(self.view.to_image((x, y)));

        match self.capture {
            CaptureState::AwaitingAxisPoints => {
                // The transition below makes AxisPointsFull unreachable here.
                if self.store.add_axis_point(px, py).is_err() {
                    self.capture = CaptureState::AwaitingDataPoints;
                    return CaptureEffect::Ignored;
                }
                if self.store.axis_complete() {
                    self.capture = CaptureState::AwaitingDataPoints;
                    CaptureEffect::AxisPointsComplete
                } else {
                    CaptureEffect::AxisPointAdded
                }
            }
            CaptureState::AwaitingDataPoints => {
                self.store.add_data_point(px, py);
                CaptureEffect::DataPointAdded
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digitize::points::AxisRole;

    fn session_200x100() -> Session {
        let mut s = Session::new();
        s.set_image(ImageSize {
            width: 200,
            height: 100,
        });
        s
    }

    fn click(s: &mut Session, x: f64, y: f64) -> CaptureEffect {
        s.handle(PointerEvent::Click { x, y })
    }

    #[test]
    fn test_click_order_assigns_roles_and_transitions() {
        let mut s = session_200x100();
        assert_eq!(click(&mut s, 10.0, 0.0), CaptureEffect::AxisPointAdded);
        assert_eq!(click(&mut s, 110.0, 0.0), CaptureEffect::AxisPointAdded);
        assert_eq!(click(&mut s, 0.0, 80.0), CaptureEffect::AxisPointAdded);
        assert_eq!(s.capture_state(), CaptureState::AwaitingAxisPoints);
        assert_eq!(click(&mut s, 0.0, 0.0), CaptureEffect::AxisPointsComplete);
        assert_eq!(s.capture_state(), CaptureState::AwaitingDataPoints);

        let roles: Vec<_> = s.store.axis_points().iter().map(|p| p.role).collect();
        assert_eq!(roles, AxisRole::ORDER.to_vec());

        // Fifth click is a data point, not a fault.
        assert_eq!(click(&mut s, 60.0, 40.0), CaptureEffect::DataPointAdded);
        assert_eq!(s.store.data_points().len(), 1);
    }

    #[test]
    fn test_click_without_image_ignored() {
        let mut s = Session::new();
        assert_eq!(click(&mut s, 10.0, 10.0), CaptureEffect::Ignored);
        assert!(s.store.axis_points().is_empty());
        assert_eq!(
            s.handle(PointerEvent::Wheel {
                x: 0.0,
                y: 0.0,
                direction: ZoomDirection::In
            }),
            CaptureEffect::Ignored
        );
    }

    #[test]
    fn test_click_clamped_to_image_bounds() {
        let mut s = session_200x100();
        click(&mut s, -25.0, 400.0);
        let p = s.store.axis_points()[0];
        assert_eq!((p.pixel_x, p.pixel_y), (0, 99), "clamped to nearest pixel");
        click(&mut s, 1e6, -1e6);
        let p = s.store.axis_points()[1];
        assert_eq!((p.pixel_x, p.pixel_y), (199, 0));
    }

    #[test]
    fn test_click_resolves_through_view_transform() {
        let mut s = session_200x100();
        s.handle(PointerEvent::Wheel {
            x: 0.0,
            y: 0.0,
            direction: ZoomDirection::In,
        });
        s.handle(PointerEvent::PanStart);
        s.handle(PointerEvent::PanDelta { dx: 11.0, dy: -4.0 });
        s.handle(PointerEvent::PanEnd);
        let (sx, sy) = s.view.to_screen((60.0, 40.0));
        click(&mut s, sx, sy);
        let p = s.store.axis_points()[0];
        assert_eq!((p.pixel_x, p.pixel_y), (60, 40));
    }

    #[test]
    fn test_pan_suppresses_clicks_until_release() {
        let mut s = session_200x100();
        s.handle(PointerEvent::PanStart);
        assert_eq!(click(&mut s, 10.0, 10.0), CaptureEffect::Ignored);
        // Release without any motion still resets the flag.
        s.handle(PointerEvent::PanEnd);
        assert!(!s.is_panning());
        assert_eq!(click(&mut s, 10.0, 10.0), CaptureEffect::AxisPointAdded);
    }

    #[test]
    fn test_zoom_and_pan_do_not_change_capture_state() {
        let mut s = session_200x100();
        click(&mut s, 0.0, 0.0);
        s.handle(PointerEvent::Wheel {
            x: 5.0,
            y: 5.0,
            direction: ZoomDirection::Out,
        });
        s.handle(PointerEvent::PanDelta { dx: 3.0, dy: 3.0 });
        assert_eq!(s.capture_state(), CaptureState::AwaitingAxisPoints);
        assert_eq!(s.store.axis_points().len(), 1, "points untouched by view ops");
    }

    #[test]
    fn test_reset_clears_everything_but_image() {
        let mut s = session_200x100();
        for _ in 0..4 {
            click(&mut s, 10.0, 10.0);
        }
        click(&mut s, 20.0, 20.0);
        s.inputs.x0 = "1".into();
        s.handle(PointerEvent::PanStart);
        s.reset();
        assert!(s.store.axis_points().is_empty());
        assert!(s.store.data_points().is_empty());
        assert!(s.inputs.x0.is_empty());
        assert!(!s.is_panning());
        assert_eq!(s.capture_state(), CaptureState::AwaitingAxisPoints);
        assert!(s.image_size.is_some(), "reset keeps the loaded image");
        assert_eq!(s.view, ViewState::default());
    }

    #[test]
    fn test_reload_resets_session() {
        let mut s = session_200x100();
        for _ in 0..4 {
            click(&mut s, 10.0, 10.0);
        }
        s.set_image(ImageSize {
            width: 50,
            height: 50,
        });
        assert!(s.store.axis_points().is_empty());
        assert_eq!(s.capture_state(), CaptureState::AwaitingAxisPoints);
        assert_eq!(
            s.image_size,
            Some(ImageSize {
                width: 50,
                height: 50
            })
        );
    }
}
