/// Image canvas — paints the chart texture through the view transform, draws
/// axis/data markers, and translates raw egui input into pointer events for
/// the capture state machine.

use egui::{Align2, FontId, PointerButton, Pos2, Rect, Sense, Stroke, Vec2};

use crate::digitize::controller::{PointerEvent, Session};
use crate::digitize::view::ZoomDirection;
use crate::gui::theme::ThemeColors;

/// Live cursor readout for the status bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorReadout {
    /// Rounded, clamped image pixel under the cursor.
    pub pixel: Option<(i32, i32)>,
    /// Calibrated coordinates under the cursor, when calibration is
    /// available. Fractional image coordinates feed the transform directly.
    pub calib: Option<(f64, f64)>,
}

/// Show the image canvas; feeds every qualifying input event into the
/// session and returns the cursor readout.
pub fn show_image_view(
    ui: &mut egui::Ui,
    session: &mut Session,
    texture: Option<&egui::TextureHandle>,
    colors: &ThemeColors,
) -> CursorReadout {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, colors.canvas_bg);

    // Screen coordinates handed to the session are relative to the canvas
    // origin, so the transform math never sees panel layout.
    let to_canvas = |pos: Pos2| (f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y));

    // ── Translate input into pointer events, in arrival order ──
    let shift_held = ui.input(|i| i.modifiers.shift);

    // Pan: middle-button drag, or Shift + primary drag.
    if response.drag_started_by(PointerButton::Middle)
        || (response.drag_started_by(PointerButton::Primary) && shift_held)
    {
        session.handle(PointerEvent::PanStart);
    }
    if session.is_panning()
        && (response.dragged_by(PointerButton::Middle)
            || response.dragged_by(PointerButton::Primary))
    {
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            session.handle(PointerEvent::PanDelta {
                dx: f64::from(delta.x),
                dy: f64::from(delta.y),
            });
        }
    }
    if response.drag_stopped_by(PointerButton::Middle)
        || response.drag_stopped_by(PointerButton::Primary)
    {
        session.handle(PointerEvent::PanEnd);
    }

    // Zoom: one step per wheel event, anchored at the cursor.
    if let Some(hover) = response.hover_pos() {
        let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 {
            let (x, y) = to_canvas(hover);
            let direction = if scroll_y > 0.0 {
                ZoomDirection::In
            } else {
                ZoomDirection::Out
            };
            session.handle(PointerEvent::Wheel { x, y, direction });
        }
    }

    // Selection: plain primary click (Shift+click is reserved for panning).
    if response.clicked() && !shift_held {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_canvas(pos);
            session.handle(PointerEvent::Click { x, y });
        }
    }

    // ── Paint ──
    if let Some(texture) = texture {
        let tex_size = texture.size_vec2();
        let scale = session.view.scale as f32;
        let image_rect = Rect::from_min_size(
            rect.min
                + Vec2::new(
                    session.view.offset_x as f32,
                    session.view.offset_y as f32,
                ),
            tex_size * scale,
        );
        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        painter.with_clip_rect(rect)
            .image(texture.id(), image_rect, uv, egui::Color32::WHITE);
    } else {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Open an image to begin (File → Open Image…)",
            FontId::proportional(14.0),
            colors.text_muted,
        );
    }

    let marker_painter = painter.with_clip_rect(rect);
    let screen_of = |px: i32, py: i32| {
        let (sx, sy) = session.view.to_screen((f64::from(px), f64::from(py)));
        rect.min + Vec2::new(sx as f32, sy as f32)
    };

    // Axis reference markers with role labels
    for axis in session.store.axis_points() {
        let center = screen_of(axis.pixel_x, axis.pixel_y);
        marker_painter.circle_stroke(center, 4.0, Stroke::new(1.5, colors.axis_marker));
        marker_painter.text(
            center + Vec2::new(6.0, -6.0),
            Align2::LEFT_BOTTOM,
            axis.role.label(),
            FontId::proportional(11.0),
            colors.axis_marker,
        );
    }

    // Data point markers
    for point in session.store.data_points() {
        let center = screen_of(point.pixel_x, point.pixel_y);
        marker_painter.circle_filled(center, 3.0, colors.data_marker);
    }

    // ── Cursor readout ──
    let mut readout = CursorReadout::default();
    if let (Some(hover), Some(size)) = (response.hover_pos(), session.image_size) {
        let (x, y) = to_canvas(hover);
        let image_pt = session.view.to_image((x, y));
        readout.pixel = Some(size.clamp(image_pt));
        readout.calib = session
            .calibration()
            .map(|c| c.pixel_to_data(image_pt.0, image_pt.1));
    }
    readout
}
