// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport: pan/zoom transform between screen pixels and pattern cells
//!
//! World space is the pattern grid, one unit per cell, origin at the top-left
//! corner of the fabric, y growing downwards. Screen space is canvas pixels.
//! The mapping is `screen = world * scale + offset`.
//!
//! Besides the transform, the viewport owns the raw pointer protocol: it
//! decides whether a press draws, erases or pans, and turns the rest of the
//! press into [`ToolEvent`]s in world coordinates.

use super::mouse::{MouseButton, MouseEvent, WheelEvent};
use crate::settings::{self, CanvasSettings, ModifierBindings, WheelAction};
use crate::tools::{ToolAction, ToolEvent};
use kurbo::{Affine, Point, Rect, Size, Vec2};

// ===== Zoom State =====

/// Requested zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomState {
    /// Explicit scale in pixels per cell
    Scale(f64),
    /// Whole fabric visible
    Fit,
    /// Fabric fills the width
    FitWidth,
    /// Fabric fills the height
    FitHeight,
}

// ===== Events =====

/// What a raw input event turned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// Forward to the active tool
    Tool(ToolEvent),
    /// Drop any preview and any in-progress gesture state
    ClearHint,
    /// Pan or zoom changed; repaint
    Transformed,
}

// ===== Pointer Gesture =====

/// State of the current press
#[derive(Debug, Clone, Copy, PartialEq)]
enum PointerGesture {
    /// No button held
    Idle,
    /// Left button held inside the fabric
    Drawing { start: Point },
    /// Right button with the erase modifier: a single erase, moves are ignored
    Clicked { start: Point },
    /// Right (or middle) button drag
    Panning { last: Point },
    /// Press started outside the fabric, left it, or was cancelled.
    /// Nothing happens until the buttons are released.
    Aborted,
}

// ===== Viewport =====

/// Pan/zoom state for one pattern view
#[derive(Debug, Clone)]
pub struct Viewport {
    screen: Size,
    world: Size,
    scale: f64,
    offset: Vec2,
    min_scale: f64,
    max_scale: f64,
    wheel_action: WheelAction,
    wheel_zoom_step: f64,
    wheel_min_delta: f64,
    bindings: ModifierBindings,
    gesture: PointerGesture,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&CanvasSettings::default())
    }
}

impl Viewport {
    /// Create a viewport with scale 1 and no offset
    pub fn new(settings: &CanvasSettings) -> Self {
        let settings = settings.clone().normalized();
        Self {
            screen: Size::ZERO,
            world: Size::ZERO,
            scale: 1.0_f64.clamp(settings.min_scale, settings.max_scale),
            offset: Vec2::ZERO,
            min_scale: settings.min_scale,
            max_scale: settings.max_scale,
            wheel_action: settings.wheel_action,
            wheel_zoom_step: settings.wheel_zoom_step,
            wheel_min_delta: settings.wheel_min_delta,
            bindings: settings.modifiers,
            gesture: PointerGesture::Idle,
        }
    }

    // ===== Geometry =====

    pub fn resize_screen(&mut self, width: f64, height: f64) {
        self.screen = Size::new(width.max(0.0), height.max(0.0));
    }

    pub fn resize_world(&mut self, width: f64, height: f64) {
        self.world = Size::new(width.max(0.0), height.max(0.0));
    }

    pub fn screen_size(&self) -> Size {
        self.screen
    }

    pub fn world_size(&self) -> Size {
        self.world
    }

    /// Current scale in pixels per cell
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// World-to-screen transform shared by everything drawn on the canvas
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    pub fn screen_to_world(&self, point: Point) -> Point {
        ((point.to_vec2() - self.offset) / self.scale).to_point()
    }

    pub fn world_to_screen(&self, point: Point) -> Point {
        (point.to_vec2() * self.scale + self.offset).to_point()
    }

    /// Whether a world point lies on the fabric
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x < self.world.width && point.y < self.world.height
    }

    /// World-space rectangle currently on screen
    pub fn visible_world_rect(&self) -> Rect {
        Rect::from_points(
            self.screen_to_world(Point::ZERO),
            self.screen_to_world(self.screen.to_vec2().to_point()),
        )
    }

    // ===== Pan and Zoom =====

    /// Pan by a delta in screen pixels
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Apply a zoom request.
    ///
    /// Numeric scales are clamped to the scale limits and keep the screen
    /// center fixed. The fit variants compute the scale at which the fabric
    /// exactly fills the screen on the chosen axes, then center the fabric.
    pub fn set_zoom(&mut self, state: ZoomState) {
        match state {
            ZoomState::Scale(scale) => {
                let center = (self.screen.to_vec2() / 2.0).to_point();
                let factor = self.clamp_scale(scale) / self.scale;
                self.zoom_at(center, factor);
            }
            ZoomState::Fit | ZoomState::FitWidth | ZoomState::FitHeight => {
                if self.world.is_zero_area() || self.screen.is_zero_area() {
                    return;
                }
                let fit_x = self.screen.width / self.world.width;
                let fit_y = self.screen.height / self.world.height;
                let target = match state {
                    ZoomState::FitWidth => fit_x,
                    ZoomState::FitHeight => fit_y,
                    _ => fit_x.min(fit_y),
                };
                self.scale = self.clamp_scale(target);
                self.center_world();
            }
        }
        tracing::debug!("Zoom {:?}: scale = {:.3}", state, self.scale);
    }

    /// Multiply the scale by `factor`, keeping `anchor` (screen pixels) over
    /// the same world point.
    ///
    /// Returns whether the scale changed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
        if !(factor > 0.0) || !factor.is_finite() {
            return false;
        }
        let new_scale = self.clamp_scale(self.scale * factor);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        let before = self.screen_to_world(anchor);
        self.scale = new_scale;
        let after = self.screen_to_world(anchor);
        self.offset += (after - before) * self.scale;
        true
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    fn center_world(&mut self) {
        let world_center = self.world.to_vec2() / 2.0;
        let screen_center = self.screen.to_vec2() / 2.0;
        self.offset = screen_center - world_center * self.scale;
    }

    // ===== Pointer Protocol =====

    /// Start of a press
    pub fn pointer_down(&mut self, event: MouseEvent) -> Option<ViewportEvent> {
        let point = self.screen_to_world(event.pos);
        match event.button {
            Some(MouseButton::Left) => {
                if !self.contains(point) {
                    self.gesture = PointerGesture::Aborted;
                    return Some(ViewportEvent::ClearHint);
                }
                self.gesture = PointerGesture::Drawing { start: point };
                let action = if event.mods.contains(self.bindings.anti_action) {
                    ToolAction::Anti
                } else {
                    ToolAction::Main
                };
                Some(self.tool_event(action, point, point, event))
            }
            Some(MouseButton::Right) if event.mods.contains(self.bindings.pan_as_anti_action) => {
                if !self.contains(point) {
                    self.gesture = PointerGesture::Aborted;
                    return Some(ViewportEvent::ClearHint);
                }
                self.gesture = PointerGesture::Clicked { start: point };
                Some(self.tool_event(ToolAction::Anti, point, point, event))
            }
            Some(MouseButton::Right | MouseButton::Middle) => {
                self.gesture = PointerGesture::Panning { last: event.pos };
                None
            }
            None => None,
        }
    }

    /// Pointer motion, with or without buttons held
    pub fn pointer_move(&mut self, event: MouseEvent) -> Option<ViewportEvent> {
        match self.gesture {
            PointerGesture::Drawing { start } => {
                if !event.buttons.contains(MouseButton::Left) {
                    return None;
                }
                let point = self.screen_to_world(event.pos);
                if !self.contains(point) {
                    tracing::debug!("Pointer left the fabric, abandoning gesture");
                    self.gesture = PointerGesture::Aborted;
                    return Some(ViewportEvent::ClearHint);
                }
                let action = if event.mods.contains(self.bindings.anti_action) {
                    ToolAction::Anti
                } else {
                    ToolAction::Main
                };
                Some(self.tool_event(action, start, point, event))
            }
            PointerGesture::Panning { last } => {
                let delta = event.pos - last;
                self.gesture = PointerGesture::Panning { last: event.pos };
                if delta == Vec2::ZERO {
                    return None;
                }
                self.pan_by(delta);
                Some(ViewportEvent::Transformed)
            }
            PointerGesture::Idle | PointerGesture::Clicked { .. } | PointerGesture::Aborted => None,
        }
    }

    /// End of a press
    pub fn pointer_up(&mut self, event: MouseEvent) -> Option<ViewportEvent> {
        let gesture = std::mem::replace(&mut self.gesture, PointerGesture::Idle);
        match gesture {
            PointerGesture::Drawing { start } | PointerGesture::Clicked { start } => {
                let point = self.screen_to_world(event.pos);
                if !self.contains(point) {
                    return Some(ViewportEvent::ClearHint);
                }
                Some(self.tool_event(ToolAction::Release, start, point, event))
            }
            PointerGesture::Idle | PointerGesture::Panning { .. } | PointerGesture::Aborted => None,
        }
    }

    /// The host cancelled pointer capture
    pub fn pointer_cancel(&mut self) -> Option<ViewportEvent> {
        let gesture = std::mem::replace(&mut self.gesture, PointerGesture::Idle);
        match gesture {
            PointerGesture::Drawing { .. } | PointerGesture::Clicked { .. } => {
                Some(ViewportEvent::ClearHint)
            }
            _ => None,
        }
    }

    /// Whether a press is currently producing tool events
    pub fn is_drawing(&self) -> bool {
        matches!(
            self.gesture,
            PointerGesture::Drawing { .. } | PointerGesture::Clicked { .. }
        )
    }

    /// Wheel or trackpad scroll
    pub fn wheel(&mut self, event: WheelEvent) -> Option<ViewportEvent> {
        let delta = event
            .delta
            .to_pixels(settings::wheel::LINE_HEIGHT, self.screen);
        let action = if event.mods.contains(self.bindings.wheel_toggle) {
            self.wheel_action.toggled()
        } else {
            self.wheel_action
        };

        match action {
            WheelAction::Zoom => {
                if delta.y.abs() < self.wheel_min_delta {
                    return None;
                }
                // Wheel up zooms in
                let factor = if delta.y < 0.0 {
                    self.wheel_zoom_step
                } else {
                    1.0 / self.wheel_zoom_step
                };
                if !self.zoom_at(event.pos, factor) {
                    return None;
                }
                tracing::debug!("Wheel zoom: delta={:.2}, scale={:.3}", delta.y, self.scale);
            }
            WheelAction::Scroll => {
                if delta.hypot() < self.wheel_min_delta {
                    return None;
                }
                self.pan_by(-delta);
            }
        }
        Some(ViewportEvent::Transformed)
    }

    fn tool_event(
        &self,
        action: ToolAction,
        start: Point,
        point: Point,
        event: MouseEvent,
    ) -> ViewportEvent {
        ViewportEvent::Tool(ToolEvent {
            action,
            start,
            point,
            mods: event.mods,
            target: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::mouse::{Modifier, Modifiers, WheelDelta};

    fn viewport() -> Viewport {
        let mut vp = Viewport::default();
        vp.resize_screen(800.0, 600.0);
        vp.resize_world(40.0, 30.0);
        vp
    }

    fn press(pos: Point, button: MouseButton, mods: Modifiers) -> MouseEvent {
        MouseEvent::with_modifiers(pos, Some(button), mods)
    }

    fn drag(pos: Point, button: MouseButton) -> MouseEvent {
        MouseEvent::new(pos).with_buttons(button.into())
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn screen_world_roundtrip() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Scale(12.5));
        vp.pan_by(Vec2::new(33.0, -7.0));
        let world = Point::new(3.7, 2.1);
        assert!(close(vp.screen_to_world(vp.world_to_screen(world)), world));
        assert!(close(vp.affine() * world, vp.world_to_screen(world)));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Scale(1000.0));
        assert_eq!(vp.scale(), settings::viewport::MAX_SCALE);
        vp.set_zoom(ZoomState::Scale(0.0));
        assert_eq!(vp.scale(), settings::viewport::MIN_SCALE);
        vp.set_zoom(ZoomState::Scale(f64::NAN));
        assert_eq!(vp.scale(), settings::viewport::MIN_SCALE);
    }

    #[test]
    fn bad_scale_limits_are_normalized() {
        let inverted = CanvasSettings {
            min_scale: 50.0,
            max_scale: 2.0,
            ..CanvasSettings::default()
        };
        let mut vp = Viewport::new(&inverted);
        assert_eq!(vp.scale(), 2.0);
        vp.set_zoom(ZoomState::Scale(1000.0));
        assert_eq!(vp.scale(), 50.0);

        let nan = CanvasSettings {
            min_scale: f64::NAN,
            max_scale: f64::NAN,
            ..CanvasSettings::default()
        };
        let mut vp = Viewport::new(&nan);
        vp.set_zoom(ZoomState::Scale(0.0));
        assert_eq!(vp.scale(), settings::viewport::MIN_SCALE);
    }

    #[test]
    fn fit_fills_the_limiting_axis_and_centers() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        // 800/40 = 20, 600/30 = 20
        assert_eq!(vp.scale(), 20.0);
        assert!(close(vp.world_to_screen(Point::new(20.0, 15.0)), Point::new(400.0, 300.0)));

        vp.resize_world(80.0, 30.0);
        vp.set_zoom(ZoomState::Fit);
        assert_eq!(vp.scale(), 10.0);
        vp.set_zoom(ZoomState::FitHeight);
        assert_eq!(vp.scale(), 20.0);
        vp.set_zoom(ZoomState::FitWidth);
        assert_eq!(vp.scale(), 10.0);
        assert!(close(vp.world_to_screen(Point::new(40.0, 15.0)), Point::new(400.0, 300.0)));
    }

    #[test]
    fn zoom_at_keeps_anchor_fixed() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        let anchor = Point::new(123.0, 456.0);
        let before = vp.screen_to_world(anchor);
        assert!(vp.zoom_at(anchor, 1.5));
        assert!(close(vp.screen_to_world(anchor), before));
    }

    #[test]
    fn left_press_inside_emits_main_action() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Scale(10.0));
        vp.offset = Vec2::ZERO;
        let event = vp.pointer_down(press(Point::new(37.0, 21.0), MouseButton::Left, Modifiers::NONE));
        let Some(ViewportEvent::Tool(tool)) = event else {
            panic!("expected a tool event, got {event:?}");
        };
        assert_eq!(tool.action, ToolAction::Main);
        assert!(close(tool.point, Point::new(3.7, 2.1)));
        assert!(vp.is_drawing());
    }

    #[test]
    fn anti_modifier_turns_left_press_into_anti_action() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        let mods = Modifiers::only(Modifier::Primary);
        let event = vp.pointer_down(press(Point::new(400.0, 300.0), MouseButton::Left, mods));
        assert!(matches!(
            event,
            Some(ViewportEvent::Tool(ToolEvent { action: ToolAction::Anti, .. }))
        ));
    }

    #[test]
    fn press_outside_fabric_only_clears_hint() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Scale(10.0));
        vp.offset = Vec2::new(100.0, 100.0);
        // Letterbox margin left of the fabric
        let down = vp.pointer_down(press(Point::new(50.0, 150.0), MouseButton::Left, Modifiers::NONE));
        assert_eq!(down, Some(ViewportEvent::ClearHint));
        // Dragging back over the fabric does not start drawing
        let moved = vp.pointer_move(drag(Point::new(150.0, 150.0), MouseButton::Left));
        assert_eq!(moved, None);
        let up = vp.pointer_up(MouseEvent::new(Point::new(150.0, 150.0)));
        assert_eq!(up, None);
    }

    #[test]
    fn leaving_fabric_abandons_gesture() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Scale(10.0));
        vp.offset = Vec2::ZERO;
        vp.pointer_down(press(Point::new(15.0, 15.0), MouseButton::Left, Modifiers::NONE));
        let moved = vp.pointer_move(drag(Point::new(25.0, 15.0), MouseButton::Left));
        assert!(matches!(moved, Some(ViewportEvent::Tool(_))));
        let outside = vp.pointer_move(drag(Point::new(-5.0, 15.0), MouseButton::Left));
        assert_eq!(outside, Some(ViewportEvent::ClearHint));
        assert!(!vp.is_drawing());
        assert_eq!(vp.pointer_up(MouseEvent::new(Point::new(15.0, 15.0))), None);
    }

    #[test]
    fn move_repeats_action_and_up_releases_with_start() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Scale(10.0));
        vp.offset = Vec2::ZERO;
        vp.pointer_down(press(Point::new(50.0, 50.0), MouseButton::Left, Modifiers::NONE));
        let moved = vp.pointer_move(drag(Point::new(20.0, 20.0), MouseButton::Left));
        let Some(ViewportEvent::Tool(tool)) = moved else {
            panic!("expected a tool event");
        };
        assert_eq!(tool.action, ToolAction::Main);
        assert!(close(tool.start, Point::new(5.0, 5.0)));
        assert!(close(tool.point, Point::new(2.0, 2.0)));

        let up = vp.pointer_up(MouseEvent::new(Point::new(20.0, 20.0)));
        let Some(ViewportEvent::Tool(release)) = up else {
            panic!("expected a release");
        };
        assert_eq!(release.action, ToolAction::Release);
        assert!(close(release.start, Point::new(5.0, 5.0)));
        assert!(!vp.is_drawing());
    }

    #[test]
    fn right_drag_pans() {
        let mut vp = viewport();
        let before = vp.offset();
        assert_eq!(
            vp.pointer_down(press(Point::new(10.0, 10.0), MouseButton::Right, Modifiers::NONE)),
            None
        );
        let moved = vp.pointer_move(drag(Point::new(30.0, 5.0), MouseButton::Right));
        assert_eq!(moved, Some(ViewportEvent::Transformed));
        assert_eq!(vp.offset(), before + Vec2::new(20.0, -5.0));
        assert_eq!(vp.pointer_up(MouseEvent::new(Point::new(30.0, 5.0))), None);
    }

    #[test]
    fn modified_right_press_is_an_anti_click_not_a_drag() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        let before = vp.offset();
        let mods = Modifiers::only(Modifier::Primary);
        let down = vp.pointer_down(press(Point::new(400.0, 300.0), MouseButton::Right, mods));
        assert!(matches!(
            down,
            Some(ViewportEvent::Tool(ToolEvent { action: ToolAction::Anti, .. }))
        ));
        assert_eq!(vp.pointer_move(drag(Point::new(420.0, 310.0), MouseButton::Right)), None);
        assert_eq!(vp.offset(), before);
    }

    #[test]
    fn cancel_mid_gesture_clears_hint() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        vp.pointer_down(press(Point::new(400.0, 300.0), MouseButton::Left, Modifiers::NONE));
        assert_eq!(vp.pointer_cancel(), Some(ViewportEvent::ClearHint));
        assert_eq!(vp.pointer_cancel(), None);
    }

    #[test]
    fn wheel_zooms_around_cursor() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        let cursor = Point::new(200.0, 150.0);
        let before = vp.screen_to_world(cursor);
        let scale = vp.scale();
        let event = WheelEvent {
            pos: cursor,
            delta: WheelDelta::Pixel(Vec2::new(0.0, -40.0)),
            mods: Modifiers::NONE,
        };
        assert_eq!(vp.wheel(event), Some(ViewportEvent::Transformed));
        assert!(vp.scale() > scale);
        assert!(close(vp.screen_to_world(cursor), before));
    }

    #[test]
    fn wheel_ignores_jitter() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        let scale = vp.scale();
        let event = WheelEvent {
            pos: Point::new(10.0, 10.0),
            delta: WheelDelta::Pixel(Vec2::new(0.0, 0.2)),
            mods: Modifiers::NONE,
        };
        assert_eq!(vp.wheel(event), None);
        assert_eq!(vp.scale(), scale);
    }

    #[test]
    fn wheel_toggle_modifier_scrolls_instead() {
        let mut vp = viewport();
        vp.set_zoom(ZoomState::Fit);
        let scale = vp.scale();
        let offset = vp.offset();
        let event = WheelEvent {
            pos: Point::new(10.0, 10.0),
            delta: WheelDelta::Line(Vec2::new(0.0, 2.0)),
            mods: Modifiers::only(Modifier::Primary),
        };
        assert_eq!(vp.wheel(event), Some(ViewportEvent::Transformed));
        assert_eq!(vp.scale(), scale);
        assert_eq!(vp.offset(), offset - Vec2::new(0.0, 32.0));
    }
}
