// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer and wheel handlers for PatternView
//!
//! Every handler returns whether the view needs repainting.

use super::{ImageDrag, PatternCommands, PatternView};
use crate::editing::{CursorStyle, MouseButton, MouseEvent, ViewportEvent, WheelEvent};
use crate::settings;
use crate::theme;
use crate::tools::{ToolAction, ToolContext, ToolIntent};
use kurbo::Point;

impl PatternView {
    // ============================================================================
    // POINTER EVENT HANDLERS
    // ============================================================================

    pub fn pointer_down(&mut self, event: MouseEvent, commands: &mut impl PatternCommands) -> bool {
        if event.button == Some(MouseButton::Left) {
            let world = self.viewport.screen_to_world(event.pos);
            if self.handle_image_pointer_down(world) {
                return true;
            }
            // Click missed the image, deselect it
            if self.reference_selected {
                self.reference_selected = false;
                tracing::debug!("Reference image deselected");
            }
        }
        let result = self.viewport.pointer_down(event);
        self.dispatch(result, commands)
    }

    pub fn pointer_move(&mut self, event: MouseEvent, commands: &mut impl PatternCommands) -> bool {
        if let Some(drag) = self.image_drag {
            let world = self.viewport.screen_to_world(event.pos);
            self.handle_image_drag(drag, world);
            return true;
        }
        let result = self.viewport.pointer_move(event);
        self.dispatch(result, commands)
    }

    pub fn pointer_up(&mut self, event: MouseEvent, commands: &mut impl PatternCommands) -> bool {
        if self.image_drag.take().is_some() {
            return true;
        }
        let result = self.viewport.pointer_up(event);
        self.dispatch(result, commands)
    }

    /// The host took the pointer away mid-press
    pub fn pointer_cancel(&mut self) -> bool {
        let dragging = self.image_drag.take().is_some();
        // A cancel never yields tool events, only the clear signal
        let cleared = self.viewport.pointer_cancel().is_some();
        if cleared {
            self.clear_gesture();
        }
        cleared || dragging
    }

    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        self.viewport.wheel(event).is_some()
    }

    /// Cursor to show with the pointer at `pos` (screen pixels)
    pub fn cursor_at(&self, pos: Point) -> CursorStyle {
        let world = self.viewport.screen_to_world(pos);
        if let Some(image) = &self.reference_image {
            match self.image_drag {
                Some(ImageDrag::Resize(handle)) => return image.cursor_for_handle(handle),
                Some(ImageDrag::Move { .. }) => return CursorStyle::Grabbing,
                None => {}
            }
            if self.reference_selected && !image.locked {
                if let Some(handle) = image.hit_test_handle(world, self.handle_hit_radius()) {
                    return image.cursor_for_handle(handle);
                }
                if image.contains(world) {
                    return CursorStyle::Move;
                }
            }
        }
        if self.viewport.contains(world) {
            CursorStyle::Crosshair
        } else {
            CursorStyle::Default
        }
    }

    // ============================================================================
    // TOOL DISPATCH
    // ============================================================================

    fn dispatch(
        &mut self,
        result: Option<ViewportEvent>,
        commands: &mut impl PatternCommands,
    ) -> bool {
        match result {
            None => false,
            Some(ViewportEvent::Transformed) => true,
            Some(ViewportEvent::ClearHint) => {
                self.clear_gesture();
                true
            }
            Some(ViewportEvent::Tool(mut event)) => {
                if event.action == ToolAction::Anti {
                    let tolerance = settings::hit::TOLERANCE_PX / self.viewport.scale();
                    event.target = self.layers.hit_test(event.point, tolerance);
                }

                let intents = match event.action {
                    // An erase press ends without the tool's commit step
                    ToolAction::Release if self.press == Some(ToolAction::Anti) => {
                        self.gesture.reset();
                        vec![ToolIntent::ClearHint]
                    }
                    action => {
                        if self.press.is_none() {
                            self.press = Some(action);
                        }
                        let ctx = ToolContext::new(self.palindex, &self.settings);
                        self.tool.handle(&event, &ctx, &mut self.gesture)
                    }
                };
                if event.action == ToolAction::Release {
                    self.press = None;
                }

                tracing::debug!("{:?} at {:?} -> {} intents", event.action, event.point, intents.len());
                self.apply_intents(intents, commands);
                true
            }
        }
    }

    // ============================================================================
    // REFERENCE IMAGE INTERACTION
    // ============================================================================

    /// Handle hit radius in world units at the current zoom
    fn handle_hit_radius(&self) -> f64 {
        theme::reference_image::HANDLE_HIT_RADIUS / self.viewport.scale()
    }

    /// Start a resize or move if the press hits the selected image.
    /// Resize handles are tested first (they sit on top of the image).
    fn handle_image_pointer_down(&mut self, world: Point) -> bool {
        if !self.reference_selected {
            return false;
        }
        let radius = self.handle_hit_radius();
        let Some(image) = &self.reference_image else {
            return false;
        };
        if image.locked {
            return false;
        }

        if let Some(handle) = image.hit_test_handle(world, radius) {
            tracing::debug!("Resizing reference image via {:?}", handle);
            self.image_drag = Some(ImageDrag::Resize(handle));
            return true;
        }
        if image.contains(world) {
            self.image_drag = Some(ImageDrag::Move { last: world });
            return true;
        }
        false
    }

    fn handle_image_drag(&mut self, drag: ImageDrag, world: Point) {
        let Some(image) = &mut self.reference_image else {
            self.image_drag = None;
            return;
        };
        match drag {
            ImageDrag::Move { last } => {
                image.move_by(world - last);
                self.image_drag = Some(ImageDrag::Move { last: world });
            }
            ImageDrag::Resize(handle) => image.resize_with_handle(handle, world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{Recorder, at, left_down, left_drag, left_up, view};
    use crate::editing::{
        CursorStyle, Modifier, Modifiers, MouseButton, MouseEvent, ReferenceImage, WheelDelta,
        WheelEvent,
    };
    use image::{ImageFormat, Rgba, RgbaImage};
    use kurbo::{Point, Vec2};
    use std::io::Cursor;

    fn image(width: u32, height: u32) -> ReferenceImage {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        ReferenceImage::decode(bytes.get_ref()).unwrap()
    }

    #[test]
    fn middle_drag_pans_without_tool_events() {
        let mut view = view();
        let mut rec = Recorder::default();
        let down = MouseEvent::with_modifiers(at(5.0, 5.0), Some(MouseButton::Middle), Modifiers::NONE);
        view.pointer_down(down, &mut rec);
        let drag = MouseEvent::new(at(6.0, 5.0)).with_buttons(MouseButton::Middle.into());
        assert!(view.pointer_move(drag, &mut rec));
        assert_eq!(view.viewport().offset(), Vec2::new(10.0, 0.0));
        view.pointer_up(drag, &mut rec);
        assert!(rec.added.is_empty());
    }

    #[test]
    fn wheel_zoom_requests_repaint() {
        let mut view = view();
        let event = WheelEvent {
            pos: Point::new(100.0, 100.0),
            delta: WheelDelta::Pixel(Vec2::new(0.0, -50.0)),
            mods: Modifiers::NONE,
        };
        assert!(view.wheel(event));
        assert!(view.viewport().scale() > 10.0);
    }

    #[test]
    fn selected_image_is_dragged_instead_of_stitching() {
        let mut view = view();
        let mut rec = Recorder::default();
        view.set_reference_image(Some(image(20, 10)));
        assert!(view.select_reference_image(true));
        let before = view.reference_image().unwrap().position;

        left_down(&mut view, &mut rec, 5.0, 5.0);
        left_drag(&mut view, &mut rec, 7.0, 6.0);
        left_up(&mut view, &mut rec, 7.0, 6.0);

        let after = view.reference_image().unwrap().position;
        assert!(((after - before) - Vec2::new(2.0, 1.0)).hypot() < 1e-9);
        assert!(rec.added.is_empty());
    }

    #[test]
    fn unselected_image_does_not_capture_clicks() {
        let mut view = view();
        let mut rec = Recorder::default();
        view.set_reference_image(Some(image(20, 10)));
        left_down(&mut view, &mut rec, 5.5, 5.5);
        left_up(&mut view, &mut rec, 5.5, 5.5);
        assert_eq!(rec.added.len(), 1);
    }

    #[test]
    fn handle_drag_resizes_image() {
        let mut view = view();
        let mut rec = Recorder::default();
        // 20x10 px image fits the 20x10 fabric exactly
        view.set_reference_image(Some(image(20, 10)));
        view.select_reference_image(true);

        left_down(&mut view, &mut rec, 20.0, 10.0);
        assert_eq!(view.cursor_at(at(20.0, 10.0)), CursorStyle::NwseResize);
        left_drag(&mut view, &mut rec, 10.0, 5.0);
        left_up(&mut view, &mut rec, 10.0, 5.0);

        let image = view.reference_image().unwrap();
        assert!((image.size().width - 10.0).abs() < 1e-9);
        assert!((image.size().height - 5.0).abs() < 1e-9);
        assert!(image.position.distance(Point::ZERO) < 1e-9);
    }

    #[test]
    fn locked_image_lets_stitching_through() {
        let mut view = view();
        let mut rec = Recorder::default();
        view.set_reference_image(Some(image(20, 10)));
        view.select_reference_image(true);
        if let Some(image) = view.reference_image_mut() {
            image.locked = true;
        }
        left_down(&mut view, &mut rec, 5.5, 5.5);
        left_up(&mut view, &mut rec, 5.5, 5.5);
        assert_eq!(rec.added.len(), 1);
        assert!(!view.is_reference_image_selected());
    }

    #[test]
    fn cursor_over_fabric_is_crosshair() {
        let view = view();
        assert_eq!(view.cursor_at(at(3.0, 3.0)), CursorStyle::Crosshair);
        assert_eq!(view.cursor_at(at(30.0, 3.0)), CursorStyle::Default);
    }

    #[test]
    fn right_button_with_modifier_erases() {
        let mut view = view();
        let mut rec = Recorder::default();
        view.select_palette_item(1).unwrap();
        let mods = Modifiers::only(Modifier::Primary);
        let down = MouseEvent::with_modifiers(at(1.2, 1.7), Some(MouseButton::Right), mods);
        view.pointer_down(down, &mut rec);
        view.pointer_up(down, &mut rec);
        assert_eq!(rec.removed.len(), 1);
        assert!(view.layers().is_empty());
    }
}
