// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Paint methods for PatternView

use super::PatternView;
use super::drawing::{
    draw_batch, draw_fabric, draw_grid, draw_image_handles, draw_lines, draw_nodes,
    draw_reference_image, draw_stitch,
};
use crate::theme;
use kurbo::{Affine, Rect};
use peniko::Fill;
use vello::Scene;

impl PatternView {
    /// Paint the whole view into `scene`.
    ///
    /// Back to front: canvas background, fabric, reference image, stitches
    /// (full, part, line, node), grid, gesture preview, image handles.
    pub fn paint(&mut self, scene: &mut Scene) {
        let transform = self.viewport.affine();
        let visible = self.viewport.visible_world_rect();
        let fabric = self.fabric.bounds();

        self.paint_background(scene);
        draw_fabric(scene, transform, fabric, self.fabric_color);

        if let Some(image) = &self.reference_image {
            draw_reference_image(scene, transform, image);
        }

        let mode = self.display_mode;
        draw_batch(scene, transform, visible, &self.layers.full, &mut self.cache, mode);
        draw_batch(scene, transform, visible, &self.layers.part, &mut self.cache, mode);
        draw_lines(scene, transform, &self.layers.line);
        draw_nodes(scene, transform, &self.layers.node, &mut self.cache, &self.beads);

        draw_grid(
            scene,
            transform,
            self.viewport.scale(),
            visible,
            fabric,
            &self.grid,
        );

        self.paint_hint(scene, transform);

        if self.reference_selected
            && let Some(image) = &self.reference_image
        {
            draw_image_handles(scene, transform, image);
        }
    }

    fn paint_background(&self, scene: &mut Scene) {
        let screen = self.viewport.screen_size();
        let rect = Rect::from_origin_size((0.0, 0.0), screen);
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            theme::canvas::BACKGROUND,
            None,
            &rect,
        );
    }

    fn paint_hint(&mut self, scene: &mut Scene, transform: Affine) {
        let Some(stitch) = self.hint else {
            return;
        };
        let Some(color) = self.colors.get(stitch.palindex() as usize) else {
            return;
        };
        let color = color.multiply_alpha(theme::hint::ALPHA);
        draw_stitch(
            scene,
            transform,
            stitch,
            color,
            &mut self.cache,
            self.display_mode,
            &self.beads,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{Recorder, left_down, left_drag, view};
    use crate::editing::ReferenceImage;
    use crate::model::{DisplayMode, StitchKind};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use vello::Scene;

    #[test]
    fn painting_builds_geometry_for_visible_kinds() {
        let mut view = view();
        view.paint(&mut Scene::new());
        // One full stitch in the pattern, drawn in the default mode
        assert_eq!(view.cache().len(), 1);
    }

    #[test]
    fn hint_uses_node_geometry() {
        let mut view = view();
        let mut rec = Recorder::default();
        view.select_tool(StitchKind::Bead);
        left_down(&mut view, &mut rec, 4.0, 4.0);
        left_drag(&mut view, &mut rec, 6.0, 4.0);
        assert!(view.hint().is_some());

        view.paint(&mut Scene::new());
        assert_eq!(view.cache().len(), 2);
    }

    #[test]
    fn offscreen_stitches_build_nothing() {
        let mut view = view();
        view.set_display_mode(DisplayMode::Solid);
        // Scroll the fabric far off to the right
        view.viewport.pan_by(kurbo::Vec2::new(5000.0, 0.0));
        view.paint(&mut Scene::new());
        assert!(view.cache().is_empty());
    }

    #[test]
    fn paints_with_reference_image_selected() {
        let mut view = view();
        let img = RgbaImage::from_pixel(4, 2, Rgba([200, 10, 10, 255]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        view.set_reference_image(Some(ReferenceImage::decode(bytes.get_ref()).unwrap()));
        view.select_reference_image(true);

        let mut scene = Scene::new();
        view.paint(&mut scene);
        assert!(view.reference_image().is_some());
    }
}
