// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Standalone drawing helpers for the fabric, grid, stitches and reference image
//!
//! Everything is positioned in world space (one unit per cell) and mapped to
//! the screen by the viewport transform. Grid lines and image handles are
//! stroked after transforming so their widths stay in screen pixels.

use super::GridStyle;
use crate::editing::{ReferenceImage, ResizeHandle};
use crate::model::{BeadDims, DisplayMode, LineStitch, NodeStitch, Stitch};
use crate::render::{BatchedContainer, GeometryCache, ObjectContainer, StitchInstance};
use crate::theme;
use kurbo::{Affine, BezPath, Cap, Line, Point, Rect, Shape, Stroke};
use peniko::{Color, Fill, ImageBrush, ImageSampler};
use std::f64::consts::FRAC_PI_2;
use vello::Scene;

// ===== Fabric and Grid =====

pub(crate) fn draw_fabric(scene: &mut Scene, transform: Affine, bounds: Rect, color: Color) {
    scene.fill(Fill::NonZero, transform, color, None, &bounds);
    let outline = transform.transform_rect_bbox(bounds);
    scene.stroke(
        &Stroke::new(1.0),
        Affine::IDENTITY,
        theme::canvas::FABRIC_OUTLINE,
        None,
        &outline,
    );
}

/// Draw the cell grid over the visible part of the fabric.
///
/// Minor lines fall on every cell boundary, major lines on every
/// `major_interval`-th one counted from the fabric origin. Minor lines are
/// skipped when cells are too small on screen for them to read.
pub(crate) fn draw_grid(
    scene: &mut Scene,
    transform: Affine,
    scale: f64,
    visible: Rect,
    fabric: Rect,
    grid: &GridStyle,
) {
    let area = visible.intersect(fabric);
    if area.width() <= 0.0 || area.height() <= 0.0 {
        return;
    }
    let draw_minor = scale >= theme::grid::MINOR_MIN_SCALE;
    let interval = u64::from(grid.major_interval);

    let mut minor = BezPath::new();
    let mut major = BezPath::new();

    let start_x = area.x0.ceil() as u64;
    let end_x = area.x1.floor() as u64;
    for ix in start_x..=end_x {
        let x = ix as f64;
        let line = Line::new(transform * Point::new(x, area.y0), transform * Point::new(x, area.y1));
        push_grid_line(&mut minor, &mut major, line, ix, interval, draw_minor);
    }

    let start_y = area.y0.ceil() as u64;
    let end_y = area.y1.floor() as u64;
    for iy in start_y..=end_y {
        let y = iy as f64;
        let line = Line::new(transform * Point::new(area.x0, y), transform * Point::new(area.x1, y));
        push_grid_line(&mut minor, &mut major, line, iy, interval, draw_minor);
    }

    if !minor.is_empty() {
        scene.stroke(
            &Stroke::new(grid.minor_thickness),
            Affine::IDENTITY,
            grid.minor_color,
            None,
            &minor,
        );
    }
    if !major.is_empty() {
        scene.stroke(
            &Stroke::new(grid.major_thickness),
            Affine::IDENTITY,
            grid.major_color,
            None,
            &major,
        );
    }
}

fn push_grid_line(
    minor: &mut BezPath,
    major: &mut BezPath,
    line: Line,
    index: u64,
    interval: u64,
    draw_minor: bool,
) {
    let is_major = interval > 0 && index % interval == 0;
    let path = if is_major {
        major
    } else if draw_minor {
        minor
    } else {
        return;
    };
    path.move_to(line.p0);
    path.line_to(line.p1);
}

// ===== Stitches =====

/// Draw every instance of a batch that overlaps `visible`
pub(crate) fn draw_batch(
    scene: &mut Scene,
    transform: Affine,
    visible: Rect,
    batch: &BatchedContainer,
    cache: &mut GeometryCache,
    mode: DisplayMode,
) {
    let visible = visible.inflate(1.0, 1.0);
    for instance in batch.instances() {
        if !visible.contains(instance.position) {
            continue;
        }
        draw_instance(scene, transform, instance, instance.tint, cache, mode);
    }
}

fn draw_instance(
    scene: &mut Scene,
    transform: Affine,
    instance: &StitchInstance,
    color: Color,
    cache: &mut GeometryCache,
    mode: DisplayMode,
) {
    let (kind, direction) = instance.geometry_key();
    let geometry = cache.get_stitch(kind, mode);
    let local = transform * Affine::translate(instance.position.to_vec2());
    geometry.for_direction(direction).draw(scene, local, color);
}

/// Draw the line stitches of a container
pub(crate) fn draw_lines(scene: &mut Scene, transform: Affine, lines: &ObjectContainer) {
    for object in lines.objects() {
        if let Stitch::Line(line) = object.stitch {
            draw_line(scene, transform, &line, object.color);
        }
    }
}

fn draw_line(scene: &mut Scene, transform: Affine, line: &LineStitch, color: Color) {
    let stroke = Stroke::new(theme::stitch::LINE_WIDTH).with_caps(Cap::Round);
    scene.stroke(
        &stroke,
        transform,
        color,
        None,
        &Line::new(line.start(), line.end()),
    );
}

/// Draw the node stitches of a container; `beads` is indexed by `palindex`
pub(crate) fn draw_nodes(
    scene: &mut Scene,
    transform: Affine,
    nodes: &ObjectContainer,
    cache: &mut GeometryCache,
    beads: &[BeadDims],
) {
    for object in nodes.objects() {
        if let Stitch::Node(node) = object.stitch {
            draw_node(scene, transform, &node, object.color, cache, beads);
        }
    }
}

fn draw_node(
    scene: &mut Scene,
    transform: Affine,
    node: &NodeStitch,
    color: Color,
    cache: &mut GeometryCache,
    beads: &[BeadDims],
) {
    let dims = beads.get(node.palindex as usize).copied().unwrap_or_default();
    let geometry = cache.get_node(node.kind, dims);
    let mut local = transform * Affine::translate((node.x, node.y));
    if node.rotated {
        local = local * Affine::rotate(FRAC_PI_2);
    }
    geometry.draw(scene, local, color);
}

/// Draw any single stitch, used for the gesture preview
pub(crate) fn draw_stitch(
    scene: &mut Scene,
    transform: Affine,
    stitch: Stitch,
    color: Color,
    cache: &mut GeometryCache,
    mode: DisplayMode,
    beads: &[BeadDims],
) {
    match stitch {
        Stitch::Full(_) | Stitch::Part(_) => {
            if let Some(instance) = StitchInstance::new(stitch, color) {
                draw_instance(scene, transform, &instance, color, cache, mode);
            }
        }
        Stitch::Line(line) => draw_line(scene, transform, &line, color),
        Stitch::Node(node) => draw_node(scene, transform, &node, color, cache, beads),
    }
}

// ===== Reference Image =====

pub(crate) fn draw_reference_image(scene: &mut Scene, transform: Affine, image: &ReferenceImage) {
    let brush = ImageBrush {
        image: &image.image_data,
        sampler: ImageSampler {
            alpha: image.opacity as f32,
            ..ImageSampler::default()
        },
    };
    scene.draw_image(brush, transform * image.transform());
}

/// Outline and resize handles of the selected image
pub(crate) fn draw_image_handles(scene: &mut Scene, transform: Affine, image: &ReferenceImage) {
    let outline_stroke = Stroke::new(1.0);
    let pixels = Rect::from_origin_size(Point::ZERO, image.pixel_size());
    let outline = (transform * image.transform()) * pixels.to_path(0.1);
    scene.stroke(
        &outline_stroke,
        Affine::IDENTITY,
        theme::reference_image::HANDLE_OUTLINE,
        None,
        &outline,
    );
    if image.locked {
        return;
    }

    let size = theme::reference_image::HANDLE_SIZE;
    for handle in ResizeHandle::ALL {
        let center = transform * image.handle_position(handle);
        let rect = Rect::from_center_size(center, (size, size));
        scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            theme::reference_image::HANDLE_FILL,
            None,
            &rect,
        );
        scene.stroke(
            &outline_stroke,
            Affine::IDENTITY,
            theme::reference_image::HANDLE_OUTLINE,
            None,
            &rect,
        );
    }
}
