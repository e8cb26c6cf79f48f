// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Reference image support for tracing a photo or chart under the pattern.
//!
//! Reference images are view-only (not part of the pattern). They live in
//! world space, one unit per cell, and can be moved, resized with eight
//! handles, rotated and faded.

use super::cursor::CursorStyle;
use crate::error::{CanvasError, Result};
use crate::theme;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};
use std::path::Path;

// ============================================================================
// RESIZE HANDLE
// ============================================================================

/// Which handle the user is dragging for resize.
///
/// Corner handles scale proportionally and keep the aspect ratio. Side
/// handles scale along one axis only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeHandle {
    /// Corners first; they win where handles overlap
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    /// Handle position in unit coordinates of the unrotated image
    fn unit_position(self) -> Point {
        match self {
            Self::TopLeft => Point::new(0.0, 0.0),
            Self::TopRight => Point::new(1.0, 0.0),
            Self::BottomLeft => Point::new(0.0, 1.0),
            Self::BottomRight => Point::new(1.0, 1.0),
            Self::Top => Point::new(0.5, 0.0),
            Self::Bottom => Point::new(0.5, 1.0),
            Self::Left => Point::new(0.0, 0.5),
            Self::Right => Point::new(1.0, 0.5),
        }
    }

    /// Resize cursor for an unrotated image
    fn base_cursor(self) -> CursorStyle {
        match self {
            Self::Top | Self::Bottom => CursorStyle::NsResize,
            Self::Left | Self::Right => CursorStyle::EwResize,
            Self::TopLeft | Self::BottomRight => CursorStyle::NwseResize,
            Self::TopRight | Self::BottomLeft => CursorStyle::NeswResize,
        }
    }
}

// ============================================================================
// REFERENCE IMAGE
// ============================================================================

/// An image displayed under the stitches.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    /// Decoded RGBA8 pixel data for Vello rendering
    pub image_data: ImageData,
    /// Top-left corner of the unrotated image, in cells
    pub position: Point,
    /// Cells per image pixel, horizontally and vertically
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation about the image center, radians, clockwise on screen
    pub rotation: f64,
    /// Opacity from 0.0 (invisible) to 1.0 (fully opaque)
    pub opacity: f64,
    /// When true, the image cannot be moved or resized
    pub locked: bool,
}

impl ReferenceImage {
    /// Decode a PNG or JPEG image.
    ///
    /// The image starts at one cell per pixel; call [`fit_to`](Self::fit_to)
    /// to place it over the fabric.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let image_data = ImageData {
            data: Blob::from(rgba.into_raw()),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width,
            height,
        };
        tracing::info!("Decoded reference image: {}x{}", width, height);

        Ok(Self {
            image_data,
            position: Point::ZERO,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            opacity: theme::reference_image::DEFAULT_OPACITY,
            locked: false,
        })
    }

    /// Read and decode an image file
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| CanvasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes)
    }

    pub fn pixel_size(&self) -> Size {
        Size::new(
            f64::from(self.image_data.width),
            f64::from(self.image_data.height),
        )
    }

    /// Scaled size in cells
    pub fn size(&self) -> Size {
        let px = self.pixel_size();
        Size::new(px.width * self.scale_x, px.height * self.scale_y)
    }

    /// Unrotated bounds in world space
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Scale the image uniformly to fit inside `area` and center it there
    pub fn fit_to(&mut self, area: Rect) {
        let px = self.pixel_size();
        if px.is_zero_area() || area.is_zero_area() {
            return;
        }
        let scale = (area.width() / px.width).min(area.height() / px.height);
        self.scale_x = scale;
        self.scale_y = scale;
        let size = self.size();
        self.position = area.center() - size.to_vec2() / 2.0;
    }

    /// Rotation about the center, applied after placement
    fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation, self.center())
    }

    /// Image pixel space to world space
    pub fn transform(&self) -> Affine {
        self.rotation_transform()
            * Affine::translate(self.position.to_vec2())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Whether a world point lies on the (rotated) image
    pub fn contains(&self, point: Point) -> bool {
        let local = self.rotation_transform().inverse() * point;
        self.bounds().contains(local)
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = if opacity.is_nan() {
            theme::reference_image::DEFAULT_OPACITY
        } else {
            opacity.clamp(0.0, 1.0)
        };
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        if rotation.is_finite() {
            self.rotation = rotation;
        }
    }

    /// Move by a world-space delta; ignored while locked
    pub fn move_by(&mut self, delta: Vec2) {
        if !self.locked {
            self.position += delta;
        }
    }

    // ====================================================================
    // HANDLES
    // ====================================================================

    /// World position of a handle, rotation included
    pub fn handle_position(&self, handle: ResizeHandle) -> Point {
        let b = self.bounds();
        let unit = handle.unit_position();
        let unrotated = Point::new(b.x0 + unit.x * b.width(), b.y0 + unit.y * b.height());
        self.rotation_transform() * unrotated
    }

    /// Hit-test a world point against all eight handles.
    ///
    /// `radius` is in world units. Locked images have no handles.
    pub fn hit_test_handle(&self, point: Point, radius: f64) -> Option<ResizeHandle> {
        if self.locked {
            return None;
        }
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| self.handle_position(*handle).distance(point) <= radius)
    }

    /// Resize cursor for a handle, turned with the image
    pub fn cursor_for_handle(&self, handle: ResizeHandle) -> CursorStyle {
        handle.base_cursor().rotated(self.rotation)
    }

    /// Resize by dragging `handle` to the world point `point`.
    ///
    /// The opposite corner or edge stays fixed. Corner handles keep the
    /// aspect ratio. The image never shrinks to nothing.
    pub fn resize_with_handle(&mut self, handle: ResizeHandle, point: Point) {
        if self.locked {
            return;
        }
        let px = self.pixel_size();
        if px.is_zero_area() {
            return;
        }

        // Work in the unrotated frame of the image
        let rotation = self.rotation_transform();
        let local = rotation.inverse() * point;
        let b = self.bounds();
        let unit = handle.unit_position();
        let anchor_unit = Point::new(1.0 - unit.x, 1.0 - unit.y);
        let anchor = Point::new(
            b.x0 + anchor_unit.x * b.width(),
            b.y0 + anchor_unit.y * b.height(),
        );
        let anchor_world = rotation * anchor;

        let min_w = px.width.recip();
        let min_h = px.height.recip();
        let mut width = b.width();
        let mut height = b.height();
        match handle {
            ResizeHandle::Left | ResizeHandle::Right => {
                width = (local.x - anchor.x).abs().max(min_w);
            }
            ResizeHandle::Top | ResizeHandle::Bottom => {
                height = (local.y - anchor.y).abs().max(min_h);
            }
            _ => {
                let factor = ((local.x - anchor.x).abs() / b.width())
                    .max((local.y - anchor.y).abs() / b.height());
                width = (b.width() * factor).max(min_w);
                height = (b.height() * factor).max(min_h);
            }
        }

        self.scale_x = width / px.width;
        self.scale_y = height / px.height;
        self.position = Point::new(
            anchor.x - anchor_unit.x * width,
            anchor.y - anchor_unit.y * height,
        );

        // The center moved, so the rotation moved the anchor; shift it back
        let drift = anchor_world - self.rotation_transform() * anchor;
        self.position += drift;
        tracing::debug!("Reference image resized to {:.1}x{:.1} via {:?}", width, height, handle);
    }
}
