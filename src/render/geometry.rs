// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Stitch geometry synthesis - builds the Kurbo paths for each stitch mark
//!
//! Cell stitch geometry lives in cell-local coordinates with the origin at
//! the stitch's top-left corner: a full stitch covers `[0, 1]²`, a petite or
//! quarter stitch `[0, 0.5]²`. Part stitches are built on the `/` diagonal;
//! the `\` variant is the horizontal mirror. Node geometry is centered on
//! the node's point.

use crate::model::{
    BeadDims, DisplayMode, FullStitchKind, NodeStitchKind, PartStitchDirection, PartStitchKind,
};
use crate::theme;
use kurbo::{Affine, BezPath, Cap, Circle, Point, Rect, RoundedRect, Shape, Size, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

const PATH_TOLERANCE: f64 = 0.01;

// ===== Cell Stitch Kinds =====

/// Stitch kinds drawn from per-mode cell geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStitchKind {
    Full,
    Petite,
    Half,
    Quarter,
}

impl CellStitchKind {
    /// Side length of the area the stitch covers, in cells
    pub fn extent(self) -> f64 {
        match self {
            CellStitchKind::Full | CellStitchKind::Half => 1.0,
            CellStitchKind::Petite | CellStitchKind::Quarter => 0.5,
        }
    }

    fn is_diagonal(self) -> bool {
        matches!(self, CellStitchKind::Half | CellStitchKind::Quarter)
    }
}

impl From<FullStitchKind> for CellStitchKind {
    fn from(kind: FullStitchKind) -> Self {
        match kind {
            FullStitchKind::Full => CellStitchKind::Full,
            FullStitchKind::Petite => CellStitchKind::Petite,
        }
    }
}

impl From<PartStitchKind> for CellStitchKind {
    fn from(kind: PartStitchKind) -> Self {
        match kind {
            PartStitchKind::Half => CellStitchKind::Half,
            PartStitchKind::Quarter => CellStitchKind::Quarter,
        }
    }
}

// ===== Geometry =====

/// How one path of a stitch mark is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartStyle {
    Fill,
    /// Stroke with round caps, width in local units
    Stroke { width: f64 },
}

/// One path of a stitch mark
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryPart {
    pub path: BezPath,
    pub style: PartStyle,
    /// Multiplied into the stitch color
    pub alpha: f32,
}

/// Shared, read-only geometry for one kind of stitch mark
#[derive(Debug, Clone, PartialEq)]
pub struct StitchGeometry {
    parts: Vec<GeometryPart>,
    extent: Rect,
}

impl StitchGeometry {
    fn new(parts: Vec<GeometryPart>, extent: Rect) -> Self {
        Self { parts, extent }
    }

    pub fn parts(&self) -> &[GeometryPart] {
        &self.parts
    }

    /// Local-space area the mark occupies
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// The same mark flipped left to right within its extent
    pub fn mirrored(&self) -> Self {
        let flip = Affine::translate((self.extent.x0 + self.extent.x1, 0.0))
            * Affine::scale_non_uniform(-1.0, 1.0);
        let parts = self
            .parts
            .iter()
            .map(|part| GeometryPart {
                path: flip * part.path.clone(),
                style: part.style,
                alpha: part.alpha,
            })
            .collect();
        Self::new(parts, self.extent)
    }

    /// Paint every part in `color`, mapped to the scene by `transform`
    pub fn draw(&self, scene: &mut Scene, transform: Affine, color: Color) {
        for part in &self.parts {
            let color = color.multiply_alpha(part.alpha);
            match part.style {
                PartStyle::Fill => {
                    scene.fill(Fill::NonZero, transform, color, None, &part.path);
                }
                PartStyle::Stroke { width } => {
                    let stroke = Stroke::new(width).with_caps(Cap::Round);
                    scene.stroke(&stroke, transform, color, None, &part.path);
                }
            }
        }
    }
}

/// Full and mirrored geometry for a cell stitch kind in one display mode
#[derive(Debug, Clone, PartialEq)]
pub struct CellGeometry {
    forward: StitchGeometry,
    backward: StitchGeometry,
}

impl CellGeometry {
    /// Geometry for a stitch on the given diagonal.
    ///
    /// Full and petite stitches are symmetric, so either direction works.
    pub fn for_direction(&self, direction: PartStitchDirection) -> &StitchGeometry {
        match direction {
            PartStitchDirection::Forward => &self.forward,
            PartStitchDirection::Backward => &self.backward,
        }
    }
}

// ===== Synthesis =====

/// Build the geometry of a cell stitch in a display mode
pub fn cell_geometry(kind: CellStitchKind, mode: DisplayMode) -> CellGeometry {
    let size = kind.extent();
    let extent = Rect::new(0.0, 0.0, size, size);

    let mut parts = Vec::new();
    match mode {
        DisplayMode::Solid => parts.push(solid_part(kind, 1.0)),
        DisplayMode::Stitches => parts.push(thread_part(kind)),
        DisplayMode::Mixed => {
            parts.push(solid_part(kind, theme::stitch::MIXED_FILL_ALPHA));
            parts.push(thread_part(kind));
        }
    }

    let forward = StitchGeometry::new(parts, extent);
    let backward = forward.mirrored();
    CellGeometry { forward, backward }
}

/// Filled area covered by the stitch
fn solid_part(kind: CellStitchKind, alpha: f32) -> GeometryPart {
    let s = kind.extent();
    let path = if kind.is_diagonal() {
        // Band along the `/` diagonal, corners at bottom-left and top-right
        let w = s * theme::stitch::PART_SOLID_WIDTH;
        let mut path = BezPath::new();
        path.move_to((0.0, s));
        path.line_to((0.0, s - w));
        path.line_to((s - w, 0.0));
        path.line_to((s, 0.0));
        path.line_to((s, w));
        path.line_to((w, s));
        path.close_path();
        path
    } else {
        Rect::new(0.0, 0.0, s, s).to_path(PATH_TOLERANCE)
    };
    GeometryPart {
        path,
        style: PartStyle::Fill,
        alpha,
    }
}

/// Thread strokes: an X for full stitches, a single `/` for part stitches
fn thread_part(kind: CellStitchKind) -> GeometryPart {
    let s = kind.extent();
    let width = theme::stitch::CROSS_STROKE_WIDTH * s;
    // Keep the round caps inside the extent
    let inset = width / 2.0;

    let mut path = BezPath::new();
    path.move_to((inset, s - inset));
    path.line_to((s - inset, inset));
    if !kind.is_diagonal() {
        path.move_to((inset, inset));
        path.line_to((s - inset, s - inset));
    }
    GeometryPart {
        path,
        style: PartStyle::Stroke { width },
        alpha: 1.0,
    }
}

/// Build the geometry of a node stitch.
///
/// `bead` is the bead size in cells, width across the hole and height along
/// it. French knots ignore it.
pub fn node_geometry(kind: NodeStitchKind, bead: Size) -> StitchGeometry {
    match kind {
        NodeStitchKind::FrenchKnot => {
            let circle = Circle::new(Point::ZERO, theme::stitch::FRENCH_KNOT_RADIUS);
            StitchGeometry::new(
                vec![GeometryPart {
                    path: circle.to_path(PATH_TOLERANCE),
                    style: PartStyle::Fill,
                    alpha: 1.0,
                }],
                circle.bounding_box(),
            )
        }
        NodeStitchKind::Bead => {
            let rect = Rect::from_center_size(Point::ZERO, bead);
            let radius = bead.width.min(bead.height) * theme::stitch::BEAD_CORNER_RATIO;
            StitchGeometry::new(
                vec![GeometryPart {
                    path: RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE),
                    style: PartStyle::Fill,
                    alpha: 1.0,
                }],
                rect,
            )
        }
    }
}

/// Bead size in cells for a fabric with the given cell size in millimetres
pub fn bead_size_in_cells(dims: BeadDims, cell_size_mm: (f64, f64)) -> Size {
    Size::new(dims.diameter / cell_size_mm.0, dims.length / cell_size_mm.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(geometry: &StitchGeometry) -> Vec<PartStyle> {
        geometry.parts().iter().map(|part| part.style).collect()
    }

    #[test]
    fn modes_select_fill_strokes_or_both() {
        let solid = cell_geometry(CellStitchKind::Full, DisplayMode::Solid);
        let stitches = cell_geometry(CellStitchKind::Full, DisplayMode::Stitches);
        let mixed = cell_geometry(CellStitchKind::Full, DisplayMode::Mixed);
        let forward = PartStitchDirection::Forward;

        assert_eq!(styles(solid.for_direction(forward)), vec![PartStyle::Fill]);
        assert!(matches!(
            styles(stitches.for_direction(forward))[..],
            [PartStyle::Stroke { .. }]
        ));
        let mixed = mixed.for_direction(forward);
        assert_eq!(mixed.parts().len(), 2);
        assert_eq!(mixed.parts()[0].alpha, theme::stitch::MIXED_FILL_ALPHA);
        assert_eq!(mixed.parts()[1].alpha, 1.0);
    }

    #[test]
    fn quarter_kinds_cover_a_quarter_cell() {
        for kind in [CellStitchKind::Petite, CellStitchKind::Quarter] {
            let geometry = cell_geometry(kind, DisplayMode::Solid);
            let extent = geometry.for_direction(PartStitchDirection::Forward).extent();
            assert_eq!(extent, Rect::new(0.0, 0.0, 0.5, 0.5));
            let bbox = geometry.for_direction(PartStitchDirection::Forward).parts()[0]
                .path
                .bounding_box();
            assert!(bbox.x1 <= 0.5 + 1e-9 && bbox.y1 <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn backward_is_the_mirrored_diagonal() {
        let geometry = cell_geometry(CellStitchKind::Half, DisplayMode::Stitches);
        let forward = &geometry.for_direction(PartStitchDirection::Forward).parts()[0].path;
        let backward = &geometry.for_direction(PartStitchDirection::Backward).parts()[0].path;
        let inset = theme::stitch::CROSS_STROKE_WIDTH / 2.0;

        // `/` starts bottom-left, `\` starts bottom-right
        let forward_start = forward.elements()[0].end_point().map(|p| p.x);
        let backward_start = backward.elements()[0].end_point().map(|p| p.x);
        assert_eq!(forward_start, Some(inset));
        assert!((backward_start.unwrap_or_default() - (1.0 - inset)).abs() < 1e-9);
        assert_ne!(forward, backward);
    }

    #[test]
    fn french_knot_is_centered_circle() {
        let geometry = node_geometry(NodeStitchKind::FrenchKnot, Size::ZERO);
        let r = theme::stitch::FRENCH_KNOT_RADIUS;
        let extent = geometry.extent();
        assert!((extent.x0 + r).abs() < 1e-9 && (extent.x1 - r).abs() < 1e-9);
        assert!((extent.y0 + r).abs() < 1e-9 && (extent.y1 - r).abs() < 1e-9);
    }

    #[test]
    fn bead_size_follows_fabric_count() {
        // 14 count: 25.4 / 14 mm per cell
        let cell = 25.4 / 14.0;
        let size = bead_size_in_cells(
            BeadDims {
                length: 1.5,
                diameter: 2.5,
            },
            (cell, cell),
        );
        assert!((size.width - 2.5 / cell).abs() < 1e-9);
        assert!((size.height - 1.5 / cell).abs() < 1e-9);

        let geometry = node_geometry(NodeStitchKind::Bead, size);
        assert_eq!(geometry.extent(), Rect::from_center_size(Point::ZERO, size));
    }
}
