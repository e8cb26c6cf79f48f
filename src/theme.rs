// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors and constants
//!
//! All colors use hexadecimal format: Color::from_rgb8(0xRR, 0xGG, 0xBB)

use peniko::Color;

// ============================================================================
// CANVAS
// ============================================================================
const CANVAS_BACKGROUND: Color = Color::from_rgb8(0x20, 0x20, 0x20);
const FABRIC_OUTLINE: Color = Color::from_rgb8(0x60, 0x60, 0x60);

// ============================================================================
// GRID -- defaults used when a pattern carries no grid settings
// ============================================================================
const GRID_MINOR_COLOR: &str = "C8C8C8";
const GRID_MAJOR_COLOR: &str = "646464";
const GRID_MINOR_THICKNESS: f64 = 1.0;
const GRID_MAJOR_THICKNESS: f64 = 2.0;
const GRID_MAJOR_INTERVAL: u16 = 10;
// Below this scale (px per cell) minor lines would blur into a solid fill
const GRID_MINOR_MIN_SCALE: f64 = 4.0;

// ============================================================================
// STITCHES
// ============================================================================
// Thread width relative to the cell for line stitches
const LINE_STITCH_WIDTH: f64 = 0.2;
// Thread width relative to the cell for X strokes in stitches mode
const CROSS_STROKE_WIDTH: f64 = 0.22;
// Fill opacity of the solid layer in mixed mode
const MIXED_FILL_ALPHA: f32 = 0.35;
// Width of the filled band of a solid half stitch, relative to its extent
const PART_SOLID_WIDTH: f64 = 0.5;
// French knot radius relative to the cell
const FRENCH_KNOT_RADIUS: f64 = 0.25;
// Bead corner radius relative to its shorter side
const BEAD_CORNER_RATIO: f64 = 0.4;

// ============================================================================
// HINT (gesture preview)
// ============================================================================
const HINT_ALPHA: f32 = 0.5;

// ============================================================================
// REFERENCE IMAGE
// ============================================================================
const REFERENCE_IMAGE_DEFAULT_OPACITY: f64 = 0.5;
const REFERENCE_IMAGE_HANDLE_HIT_RADIUS: f64 = 8.0;
const REFERENCE_IMAGE_HANDLE_SIZE: f64 = 8.0;
const REFERENCE_IMAGE_HANDLE_FILL: Color = Color::from_rgb8(0xff, 0xff, 0xff);
const REFERENCE_IMAGE_HANDLE_OUTLINE: Color = Color::from_rgb8(0x33, 0x66, 0xcc);

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Colors for the area around and under the fabric
pub mod canvas {
    use super::Color;
    pub const BACKGROUND: Color = super::CANVAS_BACKGROUND;
    pub const FABRIC_OUTLINE: Color = super::FABRIC_OUTLINE;
}

/// Grid defaults
pub mod grid {
    pub const MINOR_COLOR: &str = super::GRID_MINOR_COLOR;
    pub const MAJOR_COLOR: &str = super::GRID_MAJOR_COLOR;
    pub const MINOR_THICKNESS: f64 = super::GRID_MINOR_THICKNESS;
    pub const MAJOR_THICKNESS: f64 = super::GRID_MAJOR_THICKNESS;
    pub const MAJOR_INTERVAL: u16 = super::GRID_MAJOR_INTERVAL;
    /// Minor lines are skipped below this scale
    pub const MINOR_MIN_SCALE: f64 = super::GRID_MINOR_MIN_SCALE;
}

/// Stitch geometry sizes, in cell units
pub mod stitch {
    pub const LINE_WIDTH: f64 = super::LINE_STITCH_WIDTH;
    pub const CROSS_STROKE_WIDTH: f64 = super::CROSS_STROKE_WIDTH;
    pub const MIXED_FILL_ALPHA: f32 = super::MIXED_FILL_ALPHA;
    pub const PART_SOLID_WIDTH: f64 = super::PART_SOLID_WIDTH;
    pub const FRENCH_KNOT_RADIUS: f64 = super::FRENCH_KNOT_RADIUS;
    pub const BEAD_CORNER_RATIO: f64 = super::BEAD_CORNER_RATIO;
}

/// Gesture preview styling
pub mod hint {
    pub const ALPHA: f32 = super::HINT_ALPHA;
}

/// Reference image defaults and handle styling
pub mod reference_image {
    use super::Color;
    pub const DEFAULT_OPACITY: f64 = super::REFERENCE_IMAGE_DEFAULT_OPACITY;
    /// Handle hit radius in screen pixels
    pub const HANDLE_HIT_RADIUS: f64 = super::REFERENCE_IMAGE_HANDLE_HIT_RADIUS;
    /// Handle side length in screen pixels
    pub const HANDLE_SIZE: f64 = super::REFERENCE_IMAGE_HANDLE_SIZE;
    pub const HANDLE_FILL: Color = super::REFERENCE_IMAGE_HANDLE_FILL;
    pub const HANDLE_OUTLINE: Color = super::REFERENCE_IMAGE_HANDLE_OUTLINE;
}
