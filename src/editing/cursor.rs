// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Cursor styles and rotation of resize cursors

use std::f64::consts::{FRAC_PI_4, TAU};
use std::fmt;

/// Cursor shapes the canvas asks the host for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Move,
    Grab,
    Grabbing,
    NsResize,
    NeswResize,
    EwResize,
    NwseResize,
}

/// Resize cursors in clockwise order, 45 degrees apart
const RESIZE_RING: [CursorStyle; 4] = [
    CursorStyle::NsResize,
    CursorStyle::NeswResize,
    CursorStyle::EwResize,
    CursorStyle::NwseResize,
];

impl CursorStyle {
    /// CSS cursor name
    pub fn css_name(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Crosshair => "crosshair",
            CursorStyle::Move => "move",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
            CursorStyle::NsResize => "ns-resize",
            CursorStyle::NeswResize => "nesw-resize",
            CursorStyle::EwResize => "ew-resize",
            CursorStyle::NwseResize => "nwse-resize",
        }
    }

    /// Rotate a resize cursor by `angle` radians (clockwise on screen).
    ///
    /// The angle is rounded to the nearest 45 degrees. Angles outside
    /// `[0, 2π)` wrap. Cursors that are not resize arrows are returned as is.
    pub fn rotated(self, angle: f64) -> Self {
        let Some(base) = RESIZE_RING.iter().position(|style| *style == self) else {
            return self;
        };
        if !angle.is_finite() {
            return self;
        }
        let steps = (angle.rem_euclid(TAU) / FRAC_PI_4).round() as usize;
        RESIZE_RING[(base + steps) % RESIZE_RING.len()]
    }
}

impl fmt::Display for CursorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotates_ns_resize_through_the_ring() {
        let base = CursorStyle::NsResize;
        assert_eq!(base.rotated(0.0).css_name(), "ns-resize");
        assert_eq!(base.rotated(FRAC_PI_4).css_name(), "nesw-resize");
        assert_eq!(base.rotated(FRAC_PI_2).css_name(), "ew-resize");
        assert_eq!(base.rotated(-FRAC_PI_4).css_name(), "nwse-resize");
        assert_eq!(base.rotated(PI), CursorStyle::NsResize);
    }

    #[test]
    fn full_turns_wrap() {
        let base = CursorStyle::EwResize;
        for angle in [0.3, FRAC_PI_4, 2.0, -1.0] {
            assert_eq!(base.rotated(angle + 2.0 * TAU), base.rotated(angle));
            assert_eq!(base.rotated(angle - TAU), base.rotated(angle));
        }
    }

    #[test]
    fn rounds_to_nearest_eighth_turn() {
        assert_eq!(CursorStyle::NsResize.rotated(0.3), CursorStyle::NsResize);
        assert_eq!(CursorStyle::NsResize.rotated(0.5), CursorStyle::NeswResize);
        // Just below a full turn rounds up to it
        assert_eq!(CursorStyle::NsResize.rotated(TAU - 0.1), CursorStyle::NsResize);
    }

    #[test]
    fn non_resize_cursors_ignore_rotation() {
        assert_eq!(CursorStyle::Move.rotated(FRAC_PI_2), CursorStyle::Move);
        assert_eq!(CursorStyle::Default.rotated(1.0), CursorStyle::Default);
    }
}
