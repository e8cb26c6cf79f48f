// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas settings and configuration constants.
//!
//! The constants below are the built-in defaults. A host can override any of
//! them per user with a TOML file read through [`CanvasSettings::load`].
//! Visual styling (colors, sizes) belongs in `theme.rs`.

use crate::editing::Modifier;
use crate::error::{CanvasError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// VIEWPORT SETTINGS
// ============================================================================
/// Minimum scale, in screen pixels per cell
const MIN_SCALE: f64 = 1.0;

/// Maximum scale, in screen pixels per cell
const MAX_SCALE: f64 = 100.0;

// ============================================================================
// WHEEL SETTINGS
// ============================================================================
/// Zoom factor applied per wheel event
const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Wheel deltas below this many pixels are trackpad jitter and get ignored
const WHEEL_MIN_DELTA: f64 = 1.0;

/// Pixels per wheel "line"
const WHEEL_LINE_HEIGHT: f64 = 16.0;

// ============================================================================
// SNAP SETTINGS
// ============================================================================
/// Back stitch endpoints snap to a corner only within this distance of it,
/// on both axes. Points farther out fall in the dead zone and are dropped.
const BACK_STITCH_TOLERANCE: f64 = 0.4;

/// Largest accepted dead-zone boundary; at 0.5 the dead zone vanishes
const BACK_STITCH_TOLERANCE_MAX: f64 = 0.5;

// ============================================================================
// HIT TESTING SETTINGS
// ============================================================================
/// Screen pixels around a line or node stitch that still count as on it
const HIT_TOLERANCE_PX: f64 = 3.0;

// ============================================================================
// BEAD SETTINGS
// ============================================================================
/// Standard seed bead length in millimetres
const BEAD_DEFAULT_LENGTH: f64 = 1.5;

/// Standard seed bead diameter in millimetres
const BEAD_DEFAULT_DIAMETER: f64 = 2.5;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Viewport limits
pub mod viewport {
    /// Minimum scale (1 px per cell)
    pub const MIN_SCALE: f64 = super::MIN_SCALE;

    /// Maximum scale (100 px per cell)
    pub const MAX_SCALE: f64 = super::MAX_SCALE;
}

/// Wheel handling
pub mod wheel {
    pub const ZOOM_STEP: f64 = super::WHEEL_ZOOM_STEP;
    pub const MIN_DELTA: f64 = super::WHEEL_MIN_DELTA;
    pub const LINE_HEIGHT: f64 = super::WHEEL_LINE_HEIGHT;
}

/// Coordinate snapping
pub mod snap {
    pub const BACK_STITCH_TOLERANCE: f64 = super::BACK_STITCH_TOLERANCE;
    pub const BACK_STITCH_TOLERANCE_MAX: f64 = super::BACK_STITCH_TOLERANCE_MAX;
}

/// Hit testing for the erase action
pub mod hit {
    pub const TOLERANCE_PX: f64 = super::HIT_TOLERANCE_PX;
}

/// Bead sizes
pub mod bead {
    pub const DEFAULT_LENGTH: f64 = super::BEAD_DEFAULT_LENGTH;
    pub const DEFAULT_DIAMETER: f64 = super::BEAD_DEFAULT_DIAMETER;
}

// ============================================================================
// RUNTIME SETTINGS
// ============================================================================

/// What the wheel does without its toggle modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelAction {
    /// Zoom around the cursor
    #[default]
    Zoom,
    /// Pan by the wheel delta
    Scroll,
}

impl WheelAction {
    /// The other behavior
    pub fn toggled(self) -> Self {
        match self {
            WheelAction::Zoom => WheelAction::Scroll,
            WheelAction::Scroll => WheelAction::Zoom,
        }
    }
}

/// Which modifier triggers each alternate behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierBindings {
    /// Left button with this held erases instead of drawing
    pub anti_action: Modifier,
    /// Right button with this held erases instead of panning
    pub pan_as_anti_action: Modifier,
    /// Keeps every stitch of a gesture at the first stitch's offset in its cell
    pub lock_position: Modifier,
    /// Places nodes rotated by 90 degrees
    pub rotate_node: Modifier,
    /// Swaps the wheel between zooming and scrolling
    pub wheel_toggle: Modifier,
}

impl Default for ModifierBindings {
    fn default() -> Self {
        Self {
            anti_action: Modifier::Primary,
            pan_as_anti_action: Modifier::Primary,
            lock_position: Modifier::Shift,
            rotate_node: Modifier::Alt,
            wheel_toggle: Modifier::Primary,
        }
    }
}

/// User-adjustable canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_action: WheelAction,
    pub wheel_zoom_step: f64,
    pub wheel_min_delta: f64,
    pub back_stitch_tolerance: f64,
    pub modifiers: ModifierBindings,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            min_scale: viewport::MIN_SCALE,
            max_scale: viewport::MAX_SCALE,
            wheel_action: WheelAction::default(),
            wheel_zoom_step: wheel::ZOOM_STEP,
            wheel_min_delta: wheel::MIN_DELTA,
            back_stitch_tolerance: snap::BACK_STITCH_TOLERANCE,
            modifiers: ModifierBindings::default(),
        }
    }
}

impl CanvasSettings {
    /// Parse settings from TOML; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: CanvasSettings = toml::from_str(text)?;
        Ok(settings.normalized())
    }

    /// Read settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CanvasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::info!("Loaded canvas settings from {}", path.display());
        Ok(settings)
    }

    /// Bring out-of-range values back into range.
    ///
    /// Inverted scale limits are swapped, non-positive ones fall back to the
    /// defaults, the zoom step must exceed 1, and the back stitch tolerance is
    /// clamped into `(0, 0.5]`.
    pub fn normalized(mut self) -> Self {
        if !(self.min_scale > 0.0) {
            self.min_scale = viewport::MIN_SCALE;
        }
        if !(self.max_scale > 0.0) {
            self.max_scale = viewport::MAX_SCALE;
        }
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !(self.wheel_zoom_step > 1.0) {
            self.wheel_zoom_step = wheel::ZOOM_STEP;
        }
        if !(self.wheel_min_delta >= 0.0) {
            self.wheel_min_delta = wheel::MIN_DELTA;
        }
        if !(self.back_stitch_tolerance > 0.0) {
            self.back_stitch_tolerance = snap::BACK_STITCH_TOLERANCE;
        }
        self.back_stitch_tolerance = self
            .back_stitch_tolerance
            .min(snap::BACK_STITCH_TOLERANCE_MAX);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let settings = CanvasSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CanvasSettings::default());
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let settings = CanvasSettings::from_toml_str(
            r#"
            max_scale = 40.0
            wheel_action = "scroll"

            [modifiers]
            lock_position = "ctrl"
            "#,
        )
        .unwrap();
        assert_eq!(settings.max_scale, 40.0);
        assert_eq!(settings.min_scale, viewport::MIN_SCALE);
        assert_eq!(settings.wheel_action, WheelAction::Scroll);
        assert_eq!(settings.modifiers.lock_position, Modifier::Ctrl);
        assert_eq!(settings.modifiers.rotate_node, Modifier::Alt);
    }

    #[test]
    fn normalizes_inverted_and_out_of_range_values() {
        let settings = CanvasSettings::from_toml_str(
            r#"
            min_scale = 50.0
            max_scale = 2.0
            wheel_zoom_step = 0.5
            back_stitch_tolerance = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(settings.min_scale, 2.0);
        assert_eq!(settings.max_scale, 50.0);
        assert_eq!(settings.wheel_zoom_step, wheel::ZOOM_STEP);
        assert_eq!(settings.back_stitch_tolerance, 0.5);
    }

    #[test]
    fn malformed_toml_is_a_settings_error() {
        let err = CanvasSettings::from_toml_str("min_scale = \"big\"").unwrap_err();
        assert!(matches!(err, CanvasError::Settings(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CanvasSettings::load(Path::new("/nonexistent/canvas.toml")).unwrap_err();
        assert!(matches!(err, CanvasError::Io { .. }));
    }

    #[test]
    fn wheel_action_toggles() {
        assert_eq!(WheelAction::Zoom.toggled(), WheelAction::Scroll);
        assert_eq!(WheelAction::Scroll.toggled(), WheelAction::Zoom);
    }
}
