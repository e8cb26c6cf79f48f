// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Palette entries referenced by stitch `palindex`

use crate::error::{CanvasError, Result};
use crate::settings;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Physical bead size in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeadDims {
    /// Extent along the bead hole
    pub length: f64,
    /// Extent across the bead hole
    pub diameter: f64,
}

impl Default for BeadDims {
    fn default() -> Self {
        Self {
            length: settings::bead::DEFAULT_LENGTH,
            diameter: settings::bead::DEFAULT_DIAMETER,
        }
    }
}

/// One thread color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteItem {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub name: String,
    /// Six hex digits, with or without a leading `#`
    pub color: String,
    /// Symbol shown in place of the color in printed charts
    #[serde(default)]
    pub symbol: Option<String>,
    /// Bead size used when this color is placed as a bead
    #[serde(default)]
    pub bead: Option<BeadDims>,
}

impl PaletteItem {
    /// Parsed display color
    pub fn display_color(&self) -> Result<Color> {
        parse_hex_color(&self.color)
    }

    /// Bead size, falling back to the standard seed bead
    pub fn bead_dims(&self) -> BeadDims {
        self.bead.unwrap_or_default()
    }
}

/// Parse `RRGGBB` or `#RRGGBB` into an opaque color
pub fn parse_hex_color(hex: &str) -> Result<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(CanvasError::InvalidColor(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| CanvasError::InvalidColor(hex.to_string()))
    };
    Ok(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
