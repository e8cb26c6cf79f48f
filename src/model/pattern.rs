// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Loaded pattern snapshot
//!
//! This is the deserialized shape handed over by the persistence layer. It is
//! read once when a [`PatternView`](crate::canvas::PatternView) is built;
//! later changes arrive as individual stitch confirmations.

use super::palette::{PaletteItem, parse_hex_color};
use super::stitch::{FullStitch, LineStitch, NodeStitch, PartStitch, Stitch};
use crate::error::{CanvasError, Result};
use crate::theme;
use kurbo::{Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};

// ===== Display Mode =====

/// How full and part stitches are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Filled cells
    Solid,
    /// Thread strokes
    Stitches,
    /// Faint fill under thread strokes
    #[default]
    Mixed,
}

/// Display options stored with the pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub mode: DisplayMode,
}

// ===== Fabric =====

/// The canvas cloth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fabric {
    /// Width in cells
    pub width: u16,
    /// Height in cells
    pub height: u16,
    /// Cells per inch, horizontally and vertically
    #[serde(default = "default_stitches_per_inch")]
    pub stitches_per_inch: (u16, u16),
    #[serde(default = "default_fabric_color")]
    pub color: String,
}

fn default_stitches_per_inch() -> (u16, u16) {
    (14, 14)
}

fn default_fabric_color() -> String {
    "FFFFFF".to_string()
}

impl Fabric {
    /// World-space extent, one unit per cell
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn bounds(&self) -> Rect {
        self.size().to_rect()
    }

    /// Physical cell size in millimetres, horizontally and vertically
    pub fn cell_size_mm(&self) -> (f64, f64) {
        let (spi_x, spi_y) = self.stitches_per_inch;
        (
            25.4 / f64::from(spi_x.max(1)),
            25.4 / f64::from(spi_y.max(1)),
        )
    }
}

// ===== Grid =====

/// One class of grid line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub color: String,
    /// Width in screen pixels
    pub thickness: f64,
}

/// Grid overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Every n-th line is drawn as a major line
    pub major_lines_interval: u16,
    pub minor: GridLine,
    pub major: GridLine,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            major_lines_interval: theme::grid::MAJOR_INTERVAL,
            minor: GridLine {
                color: theme::grid::MINOR_COLOR.to_string(),
                thickness: theme::grid::MINOR_THICKNESS,
            },
            major: GridLine {
                color: theme::grid::MAJOR_COLOR.to_string(),
                thickness: theme::grid::MAJOR_THICKNESS,
            },
        }
    }
}

// ===== Snapshot =====

/// A whole pattern as loaded from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSnapshot {
    pub fabric: Fabric,
    #[serde(default)]
    pub grid: GridSettings,
    pub palette: Vec<PaletteItem>,
    #[serde(default)]
    pub fullstitches: Vec<FullStitch>,
    #[serde(default)]
    pub partstitches: Vec<PartStitch>,
    #[serde(default)]
    pub linestitches: Vec<LineStitch>,
    #[serde(default)]
    pub nodestitches: Vec<NodeStitch>,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl PatternSnapshot {
    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every stitch in the snapshot, family by family
    pub fn stitches(&self) -> impl Iterator<Item = Stitch> + '_ {
        let full = self.fullstitches.iter().copied().map(Stitch::from);
        let part = self.partstitches.iter().copied().map(Stitch::from);
        let line = self.linestitches.iter().copied().map(Stitch::from);
        let node = self.nodestitches.iter().copied().map(Stitch::from);
        full.chain(part).chain(line).chain(node)
    }

    /// Parsed palette colors, in palette order
    pub fn palette_colors(&self) -> Result<Vec<Color>> {
        self.palette.iter().map(PaletteItem::display_color).collect()
    }

    pub fn fabric_color(&self) -> Result<Color> {
        parse_hex_color(&self.fabric.color)
    }

    /// Check that every stitch points into the palette
    pub fn validate(&self) -> Result<()> {
        let len = self.palette.len();
        match self.stitches().find(|stitch| stitch.palindex() as usize >= len) {
            Some(stitch) => Err(CanvasError::PaletteIndexOutOfRange {
                index: stitch.palindex(),
                len,
            }),
            None => Ok(()),
        }
    }
}
