// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pattern data model

pub mod palette;
pub mod pattern;
pub mod stitch;

pub use palette::{BeadDims, PaletteItem, parse_hex_color};
pub use pattern::{DisplayMode, DisplaySettings, Fabric, GridLine, GridSettings, PatternSnapshot};
pub use stitch::{
    FullStitch, FullStitchKind, LineStitch, LineStitchKind, NodeStitch, NodeStitchKind,
    PartStitch, PartStitchDirection, PartStitchKind, Stitch, StitchKind,
};
