// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Error type for data-shape problems.
//!
//! Gesture anomalies (a degenerate line, a back stitch landing in the snap
//! dead zone) are not errors and never reach this type. Only corrupted or
//! unsupported input data does: an unknown stitch kind, a palette index the
//! palette cannot satisfy, a malformed snapshot or settings file.

use std::path::PathBuf;

/// Errors raised while loading or applying pattern data
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A stitch kind name that none of the stitch families recognizes
    #[error("unknown stitch kind `{0}`")]
    UnknownStitchKind(String),

    /// A stitch referenced a palette entry that does not exist
    #[error("palette index {index} is out of range for a palette of {len} items")]
    PaletteIndexOutOfRange { index: u32, len: usize },

    /// A palette or fabric color that is not a 6-digit hex string
    #[error("invalid color `{0}`, expected 6 hex digits")]
    InvalidColor(String),

    /// The pattern snapshot could not be deserialized
    #[error("malformed pattern snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// The settings file could not be deserialized
    #[error("malformed settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference image could not be decoded
    #[error("failed to decode reference image: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used across the crate
pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
