// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Stitch Canvas: the interactive canvas core of a cross-stitch pattern editor
//!
//! A host window feeds raw pointer and wheel events into a [`PatternView`]
//! and paints it into a `vello::Scene`. The view turns input into stitch
//! edits with the active tool, draws them at once, and sends them out through
//! [`PatternCommands`] for the backend to make durable.
//!
//! The library does not install a `tracing` subscriber; that is up to the
//! host.

pub mod canvas;
pub mod editing;
pub mod error;
pub mod model;
pub mod render;
pub mod settings;
pub mod theme;
pub mod tools;

pub use canvas::{PatternCommands, PatternView};
pub use editing::{
    CursorStyle, Modifier, Modifiers, MouseButton, MouseButtons, MouseEvent, ReferenceImage,
    WheelDelta, WheelEvent, ZoomState,
};
pub use error::{CanvasError, Result};
pub use model::{DisplayMode, PatternSnapshot, Stitch, StitchKind};
pub use settings::CanvasSettings;
