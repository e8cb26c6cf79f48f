// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Input handling and view-only editing state

pub mod cursor;
pub mod mouse;
pub mod reference_image;
pub mod viewport;

pub use cursor::CursorStyle;
pub use mouse::{
    Modifier, Modifiers, MouseButton, MouseButtons, MouseEvent, WheelDelta, WheelEvent,
};
pub use reference_image::{ReferenceImage, ResizeHandle};
pub use viewport::{Viewport, ViewportEvent, ZoomState};
