// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Raw pointer input: buttons, modifier keys, and wheel deltas

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

// ===== Buttons =====

/// A single mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Decode the index of the button that changed state
    /// (0 = left, 1 = middle, 2 = right).
    pub fn from_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }

    /// This button's bit in a held-buttons mask
    fn bit(self) -> u16 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

/// Set of buttons held during an event
///
/// Uses the usual pointer-event bit layout: 1 = left, 2 = right, 4 = middle.
/// Other bits (back/forward buttons) are kept but never queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MouseButtons(u16);

impl MouseButtons {
    pub const NONE: MouseButtons = MouseButtons(0);

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn with(self, button: MouseButton) -> Self {
        Self(self.0 | button.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        MouseButtons::NONE.with(button)
    }
}

// ===== Modifiers =====

/// A modifier key that can be bound to an alternate behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
    /// Cmd on macOS, Ctrl elsewhere
    Primary,
}

/// Modifier key state at the time of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Whether the platform's primary shortcut key is held
    pub fn primary(&self) -> bool {
        if cfg!(target_os = "macos") {
            self.meta
        } else {
            self.ctrl
        }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Meta => self.meta,
            Modifier::Primary => self.primary(),
        }
    }

    /// Modifier set holding just `modifier`
    pub fn only(modifier: Modifier) -> Self {
        let mut mods = Modifiers::NONE;
        match modifier {
            Modifier::Shift => mods.shift = true,
            Modifier::Ctrl => mods.ctrl = true,
            Modifier::Alt => mods.alt = true,
            Modifier::Meta => mods.meta = true,
            Modifier::Primary if cfg!(target_os = "macos") => mods.meta = true,
            Modifier::Primary => mods.ctrl = true,
        }
        mods
    }
}

// ===== Events =====

/// A pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Position in screen pixels, relative to the canvas
    pub pos: Point,
    /// The button that changed state, for down/up events
    pub button: Option<MouseButton>,
    /// Buttons held after the event
    pub buttons: MouseButtons,
    pub mods: Modifiers,
}

impl MouseEvent {
    /// A move event with nothing held
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            button: None,
            buttons: MouseButtons::NONE,
            mods: Modifiers::NONE,
        }
    }

    /// A down/up event for `button` with the given modifiers.
    ///
    /// The held-buttons mask includes `button`; clear it yourself for up events
    /// if the host reports masks after release.
    pub fn with_modifiers(pos: Point, button: Option<MouseButton>, mods: Modifiers) -> Self {
        Self {
            pos,
            button,
            buttons: button.map(MouseButtons::from).unwrap_or_default(),
            mods,
        }
    }

    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// Wheel delta in the unit the host reported
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    Pixel(Vec2),
    Line(Vec2),
    Page(Vec2),
}

impl WheelDelta {
    /// Convert to screen pixels; pages are one screen high/wide.
    pub fn to_pixels(self, line_height: f64, page: Size) -> Vec2 {
        match self {
            WheelDelta::Pixel(delta) => delta,
            WheelDelta::Line(delta) => delta * line_height,
            WheelDelta::Page(delta) => Vec2::new(delta.x * page.width, delta.y * page.height),
        }
    }
}

/// A wheel or trackpad scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Cursor position in screen pixels
    pub pos: Point,
    pub delta: WheelDelta,
    pub mods: Modifiers,
}
