// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Per-gesture tool state
//!
//! Tools themselves are stateless. Whatever a tool needs to remember between
//! the pointer events of one press lives here, and the owner resets it when
//! the press ends or is abandoned. A stale value would make the next gesture
//! chain onto the previous one.

use crate::model::Stitch;

/// State carried across the events of one pointer press
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    /// First stitch placed in this gesture (lock-position anchor)
    first: Option<Stitch>,
    /// Most recent stitch placed in this gesture (back stitch chaining)
    previous: Option<Stitch>,
}

impl GestureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<Stitch> {
        self.first
    }

    pub fn previous(&self) -> Option<Stitch> {
        self.previous
    }

    /// Note a stitch placed by this gesture
    pub fn record(&mut self, stitch: Stitch) {
        if self.first.is_none() {
            self.first = Some(stitch);
        }
        self.previous = Some(stitch);
    }

    /// Forget everything; the next event starts a fresh gesture
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_fresh(&self) -> bool {
        self.first.is_none() && self.previous.is_none()
    }
}
