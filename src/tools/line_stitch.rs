// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Back and straight stitch tool
//!
//! Back stitches are placed while dragging, one cell edge or diagonal at a
//! time, each segment starting where the previous one ended. Straight
//! stitches are previewed while dragging and committed on release.

use super::snap;
use super::{GestureState, Tool, ToolContext, ToolEvent, ToolIntent};
use crate::model::{LineStitch, LineStitchKind, Stitch, StitchKind};
use std::f64::consts::SQRT_2;

const LENGTH_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStitchTool {
    kind: LineStitchKind,
}

impl LineStitchTool {
    pub fn new(kind: LineStitchKind) -> Self {
        Self { kind }
    }

    /// Next back stitch segment of the gesture, if the pointer allows one
    fn back_segment(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        gesture: &GestureState,
    ) -> Option<LineStitch> {
        let start = match gesture.previous() {
            Some(Stitch::Line(previous)) => previous.end(),
            _ => snap::snap_corner(event.start, ctx.back_stitch_tolerance)?,
        };
        let end = snap::snap_corner(event.point, ctx.back_stitch_tolerance)?;
        let line = LineStitch::new(start, end, ctx.palindex, self.kind);
        is_valid_back_stitch(&line).then_some(line)
    }

    /// The straight stitch from the press point to the pointer
    fn straight_line(&self, event: &ToolEvent, ctx: &ToolContext) -> Option<LineStitch> {
        let start = snap::snap_half(event.start);
        let end = snap::snap_half(event.point);
        let line = LineStitch::new(start, end, ctx.palindex, self.kind).normalized();
        (!line.is_degenerate()).then_some(line)
    }
}

/// A back stitch spans exactly one cell edge or one cell diagonal
pub fn is_valid_back_stitch(line: &LineStitch) -> bool {
    if line.is_degenerate() {
        return false;
    }
    let length = line.length();
    (length - 1.0).abs() < LENGTH_EPSILON || (length - SQRT_2).abs() < LENGTH_EPSILON
}

impl Tool for LineStitchTool {
    fn kind(&self) -> StitchKind {
        self.kind.into()
    }

    fn main(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        match self.kind {
            LineStitchKind::Back => {
                let Some(line) = self.back_segment(event, ctx, gesture) else {
                    return Vec::new();
                };
                tracing::debug!("Back stitch segment {:?} -> {:?}", line.start(), line.end());
                let stitch = Stitch::Line(line);
                gesture.record(stitch);
                vec![ToolIntent::Add(stitch)]
            }
            LineStitchKind::Straight => match self.straight_line(event, ctx) {
                Some(line) => vec![ToolIntent::Hint(Stitch::Line(line))],
                None => vec![ToolIntent::ClearHint],
            },
        }
    }

    fn release(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        _gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        match self.kind {
            LineStitchKind::Back => Vec::new(),
            LineStitchKind::Straight => match self.straight_line(event, ctx) {
                Some(line) => vec![ToolIntent::ClearHint, ToolIntent::Add(Stitch::Line(line))],
                None => vec![ToolIntent::ClearHint],
            },
        }
    }
}
