// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Full and petite stitch tool
//!
//! Every draw event places a stitch immediately, so dragging paints a run of
//! cells. With the lock-position modifier held, the stitch keeps the in-cell
//! offset of the first stitch of the gesture.

use super::snap;
use super::{GestureState, Tool, ToolContext, ToolEvent, ToolIntent};
use crate::model::{FullStitch, FullStitchKind, Stitch, StitchKind};
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullStitchTool {
    kind: FullStitchKind,
}

impl FullStitchTool {
    pub fn new(kind: FullStitchKind) -> Self {
        Self { kind }
    }

    /// Where the stitch for `point` goes
    fn position(&self, point: Point, locked_to: Option<Point>) -> Point {
        match (locked_to, self.kind) {
            (Some(anchor), _) => snap::align_to(point, anchor),
            (None, FullStitchKind::Full) => snap::snap_cell(point),
            (None, FullStitchKind::Petite) => snap::snap_quarter(point),
        }
    }
}

impl Tool for FullStitchTool {
    fn kind(&self) -> StitchKind {
        self.kind.into()
    }

    fn main(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        let anchor = match gesture.first() {
            Some(Stitch::Full(first)) if event.mods.contains(ctx.bindings.lock_position) => {
                Some(Point::new(first.x, first.y))
            }
            _ => None,
        };
        let position = self.position(event.point, anchor);
        let stitch = Stitch::Full(FullStitch {
            x: position.x,
            y: position.y,
            palindex: ctx.palindex,
            kind: self.kind,
        });

        // Dragging within one cell would repeat the same stitch
        if gesture.previous() == Some(stitch) {
            return Vec::new();
        }
        gesture.record(stitch);
        vec![ToolIntent::Add(stitch)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Modifier, Modifiers};
    use crate::tools::ToolAction;
    use crate::tools::test_util::{ctx, event};

    fn full(x: f64, y: f64, kind: FullStitchKind) -> Stitch {
        Stitch::Full(FullStitch {
            x,
            y,
            palindex: 0,
            kind,
        })
    }

    #[test]
    fn places_full_stitch_in_enclosing_cell() {
        let tool = FullStitchTool::new(FullStitchKind::Full);
        let mut gesture = GestureState::new();
        let intents = tool.main(&event(ToolAction::Main, (3.7, 2.1), (3.7, 2.1)), &ctx(), &mut gesture);
        assert_eq!(intents, vec![ToolIntent::Add(full(3.0, 2.0, FullStitchKind::Full))]);
    }

    #[test]
    fn places_petite_stitch_in_quarter() {
        let tool = FullStitchTool::new(FullStitchKind::Petite);
        let mut gesture = GestureState::new();
        let intents = tool.main(&event(ToolAction::Main, (3.7, 2.1), (3.7, 2.1)), &ctx(), &mut gesture);
        assert_eq!(intents, vec![ToolIntent::Add(full(3.5, 2.0, FullStitchKind::Petite))]);
    }

    #[test]
    fn drag_within_a_cell_adds_once() {
        let tool = FullStitchTool::new(FullStitchKind::Full);
        let mut gesture = GestureState::new();
        let ctx = ctx();
        let first = tool.main(&event(ToolAction::Main, (1.2, 1.2), (1.2, 1.2)), &ctx, &mut gesture);
        let same = tool.main(&event(ToolAction::Main, (1.2, 1.2), (1.8, 1.4)), &ctx, &mut gesture);
        let next = tool.main(&event(ToolAction::Main, (1.2, 1.2), (2.1, 1.4)), &ctx, &mut gesture);
        assert_eq!(first.len(), 1);
        assert!(same.is_empty());
        assert_eq!(next, vec![ToolIntent::Add(full(2.0, 1.0, FullStitchKind::Full))]);
    }

    #[test]
    fn lock_position_keeps_first_offset() {
        let tool = FullStitchTool::new(FullStitchKind::Petite);
        let mut gesture = GestureState::new();
        let ctx = ctx();
        tool.main(&event(ToolAction::Main, (1.7, 1.2), (1.7, 1.2)), &ctx, &mut gesture);

        let mut locked = event(ToolAction::Main, (1.7, 1.2), (4.2, 1.9));
        locked.mods = Modifiers::only(Modifier::Shift);
        let intents = tool.main(&locked, &ctx, &mut gesture);
        assert_eq!(intents, vec![ToolIntent::Add(full(4.5, 1.0, FullStitchKind::Petite))]);

        // Without the modifier the pointer decides
        let free = tool.main(&event(ToolAction::Main, (1.7, 1.2), (4.2, 1.9)), &ctx, &mut gesture);
        assert_eq!(free, vec![ToolIntent::Add(full(4.0, 1.5, FullStitchKind::Petite))]);
    }

    #[test]
    fn uses_active_palette_index() {
        let tool = FullStitchTool::new(FullStitchKind::Full);
        let mut gesture = GestureState::new();
        let mut ctx = ctx();
        ctx.palindex = 7;
        let intents = tool.main(&event(ToolAction::Main, (0.5, 0.5), (0.5, 0.5)), &ctx, &mut gesture);
        assert!(matches!(intents[..], [ToolIntent::Add(stitch)] if stitch.palindex() == 7));
    }
}
