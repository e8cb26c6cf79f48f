// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Half and quarter stitch tool

use super::snap;
use super::{GestureState, Tool, ToolContext, ToolEvent, ToolIntent};
use crate::model::{PartStitch, PartStitchKind, Stitch, StitchKind};
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartStitchTool {
    kind: PartStitchKind,
}

impl PartStitchTool {
    pub fn new(kind: PartStitchKind) -> Self {
        Self { kind }
    }
}

impl Tool for PartStitchTool {
    fn kind(&self) -> StitchKind {
        self.kind.into()
    }

    /// Place a stitch on the diagonal under the pointer.
    ///
    /// When locked, the first stitch of the gesture fixes both the in-cell
    /// offset and the diagonal.
    fn main(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        let locked = match gesture.first() {
            Some(Stitch::Part(first)) if event.mods.contains(ctx.bindings.lock_position) => {
                Some(first)
            }
            _ => None,
        };

        let (position, direction) = match locked {
            Some(first) => (
                snap::align_to(event.point, Point::new(first.x, first.y)),
                first.direction,
            ),
            None => {
                let position = match self.kind {
                    PartStitchKind::Half => snap::snap_cell(event.point),
                    PartStitchKind::Quarter => snap::snap_quarter(event.point),
                };
                (position, snap::part_direction(event.point))
            }
        };

        let stitch = Stitch::Part(PartStitch {
            x: position.x,
            y: position.y,
            palindex: ctx.palindex,
            kind: self.kind,
            direction,
        });
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
    use crate::model::PartStitchDirection;
    use crate::tools::ToolAction;
    use crate::tools::test_util::{ctx, event};

    fn part(x: f64, y: f64, kind: PartStitchKind, direction: PartStitchDirection) -> Stitch {
        Stitch::Part(PartStitch {
            x,
            y,
            palindex: 0,
            kind,
            direction,
        })
    }

    #[test]
    fn half_stitch_direction_follows_pointer_quarter() {
        let tool = PartStitchTool::new(PartStitchKind::Half);
        let mut gesture = GestureState::new();
        let intents = tool.main(&event(ToolAction::Main, (2.2, 4.8), (2.2, 4.8)), &ctx(), &mut gesture);
        assert_eq!(
            intents,
            vec![ToolIntent::Add(part(2.0, 4.0, PartStitchKind::Half, PartStitchDirection::Forward))]
        );

        gesture.reset();
        let intents = tool.main(&event(ToolAction::Main, (2.8, 4.8), (2.8, 4.8)), &ctx(), &mut gesture);
        assert_eq!(
            intents,
            vec![ToolIntent::Add(part(2.0, 4.0, PartStitchKind::Half, PartStitchDirection::Backward))]
        );
    }

    #[test]
    fn quarter_stitch_snaps_to_quarter_cell() {
        let tool = PartStitchTool::new(PartStitchKind::Quarter);
        let mut gesture = GestureState::new();
        let intents = tool.main(&event(ToolAction::Main, (2.8, 4.2), (2.8, 4.2)), &ctx(), &mut gesture);
        assert_eq!(
            intents,
            vec![ToolIntent::Add(part(2.5, 4.0, PartStitchKind::Quarter, PartStitchDirection::Forward))]
        );
    }

    #[test]
    fn repeated_position_is_suppressed() {
        let tool = PartStitchTool::new(PartStitchKind::Half);
        let mut gesture = GestureState::new();
        let ctx = ctx();
        assert_eq!(
            tool.main(&event(ToolAction::Main, (1.1, 1.1), (1.1, 1.1)), &ctx, &mut gesture).len(),
            1
        );
        assert!(
            tool.main(&event(ToolAction::Main, (1.1, 1.1), (1.3, 1.2)), &ctx, &mut gesture)
                .is_empty()
        );
        // Crossing into another quarter flips the diagonal
        assert_eq!(
            tool.main(&event(ToolAction::Main, (1.1, 1.1), (1.7, 1.2)), &ctx, &mut gesture).len(),
            1
        );
    }

    #[test]
    fn lock_position_keeps_first_direction() {
        let tool = PartStitchTool::new(PartStitchKind::Quarter);
        let mut gesture = GestureState::new();
        let ctx = ctx();
        tool.main(&event(ToolAction::Main, (0.2, 0.8), (0.2, 0.8)), &ctx, &mut gesture);

        let mut locked = event(ToolAction::Main, (0.2, 0.8), (3.9, 0.9));
        locked.mods = Modifiers::only(Modifier::Shift);
        assert_eq!(
            tool.main(&locked, &ctx, &mut gesture),
            vec![ToolIntent::Add(part(3.0, 0.5, PartStitchKind::Quarter, PartStitchDirection::Forward))]
        );
    }
}
