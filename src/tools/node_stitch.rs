// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! French knot and bead tool: preview while dragging, place on release

use super::snap;
use super::{GestureState, Tool, ToolContext, ToolEvent, ToolIntent};
use crate::model::{NodeStitch, NodeStitchKind, Stitch, StitchKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStitchTool {
    kind: NodeStitchKind,
}

impl NodeStitchTool {
    pub fn new(kind: NodeStitchKind) -> Self {
        Self { kind }
    }

    fn node(&self, event: &ToolEvent, ctx: &ToolContext) -> Stitch {
        let position = snap::snap_half(event.point);
        Stitch::Node(NodeStitch {
            x: position.x,
            y: position.y,
            palindex: ctx.palindex,
            kind: self.kind,
            rotated: event.mods.contains(ctx.bindings.rotate_node),
        })
    }
}

impl Tool for NodeStitchTool {
    fn kind(&self) -> StitchKind {
        self.kind.into()
    }

    fn main(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        _gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        vec![ToolIntent::Hint(self.node(event, ctx))]
    }

    fn release(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        _gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        vec![ToolIntent::ClearHint, ToolIntent::Add(self.node(event, ctx))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Modifier, Modifiers};
    use crate::tools::ToolAction;
    use crate::tools::test_util::{ctx, event};

    fn node(x: f64, y: f64, kind: NodeStitchKind, rotated: bool) -> Stitch {
        Stitch::Node(NodeStitch {
            x,
            y,
            palindex: 0,
            kind,
            rotated,
        })
    }

    #[test]
    fn previews_then_commits_at_release_point() {
        let tool = NodeStitchTool::new(NodeStitchKind::FrenchKnot);
        let mut gesture = GestureState::new();
        let ctx = ctx();

        let hint = tool.main(&event(ToolAction::Main, (1.0, 1.0), (3.3, 2.9)), &ctx, &mut gesture);
        assert_eq!(
            hint,
            vec![ToolIntent::Hint(node(3.5, 3.0, NodeStitchKind::FrenchKnot, false))]
        );

        let commit = tool.release(&event(ToolAction::Release, (1.0, 1.0), (4.1, 2.9)), &ctx, &mut gesture);
        assert_eq!(
            commit,
            vec![
                ToolIntent::ClearHint,
                ToolIntent::Add(node(4.0, 3.0, NodeStitchKind::FrenchKnot, false))
            ]
        );
    }

    #[test]
    fn rotate_modifier_rotates_bead() {
        let tool = NodeStitchTool::new(NodeStitchKind::Bead);
        let mut gesture = GestureState::new();
        let mut release = event(ToolAction::Release, (2.5, 2.5), (2.5, 2.5));
        release.mods = Modifiers::only(Modifier::Alt);
        assert_eq!(
            tool.release(&release, &ctx(), &mut gesture),
            vec![
                ToolIntent::ClearHint,
                ToolIntent::Add(node(2.5, 2.5, NodeStitchKind::Bead, true))
            ]
        );
    }
}
