// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Stitch tools: turn world-space pointer events into stitch intents
//!
//! There is one tool per stitch kind. A tool snaps the pointer to the
//! coordinates its kind may occupy and answers with [`ToolIntent`]s: add or
//! remove a stitch, show or clear a preview. Tools hold no gesture state of
//! their own; the caller threads a [`GestureState`] through every event of a
//! press and the tool reads and updates it.

use crate::editing::Modifiers;
use crate::model::{
    FullStitch, FullStitchKind, LineStitchKind, NodeStitchKind, PartStitch, PartStitchKind,
    Stitch, StitchKind,
};
use crate::settings::{CanvasSettings, ModifierBindings};
use kurbo::Point;

// ===== Tool Events =====

/// What the pointer asked the tool to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolAction {
    /// Draw (press or drag)
    Main,
    /// Erase (press or drag)
    Anti,
    /// The press ended
    Release,
}

/// A pointer event in world coordinates, addressed to the active tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolEvent {
    pub action: ToolAction,
    /// Where the press began
    pub start: Point,
    /// Where the pointer is now
    pub point: Point,
    pub mods: Modifiers,
    /// Stitch whose renderable is directly under the pointer, if any
    pub target: Option<Stitch>,
}

/// What the tool wants done
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolIntent {
    /// Place a stitch
    Add(Stitch),
    /// Remove a stitch; a no-op when it does not exist
    Remove(Stitch),
    /// Show a preview of an uncommitted stitch
    Hint(Stitch),
    /// Drop the preview
    ClearHint,
}

/// Inputs the tools read besides the event itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolContext {
    /// Palette index for new stitches
    pub palindex: u32,
    pub bindings: ModifierBindings,
    pub back_stitch_tolerance: f64,
}

impl ToolContext {
    pub fn new(palindex: u32, settings: &CanvasSettings) -> Self {
        Self {
            palindex,
            bindings: settings.modifiers,
            back_stitch_tolerance: settings.back_stitch_tolerance,
        }
    }
}

// ===== Tool Trait =====

/// A stitch tool
pub trait Tool {
    /// The stitch kind this tool places
    fn kind(&self) -> StitchKind;

    /// Handle a draw press or drag
    fn main(&self, event: &ToolEvent, ctx: &ToolContext, gesture: &mut GestureState)
    -> Vec<ToolIntent>;

    /// Handle the end of a press. The caller resets the gesture afterwards.
    fn release(
        &self,
        _event: &ToolEvent,
        _ctx: &ToolContext,
        _gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        Vec::new()
    }
}

/// Erase under the pointer.
///
/// A stitch whose renderable is under the pointer is removed exactly.
/// Otherwise every point-occupying kind is probed at the snapped coordinate
/// with the active palette index; probes that match nothing are no-ops.
pub fn anti_action(event: &ToolEvent, ctx: &ToolContext) -> Vec<ToolIntent> {
    if let Some(target) = event.target {
        return vec![ToolIntent::Remove(target)];
    }

    let point = event.point;
    let cell = snap::snap_cell(point);
    let quarter = snap::snap_quarter(point);
    let direction = snap::part_direction(point);
    let palindex = ctx.palindex;

    vec![
        ToolIntent::Remove(Stitch::Full(FullStitch {
            x: cell.x,
            y: cell.y,
            palindex,
            kind: FullStitchKind::Full,
        })),
        ToolIntent::Remove(Stitch::Full(FullStitch {
            x: quarter.x,
            y: quarter.y,
            palindex,
            kind: FullStitchKind::Petite,
        })),
        ToolIntent::Remove(Stitch::Part(PartStitch {
            x: cell.x,
            y: cell.y,
            palindex,
            kind: PartStitchKind::Half,
            direction,
        })),
        ToolIntent::Remove(Stitch::Part(PartStitch {
            x: quarter.x,
            y: quarter.y,
            palindex,
            kind: PartStitchKind::Quarter,
            direction,
        })),
    ]
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolBox {
    Full(full_stitch::FullStitchTool),
    Part(part_stitch::PartStitchTool),
    Line(line_stitch::LineStitchTool),
    Node(node_stitch::NodeStitchTool),
}

impl Default for ToolBox {
    fn default() -> Self {
        ToolBox::for_kind(StitchKind::Full)
    }
}

impl ToolBox {
    /// Create the tool for a stitch kind
    pub fn for_kind(kind: StitchKind) -> Self {
        match kind {
            StitchKind::Full => ToolBox::Full(full_stitch::FullStitchTool::new(FullStitchKind::Full)),
            StitchKind::Petite => {
                ToolBox::Full(full_stitch::FullStitchTool::new(FullStitchKind::Petite))
            }
            StitchKind::Half => ToolBox::Part(part_stitch::PartStitchTool::new(PartStitchKind::Half)),
            StitchKind::Quarter => {
                ToolBox::Part(part_stitch::PartStitchTool::new(PartStitchKind::Quarter))
            }
            StitchKind::Back => ToolBox::Line(line_stitch::LineStitchTool::new(LineStitchKind::Back)),
            StitchKind::Straight => {
                ToolBox::Line(line_stitch::LineStitchTool::new(LineStitchKind::Straight))
            }
            StitchKind::FrenchKnot => {
                ToolBox::Node(node_stitch::NodeStitchTool::new(NodeStitchKind::FrenchKnot))
            }
            StitchKind::Bead => ToolBox::Node(node_stitch::NodeStitchTool::new(NodeStitchKind::Bead)),
        }
    }

    pub fn kind(&self) -> StitchKind {
        match self {
            ToolBox::Full(tool) => tool.kind(),
            ToolBox::Part(tool) => tool.kind(),
            ToolBox::Line(tool) => tool.kind(),
            ToolBox::Node(tool) => tool.kind(),
        }
    }

    /// Route an event to the tool.
    ///
    /// Release always leaves `gesture` reset, so the next press starts a new
    /// chain.
    pub fn handle(
        &self,
        event: &ToolEvent,
        ctx: &ToolContext,
        gesture: &mut GestureState,
    ) -> Vec<ToolIntent> {
        match event.action {
            ToolAction::Main => match self {
                ToolBox::Full(tool) => tool.main(event, ctx, gesture),
                ToolBox::Part(tool) => tool.main(event, ctx, gesture),
                ToolBox::Line(tool) => tool.main(event, ctx, gesture),
                ToolBox::Node(tool) => tool.main(event, ctx, gesture),
            },
            ToolAction::Anti => anti_action(event, ctx),
            ToolAction::Release => {
                let intents = match self {
                    ToolBox::Full(tool) => tool.release(event, ctx, gesture),
                    ToolBox::Part(tool) => tool.release(event, ctx, gesture),
                    ToolBox::Line(tool) => tool.release(event, ctx, gesture),
                    ToolBox::Node(tool) => tool.release(event, ctx, gesture),
                };
                gesture.reset();
                intents
            }
        }
    }
}

// ===== Tool Modules =====

pub mod full_stitch;
pub mod gesture;
pub mod line_stitch;
pub mod node_stitch;
pub mod part_stitch;
pub mod snap;

pub use gesture::GestureState;
