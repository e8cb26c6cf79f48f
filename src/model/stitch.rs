// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Stitch records
//!
//! A stitch is a plain value. Two stitches with equal fields are the same
//! stitch as far as every container and tool is concerned; nothing in this
//! crate compares stitches by identity.
//!
//! Coordinates are grid units. Full and part stitches sit on whole or half
//! cells, line endpoints and nodes may also sit on half cells.

use crate::error::CanvasError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ===== Kind Enums =====

/// Kinds of the full-stitch family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FullStitchKind {
    /// Covers the whole cell
    Full,
    /// Covers a quarter of the cell
    Petite,
}

/// Kinds of the part-stitch family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartStitchKind {
    /// One diagonal across the whole cell
    Half,
    /// One diagonal across a quarter of the cell
    Quarter,
}

/// Which diagonal a part stitch occupies
///
/// With y growing downwards, `Forward` is `/` and `Backward` is `\`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartStitchDirection {
    Forward,
    Backward,
}

/// Kinds of the line-stitch family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStitchKind {
    /// Single cell edge or diagonal between corners
    Back,
    /// Arbitrary segment between half-cell points
    Straight,
}

/// Kinds of the node-stitch family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStitchKind {
    FrenchKnot,
    Bead,
}

/// Flat list of every stitch kind, one per tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StitchKind {
    Full,
    Petite,
    Half,
    Quarter,
    Back,
    Straight,
    FrenchKnot,
    Bead,
}

impl StitchKind {
    /// Every kind, in toolbar order
    pub const ALL: [StitchKind; 8] = [
        StitchKind::Full,
        StitchKind::Petite,
        StitchKind::Half,
        StitchKind::Quarter,
        StitchKind::Back,
        StitchKind::Straight,
        StitchKind::FrenchKnot,
        StitchKind::Bead,
    ];

    /// The kebab-case name used in settings and by hosts
    pub fn name(self) -> &'static str {
        match self {
            StitchKind::Full => "full",
            StitchKind::Petite => "petite",
            StitchKind::Half => "half",
            StitchKind::Quarter => "quarter",
            StitchKind::Back => "back",
            StitchKind::Straight => "straight",
            StitchKind::FrenchKnot => "french-knot",
            StitchKind::Bead => "bead",
        }
    }
}

impl fmt::Display for StitchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StitchKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StitchKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| CanvasError::UnknownStitchKind(s.to_string()))
    }
}

impl From<FullStitchKind> for StitchKind {
    fn from(kind: FullStitchKind) -> Self {
        match kind {
            FullStitchKind::Full => StitchKind::Full,
            FullStitchKind::Petite => StitchKind::Petite,
        }
    }
}

impl From<PartStitchKind> for StitchKind {
    fn from(kind: PartStitchKind) -> Self {
        match kind {
            PartStitchKind::Half => StitchKind::Half,
            PartStitchKind::Quarter => StitchKind::Quarter,
        }
    }
}

impl From<LineStitchKind> for StitchKind {
    fn from(kind: LineStitchKind) -> Self {
        match kind {
            LineStitchKind::Back => StitchKind::Back,
            LineStitchKind::Straight => StitchKind::Straight,
        }
    }
}

impl From<NodeStitchKind> for StitchKind {
    fn from(kind: NodeStitchKind) -> Self {
        match kind {
            NodeStitchKind::FrenchKnot => StitchKind::FrenchKnot,
            NodeStitchKind::Bead => StitchKind::Bead,
        }
    }
}

// ===== Stitch Records =====

/// A full or petite stitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullStitch {
    pub x: f64,
    pub y: f64,
    pub palindex: u32,
    pub kind: FullStitchKind,
}

/// A half or quarter stitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartStitch {
    pub x: f64,
    pub y: f64,
    pub palindex: u32,
    pub kind: PartStitchKind,
    pub direction: PartStitchDirection,
}

/// A back or straight stitch from `(x[0], y[0])` to `(x[1], y[1])`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStitch {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub palindex: u32,
    pub kind: LineStitchKind,
}

impl LineStitch {
    /// Build a line between two points
    pub fn new(start: Point, end: Point, palindex: u32, kind: LineStitchKind) -> Self {
        Self {
            x: [start.x, end.x],
            y: [start.y, end.y],
            palindex,
            kind,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x[0], self.y[0])
    }

    pub fn end(&self) -> Point {
        Point::new(self.x[1], self.y[1])
    }

    /// Euclidean length in grid units
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    /// True when both endpoints coincide
    pub fn is_degenerate(&self) -> bool {
        self.start() == self.end()
    }

    /// Put the endpoints in canonical order: smaller `y` first, then smaller `x`.
    ///
    /// A line dragged in either direction normalizes to the same value.
    pub fn normalized(self) -> Self {
        let (start, end) = (self.start(), self.end());
        let order = start
            .y
            .partial_cmp(&end.y)
            .unwrap_or(Ordering::Equal)
            .then(start.x.partial_cmp(&end.x).unwrap_or(Ordering::Equal));
        if order == Ordering::Greater {
            Self::new(end, start, self.palindex, self.kind)
        } else {
            self
        }
    }
}

/// A French knot or bead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeStitch {
    pub x: f64,
    pub y: f64,
    pub palindex: u32,
    pub kind: NodeStitchKind,
    #[serde(default)]
    pub rotated: bool,
}

// ===== Stitch =====

/// Any placed stitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stitch {
    Full(FullStitch),
    Part(PartStitch),
    Line(LineStitch),
    Node(NodeStitch),
}

impl Stitch {
    pub fn kind(&self) -> StitchKind {
        match self {
            Stitch::Full(stitch) => stitch.kind.into(),
            Stitch::Part(stitch) => stitch.kind.into(),
            Stitch::Line(stitch) => stitch.kind.into(),
            Stitch::Node(stitch) => stitch.kind.into(),
        }
    }

    pub fn palindex(&self) -> u32 {
        match self {
            Stitch::Full(stitch) => stitch.palindex,
            Stitch::Part(stitch) => stitch.palindex,
            Stitch::Line(stitch) => stitch.palindex,
            Stitch::Node(stitch) => stitch.palindex,
        }
    }
}

impl From<FullStitch> for Stitch {
    fn from(stitch: FullStitch) -> Self {
        Stitch::Full(stitch)
    }
}

impl From<PartStitch> for Stitch {
    fn from(stitch: PartStitch) -> Self {
        Stitch::Part(stitch)
    }
}

impl From<LineStitch> for Stitch {
    fn from(stitch: LineStitch) -> Self {
        Stitch::Line(stitch)
    }
}

impl From<NodeStitch> for Stitch {
    fn from(stitch: NodeStitch) -> Self {
        Stitch::Node(stitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_fields_mean_equal_stitches() {
        let a = Stitch::Full(FullStitch {
            x: 3.0,
            y: 2.0,
            palindex: 0,
            kind: FullStitchKind::Full,
        });
        let b = Stitch::Full(FullStitch {
            x: 3.0,
            y: 2.0,
            palindex: 0,
            kind: FullStitchKind::Full,
        });
        assert_eq!(a, b);

        let other_color = Stitch::Full(FullStitch {
            x: 3.0,
            y: 2.0,
            palindex: 1,
            kind: FullStitchKind::Full,
        });
        assert_ne!(a, other_color);
    }

    #[test]
    fn normalized_orders_by_y_then_x() {
        let line = LineStitch::new(
            Point::new(5.0, 5.0),
            Point::new(2.0, 2.0),
            0,
            LineStitchKind::Straight,
        );
        let normalized = line.normalized();
        assert_eq!(normalized.x, [2.0, 5.0]);
        assert_eq!(normalized.y, [2.0, 5.0]);

        // Same row: smaller x goes first
        let row = LineStitch::new(
            Point::new(4.0, 1.0),
            Point::new(1.5, 1.0),
            0,
            LineStitchKind::Straight,
        );
        assert_eq!(row.normalized().x, [1.5, 4.0]);

        // Already ordered lines are untouched
        assert_eq!(normalized.normalized(), normalized);
    }

    #[test]
    fn kind_names_round_trip_through_from_str() {
        for kind in StitchKind::ALL {
            assert_eq!(kind.name().parse::<StitchKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_name_is_an_error() {
        let err = "cross".parse::<StitchKind>().unwrap_err();
        assert!(matches!(err, CanvasError::UnknownStitchKind(name) if name == "cross"));
    }

    #[test]
    fn stitch_reports_flat_kind() {
        let node = Stitch::Node(NodeStitch {
            x: 1.5,
            y: 1.0,
            palindex: 2,
            kind: NodeStitchKind::Bead,
            rotated: true,
        });
        assert_eq!(node.kind(), StitchKind::Bead);
        assert_eq!(node.palindex(), 2);
    }

    #[test]
    fn node_rotation_defaults_to_false() {
        let node: NodeStitch =
            serde_json::from_str(r#"{"x":1,"y":2,"palindex":0,"kind":"french-knot"}"#).unwrap();
        assert!(!node.rotated);
        assert_eq!(node.kind, NodeStitchKind::FrenchKnot);
    }
}
