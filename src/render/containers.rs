// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Stitch containers: renderables grouped by stitch family
//!
//! Every renderable carries a copy of the stitch it draws. Removal looks for
//! the first renderable whose stitch equals the argument field by field, so
//! two equal stitches are interchangeable and removing a missing one does
//! nothing.
//!
//! Cell stitches go into [`BatchedContainer`]s, which only store per-instance
//! placement and tint and are drawn from shared cached geometry. Line and
//! node stitches go into [`ObjectContainer`]s, whose entries carry their own
//! hit shape.

use super::geometry::CellStitchKind;
use crate::model::{
    LineStitch, NodeStitch, NodeStitchKind, PartStitchDirection, Stitch, StitchKind,
};
use crate::theme;
use kurbo::{Point, Rect, Size};
use peniko::Color;

// ===== Container Trait =====

/// Add and remove renderables by the value of their stitch
pub trait StitchContainer {
    type Renderable;

    /// Append a renderable; later entries draw on top
    fn add_stitch(&mut self, renderable: Self::Renderable);

    /// Remove the first renderable bound to a stitch equal to `stitch`.
    ///
    /// Returns whether anything was removed.
    fn remove_stitch(&mut self, stitch: &Stitch) -> bool;

    fn contains(&self, stitch: &Stitch) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

// ===== Batched Instances =====

/// One cell stitch in a batch
#[derive(Debug, Clone, Copy)]
pub struct StitchInstance {
    pub stitch: Stitch,
    /// Top-left of the stitch, in cells
    pub position: Point,
    pub tint: Color,
}

impl StitchInstance {
    /// Instance for a full or part stitch; `None` for other families
    pub fn new(stitch: Stitch, tint: Color) -> Option<Self> {
        let position = match stitch {
            Stitch::Full(full) => Point::new(full.x, full.y),
            Stitch::Part(part) => Point::new(part.x, part.y),
            Stitch::Line(_) | Stitch::Node(_) => return None,
        };
        Some(Self {
            stitch,
            position,
            tint,
        })
    }

    /// Which cached geometry draws this instance
    pub fn geometry_key(&self) -> (CellStitchKind, PartStitchDirection) {
        match self.stitch {
            Stitch::Full(full) => (full.kind.into(), PartStitchDirection::Forward),
            Stitch::Part(part) => (part.kind.into(), part.direction),
            // Never constructed for other families
            Stitch::Line(_) | Stitch::Node(_) => {
                (CellStitchKind::Full, PartStitchDirection::Forward)
            }
        }
    }

    /// Square the stitch covers, in cells
    pub fn bounds(&self) -> Rect {
        let (kind, _) = self.geometry_key();
        let extent = kind.extent();
        Rect::from_origin_size(self.position, (extent, extent))
    }
}

/// Densely packed cell stitches drawn from shared geometry
#[derive(Debug, Clone, Default)]
pub struct BatchedContainer {
    instances: Vec<StitchInstance>,
}

impl BatchedContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[StitchInstance] {
        &self.instances
    }

    /// Topmost stitch whose square contains `point`
    pub fn hit_test(&self, point: Point) -> Option<Stitch> {
        self.instances
            .iter()
            .rev()
            .find(|inst| inst.bounds().contains(point))
            .map(|inst| inst.stitch)
    }
}

impl StitchContainer for BatchedContainer {
    type Renderable = StitchInstance;

    fn add_stitch(&mut self, renderable: StitchInstance) {
        self.instances.push(renderable);
    }

    fn remove_stitch(&mut self, stitch: &Stitch) -> bool {
        match self.instances.iter().position(|inst| inst.stitch == *stitch) {
            Some(index) => {
                self.instances.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, stitch: &Stitch) -> bool {
        self.instances.iter().any(|inst| inst.stitch == *stitch)
    }

    fn len(&self) -> usize {
        self.instances.len()
    }

    fn clear(&mut self) {
        self.instances.clear();
    }
}

// ===== Individual Objects =====

/// Region that counts as "on" an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Thick segment
    Segment { start: Point, end: Point, half_width: f64 },
    Circle { center: Point, radius: f64 },
    Rect(Rect),
}

impl HitShape {
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        match *self {
            HitShape::Segment {
                start,
                end,
                half_width,
            } => distance_to_segment(point, start, end) <= half_width + tolerance,
            HitShape::Circle { center, radius } => point.distance(center) <= radius + tolerance,
            HitShape::Rect(rect) => rect.inflate(tolerance, tolerance).contains(point),
        }
    }
}

fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let seg = end - start;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return point.distance(start);
    }
    let t = ((point - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(start + seg * t)
}

/// A line or node stitch with its own hit shape
#[derive(Debug, Clone, Copy)]
pub struct StitchObject {
    pub stitch: Stitch,
    pub color: Color,
    pub hit: HitShape,
}

impl StitchObject {
    pub fn line(line: LineStitch, color: Color) -> Self {
        Self {
            stitch: Stitch::Line(line),
            color,
            hit: HitShape::Segment {
                start: line.start(),
                end: line.end(),
                half_width: theme::stitch::LINE_WIDTH / 2.0,
            },
        }
    }

    /// A node; `bead` is the unrotated bead size in cells
    pub fn node(node: NodeStitch, color: Color, bead: Size) -> Self {
        let center = Point::new(node.x, node.y);
        let hit = match node.kind {
            NodeStitchKind::FrenchKnot => HitShape::Circle {
                center,
                radius: theme::stitch::FRENCH_KNOT_RADIUS,
            },
            NodeStitchKind::Bead => {
                let size = if node.rotated {
                    Size::new(bead.height, bead.width)
                } else {
                    bead
                };
                HitShape::Rect(Rect::from_center_size(center, size))
            }
        };
        Self {
            stitch: Stitch::Node(node),
            color,
            hit,
        }
    }
}

/// Individually hit-testable stitches
#[derive(Debug, Clone, Default)]
pub struct ObjectContainer {
    objects: Vec<StitchObject>,
}

impl ObjectContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[StitchObject] {
        &self.objects
    }

    /// Topmost stitch under `point`
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<Stitch> {
        self.objects
            .iter()
            .rev()
            .find(|obj| obj.hit.contains(point, tolerance))
            .map(|obj| obj.stitch)
    }
}

impl StitchContainer for ObjectContainer {
    type Renderable = StitchObject;

    fn add_stitch(&mut self, renderable: StitchObject) {
        self.objects.push(renderable);
    }

    fn remove_stitch(&mut self, stitch: &Stitch) -> bool {
        match self.objects.iter().position(|obj| obj.stitch == *stitch) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, stitch: &Stitch) -> bool {
        self.objects.iter().any(|obj| obj.stitch == *stitch)
    }

    fn len(&self) -> usize {
        self.objects.len()
    }

    fn clear(&mut self) {
        self.objects.clear();
    }
}

// ===== Layers =====

/// All containers of a view, in paint order
#[derive(Debug, Clone, Default)]
pub struct StitchLayers {
    pub full: BatchedContainer,
    pub part: BatchedContainer,
    pub line: ObjectContainer,
    pub node: ObjectContainer,
}

impl StitchLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stitch to its family's container.
    ///
    /// `bead` is only read for beads.
    pub fn add(&mut self, stitch: Stitch, color: Color, bead: Size) {
        match stitch {
            Stitch::Full(_) | Stitch::Part(_) => {
                if let Some(instance) = StitchInstance::new(stitch, color) {
                    self.batch_for(stitch).add_stitch(instance);
                }
            }
            Stitch::Line(line) => self.line.add_stitch(StitchObject::line(line, color)),
            Stitch::Node(node) => self.node.add_stitch(StitchObject::node(node, color, bead)),
        }
    }

    pub fn remove(&mut self, stitch: &Stitch) -> bool {
        match stitch {
            Stitch::Full(_) => self.full.remove_stitch(stitch),
            Stitch::Part(_) => self.part.remove_stitch(stitch),
            Stitch::Line(_) => self.line.remove_stitch(stitch),
            Stitch::Node(_) => self.node.remove_stitch(stitch),
        }
    }

    pub fn contains(&self, stitch: &Stitch) -> bool {
        match stitch {
            Stitch::Full(_) => self.full.contains(stitch),
            Stitch::Part(_) => self.part.contains(stitch),
            Stitch::Line(_) => self.line.contains(stitch),
            Stitch::Node(_) => self.node.contains(stitch),
        }
    }

    /// Topmost stitch under `point`, in reverse paint order.
    ///
    /// `tolerance` widens line and node hit shapes only; cell stitches are hit
    /// inside their own square so neighbouring cells never compete.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<Stitch> {
        self.node
            .hit_test(point, tolerance)
            .or_else(|| self.line.hit_test(point, tolerance))
            .or_else(|| self.part.hit_test(point))
            .or_else(|| self.full.hit_test(point))
    }

    pub fn len(&self) -> usize {
        self.full.len() + self.part.len() + self.line.len() + self.node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stitches of one kind
    pub fn count(&self, kind: StitchKind) -> usize {
        let full = self.full.instances().iter().map(|inst| inst.stitch);
        let part = self.part.instances().iter().map(|inst| inst.stitch);
        let line = self.line.objects().iter().map(|obj| obj.stitch);
        let node = self.node.objects().iter().map(|obj| obj.stitch);
        full.chain(part)
            .chain(line)
            .chain(node)
            .filter(|stitch| stitch.kind() == kind)
            .count()
    }

    pub fn clear(&mut self) {
        self.full.clear();
        self.part.clear();
        self.line.clear();
        self.node.clear();
    }

    fn batch_for(&mut self, stitch: Stitch) -> &mut BatchedContainer {
        match stitch {
            Stitch::Part(_) => &mut self.part,
            _ => &mut self.full,
        }
    }
}
