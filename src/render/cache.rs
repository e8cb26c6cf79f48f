// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Memoized stitch geometry
//!
//! Entries are built on first request and kept until the cache is destroyed
//! with its view. Switching display mode only adds entries; the other modes
//! stay cached so toggling back is free.

use super::geometry::{
    CellGeometry, CellStitchKind, StitchGeometry, bead_size_in_cells, cell_geometry, node_geometry,
};
use crate::model::{BeadDims, DisplayMode, NodeStitchKind};
use std::collections::HashMap;
use std::sync::Arc;

/// Node entries are keyed by the exact bead size, compared bitwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey {
    kind: NodeStitchKind,
    length_bits: u64,
    diameter_bits: u64,
}

impl NodeKey {
    fn new(kind: NodeStitchKind, dims: BeadDims) -> Self {
        match kind {
            // Knots have one shape whatever the palette says
            NodeStitchKind::FrenchKnot => Self {
                kind,
                length_bits: 0,
                diameter_bits: 0,
            },
            NodeStitchKind::Bead => Self {
                kind,
                length_bits: dims.length.to_bits(),
                diameter_bits: dims.diameter.to_bits(),
            },
        }
    }
}

/// Per-view geometry cache
#[derive(Debug, Default)]
pub struct GeometryCache {
    /// Physical cell size of the fabric, for converting bead sizes
    cell_size_mm: (f64, f64),
    cells: HashMap<(CellStitchKind, DisplayMode), Arc<CellGeometry>>,
    nodes: HashMap<NodeKey, Arc<StitchGeometry>>,
}

impl GeometryCache {
    pub fn new(cell_size_mm: (f64, f64)) -> Self {
        Self {
            cell_size_mm,
            cells: HashMap::new(),
            nodes: HashMap::new(),
        }
    }

    /// Geometry for a cell stitch kind in a display mode
    pub fn get_stitch(&mut self, kind: CellStitchKind, mode: DisplayMode) -> Arc<CellGeometry> {
        self.cells
            .entry((kind, mode))
            .or_insert_with(|| {
                tracing::debug!("Building {:?} geometry for {:?} mode", kind, mode);
                Arc::new(cell_geometry(kind, mode))
            })
            .clone()
    }

    /// Geometry for a node kind with the given bead size in millimetres
    pub fn get_node(&mut self, kind: NodeStitchKind, dims: BeadDims) -> Arc<StitchGeometry> {
        let cell_size_mm = self.cell_size_mm;
        self.nodes
            .entry(NodeKey::new(kind, dims))
            .or_insert_with(|| {
                tracing::debug!("Building {:?} geometry for {:?}", kind, dims);
                Arc::new(node_geometry(kind, bead_size_in_cells(dims, cell_size_mm)))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.cells.len() + self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every entry. Geometry handed out earlier stays valid for as
    /// long as its holders keep it.
    pub fn destroy(&mut self) {
        tracing::debug!("Releasing {} cached geometries", self.len());
        self.cells.clear();
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> GeometryCache {
        let cell = 25.4 / 14.0;
        GeometryCache::new((cell, cell))
    }

    #[test]
    fn repeated_requests_share_one_entry() {
        let mut cache = cache();
        let a = cache.get_stitch(CellStitchKind::Full, DisplayMode::Mixed);
        let b = cache.get_stitch(CellStitchKind::Full, DisplayMode::Mixed);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn mode_switch_keeps_other_modes() {
        let mut cache = cache();
        let solid = cache.get_stitch(CellStitchKind::Half, DisplayMode::Solid);
        let stitches = cache.get_stitch(CellStitchKind::Half, DisplayMode::Stitches);
        assert!(!Arc::ptr_eq(&solid, &stitches));
        assert_eq!(cache.len(), 2);

        // Toggling back hits the original entry
        let again = cache.get_stitch(CellStitchKind::Half, DisplayMode::Solid);
        assert!(Arc::ptr_eq(&solid, &again));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn beads_are_keyed_by_size() {
        let mut cache = cache();
        let small = BeadDims {
            length: 1.5,
            diameter: 2.5,
        };
        let large = BeadDims {
            length: 3.0,
            diameter: 2.5,
        };
        let a = cache.get_node(NodeStitchKind::Bead, small);
        let b = cache.get_node(NodeStitchKind::Bead, large);
        let c = cache.get_node(NodeStitchKind::Bead, small);
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));
        assert!(b.extent().height() > a.extent().height());
    }

    #[test]
    fn french_knots_ignore_bead_size() {
        let mut cache = cache();
        let a = cache.get_node(NodeStitchKind::FrenchKnot, BeadDims::default());
        let b = cache.get_node(
            NodeStitchKind::FrenchKnot,
            BeadDims {
                length: 9.0,
                diameter: 9.0,
            },
        );
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut cache = cache();
        let held = cache.get_stitch(CellStitchKind::Petite, DisplayMode::Solid);
        cache.get_node(NodeStitchKind::Bead, BeadDims::default());
        cache.destroy();
        assert!(cache.is_empty());

        // Outstanding handles survive and new requests rebuild
        assert!(!held.for_direction(crate::model::PartStitchDirection::Forward).parts().is_empty());
        let rebuilt = cache.get_stitch(CellStitchKind::Petite, DisplayMode::Solid);
        assert!(!Arc::ptr_eq(&held, &rebuilt));
        assert_eq!(*held, *rebuilt);
    }
}
