// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Stitch rendering resources: geometry, its cache, and stitch containers

pub mod cache;
pub mod containers;
pub mod geometry;

pub use cache::GeometryCache;
pub use containers::{
    BatchedContainer, HitShape, ObjectContainer, StitchContainer, StitchInstance, StitchLayers,
    StitchObject,
};
pub use geometry::{CellGeometry, CellStitchKind, GeometryPart, PartStyle, StitchGeometry};
