// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Coordinate snapping: where each stitch kind may sit for a raw world point

use crate::model::PartStitchDirection;
use kurbo::Point;

/// Offset of `v` inside its cell, in `[0, 1)`
fn fract(v: f64) -> f64 {
    v - v.floor()
}

/// Enclosing cell (full and half stitches)
pub fn snap_cell(point: Point) -> Point {
    Point::new(point.x.floor(), point.y.floor())
}

/// Top-left corner of the enclosing quarter cell (petite and quarter stitches)
pub fn snap_quarter(point: Point) -> Point {
    let axis = |v: f64| {
        if fract(v) > 0.5 {
            v.floor() + 0.5
        } else {
            v.floor()
        }
    };
    Point::new(axis(point.x), axis(point.y))
}

/// Nearest cell corner for back stitch endpoints.
///
/// Each axis must be within `tolerance` of a corner. Anything in the middle
/// band `(tolerance, 1 - tolerance)` is ambiguous and yields `None`.
pub fn snap_corner(point: Point, tolerance: f64) -> Option<Point> {
    let axis = |v: f64| {
        let frac = fract(v);
        if frac <= tolerance {
            Some(v.floor())
        } else if frac >= 1.0 - tolerance {
            Some(v.floor() + 1.0)
        } else {
            None
        }
    };
    Some(Point::new(axis(point.x)?, axis(point.y)?))
}

/// Corner, half cell, or next corner on each axis (straight stitches and nodes).
///
/// Offsets up to 0.25 stay on the corner, up to 0.5 go to the half cell,
/// and beyond 0.5 go to the next corner.
pub fn snap_half(point: Point) -> Point {
    let axis = |v: f64| {
        let frac = fract(v);
        if frac > 0.5 {
            v.floor() + 1.0
        } else if frac > 0.25 {
            v.floor() + 0.5
        } else {
            v.floor()
        }
    };
    Point::new(axis(point.x), axis(point.y))
}

/// Which diagonal of its quarter cell a part stitch at `point` occupies.
///
/// The bottom-left and top-right quarters lie on the `/` diagonal.
pub fn part_direction(point: Point) -> PartStitchDirection {
    let (fx, fy) = (fract(point.x), fract(point.y));
    if (fx < 0.5 && fy > 0.5) || (fx > 0.5 && fy < 0.5) {
        PartStitchDirection::Forward
    } else {
        PartStitchDirection::Backward
    }
}

/// `point`'s cell, shifted by `anchor`'s offset inside its own cell
pub fn align_to(point: Point, anchor: Point) -> Point {
    Point::new(
        point.x.floor() + fract(anchor.x),
        point.y.floor() + fract(anchor.y),
    )
}
