// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ragged Geometry: axis-aligned primitives for the ragged-text layout engine.
//!
//! The layout algorithms in this workspace only ever move rectangles around on
//! two axes: inflate by a uniform padding, translate by a vector, test for
//! horizontal/vertical overlap, and union two rectangles together. This crate
//! collects those operations in one place, built on top of [`kurbo`]'s
//! [`Rect`], [`Point`] and [`Vec2`] so every downstream crate shares one
//! notion of "a rectangle".
//!
//! `addVector` in the source material mutates its argument in one file and
//! returns a new value in another; we treat it as pure everywhere (see
//! [`translate`]) since every call site in the original is consistent with
//! that reading.

#![no_std]

use kurbo::{Point, Rect, Vec2};

/// Re-exported so downstream crates need only depend on `ragged_geometry`.
pub use kurbo::{Point as GeomPoint, Rect as GeomRect, Vec2 as GeomVec2};

/// Pure vector addition: `p + v`. Never mutates `p`.
#[inline]
#[must_use]
pub fn add_vector(p: Point, v: Vec2) -> Point {
    Point::new(p.x + v.x, p.y + v.y)
}

/// Translate a rectangle by a vector, returning a new rectangle.
#[inline]
#[must_use]
pub fn translate(rect: Rect, v: Vec2) -> Rect {
    Rect::new(rect.x0 + v.x, rect.y0 + v.y, rect.x1 + v.x, rect.y1 + v.y)
}

/// Grow a rectangle by `padding` units on every side. Negative padding
/// shrinks it; the result may become degenerate (zero or negative area) but
/// is never rejected, matching the "zero-area rectangles are valid" rule.
#[inline]
#[must_use]
pub fn inflate(rect: Rect, padding: f64) -> Rect {
    Rect::new(
        rect.x0 - padding,
        rect.y0 - padding,
        rect.x1 + padding,
        rect.y1 + padding,
    )
}

/// Whether two rectangles have non-empty horizontal overlap (interiors, not
/// just touching edges).
#[inline]
#[must_use]
pub fn overlaps_horizontally(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1
}

/// Whether two rectangles have non-empty vertical overlap.
#[inline]
#[must_use]
pub fn overlaps_vertically(a: Rect, b: Rect) -> bool {
    a.y0 < b.y1 && b.y0 < a.y1
}

/// Smallest rectangle containing both `a` and `b`.
#[inline]
#[must_use]
pub fn union(a: Rect, b: Rect) -> Rect {
    a.union(b)
}

/// The vector that carries the origin of a line to its lead-out point, i.e.
/// the point at which the next sibling on the same line should begin.
#[inline]
#[must_use]
pub fn lead_out(origin: Point, advance: Vec2) -> Point {
    add_vector(origin, advance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflate_grows_all_sides() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let grown = inflate(r, 2.0);
        assert_eq!(grown, Rect::new(-2.0, -2.0, 12.0, 12.0));
    }

    #[test]
    fn translate_is_pure() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let moved = translate(r, Vec2::new(5.0, 0.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(moved, Rect::new(5.0, 0.0, 15.0, 10.0));
    }

    #[test]
    fn horizontal_overlap_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!overlaps_horizontally(a, b));
        let c = Rect::new(9.0, 0.0, 20.0, 10.0);
        assert!(overlaps_horizontally(a, c));
    }
}
