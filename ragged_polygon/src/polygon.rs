// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Polygon`]: a list of rectilinear [`Path`]s (an outer boundary plus any
//! holes), and point-in-polygon over the whole set.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::path::{rect_path_intersection_area, Path};

/// A rectilinear polygon: a list of paths. Multiple disjoint rectangle
/// groups produce multiple top-level paths; interior holes produce
/// additional paths within the same polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon(pub Vec<Path>);

impl Polygon {
    /// An empty polygon (no paths).
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Whether `p` lies inside the filled region, summing crossings over
    /// all paths (even-odd rule). A point exactly on any path's edge is
    /// inclusive-true.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        const EPS: f64 = 1e-9;
        if self.0.iter().any(|path| path.on_edge(p, EPS)) {
            return true;
        }
        let crossings: u32 = self
            .0
            .iter()
            .map(|path| {
                path.edges()
                    .filter(|(a, b)| {
                        (a.x - b.x).abs() <= EPS
                            && a.x > p.x + EPS
                            && p.y >= a.y.min(b.y)
                            && p.y < a.y.max(b.y)
                    })
                    .count() as u32
            })
            .sum();
        crossings % 2 == 1
    }

    /// Total signed area of `rect`'s intersection with this polygon's
    /// filled region (sum over all paths; hole paths subtract).
    #[must_use]
    pub fn rect_intersection_area(&self, rect: Rect) -> f64 {
        self.0.iter().map(|p| rect_path_intersection_area(rect, p)).sum()
    }

    /// Whether `rect` is fully contained in this polygon (its intersection
    /// area equals its own area, within `eps`).
    #[must_use]
    pub fn contains_rect(&self, rect: Rect, eps: f64) -> bool {
        (self.rect_intersection_area(rect) - rect.area()).abs() < eps
    }

    /// Whether `rect` intersects this polygon's filled region at all
    /// (intersection area exceeds `eps`).
    #[must_use]
    pub fn intersects_rect(&self, rect: Rect, eps: f64) -> bool {
        self.rect_intersection_area(rect) > eps
    }

    /// The smallest rectangle containing every vertex of every path, or
    /// `None` for an empty polygon.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut it = self.0.iter().flat_map(|p| p.0.iter().copied());
        let first = it.next()?;
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in it {
            r = r.union_pt(p);
        }
        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectunion::from_rectangles;

    #[test]
    fn point_inside_ring_hole_is_outside_polygon() {
        let top = Rect::new(0.0, 0.0, 50.0, 10.0);
        let bottom = Rect::new(0.0, 40.0, 50.0, 50.0);
        let left = Rect::new(0.0, 10.0, 10.0, 40.0);
        let right = Rect::new(40.0, 10.0, 50.0, 40.0);
        let poly = from_rectangles(&[top, bottom, left, right]);
        assert!(!poly.contains_point(Point::new(25.0, 25.0)));
        assert!(poly.contains_point(Point::new(5.0, 25.0)));
    }
}
