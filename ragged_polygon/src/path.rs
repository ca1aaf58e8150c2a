// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Path`]: an ordered, implicitly-closed list of points forming a
//! rectilinear (axis-aligned-edges-only) contour, plus the point-in-path
//! and rectangle-intersection-area queries over it.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A rectilinear, implicitly-closed contour: every consecutive pair of
/// points (including the wraparound pair) forms an axis-aligned edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path(pub Vec<Point>);

/// A non-axis-aligned segment was passed where a rectilinear one was
/// required. This is a caller bug: it never occurs on output of this
/// crate's own union/offset/simplify functions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NonAxisAlignedSegment;

impl Path {
    /// Build a path from points, asserting every implied edge is
    /// axis-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`NonAxisAlignedSegment`] if any edge (including the closing
    /// edge) is diagonal.
    pub fn new_rectilinear(points: Vec<Point>) -> Result<Self, NonAxisAlignedSegment> {
        let n = points.len();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            if (a.x - b.x).abs() > 1e-9 && (a.y - b.y).abs() > 1e-9 {
                return Err(NonAxisAlignedSegment);
            }
        }
        Ok(Self(points))
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Signed "area sum" `Σ (b.x−a.x)(b.y+a.y)` over the implicitly-closed
    /// edge list. Under the "y grows downward" convention a positive sum
    /// means the path is CCW-wound.
    #[must_use]
    pub fn signed_area_sum(&self) -> f64 {
        let n = self.0.len();
        if n < 2 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.0[i];
            let b = self.0[(i + 1) % n];
            sum += (b.x - a.x) * (b.y + a.y);
        }
        sum
    }

    /// Whether this path is CCW-wound per [`Self::signed_area_sum`].
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area_sum() > 0.0
    }

    /// Reverse vertex order in place (flips winding).
    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    /// Iterate the path's edges as `(start, end)` pairs, including the
    /// closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }

    /// Whether `p` lies exactly on any edge of this path (within `eps`).
    #[must_use]
    pub fn on_edge(&self, p: Point, eps: f64) -> bool {
        self.edges().any(|(a, b)| on_segment(a, b, p, eps))
    }

    /// Horizontal-ray point-in-path test (even-odd rule via vertical-edge
    /// crossing count). Returns `true` if `p` is strictly inside OR exactly
    /// on the boundary (inclusive edges).
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        const EPS: f64 = 1e-9;
        if self.on_edge(p, EPS) {
            return true;
        }
        let mut crossings = 0u32;
        for (a, b) in self.edges() {
            if (a.x - b.x).abs() > EPS {
                // horizontal edge: doesn't change vertical crossing count
                continue;
            }
            let (y_lo, y_hi) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
            // Half-open interval resolves the "ray passes through a vertex"
            // ambiguity without double-counting.
            if a.x > p.x + EPS && y_lo <= p.y && p.y < y_hi {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }
}

fn on_segment(a: Point, b: Point, p: Point, eps: f64) -> bool {
    if (a.x - b.x).abs() <= eps {
        // vertical
        (p.x - a.x).abs() <= eps && p.y >= a.y.min(b.y) - eps && p.y <= a.y.max(b.y) + eps
    } else {
        // horizontal
        (p.y - a.y).abs() <= eps && p.x >= a.x.min(b.x) - eps && p.x <= a.x.max(b.x) + eps
    }
}

/// Signed area of the intersection of `rect` with the filled region
/// bounded by `path`, computed by sweeping `path`'s horizontal segments
/// and accumulating clipped trapezoids. Top-facing segments (boundary
/// above filled material) contribute positively, bottom-facing segments
/// negatively; for a simple CCW rectilinear path the result equals the
/// true intersection area.
#[must_use]
pub fn rect_path_intersection_area(rect: Rect, path: &Path) -> f64 {
    const EPS: f64 = 1e-9;
    let mut area = 0.0;
    for (a, b) in path.edges() {
        if (a.y - b.y).abs() > EPS {
            continue; // not horizontal
        }
        let (x_lo, x_hi) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
        let lo = x_lo.max(rect.x0);
        let hi = x_hi.min(rect.x1);
        if hi <= lo {
            continue;
        }
        let y = a.y.clamp(rect.y0, rect.y1);
        let height = rect.y1 - y;
        if height <= 0.0 {
            continue;
        }
        let signed_width = if a.x > b.x { hi - lo } else { -(hi - lo) };
        // a.x > b.x (right-to-left) is our "north/top" edge direction (see
        // `crate::rectunion`); it contributes positively.
        area += signed_width * height;
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        // CCW per our established convention (see rectunion module docs).
        Path(alloc::vec![
            Point::new(x1, y0),
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
        ])
    }

    #[test]
    fn unit_square_is_ccw() {
        let p = square(0.0, 0.0, 1.0, 1.0);
        assert!(p.is_ccw());
    }

    #[test]
    fn point_in_square() {
        let p = square(0.0, 0.0, 10.0, 10.0);
        assert!(p.contains_point(Point::new(5.0, 5.0)));
        assert!(!p.contains_point(Point::new(15.0, 5.0)));
        assert!(p.contains_point(Point::new(0.0, 5.0)));
    }

    #[test]
    fn rect_area_matches_full_containment() {
        let p = square(0.0, 0.0, 9.0, 9.0);
        let r = Rect::new(3.0, 3.0, 6.0, 6.0);
        let area = rect_path_intersection_area(r, &p);
        assert!((area - 9.0).abs() < 1e-6);
    }

    #[test]
    fn rect_area_straddling_boundary_is_clipped() {
        // 9x9 square at the origin; a 6x6 rect centered on its right edge
        // only half-overlaps, so the intersection is a 3x6 strip.
        let p = square(0.0, 0.0, 9.0, 9.0);
        let r = Rect::new(6.0, 0.0, 12.0, 6.0);
        let area = rect_path_intersection_area(r, &p);
        assert!((area - 18.0).abs() < 1e-6);
    }
}
