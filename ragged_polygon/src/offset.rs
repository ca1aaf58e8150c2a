// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectilinear path offsetting: move every vertex along its inward
//! bisector by `d`.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::path::Path;

/// Inward-facing unit normal of a directed axis-aligned edge with
/// direction `d`, for a CCW-wound (per [`Path::signed_area_sum`]) path in a
/// y-grows-downward world: rotate `d` by −90°.
fn inward_normal(d: Vec2) -> Vec2 {
    Vec2::new(d.y, -d.x)
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 0.0 {
        Vec2::new(v.x / len, v.y / len)
    } else {
        Vec2::ZERO
    }
}

/// Offset every vertex of `path` inward by `d` (negative `d` offsets
/// outward). At each corner the vertex moves along the sum of its
/// incoming and outgoing edges' inward unit normals; for a 90° corner this
/// is exactly the diagonal miter point, with the sign flipping naturally
/// at reflex (clockwise-turning) corners.
///
/// `offset_path(d, offset_path(-d, p)) == p` for rectilinear `p` and any
/// `d` smaller than the minimum edge length.
#[must_use]
pub fn offset_path(d: f64, path: &Path) -> Path {
    let n = path.len();
    if n < 3 {
        return path.clone();
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = path.0[(i + n - 1) % n];
        let cur = path.0[i];
        let next = path.0[(i + 1) % n];
        let d_in = unit(Vec2::new(cur.x - prev.x, cur.y - prev.y));
        let d_out = unit(Vec2::new(next.x - cur.x, next.y - cur.y));
        let bisector = inward_normal(d_in) + inward_normal(d_out);
        out.push(Point::new(cur.x + d * bisector.x, cur.y + d * bisector.y));
    }
    Path(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn square_ccw(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        Path(vec![
            Point::new(x1, y0),
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
        ])
    }

    #[test]
    fn offset_round_trips_for_square() {
        let p = square_ccw(0.0, 0.0, 10.0, 10.0);
        let out = offset_path(2.0, &p);
        let back = offset_path(-2.0, &out);
        for (a, b) in p.0.iter().zip(back.0.iter()) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn inward_offset_shrinks_square() {
        let p = square_ccw(0.0, 0.0, 10.0, 10.0);
        let out = offset_path(1.0, &p);
        assert!(out.is_ccw());
        // shrunk by 1 on every side -> 8x8
        let xs: Vec<f64> = out.0.iter().map(|pt| pt.x).collect();
        let ys: Vec<f64> = out.0.iter().map(|pt| pt.y).collect();
        let (min_x, max_x) = (xs.iter().cloned().fold(f64::MAX, f64::min), xs.iter().cloned().fold(f64::MIN, f64::max));
        let (min_y, max_y) = (ys.iter().cloned().fold(f64::MAX, f64::min), ys.iter().cloned().fold(f64::MIN, f64::max));
        assert!((max_x - min_x - 8.0).abs() < 1e-9);
        assert!((max_y - min_y - 8.0).abs() < 1e-9);
    }
}
