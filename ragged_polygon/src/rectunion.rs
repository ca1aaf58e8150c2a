// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Union of axis-aligned rectangles into a rectilinear [`Polygon`].
//!
//! We compress the rectangles' x/y coordinates into a grid, mark each grid
//! cell covered if any input rectangle contains its midpoint, then trace
//! the boundary between covered and uncovered cells into closed loops.
//! Each loop is one path; disjoint rectangle groups produce multiple outer
//! paths, and fully-enclosed uncovered regions produce hole paths.
//!
//! Every boundary edge is emitted in a single fixed orientation per edge
//! kind (north/west/south/east of a covered cell), chosen so that a single
//! isolated cell traces out a CCW loop per [`Path::signed_area_sum`]; see
//! the unit test below. Composing multiple cells preserves this since
//! shared internal edges between two covered cells are simply never
//! emitted (covered/covered borders aren't boundaries), and the directed
//! edges chain head-to-tail around the union's outer and hole boundaries
//! alike. The one case this doesn't resolve on its own is a checkerboard
//! corner (two covered cells touching only diagonally) — a genuine
//!4-way branch in the boundary graph — which we break deterministically
//! rather than attempt to disambiguate from rectangle adjacency alone.
//!
//! As a final safety net each traced loop's winding is checked and
//! reversed if necessary, so the CCW postcondition always holds regardless
//! of how a loop was traced.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::path::Path;
use crate::polygon::Polygon;

type GridPoint = (usize, usize);

fn sorted_dedup(mut xs: Vec<f64>) -> Vec<f64> {
    xs.sort_by(|a, b| a.partial_cmp(b).expect("finite coordinate"));
    xs.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    xs
}

/// Union a set of axis-aligned rectangles into a rectilinear polygon.
/// Degenerate (zero-area) rectangles contribute no boundary.
#[must_use]
pub fn from_rectangles(rects: &[Rect]) -> Polygon {
    let rects: Vec<Rect> = rects
        .iter()
        .copied()
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .collect();
    if rects.is_empty() {
        return Polygon(Vec::new());
    }

    let xs = sorted_dedup(rects.iter().flat_map(|r| [r.x0, r.x1]).collect());
    let ys = sorted_dedup(rects.iter().flat_map(|r| [r.y0, r.y1]).collect());
    let nx = xs.len() - 1;
    let ny = ys.len() - 1;
    if nx == 0 || ny == 0 {
        return Polygon(Vec::new());
    }

    let mut covered = alloc::vec![false; nx * ny];
    for i in 0..nx {
        let mid_x = (xs[i] + xs[i + 1]) / 2.0;
        for j in 0..ny {
            let mid_y = (ys[j] + ys[j + 1]) / 2.0;
            if rects
                .iter()
                .any(|r| mid_x > r.x0 && mid_x < r.x1 && mid_y > r.y0 && mid_y < r.y1)
            {
                covered[j * nx + i] = true;
            }
        }
    }
    let is_covered = |i: isize, j: isize| -> bool {
        if i < 0 || j < 0 || i as usize >= nx || j as usize >= ny {
            false
        } else {
            covered[j as usize * nx + i as usize]
        }
    };

    let mut edges: Vec<(GridPoint, GridPoint)> = Vec::new();
    for i in 0..nx {
        for j in 0..ny {
            if !covered[j * nx + i] {
                continue;
            }
            let (ii, jj) = (i as isize, j as isize);
            if !is_covered(ii, jj - 1) {
                edges.push(((i + 1, j), (i, j)));
            }
            if !is_covered(ii - 1, jj) {
                edges.push(((i, j), (i, j + 1)));
            }
            if !is_covered(ii, jj + 1) {
                edges.push(((i, j + 1), (i + 1, j + 1)));
            }
            if !is_covered(ii + 1, jj) {
                edges.push(((i + 1, j + 1), (i + 1, j)));
            }
        }
    }

    let paths = trace_loops(&edges, &xs, &ys);
    Polygon(paths)
}

fn trace_loops(edges: &[(GridPoint, GridPoint)], xs: &[f64], ys: &[f64]) -> Vec<Path> {
    let mut outgoing: HashMap<GridPoint, Vec<GridPoint>> = HashMap::new();
    for &(from, to) in edges {
        outgoing.entry(from).or_default().push(to);
    }

    let mut loops = Vec::new();
    // Iterate start candidates in deterministic order (BTreeMap over grid
    // coordinates) so output is reproducible across runs.
    let mut remaining: BTreeMap<GridPoint, Vec<GridPoint>> = BTreeMap::new();
    for (k, v) in outgoing {
        remaining.insert(k, v);
    }

    loop {
        let Some(&start) = remaining.keys().find(|k| !remaining[*k].is_empty()) else {
            break;
        };
        let mut grid_pts = Vec::new();
        let mut cur = start;
        loop {
            grid_pts.push(cur);
            let next = {
                let outs = remaining.get_mut(&cur).expect("vertex has an outgoing edge");
                outs.pop().expect("non-empty by loop invariant")
            };
            cur = next;
            if cur == start {
                break;
            }
        }
        let mut path = collapse_collinear(grid_pts, xs, ys);
        if !path.is_ccw() {
            path.reverse();
        }
        loops.push(path);
    }
    loops
}

fn collapse_collinear(grid_pts: Vec<GridPoint>, xs: &[f64], ys: &[f64]) -> Path {
    let pts: Vec<Point> = grid_pts.iter().map(|&(i, j)| Point::new(xs[i], ys[j])).collect();
    let n = pts.len();
    if n < 3 {
        return Path(pts);
    }
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        let prev = pts[(k + n - 1) % n];
        let cur = pts[k];
        let next = pts[(k + 1) % n];
        let d1 = (cur.x - prev.x, cur.y - prev.y);
        let d2 = (next.x - cur.x, next.y - cur.y);
        // Collinear if the two direction vectors are parallel (cross == 0).
        let cross = d1.0 * d2.1 - d1.1 * d2.0;
        if cross.abs() > 1e-9 {
            out.push(cur);
        }
    }
    Path(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rectangle_round_trips() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        let poly = from_rectangles(&[r]);
        assert_eq!(poly.0.len(), 1);
        assert!(poly.0[0].is_ccw());
        assert_eq!(poly.0[0].len(), 4);
    }

    #[test]
    fn empty_input_is_empty_polygon() {
        let poly = from_rectangles(&[]);
        assert!(poly.0.is_empty());
    }

    #[test]
    fn disjoint_rectangles_touching_edges_merge() {
        // Two rects sharing a colinear edge (top = bottom) merge into one path.
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 20.0);
        let poly = from_rectangles(&[a, b]);
        assert_eq!(poly.0.len(), 1);
        assert_eq!(poly.0[0].len(), 4);
    }

    #[test]
    fn ring_of_rectangles_has_outer_and_hole() {
        // "O" shape: four 10-wide bars forming a 50x50 ring with a 30x30 hole.
        let top = Rect::new(0.0, 0.0, 50.0, 10.0);
        let bottom = Rect::new(0.0, 40.0, 50.0, 50.0);
        let left = Rect::new(0.0, 10.0, 10.0, 40.0);
        let right = Rect::new(40.0, 10.0, 50.0, 40.0);
        let poly = from_rectangles(&[top, bottom, left, right]);
        assert_eq!(poly.0.len(), 2);
        for p in &poly.0 {
            assert!(p.is_ccw());
        }
    }
}
