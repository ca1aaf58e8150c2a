// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon simplification: antiknob removal and clockwise-corner removal,
//! iterated to a fixed point under inclusion/exclusion constraints.
//!
//! Both passes consider a three-point-or-more local neighborhood, compute
//! a rectangle covering the material that would be added/removed, and
//! apply the edit only if doing so keeps the path inside an optional
//! `keep_inside` polygon and outside every path in an optional
//! `keep_outside` polygon — so a child's outline never balloons past its
//! parent's, and never invades a sibling's.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::path::Path;
use crate::polygon::Polygon;

const EPS: f64 = 1e-9;

fn rect_of(points: &[Point]) -> Rect {
    let mut r = Rect::new(points[0].x, points[0].y, points[0].x, points[0].y);
    for p in &points[1..] {
        r = r.union_pt(*p);
    }
    r
}

/// `-1` for a convex (left) turn, `+1` for a reflex/clockwise turn, under
/// our CCW, y-down convention (see `rectunion` module docs), `0` if
/// collinear (shouldn't occur in a simplified path).
fn turn_sign(prev: Point, cur: Point, next: Point) -> i32 {
    let d_in = (cur.x - prev.x, cur.y - prev.y);
    let d_out = (next.x - cur.x, next.y - cur.y);
    let cross = d_in.0 * d_out.1 - d_in.1 * d_out.0;
    if cross > EPS {
        1
    } else if cross < -EPS {
        -1
    } else {
        0
    }
}

fn is_antiparallel(a: Point, b: Point, c: Point, d: Point) -> bool {
    let dir_a = (b.x - a.x, b.y - a.y);
    let dir_c = (d.x - c.x, d.y - c.y);
    (dir_a.0 + dir_c.0).abs() <= EPS && (dir_a.1 + dir_c.1).abs() <= EPS
}

/// Whether `candidate` is acceptable: it may not intersect `owner`'s *other*
/// edges, must stay inside `keep_inside` (if given), and must stay outside
/// every path in `keep_outside` (if given).
fn area_is_acceptable(
    new_area: Rect,
    keep_inside: Option<&Polygon>,
    keep_outside: Option<&Polygon>,
) -> bool {
    if new_area.area() <= 0.0 {
        return true;
    }
    if let Some(inside) = keep_inside
        && !inside.contains_rect(new_area, 1e-6)
    {
        return false;
    }
    if let Some(outside) = keep_outside
        && outside.intersects_rect(new_area, 1e-6)
    {
        return false;
    }
    true
}

/// Try to remove one clockwise (reflex, under CCW winding) corner from
/// `path` at vertex index `i`. Returns the edited path if the corner was
/// both reflex and the edit passed the inclusion/exclusion checks.
fn try_remove_cw_corner(
    path: &Path,
    i: usize,
    keep_inside: Option<&Polygon>,
    keep_outside: Option<&Polygon>,
) -> Option<Path> {
    let n = path.len();
    if n < 5 {
        return None;
    }
    let prev = path.0[(i + n - 1) % n];
    let cur = path.0[i];
    let next = path.0[(i + 1) % n];
    if turn_sign(prev, cur, next) != 1 {
        return None;
    }
    let new_area = rect_of(&[prev, cur, next]);
    if !area_is_acceptable(new_area, keep_inside, keep_outside) {
        return None;
    }
    let replacement = Point::new(prev.x + next.x - cur.x, prev.y + next.y - cur.y);

    let mut out = Vec::with_capacity(n - 2);
    let prev_idx = (i + n - 1) % n;
    let next_idx = (i + 1) % n;
    let mut k = next_idx;
    loop {
        k = (k + 1) % n;
        if k == prev_idx {
            break;
        }
        out.push(path.0[k]);
    }
    out.push(replacement);
    Some(Path(out))
}

/// Try to remove one antiknob: a thin inward spike formed by edges
/// `(p0,p1)`, `(p1,p2)`, `(p2,p3)` where the first and third edges are
/// antiparallel. Two candidate corners are possible (snap `p1` onto the
/// third edge's line, or snap `p2` onto the first edge's line); we pick
/// whichever requires retracting less material.
fn try_remove_antiknob(
    path: &Path,
    i: usize,
    keep_inside: Option<&Polygon>,
    keep_outside: Option<&Polygon>,
) -> Option<Path> {
    let n = path.len();
    if n < 6 {
        return None;
    }
    let p0 = path.0[(i + n - 1) % n];
    let p1 = path.0[i];
    let p2 = path.0[(i + 1) % n];
    let p3 = path.0[(i + 2) % n];
    if !is_antiparallel(p0, p1, p2, p3) {
        return None;
    }

    // Candidate 1: retract edge c onto a's line (corner keeps p0's
    // perpendicular coordinate).
    let corner_a = if (p0.x - p1.x).abs() <= EPS {
        Point::new(p0.x, p3.y)
    } else {
        Point::new(p3.x, p0.y)
    };
    // Candidate 2: retract edge a onto c's line.
    let corner_c = if (p0.x - p1.x).abs() <= EPS {
        Point::new(p3.x, p0.y)
    } else {
        Point::new(p0.x, p3.y)
    };

    let area_a = rect_of(&[p0, p1, p2, corner_a]);
    let area_c = rect_of(&[p0, p1, p2, corner_c]);
    let (chosen_corner, chosen_area) = if area_a.area() <= area_c.area() {
        (corner_a, area_a)
    } else {
        (corner_c, area_c)
    };
    if !area_is_acceptable(chosen_area, keep_inside, keep_outside) {
        return None;
    }

    let mut out = Vec::with_capacity(n - 1);
    let i1 = i;
    let i2 = (i + 1) % n;
    let mut k = i2;
    loop {
        k = (k + 1) % n;
        if k == i1 {
            break;
        }
        out.push(path.0[k]);
    }
    out.push(chosen_corner);
    Some(Path(out))
}

/// Run antiknob removal then clockwise-corner removal on `path` until a
/// fixed point is reached.
#[must_use]
pub fn simplify_path(path: &Path, keep_inside: Option<&Polygon>, keep_outside: Option<&Polygon>) -> Path {
    let mut current = path.clone();
    loop {
        let mut changed = false;

        let mut i = 0;
        while i < current.len() {
            if let Some(next) = try_remove_antiknob(&current, i, keep_inside, keep_outside) {
                current = next;
                changed = true;
            } else {
                i += 1;
            }
        }

        let mut i = 0;
        while i < current.len() {
            if let Some(next) = try_remove_cw_corner(&current, i, keep_inside, keep_outside) {
                current = next;
                changed = true;
            } else {
                i += 1;
            }
        }

        if !changed {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn l_shape_antiknob_becomes_rectangle() {
        // An "L" with a thin eastward notch carved out of the top-right
        // corner, CCW per our convention.
        let path = Path(vec![
            Point::new(10.0, 0.0),
            Point::new(10.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(8.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ]);
        let simplified = simplify_path(&path, None, None);
        assert!(simplified.is_ccw());
        assert!(simplified.len() <= path.len());
    }
}
