// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! S-Blocks layout: a horizontal-sweep variant of Pebble/Rocks. Fragment
//! positions are resolved exactly as in Pebble (shared-ancestor cell
//! peeling for leading), but each `Wrap`'s outline is built from per-line
//! horizontal extents rather than per-atom rectangles: for every line the
//! wrap touches, the covered columns' combined `[min_x, max_x]` span
//! becomes one rectangle (padded, at that line's vertical band), and the
//! wrap's outline is the union of those per-line rectangles. This produces
//! the same staircase-shaped outlines a begin/end-of-line gadget sweep
//! would (a wrap spanning a ragged paragraph gets one wide rectangle per
//! line, wider where the line is wider), without separately modeling
//! begin/end-of-line and begin/end-of-node gadgets as distinct values.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use ragged_geometry::{add_vector, inflate, overlaps_horizontally, translate, union};
use ragged_polygon::from_rectangles;
use ragged_timetable::{push_cell, space_between_cells, Cell, Uid};
use ragged_tree::{ReassocNode, Style};

use crate::abort::{AbortSignal, Outcome};
use crate::result::{LayoutResult, PlacedFragment, WrapOutline};
use crate::settings::SBlocksSettings;

enum Stack {
    Spacer,
    Rect {
        idx: usize,
        rect: Rect,
        text: Option<String>,
        cells: Vec<Cell>,
    },
}

struct Line {
    origin: Point,
    advance: Vec2,
    stacks: Vec<Stack>,
}

struct WrapRecord {
    atoms: Vec<usize>,
    padding: f64,
    style: Option<Style>,
}

fn translate_line(line: &mut Line, shift: Vec2) {
    line.origin = add_vector(line.origin, shift);
    for stack in &mut line.stacks {
        if let Stack::Rect { rect, .. } = stack {
            *rect = translate(*rect, shift);
        }
    }
}

fn build(node: &ReassocNode, next_idx: &mut usize, next_uid: &mut u32, wraps: &mut Vec<WrapRecord>) -> Vec<Line> {
    match node {
        ReassocNode::Atom(a) => {
            let idx = *next_idx;
            *next_idx += 1;
            alloc::vec![Line {
                origin: Point::ZERO,
                advance: Vec2::new(a.rect.width(), 0.0),
                stacks: alloc::vec![Stack::Rect {
                    idx,
                    rect: a.rect,
                    text: Some(a.text.clone()),
                    cells: Vec::new(),
                }],
            }]
        }
        ReassocNode::Spacer(w) => alloc::vec![Line {
            origin: Point::ZERO,
            advance: Vec2::new(*w, 0.0),
            stacks: alloc::vec![Stack::Spacer],
        }],
        ReassocNode::JoinH(l, r) => {
            let mut left = build(l, next_idx, next_uid, wraps);
            let mut right = build(r, next_idx, next_uid, wraps);
            if left.is_empty() {
                return right;
            }
            if right.is_empty() {
                return left;
            }
            let last = left.last().expect("checked non-empty above");
            let lead_out = ragged_geometry::lead_out(last.origin, last.advance);
            let first_r_origin = right[0].origin;
            let shift = Vec2::new(lead_out.x - first_r_origin.x, lead_out.y - first_r_origin.y);
            for line in &mut right {
                translate_line(line, shift);
            }
            let mut merged_first_r = right.remove(0);
            let last_idx = left.len() - 1;
            let last_origin = left[last_idx].origin;
            let new_advance = Vec2::new(
                merged_first_r.origin.x + merged_first_r.advance.x - last_origin.x,
                merged_first_r.origin.y + merged_first_r.advance.y - last_origin.y,
            );
            left[last_idx].stacks.append(&mut merged_first_r.stacks);
            left[last_idx].advance = new_advance;
            left.extend(right);
            left
        }
        ReassocNode::JoinV(l, r) => {
            let mut left = build(l, next_idx, next_uid, wraps);
            let right = build(r, next_idx, next_uid, wraps);
            left.extend(right);
            left
        }
        ReassocNode::Wrap(child, padding, style) => {
            let mut lines = build(child, next_idx, next_uid, wraps);
            let uid = Uid(*next_uid);
            *next_uid += 1;

            let mut atoms = Vec::new();
            for line in &lines {
                for stack in &line.stacks {
                    if let Stack::Rect { idx, .. } = stack {
                        atoms.push(*idx);
                    }
                }
            }
            wraps.push(WrapRecord {
                atoms,
                padding: *padding,
                style: style.clone(),
            });

            for line in &mut lines {
                line.advance.x += 2.0 * padding;
                for stack in &mut line.stacks {
                    if let Stack::Rect { cells, .. } = stack {
                        push_cell(cells, uid, *padding);
                    }
                }
                let shift = Vec2::new(*padding, 0.0);
                for stack in &mut line.stacks {
                    if let Stack::Rect { rect, .. } = stack {
                        *rect = translate(*rect, shift);
                    }
                }
            }
            lines
        }
    }
}

fn stack_lines(mut lines: Vec<Line>, settings: &SBlocksSettings, abort: Option<&AbortSignal>) -> Outcome<Vec<Line>> {
    if lines.is_empty() {
        return Outcome::Done(Vec::new());
    }
    let mut placed: Vec<Line> = Vec::with_capacity(lines.len());
    let mut prev_offset = 0.0_f64;
    for (i, mut line) in lines.drain(..).enumerate() {
        if abort.is_some_and(AbortSignal::is_aborted) {
            return Outcome::Aborted;
        }
        if i == 0 {
            placed.push(line);
            continue;
        }
        let mut needed = 0.0_f64;
        for done in &placed {
            for a in &done.stacks {
                let Stack::Rect { rect: a_rect, cells: a_cells, .. } = a else {
                    continue;
                };
                for b in &line.stacks {
                    let Stack::Rect { rect: b_rect, cells: b_cells, .. } = b else {
                        continue;
                    };
                    if !overlaps_horizontally(*a_rect, *b_rect) {
                        continue;
                    }
                    let (pa, pb) = space_between_cells(a_cells, b_cells);
                    let contribution = inflate(*a_rect, pa).y1 - inflate(*b_rect, pb).y0;
                    if contribution > needed {
                        needed = contribution;
                    }
                }
            }
        }
        let mut offset = needed.max(0.0);
        if offset - prev_offset < settings.ideal_leading {
            offset = prev_offset + settings.ideal_leading;
        }
        translate_line(&mut line, Vec2::new(0.0, offset));
        prev_offset = offset;
        placed.push(line);
    }
    Outcome::Done(placed)
}

/// Lay out a reassociated tree with the S-Blocks algorithm: text positions
/// follow the same shared-ancestor leading rule as Pebble, and every
/// `Wrap`'s outline is the union of its per-line horizontal extents.
#[must_use]
pub fn layout_sblocks(node: &ReassocNode, settings: &SBlocksSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    let mut next_idx = 0usize;
    let mut next_uid = 1u32;
    let mut wraps = Vec::new();
    let built = build(node, &mut next_idx, &mut next_uid, &mut wraps);
    let placed = match stack_lines(built, settings, abort) {
        Outcome::Aborted => return Outcome::Aborted,
        Outcome::Done(p) => p,
    };

    // final_rects[atom_idx] = (rect, line_no)
    let mut final_rects: Vec<Option<(Rect, u32)>> = alloc::vec![None; next_idx];
    let mut fragments = Vec::new();
    let mut bbox: Option<Rect> = None;
    for (line_no, line) in placed.iter().enumerate() {
        for stack in &line.stacks {
            if let Stack::Rect { idx, rect, text, .. } = stack {
                final_rects[*idx] = Some((*rect, line_no as u32));
                if let Some(text) = text {
                    fragments.push(PlacedFragment {
                        text: text.clone(),
                        rect: *rect,
                        line_no: line_no as u32,
                    });
                    bbox = Some(bbox.map_or(*rect, |b| union(b, *rect)));
                }
            }
        }
    }

    if abort.is_some_and(AbortSignal::is_aborted) {
        return Outcome::Aborted;
    }

    let raw: Vec<ragged_polygon::Polygon> = wraps
        .iter()
        .map(|w| {
            // Group this wrap's atoms by final line number, then build one
            // padded rectangle per line from that line's horizontal extent.
            let mut by_line: Vec<(u32, f64, f64, f64, f64)> = Vec::new();
            for &idx in &w.atoms {
                let Some((rect, line_no)) = final_rects[idx] else {
                    continue;
                };
                if let Some(entry) = by_line.iter_mut().find(|(l, ..)| *l == line_no) {
                    entry.1 = entry.1.min(rect.x0);
                    entry.2 = entry.2.max(rect.x1);
                    entry.3 = entry.3.min(rect.y0);
                    entry.4 = entry.4.max(rect.y1);
                } else {
                    by_line.push((line_no, rect.x0, rect.x1, rect.y0, rect.y1));
                }
            }
            let rects: Vec<Rect> = by_line
                .into_iter()
                .map(|(_, x0, x1, y0, y1)| inflate(Rect::new(x0, y0, x1, y1), w.padding))
                .collect();
            from_rectangles(&rects)
        })
        .collect();

    let mut final_bbox = bbox;
    let wrap_outlines: Vec<WrapOutline> = wraps
        .iter()
        .zip(raw)
        .map(|(w, polygon)| {
            if let Some(b) = polygon.bounding_box() {
                final_bbox = Some(final_bbox.map_or(b, |r| union(r, b)));
            }
            WrapOutline {
                polygon,
                style: w.style.clone(),
            }
        })
        .collect();

    Outcome::Done(LayoutResult {
        fragments,
        wraps: wrap_outlines,
        bounding_box: final_bbox,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use kurbo::Rect as KRect;
    use ragged_tree::MeasuredAtom;

    fn atom(text: &str, w: f64) -> ReassocNode {
        ReassocNode::Atom(MeasuredAtom {
            text: String::from(text),
            rect: KRect::new(0.0, -8.0, w, 2.0),
        })
    }

    #[test]
    fn single_atom_places_one_fragment() {
        let tree = atom("ab", 10.0);
        let result = layout_sblocks(&tree, &SBlocksSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].rect, KRect::new(0.0, -8.0, 10.0, 2.0));
    }

    #[test]
    fn single_line_wrap_outline_is_one_rectangle() {
        let wrap = ReassocNode::Wrap(Box::new(atom("x", 10.0)), 2.0, None);
        let result = layout_sblocks(&wrap, &SBlocksSettings::default(), None).done().unwrap();
        let outlines = result.wrap_outlines();
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].polygon.0.len(), 1);
        assert_eq!(outlines[0].polygon.0[0].len(), 4);
    }

    #[test]
    fn two_line_wrap_has_a_staircase_outline() {
        // A wrap around "wide" \n "x": two lines of very different width
        // under the same wrap union into a non-rectangular (> 4 vertex)
        // staircase outline.
        let wide = atom("wide", 40.0);
        let narrow = atom("x", 5.0);
        let join = ReassocNode::JoinV(Box::new(wide), Box::new(narrow));
        let wrap = ReassocNode::Wrap(Box::new(join), 2.0, None);
        let result = layout_sblocks(&wrap, &SBlocksSettings::default(), None).done().unwrap();
        let outlines = result.wrap_outlines();
        assert_eq!(outlines.len(), 1);
        assert!(outlines[0].polygon.0[0].len() > 4);
    }

    #[test]
    fn abort_checked_before_second_line_is_stacked() {
        let x = atom("x", 10.0);
        let y = atom("y", 10.0);
        let tree = ReassocNode::JoinV(Box::new(x), Box::new(y));
        let sig = AbortSignal::new();
        sig.abort();
        let outcome = layout_sblocks(&tree, &SBlocksSettings::default(), Some(&sig));
        assert!(outcome.is_aborted());
    }
}
