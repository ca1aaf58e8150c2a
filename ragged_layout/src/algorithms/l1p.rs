// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pebble (L1P) layout: a recursive join/wrap tree pass that builds lines
//! in local coordinates, followed by a top-to-bottom stacking pass that
//! resolves each line's final vertical offset directly from the cell
//! stacks carried alongside each fragment (no `Backing`/`Timetable`
//! involved — see `l1s` for the chunked variant).

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use ragged_geometry::{add_vector, inflate, overlaps_horizontally, translate, union};
use ragged_timetable::{push_cell, space_between_cells, Cell, Uid};
use ragged_tree::ReassocNode;

use crate::abort::{AbortSignal, Outcome};
use crate::result::{LayoutResult, PlacedFragment};
use crate::settings::L1PSettings;

/// One column within a line: either a spacer (no leading contribution) or
/// a positioned rectangle carrying its cumulative wrap-cell stack.
enum Stack {
    Spacer,
    Rect {
        rect: Rect,
        text: Option<String>,
        cells: Vec<Cell>,
    },
}

/// One line of the Pebble layout, in the process of being built. `origin`
/// and `advance` track where the next sibling joined horizontally should
/// begin; `y` components only become meaningful during stacking.
struct Line {
    origin: Point,
    advance: Vec2,
    stacks: Vec<Stack>,
}

fn translate_line(line: &mut Line, shift: Vec2) {
    line.origin = add_vector(line.origin, shift);
    for stack in &mut line.stacks {
        if let Stack::Rect { rect, .. } = stack {
            *rect = translate(*rect, shift);
        }
    }
}

fn build(node: &ReassocNode, next_uid: &mut u32, settings: &L1PSettings) -> Vec<Line> {
    match node {
        ReassocNode::Atom(a) => alloc::vec![Line {
            origin: Point::ZERO,
            advance: Vec2::new(a.rect.width(), 0.0),
            stacks: alloc::vec![Stack::Rect {
                rect: a.rect,
                text: Some(a.text.clone()),
                cells: Vec::new(),
            }],
        }],
        ReassocNode::Spacer(w) => alloc::vec![Line {
            origin: Point::ZERO,
            advance: Vec2::new(*w, 0.0),
            stacks: alloc::vec![Stack::Spacer],
        }],
        ReassocNode::JoinH(l, r) => {
            let mut left = build(l, next_uid, settings);
            let mut right = build(r, next_uid, settings);
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
            let mut left = build(l, next_uid, settings);
            let right = build(r, next_uid, settings);
            left.extend(right);
            left
        }
        ReassocNode::Wrap(child, padding, _style) => {
            let mut lines = build(child, next_uid, settings);
            let uid = Uid(*next_uid);
            *next_uid += 1;
            for line in &mut lines {
                line.advance.x += 2.0 * padding;
                for stack in &mut line.stacks {
                    if let Stack::Rect { cells, .. } = stack {
                        push_cell(cells, uid, *padding);
                    }
                }
                if settings.translate_wraps {
                    let shift = Vec2::new(*padding, 0.0);
                    for stack in &mut line.stacks {
                        if let Stack::Rect { rect, .. } = stack {
                            *rect = translate(*rect, shift);
                        }
                    }
                } else {
                    line.origin = Point::new(line.origin.x - padding, line.origin.y);
                }
            }
            lines
        }
    }
}

/// Stack `lines` top-to-bottom, computing each new line's vertical offset
/// as the maximum, over every already-placed rectangle `a` and this
/// line's rectangle `b` that overlap horizontally, of
/// `inflate(a, pa).bottom − inflate(b, pb).top` (with `(pa, pb)` from
/// `spaceBetween` over the two fragments' cell stacks), floored by
/// `ideal_leading` above the previous line. Checks `abort` once per line.
fn stack_lines(mut lines: Vec<Line>, settings: &L1PSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    if lines.is_empty() {
        return Outcome::Done(LayoutResult::empty());
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

    let mut fragments = Vec::new();
    let mut bbox: Option<Rect> = None;
    for (line_no, line) in placed.iter().enumerate() {
        for stack in &line.stacks {
            if let Stack::Rect { rect, text: Some(text), .. } = stack {
                fragments.push(PlacedFragment {
                    text: text.clone(),
                    rect: *rect,
                    line_no: line_no as u32,
                });
                bbox = Some(bbox.map_or(*rect, |b| union(b, *rect)));
            }
        }
    }
    Outcome::Done(LayoutResult {
        fragments,
        wraps: Vec::new(),
        bounding_box: bbox,
    })
}

/// Lay out a reassociated tree with the Pebble algorithm. The outer
/// line-stacking loop checks `abort` once per line.
#[must_use]
pub fn layout_l1p(node: &ReassocNode, settings: &L1PSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    let mut next_uid = 1u32;
    let lines = build(node, &mut next_uid, settings);
    stack_lines(lines, settings, abort)
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
    fn single_atom_places_one_fragment_on_line_zero() {
        let tree = atom("ab", 10.0);
        let result = layout_l1p(&tree, &L1PSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "ab");
        assert_eq!(frags[0].line_no, 0);
        assert_eq!(frags[0].rect, KRect::new(0.0, -8.0, 10.0, 2.0));
    }

    #[test]
    fn horizontal_pair_with_shared_wrap_translates_second_atom() {
        let join = ReassocNode::JoinH(Box::new(atom("a", 10.0)), Box::new(atom("b", 10.0)));
        let wrap = ReassocNode::Wrap(Box::new(join), 2.0, None);
        let result = layout_l1p(&wrap, &L1PSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].rect.x0, 2.0);
        assert_eq!(frags[1].rect.x0, 12.0);
    }

    #[test]
    fn two_lines_with_disjoint_wraps_separate_by_padding() {
        // Node(padding=4, [Node(padding=2, [x]), Newline, Node(padding=2, [y])]):
        // x and y each sit under their own padding=2 wrap, so those wraps
        // diverge immediately and both contribute to spaceBetween.
        let wrapped_x = ReassocNode::Wrap(Box::new(atom("x", 10.0)), 2.0, None);
        let wrapped_y = ReassocNode::Wrap(Box::new(atom("y", 10.0)), 2.0, None);
        let join = ReassocNode::JoinV(Box::new(wrapped_x), Box::new(wrapped_y));
        let outer = ReassocNode::Wrap(Box::new(join), 4.0, None);
        let result = layout_l1p(&outer, &L1PSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].line_no, 0);
        assert_eq!(frags[1].line_no, 1);
        // spaceBetween(x, y) = (2, 2); leading (the baseline-to-baseline
        // shift) = 2 + 2 + atom height (10) = 14, so y's unshifted top
        // (-8) lands at 6.
        assert!((frags[1].rect.y0 - 6.0).abs() < 1e-9);
    }

    #[test]
    fn abort_checked_before_second_line_is_stacked() {
        let x = atom("x", 10.0);
        let y = atom("y", 10.0);
        let tree = ReassocNode::JoinV(Box::new(x), Box::new(y));
        let sig = AbortSignal::new();
        sig.abort();
        let outcome = layout_l1p(&tree, &L1PSettings::default(), Some(&sig));
        assert!(outcome.is_aborted());
    }
}
