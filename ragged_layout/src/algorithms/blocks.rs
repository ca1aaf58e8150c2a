// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blocks layout: the naive rectangular baseline. Lines are built exactly
//! as in Pebble, but leading between two stacked lines always uses the
//! *full* accumulated padding on both sides — it never peels away wraps the
//! two lines happen to share. This is the classical box-nesting behavior
//! every other algorithm here deliberately departs from: a wrap's siblings
//! never benefit from shared ancestor padding, so output is generally
//! taller than Pebble/Rocks for the same input.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use ragged_geometry::{add_vector, inflate, overlaps_horizontally, translate, union};

use ragged_tree::ReassocNode;

use crate::abort::{AbortSignal, Outcome};
use crate::result::{LayoutResult, PlacedFragment};
use crate::settings::BlocksSettings;

enum Stack {
    Spacer,
    Rect { rect: Rect, text: Option<String>, padding: f64 },
}

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

fn build(node: &ReassocNode) -> Vec<Line> {
    match node {
        ReassocNode::Atom(a) => alloc::vec![Line {
            origin: Point::ZERO,
            advance: Vec2::new(a.rect.width(), 0.0),
            stacks: alloc::vec![Stack::Rect {
                rect: a.rect,
                text: Some(a.text.clone()),
                padding: 0.0,
            }],
        }],
        ReassocNode::Spacer(w) => alloc::vec![Line {
            origin: Point::ZERO,
            advance: Vec2::new(*w, 0.0),
            stacks: alloc::vec![Stack::Spacer],
        }],
        ReassocNode::JoinH(l, r) => {
            let mut left = build(l);
            let mut right = build(r);
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
            let mut left = build(l);
            let right = build(r);
            left.extend(right);
            left
        }
        ReassocNode::Wrap(child, padding, _style) => {
            let mut lines = build(child);
            for line in &mut lines {
                line.advance.x += 2.0 * padding;
                for stack in &mut line.stacks {
                    if let Stack::Rect { rect, padding: p, .. } = stack {
                        *rect = translate(*rect, Vec2::new(*padding, 0.0));
                        *p += padding;
                    }
                }
            }
            lines
        }
    }
}

/// Stack `lines` top-to-bottom using each rectangle's own full accumulated
/// padding on both sides of a comparison, never peeling shared ancestry.
fn stack_lines(mut lines: Vec<Line>, settings: &BlocksSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    let _ = settings;
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
                let Stack::Rect { rect: a_rect, padding: pa, .. } = a else {
                    continue;
                };
                for b in &line.stacks {
                    let Stack::Rect { rect: b_rect, padding: pb, .. } = b else {
                        continue;
                    };
                    if !overlaps_horizontally(*a_rect, *b_rect) {
                        continue;
                    }
                    let contribution = inflate(*a_rect, *pa).y1 - inflate(*b_rect, *pb).y0;
                    if contribution > needed {
                        needed = contribution;
                    }
                }
            }
        }
        let offset = needed.max(0.0).max(prev_offset);
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

/// Lay out a reassociated tree with the naive Blocks algorithm.
#[must_use]
pub fn layout_blocks(node: &ReassocNode, settings: &BlocksSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    let lines = build(node);
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
    fn single_atom_places_one_fragment() {
        let tree = atom("ab", 10.0);
        let result = layout_blocks(&tree, &BlocksSettings, None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].rect, KRect::new(0.0, -8.0, 10.0, 2.0));
    }

    #[test]
    fn shared_wrap_does_not_reduce_leading() {
        // Unlike Pebble/Rocks, two siblings under the *same* wrap are still
        // separated by both sides' full accumulated padding (2 + 2), not 0.
        let x = atom("x", 10.0);
        let y = atom("y", 10.0);
        let join = ReassocNode::JoinV(Box::new(x), Box::new(y));
        let wrap = ReassocNode::Wrap(Box::new(join), 2.0, None);
        let result = layout_blocks(&wrap, &BlocksSettings, None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 2);
        // leading = pa(2) + pb(2) + atom height (10) = 14; y's unshifted top
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
        let outcome = layout_blocks(&tree, &BlocksSettings, Some(&sig));
        assert!(outcome.is_aborted());
    }
}
