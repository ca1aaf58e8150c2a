// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rocks (L1S/L1S+) layout: the same recursive join/wrap walk as Pebble, but
//! fragments are pushed into a shared [`Backing`] and [`Timetable`] instead
//! of carrying their own cell stack, so leading is resolved by a chunked
//! top-down scan rather than a per-stack peel. L1S+ additionally computes
//! one rectilinear outline per `Wrap` and simplifies it against its parent
//! and siblings.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Point, Rect, Vec2};

use ragged_backing::{Backing, EntryKind};
use ragged_geometry::{add_vector, inflate, overlaps_horizontally, union};
use ragged_polygon::{from_rectangles, simplify_path, Polygon};
use ragged_timetable::{Timetable, TimetableBuilder, Uid};
use ragged_tree::{ReassocNode, Style};

use crate::abort::{AbortSignal, Outcome};
use crate::result::{LayoutResult, PlacedFragment, WrapOutline};
use crate::settings::{L1SPlusSettings, RocksSettings};

/// Vertical bucket height for the shared [`Backing`]. Only affects how
/// finely the chunked leading scan partitions candidates, never the result.
const CHUNK_HEIGHT: f64 = 64.0;

/// One line under construction: the join origin/advance bookkeeping shared
/// with Pebble, plus the contiguous backing-index range this line currently
/// spans.
struct LineRegion {
    origin: Point,
    advance: Vec2,
    range: Range<usize>,
}

/// One closed `Wrap`, recorded for the outline pass. `range` is the
/// contiguous backing span of every fragment beneath it (atoms and nested
/// wraps alike); `padding` is this wrap's own padding, not cumulative.
struct WrapRecord {
    uid: Uid,
    range: Range<usize>,
    padding: f64,
    style: Option<Style>,
    parent: Option<Uid>,
}

struct Build {
    backing: Backing,
    tt: TimetableBuilder,
    texts: Vec<Option<String>>,
}

fn build(node: &ReassocNode, b: &mut Build, wraps: &mut Vec<WrapRecord>, translate_wraps: bool) -> Vec<LineRegion> {
    match node {
        ReassocNode::Atom(a) => {
            let idx = b.backing.append_rect(a.rect, 0.0);
            let col = b.tt.push_atom();
            debug_assert_eq!(idx, col, "backing and timetable columns must stay in lockstep");
            b.texts.push(Some(a.text.clone()));
            alloc::vec![LineRegion {
                origin: Point::ZERO,
                advance: Vec2::new(a.rect.width(), 0.0),
                range: idx..idx + 1,
            }]
        }
        ReassocNode::Spacer(w) => {
            let idx = b.backing.append_spacer(*w);
            let col = b.tt.push_spacer();
            debug_assert_eq!(idx, col, "backing and timetable columns must stay in lockstep");
            b.texts.push(None);
            alloc::vec![LineRegion {
                origin: Point::ZERO,
                advance: Vec2::new(*w, 0.0),
                range: idx..idx + 1,
            }]
        }
        ReassocNode::JoinH(l, r) => {
            let mut left = build(l, b, wraps, translate_wraps);
            let mut right = build(r, b, wraps, translate_wraps);
            if left.is_empty() {
                return right;
            }
            if right.is_empty() {
                return left;
            }
            let last = left.last().expect("checked non-empty above");
            let lead_out = ragged_geometry::lead_out(last.origin, last.advance);
            let first_r = &right[0];
            let shift = Vec2::new(lead_out.x - first_r.origin.x, lead_out.y - first_r.origin.y);

            let r_start = right.first().expect("checked non-empty above").range.start;
            let r_end = right.last().expect("checked non-empty above").range.end;
            b.backing.translate_range(r_start..r_end, shift);
            for line in &mut right {
                line.origin = add_vector(line.origin, shift);
            }

            let merged_first_r = right.remove(0);
            let last_idx = left.len() - 1;
            let last_origin = left[last_idx].origin;
            let new_advance = Vec2::new(
                merged_first_r.origin.x + merged_first_r.advance.x - last_origin.x,
                merged_first_r.origin.y + merged_first_r.advance.y - last_origin.y,
            );
            left[last_idx].range = left[last_idx].range.start..merged_first_r.range.end;
            left[last_idx].advance = new_advance;
            left.extend(right);
            left
        }
        ReassocNode::JoinV(l, r) => {
            let mut left = build(l, b, wraps, translate_wraps);
            let right = build(r, b, wraps, translate_wraps);
            left.extend(right);
            left
        }
        ReassocNode::Wrap(child, padding, style) => {
            let before = wraps.len();
            let mut lines = build(child, b, wraps, translate_wraps);
            let full_start = lines.first().expect("a Wrap always yields at least the empty-atom sentinel").range.start;
            let full_end = lines.last().expect("checked above").range.end;
            let full_range = full_start..full_end;

            let uid = b.tt.close_wrap(full_range.clone(), *padding);
            b.backing.widen_max_padding(full_range.clone(), *padding);

            for w in &mut wraps[before..] {
                if w.parent.is_none() {
                    w.parent = Some(uid);
                }
            }
            wraps.push(WrapRecord {
                uid,
                range: full_range.clone(),
                padding: *padding,
                style: style.clone(),
                parent: None,
            });

            for line in &mut lines {
                line.advance.x += 2.0 * padding;
            }
            if translate_wraps {
                b.backing.translate_range(full_range, Vec2::new(*padding, 0.0));
            } else {
                for line in &mut lines {
                    line.origin = Point::new(line.origin.x - padding, line.origin.y);
                }
            }
            lines
        }
    }
}

/// Stack `lines` top-to-bottom. For each line, candidates are every
/// earlier-placed rectangle (lower backing index) that overlaps
/// horizontally, found via a chunked scan over the window each candidate's
/// `max_padding` could still reach — the scan may revisit a candidate from
/// more than one chunk, which is harmless since contributions are combined
/// with `max`.
fn stack_lines(
    lines: &[LineRegion],
    backing: &mut Backing,
    tt: &Timetable,
    settings: &RocksSettings,
    abort: Option<&AbortSignal>,
) -> Outcome<()> {
    let mut prev_offset = 0.0_f64;
    for (i, line) in lines.iter().enumerate() {
        if abort.is_some_and(AbortSignal::is_aborted) {
            return Outcome::Aborted;
        }
        if i == 0 {
            continue;
        }
        let mut needed = 0.0_f64;
        for b_idx in line.range.clone() {
            let b_entry = backing.get(b_idx);
            let EntryKind::Rect { max_padding: pmax_b } = b_entry.kind else {
                continue;
            };
            let window_lo = b_entry.rect.y0 - 1.0e12;
            let window_hi = b_entry.rect.y1 + pmax_b;
            for chunk in backing.chunks_overlapping(window_lo, window_hi) {
                for &a_idx in chunk {
                    if a_idx >= line.range.start {
                        continue;
                    }
                    let a_entry = backing.get(a_idx);
                    let EntryKind::Rect { .. } = a_entry.kind else {
                        continue;
                    };
                    if !overlaps_horizontally(a_entry.rect, b_entry.rect) {
                        continue;
                    }
                    let (pa, pb) = tt.space_between(a_idx, b_idx);
                    let contribution = inflate(a_entry.rect, pa).y1 - inflate(b_entry.rect, pb).y0;
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
        backing.translate_range(line.range.clone(), Vec2::new(0.0, offset));
        prev_offset = offset;
    }
    Outcome::Done(())
}

struct Core {
    result: LayoutResult,
    wraps: Vec<WrapRecord>,
    backing: Backing,
}

fn run_core(node: &ReassocNode, settings: &RocksSettings, abort: Option<&AbortSignal>) -> Outcome<Core> {
    let mut b = Build {
        backing: Backing::new(CHUNK_HEIGHT),
        tt: TimetableBuilder::new(),
        texts: Vec::new(),
    };
    let mut wraps = Vec::new();
    let lines = build(node, &mut b, &mut wraps, settings.translate_wraps);
    if lines.is_empty() {
        return Outcome::Done(Core {
            result: LayoutResult::empty(),
            wraps: Vec::new(),
            backing: b.backing,
        });
    }
    let tt = b.tt.finish();
    if stack_lines(&lines, &mut b.backing, &tt, settings, abort).is_aborted() {
        return Outcome::Aborted;
    }

    let mut fragments = Vec::new();
    let mut bbox: Option<Rect> = None;
    for (line_no, line) in lines.iter().enumerate() {
        for idx in line.range.clone() {
            if let Some(text) = &b.texts[idx] {
                let entry = b.backing.get(idx);
                fragments.push(PlacedFragment {
                    text: text.clone(),
                    rect: entry.rect,
                    line_no: line_no as u32,
                });
                bbox = Some(bbox.map_or(entry.rect, |r| union(r, entry.rect)));
            }
        }
    }

    Outcome::Done(Core {
        result: LayoutResult {
            fragments,
            wraps: Vec::new(),
            bounding_box: bbox,
        },
        wraps,
        backing: b.backing,
    })
}

/// Lay out a reassociated tree with the Rocks algorithm (no outlines).
#[must_use]
pub fn layout_l1s(node: &ReassocNode, settings: &RocksSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    match run_core(node, settings, abort) {
        Outcome::Aborted => Outcome::Aborted,
        Outcome::Done(core) => Outcome::Done(core.result),
    }
}

/// Lay out a reassociated tree with Rocks, additionally computing one
/// rectilinear outline per `Wrap`: the union of its direct and nested
/// content inflated by exactly its own padding (not the cumulative padding
/// of its ancestors — each wrap's box hugs only its own layer). When
/// `settings.enable_simplification` is set, each outline is then simplified
/// (antiknob/CW-corner removal) kept inside its parent's raw outline and
/// outside its siblings' raw outlines.
#[must_use]
pub fn layout_l1s_plus(node: &ReassocNode, settings: &L1SPlusSettings, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    let core = match run_core(node, &settings.rocks, abort) {
        Outcome::Aborted => return Outcome::Aborted,
        Outcome::Done(c) => c,
    };
    if abort.is_some_and(AbortSignal::is_aborted) {
        return Outcome::Aborted;
    }

    let raw: Vec<Polygon> = core
        .wraps
        .iter()
        .map(|w| {
            let rects: Vec<Rect> = w
                .range
                .clone()
                .filter_map(|i| match core.backing.get(i).kind {
                    EntryKind::Rect { .. } => Some(inflate(core.backing.get(i).rect, w.padding)),
                    EntryKind::Spacer => None,
                })
                .collect();
            from_rectangles(&rects)
        })
        .collect();

    let polys: Vec<Polygon> = if settings.enable_simplification {
        core.wraps
            .iter()
            .enumerate()
            .map(|(idx, w)| {
                if abort.is_some_and(AbortSignal::is_aborted) {
                    return raw[idx].clone();
                }
                let parent_poly = w.parent.and_then(|p| core.wraps.iter().position(|o| o.uid == p)).map(|p| &raw[p]);
                let siblings: Vec<ragged_polygon::Path> = core
                    .wraps
                    .iter()
                    .enumerate()
                    .filter(|(j, o)| *j != idx && o.parent == w.parent)
                    .flat_map(|(j, _)| raw[j].0.iter().cloned())
                    .collect();
                let keep_outside = Polygon(siblings);
                Polygon(
                    raw[idx]
                        .0
                        .iter()
                        .map(|p| simplify_path(p, parent_poly, Some(&keep_outside)))
                        .collect(),
                )
            })
            .collect()
    } else {
        raw
    };

    let mut bbox = core.result.bounding_box;
    let wrap_outlines: Vec<WrapOutline> = core
        .wraps
        .iter()
        .zip(polys)
        .map(|(w, polygon)| {
            if let Some(b) = polygon.bounding_box() {
                bbox = Some(bbox.map_or(b, |r| union(r, b)));
            }
            WrapOutline {
                polygon,
                style: w.style.clone(),
            }
        })
        .collect();

    Outcome::Done(LayoutResult {
        fragments: core.result.fragments,
        wraps: wrap_outlines,
        bounding_box: bbox,
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
        let result = layout_l1s(&tree, &RocksSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "ab");
        assert_eq!(frags[0].rect, KRect::new(0.0, -8.0, 10.0, 2.0));
    }

    #[test]
    fn horizontal_pair_with_shared_wrap_translates_second_atom() {
        let join = ReassocNode::JoinH(Box::new(atom("a", 10.0)), Box::new(atom("b", 10.0)));
        let wrap = ReassocNode::Wrap(Box::new(join), 2.0, None);
        let result = layout_l1s(&wrap, &RocksSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].rect.x0, 2.0);
        assert_eq!(frags[1].rect.x0, 12.0);
    }

    #[test]
    fn two_lines_with_disjoint_wraps_separate_by_padding() {
        let wrapped_x = ReassocNode::Wrap(Box::new(atom("x", 10.0)), 2.0, None);
        let wrapped_y = ReassocNode::Wrap(Box::new(atom("y", 10.0)), 2.0, None);
        let join = ReassocNode::JoinV(Box::new(wrapped_x), Box::new(wrapped_y));
        let outer = ReassocNode::Wrap(Box::new(join), 4.0, None);
        let result = layout_l1s(&outer, &RocksSettings::default(), None).done().unwrap();
        let frags: Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 2);
        assert!((frags[1].rect.y0 - 6.0).abs() < 1e-9);
    }

    #[test]
    fn single_wrap_outline_is_inflated_rectangle() {
        let wrap = ReassocNode::Wrap(Box::new(atom("x", 10.0)), 3.0, None);
        let result = layout_l1s_plus(&wrap, &L1SPlusSettings::default(), None).done().unwrap();
        let outlines = result.wrap_outlines();
        assert_eq!(outlines.len(), 1);
        assert_eq!(outlines[0].polygon.0.len(), 1);
        assert_eq!(
            outlines[0].polygon.bounding_box().unwrap(),
            KRect::new(-3.0, -11.0, 13.0, 5.0)
        );
    }

    #[test]
    fn nested_wrap_outline_is_contained_in_parent() {
        let inner = ReassocNode::Wrap(Box::new(atom("x", 10.0)), 1.0, None);
        let outer = ReassocNode::Wrap(Box::new(inner), 3.0, None);
        let result = layout_l1s_plus(&outer, &L1SPlusSettings::default(), None).done().unwrap();
        let outlines = result.wrap_outlines();
        assert_eq!(outlines.len(), 2);
        for o in outlines {
            let atom_rect = result.fragments_info().next().unwrap().rect;
            assert!(o.polygon.contains_rect(atom_rect, 1e-6));
        }
    }

    #[test]
    fn abort_checked_before_second_line_is_stacked() {
        let x = atom("x", 10.0);
        let y = atom("y", 10.0);
        let tree = ReassocNode::JoinV(Box::new(x), Box::new(y));
        let sig = AbortSignal::new();
        sig.abort();
        let outcome = layout_l1s(&tree, &RocksSettings::default(), Some(&sig));
        assert!(outcome.is_aborted());
    }
}
