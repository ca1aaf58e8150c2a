// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout output: positioned fragments in document order, per-wrap
//! outlines, and the renderable/bounding-box surface built on top of
//! them.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use ragged_polygon::Polygon;
use ragged_tree::Style;

use crate::render::{emit_polygon_path, DrawStyle, RenderTarget, Renderable};

/// One positioned Atom, as stored inside a [`LayoutResult`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlacedFragment {
    pub text: String,
    pub rect: Rect,
    pub line_no: u32,
}

/// A positioned text fragment, as yielded by [`LayoutResult::fragments_info`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FragmentInfo<'a> {
    /// The fragment's source text.
    pub text: &'a str,
    /// Its final bounding rectangle.
    pub rect: Rect,
    /// The (non-decreasing, document-order) line number it was placed on.
    pub line_no: u32,
}

/// A lazy, single-pass iterator over a [`LayoutResult`]'s fragments in
/// document order.
#[derive(Clone)]
pub struct Fragments<'a> {
    inner: core::slice::Iter<'a, PlacedFragment>,
}

impl<'a> Iterator for Fragments<'a> {
    type Item = FragmentInfo<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|f| FragmentInfo {
            text: &f.text,
            rect: f.rect,
            line_no: f.line_no,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// The polygon outline computed for one Wrap, plus the style it should be
/// drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct WrapOutline {
    /// The wrap's rectilinear outline.
    pub polygon: Polygon,
    /// Fill/border styling carried by the originating `Node`.
    pub style: Option<Style>,
}

impl Renderable for WrapOutline {
    fn render(&self, target: &mut dyn RenderTarget, fallback: &DrawStyle) {
        let style = self.style.as_ref();
        let draw_style = DrawStyle {
            fill: None,
            stroke: fallback.stroke,
            stroke_width: fallback.stroke_width,
        };
        let borders = style.map_or(ragged_tree::BorderSides::empty(), |s| s.borders);
        let d = emit_polygon_path(&self.polygon, borders, 0.0);
        if !d.is_empty() {
            target.path(d, draw_style);
        }
    }

    fn bounding_box(&self) -> Option<Rect> {
        self.polygon.bounding_box()
    }
}

/// The full output of a layout algorithm: positioned fragments in
/// document order, one outline per Wrap, and their combined bounding box.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LayoutResult {
    pub(crate) fragments: Vec<PlacedFragment>,
    pub(crate) wraps: Vec<WrapOutline>,
    pub(crate) bounding_box: Option<Rect>,
}

impl LayoutResult {
    /// An empty result: no fragments, no wraps, no bounding box. The
    /// valid output of laying out an empty input tree.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Positioned fragments in document order (pre-order by original Atom
    /// position). One pass only; not restartable.
    #[must_use]
    pub fn fragments_info(&self) -> Fragments<'_> {
        Fragments {
            inner: self.fragments.iter(),
        }
    }

    /// The per-wrap outlines computed for this result (empty for
    /// algorithms that don't compute true polygons, i.e. everything but
    /// L1S+, where each wrap's outline is its padded bounding rectangle).
    #[must_use]
    pub fn wrap_outlines(&self) -> &[WrapOutline] {
        &self.wraps
    }

    /// The smallest rectangle enclosing every fragment and wrap outline,
    /// or `None` for an empty result.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        self.bounding_box
    }

    /// Draw every wrap outline then every fragment's text onto `target`.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        let fallback = DrawStyle {
            fill: None,
            stroke: Some(crate::render::Color::BLACK),
            stroke_width: 1.0,
        };
        for wrap in &self.wraps {
            wrap.render(target, &fallback);
        }
        for f in &self.fragments {
            target.text(
                f.text.clone(),
                kurbo::Point::new(f.rect.x0, f.rect.y1),
                crate::render::FontSpec {
                    name: String::from("sans-serif"),
                    px_size: 12.0,
                },
                DrawStyle::default(),
            );
        }
    }
}

impl Renderable for LayoutResult {
    fn render(&self, target: &mut dyn RenderTarget, _style: &DrawStyle) {
        LayoutResult::render(self, target);
    }

    fn bounding_box(&self) -> Option<Rect> {
        self.bounding_box
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingTarget;

    #[test]
    fn empty_result_has_no_bounding_box() {
        let r = LayoutResult::empty();
        assert_eq!(r.bounding_box(), None);
        assert_eq!(r.fragments_info().count(), 0);
    }

    #[test]
    fn fragments_info_preserves_document_order() {
        let r = LayoutResult {
            fragments: alloc::vec![
                PlacedFragment {
                    text: String::from("a"),
                    rect: Rect::new(0.0, 0.0, 5.0, 5.0),
                    line_no: 0,
                },
                PlacedFragment {
                    text: String::from("b"),
                    rect: Rect::new(5.0, 0.0, 10.0, 5.0),
                    line_no: 0,
                },
            ],
            wraps: Vec::new(),
            bounding_box: Some(Rect::new(0.0, 0.0, 10.0, 5.0)),
        };
        let texts: Vec<&str> = r.fragments_info().map(|f| f.text).collect();
        assert_eq!(texts, alloc::vec!["a", "b"]);
    }

    #[test]
    fn render_emits_text_per_fragment() {
        let r = LayoutResult {
            fragments: alloc::vec![PlacedFragment {
                text: String::from("hi"),
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                line_no: 0,
            }],
            wraps: Vec::new(),
            bounding_box: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
        };
        let mut target = RecordingTarget::default();
        r.render(&mut target);
        assert_eq!(target.commands.len(), 1);
    }
}
