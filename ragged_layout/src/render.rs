// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering seam: an owned [`DrawCommand`] enum, the [`RenderTarget`]
//! trait that consumes them, [`Renderable`] for anything that can draw
//! itself against a target, and [`stack`] to compose two renderables.
//!
//! The concrete SVG emitter is out of scope; this module defines and
//! tests the seam a host would implement against.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use ragged_polygon::{Path, Polygon};
use ragged_tree::BorderSides;

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully opaque black.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// Construct an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Fill/stroke styling shared by every draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawStyle {
    /// Fill color, if any.
    pub fill: Option<Color>,
    /// Stroke color, if any.
    pub stroke: Option<Color>,
    /// Stroke width, meaningful only when `stroke` is set.
    pub stroke_width: f64,
}

/// Font selection for a [`DrawCommand::Text`].
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub name: String,
    /// Pixel size.
    pub px_size: f64,
}

/// One owned draw call, as consumed by a [`RenderTarget`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// An axis-aligned filled/stroked rectangle.
    Rect {
        /// The rectangle, in target coordinates.
        rect: Rect,
        /// Fill/stroke styling.
        style: DrawStyle,
    },
    /// A straight stroked segment.
    Line {
        /// Segment start.
        p1: Point,
        /// Segment end.
        p2: Point,
        /// Fill/stroke styling (only `stroke` is meaningful).
        style: DrawStyle,
    },
    /// An SVG-style path (`M`, `L`, `A`, `Z` commands).
    Path {
        /// The path data string.
        d: String,
        /// Fill/stroke styling.
        style: DrawStyle,
    },
    /// Stroked text at an origin.
    Text {
        /// The text content.
        text: String,
        /// Baseline-left origin.
        origin: Point,
        /// Font selection.
        font: FontSpec,
        /// Fill/stroke styling.
        style: DrawStyle,
    },
}

/// Something that consumes [`DrawCommand`]s. A host implements this over
/// an actual SVG writer, a canvas backend, or (in tests) a recording
/// `Vec<DrawCommand>`.
pub trait RenderTarget {
    /// Draw an axis-aligned rectangle.
    fn rect(&mut self, rect: Rect, style: DrawStyle);
    /// Draw a straight segment.
    fn line(&mut self, p1: Point, p2: Point, style: DrawStyle);
    /// Draw an SVG path.
    fn path(&mut self, d: String, style: DrawStyle);
    /// Draw text at an origin.
    fn text(&mut self, text: String, origin: Point, font: FontSpec, style: DrawStyle);
}

/// A [`RenderTarget`] that records every call, for use in tests.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    /// Commands recorded so far, in call order.
    pub commands: Vec<DrawCommand>,
}

impl RenderTarget for RecordingTarget {
    fn rect(&mut self, rect: Rect, style: DrawStyle) {
        self.commands.push(DrawCommand::Rect { rect, style });
    }

    fn line(&mut self, p1: Point, p2: Point, style: DrawStyle) {
        self.commands.push(DrawCommand::Line { p1, p2, style });
    }

    fn path(&mut self, d: String, style: DrawStyle) {
        self.commands.push(DrawCommand::Path { d, style });
    }

    fn text(&mut self, text: String, origin: Point, font: FontSpec, style: DrawStyle) {
        self.commands.push(DrawCommand::Text { text, origin, font, style });
    }
}

/// Anything that can draw itself onto a [`RenderTarget`] and report the
/// rectangle it occupies.
pub trait Renderable {
    /// Draw this value onto `target` with the given fallback style (a
    /// renderable may ignore it and use its own per-node styling).
    fn render(&self, target: &mut dyn RenderTarget, style: &DrawStyle);
    /// The smallest rectangle enclosing everything this value draws, or
    /// `None` if it draws nothing.
    fn bounding_box(&self) -> Option<Rect>;
}

/// Compose two renderables: render `a` then `b`, reporting the union of
/// their bounding boxes. Does not itself translate either renderable —
/// whatever vertical offset separates them must already be baked into
/// their own coordinates, as every layout algorithm here does before
/// constructing renderables.
pub struct Stacked<'a> {
    a: &'a dyn Renderable,
    b: &'a dyn Renderable,
}

impl Renderable for Stacked<'_> {
    fn render(&self, target: &mut dyn RenderTarget, style: &DrawStyle) {
        self.a.render(target, style);
        self.b.render(target, style);
    }

    fn bounding_box(&self) -> Option<Rect> {
        match (self.a.bounding_box(), self.b.bounding_box()) {
            (None, r) | (r, None) => r,
            (Some(ra), Some(rb)) => Some(ra.union(rb)),
        }
    }
}

/// Build a [`Stacked`] composing `a` and `b` top-to-bottom.
#[must_use]
pub fn stack<'a>(a: &'a dyn Renderable, b: &'a dyn Renderable) -> Stacked<'a> {
    Stacked { a, b }
}

/// Emit one path's point list as SVG `M`/`L`/`Z` data, with no corner
/// rounding.
fn emit_straight(path: &Path) -> String {
    let mut d = String::new();
    if path.is_empty() {
        return d;
    }
    let first = path.0[0];
    d.push_str(&format!("M{},{} ", first.x, first.y));
    for p in &path.0[1..] {
        d.push_str(&format!("L{},{} ", p.x, p.y));
    }
    d.push('Z');
    d
}

/// Emit a rectangular (4-vertex) path with its four corners rounded by
/// `radius` on sides present in `borders`, clamped to half the shorter
/// adjoining edge. A side absent from `borders` breaks the path into a
/// separate `M … L …` fragment rather than drawing through empty space.
fn emit_rounded_rect(path: &Path, borders: BorderSides, radius: f64) -> String {
    if path.len() != 4 {
        return emit_straight(path);
    }
    let r = path
        .edges()
        .map(|(a, b)| (a.x - b.x).hypot(a.y - b.y))
        .fold(f64::INFINITY, f64::min)
        / 2.0;
    let radius = radius.min(r).max(0.0);

    // All sides present and a non-zero radius: one closed rounded-rect path.
    if borders.is_all() && radius > 0.0 {
        let bbox = {
            let xs: Vec<f64> = path.0.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = path.0.iter().map(|p| p.y).collect();
            Rect::new(
                xs.iter().cloned().fold(f64::MAX, f64::min),
                ys.iter().cloned().fold(f64::MAX, f64::min),
                xs.iter().cloned().fold(f64::MIN, f64::max),
                ys.iter().cloned().fold(f64::MIN, f64::max),
            )
        };
        return format!(
            "M{},{} L{},{} A{},{} 0 0 1 {},{} L{},{} A{},{} 0 0 1 {},{} L{},{} A{},{} 0 0 1 {},{} L{},{} A{},{} 0 0 1 {},{} Z",
            bbox.x0 + radius, bbox.y0,
            bbox.x1 - radius, bbox.y0,
            radius, radius, bbox.x1, bbox.y0 + radius,
            bbox.x1, bbox.y1 - radius,
            radius, radius, bbox.x1 - radius, bbox.y1,
            bbox.x0 + radius, bbox.y1,
            radius, radius, bbox.x0, bbox.y1 - radius,
            bbox.x0, bbox.y0 + radius,
            radius, radius, bbox.x0 + radius, bbox.y0,
        );
    }

    // Otherwise emit straight fragments, one `M … L …` per maximal run of
    // present sides, skipping absent ones entirely. Edge `i` of a
    // 4-vertex CCW rectangle path runs top, left, bottom, right in turn
    // (see `rectunion` module docs for the edge-emission convention).
    let side_present = [
        borders.contains(BorderSides::TOP),
        borders.contains(BorderSides::LEFT),
        borders.contains(BorderSides::BOTTOM),
        borders.contains(BorderSides::RIGHT),
    ];
    let n = path.0.len();
    let mut out = String::new();
    let mut i = 0;
    while i < n {
        if !side_present[i] {
            i += 1;
            continue;
        }
        out.push_str(&format!("M{},{} ", path.0[i].x, path.0[i].y));
        let mut j = i;
        while j < n && side_present[j] {
            let next = path.0[(j + 1) % n];
            out.push_str(&format!("L{},{} ", next.x, next.y));
            j += 1;
        }
        i = j.max(i + 1);
    }
    out
}

/// Emit an entire polygon's path data, rounding rectangular single-path
/// polygons and falling back to straight segments for anything else
/// (multi-path polygons, or simplified outlines with more than 4
/// vertices).
#[must_use]
pub fn emit_polygon_path(polygon: &Polygon, borders: BorderSides, radius: f64) -> String {
    if polygon.0.len() == 1 {
        return emit_rounded_rect(&polygon.0[0], borders, radius);
    }
    let mut out = String::new();
    for path in &polygon.0 {
        out.push_str(&emit_straight(path));
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    struct Dot(Rect);

    impl Renderable for Dot {
        fn render(&self, target: &mut dyn RenderTarget, style: &DrawStyle) {
            target.rect(self.0, style.clone());
        }

        fn bounding_box(&self) -> Option<Rect> {
            Some(self.0)
        }
    }

    #[test]
    fn stack_unions_bounding_boxes_and_renders_both() {
        let a = Dot(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Dot(Rect::new(0.0, 20.0, 10.0, 30.0));
        let s = stack(&a, &b);
        assert_eq!(s.bounding_box(), Some(Rect::new(0.0, 0.0, 10.0, 30.0)));
        let mut target = RecordingTarget::default();
        s.render(&mut target, &DrawStyle::default());
        assert_eq!(target.commands.len(), 2);
    }

    #[test]
    fn rounded_rect_all_sides_emits_single_closed_path() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let path = Path(vec![
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ]);
        let d = emit_rounded_rect(&path, BorderSides::all(), 2.0);
        assert!(d.starts_with('M'));
        assert!(d.ends_with('Z'));
        assert!(d.contains('A'));
    }

    #[test]
    fn missing_side_breaks_path_into_fragments() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let path = Path(vec![
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ]);
        let mut borders = BorderSides::all();
        borders.remove(BorderSides::LEFT);
        let d = emit_rounded_rect(&path, borders, 2.0);
        assert_eq!(d.matches('M').count(), 2);
    }
}
