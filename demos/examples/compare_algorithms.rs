// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lay out the same ragged document with every algorithm and render each
//! result to its own SVG file.
//!
//! Run:
//! - `cargo run -p ragged_demos --example compare_algorithms`

use ragged_layout::render::{Color, DrawStyle, FontSpec, RenderTarget};
use ragged_layout::settings::{Algorithm, BlocksSettings, L1PSettings, L1SPlusSettings, L1SSettings, SBlocksSettings};
use ragged_layout::{layout_document, LayoutResult};
use ragged_tree::{FixedWidthMeasure, LayoutNode, Style};

/// Minimal `RenderTarget` that accumulates an SVG document.
#[derive(Default)]
struct SvgTarget {
    body: String,
}

fn color_attr(c: Option<Color>, fallback: &str) -> String {
    match c {
        Some(c) => format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
        None => fallback.into(),
    }
}

impl RenderTarget for SvgTarget {
    fn rect(&mut self, rect: kurbo::Rect, style: DrawStyle) {
        self.body.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" />\n",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            color_attr(style.fill, "none"),
            color_attr(style.stroke, "none"),
        ));
    }

    fn line(&mut self, p1: kurbo::Point, p2: kurbo::Point, style: DrawStyle) {
        self.body.push_str(&format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" />\n",
            p1.x,
            p1.y,
            p2.x,
            p2.y,
            color_attr(style.stroke, "black"),
        ));
    }

    fn path(&mut self, d: String, style: DrawStyle) {
        self.body.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" />\n",
            d,
            color_attr(style.fill, "none"),
            color_attr(style.stroke, "black"),
        ));
    }

    fn text(&mut self, text: String, origin: kurbo::Point, font: FontSpec, _style: DrawStyle) {
        self.body.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\">{}</text>\n",
            origin.x, origin.y, font.name, font.px_size, text,
        ));
    }
}

/// A short document: a heading paragraph and a ragged two-column note,
/// nested inside a bordered outer panel.
fn sample_document() -> LayoutNode {
    let heading = LayoutNode::wrap(
        vec![LayoutNode::Atom { text: "Ragged layout demo".into() }],
        4.0,
        Some(Style {
            fill: None,
            borders: ragged_tree::BorderSides::all(),
        }),
    );
    let note = LayoutNode::wrap(
        vec![
            LayoutNode::Atom { text: "left column of modest width".into() },
            LayoutNode::Newline,
            LayoutNode::Atom { text: "a considerably wider second line".into() },
        ],
        2.0,
        None,
    );
    LayoutNode::node(vec![heading, LayoutNode::Newline, LayoutNode::Newline, note])
}

fn render_to_svg(result: &LayoutResult, name: &str) {
    let mut target = SvgTarget::default();
    result.render(&mut target);
    let bbox = result.bounding_box().unwrap_or(kurbo::Rect::ZERO);
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n{}</svg>\n",
        bbox.x0 - 10.0,
        bbox.y0 - 10.0,
        bbox.width() + 20.0,
        bbox.height() + 20.0,
        target.body,
    );
    let path = format!("/tmp/ragged_demo_{name}.svg");
    std::fs::write(&path, svg).expect("write demo SVG");
    println!("{name}: wrote {path}");
}

fn main() {
    let tree = sample_document();
    let mut measure = FixedWidthMeasure {
        char_width: 7.0,
        ascent: 10.0,
        descent: 3.0,
    };

    let algorithms: [(&str, Algorithm); 5] = [
        ("l1p", Algorithm::L1P(L1PSettings::default())),
        ("l1s", Algorithm::L1S(L1SSettings::default())),
        ("l1s_plus", Algorithm::L1SPlus(L1SPlusSettings::default())),
        ("blocks", Algorithm::Blocks(BlocksSettings)),
        ("sblocks", Algorithm::SBlocks(SBlocksSettings::default())),
    ];

    for (name, algo) in algorithms {
        let result = layout_document(&tree, &mut measure, &algo, None)
            .done()
            .expect("layout never aborts without a signal");
        println!(
            "{name}: {} fragments, {} wrap outlines, bbox {:?}",
            result.fragments_info().count(),
            result.wrap_outlines().len(),
            result.bounding_box(),
        );
        render_to_svg(&result, name);
    }
}
