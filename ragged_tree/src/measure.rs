// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text-measurement oracle and a memoizing [`measure_tree`] pass.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::types::{LayoutNode, MeasuredAtom, MeasuredNode};

/// An external, deterministic text-measurement oracle.
///
/// Implementations must return a rectangle with `top <= 0 <= bottom` and
/// `left = 0`. The core invokes this exactly once per distinct `(text)`
/// value per [`measure_tree`] call; results are cached by value so repeated
/// atoms (e.g. the same keyword appearing many times) are only measured
/// once.
pub trait Measure {
    /// Measure a run of text, returning its bounding rectangle relative to
    /// an origin at the text's baseline-left.
    fn measure(&mut self, text: &str) -> Rect;
}

/// A [`Measure`] implementation that memoizes an inner oracle by exact text
/// value.
#[derive(Debug, Default)]
pub struct CachingMeasure<M> {
    inner: M,
    cache: HashMap<String, Rect>,
}

impl<M: Measure> CachingMeasure<M> {
    /// Wrap `inner` with a fresh, empty cache.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }
}

impl<M: Measure> Measure for CachingMeasure<M> {
    fn measure(&mut self, text: &str) -> Rect {
        if let Some(r) = self.cache.get(text) {
            return *r;
        }
        let r = self.inner.measure(text);
        self.cache.insert(String::from(text), r);
        r
    }
}

/// Walk a [`LayoutNode`] tree, replacing every `Atom`/`Spacer` with its
/// measured rectangle/width. An empty input tree is a valid input: measuring
/// it yields an empty [`MeasuredNode::Node`] with no children.
pub fn measure_tree<M: Measure>(node: &LayoutNode, measure: &mut M) -> MeasuredNode {
    match node {
        LayoutNode::Atom { text } => MeasuredNode::Atom(MeasuredAtom {
            text: text.clone(),
            rect: measure.measure(text),
        }),
        LayoutNode::Spacer { text, width } => {
            let w = match (text, width) {
                (_, Some(w)) => *w,
                (Some(t), None) => {
                    let r = measure.measure(t);
                    r.width()
                }
                (None, None) => 0.0,
            };
            MeasuredNode::Spacer(w)
        }
        LayoutNode::Newline => MeasuredNode::Newline,
        LayoutNode::Node {
            children,
            padding,
            style,
        } => MeasuredNode::Node {
            children: children.iter().map(|c| measure_tree(c, measure)).collect(),
            padding: *padding,
            style: style.clone(),
        },
    }
}

/// Rectangle used for the "empty atom" sentinel inserted by reassociation.
/// Zero-width, zero-height, matching the rule that zero-width atoms are
/// valid and contribute normally to ordering.
#[must_use]
pub fn empty_atom_rect() -> Rect {
    Rect::ZERO
}

/// A trivial measure for tests and non-text-rendering use: returns a fixed
/// box per character count.
#[derive(Clone, Copy, Debug)]
pub struct FixedWidthMeasure {
    /// Width of one character.
    pub char_width: f64,
    /// Ascent (distance above baseline, stored as a negative `top`).
    pub ascent: f64,
    /// Descent (distance below baseline).
    pub descent: f64,
}

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        Self {
            char_width: 1.0,
            ascent: 1.0,
            descent: 0.0,
        }
    }
}

impl Measure for FixedWidthMeasure {
    fn measure(&mut self, text: &str) -> Rect {
        let w = text.chars().count() as f64 * self.char_width;
        Rect::new(0.0, -self.ascent, w, self.descent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caching_measure_calls_inner_once() {
        struct Counting {
            calls: u32,
        }
        impl Measure for Counting {
            fn measure(&mut self, text: &str) -> Rect {
                self.calls += 1;
                Rect::new(0.0, 0.0, text.len() as f64, 1.0)
            }
        }
        let mut m = CachingMeasure::new(Counting { calls: 0 });
        let _ = m.measure("ab");
        let _ = m.measure("ab");
        let _ = m.measure("abc");
        assert_eq!(m.inner.calls, 2);
    }

    #[test]
    fn measure_tree_empty_node_yields_empty_node() {
        let mut m = FixedWidthMeasure::default();
        let t = LayoutNode::node(Vec::new());
        let measured = measure_tree(&t, &mut m);
        match measured {
            MeasuredNode::Node { children, .. } => assert!(children.is_empty()),
            _ => unreachable!("node stays a node"),
        }
    }
}
