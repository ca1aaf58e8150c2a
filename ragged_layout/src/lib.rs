// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ragged Layout: the ragged-text layout engine.
//!
//! A caller builds a [`ragged_tree::LayoutNode`] tree, measures it against a
//! [`ragged_tree::Measure`] oracle, reassociates the result into a
//! [`ragged_tree::ReassocNode`] expression tree, and hands that tree plus an
//! [`Algorithm`] choice to [`layout`]. The result is a [`LayoutResult`]:
//! positioned text fragments in document order, one outline per wrap
//! (populated only by L1S+ and S-Blocks), and a combined bounding box.
//!
//! [`layout_document`] is the all-in-one convenience that also runs
//! measurement and reassociation.

#![no_std]

extern crate alloc;

mod algorithms;
pub mod abort;
pub mod error;
pub mod render;
pub mod result;
pub mod settings;

use kurbo::Rect;
use ragged_tree::{reassociate, LayoutNode, Measure};

pub use abort::{AbortSignal, Outcome};
pub use error::{Fallible, LayoutError};
pub use result::{FragmentInfo, Fragments, LayoutResult, WrapOutline};
pub use settings::{
    Algorithm, BlocksSettings, L1PSettings, L1SPlusSettings, L1SSettings, RocksSettings, SBlocksSettings, Settings,
    SettingField,
};

#[cfg(feature = "std")]
pub use abort::SharedAbortSignal;

/// Lay out an already-reassociated tree with the chosen algorithm.
///
/// This is the single entry point every algorithm module is reached
/// through; callers who already have a [`ragged_tree::ReassocNode`] (e.g.
/// from caching a reassociation across repeated layouts with different
/// settings) should call this directly rather than [`layout_document`].
#[must_use]
pub fn layout(node: &ragged_tree::ReassocNode, algorithm: &Algorithm, abort: Option<&AbortSignal>) -> Outcome<LayoutResult> {
    match algorithm {
        Algorithm::L1P(settings) => algorithms::layout_l1p(node, settings, abort),
        Algorithm::L1S(settings) => algorithms::layout_l1s(node, settings, abort),
        Algorithm::L1SPlus(settings) => algorithms::layout_l1s_plus(node, settings, abort),
        Algorithm::Blocks(settings) => algorithms::layout_blocks(node, settings, abort),
        Algorithm::SBlocks(settings) => algorithms::layout_sblocks(node, settings, abort),
    }
}

/// Measure, reassociate, and lay out a source [`LayoutNode`] tree in one
/// call. Equivalent to `measure_tree` + `reassociate` + [`layout`], for
/// callers with no reason to keep the intermediate trees around.
#[must_use]
pub fn layout_document<M: Measure>(
    node: &LayoutNode,
    measure: &mut M,
    algorithm: &Algorithm,
    abort: Option<&AbortSignal>,
) -> Outcome<LayoutResult> {
    let measured = ragged_tree::measure_tree(node, measure);
    let reassociated = reassociate(&measured, Rect::ZERO);
    layout(&reassociated, algorithm, abort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use ragged_tree::FixedWidthMeasure;

    #[test]
    fn layout_document_places_a_single_atom() {
        let tree = LayoutNode::Atom { text: alloc::string::String::from("hi") };
        let mut measure = FixedWidthMeasure::default();
        let result = layout_document(&tree, &mut measure, &Algorithm::default(), None).done().unwrap();
        let frags: alloc::vec::Vec<_> = result.fragments_info().collect();
        assert_eq!(frags.len(), 1);
        assert_eq!(frags[0].text, "hi");
    }

    #[test]
    fn every_algorithm_agrees_on_a_single_unwrapped_atom() {
        let tree = LayoutNode::Atom { text: alloc::string::String::from("x") };
        let mut measure = FixedWidthMeasure::default();
        let measured = ragged_tree::measure_tree(&tree, &mut measure);
        let reassociated = reassociate(&measured, Rect::ZERO);

        let algorithms = vec![
            Algorithm::L1P(L1PSettings::default()),
            Algorithm::L1S(L1SSettings::default()),
            Algorithm::L1SPlus(L1SPlusSettings::default()),
            Algorithm::Blocks(BlocksSettings),
            Algorithm::SBlocks(SBlocksSettings::default()),
        ];
        let mut rects = vec![];
        for algo in &algorithms {
            let result = layout(&reassociated, algo, None).done().unwrap();
            let frags: alloc::vec::Vec<_> = result.fragments_info().collect();
            assert_eq!(frags.len(), 1);
            rects.push(frags[0].rect);
        }
        for r in &rects[1..] {
            assert_eq!(*r, rects[0]);
        }
    }
}
