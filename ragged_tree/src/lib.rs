// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ragged Tree: the input layout tree, the text-measurement oracle, and
//! reassociation into a binary join/wrap expression tree.
//!
//! A [`LayoutNode`] tree is what a caller builds from source text (atoms,
//! spacers, hard newlines, and padded/styled interior nodes). [`measure_tree`]
//! runs it through a [`Measure`] oracle to produce a [`MeasuredNode`] tree.
//! [`reassociate`] then flattens that tree — newlines and all — into a
//! [`ReassocNode`] expression tree of `JoinH`/`JoinV`/`Wrap` nodes, which is
//! what every layout algorithm in `ragged_layout` actually consumes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod measure;
mod reassoc;
mod types;

pub use measure::{empty_atom_rect, CachingMeasure, FixedWidthMeasure, Measure};
pub use reassoc::{reassociate, ReassocNode};
pub use types::{BorderSides, LayoutNode, MeasuredAtom, MeasuredNode, Style};

pub use measure::measure_tree;
