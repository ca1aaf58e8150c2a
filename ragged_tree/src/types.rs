// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the input layout tree: node kinds, style, and measured
//! text.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

/// Fill color plus an optional set of borders, carried by an interior
/// [`LayoutNode::Node`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Fill color, as an opaque RGBA-ish string (interpreted by the render
    /// target, not by this crate).
    pub fill: Option<String>,
    /// Which sides get a stroked border when rendered.
    pub borders: BorderSides,
}

bitflags::bitflags! {
    /// Which of a rectangle's four sides carry a stroked border.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BorderSides: u8 {
        /// Top edge.
        const TOP = 1 << 0;
        /// Bottom edge.
        const BOTTOM = 1 << 1;
        /// Left edge.
        const LEFT = 1 << 2;
        /// Right edge.
        const RIGHT = 1 << 3;
    }
}

/// A node of the input layout tree, before measurement.
///
/// Invariants (see module docs of [`crate`]): exactly one [`LayoutNode::Newline`]
/// between sibling groups produces one line break; `N` consecutive newlines
/// produce `N` blank rows. A [`LayoutNode::Node`]'s `padding` is the single
/// non-negative number of units added uniformly on all four sides when the
/// node is wrapped.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutNode {
    /// A leaf text fragment.
    Atom {
        /// The text to measure and render.
        text: String,
    },
    /// Horizontal whitespace. Either an explicit width or a run of text to
    /// measure (e.g. a run of spaces whose width depends on the font).
    Spacer {
        /// Text to measure for the spacer's width, if not given explicitly.
        text: Option<String>,
        /// Explicit width, if not derived from `text`.
        width: Option<f64>,
    },
    /// A hard break between siblings.
    Newline,
    /// An interior node enclosing `children` with uniform `padding`.
    Node {
        /// Ordered children.
        children: Vec<LayoutNode>,
        /// Non-negative padding applied uniformly on all sides when wrapped.
        padding: f64,
        /// Optional fill/border styling.
        style: Option<Style>,
    },
}

impl LayoutNode {
    /// Convenience constructor for an unstyled, zero-padding interior node.
    #[must_use]
    pub fn node(children: Vec<Self>) -> Self {
        Self::Node {
            children,
            padding: 0.0,
            style: None,
        }
    }

    /// Convenience constructor for a padded, optionally styled interior node.
    #[must_use]
    pub fn wrap(children: Vec<Self>, padding: f64, style: Option<Style>) -> Self {
        Self::Node {
            children,
            padding,
            style,
        }
    }
}

/// A measured text fragment: its original text plus bounding rectangle.
/// Carried through reassociation and layout so the final result surface
/// can report `{ text, rect, lineNo }` per fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredAtom {
    /// The original source text.
    pub text: String,
    /// The oracle-measured bounding rectangle.
    pub rect: Rect,
}

/// A node of the layout tree after every [`LayoutNode::Atom`]/[`LayoutNode::Spacer`]
/// has been measured against the text-measure oracle.
#[derive(Clone, Debug, PartialEq)]
pub enum MeasuredNode {
    /// A measured text fragment.
    Atom(MeasuredAtom),
    /// A measured spacer; only its width is meaningful.
    Spacer(f64),
    /// A hard break between siblings.
    Newline,
    /// An interior node, mirroring [`LayoutNode::Node`].
    Node {
        /// Ordered, measured children.
        children: Vec<MeasuredNode>,
        /// Non-negative uniform padding.
        padding: f64,
        /// Optional fill/border styling.
        style: Option<Style>,
    },
}
