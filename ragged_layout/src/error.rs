// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fatal error taxonomy. Every variant here is an internal invariant
//! violation: none is ever produced by a valid input tree or by this
//! crate's own output feeding back into itself.

/// A fatal, non-recoverable layout error.
///
/// Recoverable conditions (empty trees, zero-width atoms, wraps with no
/// non-spacer fragments) are never represented here — they are valid
/// inputs with well-defined outputs. Cancellation is likewise not an
/// error; see [`crate::abort::Outcome`].
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum LayoutError {
    /// Reassociation produced a token stream with two adjacent operators
    /// (or zero expressions where one was required). Indicates a bug in
    /// the reassociation pass, not a caller input.
    #[error("malformed reassociation token stream")]
    MalformedTokenStream,
    /// A rectilinear path was built from a segment that is neither
    /// horizontal nor vertical.
    #[error("non-axis-aligned segment")]
    NonRectilinearSegment,
}

/// A `Result` specialized to [`LayoutError`], named to avoid colliding
/// with [`crate::result::LayoutResult`] (the layout output value).
pub type Fallible<T> = Result<T, LayoutError>;
