// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ragged Backing: the chunked spatial store of positioned rectangles that
//! the Rocks (L1S/L1S+) layout algorithm builds as it walks a reassociated
//! tree.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backing;

pub use backing::{Backing, Entry, EntryKind};
