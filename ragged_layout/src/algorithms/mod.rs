// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The five layout algorithms, each a free function over a
//! [`ragged_tree::ReassocNode`] and its own settings type.

mod blocks;
mod l1p;
mod l1s;
mod sblocks;

pub use blocks::layout_blocks;
pub use l1p::layout_l1p;
pub use l1s::{layout_l1s, layout_l1s_plus};
pub use sblocks::layout_sblocks;
