// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ragged Polygon: the rectilinear-polygon kernel shared by L1S+ and
//! S-Blocks layout — union of rectangles into counter-clockwise paths,
//! offsetting, point-in-polygon, and antiknob/clockwise-corner
//! simplification under inclusion/exclusion constraints.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod offset;
mod path;
mod polygon;
mod rectunion;
mod simplify;

pub use offset::offset_path;
pub use path::{rect_path_intersection_area, NonAxisAlignedSegment, Path};
pub use polygon::Polygon;
pub use rectunion::from_rectangles;
pub use simplify::simplify_path;
