// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Backing`]: a chunked spatial store of placed rectangles and
//! spacers, indexed by insertion order.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;
use kurbo::{Rect, Vec2};
use smallvec::SmallVec;

use ragged_geometry::translate;

/// What kind of thing occupies a backing slot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EntryKind {
    /// A positioned, padded rectangle (an atom).
    Rect {
        /// The maximum padding this rectangle may be inflated by when
        /// computing leading against a neighboring chunk; used to decide
        /// how far a chunked top-down scan must continue.
        max_padding: f64,
    },
    /// A spacer: contributes geometry (for translation/advance) but never
    /// participates in leading queries and is never chunk-indexed.
    Spacer,
}

/// One placed entry in the [`Backing`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry {
    /// Current world-space rectangle.
    pub rect: Rect,
    /// What this entry is.
    pub kind: EntryKind,
}

fn chunk_coord(y: f64, chunk_height: f64) -> i64 {
    debug_assert!(chunk_height > 0.0, "chunk height must be positive");
    (y / chunk_height).floor() as i64
}

/// A store of placed rectangles/spacers, each assigned an immutable integer
/// index in insertion order, bucketed by vertical "chunks" of fixed pixel
/// height so spatial queries only visit overlapping chunks.
///
/// Entries are appended in document order during a layout walk and then
/// repeatedly translated as the walk ascends through `JoinV`/`Wrap` nodes;
/// the chunk index of a rectangle is recomputed on every translate.
#[derive(Clone, Debug)]
pub struct Backing {
    entries: Vec<Entry>,
    chunk_height: f64,
    chunks: HashMap<i64, SmallVec<[usize; 8]>>,
}

impl Backing {
    /// Create an empty backing with the given chunk height (in the same
    /// units as layout coordinates).
    #[must_use]
    pub fn new(chunk_height: f64) -> Self {
        Self {
            entries: Vec::new(),
            chunk_height,
            chunks: HashMap::new(),
        }
    }

    /// Number of entries ever appended (translate/remove never change
    /// this; indices are stable for the lifetime of the backing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a positioned rectangle, bucketing it by the chunks its
    /// `max_padding`-inflated extent overlaps. Returns its index.
    pub fn append_rect(&mut self, rect: Rect, max_padding: f64) -> usize {
        let idx = self.entries.len();
        self.entries.push(Entry {
            rect,
            kind: EntryKind::Rect { max_padding },
        });
        self.bucket(idx, rect, max_padding);
        idx
    }

    /// Append a spacer of the given width at the origin. Returns its
    /// index. Spacers are never chunk-indexed.
    pub fn append_spacer(&mut self, width: f64) -> usize {
        let idx = self.entries.len();
        self.entries.push(Entry {
            rect: Rect::new(0.0, 0.0, width, 0.0),
            kind: EntryKind::Spacer,
        });
        idx
    }

    /// Translate every entry in `[range.start, range.end)` by `v`,
    /// re-bucketing rectangles into their new chunks.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn translate_range(&mut self, range: Range<usize>, v: Vec2) {
        assert!(range.end <= self.entries.len(), "translate range out of bounds");
        for i in range {
            let entry = self.entries[i];
            if let EntryKind::Rect { max_padding } = entry.kind {
                self.unbucket(i, entry.rect, max_padding);
                let moved = translate(entry.rect, v);
                self.entries[i].rect = moved;
                self.bucket(i, moved, max_padding);
            } else {
                self.entries[i].rect = translate(entry.rect, v);
            }
        }
    }

    /// Widen every rectangle entry's `max_padding` in
    /// `[range.start, range.end)` by `delta` (additive, for a wrap that
    /// encloses an already-built range), re-bucketing as needed. No-op on
    /// spacer entries.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    pub fn widen_max_padding(&mut self, range: Range<usize>, delta: f64) {
        assert!(range.end <= self.entries.len(), "widen range out of bounds");
        for i in range {
            let entry = self.entries[i];
            if let EntryKind::Rect { max_padding } = entry.kind {
                self.unbucket(i, entry.rect, max_padding);
                let widened = max_padding + delta;
                self.entries[i].kind = EntryKind::Rect { max_padding: widened };
                self.bucket(i, entry.rect, widened);
            }
        }
    }

    /// Look up an entry by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Entry {
        self.entries[index]
    }

    /// Iterate chunk coordinates (descending, i.e. top-down in a
    /// y-grows-downward world) that overlap `[y_min, y_max]`, along with
    /// the indices bucketed there.
    pub fn chunks_overlapping(&self, y_min: f64, y_max: f64) -> impl Iterator<Item = &[usize]> + '_ {
        let lo = chunk_coord(y_min, self.chunk_height);
        let hi = chunk_coord(y_max, self.chunk_height);
        (lo..=hi)
            .rev()
            .filter_map(move |c| self.chunks.get(&c).map(SmallVec::as_slice))
    }

    fn bucket(&mut self, idx: usize, rect: Rect, max_padding: f64) {
        let lo = chunk_coord(rect.y0 - max_padding, self.chunk_height);
        let hi = chunk_coord(rect.y1 + max_padding, self.chunk_height);
        for c in lo..=hi {
            self.chunks.entry(c).or_default().push(idx);
        }
    }

    fn unbucket(&mut self, idx: usize, rect: Rect, max_padding: f64) {
        let lo = chunk_coord(rect.y0 - max_padding, self.chunk_height);
        let hi = chunk_coord(rect.y1 + max_padding, self.chunk_height);
        for c in lo..=hi {
            if let Some(bucket) = self.chunks.get_mut(&c) {
                bucket.retain(|&i| i != idx);
                if bucket.is_empty() {
                    self.chunks.remove(&c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_rebuckets_rectangles() {
        let mut b = Backing::new(10.0);
        let i = b.append_rect(Rect::new(0.0, 0.0, 5.0, 5.0), 0.0);
        assert_eq!(b.chunks_overlapping(0.0, 5.0).flatten().count(), 1);
        b.translate_range(i..i + 1, Vec2::new(0.0, 100.0));
        assert_eq!(b.chunks_overlapping(0.0, 5.0).flatten().count(), 0);
        assert_eq!(b.chunks_overlapping(100.0, 105.0).flatten().count(), 1);
    }

    #[test]
    fn spacer_is_never_bucketed() {
        let mut b = Backing::new(10.0);
        let _ = b.append_spacer(4.0);
        assert_eq!(b.chunks_overlapping(-1000.0, 1000.0).flatten().count(), 0);
    }
}
