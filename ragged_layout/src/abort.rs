// Copyright 2025 the Ragged Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperative cancellation: a `Copy` handle over a shared flag, checked
//! between iterations of the two named long-running loops (the outer
//! line-stacking loop and the polygon simplification fixed-point loop).
//!
//! The core never spawns threads and never blocks; a driver running it on
//! a background executor sets the flag from outside the call.

use alloc::rc::Rc;
use core::cell::Cell;

#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::sync::atomic::{AtomicBool, Ordering};

/// The result of a cancellable entry point: either it ran to completion,
/// or it was cancelled at a checkpoint.
///
/// This is not a [`crate::error::LayoutError`] — cancellation is normal
/// control flow, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Completed without cancellation.
    Done(T),
    /// Cancelled at a checkpoint before completion.
    Aborted,
}

impl<T> Outcome<T> {
    /// Whether this outcome is [`Outcome::Done`].
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Whether this outcome is [`Outcome::Aborted`].
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Extract the completed value, or `None` if aborted.
    #[must_use]
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(v) => Some(v),
            Self::Aborted => None,
        }
    }
}

/// Single-threaded abort signal, backed by a `Cell<bool>`. Cheap to
/// clone/copy; every clone observes the same flag.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    inner: Rc<Cell<bool>>,
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortSignal {
    /// A fresh, unset signal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Cell::new(false)),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn abort(&self) {
        self.inner.set(true);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.inner.get()
    }
}

/// Thread-shareable abort signal, backed by an `AtomicBool`. Requires the
/// `std` feature (the underlying flag works equally well under `no_std`
/// with `core::sync::atomic`, but this crate only exposes the `std`
/// form since that is the only consumer so far).
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SharedAbortSignal {
    inner: Arc<AtomicBool>,
}

#[cfg(feature = "std")]
impl Default for SharedAbortSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl SharedAbortSignal {
    /// A fresh, unset signal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation from any thread. Idempotent.
    pub fn abort(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_signal_is_not_aborted() {
        let s = AbortSignal::new();
        assert!(!s.is_aborted());
    }

    #[test]
    fn abort_is_observed_by_clones() {
        let s = AbortSignal::new();
        let clone = s.clone();
        clone.abort();
        assert!(s.is_aborted());
    }

    #[test]
    fn outcome_done_extracts_value() {
        let o: Outcome<i32> = Outcome::Done(5);
        assert_eq!(o.done(), Some(5));
        let a: Outcome<i32> = Outcome::Aborted;
        assert_eq!(a.done(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn shared_signal_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedAbortSignal>();
    }
}
