//! The explicit cursor contract shared by the view enumerators.
//!
//! ## Learning: Iterators with a Visible Cursor
//!
//! Rust's `Iterator::next` folds "move" and "read" into one call. Some
//! callers want them apart: advance once, then look at the current element
//! several times. `TextEnumerator` exposes that shape. Every enumerator also
//! implements `Iterator`, built on top of this trait, so `for` loops and
//! adapters work as usual.

use crate::ViewResult;

/// A single-pass cursor over the elements of a view.
///
/// States: not started, positioned on an element, exhausted. `current`
/// returns `None` in the first and last state.
pub trait TextEnumerator {
    /// The element type produced.
    type Element;

    /// Moves to the next element. Returns false once exhausted, and keeps
    /// returning false afterwards.
    fn advance(&mut self) -> bool;

    /// The element the cursor is on, if any.
    fn current(&self) -> Option<Self::Element>;

    /// Rewinds to the not-started state.
    ///
    /// # Errors
    ///
    /// [`crate::ViewError::ResetUnsupported`] for enumerators that consume
    /// their input as they go; derive a fresh one from the view instead.
    fn reset(&mut self) -> ViewResult<()>;
}
