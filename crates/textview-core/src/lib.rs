//! # Textview Core
//!
//! Zero-copy views over immutable UTF-16 text buffers.
//!
//! ## Key Concepts for Learning Rust
//!
//! ### Ownership & Borrowing
//! - `Utf16Buffer` owns the code units
//! - `TextView<'a>` borrows a window of them; the lifetime `'a` ties every
//!   view (and every enumerator) to the buffer it came from
//! - Slicing a view produces a new `Copy` value, never a new allocation
//!
//! ### Memory Safety
//! - A view can't outlive its buffer: the borrow checker rejects it
//! - Offsets and lengths are validated when a view is built, so reads
//!   through a view never go out of bounds

mod buffer;
mod case;
mod compare;
mod enumerator;
mod lines;
mod ops;
mod runes;
mod search;
mod units;
mod view;

pub use buffer::Utf16Buffer;
pub use compare::{AsUnits, Collation, Comparison, InvariantCollation};
pub use enumerator::TextEnumerator;
pub use lines::Lines;
pub use runes::{RuneIndices, Runes};
pub use search::{UnitSet, CR, FF, LF, LINE_SEPARATOR, NEL, PARAGRAPH_SEPARATOR};
pub use units::CodeUnits;
pub use view::TextView;

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors that can occur while building or reading views
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("No buffer supplied for a view at offset {offset} with length {len}")]
    MissingBuffer { offset: usize, len: usize },

    #[error("{param} {value} is out of range (limit {limit})")]
    OutOfRange {
        param: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("The {enumerator} enumerator cannot be reset")]
    ResetUnsupported { enumerator: &'static str },

    #[error("Destination holds {available} code units but {required} are required")]
    DestinationTooSmall { required: usize, available: usize },
}

impl ViewError {
    #[cold]
    pub(crate) fn out_of_range(param: &'static str, value: usize, limit: usize) -> Self {
        tracing::debug!(param, value, limit, "rejected view bounds");
        Self::OutOfRange {
            param,
            value,
            limit,
        }
    }

    #[cold]
    pub(crate) fn missing_buffer(offset: usize, len: usize) -> Self {
        tracing::debug!(offset, len, "rejected view without a buffer");
        Self::MissingBuffer { offset, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_over_buffer() {
        let buffer = Utf16Buffer::from("Hello, World!");
        let view = buffer.view();
        assert_eq!(view.len(), 13);
        assert_eq!(view, "Hello, World!");
    }

    #[test]
    fn test_slice_and_split() {
        let buffer = Utf16Buffer::from("one\r\ntwo\nthree");
        let middle = buffer.view().slice_from(5).unwrap();
        assert_eq!(middle.offset(), 5);

        let lines: Vec<String> = middle.lines().map(|line| line.to_string()).collect();
        assert_eq!(lines, vec!["two", "three"]);
    }

    #[test]
    fn test_error_messages() {
        let err = ViewError::OutOfRange {
            param: "index",
            value: 7,
            limit: 3,
        };
        assert_eq!(err.to_string(), "index 7 is out of range (limit 3)");

        let err = ViewError::ResetUnsupported { enumerator: "lines" };
        assert_eq!(err.to_string(), "The lines enumerator cannot be reset");
    }
}
