//! # Core Error Types
//!
//! Errors raised by the shared buffer channel and the snapshot encoder.

use thiserror::Error;

/// Errors that can occur while sizing or viewing shared buffers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// A fixed-size buffer was asked to hold more records than it has.
    #[error("buffer `{buffer}` is fixed at {capacity} record(s), requested {requested}")]
    FixedCapacity {
        /// Buffer label.
        buffer: &'static str,
        /// Fixed capacity in records.
        capacity: usize,
        /// Requested record count.
        requested: usize,
    },

    /// A view was requested over more records than the buffer holds.
    #[error("buffer `{buffer}` holds {capacity} record(s), view requested {requested}")]
    CountExceedsCapacity {
        /// Buffer label.
        buffer: &'static str,
        /// Current capacity in records.
        capacity: usize,
        /// Requested record count.
        requested: usize,
    },

    /// The backing allocation could not be grown.
    #[error("allocation of {records} record(s) failed for buffer `{buffer}`")]
    Allocation {
        /// Buffer label.
        buffer: &'static str,
        /// Record count that was being reserved.
        records: usize,
    },

    /// Casting the backing words to records failed.
    #[error("record layout mismatch for buffer `{buffer}`")]
    Layout {
        /// Buffer label.
        buffer: &'static str,
    },

    /// An output index does not fit the 32-bit result encoding.
    #[error("output index {index} does not fit in a u32 result slot")]
    OutputOverflow {
        /// The offending index.
        index: usize,
    },
}

/// Result type for channel operations.
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors that can occur while encoding snapshots.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The destination slice is shorter than the source collection.
    #[error("output holds {available} record(s), {required} required")]
    OutputTooShort {
        /// Records required.
        required: usize,
        /// Records available.
        available: usize,
    },
}
