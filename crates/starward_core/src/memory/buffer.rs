//! # Shared Record Buffer
//!
//! A growable, f64-aligned word buffer viewed as typed records.
//!
//! Views borrow the buffer, so the borrow checker rejects any attempt to
//! keep a view across [`SharedBuffer::ensure_capacity`]. Foreign consumers
//! that need a raw address get a [`BufferAddress`] stamped with the
//! buffer's generation and must re-fetch it after any growth.

use std::marker::PhantomData;

use crate::error::{ChannelError, ChannelResult};
use crate::snapshot::Record;

/// Raw location of a buffer's backing words at one point in time.
///
/// Valid only until the next capacity change of the buffer it came from.
/// This crate never dereferences it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferAddress {
    /// Start of the backing allocation.
    pub ptr: usize,
    /// Length of the backing allocation in bytes.
    pub len_bytes: usize,
    /// Growth generation the address was taken in.
    pub generation: u64,
}

/// Storage for records of one schema.
///
/// # Example
///
/// ```rust
/// use starward_core::{CircleRecord, SharedBuffer};
///
/// let mut buf: SharedBuffer<CircleRecord> = SharedBuffer::new("modules", 4)?;
/// buf.records_mut(1)?[0] = CircleRecord { x: 1.0, y: 2.0, radius: 12.0 };
/// buf.ensure_capacity(100)?;
/// assert_eq!(buf.records(1)?[0].radius, 12.0);
/// # Ok::<(), starward_core::ChannelError>(())
/// ```
pub struct SharedBuffer<R: Record> {
    /// Backing words, always `capacity * R::STRIDE` long and zero-filled past the written records.
    words: Vec<f64>,
    /// Capacity in records.
    capacity: usize,
    /// Fixed buffers never grow.
    fixed: bool,
    /// Bumped on every reallocation.
    generation: u64,
    /// Buffer label for diagnostics.
    label: &'static str,
    /// Marker for R.
    _phantom: PhantomData<R>,
}

impl<R: Record> SharedBuffer<R> {
    /// Creates a growable buffer with `capacity` zeroed records.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Allocation`] if the words cannot be reserved.
    pub fn new(label: &'static str, capacity: usize) -> ChannelResult<Self> {
        let len = word_len::<R>(label, capacity)?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|_| ChannelError::Allocation {
                buffer: label,
                records: capacity,
            })?;
        words.resize(len, 0.0);

        Ok(Self {
            words,
            capacity,
            fixed: false,
            generation: 0,
            label,
            _phantom: PhantomData,
        })
    }

    /// Creates a buffer that holds exactly `capacity` records forever.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Allocation`] if the words cannot be reserved.
    pub fn fixed(label: &'static str, capacity: usize) -> ChannelResult<Self> {
        let mut buffer = Self::new(label, capacity)?;
        buffer.fixed = true;
        Ok(buffer)
    }

    /// Returns the buffer label.
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the capacity in records.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the growth generation.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if this buffer never grows.
    #[inline]
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Makes room for at least `records` records.
    ///
    /// Grows to the next power of two when `records` exceeds the current
    /// capacity. Growth moves the backing allocation: every
    /// [`BufferAddress`] taken before a growing call is stale afterwards.
    ///
    /// Returns `true` if the buffer grew.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::FixedCapacity`] if a fixed buffer is asked to grow
    /// - [`ChannelError::Allocation`] if the new words cannot be reserved
    pub fn ensure_capacity(&mut self, records: usize) -> ChannelResult<bool> {
        if records <= self.capacity {
            return Ok(false);
        }
        if self.fixed {
            return Err(ChannelError::FixedCapacity {
                buffer: self.label,
                capacity: self.capacity,
                requested: records,
            });
        }

        let too_large = ChannelError::Allocation {
            buffer: self.label,
            records,
        };
        let new_capacity = records.checked_next_power_of_two().ok_or(too_large)?;
        let new_len = word_len::<R>(self.label, new_capacity)?;
        self.words
            .try_reserve_exact(new_len - self.words.len())
            .map_err(|_| ChannelError::Allocation {
                buffer: self.label,
                records: new_capacity,
            })?;
        self.words.resize(new_len, 0.0);

        self.capacity = new_capacity;
        self.generation += 1;
        tracing::trace!(
            buffer = self.label,
            capacity = new_capacity,
            generation = self.generation,
            "shared buffer grew"
        );
        Ok(true)
    }

    /// Returns a read view over the first `count` records.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::CountExceedsCapacity`] if `count` is larger than the capacity.
    pub fn records(&self, count: usize) -> ChannelResult<&[R]> {
        let words = self.words_prefix(count)?;
        bytemuck::try_cast_slice(words).map_err(|_| ChannelError::Layout { buffer: self.label })
    }

    /// Returns a write view over the first `count` records.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::CountExceedsCapacity`] if `count` is larger than the capacity.
    pub fn records_mut(&mut self, count: usize) -> ChannelResult<&mut [R]> {
        self.check_count(count)?;
        let label = self.label;
        let words = &mut self.words[..count * R::STRIDE];
        bytemuck::try_cast_slice_mut(words).map_err(|_| ChannelError::Layout { buffer: label })
    }

    /// Returns the first `count` records as flat words.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::CountExceedsCapacity`] if `count` is larger than the capacity.
    pub fn words(&self, count: usize) -> ChannelResult<&[f64]> {
        self.words_prefix(count)
    }

    /// Returns the whole backing allocation as bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    /// Returns the current raw address of the backing words.
    #[must_use]
    pub fn address(&self) -> BufferAddress {
        BufferAddress {
            ptr: self.words.as_ptr() as usize,
            len_bytes: self.words.len() * std::mem::size_of::<f64>(),
            generation: self.generation,
        }
    }

    /// Returns `true` if `address` was taken after the most recent growth.
    #[inline]
    #[must_use]
    pub fn is_current(&self, address: BufferAddress) -> bool {
        address.generation == self.generation
    }

    fn check_count(&self, count: usize) -> ChannelResult<()> {
        if count > self.capacity {
            return Err(ChannelError::CountExceedsCapacity {
                buffer: self.label,
                capacity: self.capacity,
                requested: count,
            });
        }
        Ok(())
    }

    fn words_prefix(&self, count: usize) -> ChannelResult<&[f64]> {
        self.check_count(count)?;
        Ok(&self.words[..count * R::STRIDE])
    }
}

/// Backing word count for `records` records of `R`.
fn word_len<R: Record>(buffer: &'static str, records: usize) -> ChannelResult<usize> {
    records
        .checked_mul(R::STRIDE)
        .ok_or(ChannelError::Allocation { buffer, records })
}

impl<R: Record> std::fmt::Debug for SharedBuffer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("label", &self.label)
            .field("schema", &R::NAME)
            .field("capacity", &self.capacity)
            .field("fixed", &self.fixed)
            .field("generation", &self.generation)
            .finish()
    }
}
