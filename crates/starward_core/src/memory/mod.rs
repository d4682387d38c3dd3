//! # Shared Memory
//!
//! Persistent, resizable buffers handed to the accelerated backend.
//!
//! ## Design Philosophy
//!
//! Buffers are allocated once and grown on demand. During steady-state play:
//! - No per-call allocation
//! - Growth is the only event that moves memory
//! - Every growth is visible through a generation counter

mod buffer;
mod channel;

pub use buffer::{BufferAddress, SharedBuffer};
pub use channel::{BufferCategory, ChannelCapacities, HitBuffers, SharedBufferChannel};
