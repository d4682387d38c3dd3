//! # Collision Backends
//!
//! The strategy seam between the engine and its two implementations.

mod reference;
mod shared;

pub use reference::ReferenceBackend;
pub use shared::SharedBufferBackend;

use crate::error::BackendError;
use crate::frame::CollisionFrame;
use crate::report::CollisionReport;

/// One way of answering a collision call.
///
/// Implementations fill `report` following the offense, defense, pickup
/// pass order. The report arrives cleared.
pub trait CollisionBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Returns `true` if the backend can take calls.
    fn is_ready(&self) -> bool;

    /// Runs one collision call.
    ///
    /// # Errors
    ///
    /// Any [`BackendError`]. On error `report` may hold partial results and
    /// must be cleared by the caller.
    fn detect(&mut self, frame: &CollisionFrame<'_>, report: &mut CollisionReport) -> Result<(), BackendError>;
}
