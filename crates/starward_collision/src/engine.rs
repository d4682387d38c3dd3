//! # Collision Engine
//!
//! The single selection point between backends.
//!
//! ```text
//! detect(frame)
//!   ├─ accelerated present and ready? ──► try it
//!   │                                       ├─ Ok  ──► report
//!   │                                       └─ Err ──► clear, fall through
//!   └─ reference ──► report
//! ```
//!
//! An init failure is logged once and the engine stays on the reference path
//! until [`CollisionEngine::reinitialize`]. A per-call failure is logged at
//! debug level and answered by the reference path; readiness is kept.

use starward_core::ChannelCapacities;

use crate::backend::{CollisionBackend, ReferenceBackend, SharedBufferBackend};
use crate::error::BackendInitError;
use crate::frame::CollisionFrame;
use crate::report::CollisionReport;

/// Call counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Calls answered by the accelerated backend.
    pub accelerated_calls: u64,
    /// Calls answered by the reference backend.
    pub reference_calls: u64,
    /// Accelerated calls that failed and were re-run on the reference path.
    pub fallbacks: u64,
}

/// Collision engine with an optional accelerated backend.
#[derive(Debug)]
pub struct CollisionEngine<A = SharedBufferBackend> {
    accelerated: Option<A>,
    reference: ReferenceBackend,
    report: CollisionReport,
    stats: EngineStats,
}

impl CollisionEngine<SharedBufferBackend> {
    /// Creates an engine and tries to bring up the shared buffer backend.
    #[must_use]
    pub fn new(caps: &ChannelCapacities) -> Self {
        Self::with_backend(SharedBufferBackend::new(caps))
    }

    /// Creates an engine that only uses the reference backend.
    #[must_use]
    pub fn reference_only() -> Self {
        Self::with_backend(Err(BackendInitError::Disabled))
    }
}

impl<A: CollisionBackend> CollisionEngine<A> {
    /// Creates an engine from the outcome of an accelerated backend setup.
    #[must_use]
    pub fn with_backend(init: Result<A, BackendInitError>) -> Self {
        Self {
            accelerated: accept(init),
            reference: ReferenceBackend::new(),
            report: CollisionReport::new(),
            stats: EngineStats::default(),
        }
    }

    /// Replaces the accelerated backend with a freshly set-up one.
    pub fn reinitialize(&mut self, init: Result<A, BackendInitError>) {
        self.accelerated = accept(init);
    }

    /// Returns `true` if calls will try the accelerated backend first.
    #[must_use]
    pub fn accelerated_ready(&self) -> bool {
        self.accelerated.as_ref().is_some_and(CollisionBackend::is_ready)
    }

    /// Name of the backend the next call will try first.
    #[must_use]
    pub fn active_backend(&self) -> &'static str {
        match &self.accelerated {
            Some(backend) if backend.is_ready() => backend.name(),
            _ => self.reference.name(),
        }
    }

    /// Runs one collision call.
    ///
    /// Never fails: accelerated faults are answered by the reference path.
    /// The returned report is overwritten by the next call.
    pub fn detect(&mut self, frame: &CollisionFrame<'_>) -> &CollisionReport {
        self.report.clear();

        if let Some(backend) = self.accelerated.as_mut().filter(|b| b.is_ready()) {
            match backend.detect(frame, &mut self.report) {
                Ok(()) => {
                    self.stats.accelerated_calls += 1;
                    return &self.report;
                }
                Err(err) => {
                    tracing::debug!(
                        backend = backend.name(),
                        error = %err,
                        "accelerated collision call failed, using reference"
                    );
                    self.stats.fallbacks += 1;
                    self.report.clear();
                }
            }
        }

        self.reference.run(frame, &mut self.report);
        self.stats.reference_calls += 1;
        &self.report
    }

    /// The most recent report.
    #[inline]
    #[must_use]
    pub const fn report(&self) -> &CollisionReport {
        &self.report
    }

    /// Call counters since construction.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> EngineStats {
        self.stats
    }

    /// The accelerated backend, if one is installed.
    #[inline]
    #[must_use]
    pub const fn accelerated(&self) -> Option<&A> {
        self.accelerated.as_ref()
    }
}

fn accept<A: CollisionBackend>(init: Result<A, BackendInitError>) -> Option<A> {
    match init {
        Ok(backend) => Some(backend),
        Err(BackendInitError::Disabled) => {
            tracing::info!("accelerated collision disabled, using reference backend");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "accelerated collision unavailable, using reference backend");
            None
        }
    }
}
