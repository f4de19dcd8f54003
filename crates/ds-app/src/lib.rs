//! # ds-app
//!
//! Use cases and runtime behavior of the DecorSync draft engine: the
//! persistence orchestrator, the resumption chain, the deferred-retry
//! registry, and the save-indicator signal. Everything here depends only on
//! the `ds-core` ports, so the whole engine is instantiable per test with
//! fakes.

pub mod deps;
pub mod status_signal;
pub mod sync;
pub mod usecases;

pub use deps::EngineDeps;
pub use status_signal::StatusSignal;
pub use sync::{DeferredRetryRegistry, DraftSyncOrchestrator};
pub use usecases::{ReplayPendingSyncUseCase, ResumeEditingUseCase, ResumePendingSyncSweep};
