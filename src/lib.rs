//! # decorsync
//!
//! Offline-resilient editor-state synchronization for decoration projects.
//!
//! The engine keeps a user's in-progress edits durable across three storage
//! tiers (in-memory session, on-device SQLite cache, remote HTTP store)
//! while the device may lose connectivity at any point. This shell crate
//! wires the production adapters (`ds-infra`) into the engine (`ds-app`,
//! `ds-core`) and exposes the two entry points the editor UI consumes:
//! `on_mutation` for writes and `resolve_last_step` for resuming.

mod logging;
pub mod runtime;

pub use logging::init_tracing;
pub use runtime::{EngineRuntime, RuntimeConfig};

// Re-export the engine surface for embedders
pub use ds_app::{DraftSyncOrchestrator, ResumeEditingUseCase, StatusSignal};
pub use ds_core::{EditorSnapshot, ProjectId, SaveState, SaveStatus, StepId, SyncConfig};
