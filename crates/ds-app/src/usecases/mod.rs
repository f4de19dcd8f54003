pub mod replay_pending_sync;
pub mod resume_editing;
pub mod resume_pending_sweep;

pub use replay_pending_sync::ReplayPendingSyncUseCase;
pub use resume_editing::{
    CacheStepLookup, RemoteStepLookup, ResumeEditingUseCase, ScratchStepLookup, StepLookup,
};
pub use resume_pending_sweep::ResumePendingSyncSweep;
