use serde::{Deserialize, Serialize};

/// The three storage locations a draft lives in, ordered by proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceTier {
    /// In-memory, authoritative for the current runtime instance, lost on
    /// reload.
    Session,

    /// Durable on-device, keyed by project id, lost only on an explicit
    /// device-level cache clear.
    LocalCache,

    /// Durable, authoritative across devices, reachable only over network.
    RemoteStore,
}

impl PersistenceTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::LocalCache => "local_cache",
            Self::RemoteStore => "remote_store",
        }
    }
}
