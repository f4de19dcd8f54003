use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of an edited decoration project.
///
/// New projects start with a client-minted provisional id; the remote store
/// assigns the durable id once creation completes (see
/// `ProjectDirectoryPort`). Both forms are carried by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Mint a provisional id for a project that has not been persisted yet.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl_id!(ProjectId);
