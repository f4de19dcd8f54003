//! In-memory directory of remotely-addressable projects.
//!
//! The project-creation flow calls [`SharedProjectDirectory::assign`] once
//! the remote store has acknowledged a new project; until then the engine
//! sees `None` and keeps the draft on device.

use std::collections::HashMap;
use std::sync::RwLock;

use ds_core::ids::ProjectId;
use ds_core::ports::ProjectDirectoryPort;

pub struct SharedProjectDirectory {
    remote_ids: RwLock<HashMap<ProjectId, ProjectId>>,
}

impl SharedProjectDirectory {
    pub fn new() -> Self {
        Self {
            remote_ids: RwLock::new(HashMap::new()),
        }
    }

    /// Record the durable id for a project whose creation just completed.
    pub fn assign(&self, project_id: ProjectId, remote_id: ProjectId) {
        self.remote_ids
            .write()
            .expect("remote ids lock")
            .insert(project_id, remote_id);
    }
}

impl Default for SharedProjectDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDirectoryPort for SharedProjectDirectory {
    fn remote_id(&self, project_id: &ProjectId) -> Option<ProjectId> {
        self.remote_ids
            .read()
            .expect("remote ids lock")
            .get(project_id)
            .cloned()
    }
}
