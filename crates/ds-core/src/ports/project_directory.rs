use crate::ids::ProjectId;

/// Directory of remotely-addressable projects, fed by the project-creation
/// flow.
///
/// While creation is still in flight a project has only its provisional id;
/// remote persistence is skipped until the durable id appears here.
pub trait ProjectDirectoryPort: Send + Sync {
    fn remote_id(&self, project_id: &ProjectId) -> Option<ProjectId>;
}
