use serde::{Deserialize, Serialize};

use crate::ids::ProjectId;

/// Namespace prefix for retry tags handed to the host runtime.
const RETRY_TAG_PREFIX: &str = "draft-sync";

/// Derive the host-facing retry tag for a project.
pub fn retry_tag(project_id: &ProjectId) -> String {
    format!("{RETRY_TAG_PREFIX}:{project_id}")
}

/// Recover the project id from a host-facing retry tag.
pub fn project_from_tag(tag: &str) -> Option<ProjectId> {
    tag.strip_prefix(RETRY_TAG_PREFIX)
        .and_then(|rest| rest.strip_prefix(':'))
        .filter(|id| !id.is_empty())
        .map(ProjectId::from)
}

/// A registered "retry the remote write once connectivity returns" intent.
///
/// At most one live intent exists per project; registering again while one
/// is outstanding is an idempotent no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryIntent {
    pub tag: String,
    pub registered_at_ms: i64,
}

impl RetryIntent {
    pub fn new(project_id: &ProjectId, registered_at_ms: i64) -> Self {
        Self {
            tag: retry_tag(project_id),
            registered_at_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_namespaced_by_project() {
        let intent = RetryIntent::new(&ProjectId::from("p42"), 7);
        assert_eq!(intent.tag, "draft-sync:p42");
        assert_eq!(intent.registered_at_ms, 7);
    }

    #[test]
    fn tag_round_trips_back_to_project_id() {
        let project_id = ProjectId::from("p42");
        assert_eq!(project_from_tag(&retry_tag(&project_id)), Some(project_id));
    }

    #[test]
    fn foreign_tags_are_rejected() {
        assert_eq!(project_from_tag("thumbnails:p42"), None);
        assert_eq!(project_from_tag("draft-sync:"), None);
        assert_eq!(project_from_tag("draft-sync"), None);
    }
}
