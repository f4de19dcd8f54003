use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::editor::snapshot::{CanvasDecoration, CanvasImage, EditorSnapshot, SnapZone};
use crate::ids::{ProjectId, StepId};

/// Unit of storage of the on-device draft cache, one record per project.
///
/// Invariant: `pending_sync` is true iff the most recent write to this record
/// has not yet been confirmed accepted by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub project_id: ProjectId,
    pub last_edited_step: Option<StepId>,
    pub canvas_decorations: Vec<CanvasDecoration>,
    pub canvas_images: Vec<CanvasImage>,
    pub snap_zones_by_image: BTreeMap<String, Vec<SnapZone>>,
    pub decorations_by_image: BTreeMap<String, Vec<CanvasDecoration>>,
    pub logo_details: Option<serde_json::Value>,

    /// Epoch milliseconds of the last write to this record.
    pub last_modified_ms: i64,

    pub pending_sync: bool,
}

impl CacheRecord {
    pub fn from_snapshot(
        project_id: ProjectId,
        snapshot: &EditorSnapshot,
        last_modified_ms: i64,
        pending_sync: bool,
    ) -> Self {
        Self {
            project_id,
            last_edited_step: snapshot.last_edited_step.clone(),
            canvas_decorations: snapshot.canvas_decorations.clone(),
            canvas_images: snapshot.canvas_images.clone(),
            snap_zones_by_image: snapshot.snap_zones_by_image.clone(),
            decorations_by_image: snapshot.decorations_by_image.clone(),
            logo_details: snapshot.logo_details.clone(),
            last_modified_ms,
            pending_sync,
        }
    }

    /// Reconstruct the state tree this record mirrors.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            last_edited_step: self.last_edited_step.clone(),
            canvas_decorations: self.canvas_decorations.clone(),
            canvas_images: self.canvas_images.clone(),
            snap_zones_by_image: self.snap_zones_by_image.clone(),
            decorations_by_image: self.decorations_by_image.clone(),
            logo_details: self.logo_details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::snapshot::CanvasDecoration;

    fn sample_snapshot() -> EditorSnapshot {
        EditorSnapshot {
            last_edited_step: Some(StepId::from("canvas")),
            canvas_decorations: vec![CanvasDecoration {
                id: "d1".to_string(),
                asset_ref: "bunting-01".to_string(),
                x: 4.0,
                y: 8.0,
                width: 60.0,
                height: 20.0,
                rotation: 15.0,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn from_snapshot_then_snapshot_is_lossless() {
        let snapshot = sample_snapshot();
        let record =
            CacheRecord::from_snapshot(ProjectId::from("p1"), &snapshot, 1_754_000_000_000, true);

        assert!(record.pending_sync);
        assert_eq!(record.last_modified_ms, 1_754_000_000_000);
        assert_eq!(record.snapshot(), snapshot);
    }
}
