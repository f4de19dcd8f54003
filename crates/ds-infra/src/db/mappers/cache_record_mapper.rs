//! Row ↔ domain mapping for draft cache records.

use ds_core::editor::CacheRecord;
use ds_core::ids::{ProjectId, StepId};
use ds_core::ports::LocalCacheError;

use crate::db::models::CacheRecordRow;

pub struct CacheRecordMapper;

impl CacheRecordMapper {
    pub fn to_row(record: &CacheRecord) -> Result<CacheRecordRow, LocalCacheError> {
        Ok(CacheRecordRow {
            project_id: record.project_id.to_string(),
            last_edited_step: record.last_edited_step.as_ref().map(ToString::to_string),
            canvas_decorations: encode(&record.canvas_decorations)?,
            canvas_images: encode(&record.canvas_images)?,
            snap_zones_by_image: encode(&record.snap_zones_by_image)?,
            decorations_by_image: encode(&record.decorations_by_image)?,
            logo_details: record
                .logo_details
                .as_ref()
                .map(encode)
                .transpose()?,
            last_modified: record.last_modified_ms,
            pending_sync: record.pending_sync,
        })
    }

    pub fn to_domain(row: CacheRecordRow) -> Result<CacheRecord, LocalCacheError> {
        Ok(CacheRecord {
            project_id: ProjectId::from(row.project_id),
            last_edited_step: row.last_edited_step.map(StepId::from),
            canvas_decorations: decode(&row.canvas_decorations)?,
            canvas_images: decode(&row.canvas_images)?,
            snap_zones_by_image: decode(&row.snap_zones_by_image)?,
            decorations_by_image: decode(&row.decorations_by_image)?,
            logo_details: row
                .logo_details
                .as_deref()
                .map(decode)
                .transpose()?,
            last_modified_ms: row.last_modified,
            pending_sync: row.pending_sync,
        })
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, LocalCacheError> {
    serde_json::to_string(value).map_err(|err| LocalCacheError::Storage(err.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, LocalCacheError> {
    serde_json::from_str(raw).map_err(|err| LocalCacheError::Corrupt(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use ds_core::editor::{CanvasDecoration, EditorSnapshot, SnapZone};
    use serde_json::json;

    fn sample_record() -> CacheRecord {
        let mut snapshot = EditorSnapshot {
            last_edited_step: Some(StepId::from("canvas")),
            canvas_decorations: vec![CanvasDecoration {
                id: "d1".to_string(),
                asset_ref: "garland-03".to_string(),
                x: 10.0,
                y: 20.0,
                width: 120.0,
                height: 40.0,
                rotation: 5.0,
            }],
            logo_details: Some(json!({"font": "block", "lines": ["OPEN"]})),
            ..Default::default()
        };
        snapshot.snap_zones_by_image.insert(
            "img-1".to_string(),
            vec![SnapZone {
                x: 0.0,
                y: 0.0,
                width: 50.0,
                height: 50.0,
            }],
        );

        CacheRecord::from_snapshot(ProjectId::from("p1"), &snapshot, 1_754_000_000_000, true)
    }

    #[test]
    fn row_round_trip_is_lossless() {
        let record = sample_record();
        let row = CacheRecordMapper::to_row(&record).expect("map to row");
        let restored = CacheRecordMapper::to_domain(row).expect("map to domain");
        assert_eq!(restored, record);
    }

    #[test]
    fn corrupt_column_surfaces_as_corrupt_error() {
        let record = sample_record();
        let mut row = CacheRecordMapper::to_row(&record).expect("map to row");
        row.canvas_decorations = "not-json".to_string();

        let err = CacheRecordMapper::to_domain(row).expect_err("corrupt column");
        assert!(matches!(err, LocalCacheError::Corrupt(_)));
    }
}
