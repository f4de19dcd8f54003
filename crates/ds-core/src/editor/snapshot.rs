use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::StepId;

/// One decoration placed on the project canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDecoration {
    pub id: String,

    /// Catalog reference of the decoration asset.
    pub asset_ref: String,

    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub rotation: f64,
}

/// Crop rectangle applied to a placed image, in image-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An uploaded image placed on the canvas together with its transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasImage {
    pub id: String,

    /// Reference to the uploaded source file (upload id, not a URL).
    pub upload_ref: String,

    pub x: f64,
    pub y: f64,

    #[serde(default = "default_scale")]
    pub scale: f64,

    #[serde(default)]
    pub crop: Option<CropRect>,
}

fn default_scale() -> f64 {
    1.0
}

/// A region of a placed image that decorations snap to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapZone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Full mutable state tree for one edited project at an instant.
///
/// Snapshots are immutable by convention: every mutation produces a new value
/// rather than editing in place, which is what makes structural equality a
/// reliable change signal (see [`crate::editor::mutation`]).
///
/// Mapping fields use `BTreeMap` so equality ignores key order; sequence
/// fields are ordered. `logo_details` is a free-form sub-document owned by
/// the logo-specification form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    #[serde(default)]
    pub last_edited_step: Option<StepId>,

    #[serde(default)]
    pub canvas_decorations: Vec<CanvasDecoration>,

    #[serde(default)]
    pub canvas_images: Vec<CanvasImage>,

    /// Snap zones keyed by the id of the image they belong to.
    #[serde(default)]
    pub snap_zones_by_image: BTreeMap<String, Vec<SnapZone>>,

    /// Decorations attached to a specific image rather than the canvas.
    #[serde(default)]
    pub decorations_by_image: BTreeMap<String, Vec<CanvasDecoration>>,

    #[serde(default)]
    pub logo_details: Option<serde_json::Value>,
}

impl EditorSnapshot {
    pub fn is_empty(&self) -> bool {
        self.last_edited_step.is_none()
            && self.canvas_decorations.is_empty()
            && self.canvas_images.is_empty()
            && self.snap_zones_by_image.is_empty()
            && self.decorations_by_image.is_empty()
            && self.logo_details.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoration(id: &str) -> CanvasDecoration {
        CanvasDecoration {
            id: id.to_string(),
            asset_ref: "garland-03".to_string(),
            x: 10.0,
            y: 20.0,
            width: 120.0,
            height: 40.0,
            rotation: 0.0,
        }
    }

    #[test]
    fn default_snapshot_is_empty() {
        assert!(EditorSnapshot::default().is_empty());
    }

    #[test]
    fn snapshot_with_any_field_is_not_empty() {
        let snapshot = EditorSnapshot {
            logo_details: Some(json!({"text": "Grand opening"})),
            ..Default::default()
        };
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn map_key_order_does_not_affect_equality() {
        let mut a = EditorSnapshot::default();
        a.snap_zones_by_image.insert("img-1".to_string(), vec![]);
        a.snap_zones_by_image.insert("img-2".to_string(), vec![]);

        let mut b = EditorSnapshot::default();
        b.snap_zones_by_image.insert("img-2".to_string(), vec![]);
        b.snap_zones_by_image.insert("img-1".to_string(), vec![]);

        assert_eq!(a, b);
    }

    #[test]
    fn sequence_order_affects_equality() {
        let a = EditorSnapshot {
            canvas_decorations: vec![decoration("d1"), decoration("d2")],
            ..Default::default()
        };
        let b = EditorSnapshot {
            canvas_decorations: vec![decoration("d2"), decoration("d1")],
            ..Default::default()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn serde_round_trip_preserves_structure() {
        let snapshot = EditorSnapshot {
            last_edited_step: Some(StepId::from("canvas")),
            canvas_decorations: vec![decoration("d1")],
            canvas_images: vec![CanvasImage {
                id: "img-1".to_string(),
                upload_ref: "upload-7".to_string(),
                x: 0.0,
                y: 0.0,
                scale: 1.5,
                crop: Some(CropRect {
                    x: 1.0,
                    y: 2.0,
                    width: 3.0,
                    height: 4.0,
                }),
            }],
            logo_details: Some(json!({"font": "block", "lines": ["WELCOME"]})),
            ..Default::default()
        };

        let encoded = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let decoded: EditorSnapshot = serde_json::from_str(&encoded).expect("deserialize snapshot");
        assert_eq!(decoded, snapshot);
    }
}
