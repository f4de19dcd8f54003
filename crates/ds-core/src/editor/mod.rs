mod cache_record;
pub mod mutation;
mod snapshot;
mod tier;

pub use cache_record::CacheRecord;
pub use snapshot::{CanvasDecoration, CanvasImage, CropRect, EditorSnapshot, SnapZone};
pub use tier::PersistenceTier;
