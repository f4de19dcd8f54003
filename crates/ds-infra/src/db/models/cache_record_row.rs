use diesel::prelude::*;

use crate::db::schema::t_cache_record;

/// Draft cache row. Collection fields are stored as JSON text columns; the
/// mapper owns the (de)serialization.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = t_cache_record)]
pub struct CacheRecordRow {
    pub project_id: String,
    pub last_edited_step: Option<String>,
    pub canvas_decorations: String,
    pub canvas_images: String,
    pub snap_zones_by_image: String,
    pub decorations_by_image: String,
    pub logo_details: Option<String>,
    pub last_modified: i64,
    pub pending_sync: bool,
}
