diesel::table! {
    t_cache_record (project_id) {
        project_id -> Text,
        last_edited_step -> Nullable<Text>,
        canvas_decorations -> Text,
        canvas_images -> Text,
        snap_zones_by_image -> Text,
        decorations_by_image -> Text,
        logo_details -> Nullable<Text>,
        last_modified -> BigInt,
        pending_sync -> Bool,
    }
}
