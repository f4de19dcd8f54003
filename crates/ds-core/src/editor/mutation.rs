//! Change detection between consecutive editor snapshots.
//!
//! Every mutation produces a new snapshot by construction, so reference
//! identity carries no information; only structural equality is a valid
//! change signal. Without this gate, effect-triggered persistence loops:
//! a downstream write triggers a re-render that re-offers the same state.

use crate::editor::snapshot::EditorSnapshot;

/// Whether `next` differs materially from the last snapshot written to a
/// tier. `prev == None` (nothing written yet) always counts as changed
/// unless the candidate is itself empty.
pub fn differs(prev: Option<&EditorSnapshot>, next: &EditorSnapshot) -> bool {
    match prev {
        Some(prev) => prev != next,
        None => !next.is_empty(),
    }
}

/// Serialized size of a snapshot, the unit the debounce classes are
/// expressed in (see [`crate::config::SyncConfig`]).
pub fn payload_units(snapshot: &EditorSnapshot) -> usize {
    // Serialization of an in-memory tree cannot fail; an empty payload keeps
    // the caller on the shortest debounce class if it somehow does.
    serde_json::to_string(snapshot).map(|s| s.len()).unwrap_or(0)
}
