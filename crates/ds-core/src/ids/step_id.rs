use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Name of a wizard step (e.g. `canvas`, `logo`, `summary`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(String);

impl_id!(StepId);
