mod id_macro;
mod project_id;
mod step_id;

pub use project_id::ProjectId;
pub use step_id::StepId;
