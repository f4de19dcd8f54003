mod model;
mod state;

pub use model::SaveStatus;
pub use state::SaveState;
