mod app_data_dir;
mod scratch_store;

pub use app_data_dir::default_data_dir;
pub use scratch_store::JsonScratchStore;
