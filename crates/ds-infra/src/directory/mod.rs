mod shared_project_directory;

pub use shared_project_directory::SharedProjectDirectory;
