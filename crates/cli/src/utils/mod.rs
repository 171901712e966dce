pub mod discovery;
pub mod launcher;

pub use discovery::{find_project_files, is_project_file};
pub use launcher::{open_command, open_solution};
