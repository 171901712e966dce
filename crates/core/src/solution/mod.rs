//! Solution file model and writer

pub mod build_matrix;
pub mod project_type;
pub mod writer;

pub use build_matrix::{BUILD_MODES, BuildMatrix, DEFAULT_CONFIGURATION, MIXED_PLATFORMS};
pub use project_type::{FOLDER_TYPE_GUID, ProjectType};
pub use writer::{Rendered, SolutionWriter, WriteSummary};
