//! solgen - Generate Visual Studio solution files from project references
//!
//! This crate provides functionality to:
//! - Evaluate MSBuild project files and follow their project references
//! - Assemble a deduplicated graph of projects and the folders grouping them
//! - Write that graph out as a `.sln` file with a build configuration matrix
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod interfaces;
pub mod services;
pub mod solution;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use config::Settings;
pub use generator::{GenerationReport, SolutionGenerator};
pub use graph::{AssembledSolution, GraphAssembler, SolutionGraph};
pub use interfaces::{ProjectModel, ProjectModelProvider};
pub use services::MsBuildProjectProvider;
pub use solution::{BuildMatrix, SolutionWriter};
