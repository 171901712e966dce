//! Interfaces at the seams of the solution pipeline

pub mod project_model;

pub use project_model::{InMemoryProvider, ProjectModel, ProjectModelProvider};
