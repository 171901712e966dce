//! Project model interface
//!
//! Separates the graph assembler from whatever evaluates project documents,
//! so other project-file dialects can plug in their own evaluator.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// What the assembler needs to know about one evaluated project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectModel {
    /// Project identifier declared by the document, if any
    pub identifier: Option<String>,
    /// Build platform declared by the document, if any
    pub platform: Option<String>,
    /// Referenced project files, relative to the project's own directory
    /// unless absolute
    pub references: Vec<String>,
}

/// Trait for evaluating project documents
pub trait ProjectModelProvider {
    /// Evaluate the project at `path`
    ///
    /// Fails with [`Error::ProjectEvaluation`] for malformed, inaccessible
    /// or unsupported documents.
    fn evaluate(&self, path: &Path) -> Result<ProjectModel>;
}

impl<P: ProjectModelProvider + ?Sized> ProjectModelProvider for &P {
    fn evaluate(&self, path: &Path) -> Result<ProjectModel> {
        (**self).evaluate(path)
    }
}

/// Provider answering from a fixed table, for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    models: HashMap<PathBuf, ProjectModel>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, path: impl Into<PathBuf>, model: ProjectModel) -> Self {
        self.models.insert(path.into(), model);
        self
    }
}

impl ProjectModelProvider for InMemoryProvider {
    fn evaluate(&self, path: &Path) -> Result<ProjectModel> {
        self.models
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ProjectEvaluation {
                path: path.to_path_buf(),
                reason: "unknown project".to_string(),
            })
    }
}
