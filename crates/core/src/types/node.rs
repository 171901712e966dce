use serde::Serialize;
use std::path::{Path, PathBuf};

use super::identifier::ProjectGuid;

/// A project or synthetic folder in the solution graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: ProjectGuid,
    /// File name for projects, directory name for folders
    pub name: String,
    /// Absolute path of the containing directory
    pub directory: PathBuf,
    pub kind: NodeKind,
    /// Folder node standing for `directory`, if the chain reached one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ProjectGuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Project(ProjectDetails),
    Folder,
}

/// Data only project nodes carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Reference includes as evaluated, kept for diagnostics
    pub references: Vec<String>,
}

impl Node {
    pub fn project(
        id: ProjectGuid,
        name: String,
        directory: PathBuf,
        details: ProjectDetails,
    ) -> Self {
        Self {
            id,
            name,
            directory,
            kind: NodeKind::Project(details),
            parent: None,
        }
    }

    pub fn folder(id: ProjectGuid, name: String, directory: PathBuf) -> Self {
        Self {
            id,
            name,
            directory,
            kind: NodeKind::Folder,
            parent: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    /// Full path of the node: `directory` joined with `name`
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    pub fn is_in(&self, directory: &Path) -> bool {
        crate::utils::path::same_path(&self.directory, directory)
    }

    pub fn details(&self) -> Option<&ProjectDetails> {
        match &self.kind {
            NodeKind::Project(details) => Some(details),
            NodeKind::Folder => None,
        }
    }
}
