//! Solution graph: projects and the folders that group them

pub mod assembler;
pub mod common_root;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{Node, ProjectGuid};
use crate::utils::path::{path_key, same_path};

pub use assembler::GraphAssembler;
pub use common_root::{CommonRoot, RootChange};

/// Nodes keyed by normalized absolute path
///
/// Projects are keyed by their file path, folders by their directory,
/// both in [`path_key`] form so that spellings differing only in case
/// share a node on Windows. Iteration is path-sorted, so a folder always
/// comes before everything below it.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct SolutionGraph {
    nodes: BTreeMap<PathBuf, Node>,
}

impl SolutionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(&path_key(path))
    }

    pub fn get(&self, path: &Path) -> Option<&Node> {
        self.nodes.get(&path_key(path))
    }

    pub(crate) fn get_mut(&mut self, path: &Path) -> Option<&mut Node> {
        self.nodes.get_mut(&path_key(path))
    }

    /// Insert a node unless its path is already taken; returns whether it
    /// was inserted
    pub(crate) fn insert(&mut self, path: PathBuf, node: Node) -> bool {
        let key = path_key(&path);
        if self.nodes.contains_key(&key) {
            return false;
        }
        self.nodes.insert(key, node);
        true
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn projects(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| !node.is_folder())
    }

    pub fn folders(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.is_folder())
    }

    pub fn find(&self, id: ProjectGuid) -> Option<&Node> {
        self.nodes().find(|node| node.id == id)
    }

    pub fn contains_id(&self, id: ProjectGuid) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Read-only result of the discovery phase, consumed by the writer
#[derive(Debug)]
pub struct AssembledSolution {
    pub graph: SolutionGraph,
    /// `None` when the projects span disjoint subtrees
    pub common_root: Option<PathBuf>,
    /// Directory the solution file is written to
    pub solution_dir: PathBuf,
    /// Projects that could not be evaluated
    pub diagnostics: Vec<Error>,
}

impl AssembledSolution {
    pub fn is_common_root(&self, path: &Path) -> bool {
        self.common_root
            .as_deref()
            .is_some_and(|root| same_path(root, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IdGenerator, ProjectDetails, SequentialIds};

    #[test]
    fn test_insert_is_idempotent() {
        let mut ids = SequentialIds::new();
        let mut graph = SolutionGraph::new();
        let path = PathBuf::from("/src/app");

        let first = Node::folder(ids.next_id(), "app".into(), PathBuf::from("/src"));
        let second = Node::folder(ids.next_id(), "app".into(), PathBuf::from("/src"));
        let first_id = first.id;

        assert!(graph.insert(path.clone(), first));
        assert!(!graph.insert(path.clone(), second));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get(&path).map(|n| n.id), Some(first_id));
    }

    #[test]
    fn test_iteration_puts_folders_before_children() {
        let mut ids = SequentialIds::new();
        let mut graph = SolutionGraph::new();
        graph.insert(
            PathBuf::from("/src/app/App.csproj"),
            Node::project(
                ids.next_id(),
                "App.csproj".into(),
                PathBuf::from("/src/app"),
                ProjectDetails::default(),
            ),
        );
        graph.insert(
            PathBuf::from("/src/app"),
            Node::folder(ids.next_id(), "app".into(), PathBuf::from("/src")),
        );

        let names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["app", "App.csproj"]);
        assert_eq!(graph.projects().count(), 1);
        assert_eq!(graph.folders().count(), 1);
    }
}
