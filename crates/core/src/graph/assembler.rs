//! Graph assembly
//!
//! Walks the reference closure of the entry-point projects depth-first and
//! records one node per project plus one folder node per directory level
//! between each project and the common root.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{AssembledSolution, CommonRoot, RootChange, SolutionGraph};
use crate::error::{Error, Result};
use crate::interfaces::ProjectModelProvider;
use crate::types::{IdGenerator, Node, ProjectDetails, ProjectGuid, RandomIds};
use crate::utils::path::{from_project_path, normalize, resolve};

pub struct GraphAssembler<P> {
    provider: P,
    ids: Box<dyn IdGenerator>,
    used_ids: HashSet<ProjectGuid>,
    graph: SolutionGraph,
    common_root: CommonRoot,
    solution_dir: PathBuf,
    diagnostics: Vec<Error>,
}

impl<P: ProjectModelProvider> GraphAssembler<P> {
    /// Create an assembler for a solution written to `solution_dir`
    pub fn new(provider: P, solution_dir: impl Into<PathBuf>) -> Self {
        let solution_dir = normalize(&solution_dir.into());
        Self {
            provider,
            ids: Box::new(RandomIds),
            used_ids: HashSet::new(),
            graph: SolutionGraph::new(),
            common_root: CommonRoot::new(solution_dir.clone()),
            solution_dir,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Add an entry-point project and everything it references
    ///
    /// The path must name an existing file. Projects that fail to evaluate
    /// are skipped and recorded in the diagnostics; only an unusable entry
    /// point path is an error.
    pub fn add_project(&mut self, path: &Path) -> Result<()> {
        let absolute = std::path::absolute(path)
            .map(|p| normalize(&p))
            .map_err(|source| Error::InvalidEntryPoint {
                path: path.to_path_buf(),
                source,
            })?;

        let metadata = std::fs::metadata(&absolute).map_err(|source| Error::InvalidEntryPoint {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(Error::InvalidEntryPoint {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a file"),
            });
        }

        info!("Adding entry point: {}", absolute.display());
        self.visit(absolute);
        Ok(())
    }

    pub fn graph(&self) -> &SolutionGraph {
        &self.graph
    }

    pub fn common_root(&self) -> Option<&Path> {
        self.common_root.get()
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Hand the discovered graph over to the writer
    pub fn finalize(self) -> Result<AssembledSolution> {
        if self.graph.projects().next().is_none() {
            return Err(Error::NoProjectsFound);
        }

        debug!(
            "Assembled {} projects, {} folders",
            self.graph.projects().count(),
            self.graph.folders().count()
        );

        Ok(AssembledSolution {
            graph: self.graph,
            common_root: self.common_root.into_inner(),
            solution_dir: self.solution_dir,
            diagnostics: self.diagnostics,
        })
    }

    fn visit(&mut self, path: PathBuf) {
        // Solution files are text; a name that cannot be written as-is is
        // left out rather than mangled
        if path.to_str().is_none() {
            let err = Error::NonUnicodePath { path };
            warn!("Skipping project: {}", err);
            self.diagnostics.push(err);
            return;
        }

        if self.graph.contains(&path) {
            return;
        }

        let model = match self.provider.evaluate(&path) {
            Ok(model) => model,
            Err(err) => {
                let err = match err {
                    e @ Error::ProjectEvaluation { .. } => e,
                    other => Error::ProjectEvaluation {
                        path: path.clone(),
                        reason: other.to_string(),
                    },
                };
                warn!("Skipping project: {}", err);
                self.diagnostics.push(err);
                return;
            }
        };

        let (Some(directory), Some(name)) =
            (path.parent(), path.file_name().and_then(|n| n.to_str()))
        else {
            return;
        };
        let directory = directory.to_path_buf();
        let name = name.to_string();

        let id = self.project_id(&path, model.identifier.as_deref());
        let details = ProjectDetails {
            platform: model.platform,
            references: model.references.clone(),
        };
        self.graph.insert(
            path.clone(),
            Node::project(id, name, directory.clone(), details),
        );
        info!("Added project {} {}", id, path.display());

        let parent = self.ensure_folder_chain(&directory);
        if let Some(node) = self.graph.get_mut(&path) {
            node.parent = parent;
        }

        for include in &model.references {
            let target = resolve(&directory, &from_project_path(include));
            debug!("{} references {}", path.display(), target.display());
            self.visit(target);
        }
    }

    /// Return the folder node for `directory`, creating it and any missing
    /// ancestors up to the common root
    fn ensure_folder_chain(&mut self, directory: &Path) -> Option<ProjectGuid> {
        if let Some(existing) = self.graph.get(directory) {
            return Some(existing.id);
        }

        // Filesystem or drive root: no folder node
        let name = directory.file_name()?.to_str()?.to_string();
        let parent_dir = directory.parent()?.to_path_buf();

        let id = self.fresh_id();
        self.graph.insert(
            directory.to_path_buf(),
            Node::folder(id, name, parent_dir.clone()),
        );
        debug!("Added folder {} {}", id, directory.display());

        match self.common_root.observe(directory) {
            RootChange::Widened(previous) | RootChange::Lost(previous) => {
                self.relink(&previous);
            }
            RootChange::Unchanged => {}
        }

        if self.common_root.is(directory) {
            return Some(id);
        }

        let parent = self.ensure_folder_chain(&parent_dir);
        if let Some(node) = self.graph.get_mut(directory) {
            node.parent = parent;
        }
        Some(id)
    }

    /// A folder created while it was the common root stopped its chain
    /// there; once the root widens or is lost, continue the chain upwards
    fn relink(&mut self, previous_root: &Path) {
        let unlinked = self
            .graph
            .get(previous_root)
            .is_some_and(|node| node.is_folder() && node.parent.is_none());
        if !unlinked {
            return;
        }

        let Some(parent_dir) = previous_root.parent() else {
            return;
        };
        let parent = self.ensure_folder_chain(parent_dir);
        if let Some(node) = self.graph.get_mut(previous_root) {
            node.parent = parent;
        }
    }

    fn project_id(&mut self, path: &Path, declared: Option<&str>) -> ProjectGuid {
        if let Some(declared) = declared {
            match ProjectGuid::parse(declared) {
                Some(id) if self.used_ids.insert(id) => return id,
                Some(id) => warn!(
                    "{} declares {} which is already taken, generating a new one",
                    path.display(),
                    id
                ),
                None => debug!("{} declares malformed ProjectGuid {:?}", path.display(), declared),
            }
        }
        self.fresh_id()
    }

    fn fresh_id(&mut self) -> ProjectGuid {
        loop {
            let id = self.ids.next_id();
            if self.used_ids.insert(id) {
                return id;
            }
        }
    }
}
