//! Main generator that coordinates assembly and writing

use crate::{
    error::{Error, Result},
    graph::{AssembledSolution, GraphAssembler},
    interfaces::ProjectModelProvider,
    services::MsBuildProjectProvider,
    solution::{BuildMatrix, SolutionWriter},
    types::{IdGenerator, RandomIds},
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a generation run that was not aborted
#[derive(Debug)]
pub struct GenerationReport {
    pub solution_path: PathBuf,
    pub projects: usize,
    pub folders: usize,
    /// Everything left out along the way; none of these are fatal
    pub recovered: Vec<Error>,
}

impl GenerationReport {
    /// True when every discovered project made it into the solution
    pub fn is_complete(&self) -> bool {
        self.recovered.is_empty()
    }
}

pub struct SolutionGenerator<P = MsBuildProjectProvider> {
    provider: P,
    matrix: BuildMatrix,
    ids: Option<Box<dyn IdGenerator>>,
}

impl SolutionGenerator<MsBuildProjectProvider> {
    pub fn new(matrix: BuildMatrix) -> Self {
        Self::with_provider(MsBuildProjectProvider::new(), matrix)
    }
}

impl<P: ProjectModelProvider> SolutionGenerator<P> {
    pub fn with_provider(provider: P, matrix: BuildMatrix) -> Self {
        Self {
            provider,
            matrix,
            ids: None,
        }
    }

    /// Use `ids` instead of random identifiers for the next run, e.g. for
    /// reproducible output
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Discover the graph for `entry_points`, to be written into
    /// `solution_dir`
    pub fn assemble(
        &mut self,
        entry_points: &[PathBuf],
        solution_dir: &Path,
    ) -> Result<AssembledSolution> {
        if entry_points.is_empty() {
            return Err(Error::NoProjectsFound);
        }

        let solution_dir = std::path::absolute(solution_dir)?;
        let ids = self
            .ids
            .take()
            .unwrap_or_else(|| Box::new(RandomIds) as Box<dyn IdGenerator>);
        let mut assembler =
            GraphAssembler::new(&self.provider, solution_dir).with_id_generator(ids);
        for entry_point in entry_points {
            assembler.add_project(entry_point)?;
        }
        assembler.finalize()
    }

    /// Assemble and write the solution to `output_path`
    pub fn generate(
        &mut self,
        entry_points: &[PathBuf],
        output_path: &Path,
    ) -> Result<GenerationReport> {
        let solution = self.assemble(entry_points, solution_dir_of(output_path))?;
        let summary = SolutionWriter::new(self.matrix.clone()).write(&solution, output_path)?;

        let mut recovered = solution.diagnostics;
        recovered.extend(summary.skipped);
        info!(
            "Generated {} with {} projects",
            output_path.display(),
            summary.projects
        );

        Ok(GenerationReport {
            solution_path: output_path.to_path_buf(),
            projects: summary.projects,
            folders: summary.folders,
            recovered,
        })
    }

    /// Assemble and render without writing anything
    pub fn preview(
        &mut self,
        entry_points: &[PathBuf],
        output_path: &Path,
    ) -> Result<(String, GenerationReport)> {
        let solution = self.assemble(entry_points, solution_dir_of(output_path))?;
        let rendered = SolutionWriter::new(self.matrix.clone()).render(&solution)?;

        let mut recovered = solution.diagnostics;
        recovered.extend(rendered.summary.skipped);

        Ok((
            rendered.text,
            GenerationReport {
                solution_path: output_path.to_path_buf(),
                projects: rendered.summary.projects,
                folders: rendered.summary.folders,
                recovered,
            },
        ))
    }
}

fn solution_dir_of(output_path: &Path) -> &Path {
    output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
