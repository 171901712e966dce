//! Solution file serialization

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

use super::build_matrix::{BuildMatrix, project_platform};
use super::project_type::{FOLDER_TYPE_GUID, ProjectType};
use crate::error::{Error, Result};
use crate::graph::AssembledSolution;
use crate::types::{NodeKind, ProjectGuid};
use crate::utils::path::{relative_to, to_solution_path};

const HEADER: [&str; 2] = [
    "Microsoft Visual Studio Solution File, Format Version 11.00",
    "# Visual Studio 2010",
];
const FOOTER: [&str; 2] = ["\tEndGlobalSection", "EndGlobal"];

/// What a write produced
#[derive(Debug, Default)]
pub struct WriteSummary {
    pub projects: usize,
    pub folders: usize,
    /// Entries left out of the file
    pub skipped: Vec<Error>,
}

/// In-memory rendering of a solution file
#[derive(Debug)]
pub struct Rendered {
    pub text: String,
    pub summary: WriteSummary,
}

/// Snapshot of one node as it appears in the file
#[derive(Debug, Clone)]
struct Entry {
    id: ProjectGuid,
    type_guid: &'static str,
    name: String,
    location: String,
    nested_in: Option<ProjectGuid>,
    /// `Some` for projects; the inner value is the declared platform
    platform: Option<Option<String>>,
}

impl Entry {
    fn is_project(&self) -> bool {
        self.platform.is_some()
    }
}

pub struct SolutionWriter {
    matrix: BuildMatrix,
}

impl SolutionWriter {
    pub fn new(matrix: BuildMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &BuildMatrix {
        &self.matrix
    }

    /// Write the solution to `output_path`, replacing any existing file
    pub fn write(
        &self,
        solution: &AssembledSolution,
        output_path: &Path,
    ) -> Result<WriteSummary> {
        let output_error = |source: io::Error| Error::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        };

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(output_error)?;
        }

        let file = File::create(output_path).map_err(output_error)?;
        let mut writer = BufWriter::new(file);
        let summary = self.write_to(&mut writer, solution).map_err(output_error)?;
        writer.flush().map_err(output_error)?;

        debug!(
            "Wrote {} ({} projects, {} folders)",
            output_path.display(),
            summary.projects,
            summary.folders
        );
        Ok(summary)
    }

    /// Render the solution without touching the file system
    pub fn render(&self, solution: &AssembledSolution) -> Result<Rendered> {
        let mut buffer = Vec::new();
        let summary = self.write_to(&mut buffer, solution)?;
        let text = String::from_utf8(buffer)
            .map_err(|e| Error::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok(Rendered { text, summary })
    }

    fn write_to<W: Write>(
        &self,
        out: &mut W,
        solution: &AssembledSolution,
    ) -> io::Result<WriteSummary> {
        let (entries, skipped) = plan(solution);

        for line in HEADER {
            writeln!(out, "{line}")?;
        }

        for entry in &entries {
            writeln!(
                out,
                "Project(\"{}\") = \"{}\", \"{}\", \"{}\"",
                entry.type_guid, entry.name, entry.location, entry.id
            )?;
            writeln!(out, "EndProject")?;
        }

        writeln!(out, "Global")?;
        writeln!(out, "\tGlobalSection(NestedProjects) = preSolution")?;
        for entry in &entries {
            if let Some(parent) = entry.nested_in {
                writeln!(out, "\t\t{} = {}", entry.id, parent)?;
            }
        }
        writeln!(out, "\tEndGlobalSection")?;

        writeln!(out, "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution")?;
        for (mode, configuration) in self.matrix.pairs() {
            writeln!(out, "\t\t{mode}|{configuration} = {mode}|{configuration}")?;
        }
        writeln!(out, "\tEndGlobalSection")?;

        writeln!(out, "\tGlobalSection(ProjectConfigurationPlatforms) = postSolution")?;
        for entry in entries.iter().filter(|e| e.is_project()) {
            let declared = entry.platform.as_ref().and_then(|p| p.as_deref());
            for (mode, configuration) in self.matrix.pairs() {
                let platform = project_platform(configuration, declared);
                writeln!(
                    out,
                    "\t\t{}.{mode}|{configuration}.ActiveCfg = {mode}|{platform}",
                    entry.id
                )?;
                writeln!(
                    out,
                    "\t\t{}.{mode}|{configuration}.Build.0 = {mode}|{platform}",
                    entry.id
                )?;
            }
        }

        for line in FOOTER {
            writeln!(out, "{line}")?;
        }

        let projects = entries.iter().filter(|e| e.is_project()).count();
        Ok(WriteSummary {
            projects,
            folders: entries.len() - projects,
            skipped,
        })
    }
}

/// Decide which nodes become entries and snapshot what the file needs
fn plan(solution: &AssembledSolution) -> (Vec<Entry>, Vec<Error>) {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for node in solution.graph.nodes() {
        let path = node.path();
        // The common root's own folder is implicit
        if solution.is_common_root(&path) {
            continue;
        }

        let nested_in = node
            .parent
            .filter(|_| !solution.is_common_root(&node.directory));

        let entry = match &node.kind {
            NodeKind::Folder => Entry {
                id: node.id,
                type_guid: FOLDER_TYPE_GUID,
                name: node.name.clone(),
                location: node.id.to_string(),
                nested_in,
                platform: None,
            },
            NodeKind::Project(details) => {
                let Some(project_type) = ProjectType::from_path(&path) else {
                    warn!("Unrecognized project type, leaving out {}", path.display());
                    skipped.push(Error::UnrecognizedProjectType { path });
                    continue;
                };
                let Some(relative) = relative_to(&solution.solution_dir, &path) else {
                    warn!(
                        "{} cannot be expressed relative to {}, leaving it out",
                        path.display(),
                        solution.solution_dir.display()
                    );
                    skipped.push(Error::RelativePathUnresolvable {
                        path,
                        base: solution.solution_dir.clone(),
                    });
                    continue;
                };
                if relative.to_str().is_none() {
                    warn!("{} is not valid Unicode, leaving it out", path.display());
                    skipped.push(Error::NonUnicodePath { path });
                    continue;
                }
                Entry {
                    id: node.id,
                    type_guid: project_type.type_guid(),
                    name: node.name.clone(),
                    location: to_solution_path(&relative),
                    nested_in,
                    platform: Some(details.platform.clone()),
                }
            }
        };
        entries.push(entry);
    }

    (entries, skipped)
}
