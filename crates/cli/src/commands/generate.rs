use anyhow::{Context, Result};
use solgen_core::{Error, GenerationReport, Settings, SolutionGenerator};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::utils::{find_project_files, open_solution};

/// What a plain `solgen` invocation should do
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub projects: Vec<PathBuf>,
    pub configs: Vec<String>,
    pub output: Option<PathBuf>,
    pub open: bool,
    pub dry_run: bool,
    pub graph: bool,
}

pub fn generate_command(options: GenerateOptions) -> Result<()> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let settings = Settings::load(&cwd).context("Failed to load settings")?;
    let matrix = settings.build_matrix(&options.configs);
    debug!("Build configurations: {:?}", matrix.configurations());

    let discovered = options.projects.is_empty();
    let entry_points = if discovered {
        let found = find_project_files(&cwd);
        if found.is_empty() {
            return Err(Error::NoProjectsFound)
                .with_context(|| format!("Nothing to do in {}", cwd.display()));
        }
        info!("Discovered {} project files", found.len());
        found
    } else {
        options.projects.iter().map(|p| cwd.join(p)).collect()
    };

    let solution_path = match &options.output {
        Some(output) => cwd.join(output),
        None => default_solution_path(&cwd, &entry_points, discovered, &settings),
    };

    let mut generator = SolutionGenerator::new(matrix);

    if options.graph {
        let solution_dir = solution_path.parent().unwrap_or(cwd.as_path());
        let solution = generator
            .assemble(&entry_points, solution_dir)
            .context("Failed to assemble project graph")?;
        let json = serde_json::json!({
            "solution_dir": solution.solution_dir,
            "common_root": solution.common_root,
            "nodes": solution.graph,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        print_recovered(&solution.diagnostics);
        return Ok(());
    }

    if options.dry_run {
        let (text, report) = generator
            .preview(&entry_points, &solution_path)
            .context("Failed to render solution")?;
        print!("{text}");
        print_recovered(&report.recovered);
        return Ok(());
    }

    let report = generator
        .generate(&entry_points, &solution_path)
        .with_context(|| format!("Failed to generate {}", solution_path.display()))?;
    print_report(&report);

    if options.open {
        // The solution is already on disk; a failed launch is only reported
        if let Err(e) = open_solution(&report.solution_path, settings.ide_path.as_deref()) {
            warn!("Could not open solution: {e:#}");
            eprintln!("⚠️  Could not open {}: {e:#}", report.solution_path.display());
        }
    }

    Ok(())
}

/// Where the solution goes when no output path was given
///
/// Named after the first project, next to it, unless several projects were
/// discovered; then it is named after and placed in `cwd`.
pub fn default_solution_path(
    cwd: &Path,
    entry_points: &[PathBuf],
    discovered: bool,
    settings: &Settings,
) -> PathBuf {
    let first = match entry_points {
        [first] => Some(first),
        [first, ..] if !discovered => Some(first),
        _ => None,
    };

    match first {
        Some(project) => {
            let stem = project
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Solution".to_string());
            let dir = project.parent().unwrap_or(cwd);
            dir.join(settings.solution_file_name(&stem))
        }
        None => {
            let stem = cwd
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Solution".to_string());
            cwd.join(settings.solution_file_name(&stem))
        }
    }
}

fn print_report(report: &GenerationReport) {
    println!("✅ Generated: {}", report.solution_path.display());
    println!(
        "   📦 {} project(s), 📁 {} folder(s)",
        report.projects, report.folders
    );
    print_recovered(&report.recovered);
}

fn print_recovered(recovered: &[Error]) {
    if recovered.is_empty() {
        return;
    }
    eprintln!("⚠️  Left out {} item(s):", recovered.len());
    for error in recovered {
        eprintln!("   • {error}");
    }
}
