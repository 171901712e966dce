//! End-to-end tests: project files on disk to a written solution

use solgen_core::{BuildMatrix, Error, SequentialIds, SolutionGenerator};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_project(
    root: &Path,
    relative: &str,
    guid: Option<&str>,
    references: &[&str],
) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let guid = guid
        .map(|g| format!("    <ProjectGuid>{g}</ProjectGuid>\n"))
        .unwrap_or_default();
    let items: String = references
        .iter()
        .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
        .collect();

    fs::write(
        &path,
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="4.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <Platform Condition=" '$(Platform)' == '' ">AnyCPU</Platform>
{guid}  </PropertyGroup>
  <ItemGroup>
{items}  </ItemGroup>
</Project>
"#
        ),
    )
    .unwrap();
    path
}

fn root_of(temp_dir: &TempDir) -> PathBuf {
    std::path::absolute(temp_dir.path()).unwrap()
}

fn count(text: &str, needle: &str) -> usize {
    text.lines().filter(|line| line.contains(needle)).count()
}

fn project_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| line.starts_with("Project(")).collect()
}

#[test]
fn test_app_references_lib() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let app = write_project(&root, "app/App.csproj", None, &[r"..\lib\Lib.csproj"]);
    write_project(&root, "lib/Lib.csproj", None, &[]);
    let output = root.join("All.sln");

    let mut generator = SolutionGenerator::new(BuildMatrix::new(["x86"]))
        .with_id_generator(SequentialIds::new());
    let report = generator.generate(&[app], &output).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.projects, 2);
    assert_eq!(report.folders, 2);

    let entries = project_lines(&text);
    assert_eq!(entries.len(), 4);
    assert!(text.contains(r#"= "App.csproj", "app\App.csproj", "#));
    assert!(text.contains(r#"= "Lib.csproj", "lib\Lib.csproj", "#));
    assert!(entries.iter().any(|l| l.contains(r#"= "app", "{"#)));
    assert!(entries.iter().any(|l| l.contains(r#"= "lib", "{"#)));

    // Each project is nested in its folder; folders sit at the top
    assert_eq!(count(&text, "} = {"), 2);

    // 2 projects * 2 modes * 1 configuration
    assert_eq!(count(&text, ".ActiveCfg = "), 4);
    assert_eq!(count(&text, ".Build.0 = "), 4);
    assert_eq!(count(&text, "Debug|x86 = Debug|x86"), 1);
    assert_eq!(count(&text, "Release|x86 = Release|x86"), 1);
}

#[test]
fn test_declared_guid_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let guid = "{6A4E7C41-2B3F-4E0B-9C55-1D0F6C6A9E11}";
    let app = write_project(&root, "app/App.csproj", Some(guid), &[]);

    let mut generator = SolutionGenerator::new(BuildMatrix::default());
    let (text, _) = generator.preview(&[app], &root.join("app/App.sln")).unwrap();

    assert!(text.contains(&format!(r#""App.csproj", "App.csproj", "{guid}""#)));
    assert!(text.contains(&format!("{guid}.Debug|Any CPU.ActiveCfg = Debug|Any CPU")));
}

#[test]
fn test_reference_cycle_yields_two_projects() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let a = write_project(&root, "a/A.csproj", None, &["../b/B.csproj"]);
    write_project(&root, "b/B.csproj", None, &["../a/A.csproj"]);

    let mut generator = SolutionGenerator::new(BuildMatrix::default());
    let solution = generator.assemble(&[a], &root).unwrap();

    assert_eq!(solution.graph.projects().count(), 2);
    for project in solution.graph.projects() {
        assert_eq!(project.details().unwrap().references.len(), 1);
    }
}

#[test]
fn test_broken_reference_is_recovered() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let app = write_project(&root, "app/App.csproj", None, &["../gone/Gone.csproj"]);
    let output = root.join("App.sln");

    let mut generator = SolutionGenerator::new(BuildMatrix::default());
    let report = generator.generate(&[app], &output).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.projects, 1);
    assert!(matches!(
        report.recovered.as_slice(),
        [Error::ProjectEvaluation { .. }]
    ));
    assert!(output.exists());
}

#[test]
fn test_no_entry_points_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output = root_of(&temp_dir).join("Empty.sln");

    let mut generator = SolutionGenerator::new(BuildMatrix::default());
    let err = generator.generate(&[], &output).unwrap_err();

    assert!(matches!(err, Error::NoProjectsFound));
    assert!(!output.exists());
}

#[test]
fn test_unevaluable_entry_point_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let bogus = root.join("Bogus.csproj");
    fs::write(&bogus, "not xml at all").unwrap();
    let output = root.join("Bogus.sln");

    let mut generator = SolutionGenerator::new(BuildMatrix::default());
    let err = generator.generate(&[bogus], &output).unwrap_err();

    assert!(matches!(err, Error::NoProjectsFound));
    assert!(!output.exists());
}

#[test]
fn test_projects_outside_solution_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let app = write_project(&root, "src/app/App.csproj", None, &["../../lib/Lib.csproj"]);
    write_project(&root, "lib/Lib.csproj", None, &[]);
    let output = root.join("src/app/App.sln");

    let mut generator = SolutionGenerator::new(BuildMatrix::default());
    let (text, report) = generator.preview(&[app], &output).unwrap();

    // lib is outside src/app, so the common root is lost and the path walks up
    assert!(report.is_complete());
    assert!(text.contains(r#"= "Lib.csproj", "..\..\lib\Lib.csproj", "#));
    assert!(text.contains(r#"= "App.csproj", "App.csproj", "#));
}

#[test]
fn test_mixed_platforms_uses_project_platform() {
    let temp_dir = TempDir::new().unwrap();
    let root = root_of(&temp_dir);
    let app = write_project(&root, "App.csproj", None, &[]);

    let mut generator = SolutionGenerator::new(BuildMatrix::new(["Mixed Platforms"]));
    let (text, _) = generator.preview(&[app], &root.join("App.sln")).unwrap();

    assert_eq!(count(&text, ".Debug|Mixed Platforms.ActiveCfg = Debug|Any CPU"), 1);
    assert_eq!(count(&text, ".Release|Mixed Platforms.Build.0 = Release|Any CPU"), 1);
}
