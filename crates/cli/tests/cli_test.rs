use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn solgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("solgen").unwrap();
    cmd.current_dir(dir)
        .env_remove("SOLGEN_CONFIG")
        .env_remove("SOLGEN_VS_PATH")
        .env_remove("RUST_LOG");
    cmd
}

fn write_project(root: &Path, relative: &str, references: &[&str]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let items: String = references
        .iter()
        .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
        .collect();
    fs::write(
        path,
        format!(
            "<Project xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\n  \
             <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"
        ),
    )
    .unwrap();
}

#[test]
fn test_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    solgen(temp_dir.path())
        .arg("--no-open")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No project files found"));
}

#[test]
fn test_generates_next_to_project() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path(), "app/App.csproj", &[r"..\lib\Lib.csproj"]);
    write_project(temp_dir.path(), "lib/Lib.csproj", &[]);

    solgen(temp_dir.path())
        .args(["--no-open", "app/App.csproj"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"))
        .stdout(predicate::str::contains("2 project(s)"));

    let text = fs::read_to_string(temp_dir.path().join("app/App.sln")).unwrap();
    assert!(text.contains(r#""Lib.csproj", "..\lib\Lib.csproj""#));
}

#[test]
fn test_discovered_projects_named_after_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("Shop");
    write_project(&root, "app/App.csproj", &[]);
    write_project(&root, "lib/Lib.vbproj", &[]);
    write_project(&root, "app/obj/Stale.csproj", &[]);

    solgen(&root).arg("--no-open").assert().success();

    let text = fs::read_to_string(root.join("Shop.sln")).unwrap();
    assert!(text.contains("App.csproj"));
    assert!(text.contains("Lib.vbproj"));
    assert!(!text.contains("Stale.csproj"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path(), "App.csproj", &[]);

    solgen(temp_dir.path())
        .args(["--dry-run", "--configs", "x86,x64", "App.csproj"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Microsoft Visual Studio Solution File, Format Version 11.00",
        ))
        .stdout(predicate::str::contains("Debug|x64 = Debug|x64"))
        .stdout(predicate::str::contains("Release|x86 = Release|x86"));

    assert!(!temp_dir.path().join("App.sln").exists());
}

#[test]
fn test_output_and_settings_suffix() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path(), "src/App.csproj", &[]);
    fs::write(
        temp_dir.path().join(".solgen.json"),
        r#"{ "build_configurations": ["x64"], "solution_suffix": "_all" }"#,
    )
    .unwrap();

    solgen(temp_dir.path())
        .args(["--no-open", "src/App.csproj"])
        .assert()
        .success();
    let text = fs::read_to_string(temp_dir.path().join("src/App_all.sln")).unwrap();
    assert!(text.contains("Debug|x64 = Debug|x64"));

    solgen(temp_dir.path())
        .args(["--no-open", "-o", "out/Custom.sln", "src/App.csproj"])
        .assert()
        .success();
    assert!(temp_dir.path().join("out/Custom.sln").exists());
}

#[test]
fn test_graph_prints_json() {
    let temp_dir = TempDir::new().unwrap();
    write_project(temp_dir.path(), "app/App.csproj", &[]);

    let output = solgen(temp_dir.path())
        .args(["--graph", "app/App.csproj"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes = json["nodes"].as_object().unwrap();
    let projects: Vec<_> = nodes
        .iter()
        .filter(|(_, node)| node["kind"]["type"] == "project")
        .map(|(path, _)| path.as_str())
        .collect();
    assert_eq!(projects.len(), 1);
    assert!(projects[0].ends_with("App.csproj"));
    assert!(!temp_dir.path().join("app/App.sln").exists());
}

#[test]
fn test_missing_project_argument_fails() {
    let temp_dir = TempDir::new().unwrap();

    solgen(temp_dir.path())
        .args(["--no-open", "Missing.csproj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing.csproj"));
}

#[test]
fn test_init_writes_settings() {
    let temp_dir = TempDir::new().unwrap();

    solgen(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created settings"));
    assert!(temp_dir.path().join(".solgen.json").is_file());
}
