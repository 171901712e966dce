use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Build output and tool directories that never hold source projects
const SKIPPED_DIRS: &[&str] = &["bin", "obj", "node_modules", "packages"];

/// Whether `path` names an MSBuild project file (`*.*proj`)
pub fn is_project_file(path: &Path) -> bool {
    let has_stem = path
        .file_stem()
        .is_some_and(|stem| !stem.is_empty() && !stem.to_string_lossy().starts_with('.'));
    let is_proj = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.to_ascii_lowercase().ends_with("proj"));
    has_stem && is_proj
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.iter().any(|d| name.eq_ignore_ascii_case(d))
}

/// Every project file below `root`, sorted by path
pub fn find_project_files(root: &Path) -> Vec<PathBuf> {
    let mut projects: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_project_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    projects.sort();
    debug!("Found {} project files below {}", projects.len(), root.display());
    projects
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<Project />").unwrap();
    }

    #[test]
    fn test_is_project_file() {
        assert!(is_project_file(Path::new("App.csproj")));
        assert!(is_project_file(Path::new("lib/Lib.VBPROJ")));
        assert!(is_project_file(Path::new("native/Core.vcxproj")));
        assert!(is_project_file(Path::new("build.proj")));
        assert!(!is_project_file(Path::new("App.sln")));
        assert!(!is_project_file(Path::new("csproj")));
        assert!(!is_project_file(Path::new("App.csproj.user")));
    }

    #[test]
    fn test_finds_nested_projects_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "src/b/B.csproj");
        touch(root, "src/a/A.fsproj");
        touch(root, "README.md");

        let found = find_project_files(root);
        assert_eq!(
            found,
            vec![root.join("src/a/A.fsproj"), root.join("src/b/B.csproj")]
        );
    }

    #[test]
    fn test_skips_build_output_and_hidden_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "App/App.csproj");
        touch(root, "App/obj/App.csproj");
        touch(root, "App/bin/Debug/App.csproj");
        touch(root, ".git/Stale.csproj");

        let found = find_project_files(root);
        assert_eq!(found, vec![root.join("App/App.csproj")]);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(find_project_files(temp_dir.path()).is_empty());
    }
}
