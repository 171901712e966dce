//! Path helpers shared by the assembler and the writer

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path, removing `.` and resolving `..`
///
/// Does not touch the file system, so the path does not need to exist.
/// A `..` never climbs above the root or prefix.
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Resolve `include` against `base` and normalize the result
pub fn resolve(base: &Path, include: &Path) -> PathBuf {
    if include.is_absolute() {
        normalize(include)
    } else {
        normalize(&base.join(include))
    }
}

/// Express `target` relative to the directory `base`
///
/// Targets below `base` are a plain prefix removal. Anything else walks up
/// from `base` to the longest common leading run of components (compared
/// case-insensitively) and back down to `target`. Returns `None` when the
/// two paths share no component at all, e.g. different drives.
pub fn relative_to(base: &Path, target: &Path) -> Option<PathBuf> {
    if let Ok(stripped) = target.strip_prefix(base) {
        return Some(stripped.to_path_buf());
    }

    let from: Vec<Component> = base.components().collect();
    let to: Vec<Component> = target.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| components_match(a, b))
        .count();

    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }

    Some(relative)
}

fn components_match(a: &Component, b: &Component) -> bool {
    let a = a.as_os_str().to_string_lossy();
    let b = b.as_os_str().to_string_lossy();
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Form of `path` used for lookups and comparisons
///
/// File names are case-insensitive on Windows, so there the key is
/// lower-cased; elsewhere it is the path itself.
pub fn path_key(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        PathBuf::from(path.as_os_str().to_string_lossy().to_lowercase())
    }
    #[cfg(not(windows))]
    {
        path.to_path_buf()
    }
}

/// Whether `a` and `b` name the same path under [`path_key`]
pub fn same_path(a: &Path, b: &Path) -> bool {
    path_key(a) == path_key(b)
}

/// Whether `path` is `ancestor` or lies below it, component-wise
pub fn is_within(path: &Path, ancestor: &Path) -> bool {
    path_key(path).starts_with(path_key(ancestor))
}

/// Render a relative path with the `\` separators solution files use
pub fn to_solution_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("\\")
}

/// Convert separators written in project files to the host separator
pub fn from_project_path(include: &str) -> PathBuf {
    if std::path::MAIN_SEPARATOR == '\\' {
        PathBuf::from(include.replace('/', "\\"))
    } else {
        PathBuf::from(include.replace('\\', "/"))
    }
}
