use std::path::{Path, PathBuf};

use crate::utils::path::{is_within, same_path};

/// Directory every emitted path is expressed against
///
/// Starts at the solution's own directory and widens to each newly seen
/// folder that is an ancestor of it. A folder outside the current root
/// loses the root for good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonRoot {
    current: Option<PathBuf>,
}

/// Outcome of observing one folder directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootChange {
    Unchanged,
    /// The root moved up from the contained previous root
    Widened(PathBuf),
    /// The directory is outside the previous root, which no longer applies
    Lost(PathBuf),
}

impl CommonRoot {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            current: Some(start.into()),
        }
    }

    pub fn get(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn is_lost(&self) -> bool {
        self.current.is_none()
    }

    pub fn is(&self, directory: &Path) -> bool {
        self.current
            .as_deref()
            .is_some_and(|current| same_path(current, directory))
    }

    pub fn observe(&mut self, directory: &Path) -> RootChange {
        let Some(current) = self.current.as_deref() else {
            return RootChange::Unchanged;
        };

        if is_within(current, directory) {
            if same_path(current, directory) {
                return RootChange::Unchanged;
            }
            let previous = current.to_path_buf();
            tracing::debug!(
                "Common root widened from {} to {}",
                previous.display(),
                directory.display()
            );
            self.current = Some(directory.to_path_buf());
            RootChange::Widened(previous)
        } else if is_within(directory, current) {
            RootChange::Unchanged
        } else {
            tracing::debug!(
                "Common root lost: {} is outside {}",
                directory.display(),
                current.display()
            );
            let previous = current.to_path_buf();
            self.current = None;
            RootChange::Lost(previous)
        }
    }

    pub fn into_inner(self) -> Option<PathBuf> {
        self.current
    }
}
