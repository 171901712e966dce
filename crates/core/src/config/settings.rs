use crate::{
    error::{Error, Result},
    solution::BuildMatrix,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up from the working directory upwards
pub const SETTINGS_FILE_NAME: &str = ".solgen.json";
/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV_VAR: &str = "SOLGEN_CONFIG";
/// Environment variable naming the IDE to open solutions with
pub const IDE_ENV_VAR: &str = "SOLGEN_VS_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Settings {
    /// Configurations used when none are given on the command line
    pub build_configurations: Vec<String>,
    /// Appended to the generated solution's file stem
    pub solution_suffix: String,
    /// Program to open the generated solution with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_path: Option<String>,
}

impl Settings {
    /// Load settings for a run started in `cwd`, honoring the environment
    pub fn load(cwd: &Path) -> Result<Self> {
        Self::load_with(
            cwd,
            std::env::var(SETTINGS_ENV_VAR).ok(),
            std::env::var(IDE_ENV_VAR).ok(),
        )
    }

    /// Like [`Settings::load`] with the environment passed in
    pub fn load_with(
        cwd: &Path,
        settings_path: Option<String>,
        ide_path: Option<String>,
    ) -> Result<Self> {
        let mut settings = match settings_path.filter(|p| !p.is_empty()) {
            Some(path) => Self::load_from_file(Path::new(&path))?,
            None => match Self::find_settings_file(cwd) {
                Some(path) => Self::load_from_file(&path)?,
                None => {
                    tracing::debug!("No {} found, using defaults", SETTINGS_FILE_NAME);
                    Self::default()
                }
            },
        };

        if let Some(ide) = ide_path.filter(|p| !p.is_empty()) {
            settings.ide_path = Some(ide);
        }

        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading settings from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let settings = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_settings_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let settings_path = current.join(SETTINGS_FILE_NAME);
            if settings_path.is_file() {
                return Some(settings_path);
            }

            current = current.parent()?;
        }
    }

    /// Build matrix from `overrides` when non-empty, else from the settings
    pub fn build_matrix(&self, overrides: &[String]) -> BuildMatrix {
        if overrides.iter().any(|c| !c.trim().is_empty()) {
            BuildMatrix::new(overrides.iter().cloned())
        } else {
            BuildMatrix::new(self.build_configurations.iter().cloned())
        }
    }

    /// File name of a solution generated for `stem`
    pub fn solution_file_name(&self, stem: &str) -> String {
        format!("{stem}{}.sln", self.solution_suffix)
    }
}
