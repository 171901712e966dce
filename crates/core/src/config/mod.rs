//! Settings for solution generation

mod settings;

pub use settings::{IDE_ENV_VAR, SETTINGS_ENV_VAR, SETTINGS_FILE_NAME, Settings};
