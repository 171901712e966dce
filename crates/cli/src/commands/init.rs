use anyhow::{Context, Result};
use solgen_core::{
    Settings,
    config::SETTINGS_FILE_NAME,
    solution::DEFAULT_CONFIGURATION,
};
use std::{env, path::Path};
use tracing::info;

pub fn init_command(cwd: Option<&Path>, force: bool) -> Result<()> {
    let root = match cwd {
        Some(cwd) => cwd.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let settings_path = root.join(SETTINGS_FILE_NAME);

    if settings_path.exists() && !force {
        println!("❌ Settings already exist at: {}", settings_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    let settings = Settings {
        build_configurations: vec![DEFAULT_CONFIGURATION.to_string()],
        ..Settings::default()
    };
    settings
        .save_to_file(&settings_path)
        .with_context(|| format!("Failed to write {}", settings_path.display()))?;

    info!("Wrote default settings to {}", settings_path.display());
    println!("✅ Created settings: {}", settings_path.display());
    Ok(())
}
