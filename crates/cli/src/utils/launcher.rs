use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Command that opens `solution`, either in `ide` or with the platform's
/// default handler for `.sln` files
pub fn open_command(solution: &Path, ide: Option<&str>) -> Command {
    match ide.filter(|ide| !ide.trim().is_empty()) {
        Some(ide) => {
            let mut command = Command::new(ide);
            command.arg(solution);
            command
        }
        None => default_opener(solution),
    }
}

#[cfg(windows)]
fn default_opener(solution: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(solution);
    command
}

#[cfg(target_os = "macos")]
fn default_opener(solution: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(solution);
    command
}

#[cfg(not(any(windows, target_os = "macos")))]
fn default_opener(solution: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(solution);
    command
}

/// Launch the solution without waiting for the program to exit
pub fn open_solution(solution: &Path, ide: Option<&str>) -> Result<()> {
    let mut command = open_command(solution, ide);
    debug!("Opening solution with {:?}", command);
    command
        .spawn()
        .with_context(|| format!("Failed to launch {:?}", command.get_program()))?;
    Ok(())
}
