//! Restarting the running panel so it rereads `waypanel.toml`

use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Result, SettingsError};
use crate::status::Outcome;

pub const PANEL_PROGRAM: &str = "waypanel";

/// Stop any running panel and start a new one in the background.
pub fn reload_panel() -> Result<Outcome> {
    restart(&["pkill", "-x", PANEL_PROGRAM], &[PANEL_PROGRAM])
}

/// Run `stop` to completion, then spawn `start` without waiting for it.
/// A non-zero exit from `stop` (nothing was running) is not an error.
fn restart(stop: &[&str], start: &[&str]) -> Result<Outcome> {
    let status = command(stop)?
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| spawn_error(stop, source))?;
    debug!("{} exited with {status}", stop.join(" "));

    command(start)?
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| spawn_error(start, source))?;
    Ok(Outcome::success("Waypanel reload initiated"))
}

fn command(argv: &[&str]) -> Result<Command> {
    let [program, args @ ..] = argv else {
        return Err(SettingsError::validation("command", "is empty"));
    };
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

fn spawn_error(argv: &[&str], source: std::io::Error) -> SettingsError {
    SettingsError::Process {
        program: argv.first().copied().unwrap_or_default().to_string(),
        source,
    }
}
