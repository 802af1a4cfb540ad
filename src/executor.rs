//! Command execution gateway
//!
//! Launching a script command is delegated to an executor trait so the
//! stores stay testable. The default executor opens the command in a
//! terminal of the configured flavor and does not wait for it to finish.

use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::config::TerminalType;
use crate::error::{Error, Result};

/// Runs a command string in a working directory via a terminal flavor.
///
/// Failure to launch must surface to the caller; silently failing to run a
/// user-requested command is unacceptable.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, working_dir: &Path, command: &str, terminal: TerminalType) -> Result<()>;
}

/// Spawns the command in a fresh terminal process, fire-and-forget: the
/// launch either succeeds or errors, but the command's own exit status is
/// the terminal's business.
#[derive(Debug, Default)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&self, working_dir: &Path, command: &str, terminal: TerminalType) -> Result<()> {
        info!(
            working_dir = %working_dir.display(),
            command,
            terminal = terminal.as_str(),
            "Launching command"
        );
        spawn_in_terminal(working_dir, command, terminal)
            .map_err(|e| Error::Execution(format!("failed to launch `{}`: {}", command, e)))
    }
}

#[cfg(target_os = "windows")]
fn spawn_in_terminal(
    working_dir: &Path,
    command: &str,
    terminal: TerminalType,
) -> std::io::Result<()> {
    // `start` detaches a new console window that stays open after the
    // command finishes (`/K`, `-NoExit`).
    let mut launcher = Command::new("cmd");
    launcher.current_dir(working_dir);
    match terminal {
        TerminalType::Powershell7 => {
            launcher.args(["/C", "start", "pwsh", "-NoExit", "-Command", command])
        }
        TerminalType::Powershell5 => {
            launcher.args(["/C", "start", "powershell", "-NoExit", "-Command", command])
        }
        TerminalType::Cmd => launcher.args(["/C", "start", "cmd", "/K", command]),
        TerminalType::Bash => launcher.args(["/C", "start", "bash", "-c", command]),
    };
    launcher.spawn().map(|_| ())
}

#[cfg(not(target_os = "windows"))]
fn spawn_in_terminal(
    working_dir: &Path,
    command: &str,
    terminal: TerminalType,
) -> std::io::Result<()> {
    // No console window to pop here; run through the requested shell
    // directly. cmd has no unix equivalent and degrades to sh.
    let (shell, flag) = match terminal {
        TerminalType::Powershell7 | TerminalType::Powershell5 => ("pwsh", "-Command"),
        TerminalType::Bash => ("bash", "-c"),
        TerminalType::Cmd => ("sh", "-c"),
    };
    Command::new(shell)
        .arg(flag)
        .arg(command)
        .current_dir(working_dir)
        .spawn()
        .map(|_| ())
}
