//! scriptdeck CLI
//!
//! Thin command-line surface over the launcher core: every subcommand maps
//! onto one store operation. The stores own all behavior; this file only
//! parses arguments and prints results.

use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use scriptdeck::clipboard::SystemClipboard;
use scriptdeck::config::{JsonFileStorage, TerminalType, Theme};
use scriptdeck::executor::ShellExecutor;
use scriptdeck::launcher::Launcher;
use scriptdeck::logging;
use scriptdeck::scripts::{CommandForm, ScriptForm};
use scriptdeck::snippets::SnippetForm;
use scriptdeck::theme::{FileThemeChannel, LogDisplayHook, ThemeController};

#[derive(Parser)]
#[command(name = "scriptdeck", about = "Personal launcher for scripts and text snippets", version)]
struct Cli {
    /// Path to the config blob (default: ~/.scriptdeck/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Manage stored scripts
    #[command(subcommand)]
    Script(ScriptCmd),
    /// Manage text snippets
    #[command(subcommand)]
    Snippet(SnippetCmd),
    /// Show or set the terminal flavor used to launch commands
    Terminal {
        /// powershell7, powershell5, cmd, or bash
        terminal: Option<TerminalType>,
    },
    /// Show or change the display theme
    Theme {
        /// "light", "dark", or "toggle"
        value: Option<String>,
    },
    /// Config file location
    #[command(subcommand)]
    Config(ConfigCmd),
}

#[derive(Subcommand)]
enum ScriptCmd {
    /// List all scripts
    List,
    /// Add a script
    Add {
        #[arg(long)]
        name: String,
        /// Working directory the commands run in
        #[arg(long)]
        dir: String,
        /// Command in the form "label=command line" (repeatable);
        /// a bare command line gets the label "run"
        #[arg(long = "cmd", required = true)]
        commands: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Remove a script by id
    Rm { id: String },
    /// Launch a script command (defaults to the script's first command)
    Run {
        id: String,
        command_id: Option<String>,
    },
}

#[derive(Subcommand)]
enum SnippetCmd {
    /// List snippets, filtered and ranked by usage
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        query: Option<String>,
    },
    /// Add a snippet
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a snippet by id
    Rm { id: String },
    /// Copy a snippet's content to the clipboard (counts as a use)
    Copy { id: String },
    /// List all known categories
    Categories,
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Print the config file path
    Path,
    /// Open the config folder in the system file manager
    Open,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init();

    let storage = Arc::new(match &cli.config {
        Some(path) => JsonFileStorage::with_path(PathBuf::from(shellexpand::tilde(path).as_ref())),
        None => JsonFileStorage::new(),
    });
    let config_path = storage.path().to_path_buf();

    match cli.command {
        Cmd::Script(cmd) => run_script_cmd(cmd, launcher(storage)),
        Cmd::Snippet(cmd) => run_snippet_cmd(cmd, launcher(storage)),
        Cmd::Terminal { terminal } => {
            let launcher = launcher(storage);
            match terminal {
                Some(t) => {
                    launcher.scripts.set_terminal_type(t)?;
                    println!("terminal set to {t}");
                }
                None => println!("{}", launcher.scripts.terminal_type()),
            }
            Ok(())
        }
        Cmd::Theme { value } => run_theme_cmd(value),
        Cmd::Config(ConfigCmd::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Cmd::Config(ConfigCmd::Open) => open_config_folder(&config_path),
    }
}

fn launcher(storage: Arc<JsonFileStorage>) -> Launcher {
    Launcher::new(storage, Arc::new(ShellExecutor), Arc::new(SystemClipboard))
}

fn run_script_cmd(cmd: ScriptCmd, launcher: Launcher) -> Result<()> {
    match cmd {
        ScriptCmd::List => {
            for script in launcher.scripts.all() {
                println!("{}  {}  ({})", script.id, script.name, script.working_dir);
                for command in &script.commands {
                    println!("    {}  {}: {}", command.id, command.name, command.command);
                }
            }
        }
        ScriptCmd::Add {
            name,
            dir,
            commands,
            description,
            icon,
        } => {
            let commands = commands.iter().map(|spec| parse_command_spec(spec)).collect();
            let script = launcher.scripts.add(ScriptForm {
                name,
                working_dir: dir,
                commands,
                description,
                icon,
            })?;
            println!("added {}", script.id);
        }
        ScriptCmd::Rm { id } => {
            launcher.scripts.remove(&id)?;
            println!("removed {id}");
        }
        ScriptCmd::Run { id, command_id } => {
            let command_id = match command_id {
                Some(cid) => cid,
                None => {
                    let script = launcher
                        .scripts
                        .get(&id)
                        .with_context(|| format!("script not found: {id}"))?;
                    let first = script
                        .commands
                        .first()
                        .with_context(|| format!("script {id} has no commands"))?;
                    first.id.clone()
                }
            };
            launcher.scripts.execute(&id, &command_id)?;
            println!("launched {command_id}");
        }
    }
    Ok(())
}

/// Parse "label=command line" into a command form; a bare command line gets
/// the label "run".
fn parse_command_spec(spec: &str) -> CommandForm {
    let (name, command) = match spec.split_once('=') {
        Some((label, rest)) => (label.to_string(), rest.to_string()),
        None => ("run".to_string(), spec.to_string()),
    };
    CommandForm {
        id: None,
        name,
        command,
    }
}

fn run_snippet_cmd(cmd: SnippetCmd, launcher: Launcher) -> Result<()> {
    match cmd {
        SnippetCmd::List { category, query } => {
            launcher.snippets.set_category(category);
            if let Some(query) = query {
                launcher.snippets.set_query(query);
            }
            for snippet in launcher.snippets.filtered() {
                let category = snippet.category.as_deref().unwrap_or("-");
                println!(
                    "{}  {}  [{}] used {}x",
                    snippet.id, snippet.title, category, snippet.usage_count
                );
            }
        }
        SnippetCmd::Add {
            title,
            content,
            category,
            description,
        } => {
            let snippet = launcher.snippets.add(SnippetForm {
                title,
                content,
                category,
                description,
            })?;
            println!("added {}", snippet.id);
        }
        SnippetCmd::Rm { id } => {
            launcher.snippets.remove(&id)?;
            println!("removed {id}");
        }
        SnippetCmd::Copy { id } => {
            launcher.snippets.copy_to_clipboard(&id)?;
            println!("copied {id}");
        }
        SnippetCmd::Categories => {
            for category in launcher.snippets.categories() {
                println!("{category}");
            }
        }
    }
    Ok(())
}

fn run_theme_cmd(value: Option<String>) -> Result<()> {
    let controller = ThemeController::new(
        Arc::new(FileThemeChannel::new()),
        Arc::new(LogDisplayHook),
    );
    match value.as_deref() {
        None => println!("{}", controller.theme()),
        Some("toggle") => println!("{}", controller.toggle()),
        Some(raw) => match Theme::parse(raw) {
            Some(theme) => {
                controller.set_theme(theme);
                println!("{theme}");
            }
            None => bail!("unknown theme: {raw} (expected light, dark, or toggle)"),
        },
    }
    Ok(())
}

fn open_config_folder(config_path: &Path) -> Result<()> {
    let folder = config_path
        .parent()
        .context("config path has no parent directory")?;

    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(all(unix, not(target_os = "macos")))]
    let opener = "xdg-open";

    ProcessCommand::new(opener)
        .arg(folder)
        .spawn()
        .with_context(|| format!("failed to open {}", folder.display()))?;
    Ok(())
}
