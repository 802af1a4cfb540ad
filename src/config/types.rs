//! Configuration type definitions
//!
//! The wire format is a contract with whatever holds the persisted blob:
//! field names are camelCase on the wire, and optional fields are omitted
//! entirely when absent, never serialized as empty strings or null.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults::CONFIG_VERSION;
use crate::scripts::Script;
use crate::snippets::Snippet;

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parse a side-channel value. Anything malformed is None.
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal flavor used to launch script commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalType {
    #[default]
    Powershell7,
    Powershell5,
    Cmd,
    Bash,
}

impl TerminalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalType::Powershell7 => "powershell7",
            TerminalType::Powershell5 => "powershell5",
            TerminalType::Cmd => "cmd",
            TerminalType::Bash => "bash",
        }
    }

    pub const ALL: [TerminalType; 4] = [
        TerminalType::Powershell7,
        TerminalType::Powershell5,
        TerminalType::Cmd,
        TerminalType::Bash,
    ];
}

impl fmt::Display for TerminalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerminalType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown terminal type: {s} (expected powershell7, powershell5, cmd, or bash)"))
    }
}

/// The persisted configuration blob: the sole unit of durable truth.
///
/// Both entity collections live inside one record so a single save is atomic
/// across them; the in-memory stores are caches of slices of the last-loaded
/// or last-saved blob. The `theme` field is a vestigial default kept for
/// round-trip compatibility; the live [`crate::theme::ThemeController`]
/// owns the displayed value through its own channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub scripts: Vec<Script>,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
    #[serde(default)]
    pub terminal_type: TerminalType,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: Theme::Dark,
            scripts: Vec::new(),
            snippets: Vec::new(),
            terminal_type: TerminalType::default(),
            version: CONFIG_VERSION.to_string(),
        }
    }
}
