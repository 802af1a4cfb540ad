//! Script entity types
//!
//! A script is a working directory plus an ordered list of launchable
//! commands. Form types carry caller-provided fields for create/edit;
//! applying a form is an explicit field-by-field replacement so the id and
//! creation timestamp can never be overwritten by accident.

use serde::{Deserialize, Serialize};

use crate::clock;

pub(crate) const SCRIPT_ID_PREFIX: &str = "script";
pub(crate) const COMMAND_ID_PREFIX: &str = "cmd";

/// One launchable command belonging to a script (e.g. "dev mode" running
/// `npm run dev`). Owned exclusively by exactly one script, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub name: String,
    pub command: String,
}

/// A stored script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub working_dir: String,
    pub commands: Vec<Command>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller-provided fields for creating or editing a command.
/// An existing id is preserved; a missing one is minted on apply.
#[derive(Debug, Clone, Default)]
pub struct CommandForm {
    pub id: Option<String>,
    pub name: String,
    pub command: String,
}

/// Caller-provided fields for creating or editing a script. No structural
/// validation happens at this layer; that is a presentation concern.
#[derive(Debug, Clone, Default)]
pub struct ScriptForm {
    pub name: String,
    pub working_dir: String,
    pub commands: Vec<CommandForm>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl Script {
    /// Build a fresh script from form data with a newly minted id and
    /// `createdAt == updatedAt == now`.
    pub(crate) fn from_form(form: ScriptForm) -> Self {
        let now = clock::now_millis();
        Script {
            id: clock::generate_id(SCRIPT_ID_PREFIX),
            name: form.name,
            icon: form.icon,
            working_dir: form.working_dir,
            commands: commands_with_ids(form.commands),
            description: form.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields from form data. The id and `createdAt`
    /// are untouched; `updatedAt` is stamped.
    pub(crate) fn apply_form(&mut self, form: ScriptForm) {
        self.name = form.name;
        self.working_dir = form.working_dir;
        self.description = form.description;
        self.icon = form.icon;
        self.commands = commands_with_ids(form.commands);
        self.updated_at = clock::now_millis();
    }
}

/// Ensure every command carries an id, preserving ids supplied by the caller.
fn commands_with_ids(forms: Vec<CommandForm>) -> Vec<Command> {
    forms
        .into_iter()
        .map(|form| Command {
            id: form
                .id
                .unwrap_or_else(|| clock::generate_id(COMMAND_ID_PREFIX)),
            name: form.name,
            command: form.command,
        })
        .collect()
}
