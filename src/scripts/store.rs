//! Script collection store
//!
//! Owns the authoritative in-memory script sequence plus the terminal
//! preference, with write-through persistence: every mutation reassembles
//! and saves the full config blob through the shared assembler. Locks are
//! never held across a gateway call, so overlapping mutators race
//! last-write-wins on the blob; callers needing strict ordering serialize
//! externally.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use super::types::{Script, ScriptForm};
use crate::assembler::{ConfigAssembler, SharedSlice};
use crate::config::{ConfigStorage, TerminalType};
use crate::error::{Error, Result};
use crate::executor::CommandExecutor;

pub struct ScriptStore {
    scripts: SharedSlice<Script>,
    terminal: Arc<Mutex<TerminalType>>,
    storage: Arc<dyn ConfigStorage>,
    assembler: Arc<ConfigAssembler>,
    executor: Arc<dyn CommandExecutor>,
}

impl ScriptStore {
    pub(crate) fn new(
        scripts: SharedSlice<Script>,
        terminal: Arc<Mutex<TerminalType>>,
        storage: Arc<dyn ConfigStorage>,
        assembler: Arc<ConfigAssembler>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        ScriptStore {
            scripts,
            terminal,
            storage,
            assembler,
            executor,
        }
    }

    /// Replace the in-memory sequence wholesale with the persisted slice,
    /// and adopt the persisted terminal preference.
    ///
    /// A gateway failure resets the sequence to empty and is NOT propagated:
    /// startup survives a broken blob at the cost of freshness.
    #[instrument(name = "scripts_load", skip(self))]
    pub fn load(&self) {
        match self.storage.load() {
            Ok(config) => {
                *self.terminal.lock() = config.terminal_type;
                let mut scripts = self.scripts.lock();
                *scripts = config.scripts;
                info!(count = scripts.len(), "Loaded scripts");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load config, starting with an empty script list");
                self.scripts.lock().clear();
            }
        }
    }

    /// Create a script from form data and persist. Returns the created
    /// record, appended at the end of the sequence (insertion order is
    /// recency order, oldest first).
    pub fn add(&self, form: ScriptForm) -> Result<Script> {
        let script = Script::from_form(form);
        self.scripts.lock().push(script.clone());
        self.assembler.persist()?;
        info!(id = %script.id, name = %script.name, "Added script");
        Ok(script)
    }

    /// Replace a script's mutable fields in place (its sequence position is
    /// stable across updates) and persist.
    pub fn update(&self, id: &str, form: ScriptForm) -> Result<()> {
        {
            let mut scripts = self.scripts.lock();
            let script = scripts
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| Error::ScriptNotFound(id.to_string()))?;
            script.apply_form(form);
        }
        self.assembler.persist()?;
        info!(id, "Updated script");
        Ok(())
    }

    /// Remove a script, shifting subsequent positions down, and persist.
    pub fn remove(&self, id: &str) -> Result<()> {
        {
            let mut scripts = self.scripts.lock();
            let index = scripts
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| Error::ScriptNotFound(id.to_string()))?;
            scripts.remove(index);
        }
        self.assembler.persist()?;
        info!(id, "Removed script");
        Ok(())
    }

    /// Pure lookup by id. No side effects, never fails.
    pub fn get(&self, id: &str) -> Option<Script> {
        self.scripts.lock().iter().find(|s| s.id == id).cloned()
    }

    /// Snapshot of the full sequence in insertion order.
    pub fn all(&self) -> Vec<Script> {
        self.scripts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.scripts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.lock().is_empty()
    }

    pub fn terminal_type(&self) -> TerminalType {
        *self.terminal.lock()
    }

    /// Change the terminal preference; persisted with the rest of the blob.
    pub fn set_terminal_type(&self, terminal: TerminalType) -> Result<()> {
        *self.terminal.lock() = terminal;
        self.assembler.persist()
    }

    /// Launch one of a script's commands through the executor gateway using
    /// the current terminal preference. Executor failures always propagate.
    pub fn execute(&self, script_id: &str, command_id: &str) -> Result<()> {
        let (working_dir, command) = {
            let scripts = self.scripts.lock();
            let script = scripts
                .iter()
                .find(|s| s.id == script_id)
                .ok_or_else(|| Error::ScriptNotFound(script_id.to_string()))?;
            let cmd = script
                .commands
                .iter()
                .find(|c| c.id == command_id)
                .ok_or_else(|| Error::CommandNotFound {
                    script_id: script_id.to_string(),
                    command_id: command_id.to_string(),
                })?;
            (script.working_dir.clone(), cmd.command.clone())
        };
        let terminal = self.terminal_type();
        info!(
            script_id,
            command_id,
            terminal = terminal.as_str(),
            "Executing script command"
        );
        self.executor
            .execute(Path::new(&working_dir), &command, terminal)
    }
}
