//! Cross-collection config assembly
//!
//! The one place the two collections meet. Every write-through save pulls
//! the live in-memory state of BOTH slices plus the terminal preference at
//! save time, so whichever store triggered the save, the written blob also
//! carries the other store's newest records. Starting a save from a cached
//! or partial blob would silently discard the other collection's latest
//! state.
//!
//! The assembler is owned by neither store; both hold an `Arc` to it, and it
//! holds shared read handles on the slices. That inversion breaks what would
//! otherwise be a cyclic dependency between the stores.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::config::{AppConfig, ConfigStorage, TerminalType, Theme, CONFIG_VERSION};
use crate::error::Result;
use crate::scripts::Script;
use crate::snippets::Snippet;

/// Shared handle to one collection's live slice. Stores mutate through it;
/// the assembler reads through it at snapshot time. Capability lookup, not
/// ownership.
pub type SharedSlice<T> = Arc<Mutex<Vec<T>>>;

pub struct ConfigAssembler {
    storage: Arc<dyn ConfigStorage>,
    scripts: SharedSlice<Script>,
    snippets: SharedSlice<Snippet>,
    terminal: Arc<Mutex<TerminalType>>,
}

impl ConfigAssembler {
    pub(crate) fn new(
        storage: Arc<dyn ConfigStorage>,
        scripts: SharedSlice<Script>,
        snippets: SharedSlice<Snippet>,
        terminal: Arc<Mutex<TerminalType>>,
    ) -> Self {
        ConfigAssembler {
            storage,
            scripts,
            snippets,
            terminal,
        }
    }

    /// Assemble a blob from the current live state of everything.
    ///
    /// The blob's `theme` field is written as the vestigial default; the
    /// live theme controller is authoritative for display and persists
    /// through its own channel.
    pub fn snapshot(&self) -> AppConfig {
        AppConfig {
            theme: Theme::default(),
            scripts: self.scripts.lock().clone(),
            snippets: self.snippets.lock().clone(),
            terminal_type: *self.terminal.lock(),
            version: CONFIG_VERSION.to_string(),
        }
    }

    /// Snapshot and write. A failure propagates to the mutator that
    /// triggered the save; in-memory state is not rolled back, leaving
    /// memory and durable storage out of sync until the next successful
    /// write.
    #[instrument(name = "config_persist", skip(self))]
    pub fn persist(&self) -> Result<()> {
        let config = self.snapshot();
        debug!(
            scripts = config.scripts.len(),
            snippets = config.snippets.len(),
            terminal = config.terminal_type.as_str(),
            "Persisting assembled config"
        );
        self.storage.save(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scripts::ScriptForm;
    use crate::test_support::MemoryStorage;

    fn assembler_with(
        storage: Arc<MemoryStorage>,
    ) -> (ConfigAssembler, SharedSlice<Script>, SharedSlice<Snippet>) {
        let scripts: SharedSlice<Script> = Arc::new(Mutex::new(Vec::new()));
        let snippets: SharedSlice<Snippet> = Arc::new(Mutex::new(Vec::new()));
        let terminal = Arc::new(Mutex::new(TerminalType::default()));
        let assembler = ConfigAssembler::new(
            storage,
            Arc::clone(&scripts),
            Arc::clone(&snippets),
            terminal,
        );
        (assembler, scripts, snippets)
    }

    #[test]
    fn snapshot_pulls_live_state_of_both_slices() {
        let (assembler, scripts, snippets) = assembler_with(Arc::new(MemoryStorage::default()));

        scripts.lock().push(Script::from_form(ScriptForm {
            name: "build".to_string(),
            working_dir: "/p".to_string(),
            ..ScriptForm::default()
        }));
        let before = assembler.snapshot();
        assert_eq!(before.scripts.len(), 1);
        assert!(before.snippets.is_empty());

        snippets.lock().push(Snippet::from_form(Default::default()));
        let after = assembler.snapshot();
        assert_eq!(after.scripts.len(), 1);
        assert_eq!(after.snippets.len(), 1);
    }

    #[test]
    fn snapshot_writes_the_vestigial_theme_and_version() {
        let (assembler, _, _) = assembler_with(Arc::new(MemoryStorage::default()));
        let blob = assembler.snapshot();
        assert_eq!(blob.theme, Theme::Dark);
        assert_eq!(blob.version, CONFIG_VERSION);
    }

    #[test]
    fn persist_failure_propagates() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set_fail_save(true);
        let (assembler, _, _) = assembler_with(Arc::clone(&storage));
        assert!(matches!(assembler.persist(), Err(Error::Persistence(_))));
        assert!(storage.saved().is_none());
    }
}
