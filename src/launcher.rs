//! Launcher context construction
//!
//! No ambient singletons: the context owns both stores and wires them to
//! their gateways explicitly, in a fixed order: storage first, then the
//! shared slices and the assembler, then the stores, which are loaded
//! before the context is handed out. The theme controller has no dependency
//! on any of this and is constructed separately (see [`crate::theme`]).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::assembler::{ConfigAssembler, SharedSlice};
use crate::clipboard::{ClipboardGateway, SystemClipboard};
use crate::config::{ConfigStorage, JsonFileStorage, TerminalType};
use crate::executor::{CommandExecutor, ShellExecutor};
use crate::scripts::{Script, ScriptStore};
use crate::snippets::{Snippet, SnippetStore};

pub struct Launcher {
    pub scripts: ScriptStore,
    pub snippets: SnippetStore,
}

impl Launcher {
    /// Build a launcher over the given gateways and load both collections
    /// from storage. Load failures reset the affected collection to empty
    /// and never abort construction.
    pub fn new(
        storage: Arc<dyn ConfigStorage>,
        executor: Arc<dyn CommandExecutor>,
        clipboard: Arc<dyn ClipboardGateway>,
    ) -> Self {
        let scripts: SharedSlice<Script> = Arc::new(Mutex::new(Vec::new()));
        let snippets: SharedSlice<Snippet> = Arc::new(Mutex::new(Vec::new()));
        let terminal = Arc::new(Mutex::new(TerminalType::default()));

        let assembler = Arc::new(ConfigAssembler::new(
            Arc::clone(&storage),
            Arc::clone(&scripts),
            Arc::clone(&snippets),
            Arc::clone(&terminal),
        ));

        let script_store = ScriptStore::new(
            scripts,
            terminal,
            Arc::clone(&storage),
            Arc::clone(&assembler),
            executor,
        );
        let snippet_store = SnippetStore::new(snippets, storage, assembler, clipboard);

        script_store.load();
        snippet_store.load();

        Launcher {
            scripts: script_store,
            snippets: snippet_store,
        }
    }

    /// Launcher over the default on-disk gateways.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(JsonFileStorage::new()),
            Arc::new(ShellExecutor),
            Arc::new(SystemClipboard),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::ScriptForm;
    use crate::snippets::SnippetForm;
    use crate::test_support::{script_form, snippet_form, MemoryStorage, RecordingClipboard, RecordingExecutor};

    fn launcher(storage: &Arc<MemoryStorage>) -> Launcher {
        Launcher::new(
            Arc::clone(storage) as Arc<dyn ConfigStorage>,
            Arc::new(RecordingExecutor::default()),
            Arc::new(RecordingClipboard::default()),
        )
    }

    #[test]
    fn round_trips_both_collections_through_storage() {
        let storage = Arc::new(MemoryStorage::default());
        let first = launcher(&storage);

        let script = first.scripts.add(script_form("build", "/tmp/proj")).unwrap();
        first
            .scripts
            .update(
                &script.id,
                ScriptForm {
                    description: Some("nightly build".to_string()),
                    ..script_form("build", "/tmp/proj")
                },
            )
            .unwrap();
        let doomed = first.snippets.add(snippet_form("scratch", "x")).unwrap();
        let kept = first.snippets.add(snippet_form("greeting", "hello")).unwrap();
        first.snippets.remove(&doomed.id).unwrap();

        // Fresh collections over the same storage reproduce both slices
        // exactly: ids, field values, and order.
        let second = launcher(&storage);
        assert_eq!(second.scripts.all(), first.scripts.all());
        assert_eq!(second.snippets.all(), first.snippets.all());
        assert_eq!(second.snippets.get(&kept.id).unwrap().title, "greeting");
    }

    #[test]
    fn snippet_mutation_leaves_persisted_scripts_untouched() {
        let storage = Arc::new(MemoryStorage::default());
        let launcher = launcher(&storage);
        launcher.scripts.add(script_form("deploy", "/srv")).unwrap();
        let scripts_before = storage.saved().unwrap().scripts;

        launcher.snippets.add(snippet_form("note", "text")).unwrap();

        let blob = storage.saved().unwrap();
        assert_eq!(blob.scripts, scripts_before);
        assert_eq!(blob.snippets.len(), 1);
    }

    #[test]
    fn script_mutation_leaves_persisted_snippets_untouched() {
        let storage = Arc::new(MemoryStorage::default());
        let launcher = launcher(&storage);
        launcher.snippets.add(snippet_form("note", "text")).unwrap();
        let snippets_before = storage.saved().unwrap().snippets;

        launcher.scripts.add(script_form("deploy", "/srv")).unwrap();

        let blob = storage.saved().unwrap();
        assert_eq!(blob.snippets, snippets_before);
        assert_eq!(blob.scripts.len(), 1);
    }

    #[test]
    fn whichever_store_saves_carries_the_other_stores_latest_state() {
        let storage = Arc::new(MemoryStorage::default());
        let launcher = launcher(&storage);

        // Mutations alternate between the two stores; the final blob must
        // reflect all of them no matter which store wrote last.
        launcher.scripts.add(script_form("one", "/a")).unwrap();
        launcher.snippets.add(snippet_form("n1", "x")).unwrap();
        launcher.scripts.add(script_form("two", "/b")).unwrap();
        launcher
            .snippets
            .add(SnippetForm {
                title: "n2".to_string(),
                content: "y".to_string(),
                category: Some("notes".to_string()),
                description: None,
            })
            .unwrap();

        let blob = storage.saved().unwrap();
        assert_eq!(blob.scripts.len(), 2);
        assert_eq!(blob.snippets.len(), 2);
    }

    #[test]
    fn construction_survives_broken_storage() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set_fail_load(true);
        let launcher = launcher(&storage);
        assert!(launcher.scripts.is_empty());
        assert!(launcher.snippets.is_empty());
    }
}
