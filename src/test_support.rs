//! Shared gateway doubles for store and launcher tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::clipboard::ClipboardGateway;
use crate::config::{AppConfig, ConfigStorage, TerminalType};
use crate::error::{Error, Result};
use crate::executor::CommandExecutor;
use crate::launcher::Launcher;
use crate::scripts::{CommandForm, ScriptForm};
use crate::snippets::SnippetForm;

/// In-memory blob storage with switchable failure modes and a save counter.
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<AppConfig>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStorage {
    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved blob, if any.
    pub fn saved(&self) -> Option<AppConfig> {
        self.blob.lock().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl ConfigStorage for MemoryStorage {
    fn load(&self) -> Result<AppConfig> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(Error::Persistence("storage offline".to_string()));
        }
        Ok(self.blob.lock().clone().unwrap_or_default())
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Error::Persistence("storage offline".to_string()));
        }
        *self.blob.lock() = Some(config.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Executor that records calls instead of spawning anything.
#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: Mutex<Vec<(PathBuf, String, TerminalType)>>,
    fail: AtomicBool,
}

impl RecordingExecutor {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, working_dir: &Path, command: &str, terminal: TerminalType) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Execution("spawn refused".to_string()));
        }
        self.calls
            .lock()
            .push((working_dir.to_path_buf(), command.to_string(), terminal));
        Ok(())
    }
}

/// Clipboard that records written text instead of touching the system.
#[derive(Default)]
pub struct RecordingClipboard {
    pub texts: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingClipboard {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ClipboardGateway for RecordingClipboard {
    fn write_text(&self, content: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Clipboard("clipboard unavailable".to_string()));
        }
        self.texts.lock().push(content.to_string());
        Ok(())
    }
}

/// A launcher wired entirely to in-memory doubles.
pub fn launcher_with_doubles() -> (
    Launcher,
    Arc<MemoryStorage>,
    Arc<RecordingExecutor>,
    Arc<RecordingClipboard>,
) {
    let storage = Arc::new(MemoryStorage::default());
    let executor = Arc::new(RecordingExecutor::default());
    let clipboard = Arc::new(RecordingClipboard::default());
    let launcher = Launcher::new(
        Arc::clone(&storage) as Arc<dyn ConfigStorage>,
        Arc::clone(&executor) as Arc<dyn CommandExecutor>,
        Arc::clone(&clipboard) as Arc<dyn ClipboardGateway>,
    );
    (launcher, storage, executor, clipboard)
}

/// Minimal script form with one command.
pub fn script_form(name: &str, working_dir: &str) -> ScriptForm {
    ScriptForm {
        name: name.to_string(),
        working_dir: working_dir.to_string(),
        commands: vec![CommandForm {
            id: None,
            name: "run".to_string(),
            command: "npm run dev".to_string(),
        }],
        description: None,
        icon: None,
    }
}

/// Minimal snippet form.
pub fn snippet_form(title: &str, content: &str) -> SnippetForm {
    SnippetForm {
        title: title.to_string(),
        content: content.to_string(),
        category: None,
        description: None,
    }
}
