//! Snippet collection store
//!
//! Owns the authoritative in-memory snippet sequence, the live filter state
//! for the derived views, and the copy-to-clipboard path that drives usage
//! counters. Persistence is write-through via the shared assembler; locks
//! are never held across a gateway call.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use super::search;
use super::types::{Snippet, SnippetForm};
use crate::assembler::{ConfigAssembler, SharedSlice};
use crate::clipboard::ClipboardGateway;
use crate::config::ConfigStorage;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
struct FilterState {
    query: String,
    category: Option<String>,
}

pub struct SnippetStore {
    snippets: SharedSlice<Snippet>,
    storage: Arc<dyn ConfigStorage>,
    assembler: Arc<ConfigAssembler>,
    clipboard: Arc<dyn ClipboardGateway>,
    filter: Mutex<FilterState>,
}

impl SnippetStore {
    pub(crate) fn new(
        snippets: SharedSlice<Snippet>,
        storage: Arc<dyn ConfigStorage>,
        assembler: Arc<ConfigAssembler>,
        clipboard: Arc<dyn ClipboardGateway>,
    ) -> Self {
        SnippetStore {
            snippets,
            storage,
            assembler,
            clipboard,
            filter: Mutex::new(FilterState::default()),
        }
    }

    /// Replace the in-memory sequence wholesale with the persisted slice.
    /// A gateway failure resets to empty and is NOT propagated.
    #[instrument(name = "snippets_load", skip(self))]
    pub fn load(&self) {
        match self.storage.load() {
            Ok(config) => {
                let mut snippets = self.snippets.lock();
                *snippets = config.snippets;
                info!(count = snippets.len(), "Loaded snippets");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load config, starting with an empty snippet list");
                self.snippets.lock().clear();
            }
        }
    }

    /// Create a snippet from form data and persist. Returns the created
    /// record, appended at the end of the sequence.
    pub fn add(&self, form: SnippetForm) -> Result<Snippet> {
        let snippet = Snippet::from_form(form);
        self.snippets.lock().push(snippet.clone());
        self.assembler.persist()?;
        info!(id = %snippet.id, title = %snippet.title, "Added snippet");
        Ok(snippet)
    }

    /// Replace a snippet's mutable fields in place (position stable,
    /// usage count untouched) and persist.
    pub fn update(&self, id: &str, form: SnippetForm) -> Result<()> {
        {
            let mut snippets = self.snippets.lock();
            let snippet = snippets
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| Error::SnippetNotFound(id.to_string()))?;
            snippet.apply_form(form);
        }
        self.assembler.persist()?;
        info!(id, "Updated snippet");
        Ok(())
    }

    /// Remove a snippet and persist.
    pub fn remove(&self, id: &str) -> Result<()> {
        {
            let mut snippets = self.snippets.lock();
            let index = snippets
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| Error::SnippetNotFound(id.to_string()))?;
            snippets.remove(index);
        }
        self.assembler.persist()?;
        info!(id, "Removed snippet");
        Ok(())
    }

    /// Pure lookup by id. No side effects, never fails.
    pub fn get(&self, id: &str) -> Option<Snippet> {
        self.snippets.lock().iter().find(|s| s.id == id).cloned()
    }

    /// Snapshot of the full sequence in insertion order.
    pub fn all(&self) -> Vec<Snippet> {
        self.snippets.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.snippets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.lock().is_empty()
    }

    /// Update the free-text filter. Projections recompute on demand;
    /// setting filter state never persists anything.
    pub fn set_query(&self, query: impl Into<String>) {
        self.filter.lock().query = query.into();
    }

    /// Update the category filter (None clears it).
    pub fn set_category(&self, category: Option<String>) {
        self.filter.lock().category = category;
    }

    pub fn query(&self) -> String {
        self.filter.lock().query.clone()
    }

    pub fn selected_category(&self) -> Option<String> {
        self.filter.lock().category.clone()
    }

    /// The current filtered/ranked projection. Read-only, always computed
    /// from live state.
    pub fn filtered(&self) -> Vec<Snippet> {
        let filter = self.filter.lock().clone();
        let snippets = self.snippets.lock();
        search::filter_snippets(&snippets, filter.category.as_deref(), &filter.query)
    }

    /// All distinct non-empty categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        search::categories(&self.snippets.lock())
    }

    /// Copy a snippet's content to the clipboard, then count the use.
    /// The counter only moves after a successful clipboard write.
    pub fn copy_to_clipboard(&self, id: &str) -> Result<()> {
        let content = self
            .get(id)
            .ok_or_else(|| Error::SnippetNotFound(id.to_string()))?
            .content;
        self.clipboard.write_text(&content)?;
        debug!(id, "Copied snippet to clipboard");
        self.record_usage(id)
    }

    /// Increment a snippet's usage counter and persist. A vanished id is a
    /// no-op: the copy already happened, there is nothing left to count.
    pub fn record_usage(&self, id: &str) -> Result<()> {
        {
            let mut snippets = self.snippets.lock();
            match snippets.iter_mut().find(|s| s.id == id) {
                Some(snippet) => snippet.usage_count += 1,
                None => return Ok(()),
            }
        }
        self.assembler.persist()
    }
}
