//! Snippet entity types

use serde::{Deserialize, Serialize};

use crate::clock;

pub(crate) const SNIPPET_ID_PREFIX: &str = "snippet";

/// A reusable text block with a usage counter.
///
/// `usage_count` only ever moves up while the record exists: it increments
/// exactly once per successful copy and is never touched by edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub usage_count: u32,
}

/// Caller-provided fields for creating or editing a snippet.
#[derive(Debug, Clone, Default)]
pub struct SnippetForm {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Snippet {
    /// Build a fresh snippet from form data with a newly minted id, zero
    /// usage, and `createdAt == updatedAt == now`.
    pub(crate) fn from_form(form: SnippetForm) -> Self {
        let now = clock::now_millis();
        Snippet {
            id: clock::generate_id(SNIPPET_ID_PREFIX),
            title: form.title,
            content: form.content,
            category: form.category,
            description: form.description,
            created_at: now,
            updated_at: now,
            usage_count: 0,
        }
    }

    /// Replace all mutable fields from form data. The id, `createdAt`, and
    /// `usageCount` are untouched; `updatedAt` is stamped.
    pub(crate) fn apply_form(&mut self, form: SnippetForm) {
        self.title = form.title;
        self.content = form.content;
        self.category = form.category;
        self.description = form.description;
        self.updated_at = clock::now_millis();
    }
}
