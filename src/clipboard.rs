//! Clipboard gateway

use tracing::debug;

use crate::error::{Error, Result};

/// Opaque boundary for writing text to the system clipboard.
pub trait ClipboardGateway: Send + Sync {
    fn write_text(&self, content: &str) -> Result<()>;
}

/// System clipboard via arboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardGateway for SystemClipboard {
    fn write_text(&self, content: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(content.to_string())
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        debug!(bytes = content.len(), "Wrote text to clipboard");
        Ok(())
    }
}
