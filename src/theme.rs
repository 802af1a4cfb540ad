//! Theme preference controller
//!
//! The live theme is deliberately decoupled from the config blob's `theme`
//! field: it has its own single-value storage channel and a display hook.
//! Both side effects fire on every change (there is no way to change the
//! value without writing the channel and reapplying the display), and the
//! initial value is applied eagerly at construction whether or not it
//! differs from the default.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::config::{Theme, DEFAULT_THEME_PATH};
use crate::error::ResultExt;

/// Single-value side-channel store for the theme preference, keyed by one
/// fixed name. Synchronous and effectively infallible: write failures are
/// the implementation's problem to log, not the caller's to handle.
pub trait ThemeChannel: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, value: &str);
}

/// Applies the chosen theme to a display surface. Synchronous, idempotent.
pub trait DisplayHook: Send + Sync {
    fn apply(&self, theme: Theme);
}

pub struct ThemeController {
    theme: Mutex<Theme>,
    channel: Arc<dyn ThemeChannel>,
    display: Arc<dyn DisplayHook>,
}

impl ThemeController {
    /// Read the initial value from the side-channel (absent or malformed
    /// falls back to dark) and eagerly apply it to the display once.
    pub fn new(channel: Arc<dyn ThemeChannel>, display: Arc<dyn DisplayHook>) -> Self {
        let initial = channel
            .get()
            .and_then(|v| Theme::parse(&v))
            .unwrap_or(Theme::Dark);
        display.apply(initial);
        info!(theme = initial.as_str(), "Theme controller initialized");
        ThemeController {
            theme: Mutex::new(initial),
            channel,
            display,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.lock()
    }

    /// Change the theme. Writes the side-channel and reapplies the display,
    /// once per actual change; setting the current value again is a no-op.
    pub fn set_theme(&self, theme: Theme) {
        {
            let mut current = self.theme.lock();
            if *current == theme {
                return;
            }
            *current = theme;
        }
        self.channel.set(theme.as_str());
        self.display.apply(theme);
    }

    /// Flip between light and dark; returns the new value.
    pub fn toggle(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }
}

/// File-backed side-channel: one value in one file.
pub struct FileThemeChannel {
    path: PathBuf,
}

impl FileThemeChannel {
    /// Channel at the default location (~/.scriptdeck/theme).
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(shellexpand::tilde(DEFAULT_THEME_PATH).as_ref()))
    }

    pub fn with_path(path: PathBuf) -> Self {
        FileThemeChannel { path }
    }
}

impl Default for FileThemeChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeChannel for FileThemeChannel {
    fn get(&self) -> Option<String> {
        std::fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn set(&self, value: &str) {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).warn_on_err();
        }
        std::fs::write(&self.path, value).warn_on_err();
    }
}

/// Default display hook: records the applied theme in the log. Presentation
/// layers supply their own hook to restyle an actual surface.
#[derive(Debug, Default)]
pub struct LogDisplayHook;

impl DisplayHook for LogDisplayHook {
    fn apply(&self, theme: Theme) {
        info!(theme = theme.as_str(), "Applied theme");
    }
}
