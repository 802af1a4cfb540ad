//! Configuration module - blob types, defaults, and the persistence gateway
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Wire types (AppConfig, Theme, TerminalType)
//! - `storage` - The ConfigStorage trait and the JSON file implementation

mod defaults;
mod storage;
mod types;

pub use defaults::{CONFIG_VERSION, DEFAULT_THEME_PATH};
pub use storage::{ConfigStorage, JsonFileStorage};
pub use types::{AppConfig, TerminalType, Theme};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
