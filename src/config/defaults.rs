//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Version tag written into every persisted config blob
pub const CONFIG_VERSION: &str = "1.0.0";

/// Default location of the persisted config blob
pub const DEFAULT_CONFIG_PATH: &str = "~/.scriptdeck/config.json";

/// Default location of the theme side-channel file
pub const DEFAULT_THEME_PATH: &str = "~/.scriptdeck/theme";
