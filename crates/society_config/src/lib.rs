//! Parsing and validation of `society.toml` configuration files.
//!
//! Every section is optional. A missing file yields [`SocietyConfig::default`],
//! and command-line flags override whatever the file sets.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
