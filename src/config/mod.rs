//! Configuration for gates-diff
//!
//! - `.gates-diff.toml` file support
//! - CI environment lookup
//! - Resolution of every source into one [`DiffConfig`]

pub mod file;
pub mod loader;
pub mod settings;

pub use file::{ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use settings::{CiEnvironment, DiffConfig, DiffOverrides, DEFAULT_HEADER, DEFAULT_REPORT};
