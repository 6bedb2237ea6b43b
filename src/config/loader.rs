//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::GatesDiffError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::Result;
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .gates-diff.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gates_diff::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Configured report: {:?}", config.report);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(GatesDiffError::Io {
                    context: format!("reading {}", config_path.display()),
                    source: e,
                }
                .into());
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).map_err(|e| GatesDiffError::InvalidConfig {
                path: config_path.clone(),
                message: e.to_string(),
            })?;

        config
            .validate()
            .map_err(|message| GatesDiffError::InvalidConfig {
                path: config_path.clone(),
                message,
            })?;

        log::debug!("Loaded {}", config_path.display());
        Ok(config)
    }
}
