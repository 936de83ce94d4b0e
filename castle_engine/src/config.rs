//! Engine configuration.
//!
//! Read from `castle.toml` in the data directory unless the binary is given another
//! path. A missing file is not an error; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::data_paths::data_path;
use crate::persistence::{FallbackPersistence, LocalSaves, MirrorDirStore, RemoteStore, SAVE_DIR};

pub const CONFIG_FILE: &str = "castle.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory for local saves.
    pub save_dir: PathBuf,
    /// Directory standing in for remote storage. Remote saves are off when unset.
    pub remote_dir: Option<PathBuf>,
    /// Seconds between running out of life points and the automatic restart.
    pub restart_delay_secs: u64,
    /// RON world definition to play instead of the built-in castle.
    pub world_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(SAVE_DIR),
            remote_dir: None,
            restart_delay_secs: 10,
            world_file: None,
        }
    }
}

impl EngineConfig {
    /// Load `castle.toml` from the data directory, or defaults if there is none.
    ///
    /// # Errors
    /// - if the file exists but cannot be read or parsed
    pub fn load_default() -> Result<Self> {
        Self::load_or_default(&data_path(CONFIG_FILE))
    }

    /// Load the configuration at `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    /// - if the file exists but cannot be read or parsed
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
        let config: EngineConfig =
            toml::from_str(&text).with_context(|| format!("parsing config from '{}'", path.display()))?;
        info!("loaded config from '{}'", path.display());
        Ok(config)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay_secs)
    }

    /// The persistence backend this configuration describes.
    pub fn persistence(&self) -> FallbackPersistence {
        let remote = self
            .remote_dir
            .as_ref()
            .map(|dir| Box::new(MirrorDirStore::new(dir)) as Box<dyn RemoteStore>);
        FallbackPersistence::new(LocalSaves::new(&self.save_dir), remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = EngineConfig::load_or_default(&dir.path().join("castle.toml")).expect("defaults");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.restart_delay(), Duration::from_secs(10));
    }

    #[test]
    fn partial_files_keep_the_other_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("castle.toml");
        fs::write(&path, "restart_delay_secs = 3\nremote_dir = \"/mnt/cloud\"\n").expect("write");
        let config = EngineConfig::load_or_default(&path).expect("config");
        assert_eq!(config.restart_delay_secs, 3);
        assert_eq!(config.remote_dir, Some(PathBuf::from("/mnt/cloud")));
        assert_eq!(config.save_dir, PathBuf::from(SAVE_DIR));
        assert_eq!(config.world_file, None);
    }

    #[test]
    fn malformed_files_are_errors() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("castle.toml");
        fs::write(&path, "restart_delay_secs = \"soon\"").expect("write");
        assert!(EngineConfig::load_or_default(&path).is_err());
    }
}
