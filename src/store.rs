//! Last selected mode
//!
//! Presentation state only: the engine never reads it. The CLI saves the mode
//! after each successful change and `restore` re-applies it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, encode_hex};
use crate::config::project_dirs;
use crate::mode::ModeId;

const STATE_FILE: &str = "state.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedMode {
    pub mode: ModeId,
    /// Hex color for static mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Rainbow tick, the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_ms: Option<u64>,
}

impl PersistedMode {
    pub fn static_color(color: Rgb) -> Self {
        Self {
            mode: ModeId::Static,
            color: Some(encode_hex(color).as_str().to_string()),
            tick_ms: None,
        }
    }

    pub fn rainbow(tick_ms: u64) -> Self {
        Self {
            mode: ModeId::Rainbow,
            color: None,
            tick_ms: Some(tick_ms),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error on '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("corrupt state file: {0}")]
    Format(#[from] serde_yaml::Error),
}

/// YAML file holding the last selected mode
#[derive(Debug, Clone)]
pub struct ModeStore {
    path: PathBuf,
}

impl ModeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory
    pub fn default_location() -> Option<Self> {
        project_dirs().map(|dirs| Self::new(dirs.data_dir().join(STATE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored mode, `None` if nothing was saved yet
    pub fn load(&self) -> Result<Option<PersistedMode>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_yaml::from_str(&contents)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }

    pub fn save(&self, mode: &PersistedMode) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let contents = serde_yaml::to_string(mode)?;
        fs::write(&self.path, contents).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModeStore::new(dir.path().join(STATE_FILE));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_creates_parent_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModeStore::new(dir.path().join("nested").join(STATE_FILE));

        store.save(&PersistedMode::static_color(Rgb::new(255, 127, 0))).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.mode, ModeId::Static);
        assert_eq!(loaded.color.as_deref(), Some("ff7f00"));

        store.save(&PersistedMode::rainbow(10)).unwrap();
        assert_eq!(store.load().unwrap(), Some(PersistedMode::rainbow(10)));
    }

    #[test]
    fn reads_hand_written_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        fs::write(&path, "mode: rainbow\n").unwrap();

        let loaded = ModeStore::new(path).load().unwrap().unwrap();
        assert_eq!(loaded.mode, ModeId::Rainbow);
        assert_eq!(loaded.tick_ms, None);
    }

    #[test]
    fn corrupt_state_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STATE_FILE);
        fs::write(&path, "mode: disco\n").unwrap();

        assert!(matches!(
            ModeStore::new(path).load(),
            Err(StoreError::Format(_))
        ));
    }
}
