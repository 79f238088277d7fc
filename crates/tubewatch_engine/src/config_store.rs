use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tubewatch_core::ChannelConfig;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config file {0:?} does not exist")]
    Missing(PathBuf),
    #[error("failed to read config file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config file {path:?}: {source}")]
    Write { path: PathBuf, source: PersistError },
}

/// The persisted array of channel entries.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates every entry. Rule patterns are compiled here, so
    /// a bad pattern fails the load rather than a later run.
    pub fn load(&self) -> Result<Vec<ChannelConfig>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                StoreError::Missing(self.path.clone())
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                }
            }
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the full sequence back, replacing the file atomically.
    pub fn save(&self, configs: &[ChannelConfig]) -> Result<(), StoreError> {
        let mut content = serde_json::to_string_pretty(configs)?;
        content.push('\n');

        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::Write {
                path: self.path.clone(),
                source: PersistError::TargetDir("config path has no file name".into()),
            })?;
        AtomicFileWriter::for_target(&self.path)
            .write(filename, &content)
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}
