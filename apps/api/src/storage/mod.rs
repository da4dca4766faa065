//! Flat-file JSON storage: each store is one JSON object on disk.
//!
//! Reads are forgiving: a missing or corrupt file loads as an empty map.
//! Writes go to a temp file in the same directory and are then renamed over
//! the target, so a crash mid-write never leaves a truncated file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Background write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A JSON object file mapping string keys to `T`.
pub struct JsonFileStore<T> {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file as `{}` if it does not exist yet.
    pub async fn init(&self) -> Result<(), StorageError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        self.save(&BTreeMap::new()).await?;
        info!("Initialized data file {}", self.path.display());
        Ok(())
    }

    /// Loads the whole map. Missing or unparsable files yield an empty map.
    pub async fn load(&self) -> BTreeMap<String, T> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {e}", self.path.display());
                }
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unparsable data file {}: {e}", self.path.display());
            BTreeMap::new()
        })
    }

    /// Writes the whole map atomically as pretty-printed JSON.
    pub async fn save(&self, map: &BTreeMap<String, T>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(map)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes)).await??;
        Ok(())
    }

    /// Read-modify-write under the store lock. When `f` fails nothing is written.
    pub async fn update<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut BTreeMap<String, T>) -> Result<R, E> + Send,
        E: From<StorageError>,
    {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await;
        let out = f(&mut map)?;
        self.save(&map).await?;
        Ok(out)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
