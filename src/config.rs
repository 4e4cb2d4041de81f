/// Runtime configuration: which backend to use and where it lives

use std::path::{Path, PathBuf};

use crate::storage::{open_store, BoxedStore, StorageError, StoreKind};

/// Where habits are kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub store: StoreKind,
    pub dir: PathBuf,
}

impl TrackerConfig {
    pub fn new(store: StoreKind, dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            dir: dir.into(),
        }
    }

    /// Full path of the backing file, if the backend has one
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store.file_name().map(|name| self.dir.join(name))
    }

    /// Create the store directory if needed and open the backend
    pub fn open_store(&self) -> Result<BoxedStore, StorageError> {
        if self.store != StoreKind::Memory && !self.dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.dir)?;
        }
        open_store(self.store, &self.dir)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(StoreKind::Db, default_store_dir())
    }
}

/// Get the default store directory with a fallback strategy
///
/// The home directory is preferred. If it is missing or not writable, the
/// current directory and then the system temp directory are tried.
pub fn default_store_dir() -> PathBuf {
    let candidates = [dirs::home_dir(), std::env::current_dir().ok()];

    for candidate in candidates.iter().flatten() {
        if is_writable(candidate) {
            return candidate.clone();
        }
    }

    let temp_dir = std::env::temp_dir();
    tracing::warn!("Using temporary directory for habits: {}", temp_dir.display());
    temp_dir
}

/// Check that a file can be created in `dir`
fn is_writable(dir: &Path) -> bool {
    let probe = dir.join(".habitTracker.probe");
    match std::fs::write(&probe, "test") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
