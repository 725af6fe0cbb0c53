//! Dataset persistence
//!
//! The last imported CSV text is kept verbatim so it can be re-parsed on the
//! next start. The core parser never touches a store; callers inject one.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::{Error, Result};

/// File name of the persisted dataset under the root folder
pub const DATASET_FILE_NAME: &str = "initiatives.csv";

/// Persistence for the current dataset's raw CSV text
pub trait DatasetStore: Send + Sync {
    /// Saved text, or `None` when nothing (or only whitespace) is stored
    fn load(&self) -> Result<Option<String>>;

    /// Replace the saved text
    fn save(&self, csv_text: &str) -> Result<()>;

    /// Forget the saved text; clearing an empty store is not an error
    fn clear(&self) -> Result<()>;
}

/// Single file on disk, replaced atomically on save
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<root_folder>/initiatives.csv`
    pub fn in_root_folder(root_folder: &Path) -> Self {
        Self::new(root_folder.join(DATASET_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DATASET_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DatasetStore for FileStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(None),
            Ok(text) => {
                debug!("Loaded {} bytes from {}", text.len(), self.path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn save(&self, csv_text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling temp file, then rename over the target
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, csv_text)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::Io(e));
        }

        info!("Saved dataset ({} bytes) to {}", csv_text.len(), self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared dataset at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// In-process store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    text: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(csv_text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(csv_text.into())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A panicked writer leaves a whole value behind; keep using it
        self.text.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock().clone().filter(|t| !t.trim().is_empty()))
    }

    fn save(&self, csv_text: &str) -> Result<()> {
        *self.lock() = Some(csv_text.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock() = None;
        Ok(())
    }
}
