use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot storage is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A single persisted key holding the latest serialized snapshot.
pub trait SnapshotSlot: Send + Sync {
    fn read(&self) -> Result<Option<String>, PersistenceError>;
    fn write(&self, snapshot: &str) -> Result<(), PersistenceError>;
}

pub struct FileSnapshotSlot {
    path: PathBuf,
}

impl FileSnapshotSlot {
    pub fn new(data_dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSlot for FileSnapshotSlot {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Readers only ever see a complete snapshot.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, snapshot)?;
        fs::rename(&temp_path, &self.path)?;

        log::debug!("Wrote snapshot to {}", self.path.display());
        Ok(())
    }
}

#[derive(Default)]
struct InMemorySlotState {
    value: Option<String>,
    unavailable: bool,
}

/// Process-local slot. Clones share the same value.
#[derive(Clone, Default)]
pub struct InMemorySnapshotSlot {
    state: Arc<Mutex<InMemorySlotState>>,
}

impl InMemorySnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(snapshot: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.lock().value = Some(snapshot.into());
        slot
    }

    /// Makes every subsequent read and write fail, as a disabled or full storage would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn value(&self) -> Option<String> {
        self.lock().value.clone()
    }

    fn lock(&self) -> MutexGuard<'_, InMemorySlotState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotSlot for InMemorySnapshotSlot {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        let state = self.lock();
        if state.unavailable {
            return Err(PersistenceError::Unavailable("storage is disabled".to_string()));
        }
        Ok(state.value.clone())
    }

    fn write(&self, snapshot: &str) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        if state.unavailable {
            return Err(PersistenceError::Unavailable("quota exceeded".to_string()));
        }
        state.value = Some(snapshot.to_owned());
        Ok(())
    }
}
