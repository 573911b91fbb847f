//! Durable record of the last applied seed version.
//!
//! Kept outside the database so the applied version survives a reset of the
//! reference tables, and so the migrator can be driven with an explicit value
//! in tests.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::Result;

/// Key → integer store holding the applied seed version.
pub trait SeedVersionStore: Send + Sync {
    /// Last persisted version, or 0 when nothing was ever applied.
    fn load(&self) -> Result<u32>;

    fn store(&self, version: u32) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SeedState {
    seed_version: u32,
}

/// JSON file store, written atomically via a temp file and rename.
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    path: PathBuf,
}

impl FileVersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeedVersionStore for FileVersionStore {
    fn load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let state: SeedState = serde_json::from_str(&contents)?;
        Ok(state.seed_version)
    }

    fn store(&self, version: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&SeedState { seed_version: version })?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        tracing::debug!(path = %self.path.display(), version, "seed state persisted");
        Ok(())
    }
}

/// In-process store for tests and ephemeral databases.
#[derive(Debug, Default)]
pub struct MemoryVersionStore {
    version: AtomicU32,
}

impl MemoryVersionStore {
    pub fn new(version: u32) -> Self {
        Self { version: AtomicU32::new(version) }
    }

    pub fn get(&self) -> u32 {
        self.version.load(Ordering::SeqCst)
    }
}

impl SeedVersionStore for MemoryVersionStore {
    fn load(&self) -> Result<u32> {
        Ok(self.get())
    }

    fn store(&self, version: u32) -> Result<()> {
        self.version.store(version, Ordering::SeqCst);
        Ok(())
    }
}
