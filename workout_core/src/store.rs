//! Key-value persistence for whole-collection JSON documents.
//!
//! Each collection (exercises, plans, stats, session) is stored as one JSON
//! blob under a fixed key. There is no schema migration: a blob that no
//! longer parses is logged and treated as absent, so defaults take over.

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const EXERCISES_KEY: &str = "brutal-workout-exercises";
pub const PLANS_KEY: &str = "brutal-workout-plans";
pub const STATS_KEY: &str = "brutal-workout-stats";
pub const SESSION_KEY: &str = "brutal-workout-session";

/// Storage backend for raw JSON documents
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Load and decode a document.
///
/// Returns `None` when the key is missing or the stored JSON is unreadable.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        tracing::debug!("No document stored under {}", key);
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!("Failed to parse document {}: {}. Using defaults.", key, e);
            Ok(None)
        }
    }
}

/// Encode and store a document under `key`
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let contents = serde_json::to_string(value)?;
    store.set(key, &contents)
}

// ============================================================================
// In-memory backend
// ============================================================================

/// HashMap-backed store used by tests and embedders that manage their own
/// durability
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// File backend
// ============================================================================

/// One `<key>.json` file per key inside a data directory.
///
/// Reads hold a shared lock; writes go through a locked temp file in the same
/// directory that is synced and then renamed over the target.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open {:?}: {}. Treating as empty.", path, e);
                return Ok(None);
            }
        };

        file.lock_shared()?;

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        let _ = file.unlock();

        match read {
            Ok(_) => {
                tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
                Ok(Some(contents))
            }
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}. Treating as empty.", path, e);
                Ok(None)
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} to {:?}", key, path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorkoutStats;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        let stats = WorkoutStats {
            total_workouts: 3,
            streak: 2,
            ..WorkoutStats::default()
        };
        save_json(&mut store, STATS_KEY, &stats).unwrap();

        let loaded: WorkoutStats = load_json(&store, STATS_KEY).unwrap().unwrap();
        assert_eq!(loaded, stats);
        assert_eq!(store.dir(), temp_dir.path());
        assert_eq!(
            store.path_for(STATS_KEY),
            temp_dir.path().join("brutal-workout-stats.json")
        );
        assert!(store.path_for(STATS_KEY).exists());
    }

    #[test]
    fn test_missing_key_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("never-created"));

        let loaded: Option<WorkoutStats> = load_json(&store, STATS_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupted_document_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        std::fs::write(store.path_for(PLANS_KEY), "{ invalid json }").unwrap();

        let loaded: Option<Vec<crate::WorkoutPlan>> = load_json(&store, PLANS_KEY).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set(EXERCISES_KEY, "[]").unwrap();
        store.set(EXERCISES_KEY, "[ ]").unwrap();

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![format!("{}.json", EXERCISES_KEY)]);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.remove(SESSION_KEY).unwrap();
        store.set(SESSION_KEY, "{}").unwrap();
        store.remove(SESSION_KEY).unwrap();
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
    }
}
