use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::store::TaskStore;
use crate::parse::{FormatError, parse_store, serialize_store};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("refusing to overwrite {path}: it could not be read at startup")]
    Unloaded { path: PathBuf },
}

/// Where the task store lives between runs.
///
/// `load` returns `Ok(None)` on first run, when nothing has been saved yet.
/// `save` always receives the full current store.
pub trait PersistencePort {
    fn load(&mut self) -> Result<Option<TaskStore>, StorageError>;
    fn save(&mut self, store: &TaskStore) -> Result<(), StorageError>;
}

impl<P: PersistencePort + ?Sized> PersistencePort for Box<P> {
    fn load(&mut self) -> Result<Option<TaskStore>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, store: &TaskStore) -> Result<(), StorageError> {
        (**self).save(store)
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// A task store persisted as one JSON file.
///
/// When the file exists but cannot be read, every later `save` is refused
/// so the unread contents are never replaced.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    read_failed: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            read_failed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the task file (and its backup and recovery log)
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Path the unparseable task file is copied to before it gets replaced
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Copy unparseable bytes aside and return where they went.
    ///
    /// The first copy goes to [`backup_path`](Self::backup_path). Later,
    /// different contents get a timestamped name so no backup is overwritten.
    /// Bytes already held by an existing backup are not copied again.
    fn back_up(&self, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let bak = self.backup_path();
        if !bak.exists() {
            fs::write(&bak, bytes)?;
            return Ok(bak);
        }
        for existing in self.existing_backups()? {
            if fs::read(&existing).is_ok_and(|b| b == bytes) {
                return Ok(existing);
            }
        }
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let stamped = self.path.with_extension(format!("json.bak.{}", stamp));
        fs::write(&stamped, bytes)?;
        Ok(stamped)
    }

    /// The plain backup and any timestamped ones, oldest name first
    fn existing_backups(&self) -> std::io::Result<Vec<PathBuf>> {
        let bak = self.backup_path();
        let Some(prefix) = bak.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Ok(Vec::new());
        };
        let mut found: Vec<PathBuf> = fs::read_dir(self.dir())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with(&prefix))
            })
            .collect();
        found.sort();
        Ok(found)
    }

    fn log_unsaved(&self, content: &[u8], error: &str) {
        recovery::log_recovery(
            self.dir(),
            RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Write,
                description: "task file write failed".to_string(),
                fields: vec![
                    ("Target".to_string(), self.path.display().to_string()),
                    ("Error".to_string(), error.to_string()),
                ],
                body: String::from_utf8_lossy(content).into_owned(),
            },
        );
    }
}

impl PersistencePort for JsonFileStore {
    fn load(&mut self) -> Result<Option<TaskStore>, StorageError> {
        if !self.path.exists() {
            log::info!("no task file at {}, starting empty", self.path.display());
            return Ok(None);
        }
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.read_failed = true;
                return Err(StorageError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        self.read_failed = false;

        match parse_store(&bytes) {
            Ok(store) => {
                log::info!(
                    "loaded {} task(s) on {} day(s) from {}",
                    store.task_count(),
                    store.len(),
                    self.path.display()
                );
                Ok(Some(store))
            }
            Err(e) => {
                // Corrupted: keep a copy so the next save cannot destroy it
                match self.back_up(&bytes) {
                    Ok(bak) => log::warn!(
                        "could not parse {} (backed up as {}): {}",
                        self.path.display(),
                        bak.display(),
                        e
                    ),
                    Err(copy_err) => {
                        log::error!("could not back up {}: {}", self.path.display(), copy_err);
                        recovery::log_recovery(
                            self.dir(),
                            RecoveryEntry {
                                timestamp: chrono::Utc::now(),
                                category: RecoveryCategory::Parser,
                                description: "unreadable task file".to_string(),
                                fields: vec![
                                    ("Source".to_string(), self.path.display().to_string()),
                                    ("Error".to_string(), e.to_string()),
                                ],
                                body: String::from_utf8_lossy(&bytes).into_owned(),
                            },
                        );
                    }
                }
                Err(StorageError::Format(e))
            }
        }
    }

    fn save(&mut self, store: &TaskStore) -> Result<(), StorageError> {
        let content = serialize_store(store)?;
        if self.read_failed {
            self.log_unsaved(&content, "task file was not readable at load");
            return Err(StorageError::Unloaded {
                path: self.path.clone(),
            });
        }
        let result = fs::create_dir_all(self.dir())
            .and_then(|_| recovery::atomic_write(&self.path, &content));

        if let Err(e) = result {
            self.log_unsaved(&content, &e.to_string());
            return Err(StorageError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }
        log::debug!("saved {} task(s) to {}", store.task_count(), self.path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Keeps the serialized store in memory. Goes through the same codec as the
/// file store, so a round trip here behaves like one on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    payload: Option<Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing raw payload (which may be malformed)
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        MemoryStore {
            payload: Some(payload.into()),
            saves: 0,
        }
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Number of successful saves so far
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PersistencePort for MemoryStore {
    fn load(&mut self) -> Result<Option<TaskStore>, StorageError> {
        match &self.payload {
            None => Ok(None),
            Some(bytes) => Ok(Some(parse_store(bytes)?)),
        }
    }

    fn save(&mut self, store: &TaskStore) -> Result<(), StorageError> {
        self.payload = Some(serialize_store(store)?);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date_key::DateKey;
    use crate::ops::task_ops::add_task;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_store() -> TaskStore {
        let date: DateKey = "2024-03-01".parse().unwrap();
        let store = add_task(&TaskStore::new(), &date, "Buy milk", "");
        add_task(&store, &date, "Call mum", "evening")
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let tmp = TempDir::new().unwrap();
        let mut port = JsonFileStore::new(tmp.path().join("tasks.json"));
        assert!(port.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut port = JsonFileStore::new(tmp.path().join("nested/dir/tasks.json"));
        let store = sample_store();
        port.save(&store).unwrap();

        let mut reopened = JsonFileStore::new(tmp.path().join("nested/dir/tasks.json"));
        assert_eq!(reopened.load().unwrap(), Some(store));
    }

    #[test]
    fn test_malformed_file_is_backed_up() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        fs::write(&path, "not json {{{").unwrap();

        let mut port = JsonFileStore::new(&path);
        assert!(matches!(port.load(), Err(StorageError::Format(_))));
        assert_eq!(
            fs::read_to_string(port.backup_path()).unwrap(),
            "not json {{{"
        );
    }

    #[test]
    fn test_second_corruption_keeps_first_backup() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut port = JsonFileStore::new(&path);

        fs::write(&path, "first {{{").unwrap();
        assert!(port.load().is_err());
        fs::write(&path, "second {{{").unwrap();
        assert!(port.load().is_err());
        // Same bytes again: no extra copy
        assert!(port.load().is_err());

        assert_eq!(fs::read_to_string(port.backup_path()).unwrap(), "first {{{");
        let backups = port.existing_backups().unwrap();
        assert_eq!(backups.len(), 2);
        let contents: Vec<String> = backups
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        assert!(contents.contains(&"second {{{".to_string()));
    }

    #[test]
    fn test_unreadable_file_is_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        // A directory at the task path exists but cannot be read as a file
        let path = tmp.path().join("tasks.json");
        fs::create_dir_all(path.join("precious")).unwrap();

        let mut port = JsonFileStore::new(&path);
        assert!(matches!(port.load(), Err(StorageError::ReadError { .. })));
        let err = port.save(&sample_store()).unwrap_err();
        assert!(matches!(err, StorageError::Unloaded { .. }));
        assert!(path.join("precious").is_dir());
        assert!(!port.backup_path().exists());

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("not readable at load"));
        assert!(log.contains("\"Call mum\""));
    }

    #[test]
    fn test_failed_write_goes_to_recovery_log() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = tmp.path().join("tasks.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let mut port = JsonFileStore::new(&path);
        let err = port.save(&sample_store()).unwrap_err();
        assert!(matches!(err, StorageError::WriteError { .. }));

        let log = fs::read_to_string(recovery::recovery_log_path(tmp.path())).unwrap();
        assert!(log.contains("write: task file write failed"));
        assert!(log.contains("\"Call mum\""));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut port = MemoryStore::new();
        assert!(port.load().unwrap().is_none());
        port.save(&sample_store()).unwrap();
        port.save(&TaskStore::new()).unwrap();
        assert_eq!(port.saves(), 2);
        assert_eq!(port.load().unwrap(), Some(TaskStore::new()));
    }

    #[test]
    fn test_memory_store_with_bad_payload() {
        let mut port = MemoryStore::with_payload("[1, 2]");
        assert!(matches!(port.load(), Err(StorageError::Format(_))));
    }
}
