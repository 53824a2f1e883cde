//! Persisted key/value storage behind the session context. The four session
//! fields (token, name, email, role) are written as one record and removed
//! together, so a partially written session can never be observed.

use crate::{app_lib::AppError, features::auth::types::StoredSession};
use std::{
    fs,
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::debug;

/// Backing store for the session record.
pub trait SessionStorage: Send + Sync {
    /// # Errors
    /// Returns `AppError::Storage` when the record exists but cannot be read.
    fn load(&self) -> Result<Option<StoredSession>, AppError>;

    /// # Errors
    /// Returns `AppError::Storage` when the record cannot be written.
    fn save(&self, session: &StoredSession) -> Result<(), AppError>;

    /// # Errors
    /// Returns `AppError::Storage` when the record cannot be removed.
    fn clear(&self) -> Result<(), AppError>;
}

/// JSON file storage, written through a temporary file and a rename.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Creates `path` readable by the owner only before any byte is written.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::Storage(format!("Failed to {action} {}: {err}", path.display()))
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<StoredSession>, AppError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error("read", &self.path, err)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| storage_error("parse", &self.path, err))
    }

    fn save(&self, session: &StoredSession) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| storage_error("create", parent, err))?;
        }

        let contents = serde_json::to_string_pretty(session)
            .map_err(|err| storage_error("encode", &self.path, err))?;
        let temp = self.temp_path();
        match fs::remove_file(&temp) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(storage_error("remove", &temp, err)),
        }

        let written = write_private(&temp, contents.as_bytes())
            .map_err(|err| storage_error("write", &temp, err))
            .and_then(|()| {
                fs::rename(&temp, &self.path)
                    .map_err(|err| storage_error("replace", &self.path, err))
            });
        if let Err(err) = written {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error("remove", &self.path, err)),
        }
    }
}

/// In-memory storage. Clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<StoredSession>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(session))),
        }
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Storage("session storage lock poisoned".to_string())
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<StoredSession>, AppError> {
        Ok(self.record.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), AppError> {
        *self.record.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.record.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::types::Role;
    use anyhow::Result;

    fn session() -> StoredSession {
        StoredSession {
            token: "jwt".to_string(),
            name: "Ana".to_string(),
            email: "ana@shop.example".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn file_storage_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested").join("session.json"));

        assert_eq!(storage.load()?, None);
        storage.save(&session())?;
        assert_eq!(storage.load()?, Some(session()));
        assert!(!storage.temp_path().exists());

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(storage.path())?)?;
        for key in ["token", "name", "email", "role"] {
            assert!(raw.get(key).is_some(), "missing {key}");
        }

        storage.clear()?;
        assert!(!storage.path().exists());
        assert_eq!(storage.load()?, None);
        // Clearing twice is fine.
        storage.clear()?;
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_is_private() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("session.json"));
        storage.save(&session())?;
        let mode = fs::metadata(storage.path())?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_replaces_stale_temp_file() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("session.json"));
        fs::write(storage.temp_path(), "leftover")?;
        fs::set_permissions(storage.temp_path(), fs::Permissions::from_mode(0o644))?;

        storage.save(&session())?;
        assert!(!storage.temp_path().exists());
        assert_eq!(storage.load()?, Some(session()));
        let mode = fs::metadata(storage.path())?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }

    #[test]
    fn failed_replace_removes_temp_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("session.json");
        fs::create_dir(&target)?;
        fs::write(target.join("keep"), "occupied")?;
        let storage = FileStorage::new(&target);

        assert!(matches!(storage.save(&session()), Err(AppError::Storage(_))));
        assert!(!storage.temp_path().exists());
        Ok(())
    }

    #[test]
    fn file_storage_rejects_corrupt_record() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json")?;
        let storage = FileStorage::new(&path);
        assert!(matches!(storage.load(), Err(AppError::Storage(_))));
        Ok(())
    }

    #[test]
    fn memory_storage_clones_share_state() -> Result<()> {
        let storage = MemoryStorage::default();
        let observer = storage.clone();
        storage.save(&session())?;
        assert_eq!(observer.load()?, Some(session()));
        storage.clear()?;
        assert_eq!(observer.load()?, None);
        Ok(())
    }
}
