//! Session storage persisted as a JSON object in one file.
//!
//! The file maps keys to string values, mirroring browser local storage.
//! Access is scoped to the file's parent directory through a `cap_std::Dir`.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{SessionStorage, SessionStorageError};

/// File-backed [`SessionStorage`].
#[derive(Debug)]
pub struct FileSessionStorage {
    dir: Dir,
    file_name: Utf8PathBuf,
    display_path: Utf8PathBuf,
    // Serialises read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Open storage at `path`, creating its parent directory when missing.
    ///
    /// The file itself is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Io`] when `path` has no file name or
    /// the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SessionStorageError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| SessionStorageError::io(format!("session path {path} has no file name")))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|err| SessionStorageError::io(format!("creating {parent}: {err}")))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| SessionStorageError::io(format!("opening {parent}: {err}")))?;

        Ok(Self {
            dir,
            file_name: Utf8PathBuf::from(file_name),
            display_path: path.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Path the storage was opened with.
    pub fn path(&self) -> &Utf8Path {
        &self.display_path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, SessionStorageError> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                SessionStorageError::corrupt(format!("{}: {err}", self.display_path))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(SessionStorageError::io(format!(
                "reading {}: {err}",
                self.display_path
            ))),
        }
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), SessionStorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_map()?;
        if !apply(&mut values) {
            return Ok(());
        }
        let contents = serde_json::to_string_pretty(&values)
            .map_err(|err| SessionStorageError::corrupt(err.to_string()))?;
        write_atomic(&self.dir, &self.file_name, &contents)?;
        debug!(path = %self.display_path, keys = values.len(), "session file written");
        Ok(())
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.update(|values| {
            values.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.update(|values| values.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn temp() -> tempfile::TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn session_path(temp: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().join(name)).expect("temp path is UTF-8")
    }

    #[rstest]
    fn missing_file_reads_as_empty(temp: tempfile::TempDir) {
        let storage = FileSessionStorage::open(&session_path(&temp, "session.json"))
            .expect("open storage");
        assert_eq!(storage.get("accessToken"), Ok(None));
    }

    #[rstest]
    fn values_survive_reopening(temp: tempfile::TempDir) {
        let path = session_path(&temp, "nested/session.json");
        let storage = FileSessionStorage::open(&path).expect("open storage");
        storage.set("accessToken", "a").expect("set access");
        storage.set("refreshToken", "r").expect("set refresh");
        storage.remove("accessToken").expect("remove access");

        let reopened = FileSessionStorage::open(&path).expect("reopen storage");
        assert_eq!(reopened.get("accessToken"), Ok(None));
        assert_eq!(reopened.get("refreshToken"), Ok(Some("r".to_owned())));
    }

    #[rstest]
    fn corrupt_file_is_reported(temp: tempfile::TempDir) {
        let path = session_path(&temp, "session.json");
        std::fs::write(&path, "not json").expect("seed corrupt file");
        let storage = FileSessionStorage::open(&path).expect("open storage");

        assert!(matches!(
            storage.get("user"),
            Err(SessionStorageError::Corrupt { .. })
        ));
    }
}
