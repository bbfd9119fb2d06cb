use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::backend::interface::{Storage, Result, BackendError, check_key};

/// File backed storage: slot `key` lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf
}

impl JsonStore {
    pub fn new(dir: impl AsRef<Path>) -> JsonStore {
        JsonStore { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        return Ok(self.dir.join(format!("{}.json", key)));
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BackendError + '_ {
    move |source| BackendError::Io { path: path.to_path_buf(), source }
}

impl Storage for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err))
        }
    }

    /// Writes to a sibling temporary file first and renames it over the
    /// slot, so readers see either the old or the new contents.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).map_err(io_error(&staging))?;
        fs::rename(&staging, &path).map_err(io_error(&path))?;
        debug!("wrote {} bytes to {}", value.len(), path.display());
        return Ok(());
    }
}
