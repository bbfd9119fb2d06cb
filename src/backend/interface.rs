use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("storage i/o failed on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Durable key-value slots, each holding one whole serialized value.
pub trait Storage {
    /// Contents of the slot, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replaces the slot's contents entirely.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keys double as file names, so only a conservative alphabet is allowed.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty() && key.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(BackendError::InvalidKey(key.to_owned()));
    }
    return Ok(());
}
