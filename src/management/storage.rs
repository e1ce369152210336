use std::{
    fmt,
    fs,
    io::{Error, ErrorKind},
    path::PathBuf,
};

use crate::config;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const LIKED_ITEMS_KEY: &str = "likedItems";
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug)]
pub enum StorageError {
    IoError(Error),
    InvalidKey(String),
    SerdeError(serde_json::Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::IoError(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerdeError(err)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "storage i/o failed: {}", e),
            StorageError::InvalidKey(key) => write!(f, "invalid storage key '{}'", key),
            StorageError::SerdeError(e) => write!(f, "storage encoding failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Durable string key/value storage.
///
/// All operations are synchronous: callers rely on a completed `set_item`
/// meaning the value is durable, with no suspension point in between.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage backed by one file per key below a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data_local_dir>/musecli/storage`
    pub fn open_default() -> Self {
        Self::new(config::data_dir().join("storage"))
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.item_path(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.dir)?;

        // write next to the target and rename, so readers never see half a value
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StorageError::IoError(e)
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.item_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }
}
