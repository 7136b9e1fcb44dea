//! Durable key-value storage.
//!
//! A passive mirror of the session: the cart under [`CART_KEY`] and the token
//! under [`TOKEN_KEY`]. Values are opaque strings; the cart is stored as JSON.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{cart::Cart, token::SessionToken};

/// Key holding the serialized cart.
pub const CART_KEY: &str = "cartItems";

/// Key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Errors raised by a storage backend or while decoding a stored value.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium failed.
    #[error("storage i/o failed for `{key}`")]
    Io {
        /// Key being accessed
        key: String,

        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A stored value could not be decoded.
    #[error("stored value for `{key}` is not valid")]
    Corrupt {
        /// Key being decoded
        key: String,

        /// Decoding error
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for `{key}`")]
    Encode {
        /// Key being written
        key: String,

        /// Encoding error
        #[source]
        source: serde_json::Error,
    },

    /// The key is not a valid storage name.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// String-keyed durable storage, in the manner of browser local storage.
pub trait KeyValueStore {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing medium fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing medium fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes a value. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing medium fails.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile store, used in tests and when no data directory is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// Store keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// Directory holding the entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_owned()))
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        let staging = path.with_extension("tmp");

        fs::write(&staging, value)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|source| StorageError::Io {
                key: key.to_owned(),
                source,
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

/// Reads the mirrored cart. A missing entry is an empty cart.
///
/// # Errors
///
/// Returns [`StorageError::Corrupt`] when the stored value is not a valid cart,
/// or [`StorageError::Io`] if the backend fails.
pub fn load_cart(store: &impl KeyValueStore) -> Result<Cart, StorageError> {
    let Some(raw) = store.get(CART_KEY)? else {
        return Ok(Cart::new());
    };

    serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
        key: CART_KEY.to_owned(),
        source,
    })
}

/// Mirrors the cart.
///
/// # Errors
///
/// Returns [`StorageError`] if encoding or the write fails.
pub fn save_cart(store: &mut impl KeyValueStore, cart: &Cart) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart).map_err(|source| StorageError::Encode {
        key: CART_KEY.to_owned(),
        source,
    })?;

    store.set(CART_KEY, &raw)
}

/// Reads the mirrored token. A missing or blank entry is no token.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the backend fails.
pub fn load_token(store: &impl KeyValueStore) -> Result<Option<SessionToken>, StorageError> {
    Ok(store.get(TOKEN_KEY)?.and_then(SessionToken::new))
}

/// Mirrors the token, or deletes the entry when `token` is `None`.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the backend fails.
pub fn save_token(
    store: &mut impl KeyValueStore,
    token: Option<&SessionToken>,
) -> Result<(), StorageError> {
    match token {
        Some(token) => store.set(TOKEN_KEY, token.expose()),
        None => store.remove(TOKEN_KEY),
    }
}
