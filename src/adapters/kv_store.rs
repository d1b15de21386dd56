//! Key-value preference store adapter.
//!
//! Implements both [`ConfigPort`] and [`StoragePort`].
//!
//! - **In-memory** (`KvStore::new`) — for tests and throwaway runs.
//! - **File-backed** (`KvStore::open`) — the whole map is kept as JSON on
//!   disk and rewritten on every mutation. Writes go to a sibling temp file
//!   that is renamed over the original, so a crash mid-write leaves the
//!   previous contents intact.
//!
//! Namespaces are isolated by prefixing keys with `namespace::`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::AppConfig;

const CONFIG_NAMESPACE: &str = "diceroller";
const CONFIG_KEY: &str = "appcfg";

pub struct KvStore {
    store: RefCell<BTreeMap<String, Vec<u8>>>,
    path: Option<PathBuf>,
}

impl Default for KvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore {
    /// Empty in-memory store.
    pub fn new() -> Self {
        Self {
            store: RefCell::new(BTreeMap::new()),
            path: None,
        }
    }

    /// Open (or create on first write) a store persisted at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let map = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                warn!("KvStore: {} is not a valid store: {}", path.display(), e);
                StorageError::IoError
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("KvStore: {} not found, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("KvStore: cannot read {}: {}", path.display(), e);
                return Err(StorageError::IoError);
            }
        };
        Ok(Self {
            store: RefCell::new(map),
            path: Some(path),
        })
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// Write the map back to disk (no-op for in-memory stores).
    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(&*self.store.borrow()).map_err(|_| StorageError::IoError)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)
            .and_then(|()| fs::rename(&tmp, path))
            .map_err(|e| {
                warn!("KvStore: flush to {} failed: {}", path.display(), e);
                StorageError::IoError
            })
    }
}

impl ConfigPort for KvStore {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        if let Some(bytes) = self.store.borrow().get(&key) {
            let cfg: AppConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
            info!("KvStore: loaded config from store");
            Ok(cfg)
        } else {
            info!("KvStore: no stored config, using defaults");
            Ok(AppConfig::default())
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let key = Self::composite_key(CONFIG_NAMESPACE, CONFIG_KEY);
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store.borrow_mut().insert(key, bytes);
        self.flush().map_err(|_| ConfigError::IoError)?;
        info!("KvStore: config saved");
        Ok(())
    }
}

impl StoragePort for KvStore {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let composite = Self::composite_key(namespace, key);
        match self.store.borrow().get(&composite) {
            Some(data) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let composite = Self::composite_key(namespace, key);
        self.store.borrow_mut().insert(composite, data.to_vec());
        self.flush()
    }
}
