//! Unified error type for the DiceRoller core.
//!
//! Each port reports its own typed error (see [`crate::app::ports`]); the
//! application service funnels them into this enum so lifecycle callers
//! have a single type to propagate.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

/// Every fallible service operation funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// Key-value storage failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A persisted blob could not be encoded or decoded.
    Codec(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Codec(what) => write!(f, "codec: {what}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
