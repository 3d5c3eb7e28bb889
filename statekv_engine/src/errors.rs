use derive_more::{Deref, From};
use itertools::Itertools;
use statekv_types::types::{ColumnFamily, MatchType};
use std::fmt;
use thiserror::Error;

/// Encoded key bytes, printed as hex.
#[derive(From, Deref, PartialEq, Eq, Clone, Default)]
pub struct KeyBytes(pub Vec<u8>);

impl From<&[u8]> for KeyBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}
impl fmt::Display for KeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0.iter().format(""))
    }
}
impl fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A reference inside a stored key does not resolve in its target column family.
///
/// `key` and `reference` exclude their column family prefixes.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
#[error("Key {key} of {column_family} refers to {reference} of {target} ({match_type} match), which does not exist")]
pub struct ReferentialIntegrityError {
    pub column_family: ColumnFamily,
    pub key: KeyBytes,
    pub target: ColumnFamily,
    pub match_type: MatchType,
    pub reference: KeyBytes,
}

/// A write that requires the key's presence or absence found the opposite.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum PreconditionError {
    #[error("Key {key} already exists in {column_family}")]
    KeyAlreadyExists {
        column_family: ColumnFamily,
        key: KeyBytes,
    },

    #[error("Key {key} does not exist in {column_family}")]
    KeyNotFound {
        column_family: ColumnFamily,
        key: KeyBytes,
    },
}
