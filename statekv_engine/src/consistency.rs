//! Referential integrity between column families.
//!
//! References are declared in key schemas (see [`statekv_types::types::ForeignKeyTarget`]).
//! They are checked in two ways:
//! - on write, by [`crate::ColumnFamilyAccessor`] when
//!   [`crate::ConsistencyChecks::enable_foreign_key_checks`] is set;
//! - after the fact, by a [`ConsistencyChecker`] scanning every registered column family.

use crate::{OrderedStore, ReferentialIntegrityError};
use anyhow::Result;
use statekv_types::types::{ColumnFamily, DbKey, ForeignKey, MatchType};
use tracing::{info, warn};


/// Whether `fk` resolves in `store`. Skipped references always resolve.
pub fn check_foreign_key(store: &dyn OrderedStore, fk: &dyn ForeignKey) -> Result<bool> {
    if fk.should_skip() {
        return Ok(true);
    }

    let mut target_key = fk.column_family().key_prefix().to_vec();
    target_key.extend(fk.ser_reference()?);

    let exists = match fk.match_type() {
        MatchType::Full => store.get(&target_key)?.is_some(),
        MatchType::Prefix => store.scan_prefix(&target_key).next().is_some(),
    };
    Ok(exists)
}

/// Every reference in `key` that does not resolve.
///
/// `key_bytes` is the encoding of `key` without its column family prefix, used for reporting.
pub fn check_foreign_keys<K: DbKey>(
    store: &dyn OrderedStore,
    column_family: ColumnFamily,
    key: &K,
    key_bytes: &[u8],
) -> Result<Vec<ReferentialIntegrityError>> {
    let mut errs = vec![];
    for fk in key.contained_foreign_keys() {
        if !check_foreign_key(store, fk)? {
            errs.push(ReferentialIntegrityError {
                column_family,
                key: key_bytes.into(),
                target: fk.column_family(),
                match_type: fk.match_type(),
                reference: fk.ser_reference()?.into(),
            });
        }
    }
    Ok(errs)
}

type StoredKeyCheck =
    fn(&dyn OrderedStore, ColumnFamily, &[u8]) -> Result<Vec<ReferentialIntegrityError>>;

fn check_stored_key<K: DbKey>(
    store: &dyn OrderedStore,
    column_family: ColumnFamily,
    key_bytes: &[u8],
) -> Result<Vec<ReferentialIntegrityError>> {
    let key = K::deser_solo(key_bytes)?;
    check_foreign_keys(store, column_family, &key, key_bytes)
}

struct RegisteredColumnFamily {
    column_family: ColumnFamily,
    check: StoredKeyCheck,
}

/// Scans whole column families for references that do not resolve.
///
/// Each column family whose keys contain references is registered with its key type.
/// A stored key that fails to decode aborts the pass.
#[derive(Default)]
pub struct ConsistencyChecker {
    registered: Vec<RegisteredColumnFamily>,
}

impl ConsistencyChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<K: DbKey>(&mut self, column_family: ColumnFamily) -> &mut Self {
        self.registered.push(RegisteredColumnFamily {
            column_family,
            check: check_stored_key::<K>,
        });
        self
    }

    pub fn registered(&self) -> impl '_ + Iterator<Item = ColumnFamily> {
        self.registered.iter().map(|reg| reg.column_family)
    }

    pub fn check(&self, store: &dyn OrderedStore) -> Result<Vec<ReferentialIntegrityError>> {
        let mut errs = vec![];
        let mut scanned = 0usize;
        for reg in self.registered.iter() {
            let prefix = reg.column_family.key_prefix();
            for (k, _v) in store.scan_prefix(&prefix) {
                let key_bytes = &k[ColumnFamily::KEY_PREFIX_LEN..];
                for err in (reg.check)(store, reg.column_family, key_bytes)? {
                    warn!("{err}");
                    errs.push(err);
                }
                scanned += 1;
            }
        }
        info!(
            column_families = self.registered.len(),
            keys = scanned,
            violations = errs.len(),
            "Consistency check finished"
        );
        Ok(errs)
    }
}
