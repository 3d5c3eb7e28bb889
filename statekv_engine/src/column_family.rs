use crate::consistency;
use crate::metrics::{
    ColumnFamilyMetrics, DbOperation, LatencyColumnFamilyMetrics, LatencyRecorder,
    MetricsRecorder, NoopColumnFamilyMetrics,
};
use crate::{ConsistencyChecks, DbConfig, OrderedStore, PreconditionError};
use anyhow::Result;
use statekv_types::types::{ColumnFamily, DbKey, DbValue, Deser, Ser};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace};


/// The state of one partition: a backing store plus the settings shared by all of its
/// column family accessors.
pub struct StateDb<S> {
    store: S,
    config: DbConfig,
    recorder: Arc<dyn LatencyRecorder>,
}

impl<S: OrderedStore> StateDb<S> {
    /// Latency samples, if enabled, go to the `metrics` facade.
    pub fn new(store: S, config: DbConfig) -> Self {
        Self::with_recorder(store, config, Arc::new(MetricsRecorder))
    }

    /// Latency samples, if enabled, go to `recorder`.
    pub fn with_recorder(store: S, config: DbConfig, recorder: Arc<dyn LatencyRecorder>) -> Self {
        debug!(
            partition_id = config.partition_id,
            enable_latency_metrics = config.enable_latency_metrics,
            enable_preconditions = config.consistency_checks.enable_preconditions,
            enable_foreign_key_checks = config.consistency_checks.enable_foreign_key_checks,
            "Opening state db"
        );
        Self {
            store,
            config,
            recorder,
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates the accessor of `column_family`, typed by its key and value schemas.
    ///
    /// Accessors are meant to be created once and reused. Fails with a
    /// [`statekv_types::serde::SchemaError`] if either schema is malformed.
    pub fn column_family<K, V>(&self, column_family: ColumnFamily) -> Result<ColumnFamilyAccessor<K, V>>
    where
        K: DbKey,
        V: DbValue,
    {
        K::check_schema()?;
        V::check_schema()?;

        let metrics: Box<dyn ColumnFamilyMetrics> = if self.config.enable_latency_metrics {
            Box::new(LatencyColumnFamilyMetrics::new(
                self.config.partition_id,
                column_family,
                Arc::clone(&self.recorder),
            ))
        } else {
            Box::new(NoopColumnFamilyMetrics)
        };
        debug!(
            partition_id = self.config.partition_id,
            %column_family,
            key = std::any::type_name::<K>(),
            value = std::any::type_name::<V>(),
            "Creating column family accessor"
        );
        Ok(ColumnFamilyAccessor::new(
            column_family,
            self.config.consistency_checks,
            metrics,
        ))
    }

    pub fn is_column_family_empty(&self, column_family: ColumnFamily) -> bool {
        let prefix = column_family.key_prefix();
        let is_empty = self.store.scan_prefix(&prefix).next().is_none();
        is_empty
    }
}

/// Typed access to one column family.
///
/// An accessor reuses its encoding buffers across calls, so each method takes `&mut self`:
/// one accessor serves one operation at a time.
pub struct ColumnFamilyAccessor<K, V> {
    column_family: ColumnFamily,
    checks: ConsistencyChecks,
    metrics: Box<dyn ColumnFamilyMetrics>,
    key_buf: Vec<u8>,
    seek_buf: Vec<u8>,
    value_buf: Vec<u8>,
    _kv: PhantomData<fn() -> (K, V)>,
}

impl<K, V> ColumnFamilyAccessor<K, V>
where
    K: DbKey,
    V: DbValue,
{
    pub fn new(
        column_family: ColumnFamily,
        checks: ConsistencyChecks,
        metrics: Box<dyn ColumnFamilyMetrics>,
    ) -> Self {
        Self {
            column_family,
            checks,
            metrics,
            key_buf: vec![],
            seek_buf: vec![],
            value_buf: vec![],
            _kv: PhantomData,
        }
    }

    pub fn column_family(&self) -> ColumnFamily {
        self.column_family
    }

    /* Point reads */

    pub fn get(&mut self, store: &dyn OrderedStore, key: &K) -> Result<Option<V>> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;

        let stop = self.metrics.measure(DbOperation::Get);
        let res = store.get(&self.key_buf);
        stop.stop();

        match res? {
            None => Ok(None),
            Some(value_bytes) => Ok(Some(V::deser_solo(value_bytes)?)),
        }
    }

    pub fn exists(&mut self, store: &dyn OrderedStore, key: &K) -> Result<bool> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;
        self.encoded_key_exists(store)
    }

    /* Writes */

    /// Writes an entry whose key must not exist yet.
    pub fn insert(&mut self, store: &mut dyn OrderedStore, key: &K, value: &V) -> Result<()> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;
        if self.checks.enable_preconditions && self.encoded_key_exists(store)? {
            return Err(self.precondition_error(true).into());
        }
        self.assert_foreign_keys(store, key)?;
        self.put_encoded_key(store, value)
    }

    /// Overwrites an entry whose key must already exist.
    pub fn update(&mut self, store: &mut dyn OrderedStore, key: &K, value: &V) -> Result<()> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;
        if self.checks.enable_preconditions && !self.encoded_key_exists(store)? {
            return Err(self.precondition_error(false).into());
        }
        self.assert_foreign_keys(store, key)?;
        self.put_encoded_key(store, value)
    }

    /// Writes an entry, whether or not its key exists.
    pub fn upsert(&mut self, store: &mut dyn OrderedStore, key: &K, value: &V) -> Result<()> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;
        self.assert_foreign_keys(store, key)?;
        self.put_encoded_key(store, value)
    }

    /// Deletes an entry whose key must exist.
    pub fn delete_existing(&mut self, store: &mut dyn OrderedStore, key: &K) -> Result<()> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;
        let existed = self.delete_encoded_key(store)?;
        if self.checks.enable_preconditions && !existed {
            return Err(self.precondition_error(false).into());
        }
        Ok(())
    }

    /// Returns whether the key existed.
    pub fn delete_if_exists(&mut self, store: &mut dyn OrderedStore, key: &K) -> Result<bool> {
        encode_prefixed(&mut self.key_buf, self.column_family, key)?;
        self.delete_encoded_key(store)
    }

    /* Scans */

    /// Visits every entry in key order.
    pub fn for_each<F>(&mut self, store: &dyn OrderedStore, mut visitor: F) -> Result<()>
    where
        F: FnMut(K, V) -> Result<()>,
    {
        self.set_column_family_prefix();
        self.visit(store, None, |k, v| visitor(k, v).map(|()| true))
    }

    /// Visits entries in key order, starting at `start_at` if given, until the visitor
    /// returns `false`.
    pub fn while_true<F>(
        &mut self,
        store: &dyn OrderedStore,
        start_at: Option<&K>,
        visitor: F,
    ) -> Result<()>
    where
        F: FnMut(K, V) -> Result<bool>,
    {
        self.set_column_family_prefix();
        self.visit(store, start_at, visitor)
    }

    /// Visits, in key order, the entries whose keys begin with the encoding of `prefix`,
    /// until the visitor returns `false`.
    ///
    /// `prefix` is typically the leading component(s) of a composite key.
    pub fn while_equal_prefix<P, F>(
        &mut self,
        store: &dyn OrderedStore,
        prefix: &P,
        visitor: F,
    ) -> Result<()>
    where
        P: Ser,
        F: FnMut(K, V) -> Result<bool>,
    {
        encode_prefixed(&mut self.key_buf, self.column_family, prefix)?;
        self.visit(store, None, visitor)
    }

    pub fn count(&mut self, store: &dyn OrderedStore) -> usize {
        self.set_column_family_prefix();

        let stop = self.metrics.measure(DbOperation::Iterate);
        let count = store.scan_prefix(&self.key_buf).count();
        stop.stop();

        count
    }

    pub fn is_empty(&mut self, store: &dyn OrderedStore) -> bool {
        self.set_column_family_prefix();

        let stop = self.metrics.measure(DbOperation::Iterate);
        let is_empty = store.scan_prefix(&self.key_buf).next().is_none();
        stop.stop();

        is_empty
    }

    /* Helpers. All operate on the key currently encoded in `key_buf`. */

    fn encoded_key_exists(&self, store: &dyn OrderedStore) -> Result<bool> {
        let stop = self.metrics.measure(DbOperation::Get);
        let res = store.get(&self.key_buf);
        stop.stop();

        Ok(res?.is_some())
    }

    fn put_encoded_key(&mut self, store: &mut dyn OrderedStore, value: &V) -> Result<()> {
        self.value_buf.clear();
        self.value_buf.resize(value.ser_len(), 0);
        value.ser(&mut self.value_buf, 0)?;

        let stop = self.metrics.measure(DbOperation::Put);
        let res = store.put(&self.key_buf, &self.value_buf);
        stop.stop();

        trace!(
            column_family = %self.column_family,
            key_len = self.key_buf.len(),
            value_len = self.value_buf.len(),
            "put"
        );
        res
    }

    fn delete_encoded_key(&mut self, store: &mut dyn OrderedStore) -> Result<bool> {
        let stop = self.metrics.measure(DbOperation::Delete);
        let res = store.delete(&self.key_buf);
        stop.stop();

        trace!(
            column_family = %self.column_family,
            key_len = self.key_buf.len(),
            "delete"
        );
        res
    }

    fn assert_foreign_keys(&self, store: &dyn OrderedStore, key: &K) -> Result<()> {
        if !self.checks.enable_foreign_key_checks {
            return Ok(());
        }
        let key_bytes = &self.key_buf[ColumnFamily::KEY_PREFIX_LEN..];
        let errs = consistency::check_foreign_keys(store, self.column_family, key, key_bytes)?;
        match errs.into_iter().next() {
            None => Ok(()),
            Some(err) => Err(err.into()),
        }
    }

    fn precondition_error(&self, key_exists: bool) -> PreconditionError {
        let column_family = self.column_family;
        let key = self.key_buf[ColumnFamily::KEY_PREFIX_LEN..].into();
        if key_exists {
            PreconditionError::KeyAlreadyExists { column_family, key }
        } else {
            PreconditionError::KeyNotFound { column_family, key }
        }
    }

    fn set_column_family_prefix(&mut self) {
        self.key_buf.clear();
        self.key_buf.extend_from_slice(&self.column_family.key_prefix());
    }

    /// Visits the entries whose keys begin with `key_buf`.
    fn visit<F>(
        &mut self,
        store: &dyn OrderedStore,
        start_at: Option<&K>,
        mut visitor: F,
    ) -> Result<()>
    where
        F: FnMut(K, V) -> Result<bool>,
    {
        match start_at {
            None => {
                self.seek_buf.clear();
                self.seek_buf.extend_from_slice(&self.key_buf);
            }
            Some(start_at) => encode_prefixed(&mut self.seek_buf, self.column_family, start_at)?,
        }

        let stop = self.metrics.measure(DbOperation::Iterate);
        let res = visit_entries(store, &self.key_buf, &self.seek_buf, &mut visitor);
        stop.stop();

        res
    }
}

/// Writes `cf_prefix ++ key` into `buf`, replacing its contents.
fn encode_prefixed<T: Ser + ?Sized>(
    buf: &mut Vec<u8>,
    column_family: ColumnFamily,
    key: &T,
) -> Result<()> {
    buf.clear();
    buf.extend_from_slice(&column_family.key_prefix());
    buf.resize(ColumnFamily::KEY_PREFIX_LEN + key.ser_len(), 0);
    key.ser(buf, ColumnFamily::KEY_PREFIX_LEN)?;
    Ok(())
}

fn visit_entries<K, V, F>(
    store: &dyn OrderedStore,
    prefix: &[u8],
    start: &[u8],
    visitor: &mut F,
) -> Result<()>
where
    K: Deser,
    V: Deser,
    F: FnMut(K, V) -> Result<bool>,
{
    let iter = store
        .iter_from(start)
        .take_while(|(k, _v)| k.starts_with(prefix));
    for (k, v) in iter {
        let key = K::deser_solo(&k[ColumnFamily::KEY_PREFIX_LEN..])?;
        let value = V::deser_solo(v)?;
        if !visitor(key, value)? {
            break;
        }
    }
    Ok(())
}
