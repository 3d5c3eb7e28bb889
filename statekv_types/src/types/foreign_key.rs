use crate::serde::{SchemaError, WriteLen};
use crate::types::{ColumnFamily, DbInteger, DbKey, DbString, Deser, Ser};
use anyhow::Result;
use std::fmt;
use std::marker::PhantomData;


/// How a reference must resolve against its target column family.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum MatchType {
    /// The target contains a key equal to the reference's encoded bytes.
    Full,
    /// The target contains at least one key starting with the reference's encoded bytes.
    /// Used when the reference names the leading component of a composite target key.
    Prefix,
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("Full"),
            Self::Prefix => f.write_str("Prefix"),
        }
    }
}

/// The schema-level declaration of one reference: where it points and how it matches.
///
/// Implemented once per reference kind, on a marker type.
///
/// ```ignore
/// struct ElementInstanceRef;
/// impl ForeignKeyTarget for ElementInstanceRef {
///     type Key = DbLong;
///     const COLUMN_FAMILY: ColumnFamily = ColumnFamily::ElementInstanceKey;
///     fn skip(key: &DbLong) -> bool {
///         skip_negative(key)
///     }
/// }
/// type ElementInstanceFk = DbForeignKey<ElementInstanceRef>;
/// ```
pub trait ForeignKeyTarget: 'static {
    type Key: DbKey;
    const COLUMN_FAMILY: ColumnFamily;
    const MATCH_TYPE: MatchType = MatchType::Full;

    /// Whether this particular reference means "no reference" and must not be checked.
    fn skip(_key: &Self::Key) -> bool {
        false
    }
}

/// A reference found inside a key, as seen by a consistency checker.
pub trait ForeignKey {
    fn column_family(&self) -> ColumnFamily;
    fn match_type(&self) -> MatchType;
    fn should_skip(&self) -> bool;

    /// The reference's encoded bytes, without any column family prefix.
    fn ser_reference(&self) -> Result<Vec<u8>>;
}

impl fmt::Debug for dyn ForeignKey + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignKey")
            .field("column_family", &self.column_family())
            .field("match_type", &self.match_type())
            .field("should_skip", &self.should_skip())
            .finish()
    }
}

/// A key component that refers to an entry of [`ForeignKeyTarget::COLUMN_FAMILY`].
///
/// Encodes, decodes and compares exactly like its inner key.
pub struct DbForeignKey<T: ForeignKeyTarget> {
    inner: T::Key,
    _target: PhantomData<T>,
}

impl<T: ForeignKeyTarget> DbForeignKey<T> {
    pub fn new(inner: T::Key) -> Self {
        Self {
            inner,
            _target: PhantomData,
        }
    }
    pub fn inner(&self) -> &T::Key {
        &self.inner
    }
    pub fn into_inner(self) -> T::Key {
        self.inner
    }
}

/* Transparent to the codec. */
impl<T: ForeignKeyTarget> Ser for DbForeignKey<T> {
    fn ser_len(&self) -> usize {
        self.inner.ser_len()
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        self.inner.ser(buf, offset)
    }
}
impl<T: ForeignKeyTarget> Deser for DbForeignKey<T> {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let (r_len, inner) = T::Key::deser(buf, offset, len)?;
        Ok((r_len, Self::new(inner)))
    }
    fn check_schema() -> Result<(), SchemaError> {
        T::Key::check_schema()
    }
}
impl<T: ForeignKeyTarget> DbKey for DbForeignKey<T> {
    fn contained_foreign_keys(&self) -> Vec<&dyn ForeignKey> {
        let mut fks: Vec<&dyn ForeignKey> = Vec::new();
        fks.push(self);
        fks.extend(self.inner.contained_foreign_keys());
        fks
    }
}

impl<T: ForeignKeyTarget> ForeignKey for DbForeignKey<T> {
    fn column_family(&self) -> ColumnFamily {
        T::COLUMN_FAMILY
    }
    fn match_type(&self) -> MatchType {
        T::MATCH_TYPE
    }
    fn should_skip(&self) -> bool {
        T::skip(&self.inner)
    }
    fn ser_reference(&self) -> Result<Vec<u8>> {
        self.inner.ser_solo()
    }
}

/* Comparisons and copies follow the inner key. */
impl<T: ForeignKeyTarget> PartialEq for DbForeignKey<T>
where
    T::Key: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl<T: ForeignKeyTarget> Eq for DbForeignKey<T> where T::Key: Eq {}
impl<T: ForeignKeyTarget> Clone for DbForeignKey<T>
where
    T::Key: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}
impl<T: ForeignKeyTarget> fmt::Debug for DbForeignKey<T>
where
    T::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DbForeignKey")
            .field(&T::COLUMN_FAMILY)
            .field(&self.inner)
            .finish()
    }
}

/* Common skip predicates. */

/// Negative keys, conventionally `-1`, mean "no reference".
pub fn skip_negative<I>(key: &DbInteger<I>) -> bool
where
    I: Copy + PartialOrd + Default,
{
    key.0 < I::default()
}

/// The empty string means "no reference".
pub fn skip_empty(key: &DbString) -> bool {
    key.is_empty()
}
