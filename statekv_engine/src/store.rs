use anyhow::Result;
use std::collections::BTreeMap;
use std::ops::Bound;


pub type StoreIter<'a> = Box<dyn 'a + Iterator<Item = (&'a [u8], &'a [u8])>>;

/// The backing key-value store: raw byte keys, ordered by unsigned byte-lexicographic
/// comparison.
pub trait OrderedStore {
    fn get(&self, key: &[u8]) -> Result<Option<&[u8]>>;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Returns whether the key was present.
    fn delete(&mut self, key: &[u8]) -> Result<bool>;

    /// All entries whose keys are `>= start`, in ascending key order.
    fn iter_from<'a>(&'a self, start: &[u8]) -> StoreIter<'a>;

    /// All entries whose keys start with `prefix`, in ascending key order.
    fn scan_prefix<'a>(&'a self, prefix: &'a [u8]) -> StoreIter<'a> {
        let iter = self
            .iter_from(prefix)
            .take_while(move |(k, _v)| k.starts_with(prefix));
        Box::new(iter)
    }
}

/// An [`OrderedStore`] held entirely in memory.
#[derive(Default, Debug)]
pub struct MemStore {
    table: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mem_len(&self) -> usize {
        self.table.len()
    }
}

impl OrderedStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<&[u8]>> {
        Ok(self.table.get(key).map(|v| v.as_slice()))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.table.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool> {
        Ok(self.table.remove(key).is_some())
    }

    fn iter_from<'a>(&'a self, start: &[u8]) -> StoreIter<'a> {
        let iter = self
            .table
            .range::<[u8], _>((Bound::Included(start), Bound::Unbounded))
            .map(|(k, v)| (k.as_slice(), v.as_slice()));
        Box::new(iter)
    }
}
