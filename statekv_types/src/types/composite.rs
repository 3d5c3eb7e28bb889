use crate::serde::{DecodeError, SchemaError, WriteLen};
use crate::types::{DbKey, Deser, ForeignKey, Ser};
use anyhow::Result;
use std::any;


/// Two keys concatenated, `first` immediately followed by `second`.
///
/// Byte order of the concatenation equals "by `first`, then by `second`" as long as `first`
/// is self-delimiting: every fixed-width primitive, [`crate::types::DbString`], and any
/// composite built from those. A [`crate::types::DbBytes`] first component only gives
/// plain byte order.
///
/// Composites nest to any depth.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug)]
pub struct DbCompositeKey<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> DbCompositeKey<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> From<(A, B)> for DbCompositeKey<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self { first, second }
    }
}

impl<A: Ser, B: Ser> Ser for DbCompositeKey<A, B> {
    fn ser_len(&self) -> usize {
        self.first.ser_len() + self.second.ser_len()
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let mut w_len = 0;
        w_len += *self.first.ser(buf, offset)?;
        w_len += *self.second.ser(buf, offset + w_len)?;
        Ok(WriteLen::new_manual(w_len))
    }
}

impl<A: Deser, B: Deser> Deser for DbCompositeKey<A, B> {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let (first_r_len, first) = A::deser(buf, offset, len)?;
        let remaining = len.checked_sub(first_r_len).ok_or(DecodeError::Truncated {
            type_name: any::type_name::<Self>(),
            needed: first_r_len,
            available: len,
        })?;
        let (second_r_len, second) = B::deser(buf, offset + first_r_len, remaining)?;
        Ok((first_r_len + second_r_len, Self { first, second }))
    }
    fn check_schema() -> Result<(), SchemaError> {
        A::check_schema()?;
        B::check_schema()
    }
}

impl<A: DbKey, B: DbKey> DbKey for DbCompositeKey<A, B> {
    fn contained_foreign_keys(&self) -> Vec<&dyn ForeignKey> {
        let mut fks = self.first.contained_foreign_keys();
        fks.extend(self.second.contained_foreign_keys());
        fks
    }
}
