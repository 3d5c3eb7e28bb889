use crate::serde::{self, OrderedInt, WriteLen};
use crate::types::{DbKey, DbValue, Deser, Ser};
use anyhow::Result;
use derive_more::{Deref, From};


/// A fixed-width signed integer. See [`OrderedInt`] for the representation.
#[derive(From, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct DbInteger<T>(pub T);

pub type DbByte = DbInteger<i8>;
pub type DbShort = DbInteger<i16>;
pub type DbInt = DbInteger<i32>;
pub type DbLong = DbInteger<i64>;

impl<T: OrderedInt> DbInteger<T> {
    pub const WIDTH: usize = T::WIDTH;

    pub fn value(&self) -> T {
        self.0
    }
}

impl<T: OrderedInt> Ser for DbInteger<T> {
    fn ser_len(&self) -> usize {
        T::WIDTH
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let out = serde::write_window::<Self>(buf, offset, T::WIDTH)?;
        self.0.write_ordered(out);
        Ok(WriteLen::new_manual(T::WIDTH))
    }
}
impl<T: OrderedInt> Deser for DbInteger<T> {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let inp = serde::read_window::<Self>(buf, offset, len, T::WIDTH)?;
        Ok((T::WIDTH, Self(T::read_ordered(inp))))
    }
}
impl<T: OrderedInt> DbKey for DbInteger<T> {}
impl<T: OrderedInt> DbValue for DbInteger<T> {}

/// The sentinel written for [`DbNil`]. Readers ignore its value.
pub const NIL_SENTINEL: u8 = 0;

/// "No value, just presence." Used where a column family is a set.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct DbNil;

impl Ser for DbNil {
    fn ser_len(&self) -> usize {
        1
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let out = serde::write_window::<Self>(buf, offset, 1)?;
        out[0] = NIL_SENTINEL;
        Ok(WriteLen::new_manual(1))
    }
}
impl Deser for DbNil {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        serde::read_window::<Self>(buf, offset, len, 1)?;
        Ok((1, DbNil))
    }
}
impl DbKey for DbNil {}
impl DbValue for DbNil {}
