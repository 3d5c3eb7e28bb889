use crate::serde::{self, DecodeError, StrLen, WriteLen};
use crate::types::{DbKey, DbValue, Deser, Ser};
use anyhow::Result;
use derive_more::{Deref, From, Into};
use std::any;
use std::cmp::Ordering;
use std::str;

/// A raw byte string whose length is implied by the enclosing schema.
///
/// Decoding consumes the entire window, so as a composite component it must come last.
/// Used as the first component of a composite, ordering degrades to plain byte order of
/// the concatenation.
#[derive(From, Into, Deref, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Default, Debug)]
pub struct DbBytes(pub Vec<u8>);

impl Ser for DbBytes {
    fn ser_len(&self) -> usize {
        self.0.len()
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let out = serde::write_window::<Self>(buf, offset, self.0.len())?;
        out.copy_from_slice(&self.0);
        Ok(WriteLen::new_manual(self.0.len()))
    }
}
impl Deser for DbBytes {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let inp = serde::read_window::<Self>(buf, offset, len, len)?;
        Ok((inp.len(), Self(inp.to_vec())))
    }
}
impl DbKey for DbBytes {}
impl DbValue for DbBytes {}

/// A UTF-8 string preceded by its byte length, so it can sit anywhere inside a composite.
///
/// Strings of different lengths sort by length first, both encoded and as values.
#[derive(From, Into, Deref, PartialEq, Eq, Hash, Clone, Default, Debug)]
pub struct DbString(pub String);

impl DbString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for DbString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.as_bytes().cmp(other.0.as_bytes()))
    }
}
impl PartialOrd for DbString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl From<&str> for DbString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Ser for DbString {
    fn ser_len(&self) -> usize {
        StrLen::WIDTH + self.0.len()
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let body = self.0.as_bytes();
        let body_len = StrLen::from_body::<Self>(body)?;

        let out = serde::write_window::<Self>(buf, offset, StrLen::WIDTH + body.len())?;
        let (out_len, out_body) = out.split_at_mut(StrLen::WIDTH);
        body_len.ser(out_len);
        out_body.copy_from_slice(body);

        Ok(WriteLen::new_manual(StrLen::WIDTH + body.len()))
    }
}
impl Deser for DbString {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        /* body_len */
        let inp = serde::read_window::<Self>(buf, offset, len, StrLen::WIDTH)?;
        let body_len = *StrLen::deser(inp) as usize;

        /* body */
        let inp = serde::read_window::<Self>(
            buf,
            offset + StrLen::WIDTH,
            len - StrLen::WIDTH,
            body_len,
        )?;
        let s = str::from_utf8(inp).map_err(|source| DecodeError::InvalidUtf8 {
            type_name: any::type_name::<Self>(),
            source,
        })?;

        Ok((StrLen::WIDTH + body_len, Self(s.to_owned())))
    }
}
impl DbKey for DbString {}
impl DbValue for DbString {}
