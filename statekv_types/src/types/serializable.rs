use crate::serde::{DecodeError, SchemaError, WriteLen};
use crate::types::ForeignKey;
use anyhow::Result;
use std::any;

pub trait Ser {
    /// The exact number of bytes [`Ser::ser`] writes.
    fn ser_len(&self) -> usize;

    /// Writes exactly [`Ser::ser_len`] bytes at `offset`, and returns that count
    /// so that combinators can advance their cursor.
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen>;

    fn ser_solo(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.ser_len()];
        self.ser(&mut buf, 0)?;
        Ok(buf)
    }
}

pub trait Deser: Sized {
    /// Decodes one value from the window `buf[offset..offset + len]`,
    /// returning the number of bytes consumed along with the value.
    ///
    /// Fixed-width types only validate `len`; they always read their own width.
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)>;

    /// Decodes a value that must occupy the whole of `buf`.
    fn deser_solo(buf: &[u8]) -> Result<Self> {
        let (r_len, moi) = Self::deser(buf, 0, buf.len())?;
        if r_len != buf.len() {
            return Err(DecodeError::TrailingBytes {
                type_name: any::type_name::<Self>(),
                consumed: r_len,
                available: buf.len(),
            }
            .into());
        }
        Ok(moi)
    }

    /// Rejects a type whose declaration can never be encoded correctly.
    ///
    /// Called when an accessor is created, so that a broken schema fails at startup
    /// instead of on the first write. Wrappers forward to their components.
    fn check_schema() -> Result<(), SchemaError> {
        Ok(())
    }
}

/* trait Serializable */
pub trait Serializable: Ser + Deser {}
impl<T> Serializable for T where T: Ser + Deser {}

/// A type that may be used as (part of) a key.
///
/// Its encoding must sort the same way as the values it represents.
pub trait DbKey: Serializable {
    /// Every foreign key declaration contained in this key, in encoding order.
    fn contained_foreign_keys(&self) -> Vec<&dyn ForeignKey> {
        vec![]
    }
}

/// A type that may be stored as a value. Values are never range-scanned.
pub trait DbValue: Serializable {}
