use crate::serde::{DecodeError, EncodeError};
use anyhow::Result;
use derive_more::Deref;
use std::any;
use std::mem;

#[derive(Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct WriteLen(usize);
impl WriteLen {
    pub fn new_manual(len: usize) -> Self {
        Self(len)
    }
}

/// Returns the `needed` bytes at `offset` within a decoding window of `len` bytes.
///
/// The whole window must lie within `buf`; a window that overshoots is truncated input,
/// not a hint.
pub fn read_window<'a, T>(buf: &'a [u8], offset: usize, len: usize, needed: usize) -> Result<&'a [u8]> {
    let type_name = any::type_name::<T>();
    let in_buf = buf.len().saturating_sub(offset);
    if len > in_buf {
        return Err(DecodeError::Truncated {
            type_name,
            needed: len,
            available: in_buf,
        }
        .into());
    }
    if len < needed {
        return Err(DecodeError::Truncated {
            type_name,
            needed,
            available: len,
        }
        .into());
    }
    if needed == 0 {
        return Ok(&[]);
    }
    Ok(&buf[offset..offset + needed])
}

/// Returns the `needed` bytes at `offset`, for writing.
pub fn write_window<'a, T>(buf: &'a mut [u8], offset: usize, needed: usize) -> Result<&'a mut [u8]> {
    if needed == 0 {
        return Ok(&mut []);
    }
    let available = buf.len().saturating_sub(offset);
    if available < needed {
        return Err(EncodeError::BufferTooSmall {
            type_name: any::type_name::<T>(),
            needed,
            available,
        }
        .into());
    }
    Ok(&mut buf[offset..offset + needed])
}

/// The length prefix of a self-delimiting, variable-length body.
#[derive(Deref, Clone, Copy)]
pub struct StrLen(u32);
impl StrLen {
    pub const WIDTH: usize = mem::size_of::<u32>();

    pub fn from_body<T>(body: &[u8]) -> Result<Self> {
        let int = u32::try_from(body.len()).map_err(|_| EncodeError::LengthOverflow {
            type_name: any::type_name::<T>(),
            len: body.len(),
        })?;
        Ok(Self(int))
    }

    pub fn ser(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_be_bytes());
    }

    pub fn deser(inp: &[u8]) -> Self {
        let mut arr = [0u8; Self::WIDTH];
        arr.copy_from_slice(inp);
        Self(u32::from_be_bytes(arr))
    }
}
