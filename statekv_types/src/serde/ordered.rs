use std::fmt::Debug;
use std::hash::Hash;
use std::mem;

/// A fixed-width signed integer in the system-wide ordered representation:
/// big-endian, with the sign bit inverted.
///
/// For any two values `a < b`, the encoding of `a` is byte-lexicographically less than
/// the encoding of `b`.
pub trait OrderedInt: Copy + Ord + Hash + Default + Debug {
    const WIDTH: usize;

    /// `out.len()` must equal [`Self::WIDTH`].
    fn write_ordered(self, out: &mut [u8]);

    /// `inp.len()` must equal [`Self::WIDTH`].
    fn read_ordered(inp: &[u8]) -> Self;
}

macro_rules! impl_ordered_int {
    ($signed:ty, $unsigned:ty) => {
        impl OrderedInt for $signed {
            const WIDTH: usize = mem::size_of::<$signed>();

            fn write_ordered(self, out: &mut [u8]) {
                let flipped = (self as $unsigned) ^ sign_bit!($unsigned);
                out.copy_from_slice(&flipped.to_be_bytes());
            }

            fn read_ordered(inp: &[u8]) -> Self {
                let mut arr = [0u8; mem::size_of::<$signed>()];
                arr.copy_from_slice(inp);
                (<$unsigned>::from_be_bytes(arr) ^ sign_bit!($unsigned)) as $signed
            }
        }
    };
}

macro_rules! sign_bit {
    ($unsigned:ty) => {
        !(<$unsigned>::MAX >> 1)
    };
}

impl_ordered_int!(i8, u8);
impl_ordered_int!(i16, u16);
impl_ordered_int!(i32, u32);
impl_ordered_int!(i64, u64);
