use crate::serde::{DecodeError, SchemaError, WriteLen};
use crate::types::{DbByte, DbKey, DbValue, Deser, Ser};
use anyhow::Result;
use derive_more::{Deref, From};
use std::any;
use std::fmt::Debug;


/// The most variants a closed set may declare: positions `0..=254` biased by `i8::MIN`
/// stay within `i8`.
pub const MAX_ENUM_VARIANTS: usize = u8::MAX as usize;

/// A closed set of named variants with a stable declaration order.
///
/// The order of [`EnumVariants::VARIANTS`] is part of the storage format: variants may be
/// appended, but never removed or reordered.
pub trait EnumVariants: Copy + PartialEq + Debug + 'static {
    const VARIANTS: &'static [Self];
}

/// Maps the variants of `E` to single bytes whose order equals declaration order.
#[derive(Clone, Copy, Debug)]
pub struct EnumCodec<E: 'static> {
    variants: &'static [E],
}

impl<E: EnumVariants> EnumCodec<E> {
    pub fn new(variants: &'static [E]) -> Result<Self, SchemaError> {
        let type_name = any::type_name::<E>();
        if variants.is_empty() {
            return Err(SchemaError::EmptyEnum { type_name });
        }
        if variants.len() > MAX_ENUM_VARIANTS {
            return Err(SchemaError::TooManyEnumVariants {
                type_name,
                count: variants.len(),
                max: MAX_ENUM_VARIANTS,
            });
        }
        for (i, variant) in variants.iter().enumerate() {
            if variants[..i].contains(variant) {
                return Err(SchemaError::DuplicateEnumVariant {
                    type_name,
                    variant: format!("{variant:?}"),
                });
            }
        }
        Ok(Self { variants })
    }

    /// The codec over `E`'s own declaration.
    pub fn declared() -> Result<Self, SchemaError> {
        Self::new(E::VARIANTS)
    }

    /// The codec over `E`'s declaration, assumed already checked by [`Self::declared`].
    fn trusted() -> Self {
        Self {
            variants: E::VARIANTS,
        }
    }

    pub fn variants(&self) -> &'static [E] {
        self.variants
    }

    pub fn ordinal(&self, variant: E) -> Result<usize, SchemaError> {
        let type_name = any::type_name::<E>();
        match self.variants.iter().position(|v| *v == variant) {
            None => Err(SchemaError::UndeclaredEnumVariant {
                type_name,
                variant: format!("{variant:?}"),
            }),
            Some(ordinal) if ordinal >= MAX_ENUM_VARIANTS => Err(SchemaError::TooManyEnumVariants {
                type_name,
                count: self.variants.len(),
                max: MAX_ENUM_VARIANTS,
            }),
            Some(ordinal) => Ok(ordinal),
        }
    }

    pub fn encode(&self, variant: E) -> Result<i8, SchemaError> {
        let ordinal = self.ordinal(variant)?;
        // ordinal < MAX_ENUM_VARIANTS, so the sum stays within i8.
        Ok((ordinal as i16 + i8::MIN as i16) as i8)
    }

    pub fn decode(&self, biased: i8) -> Result<E, DecodeError> {
        let ordinal = (biased as i16 - i8::MIN as i16) as usize;
        self.variants
            .get(ordinal)
            .filter(|_| ordinal < MAX_ENUM_VARIANTS)
            .copied()
            .ok_or_else(|| DecodeError::UnknownEnumOrdinal {
                type_name: any::type_name::<E>(),
                biased,
                ordinal,
                declared: self.variants.len(),
            })
    }
}

/// A key or value holding one variant of `E`, encoded as one byte.
///
/// The declaration of `E` is checked by [`Deser::check_schema`], once per accessor, rather
/// than on every encode and decode.
#[derive(From, Deref, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct DbEnumValue<E>(pub E);

impl<E: EnumVariants> Ser for DbEnumValue<E> {
    fn ser_len(&self) -> usize {
        DbByte::WIDTH
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let biased = EnumCodec::<E>::trusted().encode(self.0)?;
        DbByte::from(biased).ser(buf, offset)
    }
}
impl<E: EnumVariants> Deser for DbEnumValue<E> {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let (r_len, biased) = DbByte::deser(buf, offset, len)?;
        let variant = EnumCodec::<E>::trusted().decode(*biased)?;
        Ok((r_len, Self(variant)))
    }
    fn check_schema() -> Result<(), SchemaError> {
        EnumCodec::<E>::declared().map(|_| ())
    }
}
impl<E: EnumVariants> DbKey for DbEnumValue<E> {}
impl<E: EnumVariants> DbValue for DbEnumValue<E> {}
