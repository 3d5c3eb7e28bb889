use thiserror::Error;

/// A schema was declared in a way that can never be encoded correctly.
///
/// Raised while schemas are being set up. A process that sees one of these should not start.
#[derive(Error, PartialEq, Eq, Debug)]
pub enum SchemaError {
    #[error("Enum {type_name} declares no variants")]
    EmptyEnum { type_name: &'static str },

    #[error("Enum {type_name} declares {count} variants; at most {max} fit in one byte")]
    TooManyEnumVariants {
        type_name: &'static str,
        count: usize,
        max: usize,
    },

    #[error("Enum {type_name} declares variant {variant} more than once")]
    DuplicateEnumVariant {
        type_name: &'static str,
        variant: String,
    },

    #[error("Enum {type_name} has no declared position for variant {variant}")]
    UndeclaredEnumVariant {
        type_name: &'static str,
        variant: String,
    },
}

/// Stored bytes could not be decoded into the expected type.
///
/// Either the storage is corrupt or the schema changed incompatibly. Never coerced to a default.
#[derive(Error, PartialEq, Eq, Debug)]
pub enum DecodeError {
    #[error("Decoding {type_name} requires {needed} bytes but only {available} are available")]
    Truncated {
        type_name: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Decoding {type_name} consumed {consumed} of {available} bytes")]
    TrailingBytes {
        type_name: &'static str,
        consumed: usize,
        available: usize,
    },

    #[error("Biased byte {biased} of enum {type_name} maps to ordinal {ordinal}, but only {declared} variants are declared")]
    UnknownEnumOrdinal {
        type_name: &'static str,
        biased: i8,
        ordinal: usize,
        declared: usize,
    },

    #[error("Decoding {type_name}: {source}")]
    InvalidUtf8 {
        type_name: &'static str,
        source: std::str::Utf8Error,
    },

    #[error("Unknown column family id {id}")]
    UnknownColumnFamily { id: i64 },
}

/// A value could not be written into the destination buffer.
#[derive(Error, PartialEq, Eq, Debug)]
pub enum EncodeError {
    #[error("Encoding {type_name} requires {needed} bytes but only {available} are available")]
    BufferTooSmall {
        type_name: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("{type_name} body of {len} bytes does not fit its length prefix")]
    LengthOverflow { type_name: &'static str, len: usize },
}

/// A business key was constructed, or decoded, in a state its schema forbids.
#[derive(Error, PartialEq, Eq, Debug)]
pub enum InvariantViolation {
    #[error("A GLOBAL cluster variable must not name a tenant, got {tenant:?}")]
    GlobalScopeWithTenant { tenant: String },

    #[error("A TENANT cluster variable must name a tenant")]
    TenantScopeWithoutTenant,
}
