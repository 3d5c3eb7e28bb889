//! # Serialization format
//!
//! Every key and value stored in the state db is a flat concatenation of
//! primitive encodings. There are no type tags, no separators, and no length
//! prefixes other than the ones listed below; the schema of a column family
//! alone determines how its bytes are split.
//!
//! The backing store orders entries by unsigned byte-lexicographic comparison
//! of their keys. All signed integers are therefore written big-endian with the
//! sign bit inverted, which makes that comparison agree with numeric order over
//! the whole domain, negatives included.
//!
//! ```text
//! struct DbByte  { body: [u8; 1] }    // i8,  sign bit inverted
//! struct DbShort { body: [u8; 2] }    // i16, big-endian, sign bit inverted
//! struct DbInt   { body: [u8; 4] }    // i32, big-endian, sign bit inverted
//! struct DbLong  { body: [u8; 8] }    // i64, big-endian, sign bit inverted
//!
//! struct DbBytes {
//!     body:   [u8; window_len],       // length implied by the enclosing schema
//! }
//!
//! struct DbString {
//!     body_len:   [u8; 4],            // u32, big-endian
//!     body:       [u8; body_len],     // UTF-8
//! }
//!
//! struct DbNil {
//!     sentinel:   u8,                 // value is irrelevant; presence is the datum
//! }
//!
//! struct DbEnumValue {
//!     biased:     DbByte,             // ordinal + i8::MIN
//! }
//!
//! struct DbCompositeKey<A, B> {
//!     first:      A,
//!     second:     B,
//! }
//!
//! struct DbTenantAwareKey<K> {        // Prefix placement
//!     tenant:     DbString,
//!     inner:      K,
//! }
//! struct DbTenantAwareKey<K> {        // Suffix placement
//!     inner:      K,
//!     tenant:     DbString,
//! }
//! ```
//!
//! Keys written to the store are additionally preceded by their column family's
//! id, encoded as a `DbLong`. See [`crate::types::ColumnFamily::key_prefix`].

mod errors;
mod lengths;
mod ordered;


pub use errors::*;
pub use lengths::*;
pub use ordered::*;
