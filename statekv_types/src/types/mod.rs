mod serializable;

mod bytes;
mod enum_value;
mod primitives;

mod composite;
mod foreign_key;
mod tenant_key;

mod cluster_variable;
mod column_family;

pub use serializable::*;

pub use bytes::*;
pub use enum_value::*;
pub use primitives::*;

pub use composite::*;
pub use foreign_key::*;
pub use tenant_key::*;

pub use cluster_variable::*;
pub use column_family::*;
