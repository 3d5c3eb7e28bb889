use crate::serde::{DecodeError, SchemaError, WriteLen};
use crate::types::{DbKey, DbString, Deser, ForeignKey, Ser};
use anyhow::Result;
use std::any;
use std::fmt;
use std::marker::PhantomData;


/// Where the tenant id goes relative to the inner key.
///
/// - [`PlacementType::Prefix`] keeps each tenant's entries contiguous, so one tenant can be
///   range-scanned cheaply. A scan without a tenant filter, however, visits tenants in id
///   order, which starves later tenants in "oldest matching entry first" scans.
/// - [`PlacementType::Suffix`] orders entries by the inner key across all tenants, at the
///   cost of not being able to range-scan a single tenant.
///
/// A schema must keep its placement forever; changing it reorders existing data.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum PlacementType {
    Prefix,
    Suffix,
}

pub trait Placement: 'static {
    const TYPE: PlacementType;
}

/// Tenant id first.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Prefix;
impl Placement for Prefix {
    const TYPE: PlacementType = PlacementType::Prefix;
}

/// Tenant id last.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Suffix;
impl Placement for Suffix {
    const TYPE: PlacementType = PlacementType::Suffix;
}

/// An inner key scoped to a tenant. The placement is fixed by `P`.
pub struct DbTenantAwareKey<K, P> {
    pub tenant: DbString,
    pub inner: K,
    _placement: PhantomData<P>,
}

impl<K, P: Placement> DbTenantAwareKey<K, P> {
    pub fn new(tenant: impl Into<DbString>, inner: K) -> Self {
        Self {
            tenant: tenant.into(),
            inner,
            _placement: PhantomData,
        }
    }

    pub fn placement(&self) -> PlacementType {
        P::TYPE
    }
}

impl<K: Ser, P: Placement> Ser for DbTenantAwareKey<K, P> {
    fn ser_len(&self) -> usize {
        self.tenant.ser_len() + self.inner.ser_len()
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        let mut w_len = 0;
        match P::TYPE {
            PlacementType::Prefix => {
                w_len += *self.tenant.ser(buf, offset)?;
                w_len += *self.inner.ser(buf, offset + w_len)?;
            }
            PlacementType::Suffix => {
                w_len += *self.inner.ser(buf, offset)?;
                w_len += *self.tenant.ser(buf, offset + w_len)?;
            }
        }
        Ok(WriteLen::new_manual(w_len))
    }
}

impl<K: Deser, P: Placement> Deser for DbTenantAwareKey<K, P> {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let remaining = |r_len: usize| {
            len.checked_sub(r_len).ok_or(DecodeError::Truncated {
                type_name: any::type_name::<Self>(),
                needed: r_len,
                available: len,
            })
        };
        let (r_len, tenant, inner) = match P::TYPE {
            PlacementType::Prefix => {
                let (tenant_r_len, tenant) = DbString::deser(buf, offset, len)?;
                let (inner_r_len, inner) =
                    K::deser(buf, offset + tenant_r_len, remaining(tenant_r_len)?)?;
                (tenant_r_len + inner_r_len, tenant, inner)
            }
            PlacementType::Suffix => {
                let (inner_r_len, inner) = K::deser(buf, offset, len)?;
                let (tenant_r_len, tenant) =
                    DbString::deser(buf, offset + inner_r_len, remaining(inner_r_len)?)?;
                (inner_r_len + tenant_r_len, tenant, inner)
            }
        };
        Ok((r_len, Self::new(tenant, inner)))
    }
    fn check_schema() -> Result<(), SchemaError> {
        K::check_schema()
    }
}

impl<K: DbKey, P: Placement> DbKey for DbTenantAwareKey<K, P> {
    fn contained_foreign_keys(&self) -> Vec<&dyn ForeignKey> {
        self.inner.contained_foreign_keys()
    }
}

impl<K: PartialEq, P> PartialEq for DbTenantAwareKey<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.tenant == other.tenant && self.inner == other.inner
    }
}
impl<K: Eq, P> Eq for DbTenantAwareKey<K, P> {}
impl<K: Clone, P> Clone for DbTenantAwareKey<K, P> {
    fn clone(&self) -> Self {
        Self {
            tenant: self.tenant.clone(),
            inner: self.inner.clone(),
            _placement: PhantomData,
        }
    }
}
impl<K: fmt::Debug, P: Placement> fmt::Debug for DbTenantAwareKey<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbTenantAwareKey")
            .field("placement", &P::TYPE)
            .field("tenant", &self.tenant)
            .field("inner", &self.inner)
            .finish()
    }
}
