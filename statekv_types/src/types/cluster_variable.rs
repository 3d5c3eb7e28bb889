use crate::serde::{InvariantViolation, SchemaError, WriteLen};
use crate::types::{DbCompositeKey, DbEnumValue, DbKey, DbString, Deser, EnumVariants, Ser};
use anyhow::Result;


/// Who a cluster variable is visible to.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum ClusterVariableScope {
    Global,
    Tenant,
}
impl EnumVariants for ClusterVariableScope {
    const VARIANTS: &'static [Self] = &[Self::Global, Self::Tenant];
}

type ClusterVariableKeyLayout =
    DbCompositeKey<DbCompositeKey<DbEnumValue<ClusterVariableScope>, DbString>, DbString>;

/// Key of [`crate::types::ColumnFamily::ClusterVariables`]: `(scope, tenant, name)`.
///
/// All global variables sort before all tenant variables, and each tenant's variables are
/// contiguous, so both can be scanned by prefix.
///
/// A `Global` key never names a tenant and a `Tenant` key always does. Both are checked
/// on construction and on decoding.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ClusterVariableKey {
    layout: ClusterVariableKeyLayout,
}

impl ClusterVariableKey {
    pub fn new(
        name: impl Into<DbString>,
        scope: ClusterVariableScope,
        tenant: impl Into<DbString>,
    ) -> Result<Self, InvariantViolation> {
        let name = name.into();
        let tenant = tenant.into();
        Self::validate(scope, &tenant)?;
        Ok(Self {
            layout: DbCompositeKey::new(DbCompositeKey::new(DbEnumValue(scope), tenant), name),
        })
    }

    pub fn global(name: impl Into<DbString>) -> Self {
        let layout = DbCompositeKey::new(
            DbCompositeKey::new(DbEnumValue(ClusterVariableScope::Global), DbString::default()),
            name.into(),
        );
        Self { layout }
    }

    pub fn for_tenant(
        name: impl Into<DbString>,
        tenant: impl Into<DbString>,
    ) -> Result<Self, InvariantViolation> {
        Self::new(name, ClusterVariableScope::Tenant, tenant)
    }

    fn validate(scope: ClusterVariableScope, tenant: &DbString) -> Result<(), InvariantViolation> {
        match scope {
            ClusterVariableScope::Global if !tenant.is_empty() => {
                Err(InvariantViolation::GlobalScopeWithTenant {
                    tenant: tenant.to_string(),
                })
            }
            ClusterVariableScope::Tenant if tenant.is_empty() => {
                Err(InvariantViolation::TenantScopeWithoutTenant)
            }
            _ => Ok(()),
        }
    }

    pub fn name(&self) -> &str {
        self.layout.second.as_str()
    }
    pub fn scope(&self) -> ClusterVariableScope {
        *self.layout.first.first
    }
    pub fn tenant(&self) -> &str {
        self.layout.first.second.as_str()
    }

    /// The leading components shared by every variable of `scope` and `tenant`,
    /// for prefix scans.
    pub fn scope_prefix(
        scope: ClusterVariableScope,
        tenant: impl Into<DbString>,
    ) -> Result<DbCompositeKey<DbEnumValue<ClusterVariableScope>, DbString>, InvariantViolation> {
        let tenant = tenant.into();
        Self::validate(scope, &tenant)?;
        Ok(DbCompositeKey::new(DbEnumValue(scope), tenant))
    }
}

impl Ser for ClusterVariableKey {
    fn ser_len(&self) -> usize {
        self.layout.ser_len()
    }
    fn ser(&self, buf: &mut [u8], offset: usize) -> Result<WriteLen> {
        self.layout.ser(buf, offset)
    }
}
impl Deser for ClusterVariableKey {
    fn deser(buf: &[u8], offset: usize, len: usize) -> Result<(usize, Self)> {
        let (r_len, layout) = ClusterVariableKeyLayout::deser(buf, offset, len)?;
        Self::validate(*layout.first.first, &layout.first.second)?;
        Ok((r_len, Self { layout }))
    }
    fn check_schema() -> Result<(), SchemaError> {
        ClusterVariableKeyLayout::check_schema()
    }
}
impl DbKey for ClusterVariableKey {}
