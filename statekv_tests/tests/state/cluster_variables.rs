use super::checked_db;
use anyhow::Result;
use statekv_tests::Tables;
use statekv_types::serde::InvariantViolation;
use statekv_types::types::{ClusterVariableKey, ClusterVariableScope, DbString};

#[test]
fn scoped_scans() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    let vars = [
        ClusterVariableKey::for_tenant("timeout", "t2")?,
        ClusterVariableKey::global("timeout"),
        ClusterVariableKey::for_tenant("retries", "t1")?,
        ClusterVariableKey::global("retries"),
        ClusterVariableKey::for_tenant("timeout", "t1")?,
    ];
    for key in vars.iter() {
        let value = DbString::from(format!("{}/{}", key.tenant(), key.name()));
        tables.cluster_variables.insert(db.store_mut(), key, &value)?;
    }

    let mut all = vec![];
    tables.cluster_variables.for_each(db.store(), |_key, value| {
        all.push(value.to_string());
        Ok(())
    })?;
    assert_eq!(
        vec!["/retries", "/timeout", "t1/retries", "t1/timeout", "t2/timeout"],
        all
    );

    let mut t1 = vec![];
    let prefix = ClusterVariableKey::scope_prefix(ClusterVariableScope::Tenant, "t1")?;
    tables
        .cluster_variables
        .while_equal_prefix(db.store(), &prefix, |key, _value| {
            t1.push(key.name().to_owned());
            Ok(true)
        })?;
    assert_eq!(vec!["retries", "timeout"], t1);

    let mut global = vec![];
    let prefix = ClusterVariableKey::scope_prefix(ClusterVariableScope::Global, "")?;
    tables
        .cluster_variables
        .while_equal_prefix(db.store(), &prefix, |key, _value| {
            assert_eq!(ClusterVariableScope::Global, key.scope());
            global.push(key.name().to_owned());
            Ok(true)
        })?;
    assert_eq!(vec!["retries", "timeout"], global);
    Ok(())
}

#[test]
fn scope_invariant() {
    assert!(matches!(
        ClusterVariableKey::new("timeout", ClusterVariableScope::Global, "t1"),
        Err(InvariantViolation::GlobalScopeWithTenant { .. })
    ));
    assert!(matches!(
        ClusterVariableKey::scope_prefix(ClusterVariableScope::Tenant, ""),
        Err(InvariantViolation::TenantScopeWithoutTenant)
    ));
}
