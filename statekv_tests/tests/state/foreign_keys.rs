use super::{checked_db, unchecked_db};
use anyhow::Result;
use statekv_engine::ReferentialIntegrityError;
use statekv_tests::{
    consistency_checker, process_key, process_version_key, variable_key, Tables,
};
use statekv_types::types::{ColumnFamily, DbBytes, DbLong, DbString, MatchType, Ser};

#[test]
fn rejected_on_write() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    let key = variable_key(100, "order");
    let err = tables
        .variables
        .upsert(db.store_mut(), &key, &DbBytes(vec![1]))
        .unwrap_err();
    assert_eq!(
        Some(&ReferentialIntegrityError {
            column_family: ColumnFamily::Variables,
            key: key.ser_solo()?.into(),
            target: ColumnFamily::ElementInstanceKey,
            match_type: MatchType::Full,
            reference: DbLong::from(100).ser_solo()?.into(),
        }),
        err.downcast_ref::<ReferentialIntegrityError>()
    );
    assert!(tables.variables.is_empty(db.store()));

    tables.element_instances.insert(
        db.store_mut(),
        &DbLong::from(100),
        &DbString::from("task"),
    )?;
    tables
        .variables
        .upsert(db.store_mut(), &key, &DbBytes(vec![1]))?;
    assert_eq!(
        Some(DbBytes(vec![1])),
        tables.variables.get(db.store(), &key)?
    );
    Ok(())
}

#[test]
fn skipped_reference_is_not_checked() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    tables
        .variables
        .insert(db.store_mut(), &variable_key(-1, "global"), &DbBytes(vec![]))?;
    assert_eq!(1, tables.variables.count(db.store()));
    assert!(consistency_checker().check(db.store())?.is_empty());
    Ok(())
}

#[test]
fn prefix_match() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    let latest = process_version_key("t1", "order-process");
    assert!(tables
        .process_versions
        .upsert(db.store_mut(), &latest, &DbLong::from(3))
        .is_err());

    // Any version of the process satisfies the reference.
    tables.processes.insert(
        db.store_mut(),
        &process_key("t1", "order-process", 3),
        &DbLong::from(2251799813685249),
    )?;
    tables
        .process_versions
        .upsert(db.store_mut(), &latest, &DbLong::from(3))?;

    // Same process id, other tenant.
    let other_tenant = process_version_key("t2", "order-process");
    assert!(tables
        .process_versions
        .upsert(db.store_mut(), &other_tenant, &DbLong::from(1))
        .is_err());

    // A process id that is a strict prefix of a stored one is not a match, since ids are
    // length-prefixed.
    let truncated = process_version_key("t1", "order");
    assert!(tables
        .process_versions
        .upsert(db.store_mut(), &truncated, &DbLong::from(1))
        .is_err());
    Ok(())
}

#[test]
fn full_scan_after_delete() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    for scope in [1, 2] {
        tables.element_instances.insert(
            db.store_mut(),
            &DbLong::from(scope),
            &DbString::from("task"),
        )?;
        for name in ["a", "b"] {
            tables.variables.insert(
                db.store_mut(),
                &variable_key(scope, name),
                &DbBytes(vec![]),
            )?;
        }
    }
    let checker = consistency_checker();
    assert!(checker.check(db.store())?.is_empty());

    // Deletion is not checked against referrers.
    tables
        .element_instances
        .delete_existing(db.store_mut(), &DbLong::from(2))?;

    let errs = checker.check(db.store())?;
    assert_eq!(2, errs.len());
    for (err, name) in errs.iter().zip(["a", "b"]) {
        assert_eq!(ColumnFamily::Variables, err.column_family);
        assert_eq!(variable_key(2, name).ser_solo()?, *err.key);
        assert_eq!(ColumnFamily::ElementInstanceKey, err.target);
        assert_eq!(DbLong::from(2).ser_solo()?, *err.reference);
    }
    Ok(())
}

#[test]
fn unchecked_writes_are_found_by_scan() -> Result<()> {
    let mut db = unchecked_db();
    let mut tables = Tables::new(&db)?;

    tables
        .variables
        .insert(db.store_mut(), &variable_key(7, "x"), &DbBytes(vec![]))?;
    tables.process_versions.insert(
        db.store_mut(),
        &process_version_key("t1", "missing"),
        &DbLong::from(1),
    )?;
    tables.process_versions.insert(
        db.store_mut(),
        &process_version_key("t1", ""),
        &DbLong::from(1),
    )?;

    let errs = consistency_checker().check(db.store())?;
    assert_eq!(
        vec![
            (ColumnFamily::Variables, ColumnFamily::ElementInstanceKey, MatchType::Full),
            (
                ColumnFamily::ProcessVersion,
                ColumnFamily::ProcessCacheByIdAndVersion,
                MatchType::Prefix
            ),
        ],
        errs.iter()
            .map(|err| (err.column_family, err.target, err.match_type))
            .collect::<Vec<_>>()
    );
    Ok(())
}
