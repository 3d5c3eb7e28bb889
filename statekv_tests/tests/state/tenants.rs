use super::unchecked_db;
use anyhow::Result;
use statekv_tests::{job_deadline_key, process_key, Tables};
use statekv_types::types::{DbLong, DbNil, DbString};

#[test]
fn suffix_placement_scans_across_tenants() -> Result<()> {
    let mut db = unchecked_db();
    let mut tables = Tables::new(&db)?;

    let deadlines = [("t2", 300, 1), ("t1", 100, 2), ("t2", 50, 3), ("t3", 200, 4)];
    for (tenant, deadline, job) in deadlines {
        let key = job_deadline_key(tenant, deadline, job);
        tables.job_deadlines.insert(db.store_mut(), &key, &DbNil)?;
    }

    // Deadlines expire in order no matter which tenant owns the job.
    let mut expired = vec![];
    tables.job_deadlines.while_true(db.store(), None, |key, _| {
        let deadline = key.inner.first.value();
        if deadline > 250 {
            return Ok(false);
        }
        expired.push((key.tenant.to_string(), deadline));
        Ok(true)
    })?;
    assert_eq!(
        vec![
            (String::from("t2"), 50),
            (String::from("t1"), 100),
            (String::from("t3"), 200),
        ],
        expired
    );
    Ok(())
}

#[test]
fn prefix_placement_groups_tenants() -> Result<()> {
    let mut db = unchecked_db();
    let mut tables = Tables::new(&db)?;

    let processes = [
        ("t2", "b", 1),
        ("t1", "b", 1),
        ("t2", "a", 2),
        ("t1", "a", 1),
        ("t2", "a", 1),
    ];
    for (i, (tenant, process_id, version)) in processes.into_iter().enumerate() {
        let key = process_key(tenant, process_id, version);
        tables
            .processes
            .insert(db.store_mut(), &key, &DbLong::from(i as i64))?;
    }

    let mut all = vec![];
    tables.processes.for_each(db.store(), |key, _| {
        all.push((
            key.tenant.to_string(),
            key.inner.first.to_string(),
            key.inner.second.value(),
        ));
        Ok(())
    })?;
    assert_eq!(
        vec![
            (String::from("t1"), String::from("a"), 1),
            (String::from("t1"), String::from("b"), 1),
            (String::from("t2"), String::from("a"), 1),
            (String::from("t2"), String::from("a"), 2),
            (String::from("t2"), String::from("b"), 1),
        ],
        all
    );

    // One tenant can be scanned on its own.
    let mut t2 = vec![];
    tables
        .processes
        .while_equal_prefix(db.store(), &DbString::from("t2"), |key, value| {
            t2.push((key.inner.first.to_string(), value.value()));
            Ok(true)
        })?;
    assert_eq!(
        vec![
            (String::from("a"), 4),
            (String::from("a"), 2),
            (String::from("b"), 0),
        ],
        t2
    );
    Ok(())
}
