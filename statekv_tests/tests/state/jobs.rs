use super::checked_db;
use anyhow::Result;
use statekv_engine::{OrderedStore, ReferentialIntegrityError};
use statekv_tests::{consistency_checker, job_deadline_key, JobState, Tables};
use statekv_types::serde::{DecodeError, OrderedInt};
use statekv_types::types::{ColumnFamily, DbEnumValue, DbForeignKey, DbLong, DbNil, DbString};

#[test]
fn job_lifecycle() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    let job = DbLong::from(2251799813685300);
    let state_key = DbForeignKey::new(job);

    assert!(tables
        .job_states
        .insert(db.store_mut(), &state_key, &DbEnumValue(JobState::Activatable))
        .unwrap_err()
        .downcast_ref::<ReferentialIntegrityError>()
        .is_some());

    tables
        .jobs
        .insert(db.store_mut(), &job, &DbString::from("payment"))?;
    tables
        .job_states
        .insert(db.store_mut(), &state_key, &DbEnumValue(JobState::Activatable))?;
    tables.job_deadlines.insert(
        db.store_mut(),
        &job_deadline_key("t1", 1_000, job.value()),
        &DbNil,
    )?;

    for state in [JobState::Activated, JobState::Failed, JobState::ErrorThrown] {
        tables
            .job_states
            .update(db.store_mut(), &state_key, &DbEnumValue(state))?;
        assert_eq!(
            Some(DbEnumValue(state)),
            tables.job_states.get(db.store(), &state_key)?
        );
    }
    assert!(consistency_checker().check(db.store())?.is_empty());

    // Removing the job leaves its state and deadline dangling.
    tables.jobs.delete_existing(db.store_mut(), &job)?;
    let errs = consistency_checker().check(db.store())?;
    assert_eq!(
        vec![ColumnFamily::JobStates, ColumnFamily::JobDeadlines],
        errs.iter().map(|err| err.column_family).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn unknown_stored_state() -> Result<()> {
    let mut db = checked_db();
    let mut tables = Tables::new(&db)?;

    let job = DbLong::from(1);
    tables
        .jobs
        .insert(db.store_mut(), &job, &DbString::from("payment"))?;

    // A state written by a schema declaring more variants.
    let mut stored_key = ColumnFamily::JobStates.key_prefix().to_vec();
    let mut job_bytes = [0u8; 8];
    1i64.write_ordered(&mut job_bytes);
    stored_key.extend(job_bytes);
    db.store_mut().put(&stored_key, &[4])?;

    let err = tables
        .job_states
        .get(db.store(), &DbForeignKey::new(job))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DecodeError>(),
        Some(DecodeError::UnknownEnumOrdinal {
            ordinal: 4,
            declared: 4,
            ..
        })
    ));
    Ok(())
}
