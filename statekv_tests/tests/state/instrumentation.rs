use anyhow::Result;
use itertools::Itertools;
use statekv_engine::metrics::{DbOperation, LatencyRecorder, LatencySample};
use statekv_engine::{ConsistencyChecks, DbConfig, MemStore, OrderedStore, StateDb};
use statekv_tests::{variable_key, Tables};
use statekv_types::types::{ColumnFamily, DbBytes, DbLong, DbString};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CollectingRecorder {
    samples: Mutex<Vec<LatencySample>>,
}
impl LatencyRecorder for CollectingRecorder {
    fn record(&self, sample: LatencySample) {
        self.samples.lock().unwrap().push(sample);
    }
}

/// Runs a fixed workload, returning everything it observed.
fn run_workload(db: &mut StateDb<MemStore>) -> Result<Vec<String>> {
    let mut tables = Tables::new(db)?;
    let mut observed = vec![];

    tables
        .element_instances
        .insert(db.store_mut(), &DbLong::from(1), &DbString::from("task"))?;
    for name in ["b", "a", "c"] {
        tables
            .variables
            .insert(db.store_mut(), &variable_key(1, name), &DbBytes(name.into()))?;
    }
    let res = tables
        .variables
        .insert(db.store_mut(), &variable_key(2, "x"), &DbBytes(vec![]));
    observed.push(format!("{:?}", res.map_err(|e| e.to_string())));

    let res = tables
        .variables
        .insert(db.store_mut(), &variable_key(1, "a"), &DbBytes(vec![]));
    observed.push(format!("{:?}", res.map_err(|e| e.to_string())));

    tables.variables.for_each(db.store(), |key, value| {
        observed.push(format!("{key:?} {value:?}"));
        Ok(())
    })?;
    let removed = tables
        .variables
        .delete_if_exists(db.store_mut(), &variable_key(1, "b"))?;
    observed.push(format!("{removed}"));
    let value = tables.variables.get(db.store(), &variable_key(1, "b"))?;
    observed.push(format!("{value:?}"));

    let raw = db
        .store()
        .iter_from(&[])
        .map(|(k, v)| format!("{k:?}={v:?}"))
        .collect_vec();
    observed.extend(raw);

    Ok(observed)
}

fn config(enable_latency_metrics: bool) -> DbConfig {
    DbConfig {
        partition_id: 4,
        enable_latency_metrics,
        consistency_checks: ConsistencyChecks::all(),
    }
}

#[test]
fn results_do_not_depend_on_instrumentation() -> Result<()> {
    let recorder = Arc::new(CollectingRecorder::default());

    let mut noop_db = StateDb::with_recorder(MemStore::new(), config(false), recorder.clone());
    let noop_observed = run_workload(&mut noop_db)?;
    assert!(recorder.samples.lock().unwrap().is_empty());

    let mut timed_db = StateDb::with_recorder(MemStore::new(), config(true), recorder.clone());
    let timed_observed = run_workload(&mut timed_db)?;

    assert_eq!(noop_observed, timed_observed);
    assert!(!recorder.samples.lock().unwrap().is_empty());
    Ok(())
}

#[test]
fn samples_are_labelled() -> Result<()> {
    let recorder = Arc::new(CollectingRecorder::default());
    let mut db = StateDb::with_recorder(MemStore::new(), config(true), recorder.clone());
    run_workload(&mut db)?;

    let samples = recorder.samples.lock().unwrap();
    assert!(samples.iter().all(|sample| sample.partition_id == 4));

    let variable_ops = samples
        .iter()
        .filter(|sample| sample.column_family == ColumnFamily::Variables)
        .map(|sample| sample.operation)
        .counts();
    // 3 successful inserts, each with an existence check.
    // 1 insert rejected by its foreign key after its existence check.
    // 1 insert rejected by its existence check.
    assert_eq!(Some(&3), variable_ops.get(&DbOperation::Put));
    assert_eq!(Some(&(5 + 1)), variable_ops.get(&DbOperation::Get));
    assert_eq!(Some(&1), variable_ops.get(&DbOperation::Delete));
    assert_eq!(Some(&1), variable_ops.get(&DbOperation::Iterate));
    Ok(())
}
