mod cluster_variables;
mod foreign_keys;
mod instrumentation;
mod jobs;
mod tenants;

use statekv_engine::{ConsistencyChecks, DbConfig, MemStore, StateDb};

pub fn checked_db() -> StateDb<MemStore> {
    let config = DbConfig {
        partition_id: 1,
        consistency_checks: ConsistencyChecks::all(),
        ..DbConfig::default()
    };
    StateDb::new(MemStore::new(), config)
}

pub fn unchecked_db() -> StateDb<MemStore> {
    let config = DbConfig {
        partition_id: 1,
        ..DbConfig::default()
    };
    StateDb::new(MemStore::new(), config)
}
