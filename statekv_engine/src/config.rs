use serde::Deserialize;


/// Optional checks performed by every column family accessor.
///
/// Both are off by default. They cost one or more extra store reads per write.
#[derive(Deserialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
#[serde(default)]
pub struct ConsistencyChecks {
    /// `insert` requires the key to be absent; `update` and `delete_existing` require it
    /// to be present.
    pub enable_preconditions: bool,

    /// Every foreign key inside a written key must resolve.
    pub enable_foreign_key_checks: bool,
}

impl ConsistencyChecks {
    pub fn all() -> Self {
        Self {
            enable_preconditions: true,
            enable_foreign_key_checks: true,
        }
    }
}

#[derive(Deserialize, PartialEq, Eq, Clone, Copy, Default, Debug)]
#[serde(default)]
pub struct DbConfig {
    /// Label attached to latency samples.
    pub partition_id: u32,
    pub enable_latency_metrics: bool,
    pub consistency_checks: ConsistencyChecks,
}
