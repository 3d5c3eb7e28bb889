//! A small process-engine schema shared by the integration tests.

use anyhow::Result;
use statekv_engine::consistency::ConsistencyChecker;
use statekv_engine::{ColumnFamilyAccessor, OrderedStore, StateDb};
use statekv_types::types::{
    skip_negative, ClusterVariableKey, ColumnFamily, DbBytes, DbCompositeKey, DbEnumValue,
    DbForeignKey, DbLong, DbNil, DbString, DbTenantAwareKey, EnumVariants, ForeignKeyTarget,
    MatchType, Prefix, Suffix,
};

/* References */

pub struct ElementInstanceRef;
impl ForeignKeyTarget for ElementInstanceRef {
    type Key = DbLong;
    const COLUMN_FAMILY: ColumnFamily = ColumnFamily::ElementInstanceKey;
    fn skip(key: &DbLong) -> bool {
        skip_negative(key)
    }
}

pub struct JobRef;
impl ForeignKeyTarget for JobRef {
    type Key = DbLong;
    const COLUMN_FAMILY: ColumnFamily = ColumnFamily::Jobs;
}

/// Any version of a process, by tenant and process id.
pub struct ProcessIdRef;
impl ForeignKeyTarget for ProcessIdRef {
    type Key = DbTenantAwareKey<DbString, Prefix>;
    const COLUMN_FAMILY: ColumnFamily = ColumnFamily::ProcessCacheByIdAndVersion;
    const MATCH_TYPE: MatchType = MatchType::Prefix;
    fn skip(key: &Self::Key) -> bool {
        key.inner.is_empty()
    }
}

/* Keys */

pub type ElementInstanceKey = DbLong;

/// (scope, name). A negative scope is a process-less variable.
pub type VariableKey = DbCompositeKey<DbForeignKey<ElementInstanceRef>, DbString>;

pub type JobKey = DbLong;
pub type JobStateKey = DbForeignKey<JobRef>;

/// (deadline, job), ordered by deadline across tenants.
pub type JobDeadlineKey = DbTenantAwareKey<DbCompositeKey<DbLong, DbForeignKey<JobRef>>, Suffix>;

/// (tenant, process id, version).
pub type ProcessIdAndVersionKey = DbTenantAwareKey<DbCompositeKey<DbString, DbLong>, Prefix>;

pub type ProcessVersionKey = DbForeignKey<ProcessIdRef>;

/* Values */

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum JobState {
    Activatable,
    Activated,
    Failed,
    ErrorThrown,
}
impl EnumVariants for JobState {
    const VARIANTS: &'static [Self] = &[
        Self::Activatable,
        Self::Activated,
        Self::Failed,
        Self::ErrorThrown,
    ];
}

/* Tables */

pub struct Tables {
    pub element_instances: ColumnFamilyAccessor<ElementInstanceKey, DbString>,
    pub variables: ColumnFamilyAccessor<VariableKey, DbBytes>,
    pub jobs: ColumnFamilyAccessor<JobKey, DbString>,
    pub job_states: ColumnFamilyAccessor<JobStateKey, DbEnumValue<JobState>>,
    pub job_deadlines: ColumnFamilyAccessor<JobDeadlineKey, DbNil>,
    pub processes: ColumnFamilyAccessor<ProcessIdAndVersionKey, DbLong>,
    pub process_versions: ColumnFamilyAccessor<ProcessVersionKey, DbLong>,
    pub cluster_variables: ColumnFamilyAccessor<ClusterVariableKey, DbString>,
}

impl Tables {
    pub fn new<S: OrderedStore>(db: &StateDb<S>) -> Result<Self> {
        Ok(Self {
            element_instances: db.column_family(ColumnFamily::ElementInstanceKey)?,
            variables: db.column_family(ColumnFamily::Variables)?,
            jobs: db.column_family(ColumnFamily::Jobs)?,
            job_states: db.column_family(ColumnFamily::JobStates)?,
            job_deadlines: db.column_family(ColumnFamily::JobDeadlines)?,
            processes: db.column_family(ColumnFamily::ProcessCacheByIdAndVersion)?,
            process_versions: db.column_family(ColumnFamily::ProcessVersion)?,
            cluster_variables: db.column_family(ColumnFamily::ClusterVariables)?,
        })
    }
}

pub fn consistency_checker() -> ConsistencyChecker {
    let mut checker = ConsistencyChecker::new();
    checker
        .register::<VariableKey>(ColumnFamily::Variables)
        .register::<JobStateKey>(ColumnFamily::JobStates)
        .register::<JobDeadlineKey>(ColumnFamily::JobDeadlines)
        .register::<ProcessVersionKey>(ColumnFamily::ProcessVersion);
    checker
}

/* Key constructors */

pub fn variable_key(scope: i64, name: &str) -> VariableKey {
    DbCompositeKey::new(DbForeignKey::new(DbLong::from(scope)), DbString::from(name))
}

pub fn job_deadline_key(tenant: &str, deadline: i64, job: i64) -> JobDeadlineKey {
    DbTenantAwareKey::new(
        tenant,
        DbCompositeKey::new(DbLong::from(deadline), DbForeignKey::new(DbLong::from(job))),
    )
}

pub fn process_key(tenant: &str, process_id: &str, version: i64) -> ProcessIdAndVersionKey {
    DbTenantAwareKey::new(
        tenant,
        DbCompositeKey::new(DbString::from(process_id), DbLong::from(version)),
    )
}

pub fn process_version_key(tenant: &str, process_id: &str) -> ProcessVersionKey {
    DbForeignKey::new(DbTenantAwareKey::new(tenant, DbString::from(process_id)))
}
