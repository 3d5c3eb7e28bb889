use crate::serde::{DecodeError, OrderedInt};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;
use std::mem;


/// Every column family of the state db.
///
/// The discriminant, not the name, is written to storage as the first bytes of each key.
/// New column families are appended with the next free number; existing numbers are never
/// reassigned, even after a column family is retired.
#[repr(u16)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum ColumnFamily {
    Default = 0,
    Key = 1,

    ProcessVersion = 2,
    ProcessCache = 3,
    ProcessCacheByIdAndVersion = 4,
    ProcessCacheDigestById = 5,

    ElementInstanceParentChild = 6,
    ElementInstanceKey = 7,
    NumberOfTakenSequenceFlows = 8,

    ElementInstanceChildParent = 9,
    Variables = 10,

    Timers = 11,
    TimerDueDates = 12,

    PendingDeployment = 13,
    DeploymentRaw = 14,

    Jobs = 15,
    JobStates = 16,
    JobDeadlines = 17,
    JobActivatable = 18,

    MessageKey = 19,
    MessageDeadlines = 20,
    MessageSubscriptionByKey = 21,
    MessageSubscriptionByNameAndCorrelationKey = 22,

    Incidents = 23,
    IncidentProcessInstances = 24,
    IncidentJobs = 25,

    EventScope = 26,
    EventTrigger = 27,

    DecisionKeyByDecisionIdAndVersion = 28,
    DecisionRequirements = 29,

    Tenants = 30,
    Users = 31,
    Authorizations = 32,

    ClusterVariables = 33,
}

impl ColumnFamily {
    pub const ALL: &'static [ColumnFamily] = &[
        Self::Default,
        Self::Key,
        Self::ProcessVersion,
        Self::ProcessCache,
        Self::ProcessCacheByIdAndVersion,
        Self::ProcessCacheDigestById,
        Self::ElementInstanceParentChild,
        Self::ElementInstanceKey,
        Self::NumberOfTakenSequenceFlows,
        Self::ElementInstanceChildParent,
        Self::Variables,
        Self::Timers,
        Self::TimerDueDates,
        Self::PendingDeployment,
        Self::DeploymentRaw,
        Self::Jobs,
        Self::JobStates,
        Self::JobDeadlines,
        Self::JobActivatable,
        Self::MessageKey,
        Self::MessageDeadlines,
        Self::MessageSubscriptionByKey,
        Self::MessageSubscriptionByNameAndCorrelationKey,
        Self::Incidents,
        Self::IncidentProcessInstances,
        Self::IncidentJobs,
        Self::EventScope,
        Self::EventTrigger,
        Self::DecisionKeyByDecisionIdAndVersion,
        Self::DecisionRequirements,
        Self::Tenants,
        Self::Users,
        Self::Authorizations,
        Self::ClusterVariables,
    ];

    /// Width of [`ColumnFamily::key_prefix`].
    pub const KEY_PREFIX_LEN: usize = mem::size_of::<i64>();

    pub fn id(self) -> u16 {
        self as u16
    }

    /// The stable label used for metrics and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Key => "KEY",
            Self::ProcessVersion => "PROCESS_VERSION",
            Self::ProcessCache => "PROCESS_CACHE",
            Self::ProcessCacheByIdAndVersion => "PROCESS_CACHE_BY_ID_AND_VERSION",
            Self::ProcessCacheDigestById => "PROCESS_CACHE_DIGEST_BY_ID",
            Self::ElementInstanceParentChild => "ELEMENT_INSTANCE_PARENT_CHILD",
            Self::ElementInstanceKey => "ELEMENT_INSTANCE_KEY",
            Self::NumberOfTakenSequenceFlows => "NUMBER_OF_TAKEN_SEQUENCE_FLOWS",
            Self::ElementInstanceChildParent => "ELEMENT_INSTANCE_CHILD_PARENT",
            Self::Variables => "VARIABLES",
            Self::Timers => "TIMERS",
            Self::TimerDueDates => "TIMER_DUE_DATES",
            Self::PendingDeployment => "PENDING_DEPLOYMENT",
            Self::DeploymentRaw => "DEPLOYMENT_RAW",
            Self::Jobs => "JOBS",
            Self::JobStates => "JOB_STATES",
            Self::JobDeadlines => "JOB_DEADLINES",
            Self::JobActivatable => "JOB_ACTIVATABLE",
            Self::MessageKey => "MESSAGE_KEY",
            Self::MessageDeadlines => "MESSAGE_DEADLINES",
            Self::MessageSubscriptionByKey => "MESSAGE_SUBSCRIPTION_BY_KEY",
            Self::MessageSubscriptionByNameAndCorrelationKey => {
                "MESSAGE_SUBSCRIPTION_BY_NAME_AND_CORRELATION_KEY"
            }
            Self::Incidents => "INCIDENTS",
            Self::IncidentProcessInstances => "INCIDENT_PROCESS_INSTANCES",
            Self::IncidentJobs => "INCIDENT_JOBS",
            Self::EventScope => "EVENT_SCOPE",
            Self::EventTrigger => "EVENT_TRIGGER",
            Self::DecisionKeyByDecisionIdAndVersion => "DECISION_KEY_BY_DECISION_ID_AND_VERSION",
            Self::DecisionRequirements => "DECISION_REQUIREMENTS",
            Self::Tenants => "TENANTS",
            Self::Users => "USERS",
            Self::Authorizations => "AUTHORIZATIONS",
            Self::ClusterVariables => "CLUSTER_VARIABLES",
        }
    }

    /// The bytes every stored key of this column family starts with:
    /// the id as a [`crate::types::DbLong`].
    pub fn key_prefix(self) -> [u8; Self::KEY_PREFIX_LEN] {
        let mut prefix = [0u8; Self::KEY_PREFIX_LEN];
        (self.id() as i64).write_ordered(&mut prefix);
        prefix
    }

    /// Reads the column family a stored key belongs to.
    pub fn from_key_prefix(key: &[u8]) -> Result<Self, DecodeError> {
        if key.len() < Self::KEY_PREFIX_LEN {
            return Err(DecodeError::Truncated {
                type_name: std::any::type_name::<Self>(),
                needed: Self::KEY_PREFIX_LEN,
                available: key.len(),
            });
        }
        let id = i64::read_ordered(&key[..Self::KEY_PREFIX_LEN]);
        Self::from_i64(id).ok_or(DecodeError::UnknownColumnFamily { id })
    }
}

impl TryFrom<u16> for ColumnFamily {
    type Error = DecodeError;
    fn try_from(id: u16) -> Result<Self, DecodeError> {
        Self::from_u16(id).ok_or(DecodeError::UnknownColumnFamily { id: id as i64 })
    }
}

impl fmt::Display for ColumnFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
