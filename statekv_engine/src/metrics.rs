//! Latency instrumentation around the store calls made by column family accessors.
//!
//! Instrumentation observes, and never alters, what an accessor does: every accessor
//! behaves identically with [`NoopColumnFamilyMetrics`] and [`LatencyColumnFamilyMetrics`].

use metrics::{describe_histogram, histogram, Unit};
use statekv_types::types::ColumnFamily;
use std::sync::Arc;
use std::time::{Duration, Instant};


pub const LATENCY_HISTOGRAM: &str = "statekv_column_family_latency_seconds";

pub fn describe_metrics() {
    describe_histogram!(
        LATENCY_HISTOGRAM,
        Unit::Seconds,
        "Latency of store operations issued by column family accessors"
    );
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum DbOperation {
    Get,
    Put,
    Delete,
    Iterate,
}

impl DbOperation {
    /// The metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Iterate => "iterate",
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LatencySample {
    pub partition_id: u32,
    pub column_family: ColumnFamily,
    pub operation: DbOperation,
    pub duration: Duration,
}

/// The sink of latency samples. Shared by all accessors, and possibly all partitions.
pub trait LatencyRecorder: Send + Sync {
    fn record(&self, sample: LatencySample);
}

/// Forwards samples to the process-wide `metrics` recorder.
#[derive(Default, Debug)]
pub struct MetricsRecorder;

impl LatencyRecorder for MetricsRecorder {
    fn record(&self, sample: LatencySample) {
        histogram!(
            LATENCY_HISTOGRAM,
            "partition" => sample.partition_id.to_string(),
            "column_family" => sample.column_family.name(),
            "operation" => sample.operation.as_str()
        )
        .record(sample.duration.as_secs_f64());
    }
}

struct Started<'a> {
    start: Instant,
    partition_id: u32,
    column_family: ColumnFamily,
    operation: DbOperation,
    recorder: &'a dyn LatencyRecorder,
}

/// Returned by [`ColumnFamilyMetrics::measure`]. Nothing is recorded unless it is stopped.
#[must_use]
pub struct StopHandle<'a> {
    started: Option<Started<'a>>,
}

impl<'a> StopHandle<'a> {
    pub fn inert() -> Self {
        Self { started: None }
    }

    pub fn is_inert(&self) -> bool {
        self.started.is_none()
    }

    pub fn stop(self) {
        if let Some(started) = self.started {
            started.recorder.record(LatencySample {
                partition_id: started.partition_id,
                column_family: started.column_family,
                operation: started.operation,
                duration: started.start.elapsed(),
            });
        }
    }
}

pub trait ColumnFamilyMetrics {
    fn measure(&self, operation: DbOperation) -> StopHandle<'_>;
}

#[derive(Default, Debug)]
pub struct NoopColumnFamilyMetrics;

impl ColumnFamilyMetrics for NoopColumnFamilyMetrics {
    fn measure(&self, _operation: DbOperation) -> StopHandle<'_> {
        StopHandle::inert()
    }
}

/// Times operations on one column family of one partition.
pub struct LatencyColumnFamilyMetrics {
    partition_id: u32,
    column_family: ColumnFamily,
    recorder: Arc<dyn LatencyRecorder>,
}

impl LatencyColumnFamilyMetrics {
    pub fn new(
        partition_id: u32,
        column_family: ColumnFamily,
        recorder: Arc<dyn LatencyRecorder>,
    ) -> Self {
        Self {
            partition_id,
            column_family,
            recorder,
        }
    }
}

impl ColumnFamilyMetrics for LatencyColumnFamilyMetrics {
    fn measure(&self, operation: DbOperation) -> StopHandle<'_> {
        StopHandle {
            started: Some(Started {
                start: Instant::now(),
                partition_id: self.partition_id,
                column_family: self.column_family,
                operation,
                recorder: self.recorder.as_ref(),
            }),
        }
    }
}
