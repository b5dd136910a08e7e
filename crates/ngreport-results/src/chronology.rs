//! Execution chronology of a test run
//!
//! Reconstructs, per execution thread, the ordered sequence of method
//! invocations, and derives suite-wide bounds, a cumulative moving average
//! of method duration, and the preceding-execution relation used to compute
//! gaps between consecutive executions on the same thread.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::execution::TestExecution;
use crate::suite::{SuiteResult, TestRun};

/// An execution as placed on its thread's timeline.
///
/// Carries the ingestion sequence number that gives every entry a distinct
/// identity, so equal-timestamp entries stay distinguishable.
#[derive(Debug, Clone)]
pub struct TimedExecution {
    sequence: u64,
    execution: TestExecution,
}

impl TimedExecution {
    /// The recorded execution
    #[must_use]
    pub fn execution(&self) -> &TestExecution {
        &self.execution
    }

    /// Ingestion sequence number, unique within one chronology
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Single-pass accumulator over all executions of one suite or run.
///
/// Timelines are keyed by thread identifier and ordered by
/// `(start_millis, ingestion order)`; entries with equal start timestamps
/// keep the order they were added in.
#[derive(Debug, Clone, Default)]
pub struct Chronology {
    timelines: BTreeMap<String, Vec<TimedExecution>>,
    /// `(suite_start, suite_end)` over all ingested executions; `None` until
    /// the first execution arrives, so no sentinel values leak into
    /// arithmetic.
    bounds: Option<(i64, i64)>,
    average_duration: f64,
    count: u64,
    test_count: u64,
}

impl Chronology {
    /// Create an empty chronology
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chronology from one suite's partitions.
    ///
    /// Partitions merge in the pinned order of [`SuiteResult::all`]; the
    /// incremental average is order-sensitive, so this order is part of the
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns an error if any execution violates an ingestion precondition.
    pub fn from_suite(suite: &SuiteResult) -> Result<Self> {
        let mut chronology = Self::new();
        for execution in suite.all() {
            chronology.add(execution.clone())?;
        }
        Ok(chronology)
    }

    /// Build a chronology spanning every suite of a run
    ///
    /// # Errors
    ///
    /// Returns an error if any execution violates an ingestion precondition.
    pub fn from_run(run: &TestRun) -> Result<Self> {
        let mut chronology = Self::new();
        for execution in run.all() {
            chronology.add(execution.clone())?;
        }
        Ok(chronology)
    }

    /// Ingest one execution.
    ///
    /// Rejects executions without a thread identifier and executions that
    /// end before they start. Zero-duration executions and duplicate
    /// timestamps are valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingThreadId`] or [`Error::EndsBeforeStart`].
    pub fn add(&mut self, execution: TestExecution) -> Result<()> {
        if execution.thread_id.is_empty() {
            return Err(Error::MissingThreadId {
                class: execution.class_name,
                method: execution.method_name,
            });
        }
        if execution.end_millis < execution.start_millis {
            return Err(Error::EndsBeforeStart {
                class: execution.class_name,
                method: execution.method_name,
                start: execution.start_millis,
                end: execution.end_millis,
            });
        }

        self.count += 1;
        if execution.kind.is_test() {
            self.test_count += 1;
        }

        // Cumulative moving average over every ingested execution, in
        // ingestion order.
        let duration = execution.duration_millis() as f64;
        self.average_duration += (duration - self.average_duration) / self.count as f64;

        self.bounds = Some(match self.bounds {
            None => (execution.start_millis, execution.end_millis),
            Some((start, end)) => (
                start.min(execution.start_millis),
                end.max(execution.end_millis),
            ),
        });

        let timeline = self.timelines.entry(execution.thread_id.clone()).or_default();
        // Insert after all entries with an equal or earlier start, so ties
        // keep ingestion order.
        let at = timeline.partition_point(|t| t.execution.start_millis <= execution.start_millis);
        timeline.insert(
            at,
            TimedExecution {
                sequence: self.count,
                execution,
            },
        );
        Ok(())
    }

    /// Distinct thread identifiers. Set semantics: exposed in sorted order
    /// for convenience, but callers must not read meaning into it.
    pub fn thread_names(&self) -> impl Iterator<Item = &str> {
        self.timelines.keys().map(String::as_str)
    }

    /// Number of distinct threads
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.timelines.len()
    }

    /// The ordered timeline for one thread; empty for an unknown thread
    #[must_use]
    pub fn timeline(&self, thread_id: &str) -> &[TimedExecution] {
        self.timelines.get(thread_id).map_or(&[], Vec::as_slice)
    }

    /// The entry immediately before `entry` on its thread's timeline, or
    /// `None` if it is the first. Resolved by the entry's identity, not its
    /// timestamp, so equal-timestamp entries behave correctly.
    #[must_use]
    pub fn preceding(&self, entry: &TimedExecution) -> Option<&TimedExecution> {
        let timeline = self.timelines.get(&entry.execution.thread_id)?;
        let at = timeline.iter().position(|t| t.sequence == entry.sequence)?;
        at.checked_sub(1).map(|prior| &timeline[prior])
    }

    /// Count of ingested executions that are real test methods
    #[must_use]
    pub fn total_test_count(&self) -> usize {
        self.test_count as usize
    }

    /// Total number of ingested executions, configurations included
    #[must_use]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Check whether anything was ingested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Earliest start over all executions; `None` when empty
    #[must_use]
    pub fn suite_start_millis(&self) -> Option<i64> {
        self.bounds.map(|(start, _)| start)
    }

    /// Latest end over all executions; `None` when empty
    #[must_use]
    pub fn suite_end_millis(&self) -> Option<i64> {
        self.bounds.map(|(_, end)| end)
    }

    /// `suite_end - suite_start`; 0 for an empty chronology. "No tests ran"
    /// is a valid, reportable state, so this never panics.
    #[must_use]
    pub fn total_duration_millis(&self) -> i64 {
        self.bounds.map_or(0, |(start, end)| end - start)
    }

    /// End of the thread's last execution minus the suite start; 0 for an
    /// unknown or empty thread
    #[must_use]
    pub fn thread_duration_millis(&self, thread_id: &str) -> i64 {
        let Some((suite_start, _)) = self.bounds else {
            return 0;
        };
        self.timeline(thread_id)
            .last()
            .map_or(0, |last| last.execution.end_millis - suite_start)
    }

    /// Cumulative moving average of execution duration in milliseconds;
    /// 0.0 for an empty chronology
    #[must_use]
    pub fn average_duration_millis(&self) -> f64 {
        self.average_duration
    }
}
