//! Result model and chronology aggregation for TestNG-style test runs.
//!
//! Consumes a finished test run's recorded executions (suites, classes,
//! methods, outcomes, timings) and derives the orderings and timing
//! summaries that report renderers need: per-class groupings, per-thread
//! execution timelines, suite-wide bounds and averages, and pixel scaling
//! for a timeline chart.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod chronology;
pub mod error;
pub mod execution;
pub mod grouping;
pub mod scale;
pub mod suite;

pub use chronology::{Chronology, TimedExecution};
pub use error::{Error, Result};
pub use execution::{FailureCause, MethodKind, Outcome, TestExecution};
pub use grouping::{group_by_class, ClassGroup};
pub use scale::TimelineScale;
pub use suite::{SuiteResult, TestRun};
