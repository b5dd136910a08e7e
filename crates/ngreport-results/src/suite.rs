//! Recorded test runs and their per-suite result partitions
//!
//! A test listener records each suite's results partitioned by outcome, the
//! same way the run itself reports them. The chronology merges the
//! partitions back into one pool; renderers read them partition by
//! partition.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::execution::TestExecution;

/// The recorded results of one suite, partitioned by outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteResult {
    /// Suite name
    pub name: String,
    /// Test methods that passed
    #[serde(default)]
    pub passed_tests: Vec<TestExecution>,
    /// Test methods that failed
    #[serde(default)]
    pub failed_tests: Vec<TestExecution>,
    /// Test methods that were skipped
    #[serde(default)]
    pub skipped_tests: Vec<TestExecution>,
    /// Configuration methods that failed
    #[serde(default)]
    pub failed_configurations: Vec<TestExecution>,
    /// Configuration methods that were skipped
    #[serde(default)]
    pub skipped_configurations: Vec<TestExecution>,
}

impl SuiteResult {
    /// Create an empty suite result
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// All executions in pinned partition order: passed tests, failed
    /// configurations, failed tests, skipped tests, skipped configurations.
    ///
    /// The order matters: the chronology's incremental average is
    /// order-sensitive, so ingestion always walks partitions this way.
    pub fn all(&self) -> impl Iterator<Item = &TestExecution> {
        self.passed_tests
            .iter()
            .chain(self.failed_configurations.iter())
            .chain(self.failed_tests.iter())
            .chain(self.skipped_tests.iter())
            .chain(self.skipped_configurations.iter())
    }

    /// Test-method executions only (no configurations), partition order
    pub fn test_results(&self) -> impl Iterator<Item = &TestExecution> {
        self.passed_tests
            .iter()
            .chain(self.failed_tests.iter())
            .chain(self.skipped_tests.iter())
    }

    /// Number of passed test methods
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.passed_tests.len()
    }

    /// Number of failed test methods
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed_tests.len()
    }

    /// Number of skipped test methods
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped_tests.len()
    }

    /// Total number of recorded executions, configurations included
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed_tests.len()
            + self.failed_tests.len()
            + self.skipped_tests.len()
            + self.failed_configurations.len()
            + self.skipped_configurations.len()
    }

    /// Check whether the suite recorded no executions at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A whole recorded test run: the document the CLI loads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRun {
    /// Run name, shown as the report subtitle
    pub name: String,
    /// Suites in recorded order
    #[serde(default)]
    pub suites: Vec<SuiteResult>,
}

impl TestRun {
    /// Create an empty run
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suites: Vec::new(),
        }
    }

    /// Parse a run from its JSON representation
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a run from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the run to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All executions across all suites, suite order then partition order
    pub fn all(&self) -> impl Iterator<Item = &TestExecution> {
        self.suites.iter().flat_map(SuiteResult::all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::FailureCause;

    fn sample_suite() -> SuiteResult {
        SuiteResult {
            name: "integration".to_string(),
            passed_tests: vec![TestExecution::passed("a.A", "testA", "main@1", 0, 10)],
            failed_tests: vec![TestExecution::failed(
                "a.A",
                "testB",
                "main@1",
                10,
                30,
                FailureCause::new("boom"),
            )],
            skipped_tests: vec![TestExecution::skipped("b.B", "testC", "main@1", 30, 30)],
            failed_configurations: vec![TestExecution::failed(
                "a.A",
                "setUp",
                "main@1",
                0,
                0,
                FailureCause::new("bad fixture"),
            )
            .configuration()],
            skipped_configurations: vec![],
        }
    }

    #[test]
    fn test_partition_counts() {
        let suite = sample_suite();
        assert_eq!(suite.passed_count(), 1);
        assert_eq!(suite.failed_count(), 1);
        assert_eq!(suite.skipped_count(), 1);
        assert_eq!(suite.total(), 4);
        assert!(!suite.is_empty());
    }

    #[test]
    fn test_all_uses_pinned_partition_order() {
        let suite = sample_suite();
        let methods: Vec<&str> = suite.all().map(|e| e.method_name.as_str()).collect();
        assert_eq!(methods, vec!["testA", "setUp", "testB", "testC"]);
    }

    #[test]
    fn test_test_results_excludes_configurations() {
        let suite = sample_suite();
        assert!(suite.test_results().all(|e| e.kind.is_test()));
        assert_eq!(suite.test_results().count(), 3);
    }

    #[test]
    fn test_empty_suite() {
        let suite = SuiteResult::new("empty");
        assert!(suite.is_empty());
        assert_eq!(suite.all().count(), 0);
    }

    #[test]
    fn test_run_json_round_trip() {
        let run = TestRun {
            name: "nightly".to_string(),
            suites: vec![sample_suite()],
        };
        let json = run.to_json().expect("serialize");
        let parsed = TestRun::from_json(&json).expect("parse");
        assert_eq!(parsed.name, "nightly");
        assert_eq!(parsed.suites.len(), 1);
        assert_eq!(parsed.suites[0].total(), 4);
    }

    #[test]
    fn test_run_all_spans_suites() {
        let mut run = TestRun::new("nightly");
        run.suites.push(sample_suite());
        run.suites.push(SuiteResult {
            name: "unit".to_string(),
            passed_tests: vec![TestExecution::passed("c.C", "testD", "main@1", 40, 50)],
            ..SuiteResult::default()
        });
        assert_eq!(run.all().count(), 5);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(TestRun::from_json("not json").is_err());
    }

    #[test]
    fn test_missing_partitions_default_empty() {
        let parsed: SuiteResult =
            serde_json::from_str(r#"{"name": "lonely"}"#).expect("deserialize");
        assert!(parsed.is_empty());
    }
}
