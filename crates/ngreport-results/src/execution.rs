//! Recorded test and configuration method executions
//!
//! A `TestExecution` is an immutable snapshot of one method invocation,
//! created when a test run completes and consumed during one
//! report-generation pass.

use serde::{Deserialize, Serialize};

/// Outcome of an executed method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The method completed without failure
    Passed,
    /// The method raised a failure
    Failed,
    /// The method was skipped
    Skipped,
}

impl Outcome {
    /// Check if this is a passing outcome
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if this is a failing outcome
    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if this is a skipped outcome
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Kind of executed method
///
/// Configuration methods (setup/teardown) participate in the chronology but
/// are excluded from test counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// A real test method
    Test,
    /// A setup/teardown method
    Configuration,
}

impl MethodKind {
    /// Check if this is a real test method
    #[must_use]
    pub const fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }
}

/// A failure and its causal chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCause {
    /// Failure message
    pub message: String,
    /// Stack trace lines
    #[serde(default)]
    pub stack: Vec<String>,
    /// The underlying cause, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<FailureCause>>,
}

impl FailureCause {
    /// Create a cause with a message and no stack
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: Vec::new(),
            cause: None,
        }
    }

    /// Attach stack trace lines
    #[must_use]
    pub fn with_stack(mut self, stack: Vec<String>) -> Self {
        self.stack = stack;
        self
    }

    /// Attach an underlying cause
    #[must_use]
    pub fn caused_by(mut self, cause: FailureCause) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The full causal chain, outermost failure first
    #[must_use]
    pub fn chain(&self) -> Vec<&FailureCause> {
        let mut causes = vec![self];
        let mut next = self.cause.as_deref();
        while let Some(cause) = next {
            causes.push(cause);
            next = cause.cause.as_deref();
        }
        causes
    }
}

/// One recorded invocation of a test or configuration method
///
/// Invariant: `end_millis >= start_millis` (enforced when the execution is
/// added to a [`crate::Chronology`]). A zero-duration execution is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestExecution {
    /// Fully-qualified name of the declaring class
    pub class_name: String,
    /// Method name
    pub method_name: String,
    /// Rendered argument values for data-driven invocations
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Compound thread identifier, `"<name>@<numeric-id>"`
    pub thread_id: String,
    /// Start instant, epoch milliseconds
    pub start_millis: i64,
    /// End instant, epoch milliseconds
    pub end_millis: i64,
    /// Recorded outcome
    pub outcome: Outcome,
    /// Test or configuration method
    pub kind: MethodKind,
    /// Failure cause chain, present only for failed executions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureCause>,
    /// Lines logged by the method while it ran
    #[serde(default)]
    pub output: Vec<String>,
}

impl TestExecution {
    /// Create a passed test execution
    #[must_use]
    pub fn passed(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        thread_id: impl Into<String>,
        start_millis: i64,
        end_millis: i64,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            parameters: Vec::new(),
            thread_id: thread_id.into(),
            start_millis,
            end_millis,
            outcome: Outcome::Passed,
            kind: MethodKind::Test,
            failure: None,
            output: Vec::new(),
        }
    }

    /// Create a failed test execution
    #[must_use]
    pub fn failed(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        thread_id: impl Into<String>,
        start_millis: i64,
        end_millis: i64,
        failure: FailureCause,
    ) -> Self {
        Self {
            outcome: Outcome::Failed,
            failure: Some(failure),
            ..Self::passed(class_name, method_name, thread_id, start_millis, end_millis)
        }
    }

    /// Create a skipped test execution
    #[must_use]
    pub fn skipped(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        thread_id: impl Into<String>,
        start_millis: i64,
        end_millis: i64,
    ) -> Self {
        Self {
            outcome: Outcome::Skipped,
            ..Self::passed(class_name, method_name, thread_id, start_millis, end_millis)
        }
    }

    /// Mark this execution as a configuration (setup/teardown) method
    #[must_use]
    pub fn configuration(mut self) -> Self {
        self.kind = MethodKind::Configuration;
        self
    }

    /// Attach rendered argument values
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attach logged output lines
    #[must_use]
    pub fn with_output(mut self, output: Vec<String>) -> Self {
        self.output = output;
        self
    }

    /// Elapsed time in milliseconds
    #[must_use]
    pub fn duration_millis(&self) -> i64 {
        self.end_millis - self.start_millis
    }

    /// `"<class>.<method>"`
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.method_name)
    }

    /// Human label for the execution thread: everything before the last `@`
    /// of the compound identifier. An identifier without `@` is returned
    /// unchanged.
    #[must_use]
    pub fn thread_label(&self) -> &str {
        match self.thread_id.rfind('@') {
            Some(at) => &self.thread_id[..at],
            None => &self.thread_id,
        }
    }
}
