//! JUnit-style XML report generation
//!
//! Strips away the suite/partition organisation of the run and arranges the
//! results by test class, one XML file per class, for CI systems that
//! consume JUnit reports. Failed and skipped configurations are folded in
//! as test failures/skips.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use ngreport_results::{TestExecution, TestRun};

use crate::config::XmlDialect;
use crate::error::Result;
use crate::format::escape_xml;

/// The flattened results of one test class
#[derive(Debug, Default)]
pub struct ClassResults<'a> {
    /// Fully-qualified class name
    pub class_name: &'a str,
    passed: Vec<&'a TestExecution>,
    failed: Vec<&'a TestExecution>,
    skipped: Vec<&'a TestExecution>,
    duration_millis: i64,
}

impl<'a> ClassResults<'a> {
    fn new(class_name: &'a str) -> Self {
        Self {
            class_name,
            ..Self::default()
        }
    }

    fn add_passed(&mut self, execution: &'a TestExecution) {
        self.duration_millis += execution.duration_millis();
        self.passed.push(execution);
    }

    fn add_failed(&mut self, execution: &'a TestExecution) {
        self.duration_millis += execution.duration_millis();
        self.failed.push(execution);
    }

    fn add_skipped(&mut self, execution: &'a TestExecution) {
        self.duration_millis += execution.duration_millis();
        self.skipped.push(execution);
    }

    /// Total number of test cases for this class
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len() + self.skipped.len()
    }
}

/// JUnit-style XML report generator
#[derive(Debug)]
pub struct JunitXmlReport {
    dialect: XmlDialect,
}

impl Default for JunitXmlReport {
    fn default() -> Self {
        Self::new(XmlDialect::TestNg)
    }
}

impl JunitXmlReport {
    /// Create a generator for the given dialect
    #[must_use]
    pub fn new(dialect: XmlDialect) -> Self {
        Self { dialect }
    }

    /// Flatten a run into per-class results, classes ordered by name.
    ///
    /// In the strict JUnit dialect skipped tests and configurations are
    /// folded into the failure bucket, because that dialect cannot
    /// represent skips.
    #[must_use]
    pub fn flatten<'a>(&self, run: &'a TestRun) -> Vec<ClassResults<'a>> {
        let mut by_class: BTreeMap<&str, ClassResults<'a>> = BTreeMap::new();
        for suite in &run.suites {
            for execution in &suite.failed_tests {
                class_results(&mut by_class, execution).add_failed(execution);
            }
            for execution in &suite.skipped_tests {
                self.skip(class_results(&mut by_class, execution), execution);
            }
            for execution in &suite.passed_tests {
                class_results(&mut by_class, execution).add_passed(execution);
            }
            for execution in &suite.failed_configurations {
                class_results(&mut by_class, execution).add_failed(execution);
            }
            for execution in &suite.skipped_configurations {
                self.skip(class_results(&mut by_class, execution), execution);
            }
        }
        by_class.into_values().collect()
    }

    fn skip<'a>(&self, results: &mut ClassResults<'a>, execution: &'a TestExecution) {
        if self.dialect.allows_skipped() {
            results.add_skipped(execution);
        } else {
            results.add_failed(execution);
        }
    }

    /// Generate the XML document for one class
    ///
    /// # Errors
    ///
    /// Returns an error if writing the document fails.
    pub fn generate(&self, results: &ClassResults<'_>) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output, results)?;
        Ok(String::from_utf8_lossy(&output).to_string())
    }

    /// Write one XML file per test class into `<output_dir>/xml/`
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written.
    pub fn write_reports(&self, run: &TestRun, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let xml_dir = output_dir.join("xml");
        std::fs::create_dir_all(&xml_dir)?;

        let mut written = Vec::new();
        for results in self.flatten(run) {
            let xml = self.generate(&results)?;
            let path = xml_dir.join(format!("{}_results.xml", results.class_name));
            std::fs::write(&path, xml)?;
            debug!(path = %path.display(), "wrote JUnit XML report");
            written.push(path);
        }
        Ok(written)
    }

    fn write_xml<W: Write>(&self, writer: &mut W, results: &ClassResults<'_>) -> Result<()> {
        let time_seconds = results.duration_millis as f64 / 1000.0;
        writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            writer,
            r#"<testsuite name="{}" tests="{}" failures="{}" errors="0" skipped="{}" time="{:.3}">"#,
            escape_xml(results.class_name),
            results.total(),
            results.failed.len(),
            results.skipped.len(),
            time_seconds
        )?;

        for execution in &results.passed {
            writeln!(
                writer,
                r#"  <testcase classname="{}" name="{}" time="{:.3}"/>"#,
                escape_xml(&execution.class_name),
                escape_xml(&Self::case_name(execution)),
                execution.duration_millis() as f64 / 1000.0
            )?;
        }

        for execution in &results.failed {
            self.write_failed_case(writer, execution)?;
        }

        for execution in &results.skipped {
            writeln!(
                writer,
                r#"  <testcase classname="{}" name="{}" time="{:.3}">"#,
                escape_xml(&execution.class_name),
                escape_xml(&Self::case_name(execution)),
                execution.duration_millis() as f64 / 1000.0
            )?;
            writeln!(writer, "    <skipped/>")?;
            writeln!(writer, "  </testcase>")?;
        }

        writeln!(writer, "</testsuite>")?;
        Ok(())
    }

    fn write_failed_case<W: Write>(
        &self,
        writer: &mut W,
        execution: &TestExecution,
    ) -> Result<()> {
        writeln!(
            writer,
            r#"  <testcase classname="{}" name="{}" time="{:.3}">"#,
            escape_xml(&execution.class_name),
            escape_xml(&Self::case_name(execution)),
            execution.duration_millis() as f64 / 1000.0
        )?;
        match &execution.failure {
            Some(cause) => {
                writeln!(
                    writer,
                    r#"    <failure message="{}">"#,
                    escape_xml(&cause.message)
                )?;
                for (depth, link) in cause.chain().iter().enumerate() {
                    if depth > 0 {
                        writeln!(writer, "Caused by: {}", escape_xml(&link.message))?;
                    }
                    for line in &link.stack {
                        writeln!(writer, "{}", escape_xml(line))?;
                    }
                }
                writeln!(writer, "    </failure>")?;
            }
            // Skips folded into failures by the strict dialect carry no
            // cause of their own.
            None => writeln!(writer, r#"    <failure message="skipped"/>"#)?,
        }
        writeln!(writer, "  </testcase>")?;
        Ok(())
    }

    /// Test-case display name: the method name plus its argument values for
    /// data-driven invocations.
    fn case_name(execution: &TestExecution) -> String {
        if execution.parameters.is_empty() {
            execution.method_name.clone()
        } else {
            format!(
                "{}({})",
                execution.method_name,
                execution.parameters.join(", ")
            )
        }
    }
}

/// Look up (or create) the results bucket for an execution's class
fn class_results<'a, 'b>(
    by_class: &'b mut BTreeMap<&'a str, ClassResults<'a>>,
    execution: &'a TestExecution,
) -> &'b mut ClassResults<'a> {
    by_class
        .entry(execution.class_name.as_str())
        .or_insert_with(|| ClassResults::new(execution.class_name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ngreport_results::{FailureCause, SuiteResult};

    fn run_with(suite: SuiteResult) -> TestRun {
        TestRun {
            name: "run".to_string(),
            suites: vec![suite],
        }
    }

    fn sample_suite() -> SuiteResult {
        SuiteResult {
            name: "integration".to_string(),
            passed_tests: vec![TestExecution::passed(
                "com.example.LoginTest",
                "testLogin",
                "main@1",
                0,
                1500,
            )],
            failed_tests: vec![TestExecution::failed(
                "com.example.LoginTest",
                "testLogout",
                "main@1",
                1500,
                1600,
                FailureCause::new("expected <true> but was <false>")
                    .with_stack(vec!["at LoginTest.testLogout(LoginTest.java:31)".to_string()])
                    .caused_by(FailureCause::new("session expired")),
            )],
            skipped_tests: vec![TestExecution::skipped(
                "com.example.CartTest",
                "testCheckout",
                "main@1",
                1600,
                1600,
            )],
            failed_configurations: vec![],
            skipped_configurations: vec![],
        }
    }

    #[test]
    fn test_flatten_groups_by_class_sorted() {
        let report = JunitXmlReport::default();
        let run = run_with(sample_suite());
        let classes = report.flatten(&run);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].class_name, "com.example.CartTest");
        assert_eq!(classes[1].class_name, "com.example.LoginTest");
        assert_eq!(classes[1].total(), 2);
    }

    #[test]
    fn test_testsuite_attributes() {
        let report = JunitXmlReport::default();
        let run = run_with(sample_suite());
        let classes = report.flatten(&run);
        let xml = report.generate(&classes[1]).expect("generate");

        assert!(xml.contains("<?xml"));
        assert!(xml.contains(r#"name="com.example.LoginTest""#));
        assert!(xml.contains(r#"tests="2""#));
        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"skipped="0""#));
        assert!(xml.contains(r#"time="1.600""#));
    }

    #[test]
    fn test_failure_carries_cause_chain() {
        let report = JunitXmlReport::default();
        let run = run_with(sample_suite());
        let classes = report.flatten(&run);
        let xml = report.generate(&classes[1]).expect("generate");

        assert!(xml.contains("<failure message=\"expected &lt;true&gt; but was &lt;false&gt;\""));
        assert!(xml.contains("at LoginTest.testLogout(LoginTest.java:31)"));
        assert!(xml.contains("Caused by: session expired"));
    }

    #[test]
    fn test_testng_dialect_renders_skipped_element() {
        let report = JunitXmlReport::new(XmlDialect::TestNg);
        let run = run_with(sample_suite());
        let classes = report.flatten(&run);
        let xml = report.generate(&classes[0]).expect("generate");

        assert!(xml.contains(r#"skipped="1""#));
        assert!(xml.contains("<skipped/>"));
    }

    #[test]
    fn test_strict_junit_dialect_folds_skips_into_failures() {
        let report = JunitXmlReport::new(XmlDialect::JUnit);
        let run = run_with(sample_suite());
        let classes = report.flatten(&run);
        let xml = report.generate(&classes[0]).expect("generate");

        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains(r#"skipped="0""#));
        assert!(xml.contains(r#"<failure message="skipped"/>"#));
    }

    #[test]
    fn test_failed_configuration_counts_as_failure() {
        let suite = SuiteResult {
            name: "s".to_string(),
            failed_configurations: vec![TestExecution::failed(
                "com.example.LoginTest",
                "setUp",
                "main@1",
                0,
                10,
                FailureCause::new("fixture broke"),
            )
            .configuration()],
            ..SuiteResult::default()
        };
        let report = JunitXmlReport::default();
        let run = run_with(suite);
        let classes = report.flatten(&run);
        let xml = report.generate(&classes[0]).expect("generate");

        assert!(xml.contains(r#"failures="1""#));
        assert!(xml.contains("fixture broke"));
    }

    #[test]
    fn test_data_driven_case_name_includes_arguments() {
        let suite = SuiteResult {
            name: "s".to_string(),
            passed_tests: vec![TestExecution::passed(
                "com.example.DataProviderTest",
                "testLogin",
                "main@1",
                0,
                5,
            )
            .with_parameters(vec!["alice".to_string(), "s3cret".to_string()])],
            ..SuiteResult::default()
        };
        let report = JunitXmlReport::default();
        let run = run_with(suite);
        let classes = report.flatten(&run);
        let xml = report.generate(&classes[0]).expect("generate");

        assert!(xml.contains(r#"name="testLogin(alice, s3cret)""#));
    }

    #[test]
    fn test_write_reports_one_file_per_class() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = JunitXmlReport::default();
        let run = run_with(sample_suite());

        let written = report.write_reports(&run, dir.path()).expect("write");
        assert_eq!(written.len(), 2);
        assert!(dir
            .path()
            .join("xml/com.example.LoginTest_results.xml")
            .exists());
        assert!(dir
            .path()
            .join("xml/com.example.CartTest_results.xml")
            .exists());
    }

    #[test]
    fn test_empty_run_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = JunitXmlReport::default();
        let run = TestRun::new("empty");

        let written = report.write_reports(&run, dir.path()).expect("write");
        assert!(written.is_empty());
    }
}
