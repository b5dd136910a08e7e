//! Library functions for the ngreport CLI
//!
//! Thin wrappers over the results and render crates so the command handlers
//! stay small and the logic is unit-testable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use std::path::{Path, PathBuf};

use ngreport_render::{
    HtmlReport, JunitXmlReport, NameFormatter, PlainFormatter, ReportConfig, SourceResolver,
    TestDoxFormatter, XmlDialect,
};
use ngreport_results::{Chronology, TestRun};

/// Report output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Static HTML pages
    Html,
    /// JUnit-style XML, one file per class
    Junit,
}

/// Parse the `--formats` argument: `html`, `junit` or `all`
pub fn parse_formats(formats: &str) -> Result<Vec<ReportFormat>, String> {
    match formats {
        "html" => Ok(vec![ReportFormat::Html]),
        "junit" => Ok(vec![ReportFormat::Junit]),
        "all" => Ok(vec![ReportFormat::Html, ReportFormat::Junit]),
        other => Err(format!("Unknown report format: {other}")),
    }
}

/// Load a recorded test run from a JSON file
pub fn load_run(path: &Path) -> Result<TestRun, String> {
    TestRun::from_file(path).map_err(|e| format!("Error loading test run: {e}"))
}

/// Build the chronology spanning every suite of a run
pub fn build_chronology(run: &TestRun) -> Result<Chronology, String> {
    Chronology::from_run(run).map_err(|e| format!("Error building chronology: {e}"))
}

/// Options for building a [`ReportConfig`] from command-line flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Report title
    pub title: String,
    /// XML dialect name (`testng` or `junit`)
    pub xml_dialect: String,
    /// Optional custom stylesheet path
    pub stylesheet: Option<PathBuf>,
    /// Optional coverage report URL
    pub coverage_link: Option<String>,
    /// Class suffix for TestDox formatting
    pub class_suffix: String,
    /// Display logged output verbatim
    pub raw_output: bool,
}

/// Build a report configuration from command-line options
pub fn build_report_config(options: &ConfigOptions) -> Result<ReportConfig, String> {
    let dialect: XmlDialect = options
        .xml_dialect
        .parse()
        .map_err(|e| format!("{e}"))?;
    let mut config = ReportConfig::new(options.title.clone())
        .with_xml_dialect(dialect)
        .with_class_suffix(options.class_suffix.clone());
    if let Some(stylesheet) = &options.stylesheet {
        config = config.with_stylesheet(stylesheet);
    }
    if let Some(coverage) = &options.coverage_link {
        config = config.with_coverage_link(coverage.clone());
    }
    if options.raw_output {
        config = config.raw_output();
    }
    Ok(config)
}

/// Generate the HTML report into `output_dir`
pub fn generate_html_report(
    run: &TestRun,
    config: ReportConfig,
    testdox: bool,
    sources: Option<&Path>,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, String> {
    let formatter: Box<dyn NameFormatter> = if testdox {
        Box::new(TestDoxFormatter::new().with_class_suffix(config.class_suffix.clone()))
    } else {
        Box::new(PlainFormatter)
    };
    let mut report = HtmlReport::new(config).with_formatter(formatter);
    if let Some(sources) = sources {
        report = report.with_parameter_names(SourceResolver::new(sources));
    }
    report
        .write_reports(run, output_dir)
        .map_err(|e| format!("Error generating HTML report: {e}"))
}

/// Generate the JUnit-style XML reports into `output_dir`
pub fn generate_junit_report(
    run: &TestRun,
    dialect: XmlDialect,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, String> {
    JunitXmlReport::new(dialect)
        .write_reports(run, output_dir)
        .map_err(|e| format!("Error generating JUnit XML report: {e}"))
}

/// Render a console summary of a run
pub fn render_summary(run: &TestRun) -> Result<String, String> {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out, "Run: {}", run.name);
    for suite in &run.suites {
        let chronology =
            Chronology::from_suite(suite).map_err(|e| format!("Error building chronology: {e}"))?;
        let _ = writeln!(out, "\n=== {} ===", suite.name);
        let _ = writeln!(out, "  Tests: {}", chronology.total_test_count());
        let _ = writeln!(out, "  Passed: {}", suite.passed_count());
        let _ = writeln!(out, "  Failed: {}", suite.failed_count());
        let _ = writeln!(out, "  Skipped: {}", suite.skipped_count());
        let _ = writeln!(
            out,
            "  Duration: {}ms",
            chronology.total_duration_millis()
        );
        let _ = writeln!(
            out,
            "  Average test time: {:.1}ms",
            chronology.average_duration_millis()
        );
        let _ = writeln!(out, "  Threads: {}", chronology.thread_count());
    }

    let chronology = build_chronology(run)?;
    let _ = writeln!(out, "\n=== Run totals ===");
    let _ = writeln!(out, "  Tests: {}", chronology.total_test_count());
    let _ = writeln!(out, "  Executions: {}", chronology.len());
    let _ = writeln!(
        out,
        "  Duration: {}ms",
        chronology.total_duration_millis()
    );
    Ok(out)
}
