//! Integration tests for ngreport
//!
//! Tests the full pipeline from a recorded run through aggregation and
//! report generation.

use ngreport_cli::{
    build_chronology, generate_html_report, generate_junit_report, load_run, render_summary,
};
use ngreport_render::{ReportConfig, XmlDialect};
use ngreport_results::{FailureCause, SuiteResult, TestExecution, TestRun};

fn recorded_run() -> TestRun {
    TestRun {
        name: "nightly".to_string(),
        suites: vec![
            SuiteResult {
                name: "integration".to_string(),
                passed_tests: vec![
                    TestExecution::passed("com.example.LoginTest", "testLogin", "main@1", 0, 1500),
                    TestExecution::passed(
                        "com.example.CartTest",
                        "testAddItem",
                        "worker-1@2",
                        100,
                        900,
                    ),
                    TestExecution::passed(
                        "com.example.DataProviderTest",
                        "testRates",
                        "worker-1@2",
                        900,
                        1200,
                    )
                    .with_parameters(vec!["USD".to_string(), "1.08".to_string()]),
                ],
                failed_tests: vec![TestExecution::failed(
                    "com.example.LoginTest",
                    "testLogout",
                    "main@1",
                    1500,
                    1900,
                    FailureCause::new("expected <true> but was <false>")
                        .with_stack(vec!["at LoginTest.testLogout(LoginTest.java:31)".to_string()])
                        .caused_by(FailureCause::new("session expired")),
                )],
                skipped_tests: vec![TestExecution::skipped(
                    "com.example.CartTest",
                    "testCheckout",
                    "worker-1@2",
                    1200,
                    1200,
                )],
                failed_configurations: vec![],
                skipped_configurations: vec![],
            },
            SuiteResult {
                name: "unit".to_string(),
                passed_tests: vec![TestExecution::passed(
                    "com.example.util.ParserTest",
                    "testParse",
                    "main@1",
                    2000,
                    2100,
                )],
                failed_tests: vec![],
                skipped_tests: vec![],
                failed_configurations: vec![TestExecution::failed(
                    "com.example.util.ParserTest",
                    "setUp",
                    "main@1",
                    1950,
                    2000,
                    FailureCause::new("fixture file missing"),
                )
                .configuration()],
                skipped_configurations: vec![],
            },
        ],
    }
}

#[test]
fn test_load_aggregate_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let run_path = dir.path().join("run.json");
    std::fs::write(&run_path, recorded_run().to_json().expect("json")).expect("write");

    let run = load_run(&run_path).expect("load");
    let chronology = build_chronology(&run).expect("chronology");

    // 5 tests + 1 failed configuration across both suites.
    assert_eq!(chronology.len(), 7);
    assert_eq!(chronology.total_test_count(), 6);
    assert_eq!(chronology.thread_count(), 2);
    assert_eq!(chronology.total_duration_millis(), 2100);
}

#[test]
fn test_full_report_generation_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("report");
    let run = recorded_run();

    let html_files =
        generate_html_report(&run, ReportConfig::new("Nightly"), true, None, &out)
            .expect("html");
    // index + two suite pages + stylesheet
    assert_eq!(html_files.len(), 4);

    let xml_files = generate_junit_report(&run, XmlDialect::TestNg, &out).expect("junit");
    // One file per distinct class.
    assert_eq!(xml_files.len(), 4);

    let index = std::fs::read_to_string(out.join("index.html")).expect("read index");
    assert!(index.contains("integration"));
    assert!(index.contains("unit"));
    assert!(index.contains("suite2.html"));

    let suite_page = std::fs::read_to_string(out.join("suite1.html")).expect("read suite");
    assert!(suite_page.contains("Execution timeline"));
    assert!(suite_page.contains("expected &lt;true&gt; but was &lt;false&gt;"));

    let login_xml =
        std::fs::read_to_string(out.join("xml/com.example.LoginTest_results.xml")).expect("read");
    assert!(login_xml.contains(r#"tests="2""#));
    assert!(login_xml.contains(r#"failures="1""#));
    assert!(login_xml.contains("Caused by: session expired"));
}

#[test]
fn test_strict_junit_dialect_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let run = recorded_run();

    generate_junit_report(&run, XmlDialect::JUnit, dir.path()).expect("junit");
    let cart_xml =
        std::fs::read_to_string(dir.path().join("xml/com.example.CartTest_results.xml"))
            .expect("read");
    // The skipped checkout test is folded into the failure count.
    assert!(cart_xml.contains(r#"failures="1""#));
    assert!(cart_xml.contains(r#"skipped="0""#));
}

#[test]
fn test_summary_pipeline() {
    let summary = render_summary(&recorded_run()).expect("summary");
    assert!(summary.contains("Run: nightly"));
    assert!(summary.contains("=== integration ==="));
    assert!(summary.contains("=== unit ==="));
    assert!(summary.contains("=== Run totals ==="));
    assert!(summary.contains("Executions: 7"));
}

#[test]
fn test_empty_run_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let run = TestRun::new("empty");

    let chronology = build_chronology(&run).expect("chronology");
    assert!(chronology.is_empty());
    assert_eq!(chronology.total_duration_millis(), 0);

    let html_files = generate_html_report(
        &run,
        ReportConfig::default(),
        false,
        None,
        dir.path(),
    )
    .expect("html");
    // index + stylesheet, no suite pages.
    assert_eq!(html_files.len(), 2);

    let xml_files = generate_junit_report(&run, XmlDialect::TestNg, dir.path()).expect("junit");
    assert!(xml_files.is_empty());
}
