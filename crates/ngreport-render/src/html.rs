//! HTML report generation
//!
//! Writes a static report into an output directory: an index page with one
//! row per suite, a detail page per suite with results grouped by class and
//! a per-thread execution timeline, and a stylesheet.

use std::path::{Path, PathBuf};

use tracing::debug;

use ngreport_results::{
    group_by_class, Chronology, FailureCause, SuiteResult, TestExecution, TestRun, TimelineScale,
};

use crate::config::{ReportConfig, ReportMeta};
use crate::error::Result;
use crate::format::{escape_html, escape_xml, format_date, format_duration_millis, format_time};
use crate::params::{label_arguments, SourceResolver};
use crate::testdox::{NameFormatter, PlainFormatter};

const INDEX_FILE: &str = "index.html";
const STYLESHEET_FILE: &str = "ngreport.css";
const DEFAULT_STYLESHEET: &str = include_str!("../resources/ngreport.css");

/// Width in pixels the whole suite duration is fitted into on the timeline
const TIMELINE_WIDTH: u32 = 900;

/// HTML report generator.
///
/// The name formatter and the optional parameter-name resolver are explicit
/// strategies chosen by the host application.
pub struct HtmlReport {
    config: ReportConfig,
    meta: ReportMeta,
    formatter: Box<dyn NameFormatter>,
    resolver: Option<SourceResolver>,
}

impl HtmlReport {
    /// Create a generator with plain name formatting
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            meta: ReportMeta::capture(),
            formatter: Box::new(PlainFormatter),
            resolver: None,
        }
    }

    /// Use a different name-formatting strategy
    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn NameFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Label data-provider arguments with names resolved from test sources
    #[must_use]
    pub fn with_parameter_names(mut self, resolver: SourceResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Write the full HTML report into `output_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if aggregation fails or a file cannot be written.
    pub fn write_reports(&mut self, run: &TestRun, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();

        let index_path = output_dir.join(INDEX_FILE);
        std::fs::write(&index_path, self.render_index(run)?)?;
        debug!(path = %index_path.display(), "wrote report index");
        written.push(index_path);

        for (position, suite) in run.suites.iter().enumerate() {
            let path = output_dir.join(suite_file_name(position));
            std::fs::write(&path, self.render_suite(suite)?)?;
            debug!(path = %path.display(), suite = %suite.name, "wrote suite page");
            written.push(path);
        }

        let style_path = output_dir.join(STYLESHEET_FILE);
        match &self.config.stylesheet {
            Some(custom) => {
                std::fs::copy(custom, &style_path)?;
            }
            None => std::fs::write(&style_path, DEFAULT_STYLESHEET)?,
        }
        written.push(style_path);

        Ok(written)
    }

    /// Render the index page: one row per suite plus run totals
    ///
    /// # Errors
    ///
    /// Returns an error if a suite's executions fail aggregation.
    pub fn render_index(&self, run: &TestRun) -> Result<String> {
        let mut rows = String::new();
        let (mut passed, mut failed, mut skipped, mut duration) = (0, 0, 0, 0i64);
        for (position, suite) in run.suites.iter().enumerate() {
            let chronology = Chronology::from_suite(suite)?;
            passed += suite.passed_count();
            failed += suite.failed_count();
            skipped += suite.skipped_count();
            duration += chronology.total_duration_millis();
            rows.push_str(&format!(
                "<tr><td><a href=\"{file}\">{name}</a></td>\
                 <td>{tests}</td><td>{passed}</td><td>{failed}</td><td>{skipped}</td>\
                 <td>{duration}</td></tr>\n",
                file = suite_file_name(position),
                name = escape_xml(&suite.name),
                tests = chronology.total_test_count(),
                passed = suite.passed_count(),
                failed = suite.failed_count(),
                skipped = suite.skipped_count(),
                duration = format_duration_millis(chronology.total_duration_millis()),
            ));
        }
        rows.push_str(&format!(
            "<tr class=\"totals\"><td>Total</td><td>{tests}</td><td>{passed}</td>\
             <td>{failed}</td><td>{skipped}</td><td>{duration}</td></tr>\n",
            tests = passed + failed + skipped,
            passed = passed,
            failed = failed,
            skipped = skipped,
            duration = format_duration_millis(duration),
        ));

        let coverage = self.config.coverage_link.as_ref().map_or_else(String::new, |url| {
            format!(
                "<p><a href=\"{}\">Coverage report</a></p>\n",
                escape_xml(url)
            )
        });

        let body = format!(
            "<h1>{title}</h1>\n\
             <p class=\"subtitle\">{run_name}</p>\n\
             <h2>Suites</h2>\n\
             <table>\n\
             <tr><th>Suite</th><th>Tests</th><th>Passed</th><th>Failed</th>\
             <th>Skipped</th><th>Duration</th></tr>\n\
             {rows}</table>\n\
             {coverage}",
            title = escape_xml(&self.config.title),
            run_name = escape_xml(&run.name),
            rows = rows,
            coverage = coverage,
        );
        Ok(self.page(&self.config.title, &body))
    }

    /// Render one suite's detail page
    ///
    /// # Errors
    ///
    /// Returns an error if the suite's executions fail aggregation.
    pub fn render_suite(&mut self, suite: &SuiteResult) -> Result<String> {
        let chronology = Chronology::from_suite(suite)?;

        let summary = format!(
            "<table>\n\
             <tr><th>Tests</th><th>Passed</th><th>Failed</th><th>Skipped</th>\
             <th>Duration</th><th>Average test time</th><th>Threads</th></tr>\n\
             <tr><td>{tests}</td><td>{passed}</td><td>{failed}</td><td>{skipped}</td>\
             <td>{duration}</td><td>{average}</td><td>{threads}</td></tr>\n\
             </table>\n",
            tests = chronology.total_test_count(),
            passed = suite.passed_count(),
            failed = suite.failed_count(),
            skipped = suite.skipped_count(),
            duration = format_duration_millis(chronology.total_duration_millis()),
            average = format_duration_millis(chronology.average_duration_millis().round() as i64),
            threads = chronology.thread_count(),
        );

        let executions: Vec<&TestExecution> = suite.all().collect();
        let mut classes = String::new();
        for group in group_by_class(executions.iter().copied()) {
            classes.push_str(&self.render_class(group.class_name, &group.executions));
        }

        let timeline = render_timeline(&chronology);

        let body = format!(
            "<h1>{name}</h1>\n\
             <p class=\"subtitle\"><a href=\"{index}\">{title}</a></p>\n\
             <h2>Summary</h2>\n{summary}\
             <h2>Results</h2>\n{classes}\
             {timeline}",
            name = escape_xml(&suite.name),
            index = INDEX_FILE,
            title = escape_xml(&self.config.title),
            summary = summary,
            classes = classes,
            timeline = timeline,
        );
        let page_title = format!("{} - {}", self.config.title, suite.name);
        Ok(self.page(&page_title, &body))
    }

    fn render_class(&mut self, class_name: &str, executions: &[&TestExecution]) -> String {
        let heading = if self.formatter.is_test_class(class_name) {
            self.formatter.class_label(class_name)
        } else {
            class_name.to_string()
        };
        let mut rows = String::new();
        for execution in executions {
            rows.push_str(&self.render_result_row(execution));
        }
        format!(
            "<h3>{heading} <span class=\"qualified\">{qualified}</span></h3>\n\
             <table>\n\
             <tr><th>Method</th><th>Outcome</th><th>Duration</th></tr>\n\
             {rows}</table>\n",
            heading = escape_xml(&heading),
            qualified = escape_xml(class_name),
            rows = rows,
        )
    }

    fn render_result_row(&mut self, execution: &TestExecution) -> String {
        let label = if self.formatter.is_test_method(&execution.method_name) {
            self.formatter.method_label(&execution.method_name)
        } else {
            execution.method_name.clone()
        };
        let config_tag = if execution.kind.is_test() {
            ""
        } else {
            " <span class=\"config-tag\">configuration</span>"
        };

        let mut detail = String::new();
        if !execution.parameters.is_empty() {
            let names = self.resolver.as_mut().and_then(|resolver| {
                resolver.parameter_names(&execution.class_name, &execution.method_name)
            });
            let labels = label_arguments(
                names.as_deref(),
                &execution.parameters,
                self.formatter.as_ref(),
            );
            let items: Vec<String> = labels.iter().map(|l| escape_xml(l)).collect();
            detail.push_str(&format!(
                "<div class=\"parameters\">{}</div>\n",
                items.join("<br/>")
            ));
        }
        if let Some(cause) = &execution.failure {
            detail.push_str(&render_failure(cause));
        }
        if !execution.output.is_empty() {
            let lines: Vec<String> = execution
                .output
                .iter()
                .map(|line| {
                    if self.config.escape_output {
                        escape_html(line)
                    } else {
                        line.clone()
                    }
                })
                .collect();
            detail.push_str(&format!(
                "<div class=\"test-output\">{}</div>\n",
                lines.join("<br/>")
            ));
        }

        format!(
            "<tr><td>{label}{config_tag}{detail}</td>\
             <td><span class=\"outcome {outcome}\">{outcome}</span></td>\
             <td>{duration}</td></tr>\n",
            label = escape_xml(&label),
            config_tag = config_tag,
            detail = if detail.is_empty() {
                String::new()
            } else {
                format!("\n{detail}")
            },
            outcome = execution.outcome,
            duration = format_duration_millis(execution.duration_millis()),
        )
    }

    /// Shared page skeleton
    fn page(&self, title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"UTF-8\">\n\
             <title>{title}</title>\n\
             <link rel=\"stylesheet\" href=\"{stylesheet}\">\n\
             </head>\n\
             <body>\n\
             {body}\
             <p class=\"meta\">Generated {date} at {time} by {user} ({platform}, ngreport {version})</p>\n\
             </body>\n\
             </html>\n",
            title = escape_xml(title),
            stylesheet = STYLESHEET_FILE,
            body = body,
            date = format_date(self.meta.generated_at),
            time = format_time(self.meta.generated_at),
            user = escape_xml(&self.meta.user),
            platform = escape_xml(&self.meta.platform),
            version = escape_xml(&self.meta.version),
        )
    }
}

fn suite_file_name(position: usize) -> String {
    format!("suite{}.html", position + 1)
}

fn render_failure(cause: &FailureCause) -> String {
    let mut html = String::from("<div class=\"failure\">\n");
    for (depth, link) in cause.chain().iter().enumerate() {
        let prefix = if depth == 0 { "" } else { "Caused by: " };
        html.push_str(&format!(
            "<div class=\"message\">{}{}</div>\n",
            prefix,
            escape_xml(&link.message)
        ));
        if !link.stack.is_empty() {
            let stack: Vec<String> = link.stack.iter().map(|l| escape_xml(l)).collect();
            html.push_str(&format!("<div class=\"stack\">{}</div>\n", stack.join("\n")));
        }
    }
    html.push_str("</div>\n");
    html
}

/// Render the per-thread execution timeline as a Gantt-style chart.
///
/// Bars are laid out inline: each bar's left margin is the scaled gap since
/// the preceding execution on the same thread, so negative gaps (overlap,
/// clock skew) simply pull a bar leftwards.
fn render_timeline(chronology: &Chronology) -> String {
    if chronology.is_empty() {
        return String::new();
    }
    let mut scale = TimelineScale::new(chronology);
    scale.set_desired_width(TIMELINE_WIDTH);

    let interval = scale.tick_interval_millis();
    let mut ruler = String::from("<div class=\"ruler\">");
    for tick in 0..=scale.tick_count(interval) {
        let at = scale.scale(tick * interval);
        ruler.push_str(&format!(
            "<span style=\"left: {at}px\">{label}</span>",
            at = at,
            label = tick_label(tick * interval),
        ));
    }
    ruler.push_str("</div>\n");

    let mut lanes = String::new();
    for thread in chronology.thread_names() {
        let label = thread.rfind('@').map_or(thread, |at| &thread[..at]);
        let mut bars = String::new();
        for entry in chronology.timeline(thread) {
            let execution = entry.execution();
            bars.push_str(&format!(
                "<div class=\"bar {outcome}\" style=\"margin-left: {offset}px; width: {width}px\" \
                 title=\"{name} ({duration})\"></div>",
                outcome = execution.outcome,
                offset = scale.start_offset_of(entry),
                width = scale.width_of(entry),
                name = escape_xml(&execution.qualified_name()),
                duration = format_duration_millis(execution.duration_millis()),
            ));
        }
        lanes.push_str(&format!(
            "<div class=\"lane\"><span class=\"lane-label\" title=\"{thread}\">{label}</span>\
             <div class=\"lane-track\">{bars}</div></div>\n",
            thread = escape_xml(thread),
            label = escape_xml(label),
            bars = bars,
        ));
    }

    format!("<h2>Execution timeline</h2>\n<div class=\"timeline\">\n{ruler}{lanes}</div>\n")
}

fn tick_label(millis: i64) -> String {
    if millis < 1000 {
        format!("{millis}ms")
    } else if millis < 60_000 {
        format!("{}s", millis / 1000)
    } else {
        format!("{}m", millis / 60_000)
    }
}
