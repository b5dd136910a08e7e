//! ngreport CLI
//!
//! Command-line interface that turns a recorded test run into static HTML
//! and JUnit-style XML reports.

#![forbid(unsafe_code)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::ptr_arg)]
#![allow(clippy::fn_params_excessive_bools)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use ngreport_cli::{
    build_report_config, generate_html_report, generate_junit_report, load_run, parse_formats,
    render_summary, ConfigOptions, ReportFormat,
};

#[derive(Parser)]
#[command(name = "ngreport")]
#[command(about = "Report generator for TestNG-style test runs", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate reports from a recorded test run
    Report {
        /// Path to the recorded run JSON file
        #[arg(value_name = "RUN")]
        run: PathBuf,

        /// Output directory for the report files
        #[arg(short, long, default_value = "test-report")]
        output: PathBuf,

        /// Report formats to generate (html, junit, all)
        #[arg(long, default_value = "all")]
        formats: String,

        /// Report title
        #[arg(long, default_value = "Test Results Report")]
        title: String,

        /// XML dialect (testng allows <skipped>, junit folds skips into failures)
        #[arg(long, default_value = "testng")]
        xml_dialect: String,

        /// Humanise class and method names TestDox-style
        #[arg(long)]
        testdox: bool,

        /// Root of the Java test sources, used to label data-provider
        /// arguments with their declared parameter names
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Custom stylesheet copied into the HTML report
        #[arg(long)]
        stylesheet: Option<PathBuf>,

        /// URL of an associated coverage report
        #[arg(long)]
        coverage_link: Option<String>,

        /// Class-name suffix recognised by the TestDox formatter
        #[arg(long, default_value = "Test")]
        class_suffix: String,

        /// Display logged test output verbatim instead of escaping it
        #[arg(long)]
        raw_output: bool,
    },

    /// Print a console summary of a recorded test run
    Summary {
        /// Path to the recorded run JSON file
        #[arg(value_name = "RUN")]
        run: PathBuf,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Report {
            run,
            output,
            formats,
            title,
            xml_dialect,
            testdox,
            sources,
            stylesheet,
            coverage_link,
            class_suffix,
            raw_output,
        } => {
            run_report(
                &run,
                &output,
                &formats,
                title,
                xml_dialect,
                testdox,
                sources,
                stylesheet,
                coverage_link,
                class_suffix,
                raw_output,
            );
        }
        Commands::Summary { run } => {
            let run = match load_run(&run) {
                Ok(run) => run,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            };
            match render_summary(&run) {
                Ok(summary) => print!("{summary}"),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run_report(
    run_path: &PathBuf,
    output: &PathBuf,
    formats: &str,
    title: String,
    xml_dialect: String,
    testdox: bool,
    sources: Option<PathBuf>,
    stylesheet: Option<PathBuf>,
    coverage_link: Option<String>,
    class_suffix: String,
    raw_output: bool,
) {
    let formats = match parse_formats(formats) {
        Ok(formats) => formats,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let run = match load_run(run_path) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    info!(
        run = %run.name,
        suites = run.suites.len(),
        "loaded test run"
    );

    let options = ConfigOptions {
        title,
        xml_dialect,
        stylesheet,
        coverage_link,
        class_suffix,
        raw_output,
    };
    let config = match build_report_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // A failure in one output format aborts that format only.
    let mut failed = false;
    if formats.contains(&ReportFormat::Html) {
        match generate_html_report(&run, config.clone(), testdox, sources.as_deref(), output) {
            Ok(written) => {
                println!("HTML report: {} file(s) in {}", written.len(), output.display());
            }
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            }
        }
    }
    if formats.contains(&ReportFormat::Junit) {
        match generate_junit_report(&run, config.xml_dialect, output) {
            Ok(written) => {
                println!(
                    "JUnit XML report: {} file(s) in {}",
                    written.len(),
                    output.join("xml").display()
                );
            }
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}
