//! HTML and JUnit-style XML report rendering for TestNG-style test runs.
//!
//! Takes the aggregated data produced by `ngreport-results` and renders it
//! into static report files by template substitution. Also carries the
//! TestDox name formatting strategy and the companion resolver that
//! recovers parameter names from Java test sources for readable
//! data-provider labels.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
// Allow common patterns
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_lines)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod format;
pub mod html;
pub mod junit;
pub mod params;
pub mod testdox;

pub use config::{ReportConfig, ReportMeta, XmlDialect};
pub use error::{Error, Result};
pub use html::HtmlReport;
pub use junit::JunitXmlReport;
pub use params::SourceResolver;
pub use testdox::{NameFormatter, PlainFormatter, TestDoxFormatter};
