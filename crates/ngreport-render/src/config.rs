//! Report configuration and generation-time metadata
//!
//! Configuration is an explicit struct built by the host application and
//! passed in at call time; the renderers read no ambient process-wide state.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::Error;

/// Dialect of the generated XML reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlDialect {
    /// TestNG's extended JUnit format, which allows `<skipped>` elements
    #[default]
    TestNg,
    /// Strict JUnit format: skipped tests are rendered as failures
    JUnit,
}

impl XmlDialect {
    /// Whether this dialect can represent skipped tests directly
    #[must_use]
    pub const fn allows_skipped(&self) -> bool {
        matches!(self, Self::TestNg)
    }
}

impl FromStr for XmlDialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "testng" => Ok(Self::TestNg),
            "junit" => Ok(Self::JUnit),
            other => Err(Error::UnknownDialect(other.to_string())),
        }
    }
}

impl std::fmt::Display for XmlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TestNg => write!(f, "testng"),
            Self::JUnit => write!(f, "junit"),
        }
    }
}

/// Configuration for one report-generation invocation
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Report title
    pub title: String,
    /// Escape logged output before display; turning this off lets tests
    /// inject markup into the HTML report, at their own risk
    pub escape_output: bool,
    /// XML report dialect
    pub xml_dialect: XmlDialect,
    /// Custom stylesheet copied into the report instead of the built-in one
    pub stylesheet: Option<PathBuf>,
    /// URL of an associated coverage report, linked from the index page
    pub coverage_link: Option<String>,
    /// Class-name suffix recognised by the TestDox formatter
    pub class_suffix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Test Results Report".to_string(),
            escape_output: true,
            xml_dialect: XmlDialect::default(),
            stylesheet: None,
            coverage_link: None,
            class_suffix: "Test".to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a configuration with the default settings and a title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Select the XML dialect
    #[must_use]
    pub fn with_xml_dialect(mut self, dialect: XmlDialect) -> Self {
        self.xml_dialect = dialect;
        self
    }

    /// Use a custom stylesheet file
    #[must_use]
    pub fn with_stylesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(path.into());
        self
    }

    /// Link an external coverage report from the index page
    #[must_use]
    pub fn with_coverage_link(mut self, url: impl Into<String>) -> Self {
        self.coverage_link = Some(url.into());
        self
    }

    /// Display logged output verbatim instead of escaping it
    #[must_use]
    pub fn raw_output(mut self) -> Self {
        self.escape_output = false;
        self
    }

    /// Override the class-name suffix used by the TestDox formatter
    #[must_use]
    pub fn with_class_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.class_suffix = suffix.into();
        self
    }
}

/// Static information captured once per report-generation invocation
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// The instant this report is being generated
    pub generated_at: DateTime<Utc>,
    /// `user@host` of the generating machine
    pub user: String,
    /// Operating system and architecture
    pub platform: String,
    /// Tool version
    pub version: String,
}

impl ReportMeta {
    /// Capture the environment of the current process
    #[must_use]
    pub fn capture() -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        let host = hostname::get().map_or_else(
            |_| "unknown".to_string(),
            |h| h.to_string_lossy().to_string(),
        );
        Self {
            generated_at: Utc::now(),
            user: format!("{user}@{host}"),
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_parse() {
        assert_eq!("testng".parse::<XmlDialect>().unwrap(), XmlDialect::TestNg);
        assert_eq!("junit".parse::<XmlDialect>().unwrap(), XmlDialect::JUnit);
        assert_eq!("JUnit".parse::<XmlDialect>().unwrap(), XmlDialect::JUnit);
        assert!("yunit".parse::<XmlDialect>().is_err());
    }

    #[test]
    fn test_dialect_skipped_support() {
        assert!(XmlDialect::TestNg.allows_skipped());
        assert!(!XmlDialect::JUnit.allows_skipped());
    }

    #[test]
    fn test_config_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.title, "Test Results Report");
        assert!(config.escape_output);
        assert_eq!(config.xml_dialect, XmlDialect::TestNg);
        assert!(config.stylesheet.is_none());
        assert!(config.coverage_link.is_none());
        assert_eq!(config.class_suffix, "Test");
    }

    #[test]
    fn test_config_builders() {
        let config = ReportConfig::new("Nightly Run")
            .with_xml_dialect(XmlDialect::JUnit)
            .with_coverage_link("coverage/index.html")
            .with_class_suffix("IT")
            .raw_output();
        assert_eq!(config.title, "Nightly Run");
        assert_eq!(config.xml_dialect, XmlDialect::JUnit);
        assert_eq!(config.coverage_link.as_deref(), Some("coverage/index.html"));
        assert_eq!(config.class_suffix, "IT");
        assert!(!config.escape_output);
    }

    #[test]
    fn test_meta_capture() {
        let meta = ReportMeta::capture();
        assert!(meta.user.contains('@'));
        assert!(!meta.platform.is_empty());
        assert!(!meta.version.is_empty());
    }
}
