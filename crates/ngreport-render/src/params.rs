//! Parameter-name resolution from Java test sources
//!
//! Data-provider arguments are recorded as bare values. When the test
//! sources are available, this module recovers the declared parameter names
//! so the report can label each value, e.g. `Username: alice` instead of
//! just `alice`. Resolution is best-effort text matching over the source
//! file; any miss falls back to the bare values.

use std::collections::HashMap;
use std::path::PathBuf;

use regex::Regex;

use crate::testdox::NameFormatter;

/// Looks up declared parameter names per class and method from a directory
/// of Java sources laid out by package (`com/example/LoginTest.java`).
///
/// Source files are read lazily and cached for the lifetime of the
/// resolver.
#[derive(Debug)]
pub struct SourceResolver {
    root: PathBuf,
    sources: HashMap<String, Option<String>>,
}

impl SourceResolver {
    /// Create a resolver rooted at a test-sources directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sources: HashMap::new(),
        }
    }

    /// Declared parameter names for `class_name.method_name`, in
    /// declaration order. Overloads concatenate their parameter lists.
    /// `None` when the source file or the method cannot be found.
    pub fn parameter_names(&mut self, class_name: &str, method_name: &str) -> Option<Vec<String>> {
        if !self.sources.contains_key(class_name) {
            let path = self
                .root
                .join(class_name.replace('.', "/"))
                .with_extension("java");
            self.sources
                .insert(class_name.to_string(), std::fs::read_to_string(path).ok());
        }
        let source = self.sources.get(class_name)?.as_deref()?;
        extract_parameter_names(source, method_name)
    }
}

/// Scan `source` for declarations of `method` and collect the parameter
/// names of every match.
fn extract_parameter_names(source: &str, method: &str) -> Option<Vec<String>> {
    let declaration = Regex::new(&format!(
        r"\b{}\s*\(([^)]*)\)",
        regex::escape(method)
    ))
    .ok()?;
    let trailing_identifier = Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*$").ok()?;

    let mut names = Vec::new();
    let mut found = false;
    for captures in declaration.captures_iter(source) {
        found = true;
        let parameter_list = captures.get(1).map_or("", |m| m.as_str());
        for piece in split_parameters(parameter_list) {
            if let Some(identifier) = trailing_identifier.captures(piece.trim()) {
                names.push(identifier[1].to_string());
            }
        }
    }
    found.then_some(names)
}

/// Split a parameter list on commas, ignoring commas nested inside generic
/// type arguments.
fn split_parameters(list: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut piece_start = 0usize;
    for (i, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&list[piece_start..i]);
                piece_start = i + 1;
            }
            _ => {}
        }
    }
    let tail = &list[piece_start..];
    if !tail.trim().is_empty() {
        pieces.push(tail);
    }
    pieces
}

/// Label argument values with their declared names when the counts line up;
/// otherwise return the bare values unchanged.
#[must_use]
pub fn label_arguments(
    names: Option<&[String]>,
    values: &[String],
    formatter: &dyn NameFormatter,
) -> Vec<String> {
    match names {
        Some(names) if names.len() == values.len() => names
            .iter()
            .zip(values)
            .map(|(name, value)| format!("{}: {}", formatter.method_label(name), value))
            .collect(),
        _ => values.to_vec(),
    }
}
