//! Name formatting strategies for report labels
//!
//! The formatter is an explicit strategy supplied by the host application at
//! construction time. [`TestDoxFormatter`] humanises camel-case test names
//! into readable phrases; [`PlainFormatter`] leaves names untouched.

/// Strategy for turning class and method names into display labels
pub trait NameFormatter {
    /// Display label for a fully-qualified class name
    fn class_label(&self, class_name: &str) -> String;

    /// Display label for a method name
    fn method_label(&self, method_name: &str) -> String;

    /// Whether a class name looks like a test class to this formatter
    fn is_test_class(&self, class_name: &str) -> bool;

    /// Whether a method name looks like a test method to this formatter
    fn is_test_method(&self, method_name: &str) -> bool;
}

/// Identity formatter: names are shown exactly as recorded
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl NameFormatter for PlainFormatter {
    fn class_label(&self, class_name: &str) -> String {
        class_name.to_string()
    }

    fn method_label(&self, method_name: &str) -> String {
        method_name.to_string()
    }

    fn is_test_class(&self, _class_name: &str) -> bool {
        true
    }

    fn is_test_method(&self, _method_name: &str) -> bool {
        true
    }
}

/// TestDox-style formatter: `testCanLoginWithValidCredentials` becomes
/// `Can login with valid credentials`.
#[derive(Debug, Clone)]
pub struct TestDoxFormatter {
    class_suffix: String,
    method_prefix: String,
}

impl Default for TestDoxFormatter {
    fn default() -> Self {
        Self {
            class_suffix: "Test".to_string(),
            method_prefix: "test".to_string(),
        }
    }
}

impl TestDoxFormatter {
    /// Create a formatter with the conventional `Test` suffix and `test`
    /// prefix
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognise a different class-name suffix
    #[must_use]
    pub fn with_class_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.class_suffix = suffix.into();
        self
    }

    /// Recognise a different method-name prefix
    #[must_use]
    pub fn with_method_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.method_prefix = prefix.into();
        self
    }

    fn trim_package<'a>(class_name: &'a str) -> &'a str {
        match class_name.rfind('.') {
            Some(dot) => &class_name[dot + 1..],
            None => class_name,
        }
    }

    fn trim_class_suffix<'a>(&self, class_name: &'a str) -> &'a str {
        class_name
            .strip_suffix(self.class_suffix.as_str())
            .unwrap_or(class_name)
    }

    fn trim_method_prefix<'a>(&self, method_name: &'a str) -> &'a str {
        method_name
            .strip_prefix(self.method_prefix.as_str())
            .unwrap_or(method_name)
    }
}

/// Camel case to a humane phrase: the first character is upper-cased, every
/// subsequent upper-case character starts a new lower-case word.
fn humanise(input: &str) -> String {
    let mut buffer = String::with_capacity(input.len() + 8);
    for (i, ch) in input.chars().enumerate() {
        if i == 0 {
            buffer.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            buffer.push(' ');
            buffer.extend(ch.to_lowercase());
        } else {
            buffer.push(ch);
        }
    }
    buffer
}

impl NameFormatter for TestDoxFormatter {
    fn class_label(&self, class_name: &str) -> String {
        let trimmed = Self::trim_package(class_name);
        humanise(self.trim_class_suffix(trimmed))
    }

    fn method_label(&self, method_name: &str) -> String {
        humanise(self.trim_method_prefix(method_name))
    }

    fn is_test_class(&self, class_name: &str) -> bool {
        class_name.ends_with(self.class_suffix.as_str())
    }

    fn is_test_method(&self, method_name: &str) -> bool {
        method_name.starts_with(self.method_prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label_strips_prefix_and_humanises() {
        let formatter = TestDoxFormatter::new();
        assert_eq!(
            formatter.method_label("testCanLoginWithValidCredentials"),
            "Can login with valid credentials"
        );
    }

    #[test]
    fn test_method_label_without_prefix() {
        let formatter = TestDoxFormatter::new();
        assert_eq!(formatter.method_label("shouldRejectBadInput"), "Should reject bad input");
    }

    #[test]
    fn test_class_label_strips_package_and_suffix() {
        let formatter = TestDoxFormatter::new();
        assert_eq!(formatter.class_label("com.example.UserAccountTest"), "User account");
    }

    #[test]
    fn test_class_label_custom_suffix() {
        let formatter = TestDoxFormatter::new().with_class_suffix("IT");
        assert_eq!(formatter.class_label("com.example.CheckoutIT"), "Checkout");
    }

    #[test]
    fn test_is_test_predicates() {
        let formatter = TestDoxFormatter::new();
        assert!(formatter.is_test_method("testLogin"));
        assert!(!formatter.is_test_method("setUp"));
        assert!(formatter.is_test_class("LoginTest"));
        assert!(!formatter.is_test_class("LoginHelper"));
    }

    #[test]
    fn test_empty_name() {
        let formatter = TestDoxFormatter::new();
        assert_eq!(formatter.method_label("test"), "");
        assert_eq!(formatter.method_label(""), "");
    }

    #[test]
    fn test_plain_formatter_is_identity() {
        let formatter = PlainFormatter;
        assert_eq!(formatter.class_label("com.example.LoginTest"), "com.example.LoginTest");
        assert_eq!(formatter.method_label("testLogin"), "testLogin");
        assert!(formatter.is_test_method("anything"));
    }

    #[test]
    fn test_humanise_single_word() {
        assert_eq!(humanise("login"), "Login");
    }

    #[test]
    fn test_humanise_leading_uppercase() {
        assert_eq!(humanise("LoginFlow"), "Login flow");
    }
}
