//! Utility functions and types.

use std::fmt;

/// Redacts a secret for logs and debug output.
///
/// - Empty input prints as `EMPTY`.
/// - Input shorter than 12 characters is fully replaced by `***`.
/// - Longer input keeps its first and last three characters, so two different
///   shared keys or tokens can still be told apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Redact<'_> {
    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        let length = value.chars().count();
        if length == 0 {
            return f.write_str("EMPTY");
        }
        if length < 12 {
            return f.write_str("***");
        }

        let head: String = value.chars().take(3).collect();
        let tail: String = value.chars().skip(length - 3).collect();
        write!(f, "{head}***{tail}")
    }
}

impl fmt::Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

impl fmt::Display for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}
