//! Utility functions and types.

use std::fmt::{Debug, Formatter};

/// Redact hides a secret in `Debug` output.
///
/// Values of 12 bytes or more keep their first and last three characters so
/// that two secrets can still be told apart in logs. Shorter values are fully
/// masked.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value)
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.0;
        if s.is_empty() {
            return f.write_str("EMPTY");
        }

        // `get` refuses to split a multi-byte character.
        match (s.get(..3), s.get(s.len().saturating_sub(3)..)) {
            (Some(head), Some(tail)) if s.len() >= 12 => write!(f, "{head}***{tail}"),
            _ => f.write_str("***"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", "EMPTY"; "empty")]
    #[test_case("app-key", "***"; "short")]
    #[test_case("0123456789a", "***"; "eleven bytes")]
    #[test_case("consumer-key-7f3a", "con***f3a"; "long")]
    #[test_case("ééééééééééééé", "***"; "multi byte")]
    fn test_redact(input: &str, expected: &str) {
        assert_eq!(format!("{:?}", Redact::from(&input.to_string())), expected);
    }
}
