//! CSS custom property values read from a renderer.

use std::fmt;

/// One computed CSS custom property value.
///
/// Values live for a single refresh cycle and are never persisted. Parsing
/// is deliberately strict at the edges: anything that does not parse cleanly
/// is dropped before it can reach a native effect driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssValue(String);

impl CssValue {
    /// Wrap a raw property value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw text of the value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the value as a boolean toggle.
    ///
    /// `"true"` (case-insensitive) is `true`; every other value is `false`.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case("true")
    }

    /// Interpret the value as an integer.
    ///
    /// Accepts an optional sign and leading digits; a trailing unit suffix
    /// such as `px` is ignored. Returns `None` when no digits are present,
    /// so a malformed value never turns into a driver call.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        let text = self.0.trim();
        let (sign, digits) = match text.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, text.strip_prefix('+').unwrap_or(text)),
        };

        let numeric: String = digits.chars().take_while(char::is_ascii_digit).collect();
        if numeric.is_empty() {
            return None;
        }

        numeric.parse::<i64>().ok().map(|n| n.saturating_mul(sign))
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CssValue {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for CssValue {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_truthiness() {
        assert!(CssValue::new("true").as_bool());
        assert!(CssValue::new("TRUE").as_bool());
        assert!(CssValue::new("True").as_bool());
        assert!(CssValue::new(" true ").as_bool());
        assert!(!CssValue::new("false").as_bool());
        assert!(!CssValue::new("yes").as_bool());
        assert!(!CssValue::new("").as_bool());
    }

    #[test]
    fn test_int_parsing() {
        assert_eq!(CssValue::new("12").as_int(), Some(12));
        assert_eq!(CssValue::new("12px").as_int(), Some(12));
        assert_eq!(CssValue::new("-4").as_int(), Some(-4));
        assert_eq!(CssValue::new("+7").as_int(), Some(7));
        assert_eq!(CssValue::new("abc").as_int(), None);
        assert_eq!(CssValue::new("").as_int(), None);
        assert_eq!(CssValue::new("px12").as_int(), None);
    }
}
