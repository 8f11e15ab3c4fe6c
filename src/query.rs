//! Query-string parameters for Umami API requests.
//!
//! Values are a closed union of scalars. A parameter that is absent or an
//! empty string is dropped from the query string; `false` and `0` are
//! legitimate filter values and are always sent.

use std::fmt;

/// A scalar query-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A text value. Empty text is treated as absent.
    Text(String),
    /// An integer value (timestamps, page numbers, limits).
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
}

impl QueryValue {
    /// Returns true if this value should be omitted from the query string.
    fn is_empty(&self) -> bool {
        matches!(self, QueryValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Integer(n) => write!(f, "{}", n),
            QueryValue::Float(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Ordered query parameters. Setting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter to a present value.
    pub fn with(self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.with_opt(name, Some(value))
    }

    /// Sets a parameter that may be absent.
    pub fn with_opt<V: Into<QueryValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        let name = name.into();
        let value = value.map(Into::into);
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    /// Returns the name/value pairs that belong in the query string.
    ///
    /// Absent values and empty strings are omitted; everything else is
    /// rendered in its string form, in insertion order.
    pub fn to_pairs(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .filter_map(|(name, value)| match value {
                Some(v) if !v.is_empty() => Some((name.as_str(), v.to_string())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_and_empty_values_are_dropped() {
        let query = QueryParams::new()
            .with("a", 1i64)
            .with("b", "")
            .with_opt::<String>("c", None);
        assert_eq!(query.to_pairs(), vec![("a", "1".to_string())]);
    }

    #[test]
    fn test_false_and_zero_are_kept() {
        let query = QueryParams::new()
            .with("a", 1i64)
            .with("b", "")
            .with_opt::<String>("c", None)
            .with("d", false)
            .with("page", 0u32);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("a", "1".to_string()),
                ("d", "false".to_string()),
                ("page", "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_setting_existing_name_replaces_value() {
        let query = QueryParams::new().with("page", 1u32).with("page", 2u32);
        assert_eq!(query.to_pairs(), vec![("page", "2".to_string())]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let query = QueryParams::new()
            .with("startAt", 1_700_000_000_000i64)
            .with("endAt", 1_700_086_400_000i64)
            .with("unit", "day");
        let names: Vec<&str> = query.to_pairs().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["startAt", "endAt", "unit"]);
    }

    #[test]
    fn test_float_display() {
        assert_eq!(QueryValue::Float(1.5).to_string(), "1.5");
        assert_eq!(QueryValue::Integer(-3).to_string(), "-3");
    }

    #[test]
    fn test_empty_params_produce_no_pairs() {
        assert!(QueryParams::new().to_pairs().is_empty());
    }
}
