// ── Identifiers and labels ──
//
// Ids and names arrive as JSON strings on most backends and as numbers on
// some. The JSON kind is kept: a numeric zero is falsy where the string "0"
// is not, and a number never equals a string.

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Number;

/// An id or label as the backend sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct Id {
    text: String,
    number: Option<Number>,
}

impl Id {
    /// The value rendered as text; numbers in their decimal form.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Present in the JavaScript sense: a non-empty string, or a number
    /// that is neither zero nor NaN.
    pub fn is_truthy(&self) -> bool {
        match self.number {
            Some(ref n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            None => !self.text.is_empty(),
        }
    }

    /// Equality without type coercion: a string only equals a string and a
    /// number only equals a number of the same value.
    pub fn strictly_equals(&self, other: &Id) -> bool {
        match (&self.number, &other.number) {
            (Some(a), Some(b)) => a.as_f64() == b.as_f64(),
            (None, None) => self.text == other.text,
            _ => false,
        }
    }
}

impl From<String> for Id {
    fn from(text: String) -> Self {
        Self { text, number: None }
    }
}

impl From<&str> for Id {
    fn from(text: &str) -> Self {
        Self::from(text.to_owned())
    }
}

impl From<Number> for Id {
    fn from(number: Number) -> Self {
        Self {
            text: number.to_string(),
            number: Some(number),
        }
    }
}

impl Deref for Id {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.number {
            Some(ref n) => n.serialize(serializer),
            None => serializer.serialize_str(&self.text),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number(value: serde_json::Value) -> Id {
        match value {
            serde_json::Value::Number(n) => Id::from(n),
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn numeric_zero_is_falsy() {
        assert!(!number(json!(0)).is_truthy());
        assert!(!number(json!(0.0)).is_truthy());
        assert!(Id::from("0").is_truthy());
        assert!(!Id::from("").is_truthy());
        assert!(number(json!(42)).is_truthy());
    }

    #[test]
    fn equality_respects_kind() {
        assert!(!number(json!(1234)).strictly_equals(&Id::from("1234")));
        assert!(!Id::from("1234").strictly_equals(&number(json!(1234))));
        assert!(number(json!(1234)).strictly_equals(&number(json!(1234.0))));
        assert!(Id::from("ab").strictly_equals(&Id::from("ab")));
    }

    #[test]
    fn serializes_back_to_original_kind() {
        assert_eq!(serde_json::to_value(number(json!(42))).unwrap(), json!(42));
        assert_eq!(serde_json::to_value(Id::from("!ab")).unwrap(), json!("!ab"));
        assert_eq!(number(json!(42)).as_str(), "42");
    }
}
