//! Raw parameter values.
//!
//! Parameter maps hold scalars: strings, booleans, integers, or null. Only
//! string-coercible values participate in path/URL resolution; null entries
//! (and non-scalar JSON inputs) are excluded from the resolvable set at
//! classification time.

use serde::{Deserialize, Serialize};

/// A raw scalar value supplied by the caller.
///
/// # Examples
///
/// ```
/// use pathfinder::ParamValue;
///
/// let value = ParamValue::from("/srv/app");
/// assert_eq!(value.as_text(), Some("/srv/app".to_string()));
///
/// let flag = ParamValue::from(true);
/// assert_eq!(flag.as_text(), Some("true".to_string()));
///
/// assert_eq!(ParamValue::Null.as_text(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A string value.
    Str(String),
    /// A boolean value; coerces to `"true"` / `"false"`.
    Bool(bool),
    /// An integer value; coerces to its decimal form.
    Int(i64),
    /// An explicit null. Not string-coercible.
    Null,
}

impl ParamValue {
    /// Coerce the value to its string form, if it has one.
    ///
    /// Returns `None` for [`ParamValue::Null`].
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Null => None,
        }
    }

    /// Check whether the value participates in resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::ParamValue;
    ///
    /// assert!(ParamValue::from(8080).is_coercible());
    /// assert!(!ParamValue::Null.is_coercible());
    /// ```
    #[must_use]
    pub fn is_coercible(&self) -> bool {
        !matches!(self, Self::Null)
    }

    /// Convert a JSON value to a parameter scalar.
    ///
    /// Arrays, objects, and non-integral numbers are not scalars; they are
    /// rejected with a reason string so the caller can log them as skipped.
    ///
    /// # Errors
    ///
    /// Returns the reason the value is not a supported scalar.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::ParamValue;
    ///
    /// let value = ParamValue::from_json(&serde_json::json!("/srv/app")).unwrap();
    /// assert_eq!(value, ParamValue::Str("/srv/app".to_string()));
    ///
    /// assert!(ParamValue::from_json(&serde_json::json!([1, 2])).is_err());
    /// ```
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        match value {
            serde_json::Value::Null => Ok(Self::Null),
            serde_json::Value::Bool(b) => Ok(Self::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| format!("number {n} is not a supported integer")),
            serde_json::Value::String(s) => Ok(Self::Str(s.clone())),
            serde_json::Value::Array(_) => Err("arrays are not scalar values".to_string()),
            serde_json::Value::Object(_) => Err("objects are not scalar values".to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}
