//! Sentinel-capable value slots.

use serde::{Deserialize, Serialize};

/// A value slot that may carry a concrete `T` or one of the two SPDX
/// substitute tokens: `NONE` ("there is no value") or `NOASSERTION`
/// ("nothing is claimed about the value").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpdxValue<T> {
    Value(T),
    NoAssertion,
    None,
}

impl<T> SpdxValue<T> {
    /// Returns the concrete value, if this slot holds one.
    pub fn value(&self) -> Option<&T> {
        match self {
            SpdxValue::Value(value) => Some(value),
            _ => None,
        }
    }

    /// True when the slot holds a sentinel rather than a concrete value.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, SpdxValue::Value(_))
    }
}

impl SpdxValue<String> {
    /// Interpret a raw token, mapping the two sentinel spellings and
    /// carrying anything else through as a concrete string.
    pub fn from_token(token: &str) -> Self {
        match token {
            "NONE" => SpdxValue::None,
            "NOASSERTION" => SpdxValue::NoAssertion,
            other => SpdxValue::Value(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_sentinels() {
        assert_eq!(SpdxValue::from_token("NONE"), SpdxValue::None);
        assert_eq!(SpdxValue::from_token("NOASSERTION"), SpdxValue::NoAssertion);
        assert_eq!(
            SpdxValue::from_token("SPDXRef-File"),
            SpdxValue::Value("SPDXRef-File".to_string())
        );
    }

    #[test]
    fn test_sentinel_predicates() {
        let concrete = SpdxValue::Value("x".to_string());
        assert!(!concrete.is_sentinel());
        assert_eq!(concrete.value(), Some(&"x".to_string()));
        assert!(SpdxValue::<String>::None.is_sentinel());
        assert_eq!(SpdxValue::<String>::NoAssertion.value(), None);
    }
}
