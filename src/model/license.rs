//! License expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An SPDX license expression, carried opaquely.
///
/// Expression-level validation (operator grammar, license-list membership)
/// belongs to downstream tooling; ingestion only rejects empty expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseExpression(String);

impl LicenseExpression {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Empty license expression".to_string());
        }
        Ok(LicenseExpression(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_license_expression() {
        let expression = LicenseExpression::parse(" MIT OR Apache-2.0 ").unwrap();
        assert_eq!(expression.as_str(), "MIT OR Apache-2.0");
    }

    #[test]
    fn test_parse_empty_expression() {
        assert!(LicenseExpression::parse("   ").is_err());
    }
}
