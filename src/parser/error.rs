//! The aggregate parse failure.

use std::fmt;

/// Every defect found in one ingestion attempt, in input order.
///
/// A parse either produces a complete document or this error; there is no
/// partial result, and the list is never truncated to the first defect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    messages: Vec<String>,
}

impl ParseError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "document has {} defect(s):", self.messages.len())?;
        for message in &self.messages {
            writeln!(f, "  - {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
