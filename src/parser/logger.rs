//! Ordered defect aggregation.

/// An append-only, ordered list of defect messages.
///
/// Two tiers exist during a parse: one log per in-progress element and one
/// for the document as a whole. Element logs are folded upward when their
/// element finalizes; the document log survives into the final failure.
/// Nothing is ever dropped from a log once appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    messages: Vec<String>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = String>) {
        self.messages.extend(messages);
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_log_preserves_order() {
        let mut log = ErrorLog::new();
        assert!(!log.has_messages());

        log.append("first");
        log.extend(vec!["second".to_string(), "third".to_string()]);

        assert!(log.has_messages());
        assert_eq!(log.messages(), ["first", "second", "third"]);
    }
}
