//! Sync report returned to the client

use serde::Serialize;

/// Outcome of one sync request.
///
/// `messages` holds one human-readable line per file built, deleted or
/// failed, in the order the sync touched them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Theme id persisted in the stylesheet header
    pub theme_id: Option<u64>,
    /// Commit persisted in the stylesheet header
    pub commit: Option<u64>,
    pub messages: Vec<String>,
}

impl SyncReport {
    pub fn new(theme_id: Option<u64>, commit: Option<u64>) -> Self {
        Self {
            theme_id,
            commit,
            messages: Vec::new(),
        }
    }

    /// Add messages to the report
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = String>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Messages recording a failure.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .map(String::as_str)
            .filter(|m| m.starts_with("Error:"))
    }

    pub fn is_success(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// File size as the client displays it, kilobytes rounded to two places.
pub(crate) fn kilobytes(bytes: usize) -> String {
    let kb = (bytes as f64 / 1024.0 * 100.0).round() / 100.0;
    format!("{kb}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0")]
    #[case(51, "0.05")]
    #[case(1024, "1")]
    #[case(1536, "1.5")]
    fn formats_kilobytes(#[case] bytes: usize, #[case] expected: &str) {
        assert_eq!(kilobytes(bytes), expected);
    }

    #[test]
    fn error_messages_mark_failure() {
        let report = SyncReport::new(Some(1), Some(2)).with_messages([
            "Built: style.css (0.4 KB)".to_string(),
            "Error: Cannot delete the file \"views/parts/old.php\"".to_string(),
        ]);

        assert!(!report.is_success());
        assert_eq!(report.errors().count(), 1);
    }
}
