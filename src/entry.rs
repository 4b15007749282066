use serde::{Deserialize, Serialize};

/// A classified log line: the original text and the pattern that matched it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl LogEntry {
    pub fn new(original: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            pattern: Some(pattern.into()),
        }
    }
}
