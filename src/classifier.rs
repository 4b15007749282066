use anyhow::{Context, Result};
use regex::Regex;

use crate::entry::LogEntry;

/// A compiled pattern; the source string doubles as the label
#[derive(Debug, Clone)]
struct Pattern {
    label: String,
    regex: Regex,
}

/// Maps a line to the first pattern (in configured order) that matches it.
///
/// Matching is unanchored and case-sensitive, so a literal pattern behaves as
/// a substring test. Patterns are compiled once here; a malformed pattern is
/// rejected at construction and never reaches the workers.
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: Vec<Pattern>,
}

impl Classifier {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                let regex = Regex::new(p).with_context(|| format!("Invalid pattern '{}'", p))?;
                Ok(Pattern {
                    label: p.to_string(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Label of the first matching pattern, if any
    pub fn classify(&self, line: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(line))
            .map(|p| p.label.as_str())
    }

    pub fn entry_for(&self, line: &str) -> Option<LogEntry> {
        self.classify(line).map(|label| LogEntry::new(line, label))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
