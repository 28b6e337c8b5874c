//! Reloadable list of sequence-name keywords that mark an inspect animation.

use anyhow::{Context, Result};
use std::path::Path;

/// Keywords used when no list has been configured.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["inspect", "lookat"];

/// Ordered, deduplicated, lowercase keyword list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// Builds a set from arbitrary words; blanks are dropped, order is kept.
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut set = Self { words: Vec::new() };
        for word in words {
            set.push(word.as_ref());
        }
        set
    }

    /// Parses a keyword file: one keyword per line, `;`, `#` and `//`
    /// start comment lines.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines().map(str::trim).filter(|line| {
            !(line.is_empty()
                || line.starts_with(';')
                || line.starts_with('#')
                || line.starts_with("//"))
        }))
    }

    /// Reads and parses a keyword file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword file {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    fn push(&mut self, word: &str) {
        let word = word.trim().to_ascii_lowercase();
        if !word.is_empty() && !self.words.contains(&word) {
            self.words.push(word);
        }
    }

    /// Keywords in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no keyword is configured (nothing will classify as inspect).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if `lower` (already lowercase) contains any keyword.
    pub fn matches(&self, lower: &str) -> bool {
        self.words.iter().any(|w| lower.contains(w.as_str()))
    }

    /// True if `lower` (already lowercase) begins with any keyword.
    pub fn starts(&self, lower: &str) -> bool {
        self.words.iter().any(|w| lower.starts_with(w.as_str()))
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::from_words(DEFAULT_KEYWORDS)
    }
}
