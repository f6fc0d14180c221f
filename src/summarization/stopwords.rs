//! Stopword filtering backed by the NLTK English list from the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::{LANGUAGE, get};

/// A set of lowercase words excluded from frequency scoring.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The standard English stopword list.
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(|word| word.to_string().to_lowercase())
                .collect(),
        }
    }

    /// Create a stopword filter from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Check whether an already-lowercased word is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Number of words in the filter.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Whether the filter holds no words.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_covers_function_words() {
        let filter = StopwordFilter::english();
        for word in ["the", "is", "and", "a", "are", "can", "too"] {
            assert!(filter.is_stopword(word), "{word} should be a stopword");
        }
        for word in ["cats", "great", "summary", "document"] {
            assert!(!filter.is_stopword(word), "{word} should be kept");
        }
    }

    #[test]
    fn custom_list_is_lowercased() {
        let filter = StopwordFilter::from_list(&["Foo", "BAR"]);
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stopword("foo"));
        assert!(filter.is_stopword("bar"));
        assert!(!filter.is_stopword("Foo"));
    }
}
