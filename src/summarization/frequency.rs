//! Word-frequency scoring and top-sentence selection.

use rustc_hash::{FxHashMap, FxHashSet};

use super::stopwords::StopwordFilter;

/// Occurrence counts of the non-stopword words in a text.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencyTable {
    counts: FxHashMap<String, usize>,
}

impl WordFrequencyTable {
    /// Count words after lowercasing `text` and removing every ASCII punctuation character.
    pub fn build(text: &str, stopwords: &StopwordFilter) -> Self {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        let mut counts = FxHashMap::default();
        for word in normalized.split_whitespace() {
            if !stopwords.is_stopword(word) {
                *counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Count for `word`, zero when absent.
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words counted.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no words were counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Score a sentence: the sum of counts of its whitespace-separated tokens, lowercased but
    /// otherwise untouched. `"great."` therefore does not match `great`.
    pub fn score(&self, sentence: &str) -> usize {
        sentence
            .split_whitespace()
            .map(|token| self.get(&token.to_lowercase()))
            .sum()
    }
}

/// A sentence with its frequency score and first position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence<'a> {
    /// Sentence text as produced by the splitter.
    pub text: &'a str,
    /// Sum of word frequencies.
    pub score: usize,
    /// Index of the sentence's first occurrence.
    pub position: usize,
}

/// Score every distinct sentence; repeated sentences keep their first position.
pub fn score_sentences<'a>(
    sentences: &[&'a str],
    table: &WordFrequencyTable,
) -> Vec<ScoredSentence<'a>> {
    let mut seen = FxHashSet::default();
    sentences
        .iter()
        .enumerate()
        .filter(|(_, text)| seen.insert(**text))
        .map(|(position, &text)| ScoredSentence {
            text,
            score: table.score(text),
            position,
        })
        .collect()
}

/// Keep the `count` highest-scoring sentences, best first, ties in document order.
pub fn select_top<'a>(
    mut scored: Vec<ScoredSentence<'a>>,
    count: usize,
) -> Vec<ScoredSentence<'a>> {
    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));
    scored.truncate(count);
    scored
}
