//! Sentence segmentation with Punkt-style boundary decisions.
//!
//! A candidate boundary is a run of `.`, `!` or `?` (plus any closing quotes or brackets)
//! followed by whitespace. `!` and `?` always end a sentence, as does a period after an ordinary
//! word or a number, whatever the case of the next word. After a known abbreviation, a
//! single-letter initial or an ellipsis the sentence only ends when the next word is a
//! capitalized common word (`The`, `Then`, `We`, ...). Line breaks alone never end a sentence.

use super::stopwords::StopwordFilter;
use rustc_hash::FxHashSet;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "cf",
    "al", "inc", "ltd", "corp", "dept", "univ", "fig", "figs", "eq", "vol", "vols", "ed", "eds",
    "pp", "approx", "est", "gen", "gov", "sen", "rep", "rev", "capt", "col", "lt", "sgt", "jan",
    "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k",
    "a.m", "p.m", "ph.d",
];

const CLOSING: &[char] = &['"', '\'', ')', ']', '}', '\u{201D}', '\u{2019}', '\u{00BB}'];

/// Splits text into sentences, preserving their original text.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: FxHashSet<&'static str>,
    sentence_starters: StopwordFilter,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplitter {
    /// Splitter with the built-in English abbreviations; common words come from the English
    /// stopword list.
    pub fn new() -> Self {
        Self::with_sentence_starters(StopwordFilter::english())
    }

    /// Splitter that accepts a break after an abbreviation when the next word, lowercased, is in
    /// `sentence_starters`.
    pub fn with_sentence_starters(sentence_starters: StopwordFilter) -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
            sentence_starters,
        }
    }

    /// Split `text` into trimmed, non-empty sentences in document order.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            if !is_terminator(ch) {
                continue;
            }
            let mut end = index + ch.len_utf8();
            while let Some(&(next, c)) = chars.peek() {
                if !is_terminator(c) && !CLOSING.contains(&c) {
                    break;
                }
                end = next + c.len_utf8();
                chars.next();
            }

            let rest = &text[end..];
            if !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let word = text[start..index]
                .rsplit(char::is_whitespace)
                .next()
                .unwrap_or_default();
            if self.breaks_after(word, &text[index..end], rest.split_whitespace().next()) {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
        }
        push_trimmed(&mut sentences, &text[start..]);

        sentences
    }

    /// Decide whether `word` followed by the terminator run `marks` closes a sentence.
    fn breaks_after(&self, word: &str, marks: &str, next: Option<&str>) -> bool {
        let terminal = marks.trim_end_matches(CLOSING);
        if terminal.contains(['!', '?']) {
            return true;
        }
        let ellipsis = terminal.len() > 1;
        if ellipsis || self.is_abbreviation(word) {
            return self.starts_sentence(next);
        }
        true
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
        let mut chars = word.chars();
        let is_initial =
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
        is_initial || self.abbreviations.contains(word.to_lowercase().as_str())
    }

    fn starts_sentence(&self, next: Option<&str>) -> bool {
        let Some(token) = next else {
            return true;
        };
        let word: String = token
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .take_while(|c| c.is_alphabetic())
            .collect();
        let capitalized = word.chars().next().is_some_and(char::is_uppercase);
        capitalized
            && word.chars().count() > 1
            && self
                .sentence_starters
                .is_stopword(&word.to_lowercase())
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, span: &'a str) {
    let trimmed = span.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
