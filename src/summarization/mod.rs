//! Extractive summarization by word frequency.
//!
//! The text is split into sentences, every non-stopword word is counted, and each sentence is
//! scored by summing the counts of its tokens. The highest-scoring sentences are returned in
//! score order (not document order), joined by single spaces.
//!
//! The stopword list and sentence splitter are process-wide. Call [`init_resources`] before
//! serving requests; otherwise they are built on first use.

pub mod frequency;
pub mod sentences;
pub mod stopwords;

use std::sync::OnceLock;

use frequency::{ScoredSentence, WordFrequencyTable, score_sentences, select_top};
use sentences::SentenceSplitter;
use stopwords::StopwordFilter;

/// Summary returned when a document has no extractable text.
pub const NO_CONTENT_MESSAGE: &str = "No content found in the document.";

/// Language resources shared by every summarization.
#[derive(Debug, Default)]
pub struct NlpResources {
    /// Words excluded from frequency counts.
    pub stopwords: StopwordFilter,
    /// Sentence segmentation rules.
    pub splitter: SentenceSplitter,
}

static RESOURCES: OnceLock<NlpResources> = OnceLock::new();

/// Build the shared language resources; later calls return the same instance.
pub fn init_resources() -> &'static NlpResources {
    RESOURCES.get_or_init(|| {
        let resources = NlpResources::default();
        tracing::debug!(
            stopwords = resources.stopwords.len(),
            "Initialized summarization resources"
        );
        resources
    })
}

/// Whether extracted text has anything worth summarizing.
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Frequency-based extractive summarizer.
pub struct Summarizer<'r> {
    resources: &'r NlpResources,
    sentence_count: usize,
}

impl Summarizer<'static> {
    /// Summarizer over the process-wide resources.
    pub fn shared(sentence_count: usize) -> Self {
        Self::new(init_resources(), sentence_count)
    }
}

impl<'r> Summarizer<'r> {
    /// Summarizer keeping at most `sentence_count` sentences.
    pub fn new(resources: &'r NlpResources, sentence_count: usize) -> Self {
        Self {
            resources,
            sentence_count,
        }
    }

    /// Rank the sentences of `text` and keep the best ones, best first.
    pub fn rank<'t>(&self, text: &'t str) -> Vec<ScoredSentence<'t>> {
        let sentences = self.resources.splitter.split(text);
        let table = WordFrequencyTable::build(text, &self.resources.stopwords);
        tracing::trace!(
            sentences = sentences.len(),
            distinct_words = table.len(),
            "Scoring sentences"
        );
        select_top(score_sentences(&sentences, &table), self.sentence_count)
    }

    /// Produce the summary string for `text`.
    ///
    /// Callers check [`has_content`] first; whitespace-only input yields an empty summary.
    pub fn summarize(&self, text: &str) -> String {
        self.rank(text)
            .iter()
            .map(|sentence| sentence.text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Summarize `text` with the shared resources.
pub fn generate_summary(text: &str, sentence_count: usize) -> String {
    Summarizer::shared(sentence_count).summarize(text)
}
