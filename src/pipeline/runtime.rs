use crate::alignment::reconstruction::distribute_evenly;
use crate::alignment::tokenization::{same_words_ignore_case, split_words};
use crate::config::RetimeConfig;
use crate::pipeline::builder::WordRetimerBuilder;
use crate::pipeline::defaults::{AnchoredTimingReconstructor, LcsSequenceDiffer, SimilarityMatcher};
use crate::pipeline::traits::{SequenceDiffer, TimingReconstructor, WordMatcher};
use crate::types::{EditSummary, RetimeOutput, SegmentBounds, TimedWord};

/// Recomputes word timing for edited caption text.
///
/// Holds no per-call state, so one retimer can serve any number of threads.
pub struct WordRetimer {
    config: RetimeConfig,
    word_matcher: Box<dyn WordMatcher>,
    sequence_differ: Box<dyn SequenceDiffer>,
    timing_reconstructor: Box<dyn TimingReconstructor>,
}

pub(crate) struct WordRetimerParts {
    pub config: RetimeConfig,
    pub word_matcher: Box<dyn WordMatcher>,
    pub sequence_differ: Box<dyn SequenceDiffer>,
    pub timing_reconstructor: Box<dyn TimingReconstructor>,
}

impl WordRetimer {
    pub(crate) fn from_parts(parts: WordRetimerParts) -> Self {
        Self {
            config: parts.config,
            word_matcher: parts.word_matcher,
            sequence_differ: parts.sequence_differ,
            timing_reconstructor: parts.timing_reconstructor,
        }
    }

    pub fn builder() -> WordRetimerBuilder {
        WordRetimerBuilder::default()
    }

    pub fn config(&self) -> &RetimeConfig {
        &self.config
    }

    /// Timed words for `new_text`, one per whitespace-separated word, inside
    /// `[segment_start, segment_end]`. The caller guarantees `segment_end > segment_start`.
    pub fn retime(
        &self,
        old_words: &[TimedWord],
        new_text: &str,
        segment_start: f64,
        segment_end: f64,
    ) -> Vec<TimedWord> {
        self.retime_detailed(
            old_words,
            new_text,
            SegmentBounds::new(segment_start, segment_end),
        )
        .words
    }

    pub fn retime_detailed(
        &self,
        old_words: &[TimedWord],
        new_text: &str,
        bounds: SegmentBounds,
    ) -> RetimeOutput {
        let new_words = split_words(new_text);
        if new_words.is_empty() {
            return RetimeOutput::empty();
        }

        if old_words.is_empty() {
            tracing::debug!(
                new_words = new_words.len(),
                "retime: no original timing, distributing across segment"
            );
            let spread = distribute_evenly(&new_words, bounds, &self.config);
            return RetimeOutput {
                words: spread.words,
                sources: spread.sources,
                summary: EditSummary {
                    inserted: new_words.len(),
                    ..EditSummary::default()
                },
                repaired: spread.repaired,
            };
        }

        let old_texts: Vec<&str> = old_words.iter().map(|w| w.text.as_str()).collect();
        let script = self
            .sequence_differ
            .diff(&old_texts, &new_words, self.word_matcher.as_ref());
        let summary = EditSummary::from_script(&script);
        tracing::debug!(
            old_words = old_texts.len(),
            new_words = new_words.len(),
            kept = summary.kept,
            replaced = summary.replaced,
            deleted = summary.deleted,
            inserted = summary.inserted,
            "retime: edit script"
        );

        let rebuilt = self.timing_reconstructor.reconstruct(
            old_words,
            &script,
            &new_words,
            bounds,
            &self.config,
        );
        debug_assert_eq!(
            rebuilt.words.len(),
            new_words.len(),
            "timing reconstructor must emit one word per new word"
        );

        RetimeOutput {
            words: rebuilt.words,
            sources: rebuilt.sources,
            summary,
            repaired: rebuilt.repaired,
        }
    }

    /// False only when the edit left every word in place up to letter case.
    pub fn needs_recalculation(&self, old_text: &str, new_text: &str) -> bool {
        !same_words_ignore_case(old_text, new_text)
    }
}

impl Default for WordRetimer {
    fn default() -> Self {
        let config = RetimeConfig::default();
        let threshold = config.similarity_threshold;
        Self::from_parts(WordRetimerParts {
            config,
            word_matcher: Box::new(SimilarityMatcher::new(threshold)),
            sequence_differ: Box::new(LcsSequenceDiffer),
            timing_reconstructor: Box::new(AnchoredTimingReconstructor),
        })
    }
}

/// Retime `old_words` onto `new_text` with the default configuration.
pub fn recalculate_word_timings(
    old_words: &[TimedWord],
    new_text: &str,
    segment_start: f64,
    segment_end: f64,
) -> Vec<TimedWord> {
    WordRetimer::default().retime(old_words, new_text, segment_start, segment_end)
}

/// Cheap pre-check: `false` when `new_text` has the same words as `old_text`
/// ignoring case, so the existing timing can be reused as is.
pub fn needs_recalculation(old_text: &str, new_text: &str) -> bool {
    !same_words_ignore_case(old_text, new_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn retimer_is_send_and_sync() {
        assert_send_sync::<WordRetimer>();
    }

    #[test]
    fn empty_text_returns_empty_output() {
        let old = vec![TimedWord::new("hello", 0.0, 1.0, 1.0)];
        let out = WordRetimer::default().retime_detailed(&old, "   ", SegmentBounds::new(0.0, 1.0));
        assert!(out.words.is_empty());
        assert!(out.sources.is_empty());
        assert_eq!(out.summary, EditSummary::default());
    }

    #[test]
    fn no_original_words_marks_everything_inserted() {
        let out = WordRetimer::default().retime_detailed(&[], "a b c", SegmentBounds::new(0.0, 3.0));
        assert_eq!(out.summary.inserted, 3);
        let spans: Vec<(f64, f64)> = out.words.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(spans, vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
    }

    #[test]
    fn spelling_fix_keeps_original_timing() {
        let old = vec![
            TimedWord::new("the", 0.0, 0.4, 0.95),
            TimedWord::new("colour", 0.4, 1.0, 0.9),
            TimedWord::new("red", 1.2, 1.8, 0.85),
        ];
        let out = WordRetimer::default().retime_detailed(&old, "the color red", SegmentBounds::new(0.0, 2.0));
        assert!(out.summary.is_identity());
        assert_eq!(out.words[1], TimedWord::new("color", 0.4, 1.0, 0.9));
        assert_eq!(out.repaired, 0);
    }

    #[test]
    fn needs_recalculation_method_matches_free_function() {
        let retimer = WordRetimer::default();
        for (a, b) in [("Hello World", "hello world"), ("a b", "a c"), ("", "")] {
            assert_eq!(retimer.needs_recalculation(a, b), needs_recalculation(a, b));
        }
    }
}
