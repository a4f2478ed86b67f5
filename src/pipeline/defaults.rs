use crate::alignment::diff::diff_words;
use crate::alignment::reconstruction::{reconstruct_detailed, Reconstruction};
use crate::alignment::similarity::are_words_similar;
use crate::config::RetimeConfig;
use crate::pipeline::traits::{SequenceDiffer, TimingReconstructor, WordMatcher};
use crate::types::{EditOp, SegmentBounds, TimedWord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityMatcher {
    pub threshold: f64,
}

impl SimilarityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(RetimeConfig::DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl WordMatcher for SimilarityMatcher {
    fn matches(&self, old_word: &str, new_word: &str) -> bool {
        are_words_similar(old_word, new_word, self.threshold)
    }
}

pub struct LcsSequenceDiffer;

impl SequenceDiffer for LcsSequenceDiffer {
    fn diff(
        &self,
        old_words: &[&str],
        new_words: &[&str],
        matcher: &dyn WordMatcher,
    ) -> Vec<EditOp> {
        diff_words(old_words, new_words, |a: &str, b: &str| matcher.matches(a, b))
    }
}

pub struct AnchoredTimingReconstructor;

impl TimingReconstructor for AnchoredTimingReconstructor {
    fn reconstruct(
        &self,
        old_words: &[TimedWord],
        script: &[EditOp],
        new_words: &[&str],
        bounds: SegmentBounds,
        config: &RetimeConfig,
    ) -> Reconstruction {
        reconstruct_detailed(old_words, script, new_words, bounds, config)
    }
}
