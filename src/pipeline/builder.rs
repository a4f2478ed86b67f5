use crate::config::RetimeConfig;
use crate::error::RetimeError;
use crate::pipeline::defaults::{AnchoredTimingReconstructor, LcsSequenceDiffer, SimilarityMatcher};
use crate::pipeline::runtime::{WordRetimer, WordRetimerParts};
use crate::pipeline::traits::{SequenceDiffer, TimingReconstructor, WordMatcher};

pub struct WordRetimerBuilder {
    config: RetimeConfig,
    word_matcher: Option<Box<dyn WordMatcher>>,
    sequence_differ: Option<Box<dyn SequenceDiffer>>,
    timing_reconstructor: Option<Box<dyn TimingReconstructor>>,
}

impl WordRetimerBuilder {
    pub fn new(config: RetimeConfig) -> Self {
        Self {
            config,
            word_matcher: None,
            sequence_differ: None,
            timing_reconstructor: None,
        }
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.config.similarity_threshold = threshold;
        self
    }

    /// Replaces the similarity matcher. `similarity_threshold` is then unused.
    pub fn with_word_matcher(mut self, word_matcher: Box<dyn WordMatcher>) -> Self {
        self.word_matcher = Some(word_matcher);
        self
    }

    pub fn with_sequence_differ(mut self, sequence_differ: Box<dyn SequenceDiffer>) -> Self {
        self.sequence_differ = Some(sequence_differ);
        self
    }

    pub fn with_timing_reconstructor(
        mut self,
        timing_reconstructor: Box<dyn TimingReconstructor>,
    ) -> Self {
        self.timing_reconstructor = Some(timing_reconstructor);
        self
    }

    pub fn build(self) -> Result<WordRetimer, RetimeError> {
        self.config.validate()?;
        let threshold = self.config.similarity_threshold;

        Ok(WordRetimer::from_parts(WordRetimerParts {
            config: self.config,
            word_matcher: self
                .word_matcher
                .unwrap_or_else(|| Box::new(SimilarityMatcher::new(threshold))),
            sequence_differ: self
                .sequence_differ
                .unwrap_or_else(|| Box::new(LcsSequenceDiffer)),
            timing_reconstructor: self
                .timing_reconstructor
                .unwrap_or_else(|| Box::new(AnchoredTimingReconstructor)),
        }))
    }
}

impl Default for WordRetimerBuilder {
    fn default() -> Self {
        Self::new(RetimeConfig::default())
    }
}
