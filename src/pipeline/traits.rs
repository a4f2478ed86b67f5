use crate::alignment::reconstruction::Reconstruction;
use crate::config::RetimeConfig;
use crate::types::{EditOp, SegmentBounds, TimedWord};

/// Decides whether an old word and a new word are "the same word" for timing purposes.
pub trait WordMatcher: Send + Sync {
    fn matches(&self, old_word: &str, new_word: &str) -> bool;
}

impl<F> WordMatcher for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn matches(&self, old_word: &str, new_word: &str) -> bool {
        self(old_word, new_word)
    }
}

pub trait SequenceDiffer: Send + Sync {
    fn diff(&self, old_words: &[&str], new_words: &[&str], matcher: &dyn WordMatcher)
        -> Vec<EditOp>;
}

pub trait TimingReconstructor: Send + Sync {
    /// Must return exactly one word per entry of `new_words`, in order.
    fn reconstruct(
        &self,
        old_words: &[TimedWord],
        script: &[EditOp],
        new_words: &[&str],
        bounds: SegmentBounds,
        config: &RetimeConfig,
    ) -> Reconstruction;
}
