use crate::config::RetimeConfig;
use crate::types::{EditOp, SegmentBounds, TimedWord, TimingSource};

mod anchors;
mod interpolation;
mod repair;
#[cfg(test)]
mod tests;

/// Timing decided for one new-word position before it is turned into a `TimedWord`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Slot {
    start: f64,
    end: f64,
    confidence: f64,
    source: TimingSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub words: Vec<TimedWord>,
    pub sources: Vec<TimingSource>,
    /// Number of words whose start or end the repair pass had to move.
    pub repaired: usize,
}

/// Assign timing to every word of `new_words` from the edit script against `old_words`.
pub fn reconstruct(
    old_words: &[TimedWord],
    script: &[EditOp],
    new_words: &[&str],
    bounds: SegmentBounds,
    config: &RetimeConfig,
) -> Vec<TimedWord> {
    reconstruct_detailed(old_words, script, new_words, bounds, config).words
}

pub fn reconstruct_detailed(
    old_words: &[TimedWord],
    script: &[EditOp],
    new_words: &[&str],
    bounds: SegmentBounds,
    config: &RetimeConfig,
) -> Reconstruction {
    if new_words.is_empty() {
        return Reconstruction {
            words: Vec::new(),
            sources: Vec::new(),
            repaired: 0,
        };
    }

    let placed = anchors::place(
        old_words,
        script,
        new_words.len(),
        config.replace_confidence_scale,
    );
    let mut slots = interpolation::fill(&placed, bounds, config.interpolated_confidence);
    let repaired = repair::repair(&mut slots, bounds, config.min_word_duration_secs);

    finish(new_words, slots, repaired)
}

/// Spread `new_words` evenly across the whole segment. Used when there is no
/// original timing to align against.
pub fn distribute_evenly(
    new_words: &[&str],
    bounds: SegmentBounds,
    config: &RetimeConfig,
) -> Reconstruction {
    if new_words.is_empty() {
        return Reconstruction {
            words: Vec::new(),
            sources: Vec::new(),
            repaired: 0,
        };
    }

    let mut slots = interpolation::even_split(new_words.len(), bounds, config.interpolated_confidence);
    let repaired = repair::repair(&mut slots, bounds, config.min_word_duration_secs);
    finish(new_words, slots, repaired)
}

fn finish(new_words: &[&str], slots: Vec<Slot>, repaired: usize) -> Reconstruction {
    let mut words = Vec::with_capacity(slots.len());
    let mut sources = Vec::with_capacity(slots.len());
    for (text, slot) in new_words.iter().zip(slots) {
        tracing::debug!(
            word = *text,
            start = slot.start,
            end = slot.end,
            confidence = slot.confidence,
            source = slot.source.as_str(),
            "reconstruction: final word timing"
        );
        words.push(TimedWord {
            text: (*text).to_string(),
            start: slot.start,
            end: slot.end,
            confidence: slot.confidence,
        });
        sources.push(slot.source);
    }
    Reconstruction {
        words,
        sources,
        repaired,
    }
}
