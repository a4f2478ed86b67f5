use super::Slot;
use crate::types::{EditOp, TimedWord, TimingSource};

/// Pass 1: copy timing from old words onto the new positions they survive at.
///
/// Returns one entry per new word; `None` marks a position left for interpolation.
pub(super) fn place(
    old_words: &[TimedWord],
    script: &[EditOp],
    new_len: usize,
    replace_confidence_scale: f64,
) -> Vec<Option<Slot>> {
    let mut placed: Vec<Option<Slot>> = vec![None; new_len];

    for op in script {
        let (old_idx, new_idx, source) = match *op {
            EditOp::Keep { old, new } => (old, new, TimingSource::Kept),
            EditOp::Replace { old, new } => (old, new, TimingSource::Replaced),
            EditOp::Delete { .. } | EditOp::Insert { .. } => continue,
        };

        let (Some(old_word), Some(target)) = (old_words.get(old_idx), placed.get_mut(new_idx))
        else {
            tracing::warn!(
                old_idx,
                new_idx,
                old_len = old_words.len(),
                new_len,
                "reconstruction: edit script index out of range, leaving slot for interpolation"
            );
            continue;
        };
        debug_assert!(target.is_none(), "new index {new_idx} placed twice");

        let confidence = match source {
            TimingSource::Replaced => old_word.confidence * replace_confidence_scale,
            _ => old_word.confidence,
        };
        *target = Some(Slot {
            start: old_word.start,
            end: old_word.end,
            confidence,
            source,
        });
    }

    placed
}
