use super::Slot;
use crate::types::{SegmentBounds, TimingSource};

/// Pass 2: give every unplaced position a share of the gap between its nearest anchors.
///
/// Anchors are looked up by index, so repeated words never confuse which anchor
/// bounds a gap. Each run of consecutive unplaced positions splits its gap evenly.
pub(super) fn fill(placed: &[Option<Slot>], bounds: SegmentBounds, confidence: f64) -> Vec<Slot> {
    let n = placed.len();

    let mut prev_anchor = vec![None; n];
    let mut last = None;
    for (i, slot) in placed.iter().enumerate() {
        prev_anchor[i] = last;
        if slot.is_some() {
            last = Some(i);
        }
    }

    let mut next_anchor = vec![None; n];
    let mut last = None;
    for i in (0..n).rev() {
        next_anchor[i] = last;
        if placed[i].is_some() {
            last = Some(i);
        }
    }

    placed
        .iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(anchored) => *anchored,
            None => {
                let prev = prev_anchor[i].and_then(|p| placed[p].map(|s| (p, s)));
                let next = next_anchor[i].and_then(|q| placed[q].map(|s| (q, s)));
                interpolate(i, n, prev, next, bounds, confidence)
            }
        })
        .collect()
}

fn interpolate(
    i: usize,
    n: usize,
    prev: Option<(usize, Slot)>,
    next: Option<(usize, Slot)>,
    bounds: SegmentBounds,
    confidence: f64,
) -> Slot {
    // (gap start, gap end, unplaced positions sharing the gap, position within them)
    let (gap_start, gap_end, run_len, pos) = match (prev, next) {
        (Some((p, before)), Some((q, after))) => (before.end, after.start, q - p - 1, i - p - 1),
        (Some((p, before)), None) => (before.end, bounds.end, n - p - 1, i - p - 1),
        (None, Some((q, after))) => (bounds.start, after.start, q, i),
        (None, None) => (bounds.start, bounds.end, n, i),
    };

    let (start, end) = share_of(gap_start, gap_end, run_len, pos);
    tracing::debug!(
        index = i,
        prev_anchor = prev.map(|(p, _)| p),
        next_anchor = next.map(|(q, _)| q),
        gap_start,
        gap_end,
        run_len,
        start,
        end,
        "interpolation: placed inserted word"
    );

    Slot {
        start,
        end,
        confidence,
        source: TimingSource::Interpolated,
    }
}

/// Even split of the whole segment across `n` positions.
pub(super) fn even_split(n: usize, bounds: SegmentBounds, confidence: f64) -> Vec<Slot> {
    (0..n)
        .map(|i| {
            let (start, end) = share_of(bounds.start, bounds.end, n, i);
            Slot {
                start,
                end,
                confidence,
                source: TimingSource::Interpolated,
            }
        })
        .collect()
}

/// Interval `pos` of `[gap_start, gap_end]` cut into `run_len` equal pieces.
/// The last piece ends exactly on `gap_end` so it meets the following anchor.
pub(super) fn share_of(gap_start: f64, gap_end: f64, run_len: usize, pos: usize) -> (f64, f64) {
    let run_len = run_len.max(1);
    let width = (gap_end - gap_start) / run_len as f64;
    let start = gap_start + width * pos as f64;
    let end = if pos + 1 >= run_len {
        gap_end
    } else {
        gap_start + width * (pos + 1) as f64
    };
    (start, end)
}
