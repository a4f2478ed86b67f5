use super::interpolation::share_of;
use super::Slot;
use crate::types::SegmentBounds;

/// Pass 3: enforce containment, ordering and positive duration. Returns how many
/// slots changed.
///
/// The local pass clamps the outer edges, pushes each start past the previous
/// end (flooring collapsed words to `min_duration`) and re-clamps into the
/// segment. If clamping at the tail collapsed or reordered words, they are
/// compacted backwards from the segment end; if the segment cannot hold them at
/// `min_duration` each, the whole run is split evenly instead.
pub(super) fn repair(slots: &mut [Slot], bounds: SegmentBounds, min_duration: f64) -> usize {
    if slots.is_empty() {
        return 0;
    }
    let before: Vec<(f64, f64)> = slots.iter().map(|s| (s.start, s.end)).collect();

    clamp_edges(slots, bounds);
    push_forward(slots, min_duration);
    for slot in slots.iter_mut() {
        slot.start = bounds.clamp(slot.start);
        slot.end = bounds.clamp(slot.end);
    }

    if !is_well_formed(slots, bounds) {
        compact_backward(slots, bounds, min_duration);
    }
    if !is_well_formed(slots, bounds) {
        tracing::warn!(
            words = slots.len(),
            span = bounds.span(),
            min_duration,
            "repair: segment too short for every word at minimum duration, splitting evenly"
        );
        let n = slots.len();
        for (i, slot) in slots.iter_mut().enumerate() {
            let (start, end) = share_of(bounds.start, bounds.end, n, i);
            slot.start = start;
            slot.end = end;
        }
    }

    let changed = slots
        .iter()
        .zip(&before)
        .filter(|(slot, original)| slot.start != original.0 || slot.end != original.1)
        .count();
    if changed > 0 {
        tracing::debug!(changed, "repair: adjusted word boundaries");
    }
    changed
}

fn clamp_edges(slots: &mut [Slot], bounds: SegmentBounds) {
    if let Some(first) = slots.first_mut() {
        if first.start < bounds.start {
            first.start = bounds.start;
        }
    }
    if let Some(last) = slots.last_mut() {
        if last.end > bounds.end {
            last.end = bounds.end;
        }
    }
}

fn push_forward(slots: &mut [Slot], min_duration: f64) {
    let mut prev_end: Option<f64> = None;
    for slot in slots.iter_mut() {
        if let Some(prev_end) = prev_end {
            if slot.start < prev_end {
                slot.start = prev_end;
            }
        }
        if slot.end <= slot.start {
            slot.end = slot.start + min_duration;
        }
        prev_end = Some(slot.end);
    }
}

fn compact_backward(slots: &mut [Slot], bounds: SegmentBounds, min_duration: f64) {
    let mut limit = bounds.end;
    for slot in slots.iter_mut().rev() {
        if slot.end > limit {
            slot.end = limit;
        }
        if slot.start > slot.end {
            slot.start = slot.end;
        }
        if slot.end <= slot.start {
            slot.start = slot.end - min_duration;
        }
        limit = slot.start;
    }
}

pub(super) fn is_well_formed(slots: &[Slot], bounds: SegmentBounds) -> bool {
    let contained = slots
        .iter()
        .all(|s| s.start >= bounds.start && s.end <= bounds.end && s.end > s.start);
    let ordered = slots.windows(2).all(|w| w[1].start >= w[0].end);
    contained && ordered
}
