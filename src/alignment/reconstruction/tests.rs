use super::interpolation::{fill, share_of};
use super::repair::is_well_formed;
use super::{distribute_evenly, reconstruct, reconstruct_detailed, Slot};
use crate::alignment::diff::diff_words;
use crate::config::RetimeConfig;
use crate::types::{EditOp, SegmentBounds, TimedWord, TimingSource};

fn word(text: &str, start: f64, end: f64) -> TimedWord {
    TimedWord::new(text, start, end, 1.0)
}

fn anchor(start: f64, end: f64) -> Option<Slot> {
    Some(Slot {
        start,
        end,
        confidence: 1.0,
        source: TimingSource::Kept,
    })
}

fn exact(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn retime(old: &[TimedWord], new_text: &str, bounds: SegmentBounds) -> super::Reconstruction {
    let old_texts: Vec<&str> = old.iter().map(|w| w.text.as_str()).collect();
    let new_words: Vec<&str> = new_text.split_whitespace().collect();
    let script = diff_words(&old_texts, &new_words, exact);
    reconstruct_detailed(old, &script, &new_words, bounds, &RetimeConfig::default())
}

fn spans(words: &[TimedWord]) -> Vec<(f64, f64)> {
    words.iter().map(|w| (w.start, w.end)).collect()
}

#[test]
fn keep_copies_timing_and_confidence() {
    let old = vec![TimedWord::new("hello", 0.2, 0.9, 0.93)];
    let out = retime(&old, "Hello", SegmentBounds::new(0.0, 1.0));
    assert_eq!(out.words, vec![TimedWord::new("Hello", 0.2, 0.9, 0.93)]);
    assert_eq!(out.sources, vec![TimingSource::Kept]);
    assert_eq!(out.repaired, 0);
}

#[test]
fn replace_inherits_slot_with_scaled_confidence() {
    let old = vec![word("hello", 0.0, 5.0), word("world", 5.0, 10.0)];
    let out = retime(&old, "hello universe", SegmentBounds::new(0.0, 10.0));
    assert_eq!(spans(&out.words), vec![(0.0, 5.0), (5.0, 10.0)]);
    assert_eq!(out.words[1].text, "universe");
    assert!((out.words[1].confidence - 0.8).abs() < 1e-12);
    assert_eq!(
        out.sources,
        vec![TimingSource::Kept, TimingSource::Replaced]
    );
}

#[test]
fn insert_between_anchors_fills_gap() {
    let old = vec![word("hello", 0.0, 3.0), word("world", 7.0, 10.0)];
    let out = retime(&old, "hello beautiful world", SegmentBounds::new(0.0, 10.0));
    assert_eq!(spans(&out.words), vec![(0.0, 3.0), (3.0, 7.0), (7.0, 10.0)]);
    assert_eq!(out.words[1].confidence, 0.5);
    assert_eq!(out.sources[1], TimingSource::Interpolated);
}

#[test]
fn consecutive_inserts_split_gap_evenly() {
    let old = vec![word("a", 0.0, 1.0), word("d", 4.0, 5.0)];
    let out = retime(&old, "a b c d", SegmentBounds::new(0.0, 5.0));
    assert_eq!(
        spans(&out.words),
        vec![(0.0, 1.0), (1.0, 2.5), (2.5, 4.0), (4.0, 5.0)]
    );
}

#[test]
fn trailing_inserts_use_segment_end() {
    let old = vec![word("start", 0.0, 2.0)];
    let out = retime(&old, "start and then more", SegmentBounds::new(0.0, 8.0));
    assert_eq!(
        spans(&out.words),
        vec![(0.0, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 8.0)]
    );
}

#[test]
fn leading_inserts_use_segment_start() {
    let old = vec![word("end", 6.0, 8.0)];
    let out = retime(&old, "right at the end", SegmentBounds::new(0.0, 8.0));
    assert_eq!(
        spans(&out.words),
        vec![(0.0, 2.0), (2.0, 4.0), (4.0, 6.0), (6.0, 8.0)]
    );
}

#[test]
fn deletion_drops_word_and_keeps_neighbours_exact() {
    let old = vec![
        word("hello", 0.0, 3.0),
        word("beautiful", 3.0, 6.0),
        word("world", 6.0, 10.0),
    ];
    let out = retime(&old, "hello world", SegmentBounds::new(0.0, 10.0));
    assert_eq!(spans(&out.words), vec![(0.0, 3.0), (6.0, 10.0)]);
    assert_eq!(out.repaired, 0);
}

#[test]
fn repeated_words_use_positional_anchors() {
    // "the" appears twice; the inserted word belongs in the gap before the
    // second one, not next to the first match a value lookup would return.
    let old = vec![
        word("the", 0.0, 1.0),
        word("cat", 1.0, 2.0),
        word("sat", 2.0, 3.0),
        word("the", 5.0, 6.0),
        word("mat", 6.0, 7.0),
    ];
    let bounds = SegmentBounds::new(0.0, 7.0);
    let out = retime(&old, "the cat sat on the mat", bounds);
    assert_eq!(out.sources[3], TimingSource::Interpolated);
    assert_eq!(
        spans(&out.words),
        vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 5.0), (5.0, 6.0), (6.0, 7.0)]
    );
    assert!(is_sane(&out.words, bounds));
}

#[test]
fn overlapping_original_timing_is_repaired() {
    let old = vec![word("one", 0.0, 2.0), word("two", 1.5, 3.0)];
    let out = retime(&old, "one two", SegmentBounds::new(0.0, 3.0));
    assert_eq!(spans(&out.words), vec![(0.0, 2.0), (2.0, 3.0)]);
    assert_eq!(out.repaired, 1);
}

#[test]
fn out_of_bounds_original_timing_is_clamped() {
    let old = vec![word("early", -0.5, 1.0), word("late", 9.0, 11.0)];
    let bounds = SegmentBounds::new(0.0, 10.0);
    let out = retime(&old, "early late", bounds);
    assert_eq!(spans(&out.words), vec![(0.0, 1.0), (9.0, 10.0)]);
    assert!(is_sane(&out.words, bounds));
}

#[test]
fn inserts_into_zero_width_gap_get_minimum_duration() {
    let old = vec![word("a", 0.0, 5.0), word("c", 5.0, 10.0)];
    let bounds = SegmentBounds::new(0.0, 10.0);
    let out = retime(&old, "a b c", bounds);
    assert_eq!(out.words.len(), 3);
    assert!(is_sane(&out.words, bounds), "{:?}", spans(&out.words));
    assert!(out.words[1].end - out.words[1].start > 0.0);
}

#[test]
fn empty_new_words_produce_nothing() {
    let old = vec![word("gone", 0.0, 1.0)];
    let script = vec![EditOp::Delete { old: 0 }];
    let words = reconstruct(&old, &script, &[], SegmentBounds::new(0.0, 1.0), &RetimeConfig::default());
    assert!(words.is_empty());
}

#[test]
fn distribute_evenly_spans_segment() {
    let out = distribute_evenly(&["hello", "world"], SegmentBounds::new(0.0, 10.0), &RetimeConfig::default());
    assert_eq!(spans(&out.words), vec![(0.0, 5.0), (5.0, 10.0)]);
    assert!(out.words.iter().all(|w| w.confidence == 0.5));
    assert!(out.sources.iter().all(|s| *s == TimingSource::Interpolated));
}

#[test]
fn fill_without_anchors_splits_segment() {
    let slots = fill(&[None, None, None, None], SegmentBounds::new(2.0, 6.0), 0.5);
    let got: Vec<(f64, f64)> = slots.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(got, vec![(2.0, 3.0), (3.0, 4.0), (4.0, 5.0), (5.0, 6.0)]);
}

#[test]
fn fill_leaves_anchors_untouched() {
    let placed = vec![anchor(1.0, 2.0), None, anchor(4.0, 5.0)];
    let slots = fill(&placed, SegmentBounds::new(0.0, 5.0), 0.5);
    assert_eq!(Some(slots[0]), placed[0]);
    assert_eq!(Some(slots[2]), placed[2]);
    assert_eq!((slots[1].start, slots[1].end), (2.0, 4.0));
    assert!(is_well_formed(&slots, SegmentBounds::new(0.0, 5.0)));
}

#[test]
fn share_of_last_piece_meets_gap_end() {
    let (start, end) = share_of(0.1, 0.7, 3, 2);
    assert!((start - 0.5).abs() < 1e-12);
    assert_eq!(end, 0.7);
    assert_eq!(share_of(1.0, 2.0, 1, 0), (1.0, 2.0));
}

fn is_sane(words: &[TimedWord], bounds: SegmentBounds) -> bool {
    let contained = words
        .iter()
        .all(|w| w.start >= bounds.start && w.end <= bounds.end && w.end > w.start);
    let ordered = words.windows(2).all(|w| w[1].start >= w[0].end);
    contained && ordered
}
