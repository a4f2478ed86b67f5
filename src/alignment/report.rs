use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{EditSummary, RetimeOutput, SegmentBounds, TimedWord, TimingSource};

const LOW_CONF_THRESHOLD: f64 = 0.6;
pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub cases: Vec<CaseReport>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub similarity_threshold: f64,
    pub case_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub id: String,
    pub segment: SegmentBounds,
    pub old_word_count: u32,
    pub new_word_count: u32,
    pub edits: EditSummary,
    pub structural: StructuralMetrics,
    pub confidence: ConfidenceMetrics,
    /// Share of new words that took their timing from an old word.
    pub anchor_ratio: f64,
    pub repaired_word_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordTrace>>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuralMetrics {
    pub non_positive_duration_word_count: u32,
    pub overlap_word_count: u32,
    pub out_of_bounds_word_count: u32,
    /// Spoken time over segment span.
    pub coverage_ratio: f64,
}

impl StructuralMetrics {
    pub fn violation_count(&self) -> u32 {
        self.non_positive_duration_word_count
            + self.overlap_word_count
            + self.out_of_bounds_word_count
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfidenceMetrics {
    pub word_conf_mean: f64,
    pub word_conf_min: f64,
    pub low_conf_word_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordTrace {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    pub source: TimingSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub edits: EditSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_conf_mean: Option<MetricDistribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_ratio: Option<MetricDistribution>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub unchanged: u32,
    pub with_interpolation: u32,
    pub with_repairs: u32,
    pub with_structural_violations: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDistribution {
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub min: f64,
}

pub fn compute_case_report(
    id: &str,
    old_words: &[TimedWord],
    output: &RetimeOutput,
    bounds: SegmentBounds,
    include_words: bool,
) -> CaseReport {
    let mut notes = Vec::new();
    if old_words.is_empty() {
        notes.push("no_original_timing".to_string());
    }
    if output.words.is_empty() {
        notes.push("no_new_words".to_string());
    }
    if output.summary.is_identity() && !output.words.is_empty() {
        notes.push("identity_edit".to_string());
    }

    let structural = compute_structural_metrics(&output.words, bounds);
    if structural.violation_count() > 0 {
        notes.push(format!(
            "structural_violations={}",
            structural.violation_count()
        ));
    }

    let anchors = output.sources.iter().filter(|s| s.is_anchor()).count();
    let anchor_ratio = if output.words.is_empty() {
        0.0
    } else {
        anchors as f64 / output.words.len() as f64
    };

    let words = include_words.then(|| {
        output
            .words
            .iter()
            .zip(&output.sources)
            .map(|(word, source)| WordTrace {
                text: word.text.clone(),
                start: word.start,
                end: word.end,
                confidence: word.confidence,
                source: *source,
            })
            .collect()
    });

    CaseReport {
        id: id.to_string(),
        segment: bounds,
        old_word_count: to_u32(old_words.len()),
        new_word_count: to_u32(output.words.len()),
        edits: output.summary,
        structural,
        confidence: compute_confidence_metrics(&output.words),
        anchor_ratio,
        repaired_word_count: to_u32(output.repaired),
        words,
        notes,
    }
}

pub fn aggregate_reports(cases: &[CaseReport]) -> AggregateReport {
    let mut edits = EditSummary::default();
    for case in cases {
        edits.kept += case.edits.kept;
        edits.replaced += case.edits.replaced;
        edits.deleted += case.edits.deleted;
        edits.inserted += case.edits.inserted;
    }

    let non_empty: Vec<&CaseReport> = cases.iter().filter(|c| c.new_word_count > 0).collect();
    let conf_means: Vec<f64> = non_empty.iter().map(|c| c.confidence.word_conf_mean).collect();
    let anchor_ratios: Vec<f64> = non_empty.iter().map(|c| c.anchor_ratio).collect();

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(cases.len()),
            unchanged: count(cases, |c| c.edits.is_identity()),
            with_interpolation: count(cases, |c| c.edits.inserted > 0 || c.old_word_count == 0),
            with_repairs: count(cases, |c| c.repaired_word_count > 0),
            with_structural_violations: count(cases, |c| c.structural.violation_count() > 0),
        },
        edits,
        word_conf_mean: distribution_or_none(&conf_means),
        anchor_ratio: distribution_or_none(&anchor_ratios),
    }
}

fn count(cases: &[CaseReport], pred: impl Fn(&CaseReport) -> bool) -> u32 {
    to_u32(cases.iter().filter(|c| pred(*c)).count())
}

fn compute_structural_metrics(words: &[TimedWord], bounds: SegmentBounds) -> StructuralMetrics {
    let non_positive = words.iter().filter(|w| w.end <= w.start).count();
    let out_of_bounds = words
        .iter()
        .filter(|w| w.start < bounds.start || w.end > bounds.end)
        .count();
    let overlaps = words.windows(2).filter(|p| p[1].start < p[0].end).count();

    let spoken: f64 = words.iter().map(|w| w.duration().max(0.0)).sum();
    let span = bounds.span();
    let coverage_ratio = if span > 0.0 { spoken / span } else { 0.0 };

    StructuralMetrics {
        non_positive_duration_word_count: to_u32(non_positive),
        overlap_word_count: to_u32(overlaps),
        out_of_bounds_word_count: to_u32(out_of_bounds),
        coverage_ratio,
    }
}

fn compute_confidence_metrics(words: &[TimedWord]) -> ConfidenceMetrics {
    if words.is_empty() {
        return ConfidenceMetrics {
            word_conf_mean: 0.0,
            word_conf_min: 0.0,
            low_conf_word_ratio: 0.0,
        };
    }
    let values: Vec<f64> = words.iter().map(|w| w.confidence).collect();
    let low = values.iter().filter(|&&c| c < LOW_CONF_THRESHOLD).count();
    ConfidenceMetrics {
        word_conf_mean: mean(&values),
        word_conf_min: values.iter().copied().fold(f64::INFINITY, f64::min),
        low_conf_word_ratio: low as f64 / values.len() as f64,
    }
}

fn distribution_or_none(values: &[f64]) -> Option<MetricDistribution> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(MetricDistribution {
        mean: mean(&sorted),
        p50: percentile_sorted(&sorted, 0.5),
        p90: percentile_sorted(&sorted, 0.9),
        min: sorted[0],
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn percentile_sorted(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }
    if sorted_values.len() == 1 {
        return sorted_values[0];
    }

    let clamped = percentile.clamp(0.0, 1.0);
    let max_index = (sorted_values.len() - 1) as f64;
    let rank = clamped * max_index;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = rank - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
