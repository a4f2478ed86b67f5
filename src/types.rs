use serde::{Deserialize, Serialize};

use crate::error::RetimeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    pub text: String,
    /// Seconds from the start of the media. Interval is [start, end].
    pub start: f64,
    /// Seconds from the start of the media. Always greater than `start`.
    pub end: f64,
    /// Certainty in [0, 1]. Recognizer confidence for transcribed words,
    /// alignment certainty for words produced by retiming.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl TimedWord {
    pub fn new(text: impl Into<String>, start: f64, end: f64, confidence: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Closed time window of one caption segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentBounds {
    pub start: f64,
    pub end: f64,
}

impl SegmentBounds {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Checked constructor for callers that receive bounds from untrusted input.
    pub fn try_new(start: f64, end: f64) -> Result<Self, RetimeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RetimeError::invalid_input(format!(
                "segment bounds must be finite, got [{start}, {end}]"
            )));
        }
        if end <= start {
            return Err(RetimeError::invalid_input(format!(
                "segment end {end} must be greater than start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn clamp(&self, t: f64) -> f64 {
        t.max(self.start).min(self.end)
    }
}

/// One step of the script that turns the old word list into the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Keep { old: usize, new: usize },
    Replace { old: usize, new: usize },
    Delete { old: usize },
    Insert { new: usize },
}

/// Where a retimed word got its timing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingSource {
    Kept,
    Replaced,
    Interpolated,
}

impl TimingSource {
    pub fn is_anchor(self) -> bool {
        !matches!(self, Self::Interpolated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kept => "kept",
            Self::Replaced => "replaced",
            Self::Interpolated => "interpolated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditSummary {
    pub kept: usize,
    pub replaced: usize,
    pub deleted: usize,
    pub inserted: usize,
}

impl EditSummary {
    pub fn from_script(script: &[EditOp]) -> Self {
        let mut summary = Self::default();
        for op in script {
            match op {
                EditOp::Keep { .. } => summary.kept += 1,
                EditOp::Replace { .. } => summary.replaced += 1,
                EditOp::Delete { .. } => summary.deleted += 1,
                EditOp::Insert { .. } => summary.inserted += 1,
            }
        }
        summary
    }

    pub fn is_identity(&self) -> bool {
        self.replaced == 0 && self.deleted == 0 && self.inserted == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetimeOutput {
    pub words: Vec<TimedWord>,
    /// Parallel to `words`.
    pub sources: Vec<TimingSource>,
    pub summary: EditSummary,
    /// Words whose boundaries the repair pass moved.
    pub repaired: usize,
}

impl RetimeOutput {
    pub(crate) fn empty() -> Self {
        Self {
            words: Vec::new(),
            sources: Vec::new(),
            summary: EditSummary::default(),
            repaired: 0,
        }
    }
}
