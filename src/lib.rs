pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::report::{aggregate_reports, compute_case_report, CaseReport, Report};
pub use config::RetimeConfig;
pub use error::RetimeError;
pub use pipeline::builder::WordRetimerBuilder;
pub use pipeline::runtime::{needs_recalculation, recalculate_word_timings, WordRetimer};
pub use pipeline::traits::{SequenceDiffer, TimingReconstructor, WordMatcher};
pub use types::{EditOp, EditSummary, RetimeOutput, SegmentBounds, TimedWord, TimingSource};
