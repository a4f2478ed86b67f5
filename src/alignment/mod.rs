pub mod diff;
pub mod reconstruction;
pub mod report;
pub mod similarity;
pub mod tokenization;
