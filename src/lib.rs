//! Correlates checkstyle XML reports with the current patch's diffs and
//! surfaces only the findings relevant to review.

pub mod cli;
pub mod config;
pub mod diff;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod report;
pub mod severity;
pub mod sink;
