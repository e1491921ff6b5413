//! Aggregate panel DTOs.
//!
//! - `FileRow`: one file in the unit visualization, one unit per changed line
//! - `BreakdownRow`: one language/type entry of the selection breakdown
//! - `SummaryStats`: dataset-wide figures shown above the plot

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRow {
    pub file: String,
    /// Type of the file's first line in the subset, not a majority vote
    pub file_type: String,
    pub lines: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub count: usize,
    pub proportion: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total_loc: usize,
    pub total_commits: usize,
    pub files: usize,
    pub max_depth: u32,
    pub longest_line: u32,
    pub max_lines: usize,
}
