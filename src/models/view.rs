//! View-state DTOs returned by the interaction endpoints.
//!
//! - `ActiveView`: which lens is currently authoritative
//! - `TimelineView`: slider progress, cutoff instant and its label
//! - `NarrativeStep`: one scroll step, bound to one commit
//! - `SelectionView`: brush result with count label and breakdown
//! - `ViewUpdate`: everything a cutoff change redraws, in draw order

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{BreakdownRow, FileRow, KeyedJoin, Mark, Tick};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActiveView {
    Full { commits: usize },
    Cutoff {
        cutoff: Option<DateTime<FixedOffset>>,
        commits: usize,
    },
    Brush { commits: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineView {
    pub progress: f64,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub cutoff_label: String,
    pub visible_commits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeStep {
    pub index: usize,
    /// Position of the step's commit in the base sequence
    pub commit_index: usize,
    pub commit_id: String,
    pub datetime: DateTime<FixedOffset>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionView {
    pub count: usize,
    pub label: String,
    pub selected_ids: Vec<String>,
    pub breakdown: Vec<BreakdownRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotView {
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub gridlines: Vec<f64>,
    pub marks: Vec<Mark>,
    pub join: KeyedJoin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilesView {
    pub rows: Vec<FileRow>,
    pub join: KeyedJoin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewUpdate {
    pub view: ActiveView,
    pub timeline: TimelineView,
    pub plot: PlotView,
    pub files: FilesView,
    pub selection: SelectionView,
}
