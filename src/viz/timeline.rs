//! Time control: slider progress in [0, 100] mapped linearly onto the
//! dataset's datetime range, and the inclusive cutoff it implies.
//!
//! Progress and cutoff are only ever written together by `set_progress`.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

use crate::models::Commit;
use crate::viz::scale::LinearScale;

pub const MAX_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct Timeline {
    /// progress → epoch milliseconds; `None` when no commit is dated
    scale: Option<LinearScale>,
    display_offset: FixedOffset,
    progress: f64,
    cutoff_ms: Option<i64>,
}

impl Timeline {
    /// Start at full progress, so the cutoff is the latest commit.
    pub fn new(commits: &[Commit]) -> Self {
        let mut extent: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> = None;
        for datetime in commits.iter().filter_map(|c| c.datetime()) {
            extent = Some(match extent {
                Some((lo, hi)) => (lo.min(datetime), hi.max(datetime)),
                None => (datetime, datetime),
            });
        }

        let scale = extent.map(|(lo, hi)| {
            LinearScale::new(
                (0.0, MAX_PROGRESS),
                (lo.timestamp_millis() as f64, hi.timestamp_millis() as f64),
            )
        });
        let display_offset = extent
            .map(|(_, hi)| *hi.offset())
            .unwrap_or_else(|| Utc.fix());

        let mut timeline = Self {
            scale,
            display_offset,
            progress: MAX_PROGRESS,
            cutoff_ms: None,
        };
        timeline.set_progress(MAX_PROGRESS);
        timeline
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn progress_to_time(&self, progress: f64) -> Option<i64> {
        self.scale.map(|s| s.map(progress).round() as i64)
    }

    pub fn time_to_progress(&self, datetime: DateTime<FixedOffset>) -> Option<f64> {
        self.scale
            .map(|s| s.invert(datetime.timestamp_millis() as f64).clamp(0.0, MAX_PROGRESS))
    }

    /// Clamp to [0, 100] and recompute the cutoff in the same step.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, MAX_PROGRESS);
        self.cutoff_ms = self.progress_to_time(self.progress);
    }

    pub fn cutoff(&self) -> Option<DateTime<FixedOffset>> {
        self.cutoff_ms
            .and_then(|ms| self.display_offset.timestamp_millis_opt(ms).single())
    }

    /// Indices of commits at or before the cutoff, in base-sequence order.
    pub fn visible(&self, commits: &[Commit]) -> Vec<usize> {
        let Some(cutoff) = self.cutoff_ms else {
            return Vec::new();
        };
        commits
            .iter()
            .enumerate()
            .filter(|(_, c)| c.datetime().is_some_and(|d| d.timestamp_millis() <= cutoff))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn cutoff_label(&self) -> String {
        self.cutoff()
            .map(|d| d.format("%B %-d, %Y at %-I:%M %p").to_string())
            .unwrap_or_default()
    }
}
