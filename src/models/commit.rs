//! Commit-level data model.
//!
//! - `ChangeLine`: one modified source line, as exported by the line-of-code tool
//! - `Commit`: every `ChangeLine` sharing a commit id, with derived time and size
//!
//! A `Commit` owns its lines privately. They are skipped by `Serialize`, left out
//! of `Debug` and `PartialEq`, and only reachable through `Commit::lines()`.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeLine {
    pub commit: String,
    pub file: String,
    #[serde(rename = "type")]
    pub file_type: String,
    /// `None` when the column did not hold an integer
    pub line: Option<u32>,
    pub depth: Option<u32>,
    pub length: Option<u32>,
    pub author: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub timezone: String,
    pub datetime: Option<DateTime<FixedOffset>>,
}

#[derive(Clone, Serialize)]
pub struct Commit {
    id: String,
    url: String,
    author: String,
    date: Option<NaiveDate>,
    time: String,
    timezone: String,
    datetime: Option<DateTime<FixedOffset>>,
    hour_frac: Option<f64>,
    total_lines: usize,
    #[serde(skip)]
    lines: Vec<ChangeLine>,
}

impl Commit {
    /// Build a commit from its lines. Metadata comes from the first line.
    pub fn from_lines(id: String, repo_slug: &str, lines: Vec<ChangeLine>) -> Self {
        let (author, date, time, timezone, datetime) = match lines.first() {
            Some(first) => (
                first.author.clone(),
                first.date,
                first.time.clone(),
                first.timezone.clone(),
                first.datetime,
            ),
            None => (String::new(), None, String::new(), String::new(), None),
        };

        Self {
            url: format!("https://github.com/{}/commit/{}", repo_slug, id),
            id,
            author,
            date,
            time,
            timezone,
            datetime,
            hour_frac: datetime.map(hour_of_day),
            total_lines: lines.len(),
            lines,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.datetime
    }

    /// Fractional hour of day in the commit's own offset, e.g. 14.5 for 2:30 PM.
    pub fn hour_frac(&self) -> Option<f64> {
        self.hour_frac
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn lines(&self) -> &[ChangeLine] {
        &self.lines
    }

    /// Number of distinct files this commit touched.
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.lines.iter().map(|l| l.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

fn hour_of_day(datetime: DateTime<FixedOffset>) -> f64 {
    datetime.hour() as f64 + datetime.minute() as f64 / 60.0
}

impl fmt::Debug for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("id", &self.id)
            .field("author", &self.author)
            .field("datetime", &self.datetime)
            .field("hour_frac", &self.hour_frac)
            .field("total_lines", &self.total_lines)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.url == other.url
            && self.author == other.author
            && self.date == other.date
            && self.time == other.time
            && self.timezone == other.timezone
            && self.datetime == other.datetime
            && self.total_lines == other.total_lines
    }
}
