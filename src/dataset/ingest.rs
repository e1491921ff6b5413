//! Dataset ingestion: CSV rows → `ChangeLine` → chronologically sorted `Commit`s.
//!
//! Runs once at startup. Field-level problems never reject a row: numeric
//! columns that are not integers become `None`, unparseable dates become
//! `None`. Only records the CSV reader cannot frame are skipped.
//!
//! Ordering contract: commits are sorted ascending by instant. Equal instants
//! keep first-seen order, and commits without an instant come last, also in
//! first-seen order.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::Deserialize;

use crate::error::DatasetError;
use crate::models::{ChangeLine, Commit};

/// One CSV record as exported, before any typing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    commit: String,
    file: String,
    #[serde(rename = "type")]
    file_type: String,
    line: String,
    depth: String,
    length: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
}

#[derive(Debug)]
pub struct Dataset {
    pub commits: Vec<Commit>,
    pub line_count: usize,
    pub skipped_records: usize,
}

pub struct ParsedLines {
    pub lines: Vec<ChangeLine>,
    pub skipped_records: usize,
}

pub fn load_dataset(path: &Path, repo_slug: &str) -> Result<Dataset, DatasetError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = read_change_lines(file)?;
    let line_count = parsed.lines.len();
    let commits = process_commits(parsed.lines, repo_slug);

    tracing::info!(
        "Loaded {} lines into {} commits in {:?} ({} records skipped)",
        line_count,
        commits.len(),
        start.elapsed(),
        parsed.skipped_records
    );

    Ok(Dataset {
        commits,
        line_count,
        skipped_records: parsed.skipped_records,
    })
}

/// Parse every record. I/O failures abort, framing failures skip the record.
pub fn read_change_lines<R: Read>(reader: R) -> Result<ParsedLines, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut lines = Vec::new();
    let mut skipped_records = 0;

    for (index, record) in csv_reader.deserialize::<RawRow>().enumerate() {
        match record {
            Ok(row) => lines.push(parse_row(row)),
            Err(e) if e.is_io_error() => return Err(DatasetError::Csv(e)),
            Err(e) => {
                tracing::warn!("Skipping record {}: {}", index + 1, e);
                skipped_records += 1;
            }
        }
    }

    Ok(ParsedLines {
        lines,
        skipped_records,
    })
}

fn parse_row(row: RawRow) -> ChangeLine {
    let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").ok();
    let datetime = parse_datetime(&row.datetime)
        .or_else(|| date.and_then(|d| derive_datetime(d, &row.time, &row.timezone)));

    ChangeLine {
        commit: row.commit,
        file: row.file,
        file_type: row.file_type,
        line: parse_int(&row.line),
        depth: parse_int(&row.depth),
        length: parse_int(&row.length),
        author: row.author,
        date,
        time: row.time,
        timezone: row.timezone,
        datetime,
    }
}

fn parse_int(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn parse_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Combine date, wall-clock time (midnight if absent) and offset (UTC if absent).
fn derive_datetime(date: NaiveDate, time: &str, timezone: &str) -> Option<DateTime<FixedOffset>> {
    let time = parse_time(time).unwrap_or(NaiveTime::MIN);
    let offset = parse_offset(timezone).or_else(|| FixedOffset::east_opt(0))?;
    offset.from_local_datetime(&date.and_time(time)).single()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    // Some exporters append the offset to the time column
    let clock = raw.trim().split(['+', '-', 'Z']).next()?;
    NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .ok()
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let sign = match raw.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = raw[1..].chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Group lines by commit id in first-seen order and sort chronologically.
pub fn process_commits(lines: Vec<ChangeLine>, repo_slug: &str) -> Vec<Commit> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<ChangeLine>)> = Vec::new();

    for line in lines {
        match index.get(&line.commit) {
            Some(&idx) => groups[idx].1.push(line),
            None => {
                index.insert(line.commit.clone(), groups.len());
                groups.push((line.commit.clone(), vec![line]));
            }
        }
    }

    let mut commits: Vec<Commit> = groups
        .into_iter()
        .map(|(id, lines)| Commit::from_lines(id, repo_slug, lines))
        .collect();

    // Stable: ties and undated commits keep first-seen order
    commits.sort_by(|a, b| compare_datetimes(a.datetime(), b.datetime()));
    commits
}

fn compare_datetimes(
    a: Option<DateTime<FixedOffset>>,
    b: Option<DateTime<FixedOffset>>,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
