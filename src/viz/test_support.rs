//! Fixture commits shared by the engine tests.

use chrono::DateTime;

use crate::models::{ChangeLine, Commit};

pub fn commit_with_lines(id: &str, datetime: Option<&str>, files: &[(&str, &str)]) -> Commit {
    let datetime = datetime.map(|s| DateTime::parse_from_rfc3339(s).expect("valid datetime"));
    let lines = files
        .iter()
        .enumerate()
        .map(|(i, (file, file_type))| ChangeLine {
            commit: id.to_string(),
            file: file.to_string(),
            file_type: file_type.to_string(),
            line: Some(i as u32 + 1),
            depth: Some(1),
            length: Some(20),
            author: "dev".to_string(),
            date: datetime.map(|d| d.date_naive()),
            time: String::new(),
            timezone: String::new(),
            datetime,
        })
        .collect();
    Commit::from_lines(id.to_string(), "owner/repo", lines)
}

pub fn commit_at(id: &str, datetime: &str, lines: usize) -> Commit {
    let files = vec![("src/app.js", "js"); lines];
    commit_with_lines(id, Some(datetime), &files)
}

/// Commits at 09:00, 14:30 and 23:45 with 10, 40 and 5 lines.
pub fn three_commits() -> Vec<Commit> {
    let mut first = vec![("src/app.js", "js"); 6];
    first.extend(vec![("style.css", "css"); 4]);
    let mut second = vec![("src/app.js", "js"); 30];
    second.extend(vec![("index.html", "html"); 10]);
    let third = vec![("style.css", "css"); 5];

    vec![
        commit_with_lines("c1", Some("2025-01-01T09:00:00Z"), &first),
        commit_with_lines("c2", Some("2025-01-02T14:30:00Z"), &second),
        commit_with_lines("c3", Some("2025-01-03T23:45:00Z"), &third),
    ]
}
