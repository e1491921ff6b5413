//! Aggregate panels derived from a commit subset.
//!
//! - File panel: lines grouped by file, largest first, keyed by path
//! - Language breakdown: lines counted per type with their share of the subset

use std::collections::HashMap;

use crate::models::{BreakdownRow, Commit, FileRow, KeyedJoin};
use crate::viz::render::join_keys;

/// d3 `schemeTableau10`
const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Ordinal colours assigned to line types in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TypePalette {
    order: HashMap<String, usize>,
}

impl TypePalette {
    pub fn from_commits(commits: &[Commit]) -> Self {
        let mut order = HashMap::new();
        for line in commits.iter().flat_map(|c| c.lines()) {
            let next = order.len();
            order.entry(line.file_type.clone()).or_insert(next);
        }
        Self { order }
    }

    pub fn color(&self, file_type: &str) -> &'static str {
        let idx = self.order.get(file_type).copied().unwrap_or(0);
        TABLEAU10[idx % TABLEAU10.len()]
    }
}

/// Group the subset's lines by file, most lines first.
///
/// A file's type is the type of its first line in the subset. Files whose
/// lines disagree on type are not majority-voted.
pub fn file_rows<'a, I>(commits: I, palette: &TypePalette) -> Vec<FileRow>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<FileRow> = Vec::new();

    for line in commits.into_iter().flat_map(|c| c.lines()) {
        match index.get(line.file.as_str()) {
            Some(&idx) => rows[idx].lines += 1,
            None => {
                index.insert(line.file.as_str(), rows.len());
                rows.push(FileRow {
                    file: line.file.clone(),
                    file_type: line.file_type.clone(),
                    lines: 1,
                    color: palette.color(&line.file_type),
                });
            }
        }
    }

    rows.sort_by(|a, b| b.lines.cmp(&a.lines));
    rows
}

/// File rows currently bound to the panel, re-bound by path.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    rows: Vec<FileRow>,
    last_join: KeyedJoin,
}

impl FileList {
    pub fn rows(&self) -> &[FileRow] {
        &self.rows
    }

    pub fn last_join(&self) -> &KeyedJoin {
        &self.last_join
    }

    pub fn update(&mut self, rows: Vec<FileRow>) -> &KeyedJoin {
        let old_keys: Vec<String> = self.rows.iter().map(|r| r.file.clone()).collect();
        let new_keys: Vec<String> = rows.iter().map(|r| r.file.clone()).collect();
        self.last_join = join_keys(&old_keys, &new_keys);
        self.rows = rows;
        &self.last_join
    }
}

/// Lines per type, most first. Empty subset gives an empty breakdown.
pub fn language_breakdown<'a, I>(commits: I) -> Vec<BreakdownRow>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut total = 0usize;

    for line in commits.into_iter().flat_map(|c| c.lines()) {
        total += 1;
        match index.get(line.file_type.as_str()) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                index.insert(line.file_type.as_str(), counts.len());
                counts.push((line.file_type.as_str(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(file_type, count)| {
            let proportion = count as f64 / total as f64;
            BreakdownRow {
                label: if file_type.is_empty() { "Unknown" } else { file_type }.to_string(),
                count,
                proportion,
                text: format!("{} lines ({:.1}%)", format_count(count), proportion * 100.0),
            }
        })
        .collect()
}

/// Integer with thousands separators, e.g. `12,345`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
