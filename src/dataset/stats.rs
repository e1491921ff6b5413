use std::collections::HashMap;

use crate::models::{Commit, SummaryStats};

/// Dataset-wide figures over every line of every commit.
pub fn summarize(commits: &[Commit]) -> SummaryStats {
    let mut lines_per_file: HashMap<&str, usize> = HashMap::new();
    let mut stats = SummaryStats {
        total_commits: commits.len(),
        ..SummaryStats::default()
    };

    for line in commits.iter().flat_map(|c| c.lines()) {
        stats.total_loc += 1;
        *lines_per_file.entry(line.file.as_str()).or_default() += 1;
        stats.max_depth = stats.max_depth.max(line.depth.unwrap_or(0));
        stats.longest_line = stats.longest_line.max(line.length.unwrap_or(0));
    }

    stats.files = lines_per_file.len();
    stats.max_lines = lines_per_file.values().copied().max().unwrap_or(0);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ingest::{process_commits, read_change_lines};

    #[test]
    fn summarizes_files_depth_and_length() {
        let raw = "commit,file,type,line,depth,length,author,datetime\n\
                   a,x.js,js,1,2,40,dev,2025-01-01T00:00:00Z\n\
                   a,x.js,js,2,5,12,dev,2025-01-01T00:00:00Z\n\
                   b,y.css,css,1,oops,90,dev,2025-01-02T00:00:00Z\n";
        let parsed = read_change_lines(raw.as_bytes()).expect("parse csv");
        let commits = process_commits(parsed.lines, "o/r");

        let stats = summarize(&commits);

        assert_eq!(
            stats,
            SummaryStats {
                total_loc: 3,
                total_commits: 2,
                files: 2,
                max_depth: 5,
                longest_line: 90,
                max_lines: 2,
            }
        );
    }

    #[test]
    fn empty_dataset_yields_zeros() {
        assert_eq!(summarize(&[]), SummaryStats::default());
    }
}
