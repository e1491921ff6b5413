//! Scroll narrative: one step per plotted commit, each pointing back at it.

use crate::models::{Commit, NarrativeStep};

pub fn build_steps(commits: &[Commit]) -> Vec<NarrativeStep> {
    commits
        .iter()
        .enumerate()
        .filter_map(|(commit_index, commit)| Some((commit_index, commit, commit.datetime()?)))
        .enumerate()
        .map(|(index, (commit_index, commit, datetime))| {
            let which = if index == 0 { "the first commit" } else { "another commit" };
            let files = commit.file_count();
            let text = format!(
                "On {}, {} made {}, editing {} line{} across {} file{}.",
                datetime.format("%A, %B %-d, %Y at %-I:%M %p"),
                if commit.author().is_empty() { "someone" } else { commit.author() },
                which,
                commit.total_lines(),
                if commit.total_lines() == 1 { "" } else { "s" },
                files,
                if files == 1 { "" } else { "s" },
            );
            NarrativeStep {
                index,
                commit_index,
                commit_id: commit.id().to_string(),
                datetime,
                text,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::test_support::{commit_with_lines, three_commits};

    #[test]
    fn one_step_per_dated_commit() {
        let mut commits = three_commits();
        commits.push(commit_with_lines("undated", None, &[("a.rs", "rs")]));

        let steps = build_steps(&commits);

        let ids: Vec<&str> = steps.iter().map(|s| s.commit_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(steps[2].commit_index, 2);
        assert_eq!(
            steps[0].text,
            "On Wednesday, January 1, 2025 at 9:00 AM, dev made the first commit, editing 10 lines across 2 files."
        );
        assert!(steps[1].text.contains("another commit"));
    }
}
