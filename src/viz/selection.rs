//! Brush selection: a pixel-space rectangle hit-tested against commit positions.

use serde::{Deserialize, Serialize};

use crate::models::Commit;
use crate::viz::scale::CoordinateMapping;

/// Normalized brush rectangle; bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Build from two opposite corners given in any order.
    pub fn from_corners([[ax, ay], [bx, by]]: [[f64; 2]; 2]) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1].iter().all(|v| v.is_finite())
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Always false without a brush or without a position for `commit`.
pub fn is_commit_selected(
    brush: Option<&BrushRect>,
    mapping: &CoordinateMapping,
    commit: &Commit,
) -> bool {
    match (brush, mapping.position(commit)) {
        (Some(rect), Some(position)) => rect.contains(position),
        _ => false,
    }
}

/// Indices of the selected candidates, in the order given.
///
/// Candidates must be the commits `mapping` was built for. Any other commit
/// still maps to a pixel, but has no mark there.
pub fn select_commits<'a, I>(brush: &BrushRect, mapping: &CoordinateMapping, candidates: I) -> Vec<usize>
where
    I: IntoIterator<Item = (usize, &'a Commit)>,
{
    candidates
        .into_iter()
        .filter(|(_, commit)| is_commit_selected(Some(brush), mapping, commit))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn selection_label(count: usize) -> String {
    if count == 0 {
        "No commits selected".to_string()
    } else {
        format!("{} commits selected", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::viz::test_support::{commit_with_lines, three_commits};

    fn mapping_for(commits: &[Commit]) -> CoordinateMapping {
        let config = PlotConfig::default();
        CoordinateMapping::for_subset(commits, &config.layout(), config.radius_range())
    }

    #[test]
    fn nothing_is_selected_without_a_brush() {
        let commits = three_commits();
        let mapping = mapping_for(&commits);

        assert!(commits.iter().all(|c| !is_commit_selected(None, &mapping, c)));
    }

    #[test]
    fn corners_in_any_order_normalize() {
        let rect = BrushRect::from_corners([[50.0, 10.0], [5.0, 80.0]]);

        assert_eq!(
            rect,
            BrushRect {
                x0: 5.0,
                y0: 10.0,
                x1: 50.0,
                y1: 80.0
            }
        );
        assert!(rect.contains((5.0, 80.0)));
        assert!(!rect.contains((4.9, 20.0)));
    }

    #[test]
    fn brush_around_one_commit_selects_only_it() {
        let commits = three_commits();
        let mapping = mapping_for(&commits);
        let (x, y) = mapping.position(&commits[1]).expect("positioned");
        let rect = BrushRect::from_corners([[x - 1.0, y - 1.0], [x + 1.0, y + 1.0]]);

        let selected = select_commits(&rect, &mapping, commits.iter().enumerate());

        assert_eq!(selected, vec![1]);
        assert_eq!(selection_label(selected.len()), "1 commits selected");
    }

    #[test]
    fn undated_commit_is_never_selected() {
        let commits = vec![commit_with_lines("u", None, &[("a.rs", "rs")])];
        let mapping = mapping_for(&three_commits());
        let everything = BrushRect::from_corners([[f64::MIN, f64::MIN], [f64::MAX, f64::MAX]]);

        assert!(!is_commit_selected(Some(&everything), &mapping, &commits[0]));
        assert_eq!(selection_label(0), "No commits selected");
    }
}
