//! Scatter plot scene.
//!
//! The canvas and usable rectangle are fixed when the scene is created. Each
//! update only replaces the axis ticks, gridlines and marks. Marks are keyed by
//! commit id so hover and selection state survive a re-bind, and are kept in
//! descending size order so small circles sit on top of large ones.

use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};

use crate::models::{Commit, KeyedJoin, Mark, PlotLayout, PlotView, Tick};
use crate::viz::scale::CoordinateMapping;

pub const MARK_FILL: &str = "steelblue";
pub const RESTING_OPACITY: f64 = 0.7;
pub const HOVER_OPACITY: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Scene {
    layout: PlotLayout,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    gridlines: Vec<f64>,
    marks: Vec<Mark>,
    last_join: KeyedJoin,
}

impl Scene {
    pub fn new(layout: PlotLayout) -> Self {
        Self {
            layout,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            gridlines: Vec::new(),
            marks: Vec::new(),
            last_join: KeyedJoin::default(),
        }
    }

    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    #[cfg(test)]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn mark(&self, id: &str) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id == id)
    }

    /// Re-bind marks to `commits` under `mapping`. Commits without a position are skipped.
    pub fn update<'a, I>(
        &mut self,
        mapping: &CoordinateMapping,
        commits: I,
        (x_tick_count, y_tick_count): (usize, usize),
    ) -> &KeyedJoin
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        self.x_ticks = mapping.x_ticks(x_tick_count);
        self.y_ticks = mapping.y_ticks(y_tick_count);
        self.gridlines = self.y_ticks.iter().map(|t| t.offset).collect();

        let previous: HashMap<String, Mark> =
            self.marks.drain(..).map(|m| (m.id.clone(), m)).collect();

        let mut plotted: Vec<&Commit> = commits
            .into_iter()
            .filter(|c| mapping.position(c).is_some())
            .collect();
        plotted.sort_by(|a, b| b.total_lines().cmp(&a.total_lines()));

        let mut marks = Vec::with_capacity(plotted.len());
        for commit in plotted {
            let Some((cx, cy)) = mapping.position(commit) else {
                continue;
            };
            let (selected, hovered) = previous
                .get(commit.id())
                .map(|m| (m.selected, m.hovered))
                .unwrap_or((false, false));
            marks.push(Mark {
                id: commit.id().to_string(),
                cx,
                cy,
                r: mapping.lines_to_radius(commit.total_lines()),
                fill_opacity: if hovered { HOVER_OPACITY } else { RESTING_OPACITY },
                selected,
                hovered,
            });
        }

        let old_keys: Vec<String> = previous.into_keys().collect();
        let new_keys: Vec<String> = marks.iter().map(|m| m.id.clone()).collect();
        self.last_join = join_keys(&old_keys, &new_keys);
        self.marks = marks;
        &self.last_join
    }

    pub fn set_selected<F>(&mut self, is_selected: F)
    where
        F: Fn(&str) -> bool,
    {
        for mark in &mut self.marks {
            mark.selected = is_selected(&mark.id);
        }
    }

    /// Emphasize one mark (or none). Returns false if `id` has no mark.
    pub fn set_hovered(&mut self, id: Option<&str>) -> bool {
        let mut found = id.is_none();
        for mark in &mut self.marks {
            mark.hovered = Some(mark.id.as_str()) == id;
            mark.fill_opacity = if mark.hovered { HOVER_OPACITY } else { RESTING_OPACITY };
            found |= mark.hovered;
        }
        found
    }

    pub fn view(&self) -> PlotView {
        PlotView {
            x_ticks: self.x_ticks.clone(),
            y_ticks: self.y_ticks.clone(),
            gridlines: self.gridlines.clone(),
            marks: self.marks.clone(),
            join: self.last_join.clone(),
        }
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        match self.write_svg(&mut svg) {
            Ok(()) => svg,
            Err(_) => String::new(),
        }
    }

    fn write_svg(&self, svg: &mut String) -> fmt::Result {
        let layout = &self.layout;
        let usable = &layout.usable;

        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" style="overflow: visible">"#,
            layout.width, layout.height
        )?;

        writeln!(svg, r#"<g class="gridlines" transform="translate({}, 0)">"#, usable.left)?;
        for y in &self.gridlines {
            writeln!(svg, r#"<line x1="0" x2="{}" y1="{y}" y2="{y}"/>"#, usable.width)?;
        }
        svg.push_str("</g>\n");

        writeln!(svg, r#"<g class="x-axis" transform="translate(0, {})">"#, usable.bottom)?;
        writeln!(
            svg,
            r#"<path class="domain" d="M{},0H{}" stroke="currentColor"/>"#,
            usable.left, usable.right
        )?;
        for tick in &self.x_ticks {
            writeln!(
                svg,
                r#"<g class="tick" transform="translate({}, 0)"><line y2="6" stroke="currentColor"/><text y="9" dy="0.71em" text-anchor="middle">{}</text></g>"#,
                tick.offset,
                escape(&tick.label)
            )?;
        }
        svg.push_str("</g>\n");

        writeln!(svg, r#"<g class="y-axis" transform="translate({}, 0)">"#, usable.left)?;
        writeln!(
            svg,
            r#"<path class="domain" d="M0,{}V{}" stroke="currentColor"/>"#,
            usable.bottom, usable.top
        )?;
        for tick in &self.y_ticks {
            writeln!(
                svg,
                r#"<g class="tick" transform="translate(0, {})"><line x2="-6" stroke="currentColor"/><text x="-9" dy="0.32em" text-anchor="end">{}</text></g>"#,
                tick.offset,
                escape(&tick.label)
            )?;
        }
        svg.push_str("</g>\n");

        svg.push_str("<g class=\"dots\">\n");
        for mark in &self.marks {
            let class = if mark.selected { r#" class="selected""# } else { "" };
            writeln!(
                svg,
                r#"<circle data-id="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{}"{}/>"#,
                escape(&mark.id),
                mark.cx,
                mark.cy,
                mark.r,
                MARK_FILL,
                mark.fill_opacity,
                class
            )?;
        }
        svg.push_str("</g>\n</svg>\n");
        Ok(())
    }
}

/// Classify keys as entered, updated or exited between two bindings.
pub fn join_keys(previous: &[String], next: &[String]) -> KeyedJoin {
    let old: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let new: HashSet<&str> = next.iter().map(String::as_str).collect();

    let mut join = KeyedJoin::default();
    for key in next {
        if old.contains(key.as_str()) {
            join.updated.push(key.clone());
        } else {
            join.entered.push(key.clone());
        }
    }
    join.exited = previous
        .iter()
        .filter(|key| !new.contains(key.as_str()))
        .cloned()
        .collect();
    join.exited.sort();
    join
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::viz::test_support::{commit_with_lines, three_commits};

    fn scene_for(commits: &[Commit]) -> Scene {
        let config = PlotConfig::default();
        let mapping = CoordinateMapping::for_subset(commits, &config.layout(), config.radius_range());
        let mut scene = Scene::new(config.layout());
        scene.update(&mapping, commits, (10, 10));
        scene
    }

    #[test]
    fn marks_are_drawn_largest_first() {
        let scene = scene_for(&three_commits());

        let ids: Vec<&str> = scene.marks().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1", "c3"]);
        assert!(scene.marks().iter().all(|m| m.fill_opacity == RESTING_OPACITY));
    }

    #[test]
    fn undated_commits_get_no_mark() {
        let mut commits = three_commits();
        commits.push(commit_with_lines("undated", None, &[("a.rs", "rs")]));

        let scene = scene_for(&commits);

        assert_eq!(scene.marks().len(), 3);
        assert!(scene.mark("undated").is_none());
    }

    #[test]
    fn rebind_keeps_state_and_reports_join() {
        let commits = three_commits();
        let config = PlotConfig::default();
        let mut scene = scene_for(&commits);
        scene.set_selected(|id| id == "c1");
        assert!(scene.set_hovered(Some("c2")));

        let subset = &commits[..2];
        let mapping = CoordinateMapping::for_subset(subset, &config.layout(), config.radius_range());
        let join = scene.update(&mapping, subset, (10, 10)).clone();

        assert_eq!(join.entered, Vec::<String>::new());
        assert_eq!(join.updated, vec!["c2".to_string(), "c1".to_string()]);
        assert_eq!(join.exited, vec!["c3".to_string()]);
        assert!(scene.mark("c1").map(|m| m.selected).unwrap_or(false));
        assert_eq!(scene.mark("c2").map(|m| m.fill_opacity), Some(HOVER_OPACITY));
    }

    #[test]
    fn hover_on_unknown_mark_is_reported() {
        let mut scene = scene_for(&three_commits());

        assert!(!scene.set_hovered(Some("missing")));
        assert!(scene.set_hovered(None));
    }

    #[test]
    fn svg_contains_axes_and_marks() {
        let mut scene = scene_for(&three_commits());
        scene.set_selected(|id| id == "c3");

        let svg = scene.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 1000 600""#));
        assert!(svg.contains(">14:00</text>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches(r#"class="selected""#).count(), 1);
    }

    #[test]
    fn svg_groups_are_closed() {
        let scene = scene_for(&three_commits());

        let svg = scene.to_svg();

        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert_eq!(
            svg.matches(r#"class="tick""#).count(),
            scene.x_ticks.len() + scene.y_ticks.len()
        );
    }

    #[test]
    fn join_keys_classifies_keys() {
        let join = join_keys(
            &["a".to_string(), "b".to_string()],
            &["b".to_string(), "c".to_string()],
        );

        assert_eq!(join.entered, vec!["c".to_string()]);
        assert_eq!(join.updated, vec!["b".to_string()]);
        assert_eq!(join.exited, vec!["a".to_string()]);
    }
}
