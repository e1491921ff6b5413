//! The visualization engine: one context object owning every piece of shared
//! state, built once at startup and handed to each event handler.
//!
//! Two lenses look at the same base sequence:
//! - the cutoff lens (`timeline`) drives the scatter plot and the file panel
//! - the brush lens (`selection`) drives the language breakdown
//!
//! Slider and narrative both go through `set_progress`, so they can never
//! disagree. Every handler finishes with all derived state recomputed.

use std::collections::HashSet;

use crate::config::VizConfig;
use crate::dataset::summarize;
use crate::error::{AppError, Result};
use crate::models::{
    ActiveView, Commit, FilesView, NarrativeStep, SelectionView, SummaryStats, TimelineView,
    Tooltip, ViewUpdate,
};
use crate::viz::narrative::build_steps;
use crate::viz::panels::{file_rows, language_breakdown, FileList, TypePalette};
use crate::viz::render::Scene;
use crate::viz::scale::CoordinateMapping;
use crate::viz::selection::{select_commits, selection_label, BrushRect};
use crate::viz::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CutoffLens {
    /// No time input yet: every dated commit is visible
    Full,
    Cutoff,
}

#[derive(Debug, Clone)]
struct Selection {
    brush: BrushRect,
    commits: Vec<usize>,
}

pub struct VizContext {
    config: VizConfig,
    commits: Vec<Commit>,
    summary: SummaryStats,
    palette: TypePalette,
    steps: Vec<NarrativeStep>,
    timeline: Timeline,
    lens: CutoffLens,
    visible: Vec<usize>,
    mapping: CoordinateMapping,
    scene: Scene,
    files: FileList,
    selection: Option<Selection>,
    tooltip: Tooltip,
}

impl VizContext {
    pub fn new(commits: Vec<Commit>, config: VizConfig) -> Self {
        let layout = config.plot.layout();
        let mapping = CoordinateMapping::for_subset(&commits, &layout, config.plot.radius_range());
        // Progress starts at 100, so this is every dated commit
        let timeline = Timeline::new(&commits);
        let visible = timeline.visible(&commits);

        let mut context = Self {
            summary: summarize(&commits),
            palette: TypePalette::from_commits(&commits),
            steps: build_steps(&commits),
            timeline,
            lens: CutoffLens::Full,
            visible,
            mapping,
            scene: Scene::new(layout),
            files: FileList::default(),
            selection: None,
            tooltip: Tooltip::default(),
            commits,
            config,
        };
        context.redraw();
        context
    }

    #[cfg(test)]
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    pub fn steps(&self) -> &[NarrativeStep] {
        &self.steps
    }

    #[cfg(test)]
    pub fn mapping(&self) -> &CoordinateMapping {
        &self.mapping
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[cfg(test)]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    #[cfg(test)]
    pub fn visible_commits(&self) -> impl Iterator<Item = &Commit> {
        self.visible.iter().map(|&idx| &self.commits[idx])
    }

    pub fn selected_commits(&self) -> impl Iterator<Item = &Commit> {
        self.selection
            .iter()
            .flat_map(|s| s.commits.iter())
            .map(|&idx| &self.commits[idx])
    }

    /// The lens that last took effect: a live brush wins over the cutoff.
    pub fn active_view(&self) -> ActiveView {
        if let Some(selection) = &self.selection {
            return ActiveView::Brush {
                commits: selection.commits.len(),
            };
        }
        match self.lens {
            CutoffLens::Full => ActiveView::Full {
                commits: self.visible.len(),
            },
            CutoffLens::Cutoff => ActiveView::Cutoff {
                cutoff: self.timeline.cutoff(),
                commits: self.visible.len(),
            },
        }
    }

    pub fn timeline_view(&self) -> TimelineView {
        TimelineView {
            progress: self.timeline.progress(),
            cutoff: self.timeline.cutoff(),
            cutoff_label: self.timeline.cutoff_label(),
            visible_commits: self.visible.len(),
        }
    }

    pub fn selection_view(&self) -> SelectionView {
        let count = self.selection.as_ref().map_or(0, |s| s.commits.len());
        SelectionView {
            count,
            label: selection_label(count),
            selected_ids: self.selected_commits().map(|c| c.id().to_string()).collect(),
            breakdown: language_breakdown(self.selected_commits()),
        }
    }

    pub fn files_view(&self) -> FilesView {
        FilesView {
            rows: self.files.rows().to_vec(),
            join: self.files.last_join().clone(),
        }
    }

    /// Everything a cutoff change redraws: axes and marks before panels.
    pub fn view_update(&self) -> ViewUpdate {
        ViewUpdate {
            view: self.active_view(),
            timeline: self.timeline_view(),
            plot: self.scene.view(),
            files: self.files_view(),
            selection: self.selection_view(),
        }
    }

    /// Single entry point for slider and narrative input.
    pub fn set_progress(&mut self, progress: f64) -> Result<ViewUpdate> {
        if !progress.is_finite() {
            return Err(AppError::InvalidProgress(progress));
        }

        self.timeline.set_progress(progress);
        self.lens = CutoffLens::Cutoff;
        self.visible = self.timeline.visible(&self.commits);
        self.redraw();

        tracing::debug!(
            "Progress {:.2} → cutoff {:?}, {} commits visible",
            self.timeline.progress(),
            self.timeline.cutoff(),
            self.visible.len()
        );
        Ok(self.view_update())
    }

    /// Scroll entered a narrative step: move the slider to its commit.
    pub fn enter_step(&mut self, index: usize) -> Result<ViewUpdate> {
        let step = self.steps.get(index).ok_or(AppError::StepNotFound(index))?;
        let progress = self
            .timeline
            .time_to_progress(step.datetime)
            .ok_or_else(|| AppError::Internal("Narrative step outside the timeline".to_string()))?;
        self.set_progress(progress)
    }

    /// Replace (or clear, with `None`) the brush and recompute its subset.
    pub fn brush(&mut self, brush: Option<BrushRect>) -> Result<SelectionView> {
        if let Some(rect) = &brush {
            if !rect.is_finite() {
                return Err(AppError::InvalidSelection(format!("{:?}", rect)));
            }
        }

        self.selection = brush.map(|brush| Selection {
            brush,
            commits: Vec::new(),
        });
        self.reselect();

        let view = self.selection_view();
        tracing::debug!("{}", view.label);
        Ok(view)
    }

    pub fn hover_enter(&mut self, id: &str, x: f64, y: f64) -> Result<Tooltip> {
        let commit = self
            .commits
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| AppError::CommitNotFound(id.to_string()))?;
        if !self.scene.set_hovered(Some(id)) {
            return Err(AppError::CommitNotFound(id.to_string()));
        }

        self.tooltip = Tooltip {
            visible: true,
            commit_id: Some(commit.id().to_string()),
            url: Some(commit.url().to_string()),
            date: commit
                .datetime()
                .map(|d| d.format("%A, %B %-d, %Y").to_string()),
            x,
            y,
        };
        Ok(self.tooltip.clone())
    }

    pub fn hover_leave(&mut self, id: &str) -> Result<Tooltip> {
        if self.scene.mark(id).is_none() {
            return Err(AppError::CommitNotFound(id.to_string()));
        }
        self.scene.set_hovered(None);
        self.tooltip.visible = false;
        Ok(self.tooltip.clone())
    }

    /// Rebuild mapping, marks and file panel from the visible subset.
    fn redraw(&mut self) {
        let plotted: Vec<&Commit> = self
            .visible
            .iter()
            .map(|&idx| &self.commits[idx])
            .filter(|c| c.datetime().is_some())
            .collect();

        let plot = &self.config.plot;
        self.mapping = CoordinateMapping::for_subset(
            plotted.iter().copied(),
            &plot.layout(),
            plot.radius_range(),
        );
        self.scene
            .update(&self.mapping, plotted, (plot.x_ticks, plot.y_ticks));

        let rows = file_rows(
            self.visible.iter().map(|&idx| &self.commits[idx]),
            &self.palette,
        );
        self.files.update(rows);

        let hovered_gone = self
            .tooltip
            .commit_id
            .as_deref()
            .is_some_and(|id| self.scene.mark(id).is_none());
        if hovered_gone {
            self.tooltip.visible = false;
        }

        self.reselect();
    }

    /// Re-run the brush hit test against the current mapping.
    fn reselect(&mut self) {
        // Hidden commits still map to a pixel, so only the visible ones are hit-tested
        if let Some(selection) = &mut self.selection {
            let candidates = self.visible.iter().map(|&idx| (idx, &self.commits[idx]));
            selection.commits = select_commits(&selection.brush, &self.mapping, candidates);
        }
        let selected: HashSet<&str> = self
            .selection
            .iter()
            .flat_map(|s| s.commits.iter())
            .map(|&idx| self.commits[idx].id())
            .collect();
        self.scene.set_selected(|id| selected.contains(id));
    }
}
