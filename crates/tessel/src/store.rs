// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::analyzer::DatasetAnalyzer;
use crate::config::{GeometryConfig, TesselConfig};
use crate::dataset::Dataset;
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{self, Alignment, Axis, SizeMatch};
use crate::history::History;
use crate::layout::{generate_layouts, LayoutSuggestion};
use crate::logging::{log_store_event, log_store_skipped, log_store_warning};
use crate::mapper::map_layout;
use crate::model::DataAnalysisResult;
use crate::visual::{PixelRect, SelectionRect, Visual, VisualDefaults};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub visuals: Vec<Visual>,
}
impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            visuals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    Ready,
}

/// A mutation of the placed visuals. Applied by [`reduce`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    AddVisual {
        visual: Visual,
    },
    RemoveVisuals {
        ids: Vec<String>,
    },
    UpdatePosition {
        id: String,
        position: PixelRect,
    },
    Translate {
        ids: Vec<String>,
        dx: f64,
        dy: f64,
    },
    Align {
        ids: Vec<String>,
        alignment: Alignment,
    },
    Distribute {
        ids: Vec<String>,
        axis: Axis,
    },
    MatchSize {
        ids: Vec<String>,
        mode: SizeMatch,
        explicit: Option<f64>,
    },
    SnapToGrid {
        ids: Vec<String>,
        grid_size: f64,
        snap_sizes: bool,
    },
    ReplaceAll {
        visuals: Vec<Visual>,
    },
    Clear,
}
impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddVisual { .. } => "add_visual",
            Action::RemoveVisuals { .. } => "remove_visuals",
            Action::UpdatePosition { .. } => "update_position",
            Action::Translate { .. } => "translate",
            Action::Align { .. } => "align",
            Action::Distribute { .. } => "distribute",
            Action::MatchSize { .. } => "match_size",
            Action::SnapToGrid { .. } => "snap_to_grid",
            Action::ReplaceAll { .. } => "replace_all",
            Action::Clear => "clear",
        }
    }
}

/// Geometry edits that act on whatever is currently selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEdit {
    Translate { dx: f64, dy: f64 },
    Align(Alignment),
    Distribute(Axis),
    MatchSize(SizeMatch, Option<f64>),
    SnapToGrid,
    Remove,
}
impl SelectionEdit {
    fn into_action(self, ids: Vec<String>, geometry: &GeometryConfig) -> Action {
        match self {
            SelectionEdit::Translate { dx, dy } => Action::Translate { ids, dx, dy },
            SelectionEdit::Align(alignment) => Action::Align { ids, alignment },
            SelectionEdit::Distribute(axis) => Action::Distribute { ids, axis },
            SelectionEdit::MatchSize(mode, explicit) => Action::MatchSize {
                ids,
                mode,
                explicit,
            },
            SelectionEdit::SnapToGrid => Action::SnapToGrid {
                ids,
                grid_size: geometry.grid_size,
                snap_sizes: geometry.snap_sizes,
            },
            SelectionEdit::Remove => Action::RemoveVisuals { ids },
        }
    }
}

/// Pure transition over the placed visuals. Unknown ids are ignored; the
/// untouched visuals keep their order.
pub fn reduce(visuals: &[Visual], action: &Action) -> Vec<Visual> {
    match action {
        Action::AddVisual { visual } => {
            let mut next = visuals.to_vec();
            next.push(visual.clone());
            next
        }
        Action::RemoveVisuals { ids } => visuals
            .iter()
            .filter(|v| !ids.contains(&v.id))
            .cloned()
            .collect(),
        Action::UpdatePosition { id, position } => visuals
            .iter()
            .map(|v| {
                if &v.id == id {
                    v.with_position(*position)
                } else {
                    v.clone()
                }
            })
            .collect(),
        Action::Translate { ids, dx, dy } => {
            edit_subset(visuals, ids, |s| geometry::translate(s, *dx, *dy))
        }
        Action::Align { ids, alignment } => {
            edit_subset(visuals, ids, |s| geometry::align(s, *alignment))
        }
        Action::Distribute { ids, axis } => {
            edit_subset(visuals, ids, |s| geometry::distribute(s, *axis))
        }
        Action::MatchSize {
            ids,
            mode,
            explicit,
        } => edit_subset(visuals, ids, |s| geometry::match_size(s, *mode, *explicit)),
        Action::SnapToGrid {
            ids,
            grid_size,
            snap_sizes,
        } => edit_subset(visuals, ids, |s| {
            geometry::snap_visuals(s, *grid_size, *snap_sizes)
        }),
        Action::ReplaceAll { visuals } => visuals.clone(),
        Action::Clear => Vec::new(),
    }
}

fn edit_subset(
    visuals: &[Visual],
    ids: &[String],
    edit: impl FnOnce(&[Visual]) -> Vec<Visual>,
) -> Vec<Visual> {
    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let subset: Vec<Visual> = visuals
        .iter()
        .filter(|v| wanted.contains(v.id.as_str()))
        .cloned()
        .collect();
    let mut edited = edit(&subset).into_iter();
    visuals
        .iter()
        .map(|v| {
            if wanted.contains(v.id.as_str()) {
                edited.next().unwrap_or_else(|| v.clone())
            } else {
                v.clone()
            }
        })
        .collect()
}

/// Owns one project and sequences analysis, suggestion, placement, editing and
/// history for it.
pub struct DashboardStore {
    config: TesselConfig,
    analyzer: DatasetAnalyzer,
    defaults: VisualDefaults,
    project: Project,
    analysis: Option<DataAnalysisResult>,
    suggestions: Vec<LayoutSuggestion>,
    selection: Vec<String>,
    history: History,
    status: AnalysisStatus,
    restoring: bool,
}
impl Default for DashboardStore {
    fn default() -> Self {
        Self::new(TesselConfig::default())
    }
}
impl DashboardStore {
    pub fn new(config: TesselConfig) -> Self {
        let mut history = History::with_config(&config.history);
        let project = Project::new("Untitled Dashboard");
        history.push_state(&project.visuals);
        Self {
            analyzer: DatasetAnalyzer::with_config(config.classifier.clone()),
            defaults: VisualDefaults::default(),
            project,
            analysis: None,
            suggestions: Vec::new(),
            selection: Vec::new(),
            history,
            status: AnalysisStatus::Idle,
            restoring: false,
            config,
        }
    }
    pub fn with_defaults(mut self, defaults: VisualDefaults) -> Self {
        self.defaults = defaults;
        self
    }
    pub fn with_analyzer(mut self, analyzer: DatasetAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project.name = name.into();
        self
    }

    /// Analyses `dataset` and replaces the current suggestions. The status reads
    /// `Analyzing` until the work completes.
    pub async fn analyze(&mut self, dataset: &Dataset) -> &[LayoutSuggestion] {
        self.status = AnalysisStatus::Analyzing;
        tokio::task::yield_now().await;
        let analysis = self.analyzer.analyze(dataset);
        self.suggestions = generate_layouts(&analysis);
        self.analysis = Some(analysis);
        self.status = AnalysisStatus::Ready;
        log_store_event("analyze", self.project.visuals.len());
        &self.suggestions
    }

    /// Places the chosen suggestion on the canvas, replacing every visual, and
    /// records it in history straight away.
    pub fn apply_layout(&mut self, suggestion_id: &str) -> LayoutResult<&[Visual]> {
        let layout = self.find_suggestion(suggestion_id).inspect_err(|e| {
            log_store_warning("apply_layout", e);
        })?;
        let visuals = map_layout(layout, &self.config.canvas, &self.defaults);
        self.history.flush();
        self.project.visuals = visuals;
        self.selection.clear();
        self.history.push_state(&self.project.visuals);
        log_store_event("apply_layout", self.project.visuals.len());
        Ok(&self.project.visuals)
    }

    /// Applies `action` and schedules a debounced history push. Actions that
    /// leave the canvas unchanged record nothing.
    pub fn dispatch(&mut self, action: Action, now: Instant) {
        let next = reduce(&self.project.visuals, &action);
        if next == self.project.visuals {
            log_store_skipped(action.name());
            return;
        }
        self.project.visuals = next;
        let present: HashSet<&str> = self.project.visuals.iter().map(|v| v.id.as_str()).collect();
        self.selection.retain(|id| present.contains(id.as_str()));
        if !self.restoring {
            self.history.schedule_push(&self.project.visuals, now);
        }
        log_store_event(action.name(), self.project.visuals.len());
    }
    pub fn dispatch_on_selection(&mut self, edit: SelectionEdit, now: Instant) {
        if self.selection.is_empty() {
            return;
        }
        let action = edit.into_action(self.selection.clone(), &self.config.geometry);
        self.dispatch(action, now);
    }

    /// Keeps only ids that name a placed visual.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let present: HashSet<&str> = self.project.visuals.iter().map(|v| v.id.as_str()).collect();
        self.selection = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| present.contains(id.as_str()))
            .collect();
    }
    pub fn select_in_box(&mut self, rect: &SelectionRect) -> &[String] {
        self.selection = geometry::visuals_in_selection_box(&self.project.visuals, rect);
        &self.selection
    }
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
    pub fn selected_visuals(&self) -> Vec<&Visual> {
        self.project
            .visuals
            .iter()
            .filter(|v| self.selection.contains(&v.id))
            .collect()
    }

    pub fn undo(&mut self, now: Instant) -> Option<Vec<Visual>> {
        let restored = self.history.undo()?;
        self.restore(restored.clone(), now);
        Some(restored)
    }
    pub fn redo(&mut self, now: Instant) -> Option<Vec<Visual>> {
        let restored = self.history.redo()?;
        self.restore(restored.clone(), now);
        Some(restored)
    }
    fn restore(&mut self, visuals: Vec<Visual>, now: Instant) {
        self.restoring = true;
        self.dispatch(Action::ReplaceAll { visuals }, now);
        self.restoring = false;
    }

    /// Drives the history debounce. Returns whether a snapshot was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.history.tick(now)
    }
    /// Commits any pending history push.
    pub fn shutdown(&mut self) -> bool {
        self.history.flush()
    }

    pub fn visual(&self, id: &str) -> LayoutResult<&Visual> {
        self.project
            .visuals
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| LayoutError::VisualNotFound { id: id.to_string() })
    }
    pub fn find_suggestion(&self, id: &str) -> LayoutResult<&LayoutSuggestion> {
        if self.suggestions.is_empty() {
            return Err(LayoutError::NoSuggestions);
        }
        self.suggestions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| LayoutError::SuggestionNotFound { id: id.to_string() })
    }
    pub fn project(&self) -> &Project {
        &self.project
    }
    pub fn visuals(&self) -> &[Visual] {
        &self.project.visuals
    }
    pub fn analysis(&self) -> Option<&DataAnalysisResult> {
        self.analysis.as_ref()
    }
    pub fn suggestions(&self) -> &[LayoutSuggestion] {
        &self.suggestions
    }
    pub fn selection(&self) -> &[String] {
        &self.selection
    }
    pub fn status(&self) -> AnalysisStatus {
        self.status
    }
    pub fn history(&self) -> &History {
        &self.history
    }
    pub fn config(&self) -> &TesselConfig {
        &self.config
    }
}
