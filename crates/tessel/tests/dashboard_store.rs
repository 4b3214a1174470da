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

use std::time::{Duration, Instant};
use tessel::{
    Action, Alignment, AnalysisStatus, ClassifierConfig, DashboardStore, Dataset,
    DatasetAnalyzer, LayoutEngine, LayoutError, PixelRect, RolePrecedence, Scalar,
    SelectionEdit, SelectionRect, TesselConfig, Visual, VisualType,
};

fn sales() -> Dataset {
    let records = (0..24)
        .map(|i| {
            vec![
                Scalar::from(format!("2024-{:02}-01", i % 12 + 1)),
                Scalar::from(["North", "South", "East"][i % 3]),
                Scalar::from(500.0 + (i * 31 % 97) as f64),
                Scalar::from(80.0 + (i * 17 % 89) as f64),
            ]
        })
        .collect();
    Dataset::from_records(&["Month", "Region", "Revenue", "Profit"], records)
}

async fn store_with_layout(style: &str) -> DashboardStore {
    let mut store = DashboardStore::default();
    store.analyze(&sales()).await;
    store.apply_layout(&format!("layout-{style}")).unwrap();
    store
}

#[tokio::test]
async fn test_analyze_produces_suggestions() {
    let mut store = DashboardStore::default();
    assert_eq!(store.status(), AnalysisStatus::Idle);
    let ids: Vec<String> = store
        .analyze(&sales())
        .await
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(
        ids,
        vec![
            "layout-executive",
            "layout-detailed",
            "layout-compact",
            "layout-presentation"
        ]
    );
    assert_eq!(store.status(), AnalysisStatus::Ready);
    assert_eq!(store.analysis().map(|a| a.total_rows), Some(24));
}

#[tokio::test]
async fn test_apply_layout_places_visuals_and_records_history() {
    let store = store_with_layout("compact").await;
    let layout = store.find_suggestion("layout-compact").unwrap();
    assert_eq!(store.visuals().len(), layout.visuals.len());
    assert!(store
        .visuals()
        .iter()
        .any(|v| v.visual_type == VisualType::LineChart));
    assert!(store.history().can_undo());
    assert!(!store.history().has_pending());
}

#[tokio::test]
async fn test_unknown_layout_is_rejected() {
    let mut store = DashboardStore::default();
    store.analyze(&sales()).await;
    let err = store.apply_layout("layout-missing").unwrap_err();
    assert!(matches!(err, LayoutError::SuggestionNotFound { .. }));
    assert!(store.visuals().is_empty());
}

#[tokio::test]
async fn test_selection_edit_then_undo_redo() {
    let mut store = store_with_layout("executive").await;
    let placed = store.visuals().to_vec();
    let now = Instant::now();

    let selected = store
        .select_in_box(&SelectionRect::new(0.0, 0.0, 2000.0, 2000.0))
        .len();
    assert_eq!(selected, placed.len());
    store.dispatch_on_selection(SelectionEdit::Align(Alignment::Left), now);
    assert!(store.visuals().iter().all(|v| v.position.x == 24.0));

    assert_eq!(store.undo(now), Some(placed.clone()));
    assert_eq!(store.visuals(), placed.as_slice());
    let redone = store.redo(now).unwrap();
    assert!(redone.iter().all(|v| v.position.x == 24.0));
    // restoring does not queue a history push of its own
    assert!(!store.history().has_pending());
}

#[tokio::test]
async fn test_rapid_edits_coalesce() {
    let mut store = store_with_layout("compact").await;
    let start = Instant::now();
    let base = store.history().past_len();
    let id = store.visuals()[0].id.clone();
    for step in 0..5u64 {
        store.dispatch(
            Action::UpdatePosition {
                id: id.clone(),
                position: PixelRect::new(step as f64 * 10.0, 0.0, 100.0, 80.0),
            },
            start + Duration::from_millis(step * 100),
        );
    }
    assert!(!store.tick(start + Duration::from_millis(500)));
    assert!(store.tick(start + Duration::from_millis(800)));
    assert_eq!(store.history().past_len(), base + 1);
    assert!(!store.shutdown());
}

#[tokio::test]
async fn test_shutdown_flushes_pending_edit() {
    let mut store = store_with_layout("compact").await;
    let base = store.history().past_len();
    store.dispatch(Action::Clear, Instant::now());
    assert!(store.shutdown());
    assert_eq!(store.history().past_len(), base + 1);
    assert!(store.visuals().is_empty());
}

#[tokio::test]
async fn test_engine_store_uses_engine_canvas() {
    let engine = LayoutEngine::with_config(
        TesselConfig::for_presentation(),
        tessel::VisualDefaults::default(),
    );
    let mut store = engine.store();
    store.analyze(&sales()).await;
    store.apply_layout("layout-presentation").unwrap();
    let min_x = store
        .visuals()
        .iter()
        .map(|v| v.position.x)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(min_x, 40.0);
}

#[tokio::test]
async fn test_unchanged_canvas_records_no_history() {
    let mut store = DashboardStore::default();
    let start = Instant::now();
    let visual = Visual::new(VisualType::Kpi, PixelRect::new(24.0, 24.0, 200.0, 120.0));
    let id = visual.id.clone();
    store.dispatch(Action::AddVisual { visual }, start);
    assert!(store.shutdown());
    let base = store.history().past_len();
    let placed = store.visuals().to_vec();

    store.select([id.as_str()]);
    store.dispatch_on_selection(SelectionEdit::Align(Alignment::Left), start);
    store.dispatch(
        Action::UpdatePosition {
            id: "ghost".to_string(),
            position: PixelRect::new(0.0, 0.0, 10.0, 10.0),
        },
        start,
    );
    assert!(!store.history().has_pending());
    assert!(!store.tick(start + Duration::from_secs(1)));
    assert_eq!(store.history().past_len(), base);
    assert_eq!(store.visuals(), placed.as_slice());

    // the next undo goes straight back to the empty canvas
    assert_eq!(store.undo(start + Duration::from_secs(2)), Some(Vec::new()));
}

#[tokio::test]
async fn test_selection_and_visual_lookup() {
    let mut store = store_with_layout("executive").await;
    let first = store.visuals()[0].id.clone();

    store.select([first.as_str(), "ghost"]);
    assert_eq!(store.selection().to_vec(), vec![first.clone()]);
    let selected = store.selected_visuals();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, first);
    assert_eq!(store.visual(&first).unwrap().id, first);
    assert!(matches!(
        store.visual("ghost"),
        Err(LayoutError::VisualNotFound { .. })
    ));

    store.clear_selection();
    assert!(store.selected_visuals().is_empty());
    let count = store.visuals().len();
    store.dispatch_on_selection(SelectionEdit::Remove, Instant::now());
    assert_eq!(store.visuals().len(), count);
}

#[tokio::test]
async fn test_store_with_custom_analyzer_and_name() {
    let analyzer = DatasetAnalyzer::with_config(ClassifierConfig {
        precedence: RolePrecedence::KeywordsBeforeFilter,
        ..ClassifierConfig::default()
    });
    let mut store = DashboardStore::default()
        .with_analyzer(analyzer)
        .with_project_name("Regional Sales");
    store.analyze(&sales()).await;
    assert_eq!(store.project().name, "Regional Sales");
    let dimensions: Vec<&str> = store
        .analysis()
        .map(|a| a.dimensions.iter().map(|c| c.name.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(dimensions, vec!["Region"]);
}
