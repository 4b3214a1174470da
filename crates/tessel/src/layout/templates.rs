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

use super::{
    label, multiple, number, single, ColumnSlots, GridPosition, LayoutBuilder, LayoutStyle,
    LayoutSuggestion, Priority, VisualType,
};

/// 4x4: KPI row, one hero chart, a share breakdown and a slicer.
pub(crate) fn executive(slots: &ColumnSlots<'_>) -> LayoutSuggestion {
    let mut layout = LayoutBuilder::new(LayoutStyle::Executive);
    let slicer = slots.filter(0);
    let kpi_limit = if slicer.is_some() { 3 } else { 4 };
    for (col, metric) in slots.metrics.iter().take(kpi_limit).enumerate() {
        layout.place(
            VisualType::Kpi,
            label(metric),
            format!("Headline figure for '{}'", metric.name),
            95,
            GridPosition::new(0, col as u32, 1, 1),
            vec![("value", single(metric))],
            Priority::Primary,
        );
    }
    if let Some(filter) = slicer {
        layout.place(
            VisualType::Slicer,
            format!("{} Filter", label(filter)),
            format!(
                "'{}' has only {} distinct values, which suits a filter control",
                filter.name, filter.unique_count
            ),
            85,
            GridPosition::new(0, 3, 1, 1),
            vec![("field", single(filter))],
            Priority::Supporting,
        );
    }
    let metric = slots.metric(0);
    let share = metric.zip(slots.low_cardinality_category());
    let main_span = if share.is_some() { 3 } else { 4 };
    let mut trend_shown = false;
    match (metric, slots.time(), slots.category()) {
        (Some(m), Some(t), _) => {
            trend_shown = true;
            layout.place(
                VisualType::LineChart,
                format!("{} over {}", label(m), label(t)),
                format!("'{}' is a time column, so '{}' is shown as a trend", t.name, m.name),
                90,
                GridPosition::new(1, 0, 2, main_span),
                vec![("x", single(t)), ("y", single(m))],
                Priority::Primary,
            );
        }
        (Some(m), None, Some(c)) => {
            layout.place(
                VisualType::BarChart,
                format!("{} by {}", label(m), label(c)),
                format!("No time column found; comparing '{}' across '{}'", m.name, c.name),
                85,
                GridPosition::new(1, 0, 2, main_span),
                vec![("x", single(c)), ("y", single(m))],
                Priority::Primary,
            );
        }
        _ => {}
    }
    if let Some((m, c)) = share {
        layout.place(
            VisualType::PieChart,
            format!("{} Share by {}", label(m), label(c)),
            format!(
                "'{}' has {} categories, few enough for a readable share breakdown",
                c.name, c.unique_count
            ),
            80,
            GridPosition::new(1, 3, 2, 1),
            vec![("category", single(c)), ("value", single(m))],
            Priority::Secondary,
        );
    }
    if let (true, Some(m), Some(c)) = (trend_shown, metric, slots.category()) {
        layout.place(
            VisualType::BarChart,
            format!("{} by {}", label(m), label(c)),
            format!("Complements the trend with a breakdown by '{}'", c.name),
            75,
            GridPosition::new(3, 0, 1, 4),
            vec![("x", single(c)), ("y", single(m))],
            Priority::Supporting,
        );
    }
    layout.finish(
        "Executive Summary",
        "Headline KPIs with one focused chart for quick decisions",
        (4, 4),
        "2 minutes",
    )
}

/// 6x7: full KPI strip, trend and comparison, cross-tab, treemap and a detail table.
pub(crate) fn detailed(slots: &ColumnSlots<'_>) -> LayoutSuggestion {
    let mut layout = LayoutBuilder::new(LayoutStyle::Detailed);
    for (col, metric) in slots.metrics.iter().take(5).enumerate() {
        layout.place(
            VisualType::Kpi,
            label(metric),
            format!("Summary value for '{}'", metric.name),
            90,
            GridPosition::new(0, col as u32, 1, 1),
            vec![("value", single(metric))],
            Priority::Primary,
        );
    }
    for (row, filter) in slots.filter_columns.iter().take(2).enumerate() {
        layout.place(
            VisualType::Slicer,
            format!("{} Filter", label(filter)),
            format!("Lets viewers narrow every chart by '{}'", filter.name),
            85,
            GridPosition::new(row as u32, 5, 1, 1),
            vec![("field", single(filter))],
            Priority::Supporting,
        );
    }
    let metric = slots.metric(0);
    let mut line_shown = false;
    if let (Some(m), Some(t)) = (metric, slots.time()) {
        line_shown = true;
        let series: Vec<_> = slots.metrics.iter().take(2).collect();
        let title = match slots.metric(1) {
            Some(second) => format!("{} vs {} over {}", label(m), label(second), label(t)),
            None => format!("{} over {}", label(m), label(t)),
        };
        layout.place(
            VisualType::LineChart,
            title,
            format!(
                "Tracks {} series against '{}' to compare their trends",
                series.len(),
                t.name
            ),
            90,
            GridPosition::new(1, 0, 2, 3),
            vec![("x", single(t)), ("y", multiple(series))],
            Priority::Primary,
        );
    }
    if let (Some(m), Some(c)) = (metric, slots.category()) {
        let position = if line_shown {
            GridPosition::new(1, 3, 2, 2)
        } else {
            GridPosition::new(1, 0, 2, 5)
        };
        layout.place(
            VisualType::BarChart,
            format!("{} by {}", label(m), label(c)),
            format!("Ranks '{}' values by '{}'", m.name, c.name),
            85,
            position,
            vec![("x", single(c)), ("y", single(m))],
            Priority::Secondary,
        );
    }
    if let [rows, columns, ..] = slots.dimensions {
        let mut binding = vec![("rows", single(rows)), ("columns", single(columns))];
        if let Some(m) = metric {
            binding.push(("values", single(m)));
        }
        layout.place(
            VisualType::Matrix,
            format!("{} x {}", label(rows), label(columns)),
            format!("Cross-tabulates '{}' against '{}'", rows.name, columns.name),
            80,
            GridPosition::new(3, 0, 2, 3),
            binding,
            Priority::Secondary,
        );
    }
    if let (Some(m), Some(d)) = (metric, slots.medium_cardinality_dimension()) {
        layout.place(
            VisualType::Treemap,
            format!("{} Composition by {}", label(m), label(d)),
            format!(
                "'{}' has {} categories, too many for a pie but good for a treemap",
                d.name, d.unique_count
            ),
            75,
            GridPosition::new(3, 3, 2, 3),
            vec![("category", single(d)), ("value", single(m))],
            Priority::Secondary,
        );
    }
    let mut table_columns: Vec<_> = slots
        .dimensions
        .iter()
        .take(2)
        .chain(slots.metrics.iter().take(3))
        .collect();
    if table_columns.is_empty() {
        table_columns = slots.columns.iter().take(5).collect();
    }
    layout.place(
        VisualType::Table,
        "Detail Records".to_string(),
        "Row-level detail for the key dimensions and metrics".to_string(),
        70,
        GridPosition::new(5, 0, 2, 6),
        vec![("columns", multiple(table_columns))],
        Priority::Supporting,
    );
    layout.finish(
        "Detailed Analysis",
        "Comprehensive view with breakdowns, cross-tabs and record detail",
        (6, 7),
        "5 minutes",
    )
}

/// 3x3: three KPIs and exactly one chart.
pub(crate) fn compact(slots: &ColumnSlots<'_>) -> LayoutSuggestion {
    let mut layout = LayoutBuilder::new(LayoutStyle::Compact);
    for (col, metric) in slots.metrics.iter().take(3).enumerate() {
        layout.place(
            VisualType::Kpi,
            label(metric),
            format!("Key figure for '{}'", metric.name),
            90,
            GridPosition::new(0, col as u32, 1, 1),
            vec![("value", single(metric))],
            Priority::Primary,
        );
    }
    let metric = slots.metric(0);
    let chart_position = GridPosition::new(1, 0, 2, 3);
    if let Some(t) = slots.time() {
        let mut binding = vec![("x", single(t))];
        if let Some(m) = metric {
            binding.push(("y", single(m)));
        }
        let title = match metric {
            Some(m) => format!("{} over {}", label(m), label(t)),
            None => format!("Records over {}", label(t)),
        };
        layout.place(
            VisualType::LineChart,
            title,
            format!("'{}' gives the single chart a time axis", t.name),
            85,
            chart_position,
            binding,
            Priority::Primary,
        );
    } else {
        let axis = slots.category().or_else(|| slots.columns.first());
        let mut binding = Vec::new();
        if let Some(c) = axis {
            binding.push(("x", single(c)));
        }
        if let Some(m) = metric {
            binding.push(("y", single(m)));
        }
        let title = match (metric, axis) {
            (Some(m), Some(c)) => format!("{} by {}", label(m), label(c)),
            (None, Some(c)) => format!("Records by {}", label(c)),
            (Some(m), None) => label(m),
            (None, None) => "Overview".to_string(),
        };
        layout.place(
            VisualType::BarChart,
            title,
            "No time column found, so a comparison chart is used".to_string(),
            80,
            chart_position,
            binding,
            Priority::Primary,
        );
    }
    layout.finish(
        "Compact View",
        "Minimal dashboard with the essentials on one screen",
        (3, 3),
        "1 minute",
    )
}

/// 4x5: two large KPIs, a gauge, a large trend and a funnel.
pub(crate) fn presentation(slots: &ColumnSlots<'_>) -> LayoutSuggestion {
    let mut layout = LayoutBuilder::new(LayoutStyle::Presentation);
    for (i, metric) in slots.metrics.iter().take(2).enumerate() {
        layout.place(
            VisualType::Kpi,
            label(metric),
            format!("Large-format headline for '{}'", metric.name),
            95,
            GridPosition::new(0, i as u32 * 2, 1, 2),
            vec![("value", single(metric))],
            Priority::Primary,
        );
    }
    let metric = slots.metric(0);
    if let Some(m) = metric {
        let trend_position = GridPosition::new(1, 0, 2, 3);
        match (slots.time(), slots.category()) {
            (Some(t), _) => {
                layout.place(
                    VisualType::LineChart,
                    format!("{} Trend", label(m)),
                    format!("Shows how '{}' moves over '{}'", m.name, t.name),
                    90,
                    trend_position,
                    vec![("x", single(t)), ("y", single(m))],
                    Priority::Primary,
                );
            }
            (None, Some(c)) => {
                layout.place(
                    VisualType::BarChart,
                    format!("{} by {}", label(m), label(c)),
                    format!("No time column found; comparing '{}' across '{}'", m.name, c.name),
                    85,
                    trend_position,
                    vec![("x", single(c)), ("y", single(m))],
                    Priority::Primary,
                );
            }
            (None, None) => {}
        }
        let max = m.statistics.map(|s| s.max).unwrap_or(0.0);
        let gauge = layout.place(
            VisualType::Gauge,
            format!("{} vs Peak", label(m)),
            format!("Measures '{}' against its observed maximum of {max}", m.name),
            80,
            GridPosition::new(1, 3, 2, 1),
            vec![("value", single(m))],
            Priority::Secondary,
        );
        gauge.options.insert("min".to_string(), number(0.0));
        gauge.options.insert("max".to_string(), number(max));
        if let Some(c) = slots.low_cardinality_category() {
            layout.place(
                VisualType::Funnel,
                format!("{} Funnel by {}", label(m), label(c)),
                format!("'{}' has {} stages, suitable for a funnel", c.name, c.unique_count),
                75,
                GridPosition::new(3, 0, 2, 4),
                vec![("stage", single(c)), ("value", single(m))],
                Priority::Supporting,
            );
        }
    }
    debug_assert!(layout.len() <= 5);
    layout.finish(
        "Presentation Mode",
        "Large visuals designed for screens and slide decks",
        (4, 5),
        "3 minutes",
    )
}
