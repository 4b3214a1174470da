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

mod templates;
pub mod types;

use crate::analyzer::humanize;
use crate::logging::log_layout_event;
use crate::model::{Cardinality, ColumnAnalysis, DataAnalysisResult};
use serde_json::{Map, Value};
pub use types::{
    BindingTarget, DataBinding, GridPosition, LayoutStyle, LayoutSuggestion, Priority,
    VisualSuggestion, VisualType,
};

/// Produces the candidate layouts for an analysis. Deterministic and side-effect free:
/// executive, detailed and compact always, presentation only with two or more metrics.
pub fn generate_layouts(analysis: &DataAnalysisResult) -> Vec<LayoutSuggestion> {
    let slots = ColumnSlots::new(analysis);
    let mut layouts = vec![
        templates::executive(&slots),
        templates::detailed(&slots),
        templates::compact(&slots),
    ];
    if slots.metrics.len() >= 2 {
        layouts.push(templates::presentation(&slots));
    }
    for layout in &layouts {
        debug_assert!(layout.fits_grid(), "{} escapes its grid", layout.id);
        log_layout_event(
            layout.style.as_str(),
            layout.visuals.len(),
            layout.grid_columns,
            layout.grid_rows,
        );
    }
    layouts
}

/// Role-partitioned view over an analysis that templates slot columns from.
pub(crate) struct ColumnSlots<'a> {
    pub metrics: &'a [ColumnAnalysis],
    pub dimensions: &'a [ColumnAnalysis],
    pub time_columns: &'a [ColumnAnalysis],
    pub filter_columns: &'a [ColumnAnalysis],
    pub columns: &'a [ColumnAnalysis],
}
impl<'a> ColumnSlots<'a> {
    fn new(analysis: &'a DataAnalysisResult) -> Self {
        Self {
            metrics: &analysis.metrics,
            dimensions: &analysis.dimensions,
            time_columns: &analysis.time_columns,
            filter_columns: &analysis.filter_columns,
            columns: &analysis.columns,
        }
    }
    pub fn metric(&self, index: usize) -> Option<&'a ColumnAnalysis> {
        self.metrics.get(index)
    }
    pub fn time(&self) -> Option<&'a ColumnAnalysis> {
        self.time_columns.first()
    }
    pub fn filter(&self, index: usize) -> Option<&'a ColumnAnalysis> {
        self.filter_columns.get(index)
    }
    /// First dimension, else the first filter column.
    pub fn category(&self) -> Option<&'a ColumnAnalysis> {
        self.dimensions.first().or_else(|| self.filter_columns.first())
    }
    pub fn low_cardinality_category(&self) -> Option<&'a ColumnAnalysis> {
        self.dimensions
            .iter()
            .chain(self.filter_columns.iter())
            .find(|c| c.cardinality == Cardinality::Low)
    }
    pub fn medium_cardinality_dimension(&self) -> Option<&'a ColumnAnalysis> {
        self.dimensions
            .iter()
            .find(|c| c.cardinality == Cardinality::Medium)
    }
}

/// Accumulates the visuals of one layout with stable ids.
pub(crate) struct LayoutBuilder {
    style: LayoutStyle,
    visuals: Vec<VisualSuggestion>,
}
impl LayoutBuilder {
    pub fn new(style: LayoutStyle) -> Self {
        Self {
            style,
            visuals: Vec::new(),
        }
    }
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        visual_type: VisualType,
        title: String,
        reason: String,
        confidence: u8,
        position: GridPosition,
        binding: Vec<(&str, BindingTarget)>,
        priority: Priority,
    ) -> &mut VisualSuggestion {
        let id = format!(
            "{}-{}-{}",
            self.style.as_str(),
            visual_type.as_str(),
            self.visuals.len()
        );
        self.visuals.push(VisualSuggestion {
            id,
            visual_type,
            title,
            reason,
            confidence,
            position,
            data_binding: binding
                .into_iter()
                .map(|(role, target)| (role.to_string(), target))
                .collect(),
            priority,
            options: Map::new(),
        });
        let last = self.visuals.len() - 1;
        &mut self.visuals[last]
    }
    pub fn len(&self) -> usize {
        self.visuals.len()
    }
    pub fn finish(
        self,
        name: &str,
        description: &str,
        grid: (u32, u32),
        estimated_build_time: &str,
    ) -> LayoutSuggestion {
        LayoutSuggestion {
            id: format!("layout-{}", self.style.as_str()),
            name: name.to_string(),
            description: description.to_string(),
            style: self.style,
            grid_columns: grid.0,
            grid_rows: grid.1,
            visuals: self.visuals,
            estimated_build_time: estimated_build_time.to_string(),
        }
    }
}

pub(crate) fn label(column: &ColumnAnalysis) -> String {
    humanize(&column.name)
}
pub(crate) fn single(column: &ColumnAnalysis) -> BindingTarget {
    BindingTarget::Single(column.name.clone())
}
pub(crate) fn multiple<'a>(columns: impl IntoIterator<Item = &'a ColumnAnalysis>) -> BindingTarget {
    BindingTarget::Multiple(columns.into_iter().map(|c| c.name.clone()).collect())
}
pub(crate) fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
