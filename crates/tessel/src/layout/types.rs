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

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualType {
    Kpi,
    LineChart,
    BarChart,
    PieChart,
    AreaChart,
    Matrix,
    Treemap,
    Table,
    Slicer,
    Gauge,
    Funnel,
}
impl VisualType {
    pub const ALL: [VisualType; 11] = [
        VisualType::Kpi,
        VisualType::LineChart,
        VisualType::BarChart,
        VisualType::PieChart,
        VisualType::AreaChart,
        VisualType::Matrix,
        VisualType::Treemap,
        VisualType::Table,
        VisualType::Slicer,
        VisualType::Gauge,
        VisualType::Funnel,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualType::Kpi => "kpi",
            VisualType::LineChart => "line-chart",
            VisualType::BarChart => "bar-chart",
            VisualType::PieChart => "pie-chart",
            VisualType::AreaChart => "area-chart",
            VisualType::Matrix => "matrix",
            VisualType::Treemap => "treemap",
            VisualType::Table => "table",
            VisualType::Slicer => "slicer",
            VisualType::Gauge => "gauge",
            VisualType::Funnel => "funnel",
        }
    }
}
impl fmt::Display for VisualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract placement on a layout grid, independent of pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
    pub row_span: u32,
    pub col_span: u32,
}
impl GridPosition {
    pub fn new(row: u32, col: u32, row_span: u32, col_span: u32) -> Self {
        Self {
            row,
            col,
            row_span,
            col_span,
        }
    }
    pub fn fits(&self, grid_columns: u32, grid_rows: u32) -> bool {
        self.row_span > 0
            && self.col_span > 0
            && self.col + self.col_span <= grid_columns
            && self.row + self.row_span <= grid_rows
    }
    pub fn overlaps(&self, other: &GridPosition) -> bool {
        self.col < other.col + other.col_span
            && other.col < self.col + self.col_span
            && self.row < other.row + other.row_span
            && other.row < self.row + self.row_span
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindingTarget {
    Single(String),
    Multiple(Vec<String>),
}
impl BindingTarget {
    pub fn columns(&self) -> Vec<&str> {
        match self {
            BindingTarget::Single(c) => vec![c.as_str()],
            BindingTarget::Multiple(cs) => cs.iter().map(String::as_str).collect(),
        }
    }
}
impl From<&str> for BindingTarget {
    fn from(value: &str) -> Self {
        BindingTarget::Single(value.to_string())
    }
}

/// Logical role ("x", "y", "value", ...) to bound column name(s).
pub type DataBinding = IndexMap<String, BindingTarget>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Primary,
    Secondary,
    Supporting,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    Executive,
    Detailed,
    Compact,
    Presentation,
}
impl LayoutStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStyle::Executive => "executive",
            LayoutStyle::Detailed => "detailed",
            LayoutStyle::Compact => "compact",
            LayoutStyle::Presentation => "presentation",
        }
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualSuggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub visual_type: VisualType,
    pub title: String,
    pub reason: String,
    /// Display-only, 0-100.
    pub confidence: u8,
    pub position: GridPosition,
    pub data_binding: DataBinding,
    pub priority: Priority,
    /// Extra data merged into the placed visual, e.g. a gauge maximum.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}
impl VisualSuggestion {
    pub fn bound_columns(&self) -> Vec<&str> {
        self.data_binding
            .values()
            .flat_map(BindingTarget::columns)
            .collect()
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSuggestion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub style: LayoutStyle,
    pub grid_columns: u32,
    pub grid_rows: u32,
    pub visuals: Vec<VisualSuggestion>,
    pub estimated_build_time: String,
}
impl LayoutSuggestion {
    /// Every visual lies inside the declared grid.
    pub fn fits_grid(&self) -> bool {
        self.visuals
            .iter()
            .all(|v| v.position.fits(self.grid_columns, self.grid_rows))
    }
    pub fn visual(&self, id: &str) -> Option<&VisualSuggestion> {
        self.visuals.iter().find(|v| v.id == id)
    }
    pub fn visuals_of_type(&self, visual_type: VisualType) -> Vec<&VisualSuggestion> {
        self.visuals
            .iter()
            .filter(|v| v.visual_type == visual_type)
            .collect()
    }
}
impl fmt::Display for LayoutSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}x{} grid, {} visuals, ~{})",
            self.name,
            self.grid_columns,
            self.grid_rows,
            self.visuals.len(),
            self.estimated_build_time
        )
    }
}
