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

use crate::layout::{GridPosition, LayoutSuggestion};
use crate::visual::{materialize, PixelRect, Visual, VisualDefaults};
use serde::{Deserialize, Serialize};

/// Pixel surface the grid is laid onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
    /// Outer margin on every side.
    pub padding: f64,
    /// Space between adjacent cells.
    pub gap: f64,
}
impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 24.0,
            gap: 16.0,
        }
    }
}
impl CanvasSpec {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            padding: self.padding * factor,
            gap: self.gap * factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
}
impl GridSpec {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }
}
impl From<&LayoutSuggestion> for GridSpec {
    fn from(layout: &LayoutSuggestion) -> Self {
        Self::new(layout.grid_columns, layout.grid_rows)
    }
}

/// Converts a grid placement to an absolute rectangle. Cells are uniform; spans
/// absorb the gaps they cross. No clipping: placements outside `grid` land
/// outside the canvas.
pub fn grid_to_pixels(position: &GridPosition, grid: GridSpec, canvas: &CanvasSpec) -> PixelRect {
    let (x, width) = span(
        canvas.width,
        canvas.padding,
        canvas.gap,
        grid.columns,
        position.col,
        position.col_span,
    );
    let (y, height) = span(
        canvas.height,
        canvas.padding,
        canvas.gap,
        grid.rows,
        position.row,
        position.row_span,
    );
    PixelRect::new(x, y, width, height)
}

fn span(extent: f64, padding: f64, gap: f64, cells: u32, start: u32, count: u32) -> (f64, f64) {
    let cells = f64::from(cells.max(1));
    let cell = (extent - 2.0 * padding - gap * (cells - 1.0)) / cells;
    let offset = padding + f64::from(start) * (cell + gap);
    let length = f64::from(count) * cell + f64::from(count.saturating_sub(1)) * gap;
    (offset, length)
}

/// Places every visual of `layout` on `canvas` in suggestion order.
pub fn map_layout(
    layout: &LayoutSuggestion,
    canvas: &CanvasSpec,
    defaults: &VisualDefaults,
) -> Vec<Visual> {
    let grid = GridSpec::from(layout);
    layout
        .visuals
        .iter()
        .map(|suggestion| {
            let rect = grid_to_pixels(&suggestion.position, grid, canvas);
            materialize(suggestion, rect, defaults)
        })
        .collect()
}
