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

use crate::model::DataQuality;
use tracing::{debug, info, warn};

pub fn log_analysis_event(columns: usize, rows: usize, quality: DataQuality, warnings: usize) {
    info!(
        columns = columns,
        rows = rows,
        quality = ?quality,
        warnings = warnings,
        "Dataset analysed"
    );
}
pub fn log_layout_event(style: &str, visuals: usize, grid_columns: u32, grid_rows: u32) {
    debug!(
        style = style,
        visuals = visuals,
        grid_columns = grid_columns,
        grid_rows = grid_rows,
        "Layout suggestion generated"
    );
}
pub fn log_history_event(event: &str, past: usize, future: usize) {
    debug!(event = event, past = past, future = future, "History event");
}
pub fn log_store_event(action: &str, visuals: usize) {
    debug!(action = action, visuals = visuals, "Store action applied");
}
pub fn log_store_skipped(action: &str) {
    debug!(action = action, "Store action left the canvas unchanged");
}
pub fn log_store_warning(context: &str, error: &dyn std::error::Error) {
    warn!(context = context, error = %error, "Store operation rejected");
}
