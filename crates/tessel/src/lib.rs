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

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod store;
pub mod visual;

pub use analyzer::DatasetAnalyzer;
pub use classifier::roles::{
    ColumnFacts, ColumnRoleClassifier, KeywordRoleClassifier, RoleKeywords, RolePrecedence,
};
pub use classifier::ColumnClassifier;
pub use config::{ClassifierConfig, GeometryConfig, HistoryConfig, TesselConfig};
pub use dataset::{Dataset, Row, Scalar};
pub use error::{ConfigError, LayoutError, Result, SerialisationError, TesselError};
pub use geometry::{Alignment, Axis, Bounds, SizeMatch};
pub use history::{CoalescingTimer, History, Snapshot};
pub use layout::{
    generate_layouts, BindingTarget, DataBinding, GridPosition, LayoutStyle, LayoutSuggestion,
    Priority, VisualSuggestion, VisualType,
};
pub use mapper::{grid_to_pixels, CanvasSpec, GridSpec};
pub use model::{
    Cardinality, ColumnAnalysis, ColumnDataType, ColumnRole, ColumnStatistics,
    DataAnalysisResult, DataQuality, DateGranularity,
};
pub use store::{reduce, Action, AnalysisStatus, DashboardStore, Project, SelectionEdit};
pub use visual::{materialize, PixelRect, SelectionRect, Visual, VisualDefaults, VisualTemplate};

use std::path::Path;

/// Stateless entry point: analyse a dataset, suggest layouts and place one.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    config: TesselConfig,
    analyzer: DatasetAnalyzer,
    defaults: VisualDefaults,
}
impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_config(config: TesselConfig, defaults: VisualDefaults) -> Self {
        Self {
            analyzer: DatasetAnalyzer::with_config(config.classifier.clone()),
            config,
            defaults,
        }
    }
    /// Loads the engine configuration and, when given, per-type visual defaults.
    pub fn from_files<P: AsRef<Path>>(config_path: P, defaults_path: Option<P>) -> Result<Self> {
        let config = TesselConfig::from_yaml_file(config_path)?;
        let defaults = match defaults_path {
            Some(path) => VisualDefaults::from_yaml_file(path)?,
            None => VisualDefaults::default(),
        };
        Ok(Self::with_config(config, defaults))
    }
    pub fn analyze(&self, dataset: &Dataset) -> DataAnalysisResult {
        self.analyzer.analyze(dataset)
    }
    pub fn analyze_json_file<P: AsRef<Path>>(&self, path: P) -> Result<DataAnalysisResult> {
        let dataset = Dataset::from_json_file(path)?;
        Ok(self.analyze(&dataset))
    }
    pub fn suggest(&self, dataset: &Dataset) -> Vec<LayoutSuggestion> {
        generate_layouts(&self.analyze(dataset))
    }
    pub fn map_to_pixels(
        &self,
        suggestion: &VisualSuggestion,
        layout: &LayoutSuggestion,
    ) -> PixelRect {
        grid_to_pixels(
            &suggestion.position,
            GridSpec::from(layout),
            &self.config.canvas,
        )
    }
    pub fn place(&self, layout: &LayoutSuggestion) -> Vec<Visual> {
        mapper::map_layout(layout, &self.config.canvas, &self.defaults)
    }
    pub fn config(&self) -> &TesselConfig {
        &self.config
    }
    pub fn defaults(&self) -> &VisualDefaults {
        &self.defaults
    }
    /// A store sharing this engine's configuration and visual defaults.
    pub fn store(&self) -> DashboardStore {
        DashboardStore::new(self.config.clone()).with_defaults(self.defaults.clone())
    }
}
