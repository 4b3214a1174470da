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

use crate::error::{ConfigError, ConfigResult};
use crate::layout::{BindingTarget, VisualSuggestion, VisualType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Axis-aligned rectangle in canvas pixels. Width and height may be negative
/// while a selection box is being dragged; see [`PixelRect::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
/// A drag rectangle from the canvas, in the same space as placed visuals.
pub type SelectionRect = PixelRect;

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
    /// Same area with non-negative width and height.
    pub fn normalized(&self) -> Self {
        Self {
            x: self.x.min(self.right()),
            y: self.y.min(self.bottom()),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }
    /// AABB overlap; touching edges count.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
    }
}

/// An element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    pub id: String,
    #[serde(rename = "type")]
    pub visual_type: VisualType,
    pub position: PixelRect,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub style: Map<String, Value>,
}
impl Visual {
    pub fn new(visual_type: VisualType, position: PixelRect) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            visual_type,
            position,
            data: Map::new(),
            style: Map::new(),
        }
    }
    pub fn title(&self) -> Option<&str> {
        self.style.get("title").and_then(Value::as_str)
    }
    pub fn with_position(&self, position: PixelRect) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

/// Default data and style shape for one visual type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualTemplate {
    pub data: Map<String, Value>,
    pub style: Map<String, Value>,
}

/// Per-type default templates the mapper merges suggestions onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisualDefaults {
    templates: IndexMap<VisualType, VisualTemplate>,
}
impl Default for VisualDefaults {
    fn default() -> Self {
        let templates = VisualType::ALL
            .iter()
            .map(|&visual_type| (visual_type, builtin_template(visual_type)))
            .collect();
        Self { templates }
    }
}
impl VisualDefaults {
    /// Built-ins overlaid with the templates found in `yaml`. Types missing from
    /// the document keep their built-in template.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let overrides: IndexMap<VisualType, VisualTemplate> = serde_yaml::from_str(yaml)?;
        let mut defaults = Self::default();
        defaults.templates.extend(overrides);
        Ok(defaults)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
    pub fn template(&self, visual_type: VisualType) -> VisualTemplate {
        self.templates
            .get(&visual_type)
            .cloned()
            .unwrap_or_default()
    }
    pub fn set_template(&mut self, visual_type: VisualType, template: VisualTemplate) {
        self.templates.insert(visual_type, template);
    }
}

fn builtin_template(visual_type: VisualType) -> VisualTemplate {
    let (data, style) = match visual_type {
        VisualType::Kpi => (
            json!({"format": "number", "showTrend": true}),
            json!({"fontSize": 32, "align": "center"}),
        ),
        VisualType::LineChart | VisualType::AreaChart => (
            json!({"showPoints": true, "smooth": false}),
            json!({"showLegend": true, "showGrid": true}),
        ),
        VisualType::BarChart => (
            json!({"orientation": "vertical", "sort": "descending"}),
            json!({"showLegend": false, "showGrid": true}),
        ),
        VisualType::PieChart => (
            json!({"donut": false, "maxSlices": 8}),
            json!({"showLegend": true, "showLabels": true}),
        ),
        VisualType::Matrix => (json!({"subtotals": true}), json!({"banded": true})),
        VisualType::Treemap => (json!({"maxTiles": 50}), json!({"showLabels": true})),
        VisualType::Table => (
            json!({"pageSize": 25, "sortable": true}),
            json!({"banded": true, "headerBold": true}),
        ),
        VisualType::Slicer => (
            json!({"mode": "dropdown", "multiSelect": true}),
            json!({"showHeader": true}),
        ),
        VisualType::Gauge => (json!({"min": 0}), json!({"showTarget": true})),
        VisualType::Funnel => (json!({"sort": "descending"}), json!({"showLabels": true})),
    };
    VisualTemplate {
        data: object(data),
        style: object(style),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl From<&BindingTarget> for Value {
    fn from(target: &BindingTarget) -> Self {
        match target {
            BindingTarget::Single(column) => Value::String(column.clone()),
            BindingTarget::Multiple(columns) => {
                Value::Array(columns.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Turns a suggestion into a placed visual: a fresh id, the type's defaults,
/// then the suggestion's options and bindings shallow-merged into `data` and its
/// title set in `style`.
pub fn materialize(
    suggestion: &VisualSuggestion,
    position: PixelRect,
    defaults: &VisualDefaults,
) -> Visual {
    let VisualTemplate {
        mut data,
        mut style,
    } = defaults.template(suggestion.visual_type);
    data.extend(suggestion.options.clone());
    data.extend(
        suggestion
            .data_binding
            .iter()
            .map(|(role, target)| (role.clone(), Value::from(target))),
    );
    style.insert("title".to_string(), Value::String(suggestion.title.clone()));
    Visual {
        id: Uuid::new_v4().to_string(),
        visual_type: suggestion.visual_type,
        position,
        data,
        style,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GridPosition, Priority};

    fn gauge_suggestion() -> VisualSuggestion {
        let mut options = Map::new();
        options.insert("max".to_string(), json!(250.0));
        options.insert("min".to_string(), json!(5));
        VisualSuggestion {
            id: "presentation-gauge-2".to_string(),
            visual_type: VisualType::Gauge,
            title: "Revenue vs Peak".to_string(),
            reason: String::new(),
            confidence: 80,
            position: GridPosition::new(1, 3, 2, 1),
            data_binding: [("value".to_string(), BindingTarget::from("Revenue"))]
                .into_iter()
                .collect(),
            priority: Priority::Secondary,
            options,
        }
    }

    #[test]
    fn test_normalizes_inverted_rect() {
        let rect = PixelRect::new(100.0, 80.0, -60.0, -30.0).normalized();
        assert_eq!(rect, PixelRect::new(40.0, 50.0, 60.0, 30.0));
    }

    #[test]
    fn test_intersection_counts_partial_overlap() {
        let a = PixelRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.intersects(&PixelRect::new(90.0, 90.0, 50.0, 50.0)));
        assert!(a.intersects(&PixelRect::new(100.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&PixelRect::new(101.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&PixelRect::new(0.0, 150.0, 10.0, -40.0)));
    }

    #[test]
    fn test_materialize_merges_over_defaults() {
        let rect = PixelRect::new(24.0, 300.0, 200.0, 180.0);
        let visual = materialize(&gauge_suggestion(), rect, &VisualDefaults::default());
        assert_eq!(visual.visual_type, VisualType::Gauge);
        assert_eq!(visual.position, rect);
        assert_eq!(visual.data.get("value"), Some(&json!("Revenue")));
        assert_eq!(visual.data.get("max"), Some(&json!(250.0)));
        // suggestion options win over the template
        assert_eq!(visual.data.get("min"), Some(&json!(5)));
        assert_eq!(visual.title(), Some("Revenue vs Peak"));
        assert_eq!(visual.style.get("showTarget"), Some(&json!(true)));
        assert!(Uuid::parse_str(&visual.id).is_ok());
    }

    #[test]
    fn test_fresh_id_per_materialization() {
        let defaults = VisualDefaults::default();
        let a = materialize(&gauge_suggestion(), PixelRect::default(), &defaults);
        let b = materialize(&gauge_suggestion(), PixelRect::default(), &defaults);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_yaml_overrides_single_type() {
        let yaml = "kpi:\n  data:\n    format: currency\n  style:\n    fontSize: 48\n";
        let defaults = VisualDefaults::from_yaml_str(yaml).unwrap();
        assert_eq!(
            defaults.template(VisualType::Kpi).data.get("format"),
            Some(&json!("currency"))
        );
        assert_eq!(
            defaults.template(VisualType::Table),
            builtin_template(VisualType::Table)
        );
    }

    #[test]
    fn test_replaced_template_feeds_materialize() {
        let mut defaults = VisualDefaults::default();
        let mut style = Map::new();
        style.insert("color".to_string(), json!("#ff6600"));
        defaults.set_template(
            VisualType::Gauge,
            VisualTemplate {
                data: Map::new(),
                style,
            },
        );
        let visual = materialize(&gauge_suggestion(), PixelRect::default(), &defaults);
        assert_eq!(visual.style.get("color"), Some(&json!("#ff6600")));
        assert_eq!(visual.style.get("showTarget"), None);
        assert_eq!(visual.data.get("min"), Some(&json!(5)));
    }
}
