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

use crate::classifier::roles::{RoleKeywords, RolePrecedence};
use crate::error::{ConfigError, ConfigResult};
use crate::mapper::CanvasSpec;
use crate::model::Cardinality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub type_sample_size: usize,
    pub time_series_sample_size: usize,
    pub sample_value_count: usize,
    pub type_confidence_threshold: f64,
    pub low_cardinality_limit: usize,
    pub medium_cardinality_limit: usize,
    pub min_year: i32,
    pub max_year: i32,
    pub date_formats: Vec<String>,
    pub keywords: RoleKeywords,
    pub precedence: RolePrecedence,
}
impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            type_sample_size: 100,
            time_series_sample_size: 10,
            sample_value_count: 5,
            type_confidence_threshold: 0.9,
            low_cardinality_limit: 10,
            medium_cardinality_limit: 50,
            min_year: 1900,
            max_year: 2100,
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%m/%d/%Y".to_string(),
                "%Y/%m/%d".to_string(),
                "%d.%m.%Y".to_string(),
                "%b %d, %Y".to_string(),
                "%B %d, %Y".to_string(),
                "%Y-%m".to_string(),
                "%b %Y".to_string(),
                "%B %Y".to_string(),
            ],
            keywords: RoleKeywords::default(),
            precedence: RolePrecedence::default(),
        }
    }
}
impl ClassifierConfig {
    pub fn cardinality_of(&self, unique_count: usize) -> Cardinality {
        if unique_count < self.low_cardinality_limit {
            Cardinality::Low
        } else if unique_count < self.medium_cardinality_limit {
            Cardinality::Medium
        } else {
            Cardinality::High
        }
    }
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.type_confidence_threshold > 0.0 && self.type_confidence_threshold <= 1.0) {
            return Err(invalid(
                "classifier.type_confidence_threshold",
                self.type_confidence_threshold,
            ));
        }
        if self.type_sample_size == 0 {
            return Err(invalid("classifier.type_sample_size", 0));
        }
        if self.time_series_sample_size == 0 {
            return Err(invalid("classifier.time_series_sample_size", 0));
        }
        if self.low_cardinality_limit >= self.medium_cardinality_limit {
            return Err(ConfigError::ConflictingOptions {
                details: format!(
                    "low_cardinality_limit ({}) must be below medium_cardinality_limit ({})",
                    self.low_cardinality_limit, self.medium_cardinality_limit
                ),
            });
        }
        if self.min_year >= self.max_year {
            return Err(ConfigError::ConflictingOptions {
                details: format!(
                    "min_year ({}) must be below max_year ({})",
                    self.min_year, self.max_year
                ),
            });
        }
        Ok(())
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub debounce_ms: u64,
}
impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            debounce_ms: 300,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub grid_size: f64,
    pub snap_sizes: bool,
}
impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            grid_size: 8.0,
            snap_sizes: false,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TesselConfig {
    pub classifier: ClassifierConfig,
    pub canvas: CanvasSpec,
    pub history: HistoryConfig,
    pub geometry: GeometryConfig,
}
impl TesselConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: TesselConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
    pub fn validate(&self) -> ConfigResult<()> {
        self.classifier.validate()?;
        let canvas = &self.canvas;
        if canvas.width <= 2.0 * canvas.padding || canvas.height <= 2.0 * canvas.padding {
            return Err(ConfigError::ConflictingOptions {
                details: format!(
                    "canvas {}x{} leaves no room inside padding {}",
                    canvas.width, canvas.height, canvas.padding
                ),
            });
        }
        if canvas.padding < 0.0 {
            return Err(invalid("canvas.padding", canvas.padding));
        }
        if canvas.gap < 0.0 {
            return Err(invalid("canvas.gap", canvas.gap));
        }
        if self.history.capacity == 0 {
            return Err(invalid("history.capacity", 0));
        }
        if self.geometry.grid_size < 0.0 {
            return Err(invalid("geometry.grid_size", self.geometry.grid_size));
        }
        Ok(())
    }
    pub fn for_presentation() -> Self {
        Self {
            canvas: CanvasSpec {
                width: 1920.0,
                height: 1080.0,
                padding: 40.0,
                gap: 24.0,
            },
            ..Default::default()
        }
    }
    pub fn for_compact_canvas() -> Self {
        Self {
            canvas: CanvasSpec {
                width: 800.0,
                height: 600.0,
                padding: 12.0,
                gap: 8.0,
            },
            geometry: GeometryConfig {
                grid_size: 4.0,
                snap_sizes: false,
            },
            ..Default::default()
        }
    }
}
fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TesselConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history.capacity, 50);
        assert_eq!(config.classifier.type_sample_size, 100);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "canvas:\n  width: 1600\n  height: 900\nhistory:\n  debounce_ms: 150\n";
        let config = TesselConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.canvas.width, 1600.0);
        assert_eq!(config.canvas.padding, CanvasSpec::default().padding);
        assert_eq!(config.history.debounce_ms, 150);
        assert_eq!(config.history.capacity, 50);
    }

    #[test]
    fn test_rejects_inverted_cardinality_limits() {
        let yaml = "classifier:\n  low_cardinality_limit: 60\n  medium_cardinality_limit: 50\n";
        let err = TesselConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions { .. }));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let mut config = TesselConfig::default();
        config.history.capacity = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_cardinality_thresholds() {
        let config = ClassifierConfig::default();
        assert_eq!(config.cardinality_of(9), Cardinality::Low);
        assert_eq!(config.cardinality_of(10), Cardinality::Medium);
        assert_eq!(config.cardinality_of(49), Cardinality::Medium);
        assert_eq!(config.cardinality_of(50), Cardinality::High);
    }

    #[test]
    fn test_presets_validate() {
        assert!(TesselConfig::for_presentation().validate().is_ok());
        assert!(TesselConfig::for_compact_canvas().validate().is_ok());
    }
}
