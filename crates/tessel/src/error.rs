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

use thiserror::Error;
#[derive(Error, Debug)]
pub enum TesselError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] SerialisationError),
}
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    ConfigFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML configuration: {source}")]
    YamlParseError {
        #[from]
        source: serde_yaml::Error,
    },
    #[error("Invalid configuration: {field} = {value}")]
    InvalidValue { field: String, value: String },
    #[error("Conflicting configuration options: {details}")]
    ConflictingOptions { details: String },
}
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Layout suggestion '{id}' not found")]
    SuggestionNotFound { id: String },
    #[error("No layout suggestions available: run an analysis first")]
    NoSuggestions,
    #[error("Visual '{id}' not found in project")]
    VisualNotFound { id: String },
}
#[derive(Error, Debug)]
pub enum SerialisationError {
    #[error("JSON serialisation failed: {source}")]
    JsonSerialisationError {
        #[from]
        source: serde_json::Error,
    },
    #[error("Failed to read dataset '{path}': {source}")]
    DatasetFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Dataset is not an array of row objects: {reason}")]
    InvalidDataset { reason: String },
}
pub type Result<T> = std::result::Result<T, TesselError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
pub type SerialisationResult<T> = std::result::Result<T, SerialisationError>;
impl From<serde_json::Error> for TesselError {
    fn from(err: serde_json::Error) -> Self {
        TesselError::Serialisation(SerialisationError::JsonSerialisationError { source: err })
    }
}
impl TesselError {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TesselError::Layout(LayoutError::NoSuggestions)
                | TesselError::Layout(LayoutError::SuggestionNotFound { .. })
                | TesselError::Layout(LayoutError::VisualNotFound { .. })
        )
    }
    pub fn category(&self) -> &'static str {
        match self {
            TesselError::Config(_) => "Configuration",
            TesselError::Layout(_) => "Layout",
            TesselError::Serialisation(_) => "Serialisation",
        }
    }
    pub fn user_message(&self) -> String {
        match self {
            TesselError::Layout(LayoutError::NoSuggestions) => {
                "Load a dataset and analyse it before choosing a layout.".to_string()
            }
            TesselError::Config(ConfigError::ConfigFileError { .. }) => {
                "Unable to load the engine configuration. Please check the configuration file."
                    .to_string()
            }
            TesselError::Serialisation(SerialisationError::InvalidDataset { .. }) => {
                "The dataset must be a JSON array of objects, one object per row.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
