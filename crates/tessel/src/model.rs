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

use crate::dataset::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDataType {
    Number,
    Text,
    Date,
    Boolean,
    Category,
}
impl ColumnDataType {
    pub fn is_number(&self) -> bool {
        matches!(self, ColumnDataType::Number)
    }
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnDataType::Text)
    }
    pub fn is_date(&self) -> bool {
        matches!(self, ColumnDataType::Date)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Metric,
    Dimension,
    Time,
    Identifier,
    Filter,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Low,
    Medium,
    High,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateGranularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub sum: f64,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAnalysis {
    pub name: String,
    pub data_type: ColumnDataType,
    pub role: ColumnRole,
    pub unique_count: usize,
    pub total_count: usize,
    pub null_count: usize,
    pub cardinality: Cardinality,
    pub sample_values: Vec<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ColumnStatistics>,
    pub is_time_series: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_granularity: Option<DateGranularity>,
}
impl ColumnAnalysis {
    pub fn null_fraction(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.null_count as f64 / self.total_count as f64
        }
    }
}
impl fmt::Display for ColumnAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:?}, {:?}, {} unique)",
            self.name, self.data_type, self.role, self.unique_count
        )
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Good,
    Medium,
    Poor,
}
impl DataQuality {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 70.0 => DataQuality::Good,
            s if s >= 40.0 => DataQuality::Medium,
            _ => DataQuality::Poor,
        }
    }
}
/// Output of one analysis run. Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAnalysisResult {
    pub columns: Vec<ColumnAnalysis>,
    pub metrics: Vec<ColumnAnalysis>,
    pub dimensions: Vec<ColumnAnalysis>,
    pub time_columns: Vec<ColumnAnalysis>,
    pub filter_columns: Vec<ColumnAnalysis>,
    pub identifier_columns: Vec<ColumnAnalysis>,
    pub total_rows: usize,
    pub suggested_title: String,
    pub data_quality: DataQuality,
    pub quality_score: f64,
    pub warnings: Vec<String>,
}
impl DataAnalysisResult {
    pub fn empty(warning: &str) -> Self {
        Self {
            columns: Vec::new(),
            metrics: Vec::new(),
            dimensions: Vec::new(),
            time_columns: Vec::new(),
            filter_columns: Vec::new(),
            identifier_columns: Vec::new(),
            total_rows: 0,
            suggested_title: "Data Dashboard".to_string(),
            data_quality: DataQuality::Poor,
            quality_score: 0.0,
            warnings: vec![warning.to_string()],
        }
    }
    pub fn column(&self, name: &str) -> Option<&ColumnAnalysis> {
        self.columns.iter().find(|c| c.name == name)
    }
    pub fn report(&self) -> String {
        let mut report = String::new();
        report.push_str("Dataset Analysis\n================\n");
        report.push_str(&format!("Title: {}\n", self.suggested_title));
        report.push_str(&format!(
            "Rows: {}, Columns: {}\n",
            self.total_rows,
            self.columns.len()
        ));
        let names = |cols: &[ColumnAnalysis]| {
            cols.iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        report.push_str(&format!("  - Metrics: {}\n", names(&self.metrics)));
        report.push_str(&format!("  - Dimensions: {}\n", names(&self.dimensions)));
        report.push_str(&format!("  - Time: {}\n", names(&self.time_columns)));
        report.push_str(&format!("  - Filters: {}\n", names(&self.filter_columns)));
        report.push_str(&format!(
            "  - Identifiers: {}\n",
            names(&self.identifier_columns)
        ));
        report.push_str(&format!(
            "\nData Quality: {:?} ({:.0}/100)\n",
            self.data_quality, self.quality_score
        ));
        if !self.warnings.is_empty() {
            report.push_str("\nWarnings:\n");
            for warning in &self.warnings {
                report.push_str(&format!("  • {warning}\n"));
            }
        }
        report
    }
}
impl fmt::Display for DataAnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows, {} metrics, {} dimensions, quality {:?}",
            self.suggested_title,
            self.total_rows,
            self.metrics.len(),
            self.dimensions.len(),
            self.data_quality
        )
    }
}
