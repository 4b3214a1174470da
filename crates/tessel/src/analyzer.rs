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

use crate::classifier::roles::name_tokens;
use crate::classifier::ColumnClassifier;
use crate::config::ClassifierConfig;
use crate::dataset::Dataset;
use crate::logging::log_analysis_event;
use crate::model::{Cardinality, ColumnAnalysis, ColumnRole, DataAnalysisResult, DataQuality};

pub const NO_DATA_WARNING: &str = "No data provided";

/// Runs the column classifier over a whole dataset and aggregates the result.
#[derive(Debug, Default)]
pub struct DatasetAnalyzer {
    classifier: ColumnClassifier,
}
impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            classifier: ColumnClassifier::with_config(config),
        }
    }
    pub fn with_classifier(classifier: ColumnClassifier) -> Self {
        Self { classifier }
    }
    pub fn classifier(&self) -> &ColumnClassifier {
        &self.classifier
    }
    pub fn analyze(&self, dataset: &Dataset) -> DataAnalysisResult {
        if dataset.is_empty() {
            log_analysis_event(0, 0, DataQuality::Poor, 1);
            return DataAnalysisResult::empty(NO_DATA_WARNING);
        }
        let columns: Vec<ColumnAnalysis> = dataset
            .columns()
            .iter()
            .map(|name| self.classifier.classify(name, dataset))
            .collect();
        let by_role = |role: ColumnRole| -> Vec<ColumnAnalysis> {
            columns.iter().filter(|c| c.role == role).cloned().collect()
        };
        let metrics = by_role(ColumnRole::Metric);
        let dimensions = by_role(ColumnRole::Dimension);
        let time_columns = by_role(ColumnRole::Time);
        let filter_columns = by_role(ColumnRole::Filter);
        let identifier_columns = by_role(ColumnRole::Identifier);
        let total_rows = dataset.len();
        let suggested_title = suggest_title(metrics.first(), dimensions.first());
        let quality_score = quality_score(&columns, total_rows, identifier_columns.len());
        let data_quality = DataQuality::from_score(quality_score);
        let warnings = collect_warnings(&metrics, &dimensions, total_rows);
        log_analysis_event(columns.len(), total_rows, data_quality, warnings.len());
        DataAnalysisResult {
            columns,
            metrics,
            dimensions,
            time_columns,
            filter_columns,
            identifier_columns,
            total_rows,
            suggested_title,
            data_quality,
            quality_score,
            warnings,
        }
    }
}

/// "total_revenue" and "totalRevenue" both become "Total Revenue".
pub fn humanize(name: &str) -> String {
    name_tokens(name)
        .iter()
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn suggest_title(metric: Option<&ColumnAnalysis>, dimension: Option<&ColumnAnalysis>) -> String {
    match (metric, dimension) {
        (Some(m), Some(d)) => format!("{} by {}", humanize(&m.name), humanize(&d.name)),
        (Some(m), None) => format!("{} Analysis", humanize(&m.name)),
        (None, Some(d)) => format!("{} Dashboard", humanize(&d.name)),
        (None, None) => "Data Dashboard".to_string(),
    }
}

fn quality_score(columns: &[ColumnAnalysis], total_rows: usize, identifiers: usize) -> f64 {
    let mut score = 100.0;
    if !columns.is_empty() {
        let avg_null =
            columns.iter().map(ColumnAnalysis::null_fraction).sum::<f64>() / columns.len() as f64;
        score -= 50.0 * avg_null;
    }
    if total_rows < 10 {
        score -= 30.0;
    } else if total_rows < 50 {
        score -= 15.0;
    }
    if columns.len() - identifiers < 2 {
        score -= 30.0;
    }
    f64::clamp(score, 0.0, 100.0)
}

fn collect_warnings(
    metrics: &[ColumnAnalysis],
    dimensions: &[ColumnAnalysis],
    total_rows: usize,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if metrics.is_empty() {
        warnings.push("No numeric metric columns detected; charts will be limited".to_string());
    }
    if dimensions.is_empty() {
        warnings.push("No dimension columns detected; grouping options are limited".to_string());
    }
    if total_rows < 10 {
        warnings.push(format!(
            "Only {total_rows} rows of data; trends may not be meaningful"
        ));
    }
    for dimension in dimensions
        .iter()
        .filter(|d| d.cardinality == Cardinality::High)
    {
        warnings.push(format!(
            "Column '{}' has high cardinality ({} unique values); consider grouping it",
            dimension.name, dimension.unique_count
        ));
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Scalar;

    #[test]
    fn test_empty_dataset_is_canonical() {
        let result = DatasetAnalyzer::new().analyze(&Dataset::default());
        assert_eq!(result.total_rows, 0);
        assert_eq!(result.data_quality, DataQuality::Poor);
        assert_eq!(result.warnings, vec![NO_DATA_WARNING.to_string()]);
        assert!(result.columns.is_empty());
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("total_revenue"), "Total Revenue");
        assert_eq!(humanize("unitPrice"), "Unit Price");
        assert_eq!(humanize("Region"), "Region");
        assert_eq!(humanize("customer-ID"), "Customer ID");
    }

    #[test]
    fn test_title_degrades() {
        let dataset = Dataset::from_records(
            &["sales_amount"],
            (0..20).map(|i| vec![Scalar::from(i as f64)]).collect(),
        );
        let result = DatasetAnalyzer::new().analyze(&dataset);
        assert_eq!(result.suggested_title, "Sales Amount Analysis");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("No dimension columns")));
    }

    #[test]
    fn test_quality_penalties() {
        // 5 rows (-30), one usable column (-30), no nulls
        let dataset = Dataset::from_records(
            &["Revenue"],
            (0..5).map(|i| vec![Scalar::from(i as f64)]).collect(),
        );
        let result = DatasetAnalyzer::new().analyze(&dataset);
        assert_eq!(result.quality_score, 40.0);
        assert_eq!(result.data_quality, DataQuality::Medium);
        assert!(result.warnings.iter().any(|w| w.starts_with("Only 5 rows")));
    }

    #[test]
    fn test_nulls_lower_quality() {
        let records = (0..60)
            .map(|i| {
                let revenue = if i % 2 == 0 {
                    Scalar::from(i as f64)
                } else {
                    Scalar::Null
                };
                vec![revenue, Scalar::from(format!("Store {}", i % 20))]
            })
            .collect();
        let dataset = Dataset::from_records(&["Revenue", "Store"], records);
        let result = DatasetAnalyzer::new().analyze(&dataset);
        // average null fraction is 0.25
        assert_eq!(result.quality_score, 87.5);
        assert_eq!(result.data_quality, DataQuality::Good);
        assert_eq!(result.suggested_title, "Revenue by Store");
    }

    #[test]
    fn test_high_cardinality_dimension_is_named() {
        let records = (0..80)
            .map(|i| vec![Scalar::from(format!("Customer {i}")), Scalar::from(i as f64)])
            .collect();
        let dataset = Dataset::from_records(&["customer_name", "sales"], records);
        let result = DatasetAnalyzer::new().analyze(&dataset);
        assert_eq!(result.dimensions.len(), 1);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("'customer_name'") && w.contains("80 unique")));
    }

    #[test]
    fn test_identifiers_are_set_aside() {
        let records = (0..60)
            .map(|i| {
                vec![
                    Scalar::from(format!("ORD-{:04}", 1000 + i)),
                    Scalar::from(250.0 + (i * 13 % 97) as f64),
                ]
            })
            .collect();
        let dataset = Dataset::from_records(&["order_id", "Revenue"], records);
        let result = DatasetAnalyzer::new().analyze(&dataset);
        let names = |columns: &[ColumnAnalysis]| -> Vec<String> {
            columns.iter().map(|c| c.name.clone()).collect()
        };
        assert_eq!(names(&result.identifier_columns), vec!["order_id"]);
        assert_eq!(names(&result.metrics), vec!["Revenue"]);
        assert!(result.dimensions.is_empty());
        assert!(result.time_columns.is_empty());
        assert!(result.filter_columns.is_empty());
        // only one column is usable once the identifier is set aside
        assert_eq!(result.quality_score, 70.0);
        assert_eq!(result.suggested_title, "Revenue Analysis");
    }

    #[test]
    fn test_second_usable_column_lifts_identifier_penalty() {
        let records = (0..60)
            .map(|i| {
                vec![
                    Scalar::from(format!("ORD-{:04}", 1000 + i)),
                    Scalar::from(250.0 + (i * 13 % 97) as f64),
                    Scalar::from(["North", "South", "East"][i % 3]),
                ]
            })
            .collect();
        let dataset = Dataset::from_records(&["order_id", "Revenue", "Region"], records);
        let result = DatasetAnalyzer::new().analyze(&dataset);
        assert_eq!(result.identifier_columns.len(), 1);
        assert_eq!(result.quality_score, 100.0);
        assert_eq!(result.data_quality, DataQuality::Good);
    }
}
