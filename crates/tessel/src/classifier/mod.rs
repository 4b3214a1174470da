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

pub mod roles;
pub mod temporal;

use crate::config::ClassifierConfig;
use crate::dataset::{Dataset, Scalar};
use crate::model::{ColumnAnalysis, ColumnDataType, ColumnRole, ColumnStatistics, DateGranularity};
use itertools::Itertools;
use roles::{ColumnFacts, ColumnRoleClassifier, KeywordRoleClassifier};
use std::fmt;
use temporal::{
    granularity_from_span, is_boolean_token, is_month_like, is_quarter_like, is_year_like,
    matches_time_pattern, parse_date, span_days,
};

/// Profiles a single column: type, cardinality, role, statistics and time-series shape.
/// Never fails; values that cannot be interpreted are left out of counts and aggregates.
pub struct ColumnClassifier {
    config: ClassifierConfig,
    roles: Box<dyn ColumnRoleClassifier>,
}
impl ColumnClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }
    pub fn with_config(config: ClassifierConfig) -> Self {
        let roles = KeywordRoleClassifier::new(config.keywords.clone(), config.precedence);
        Self {
            config,
            roles: Box::new(roles),
        }
    }
    /// Swaps the role strategy while keeping type, cardinality and statistics detection.
    pub fn with_role_classifier(mut self, roles: Box<dyn ColumnRoleClassifier>) -> Self {
        self.roles = roles;
        self
    }
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
    pub fn role_classifier_type(&self) -> &'static str {
        self.roles.classifier_type()
    }
    pub fn classify(&self, name: &str, dataset: &Dataset) -> ColumnAnalysis {
        let values: Vec<&Scalar> = dataset.present_values(name).collect();
        let total_count = dataset.len();
        let null_count = total_count.saturating_sub(values.len());
        let unique_count = values.iter().map(|v| v.to_string()).unique().count();
        let cardinality = self.config.cardinality_of(unique_count);
        let data_type = self.detect_data_type(&values);
        let role = self.roles.detect_role(&ColumnFacts {
            name,
            data_type,
            cardinality,
            unique_count,
            values: &values,
        });
        let is_time_series = self.detect_time_series(name, role, &values);
        let date_granularity = if is_time_series {
            self.detect_granularity(&values)
        } else {
            None
        };
        let statistics = data_type.is_number().then(|| statistics(&values));
        let sample_values = values
            .iter()
            .unique_by(|v| v.to_string())
            .take(self.config.sample_value_count)
            .map(|v| (*v).clone())
            .collect();
        ColumnAnalysis {
            name: name.to_string(),
            data_type,
            role,
            unique_count,
            total_count,
            null_count,
            cardinality,
            sample_values,
            statistics,
            is_time_series,
            date_granularity,
        }
    }
    /// Checks a leading sample in fixed precedence: number, date, boolean, text.
    fn detect_data_type(&self, values: &[&Scalar]) -> ColumnDataType {
        let sample = &values[..values.len().min(self.config.type_sample_size)];
        if sample.is_empty() {
            return ColumnDataType::Text;
        }
        if self.share(sample, |v| v.as_number().is_some()) {
            return ColumnDataType::Number;
        }
        if self.share(sample, |v| {
            v.as_text().is_some_and(|s| self.parse_date(s).is_some())
        }) {
            return ColumnDataType::Date;
        }
        if self.share(sample, |v| match v {
            Scalar::Bool(_) => true,
            Scalar::Text(s) => is_boolean_token(s),
            Scalar::Number(n) => *n == 0.0 || *n == 1.0,
            Scalar::Null => false,
        }) {
            return ColumnDataType::Boolean;
        }
        ColumnDataType::Text
    }
    fn detect_time_series(&self, name: &str, role: ColumnRole, values: &[&Scalar]) -> bool {
        if role == ColumnRole::Time || self.roles.is_time_name(name) {
            return true;
        }
        let sample = self.time_sample(values);
        !sample.is_empty() && self.share_str(&sample, matches_time_pattern)
    }
    fn detect_granularity(&self, values: &[&Scalar]) -> Option<DateGranularity> {
        let sample = self.time_sample(values);
        if !sample.is_empty() {
            if self.share_str(&sample, is_quarter_like) {
                return Some(DateGranularity::Quarter);
            }
            if self.share_str(&sample, is_year_like) {
                return Some(DateGranularity::Year);
            }
            if self.share_str(&sample, is_month_like) {
                return Some(DateGranularity::Month);
            }
        }
        let dates: Vec<_> = values
            .iter()
            .filter_map(|v| v.as_text().and_then(|s| self.parse_date(s)))
            .collect();
        span_days(&dates).map(granularity_from_span)
    }
    fn time_sample(&self, values: &[&Scalar]) -> Vec<String> {
        values
            .iter()
            .take(self.config.time_series_sample_size)
            .map(|v| v.to_string())
            .collect()
    }
    fn parse_date(&self, value: &str) -> Option<chrono::NaiveDate> {
        parse_date(
            value,
            &self.config.date_formats,
            self.config.min_year,
            self.config.max_year,
        )
    }
    fn share(&self, sample: &[&Scalar], predicate: impl Fn(&Scalar) -> bool) -> bool {
        let hits = sample.iter().filter(|v| predicate(v)).count();
        hits as f64 / sample.len() as f64 >= self.config.type_confidence_threshold
    }
    fn share_str(&self, sample: &[String], predicate: impl Fn(&str) -> bool) -> bool {
        let hits = sample.iter().filter(|v| predicate(v)).count();
        hits as f64 / sample.len() as f64 >= self.config.type_confidence_threshold
    }
}
impl Default for ColumnClassifier {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Debug for ColumnClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnClassifier")
            .field("config", &self.config)
            .field("roles", &self.roles.classifier_type())
            .finish()
    }
}

/// min/max/avg/sum over finite numeric values; all zero when there are none.
fn statistics(values: &[&Scalar]) -> ColumnStatistics {
    let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_number()).collect();
    if numbers.is_empty() {
        return ColumnStatistics::default();
    }
    let sum: f64 = numbers.iter().sum();
    ColumnStatistics {
        min: numbers.iter().copied().fold(f64::INFINITY, f64::min),
        max: numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg: sum / numbers.len() as f64,
        sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cardinality;

    fn column(values: Vec<Scalar>) -> Dataset {
        Dataset::from_records(&["col"], values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn test_numeric_detection_tolerates_ten_percent_noise() {
        let mut values: Vec<Scalar> = (0..90).map(|i| Scalar::from(i as f64)).collect();
        values.extend((0..10).map(|_| Scalar::from("n/a")));
        let analysis = ColumnClassifier::new().classify("col", &column(values));
        assert_eq!(analysis.data_type, ColumnDataType::Number);
        let stats = analysis.statistics.unwrap();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 89.0);
        assert_eq!(stats.sum, (0..90).sum::<i32>() as f64);
    }

    #[test]
    fn test_numeric_text_counts_as_number() {
        let values = vec![Scalar::from("1.5"), Scalar::from("2"), Scalar::from(" 3 ")];
        let analysis = ColumnClassifier::new().classify("col", &column(values));
        assert_eq!(analysis.data_type, ColumnDataType::Number);
        assert_eq!(analysis.statistics.unwrap().avg, 6.5 / 3.0);
    }

    #[test]
    fn test_date_and_boolean_detection() {
        let dates = (1..=12)
            .map(|m| Scalar::from(format!("2024-{m:02}-01")))
            .collect();
        let analysis = ColumnClassifier::new().classify("shipped", &column(dates));
        assert_eq!(analysis.data_type, ColumnDataType::Date);
        assert_eq!(analysis.role, ColumnRole::Time);
        assert!(analysis.is_time_series);
        assert_eq!(analysis.date_granularity, Some(DateGranularity::Quarter));
        assert!(analysis.statistics.is_none());

        let flags = vec![Scalar::from("yes"), Scalar::from("no"), Scalar::Bool(true)];
        let analysis = ColumnClassifier::new().classify("col", &column(flags));
        assert_eq!(analysis.data_type, ColumnDataType::Boolean);
    }

    #[test]
    fn test_zero_one_numbers_are_numbers_first() {
        let values = vec![Scalar::from(0.0), Scalar::from(1.0), Scalar::from(1.0)];
        let analysis = ColumnClassifier::new().classify("col", &column(values));
        assert_eq!(analysis.data_type, ColumnDataType::Number);
    }

    #[test]
    fn test_missing_values_excluded() {
        let values = vec![
            Scalar::from("a"),
            Scalar::Null,
            Scalar::from(""),
            Scalar::from("b"),
            Scalar::from("a"),
        ];
        let analysis = ColumnClassifier::new().classify("col", &column(values));
        assert_eq!(analysis.total_count, 5);
        assert_eq!(analysis.null_count, 2);
        assert_eq!(analysis.unique_count, 2);
        assert_eq!(analysis.cardinality, Cardinality::Low);
        assert_eq!(
            analysis.sample_values,
            vec![Scalar::from("a"), Scalar::from("b")]
        );
    }

    #[test]
    fn test_quarter_and_year_granularity() {
        let quarters = ["Q1 2023", "Q2 2023", "Q3 2023", "Q4 2023"]
            .iter()
            .map(|q| Scalar::from(*q))
            .collect();
        let analysis = ColumnClassifier::new().classify("Period", &column(quarters));
        assert!(analysis.is_time_series);
        assert_eq!(analysis.date_granularity, Some(DateGranularity::Quarter));

        let years = (2015..2025).map(|y| Scalar::from(y as f64)).collect();
        let analysis = ColumnClassifier::new().classify("col", &column(years));
        assert!(analysis.is_time_series);
        assert_eq!(analysis.date_granularity, Some(DateGranularity::Year));
    }

    #[test]
    fn test_month_names_give_month_granularity() {
        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ]
        .iter()
        .map(|m| Scalar::from(format!("{m} 2024")))
        .collect();
        let analysis = ColumnClassifier::new().classify("col", &column(months));
        assert!(analysis.is_time_series);
        assert_eq!(analysis.date_granularity, Some(DateGranularity::Month));
    }

    #[test]
    fn test_short_spans_give_week_and_day_granularity() {
        let every_third_day = (0..10)
            .map(|i| Scalar::from(format!("2024-03-{:02}", 1 + 3 * i)))
            .collect();
        let analysis = ColumnClassifier::new().classify("col", &column(every_third_day));
        assert!(analysis.is_time_series);
        assert_eq!(analysis.date_granularity, Some(DateGranularity::Week));

        let consecutive_days = (0..10)
            .map(|i| Scalar::from(format!("2024-03-{:02}", 1 + i)))
            .collect();
        let analysis = ColumnClassifier::new().classify("col", &column(consecutive_days));
        assert_eq!(analysis.date_granularity, Some(DateGranularity::Day));
    }

    #[test]
    fn test_all_missing_column_is_text_with_zero_counts() {
        let analysis = ColumnClassifier::new().classify("col", &column(vec![Scalar::Null; 3]));
        assert_eq!(analysis.data_type, ColumnDataType::Text);
        assert_eq!(analysis.unique_count, 0);
        assert!(analysis.sample_values.is_empty());
    }

    #[test]
    fn test_custom_role_classifier() {
        struct AlwaysFilter;
        impl ColumnRoleClassifier for AlwaysFilter {
            fn detect_role(&self, _facts: &ColumnFacts<'_>) -> ColumnRole {
                ColumnRole::Filter
            }
            fn classifier_type(&self) -> &'static str {
                "always-filter"
            }
            fn is_time_name(&self, _name: &str) -> bool {
                false
            }
        }
        let classifier = ColumnClassifier::new().with_role_classifier(Box::new(AlwaysFilter));
        let analysis = classifier.classify("Revenue", &column(vec![Scalar::from(1.0)]));
        assert_eq!(analysis.role, ColumnRole::Filter);
        assert_eq!(classifier.role_classifier_type(), "always-filter");
    }
}
