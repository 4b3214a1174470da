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
use crate::model::{Cardinality, ColumnDataType, ColumnRole};
use serde::{Deserialize, Serialize};

/// What a role classifier gets to see about one column.
#[derive(Debug, Clone)]
pub struct ColumnFacts<'a> {
    pub name: &'a str,
    pub data_type: ColumnDataType,
    pub cardinality: Cardinality,
    pub unique_count: usize,
    pub values: &'a [&'a Scalar],
}

/// Assigns a semantic role to a column. Implementations must be deterministic.
pub trait ColumnRoleClassifier: Send + Sync {
    fn detect_role(&self, facts: &ColumnFacts<'_>) -> ColumnRole;

    fn classifier_type(&self) -> &'static str;

    /// Whether the column name alone marks it as temporal.
    fn is_time_name(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolePrecedence {
    /// Low-cardinality text becomes a filter even when its name is a dimension keyword.
    #[default]
    FilterBeforeKeywords,
    KeywordsBeforeFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    /// Matched against whole name tokens.
    pub identifier: Vec<String>,
    pub time: Vec<String>,
    pub metric: Vec<String>,
    pub dimension: Vec<String>,
}
impl Default for RoleKeywords {
    fn default() -> Self {
        let list = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            identifier: list(&["id", "key", "code", "uuid", "guid"]),
            time: list(&[
                "date", "time", "month", "year", "quarter", "week", "day", "period",
            ]),
            metric: list(&[
                "revenue", "sales", "amount", "total", "count", "price", "cost", "profit",
                "margin", "value", "budget", "actual", "target", "rate", "percent", "ratio",
                "score", "units", "volume",
            ]),
            dimension: list(&[
                "region",
                "country",
                "city",
                "state",
                "category",
                "type",
                "status",
                "product",
                "customer",
                "segment",
                "channel",
                "department",
                "name",
                "brand",
                "store",
                "location",
                "team",
                "group",
                "tier",
                "industry",
                "vendor",
                "supplier",
                "market",
            ]),
        }
    }
}
impl RoleKeywords {
    pub fn is_identifier_name(&self, name: &str) -> bool {
        name_tokens(name)
            .iter()
            .any(|token| self.identifier.iter().any(|k| token.eq_ignore_ascii_case(k)))
    }
    pub fn is_time_name(&self, name: &str) -> bool {
        contains_any(name, &self.time)
    }
    pub fn is_metric_name(&self, name: &str) -> bool {
        contains_any(name, &self.metric)
    }
    pub fn is_dimension_name(&self, name: &str) -> bool {
        contains_any(name, &self.dimension)
    }
}
fn contains_any(name: &str, keywords: &[String]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}

/// Splits a column name on separators and camelCase boundaries.
pub fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for part in name.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace()) {
        let chars: Vec<char> = part.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            let boundary = i > 0
                && c.is_uppercase()
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || chars.get(i + 1).is_some_and(|n| n.is_lowercase())
                        && chars[i - 1].is_uppercase());
            if boundary && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }
    tokens
}

/// Keyword and cardinality heuristics; the first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct KeywordRoleClassifier {
    keywords: RoleKeywords,
    precedence: RolePrecedence,
}
impl KeywordRoleClassifier {
    pub fn new(keywords: RoleKeywords, precedence: RolePrecedence) -> Self {
        Self {
            keywords,
            precedence,
        }
    }
    fn filter_rule(&self, facts: &ColumnFacts<'_>) -> Option<ColumnRole> {
        (facts.cardinality == Cardinality::Low && facts.data_type.is_text())
            .then_some(ColumnRole::Filter)
    }
    fn dimension_rule(&self, facts: &ColumnFacts<'_>) -> Option<ColumnRole> {
        self.keywords
            .is_dimension_name(facts.name)
            .then_some(ColumnRole::Dimension)
    }
}
impl ColumnRoleClassifier for KeywordRoleClassifier {
    fn detect_role(&self, facts: &ColumnFacts<'_>) -> ColumnRole {
        let is_number = facts.data_type.is_number();
        if self.keywords.is_identifier_name(facts.name) && facts.cardinality == Cardinality::High {
            return ColumnRole::Identifier;
        }
        if self.keywords.is_time_name(facts.name) || facts.data_type.is_date() {
            return ColumnRole::Time;
        }
        if is_number && self.keywords.is_metric_name(facts.name) {
            return ColumnRole::Metric;
        }
        if is_number && facts.cardinality == Cardinality::High {
            return ColumnRole::Metric;
        }
        let ordered = match self.precedence {
            RolePrecedence::FilterBeforeKeywords => {
                self.filter_rule(facts).or_else(|| self.dimension_rule(facts))
            }
            RolePrecedence::KeywordsBeforeFilter => {
                self.dimension_rule(facts).or_else(|| self.filter_rule(facts))
            }
        };
        if let Some(role) = ordered {
            return role;
        }
        if is_number {
            ColumnRole::Metric
        } else {
            ColumnRole::Dimension
        }
    }

    fn classifier_type(&self) -> &'static str {
        "keyword"
    }

    fn is_time_name(&self, name: &str) -> bool {
        self.keywords.is_time_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(name: &str, data_type: ColumnDataType, cardinality: Cardinality) -> ColumnFacts<'_> {
        ColumnFacts {
            name,
            data_type,
            cardinality,
            unique_count: 0,
            values: &[],
        }
    }

    #[test]
    fn test_name_tokens() {
        assert_eq!(name_tokens("customer_id"), vec!["customer", "id"]);
        assert_eq!(name_tokens("CustomerID"), vec!["Customer", "ID"]);
        assert_eq!(name_tokens("unitPrice"), vec!["unit", "Price"]);
        assert_eq!(name_tokens("HTTPStatus code"), vec!["HTTP", "Status", "code"]);
    }

    #[test]
    fn test_identifier_needs_high_cardinality() {
        let classifier = KeywordRoleClassifier::default();
        let id = facts("order_id", ColumnDataType::Number, Cardinality::High);
        assert_eq!(classifier.detect_role(&id), ColumnRole::Identifier);
        let low = facts("order_id", ColumnDataType::Text, Cardinality::Low);
        assert_eq!(classifier.detect_role(&low), ColumnRole::Filter);
        // "paid" contains "id" but is not an id token
        let paid = facts("paid", ColumnDataType::Number, Cardinality::High);
        assert_eq!(classifier.detect_role(&paid), ColumnRole::Metric);
    }

    #[test]
    fn test_time_by_name_or_type() {
        let classifier = KeywordRoleClassifier::default();
        let by_name = facts("Fiscal Year", ColumnDataType::Number, Cardinality::Low);
        assert_eq!(classifier.detect_role(&by_name), ColumnRole::Time);
        let by_type = facts("Shipped", ColumnDataType::Date, Cardinality::High);
        assert_eq!(classifier.detect_role(&by_type), ColumnRole::Time);
    }

    #[test]
    fn test_metric_rules() {
        let classifier = KeywordRoleClassifier::default();
        let keyword = facts("Revenue", ColumnDataType::Number, Cardinality::Low);
        assert_eq!(classifier.detect_role(&keyword), ColumnRole::Metric);
        let continuous = facts("Temperature", ColumnDataType::Number, Cardinality::High);
        assert_eq!(classifier.detect_role(&continuous), ColumnRole::Metric);
        let fallback = facts("Rooms", ColumnDataType::Number, Cardinality::Low);
        assert_eq!(classifier.detect_role(&fallback), ColumnRole::Metric);
    }

    #[test]
    fn test_filter_precedes_dimension_keyword_by_default() {
        let classifier = KeywordRoleClassifier::default();
        let region = facts("Region", ColumnDataType::Text, Cardinality::Low);
        assert_eq!(classifier.detect_role(&region), ColumnRole::Filter);
        let medium = facts("Region", ColumnDataType::Text, Cardinality::Medium);
        assert_eq!(classifier.detect_role(&medium), ColumnRole::Dimension);
    }

    #[test]
    fn test_keywords_first_precedence() {
        let classifier = KeywordRoleClassifier::new(
            RoleKeywords::default(),
            RolePrecedence::KeywordsBeforeFilter,
        );
        let region = facts("Region", ColumnDataType::Text, Cardinality::Low);
        assert_eq!(classifier.detect_role(&region), ColumnRole::Dimension);
        let flag = facts("Priority", ColumnDataType::Text, Cardinality::Low);
        assert_eq!(classifier.detect_role(&flag), ColumnRole::Filter);
    }

    #[test]
    fn test_default_dimension() {
        let classifier = KeywordRoleClassifier::default();
        let notes = facts("Notes", ColumnDataType::Text, Cardinality::High);
        assert_eq!(classifier.detect_role(&notes), ColumnRole::Dimension);
        let flag = facts("Active", ColumnDataType::Boolean, Cardinality::Low);
        assert_eq!(classifier.detect_role(&flag), ColumnRole::Dimension);
    }
}
