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

use crate::error::{SerialisationError, SerialisationResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A single cell. Dates arrive as text and are recognised by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}
impl Scalar {
    /// Absent, `null`, or blank text.
    pub fn is_missing(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
    /// Finite numeric value, parsing text when needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) if n.is_finite() => Some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}
impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}
impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}
impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}
impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}
impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

pub type Row = IndexMap<String, Scalar>;

/// Ordered rows handed over by the ingestion layer. Only the first row's keys
/// are treated as the column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Row>,
}
impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
    /// Builds rows from a header and positional records; short records leave
    /// trailing columns absent.
    pub fn from_records<S: AsRef<str>>(columns: &[S], records: Vec<Vec<Scalar>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| c.as_ref().to_string())
                    .zip(record)
                    .collect::<Row>()
            })
            .collect();
        Self { rows }
    }
    pub fn from_json_str(json: &str) -> SerialisationResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(SerialisationError::InvalidDataset {
                reason: "top-level value is not an array".to_string(),
            });
        }
        serde_json::from_value(value).map_err(|e| SerialisationError::InvalidDataset {
            reason: e.to_string(),
        })
    }
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SerialisationResult<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| SerialisationError::DatasetFileError {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json_str(&content)
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
    /// Every row's cell for `column`; `None` where the row lacks the key.
    pub fn values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Scalar>> + 'a {
        self.rows.iter().map(move |row| row.get(column))
    }
    /// Present, non-missing values of `column` in row order.
    pub fn present_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Scalar> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column))
            .filter(|v| !v.is_missing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_first_row_order() {
        let json = r#"[{"Month":"2024-01-01","Revenue":10,"Region":"North"},{"Region":"South","Extra":1}]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), vec!["Month", "Revenue", "Region"]);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let dataset = Dataset::from_records(
            &["a"],
            vec![
                vec![Scalar::from(1.0)],
                vec![Scalar::Null],
                vec![Scalar::from("  ")],
                vec![],
                vec![Scalar::from("x")],
            ],
        );
        let values: Vec<_> = dataset.present_values("a").collect();
        assert_eq!(values, vec![&Scalar::Number(1.0), &Scalar::Text("x".into())]);
        assert_eq!(dataset.values("a").filter(Option::is_none).count(), 1);
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(Scalar::from(" 42.5 ").as_number(), Some(42.5));
        assert_eq!(Scalar::from("abc").as_number(), None);
        assert_eq!(Scalar::Number(f64::INFINITY).as_number(), None);
        assert_eq!(Scalar::Bool(true).as_number(), None);
        assert_eq!(Scalar::Number(2021.0).to_string(), "2021");
    }

    #[test]
    fn test_rejects_non_array_json() {
        let err = Dataset::from_json_str(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, SerialisationError::InvalidDataset { .. }));
    }
}
