//! Column-major dataset the HitTester reads from
//!
//! Rows are an ordered sequence; each row has named numeric fields. The dataset is
//! read-only once built and is shared by reference with the hit-testing calls.

use std::collections::HashMap;

use crate::errors::{PlotInteractError, PlotInteractResult};

/// Ordered rows with named numeric columns, stored column-major
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: HashMap<String, Vec<f64>>,
    // Column names in insertion order, for stable introspection
    order: Vec<String>,
    row_count: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named column. All columns must have the same length; the first
    /// column fixes the row count.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> PlotInteractResult<Self> {
        let name = name.into();
        if self.order.is_empty() {
            self.row_count = values.len();
        } else if values.len() != self.row_count {
            return Err(PlotInteractError::RaggedDataset {
                column: name,
                expected: self.row_count,
                actual: values.len(),
            });
        }
        if !self.columns.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    /// Convenience constructor for the common x/y scatter case.
    pub fn from_xy(
        x_name: impl Into<String>,
        x: Vec<f64>,
        y_name: impl Into<String>,
        y: Vec<f64>,
    ) -> PlotInteractResult<Self> {
        Self::new().with_column(x_name, x)?.with_column(y_name, y)
    }

    /// Look up a column by name, failing with the missing column's name.
    pub fn column(&self, name: &str) -> PlotInteractResult<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| PlotInteractError::InvalidField {
                field: name.to_string(),
            })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup() {
        let ds = Dataset::from_xy("mpg", vec![21.0, 22.8], "wt", vec![2.62, 2.32]).unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column("mpg").unwrap(), &[21.0, 22.8]);
    }

    #[test]
    fn test_unknown_column_names_field() {
        let ds = Dataset::from_xy("x", vec![1.0], "y", vec![2.0]).unwrap();
        let err = ds.column("z").unwrap_err();
        assert_eq!(
            err,
            PlotInteractError::InvalidField {
                field: "z".to_string()
            }
        );
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::new()
            .with_column("x", vec![1.0, 2.0])
            .unwrap()
            .with_column("y", vec![1.0])
            .unwrap_err();
        assert!(matches!(err, PlotInteractError::RaggedDataset { .. }));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new().with_column("x", vec![]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column("x").unwrap().len(), 0);
    }
}
