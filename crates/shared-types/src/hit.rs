//! Hit-test result types

use serde::{Deserialize, Serialize};

/// One row's hit-test outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRow {
    /// Index of the row in the source dataset
    pub index: usize,
    /// Row's x value in data coordinates
    pub x: f64,
    /// Row's y value in data coordinates
    pub y: f64,
    /// Whether the row matched the query
    pub selected: bool,
    /// Pixel distance to the query point, when the caller asked for distances
    pub distance_px: Option<f64>,
}

/// Ordered hit-test outcome, request-scoped
///
/// In all-rows mode this has one entry per dataset row; otherwise only the
/// matching rows, preserving original relative order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub rows: Vec<HitRow>,
}

impl HitResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dataset indices of the selected rows, in original order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.index)
            .collect()
    }

    /// The selected subset as its own result, order-preserving.
    pub fn selected_only(&self) -> HitResult {
        HitResult {
            rows: self.rows.iter().copied().filter(|r| r.selected).collect(),
        }
    }
}
