//! Common error types used across all plot-interact crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all plot-interact operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum PlotInteractError {
    // Dataset errors
    #[error("Unknown field: {field}")]
    InvalidField { field: String },

    #[error("Ragged dataset: column {column} has {actual} rows, expected {expected}")]
    RaggedDataset {
        column: String,
        expected: usize,
        actual: usize,
    },

    // Geometry errors
    #[error("Invalid rectangle: ({x_min}, {x_max}) x ({y_min}, {y_max})")]
    InvalidRectangle {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("Invalid plot size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    // Cache errors
    #[error("Cache backend unavailable: {message}")]
    CacheUnavailable { message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for plot-interact operations
pub type PlotInteractResult<T> = Result<T, PlotInteractError>;
