//! Shared types for the plot-interact workspace
//!
//! This crate contains the types shared between the hit-testing and plot-cache
//! crates: data-space geometry, the column-major dataset, hit results,
//! configuration with documented defaults, and the common error enum.

pub mod config;
pub mod dataset;
pub mod errors;
pub mod geometry;
pub mod hit;

pub use config::{CacheConfig, HitTestConfig};
pub use dataset::Dataset;
pub use errors::{PlotInteractError, PlotInteractResult};
pub use geometry::{DataPoint, DataRect, PlotSize, RenderedPlot};
pub use hit::{HitResult, HitRow};
