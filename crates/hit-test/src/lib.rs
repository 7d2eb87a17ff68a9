//! Hit-testing for interactive plots
//!
//! Answers "which rows did this click or brush land on" for a host framework
//! that owns the actual plotting. The host supplies the same data-to-pixel
//! transform it rendered with; point queries compare pixel distances against a
//! threshold, brush queries test closed-interval containment in data space.

pub mod tester;
pub mod transform;

pub use tester::{nearest, nearest_single, within, NearestOptions};
pub use transform::PlotTransform;
