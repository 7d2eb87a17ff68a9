//! Data-space geometry and raster types shared between the hit-testing and
//! caching crates.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::{PlotInteractError, PlotInteractResult};

/// A point in data coordinates, created per input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in data coordinates
///
/// Invariant: `x_min <= x_max` and `y_min <= y_max`. Construct via [`DataRect::new`],
/// which rejects malformed extents; event parsing in the host framework is expected
/// to normalize edge ordering before calling in. No `Deserialize`: decoded event
/// data has to come through the validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataRect {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl DataRect {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> PlotInteractResult<Self> {
        if !(x_min <= x_max && y_min <= y_max) {
            return Err(PlotInteractError::InvalidRectangle {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Closed-interval containment: points exactly on an edge are inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Raster dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotSize {
    pub width: u32,
    pub height: u32,
}

impl PlotSize {
    pub fn new(width: u32, height: u32) -> PlotInteractResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlotInteractError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }
}

impl std::fmt::Display for PlotSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An opaque rendered raster at a known size
///
/// The pixel payload is whatever encoding the host's renderer produced (PNG bytes,
/// raw RGBA, ...); the cache never inspects it. `Bytes` keeps clones cheap when the
/// same entry is served to many requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPlot {
    pub size: PlotSize,
    pub pixels: Bytes,
}

impl RenderedPlot {
    pub fn new(size: PlotSize, pixels: impl Into<Bytes>) -> Self {
        Self {
            size,
            pixels: pixels.into(),
        }
    }

    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}
