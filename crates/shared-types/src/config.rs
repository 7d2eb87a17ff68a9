//! Configuration for hit-testing and plot caching
//!
//! Defaults here are the documented, recognized values; both structs are plain
//! serde data so hosts can load them from their own config layers.

use serde::{Deserialize, Serialize};

use crate::errors::{PlotInteractError, PlotInteractResult};

/// Configuration for hit-test behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitTestConfig {
    /// Radius of influence around the pointer, in logical pixels
    pub threshold_px: f64,
}

impl Default for HitTestConfig {
    fn default() -> Self {
        Self {
            threshold_px: 5.0, // typical mouse/finger precision
        }
    }
}

impl HitTestConfig {
    pub fn validate(&self) -> PlotInteractResult<()> {
        if !self.threshold_px.is_finite() || self.threshold_px <= 0.0 {
            return Err(PlotInteractError::InvalidConfig {
                message: format!(
                    "Invalid threshold_px: {}. Must be finite and positive",
                    self.threshold_px
                ),
            });
        }
        Ok(())
    }
}

/// Configuration for the plot cache's bucketing and eviction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Maximum number of (key, size-bucket) entries before LRU eviction
    pub capacity_entries: usize,
    /// Smallest bucket dimension; requests below this still render at the floor
    pub bucket_floor_px: u32,
    /// Largest bucket dimension; requests above this render at the ceiling
    pub bucket_ceiling_px: u32,
    /// Each bucket dimension is at least this factor times the previous bucket's
    pub growth_ratio: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity_entries: 64,
            bucket_floor_px: 50,
            bucket_ceiling_px: 4096,
            // ~20 buckets between floor and ceiling; bounds the per-key footprint
            // while keeping raster-rescale artifacts small.
            growth_ratio: 1.25,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> PlotInteractResult<()> {
        if self.capacity_entries == 0 {
            return Err(PlotInteractError::InvalidConfig {
                message: "Invalid capacity_entries: 0. Must be at least 1".to_string(),
            });
        }
        if self.bucket_floor_px == 0 {
            return Err(PlotInteractError::InvalidConfig {
                message: "Invalid bucket_floor_px: 0. Must be at least 1".to_string(),
            });
        }
        if self.bucket_ceiling_px < self.bucket_floor_px {
            return Err(PlotInteractError::InvalidConfig {
                message: format!(
                    "Invalid bucket_ceiling_px: {}. Must be >= bucket_floor_px ({})",
                    self.bucket_ceiling_px, self.bucket_floor_px
                ),
            });
        }
        if !self.growth_ratio.is_finite() || self.growth_ratio <= 1.0 {
            return Err(PlotInteractError::InvalidConfig {
                message: format!(
                    "Invalid growth_ratio: {}. Must be finite and greater than 1.0",
                    self.growth_ratio
                ),
            });
        }
        Ok(())
    }
}
