//! Size bucketing for cached rasters
//!
//! Continuous client resizes would otherwise mint a fresh cache entry per pixel
//! of drag. Snapping each dimension onto a bounded geometric ladder keeps the
//! number of distinct cached sizes per key small; the host raster-scales the
//! bucketed image down (or up, below the floor) to the exact display size.

use plot_interact_shared::{CacheConfig, PlotInteractError, PlotInteractResult, PlotSize};

/// Monotonic discrete growth policy mapping requested sizes to buckets
#[derive(Debug, Clone, Copy)]
pub struct SizePolicy {
    floor: u32,
    ceiling: u32,
    ratio: f64,
}

impl SizePolicy {
    pub fn new(config: &CacheConfig) -> PlotInteractResult<Self> {
        config.validate()?;
        Ok(Self {
            floor: config.bucket_floor_px,
            ceiling: config.bucket_ceiling_px,
            ratio: config.growth_ratio,
        })
    }

    /// Canonicalize a requested size into its bucket.
    ///
    /// Each dimension maps independently to the smallest rung of the geometric
    /// ladder `floor * ratio^n` (rounded) that covers it, clamped to the
    /// configured ceiling. Rendering happens at the bucket resolution, which is
    /// never smaller than the request below the ceiling.
    pub fn bucket(&self, requested: PlotSize) -> PlotInteractResult<PlotSize> {
        if requested.width == 0 || requested.height == 0 {
            return Err(PlotInteractError::InvalidSize {
                width: requested.width,
                height: requested.height,
            });
        }
        Ok(PlotSize {
            width: self.bucket_dim(requested.width),
            height: self.bucket_dim(requested.height),
        })
    }

    fn bucket_dim(&self, px: u32) -> u32 {
        if px <= self.floor {
            return self.floor;
        }
        if px >= self.ceiling {
            return self.ceiling;
        }
        // Smallest n with floor * ratio^n >= px in exact arithmetic. Rounding
        // a rung up can make it cover a request the exact series misses (e.g.
        // a request equal to an already-bucketed size), so step back while the
        // previous rounded rung still covers `px`. This keeps every emitted
        // bucket a fixed point of the policy.
        let mut steps = ((px as f64 / self.floor as f64).ln() / self.ratio.ln()).ceil() as i32;
        while steps > 0 && self.rung(steps - 1) >= px {
            steps -= 1;
        }
        self.rung(steps).clamp(self.floor, self.ceiling)
    }

    fn rung(&self, steps: i32) -> u32 {
        (self.floor as f64 * self.ratio.powi(steps)).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(floor: u32, ceiling: u32, ratio: f64) -> SizePolicy {
        SizePolicy::new(&CacheConfig {
            capacity_entries: 64,
            bucket_floor_px: floor,
            bucket_ceiling_px: ceiling,
            growth_ratio: ratio,
        })
        .unwrap()
    }

    #[test]
    fn test_nearby_sizes_share_a_bucket() {
        // Floor 50, ratio 1.2: both 100x100 and 102x101 land on the same rung.
        let policy = policy(50, 4096, 1.2);
        let a = policy.bucket(PlotSize::new(100, 100).unwrap()).unwrap();
        let b = policy.bucket(PlotSize::new(102, 101).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bucket_covers_request() {
        let policy = policy(50, 4096, 1.25);
        for px in [51, 80, 123, 400, 999, 4000] {
            let bucket = policy.bucket(PlotSize::new(px, px).unwrap()).unwrap();
            assert!(bucket.width >= px, "bucket {} < request {}", bucket.width, px);
        }
    }

    #[test]
    fn test_monotonic() {
        let policy = policy(50, 4096, 1.25);
        let mut prev = 0;
        for px in 1..=4200 {
            let bucket = policy.bucket(PlotSize::new(px, 1).unwrap()).unwrap();
            assert!(bucket.width >= prev, "bucket shrank at {px}");
            prev = bucket.width;
        }
    }

    #[test]
    fn test_floor_and_ceiling() {
        let policy = policy(50, 800, 1.25);
        assert_eq!(
            policy.bucket(PlotSize::new(3, 7).unwrap()).unwrap(),
            PlotSize::new(50, 50).unwrap()
        );
        assert_eq!(
            policy.bucket(PlotSize::new(5000, 5000).unwrap()).unwrap(),
            PlotSize::new(800, 800).unwrap()
        );
    }

    #[test]
    fn test_dimensions_bucket_independently() {
        let policy = policy(50, 4096, 1.2);
        let bucket = policy.bucket(PlotSize::new(100, 700).unwrap()).unwrap();
        assert_ne!(bucket.width, bucket.height);
    }

    #[test]
    fn test_bounded_bucket_count() {
        let policy = policy(50, 4096, 1.25);
        let mut buckets = std::collections::HashSet::new();
        for px in 1..=4096 {
            buckets.insert(policy.bucket(PlotSize::new(px, 1).unwrap()).unwrap().width);
        }
        // ln(4096/50)/ln(1.25) is about 19.7, so about 21 rungs including both ends.
        assert!(buckets.len() <= 22, "too many buckets: {}", buckets.len());
    }

    #[test]
    fn test_bucket_is_fixed_point_of_itself() {
        // A bucketed size fed back through the policy must not climb another
        // rung. Floor 50, ratio 1.25 used to map 60 -> 63 but 63 -> 78.
        let policy = policy(50, 4096, 1.25);
        for px in 1..=4200 {
            let once = policy.bucket(PlotSize::new(px, 1).unwrap()).unwrap();
            let twice = policy.bucket(once).unwrap();
            assert_eq!(once, twice, "bucket moved for request {px}");
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        let policy = policy(50, 4096, 1.25);
        let err = policy
            .bucket(PlotSize {
                width: 0,
                height: 10,
            })
            .unwrap_err();
        assert!(matches!(err, PlotInteractError::InvalidSize { .. }));
    }
}
