//! Data-space to pixel-space transform
//!
//! The transform mirrors whatever projection the host used to draw the plot
//! (axis ranges, panel viewport, device pixel ratio). Hit-testing only needs the
//! forward direction: data coordinates to device pixels.

use plot_interact_shared::{DataPoint, PlotInteractError, PlotInteractResult, PlotSize};

const EPSILON_SMALL: f64 = 1e-12;

/// Affine data-to-pixel map for one plot panel
///
/// Screen y grows downward, so the y axis is flipped relative to data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    x_scale: f64,
    x_offset: f64,
    y_scale: f64,
    y_offset: f64,
}

impl PlotTransform {
    /// Build the transform from the rendered axis ranges and viewport.
    ///
    /// `x_range`/`y_range` are the data extents mapped onto the panel;
    /// `viewport` is the panel size in logical pixels; `device_pixel_ratio`
    /// scales logical pixels to device pixels (1.0 for standard displays).
    pub fn from_viewport(
        x_range: (f64, f64),
        y_range: (f64, f64),
        viewport: PlotSize,
        device_pixel_ratio: f64,
    ) -> PlotInteractResult<Self> {
        let x_span = x_range.1 - x_range.0;
        let y_span = y_range.1 - y_range.0;
        if x_span.abs() < EPSILON_SMALL || y_span.abs() < EPSILON_SMALL {
            return Err(PlotInteractError::InvalidConfig {
                message: format!(
                    "Degenerate axis range: x span {x_span}, y span {y_span}"
                ),
            });
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(PlotInteractError::InvalidConfig {
                message: format!("Invalid device_pixel_ratio: {device_pixel_ratio}"),
            });
        }

        let width = viewport.width as f64 * device_pixel_ratio;
        let height = viewport.height as f64 * device_pixel_ratio;

        let x_scale = width / x_span;
        let y_scale = -height / y_span; // flip: data y up, screen y down
        Ok(Self {
            x_scale,
            x_offset: -x_range.0 * x_scale,
            y_scale,
            y_offset: -y_range.1 * y_scale,
        })
    }

    /// Project a data-space point into device pixels.
    pub fn to_pixels(&self, point: DataPoint) -> (f64, f64) {
        (
            point.x * self.x_scale + self.x_offset,
            point.y * self.y_scale + self.y_offset,
        )
    }

    /// Squared pixel distance between two data-space points under this transform.
    pub fn pixel_distance_sq(&self, a: DataPoint, b: DataPoint) -> f64 {
        let (ax, ay) = self.to_pixels(a);
        let (bx, by) = self.to_pixels(b);
        let dx = ax - bx;
        let dy = ay - by;
        dx * dx + dy * dy
    }
}
