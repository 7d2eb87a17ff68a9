//! Point and brush hit-testing over a dataset
//!
//! Pure functions, no shared state: every call projects rows with the caller's
//! [`PlotTransform`] (point queries) or compares in data space directly (brush
//! queries) and builds a request-scoped [`HitResult`].

use plot_interact_shared::{
    DataPoint, DataRect, Dataset, HitResult, HitRow, HitTestConfig, PlotInteractResult,
};

use crate::transform::PlotTransform;

/// Options for [`nearest`]
#[derive(Debug, Clone, Copy)]
pub struct NearestOptions {
    /// Radius of influence around the query point, in device pixels
    pub threshold_px: f64,
    /// Return one entry per dataset row instead of only the matching subset
    pub all_rows: bool,
    /// Populate `distance_px` on every returned row (all-rows mode only)
    pub include_distance: bool,
}

impl Default for NearestOptions {
    fn default() -> Self {
        Self::from_config(&HitTestConfig::default())
    }
}

impl NearestOptions {
    pub fn from_config(config: &HitTestConfig) -> Self {
        Self {
            threshold_px: config.threshold_px,
            all_rows: false,
            include_distance: false,
        }
    }
}

/// Rows within `threshold_px` device pixels of `point`
///
/// With `all_rows` unset the result is the matching subset only, in original row
/// order; an empty dataset or no match yields an empty result, not an error. With
/// `all_rows` set the result has one entry per row and `selected` marks matches;
/// `distance_px` is populated on every row iff `include_distance` is set.
///
/// Rows with non-finite coordinates never match.
pub fn nearest(
    dataset: &Dataset,
    point: DataPoint,
    x_field: &str,
    y_field: &str,
    transform: &PlotTransform,
    options: NearestOptions,
) -> PlotInteractResult<HitResult> {
    let xs = dataset.column(x_field)?;
    let ys = dataset.column(y_field)?;

    let threshold_sq = options.threshold_px * options.threshold_px;
    let mut rows = Vec::with_capacity(if options.all_rows { xs.len() } else { 0 });

    for (idx, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        let finite = x.is_finite() && y.is_finite();
        let d2 = if finite {
            Some(transform.pixel_distance_sq(DataPoint::new(x, y), point))
        } else {
            None
        };
        let selected = d2.is_some_and(|d2| d2 <= threshold_sq);

        if options.all_rows {
            rows.push(HitRow {
                index: idx,
                x,
                y,
                selected,
                distance_px: if options.include_distance {
                    d2.map(f64::sqrt)
                } else {
                    None
                },
            });
        } else if selected {
            rows.push(HitRow {
                index: idx,
                x,
                y,
                selected: true,
                distance_px: d2.map(f64::sqrt),
            });
        }
    }

    log::debug!(
        "[HitTest] nearest: {} of {} rows within {:.1}px",
        rows.iter().filter(|r| r.selected).count(),
        dataset.row_count(),
        options.threshold_px
    );

    Ok(HitResult { rows })
}

/// The single closest matching row, if any
///
/// The shape a hover tooltip needs: closest-by-pixel-distance wins, earlier row
/// wins ties.
pub fn nearest_single(
    dataset: &Dataset,
    point: DataPoint,
    x_field: &str,
    y_field: &str,
    transform: &PlotTransform,
    threshold_px: f64,
) -> PlotInteractResult<Option<HitRow>> {
    let xs = dataset.column(x_field)?;
    let ys = dataset.column(y_field)?;

    let threshold_sq = threshold_px * threshold_px;
    let mut best: Option<(usize, f64)> = None;

    for (idx, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let d2 = transform.pixel_distance_sq(DataPoint::new(x, y), point);
        if d2 <= threshold_sq {
            match best {
                Some((_, best_d2)) if d2 >= best_d2 => {}
                _ => best = Some((idx, d2)),
            }
        }
    }

    Ok(best.map(|(idx, d2)| HitRow {
        index: idx,
        x: xs[idx],
        y: ys[idx],
        selected: true,
        distance_px: Some(d2.sqrt()),
    }))
}

/// Rows inside `rect`, edges inclusive
///
/// Brush selections arrive as axis-aligned data-space rectangles, so containment
/// is checked in data coordinates directly; no pixel transform is involved.
pub fn within(
    dataset: &Dataset,
    rect: DataRect,
    x_field: &str,
    y_field: &str,
    all_rows: bool,
) -> PlotInteractResult<HitResult> {
    let xs = dataset.column(x_field)?;
    let ys = dataset.column(y_field)?;

    let mut rows = Vec::with_capacity(if all_rows { xs.len() } else { 0 });

    for (idx, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
        let selected = x.is_finite() && y.is_finite() && rect.contains(x, y);
        if all_rows {
            rows.push(HitRow {
                index: idx,
                x,
                y,
                selected,
                distance_px: None,
            });
        } else if selected {
            rows.push(HitRow {
                index: idx,
                x,
                y,
                selected: true,
                distance_px: None,
            });
        }
    }

    log::debug!(
        "[HitTest] within: {} of {} rows in brush",
        rows.iter().filter(|r| r.selected).count(),
        dataset.row_count()
    );

    Ok(HitResult { rows })
}
