//! Data-to-pixel mapping shared by the line and bar charts.
//!
//! All functions are pure; iterators borrow the series and can be cloned to
//! restart, so the same geometry can feed rendering and tests.

use serde::{Deserialize, Serialize};

/// Shared vertical (or bar-length) scale for every series drawn in one chart.
///
/// A non-positive or non-finite maximum is degenerate: every value maps to
/// the baseline instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    max: f64,
}

impl ValueScale {
    #[must_use]
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    /// Builds the scale from the maximum across all given series.
    #[must_use]
    pub fn from_series<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        Self::new(shared_max(series))
    }

    #[must_use]
    pub fn max(self) -> f64 {
        if self.is_degenerate() { 0.0 } else { self.max }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.max.is_finite() && self.max > 0.0)
    }

    /// Fraction of the maximum represented by `value`.
    ///
    /// Negative values yield negative ratios; callers decide how to draw them.
    #[must_use]
    pub fn ratio(self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        finite_or_zero(value) / self.max
    }
}

/// One projected line-chart point in plot-local pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedPoint {
    pub x: f64,
    pub y: f64,
}

/// One projected bar: `offset` along the stacking axis, `length` along the
/// value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarExtent {
    pub offset: f64,
    pub length: f64,
}

/// Largest finite value across all series, floored at zero.
#[must_use]
pub fn shared_max<'a, I>(series: I) -> f64
where
    I: IntoIterator<Item = &'a [f64]>,
{
    series
        .into_iter()
        .flat_map(|values| values.iter().copied())
        .filter(|value| value.is_finite())
        .fold(0.0, f64::max)
}

/// Horizontal position of point `index` out of `count` spread over `width`.
///
/// A single point (or none) sits at x = 0.
#[must_use]
pub fn x_for_index(index: usize, count: usize, width: f64) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let spacing = non_negative(width) / (count - 1) as f64;
    spacing * index as f64
}

/// Maps `series` into `width` x `height`, higher values nearer the top.
pub fn map_points(
    series: &[f64],
    width: f64,
    height: f64,
    scale: ValueScale,
) -> impl Iterator<Item = MappedPoint> + Clone + '_ {
    map_points_in_slots(series, series.len(), width, height, scale)
}

/// Like [`map_points`], but spaces points over `slots` x positions.
///
/// Co-rendered series pass the longest length so a shorter series keeps
/// its points under the matching labels instead of stretching.
pub fn map_points_in_slots(
    series: &[f64],
    slots: usize,
    width: f64,
    height: f64,
    scale: ValueScale,
) -> impl Iterator<Item = MappedPoint> + Clone + '_ {
    let count = slots.max(series.len());
    let width = non_negative(width);
    let height = non_negative(height);
    series
        .iter()
        .enumerate()
        .map(move |(index, value)| MappedPoint {
            x: x_for_index(index, count, width),
            y: height - scale.ratio(*value) * height,
        })
}

/// Maps `series` into bar extents, one row every `row_pitch` pixels.
pub fn map_bar_extents(
    series: &[f64],
    row_pitch: f64,
    available_length: f64,
    scale: ValueScale,
) -> impl Iterator<Item = BarExtent> + Clone + '_ {
    let row_pitch = non_negative(row_pitch);
    let available_length = non_negative(available_length);
    series
        .iter()
        .enumerate()
        .map(move |(index, value)| BarExtent {
            offset: row_pitch * index as f64,
            length: scale.ratio(*value) * available_length,
        })
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    finite_or_zero(value).max(0.0)
}
