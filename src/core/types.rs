use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Padding reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Trend chart policy: y labels on the left, rotated x labels below.
    #[must_use]
    pub const fn line_chart_default() -> Self {
        Self::new(80.0, 25.0, 25.0, 55.0)
    }

    fn sanitized(self) -> Self {
        let clean = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
        Self::new(
            clean(self.left),
            clean(self.top),
            clean(self.right),
            clean(self.bottom),
        )
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::line_chart_default()
    }
}

/// Plot area derived from a viewport and an inset policy.
///
/// Never stored by charts: recomputed on every relayout so viewport changes
/// are picked up without invalidation bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartBounds {
    #[must_use]
    pub fn from_viewport(viewport: Viewport, insets: Insets) -> Self {
        let insets = insets.sanitized();
        let width = (f64::from(viewport.width) - insets.left - insets.right).max(0.0);
        let height = (f64::from(viewport.height) - insets.top - insets.bottom).max(0.0);
        Self {
            origin_x: insets.left,
            origin_y: insets.top,
            width,
            height,
        }
    }

    /// Y coordinate of the zero baseline in viewport space.
    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.origin_y + self.height
    }

    #[must_use]
    pub fn right_x(self) -> f64 {
        self.origin_x + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartBounds, Insets, Viewport};

    #[test]
    fn bounds_subtract_insets_from_viewport() {
        let bounds = ChartBounds::from_viewport(Viewport::new(400, 250), Insets::default());
        assert_eq!(bounds.origin_x, 80.0);
        assert_eq!(bounds.origin_y, 25.0);
        assert_eq!(bounds.width, 295.0);
        assert_eq!(bounds.height, 170.0);
        assert_eq!(bounds.baseline_y(), 195.0);
    }

    #[test]
    fn bounds_never_go_negative_on_tiny_viewports() {
        let bounds = ChartBounds::from_viewport(Viewport::new(10, 10), Insets::default());
        assert_eq!(bounds.width, 0.0);
        assert_eq!(bounds.height, 0.0);
    }

    #[test]
    fn non_finite_insets_are_ignored() {
        let insets = Insets::new(f64::NAN, -4.0, f64::INFINITY, 10.0);
        let bounds = ChartBounds::from_viewport(Viewport::new(100, 100), insets);
        assert_eq!(bounds.origin_x, 0.0);
        assert_eq!(bounds.origin_y, 0.0);
        assert_eq!(bounds.width, 100.0);
        assert_eq!(bounds.height, 90.0);
    }
}
