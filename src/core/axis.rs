use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::format::truncate_label;
use crate::core::mapper::{ValueScale, non_negative, x_for_index};

pub const DEFAULT_Y_DIVISIONS: usize = 4;
pub const DEFAULT_LABEL_MAX_CHARS: usize = 12;
pub const DEFAULT_X_LABEL_ROTATION_DEG: f64 = -30.0;

/// One y-axis tick: the value it represents and its offset from the plot top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YTick {
    pub value: f64,
    pub offset: f64,
}

/// Evenly spaced ticks over `[0, max]`, both ends included.
///
/// A degenerate scale yields a single zero tick on the baseline.
#[must_use]
pub fn y_axis_ticks(scale: ValueScale, divisions: usize, height: f64) -> SmallVec<[YTick; 8]> {
    let height = non_negative(height);
    if scale.is_degenerate() {
        return smallvec::smallvec![YTick {
            value: 0.0,
            offset: height,
        }];
    }

    let divisions = divisions.max(1);
    let value_step = scale.max() / divisions as f64;
    let pixel_step = height / divisions as f64;
    (0..=divisions)
        .map(|index| YTick {
            value: if index == divisions {
                scale.max()
            } else {
                value_step * index as f64
            },
            offset: height - pixel_step * index as f64,
        })
        .collect()
}

/// Sizing and truncation policy for category/x labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub font_size_px: f64,
    pub max_chars: usize,
    /// Rotation applied when labels do not fit their slot.
    pub rotation_deg: f64,
    /// Average glyph advance as a fraction of the font size.
    pub char_width_ratio: f64,
}

impl LabelStyle {
    fn estimated_width(self, text: &str) -> f64 {
        text.chars().count() as f64 * non_negative(self.font_size_px) * non_negative(self.char_width_ratio)
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            max_chars: DEFAULT_LABEL_MAX_CHARS,
            rotation_deg: DEFAULT_X_LABEL_ROTATION_DEG,
            char_width_ratio: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XLabel {
    pub text: String,
    /// Plot-local x of the point the label belongs to.
    pub x: f64,
    pub rotation_deg: f64,
}

/// Lays out one label under each of `point_count` points.
///
/// Only `min(labels, points)` labels are produced. All labels rotate together
/// when the widest one overflows the spacing between points.
#[must_use]
pub fn line_x_labels(
    labels: &[String],
    point_count: usize,
    width: f64,
    style: LabelStyle,
) -> Vec<XLabel> {
    let count = labels.len().min(point_count);
    if count == 0 {
        return Vec::new();
    }

    let truncated: SmallVec<[&str; 12]> = labels[..count]
        .iter()
        .map(|label| truncate_label(label, style.max_chars))
        .collect();

    let slot = if point_count > 1 {
        non_negative(width) / (point_count - 1) as f64
    } else {
        non_negative(width)
    };
    let widest = truncated
        .iter()
        .map(|text| style.estimated_width(text))
        .fold(0.0, f64::max);
    let rotation_deg = if widest > slot { style.rotation_deg } else { 0.0 };

    truncated
        .into_iter()
        .enumerate()
        .map(|(index, text)| XLabel {
            text: text.to_owned(),
            x: x_for_index(index, point_count, width),
            rotation_deg,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLabel {
    pub text: String,
    /// Offset of the row start along the stacking axis.
    pub offset: f64,
}

/// One truncated, left-aligned label per bar row.
#[must_use]
pub fn bar_row_labels(labels: &[String], rows: usize, row_pitch: f64, max_chars: usize) -> Vec<RowLabel> {
    let row_pitch = non_negative(row_pitch);
    labels
        .iter()
        .take(rows)
        .enumerate()
        .map(|(index, label)| RowLabel {
            text: truncate_label(label, max_chars).to_owned(),
            offset: row_pitch * index as f64,
        })
        .collect()
}
