pub mod axis;
pub mod format;
pub mod mapper;
pub mod types;

pub use axis::{LabelStyle, RowLabel, XLabel, YTick, bar_row_labels, line_x_labels, y_axis_ticks};
pub use format::{NumberFormat, NumberLocale, format_percentage, truncate_label};
pub use mapper::{BarExtent, MappedPoint, ValueScale, map_bar_extents, map_points, map_points_in_slots, shared_max, x_for_index};
pub use types::{ChartBounds, Insets, Viewport};
