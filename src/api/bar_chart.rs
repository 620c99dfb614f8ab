use tracing::{debug, trace};

use crate::animation::{AnimatedScalar, AnimationConfig, TimedScalar};
use crate::core::{
    NumberFormat, RowLabel, ValueScale, Viewport, bar_row_labels, map_bar_extents, shared_max,
};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::validate_advance_delta;

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartProps {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    /// Current viewport width; the height follows from the row count.
    pub viewport_width: u32,
    pub label_color: Color,
    pub bar_color: Color,
    pub number_format: NumberFormat,
}

/// Fixed row geometry of the category chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartStyle {
    pub row_height: f64,
    pub bar_thickness: f64,
    pub top_padding: f64,
    /// Extra height below the last row.
    pub bottom_padding: f64,
    /// Left edge of every bar; category labels live left of it.
    pub bar_origin_x: f64,
    /// Horizontal space kept free for value labels on the right.
    pub value_label_reserve: f64,
    pub label_margin: f64,
    /// Label baseline measured from the row top.
    pub label_baseline: f64,
    pub axis_overhang: f64,
    pub axis_width: f64,
    pub font_size_px: f64,
    pub label_max_chars: usize,
    pub animation: AnimationConfig,
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            bar_thickness: 30.0,
            top_padding: 30.0,
            bottom_padding: 80.0,
            bar_origin_x: 120.0,
            value_label_reserve: 80.0,
            label_margin: 15.0,
            label_baseline: 20.0,
            axis_overhang: 25.0,
            axis_width: 1.0,
            font_size_px: 12.0,
            label_max_chars: crate::core::axis::DEFAULT_LABEL_MAX_CHARS,
            animation: AnimationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BarLayout {
    rows: usize,
    scale: ValueScale,
    chart_width: f64,
    chart_height: f64,
    /// Target bar widths; negative values are drawn as empty bars.
    targets: Vec<f64>,
    row_offsets: Vec<f64>,
    labels: Vec<RowLabel>,
}

impl BarLayout {
    fn compute(props: &BarChartProps, style: &BarChartStyle) -> Self {
        let rows = props.values.len().min(props.labels.len());
        let values = &props.values[..rows];
        let scale = ValueScale::new(shared_max([values]));
        let chart_width = (f64::from(props.viewport_width) - style.value_label_reserve).max(0.0);
        let available = (chart_width - style.bar_origin_x).max(0.0);

        let (row_offsets, targets) = map_bar_extents(values, style.row_height, available, scale)
            .map(|extent| (extent.offset, extent.length.max(0.0)))
            .unzip();

        Self {
            rows,
            scale,
            chart_width,
            chart_height: style.row_height * rows as f64,
            targets,
            row_offsets,
            labels: bar_row_labels(&props.labels, rows, style.row_height, style.label_max_chars),
        }
    }
}

/// Horizontal category bars with left labels and right-aligned amounts.
#[derive(Debug)]
pub struct BarChart {
    props: BarChartProps,
    style: BarChartStyle,
    layout: BarLayout,
    widths: Vec<TimedScalar>,
    mounted: bool,
}

impl BarChart {
    pub fn new(props: BarChartProps, style: BarChartStyle) -> ChartResult<Self> {
        Viewport::new(props.viewport_width, 1).ensure_valid()?;
        let layout = BarLayout::compute(&props, &style);
        let mut chart = Self {
            props,
            style,
            layout,
            widths: Vec::new(),
            mounted: true,
        };
        chart.sync_animations(&[], None);
        Ok(chart)
    }

    pub fn set_props(&mut self, props: BarChartProps) -> ChartResult<()> {
        Viewport::new(props.viewport_width, 1).ensure_valid()?;
        let previous_values = std::mem::take(&mut self.props.values);
        let previous_max = self.layout.scale.max();
        self.props = props;
        self.relayout();
        self.sync_animations(&previous_values, Some(previous_max));
        Ok(())
    }

    pub fn set_data(&mut self, values: Vec<f64>, labels: Vec<String>) {
        let previous_values = std::mem::replace(&mut self.props.values, values);
        let previous_max = self.layout.scale.max();
        self.props.labels = labels;
        self.relayout();
        self.sync_animations(&previous_values, Some(previous_max));
    }

    /// Relayouts for a new viewport width (rotation, window resize).
    ///
    /// Bars glide from their current width to the new target without a reset.
    pub fn set_viewport_width(&mut self, width: u32) -> ChartResult<()> {
        Viewport::new(width, 1).ensure_valid()?;
        if width == self.props.viewport_width {
            return Ok(());
        }
        self.props.viewport_width = width;
        let values = self.props.values.clone();
        let max = self.layout.scale.max();
        self.relayout();
        self.sync_animations(&values, Some(max));
        Ok(())
    }

    pub fn advance(&mut self, delta_seconds: f64) -> ChartResult<bool> {
        validate_advance_delta(delta_seconds)?;
        let mut running = false;
        for width in &mut self.widths {
            running |= width.advance(delta_seconds);
        }
        Ok(running)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.widths.iter().any(AnimatedScalar::is_animating)
    }

    pub fn unmount(&mut self) {
        for width in &mut self.widths {
            width.retire();
        }
        self.mounted = false;
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn props(&self) -> &BarChartProps {
        &self.props
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.layout.rows
    }

    #[must_use]
    pub fn value_scale(&self) -> ValueScale {
        self.layout.scale
    }

    /// Widths bars settle at once animations finish.
    #[must_use]
    pub fn target_widths(&self) -> &[f64] {
        &self.layout.targets
    }

    /// Widths as currently animated.
    #[must_use]
    pub fn current_widths(&self) -> Vec<f64> {
        self.widths.iter().map(AnimatedScalar::current).collect()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.props.viewport_width,
            ((self.layout.chart_height + self.style.bottom_padding).ceil() as u32).max(1),
        )
    }

    /// Builds the frame: axes, row labels, then bars in series order.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let style = &self.style;
        let layout = &self.layout;
        let label_color = self.props.label_color;
        let mut frame = RenderFrame::new(self.viewport());
        let baseline = layout.chart_height + style.top_padding;

        frame.push_line(LinePrimitive::new(
            style.bar_origin_x,
            baseline,
            layout.chart_width + style.axis_overhang,
            baseline,
            style.axis_width,
            label_color,
        ));
        frame.push_line(LinePrimitive::new(
            style.bar_origin_x,
            baseline,
            style.bar_origin_x,
            style.top_padding,
            style.axis_width,
            label_color,
        ));

        let value_x = f64::from(self.props.viewport_width) - style.label_margin;
        for (label, value) in layout.labels.iter().zip(&self.props.values) {
            let y = style.top_padding + label.offset + style.label_baseline;
            if !label.text.is_empty() {
                frame.push_text(TextPrimitive::new(
                    label.text.clone(),
                    style.label_margin,
                    y,
                    style.font_size_px,
                    label_color,
                    TextHAlign::Left,
                ));
            }
            frame.push_text(TextPrimitive::new(
                self.props.number_format.format(*value),
                value_x,
                y,
                style.font_size_px,
                label_color,
                TextHAlign::Right,
            ));
        }

        for (offset, width) in layout.row_offsets.iter().zip(&self.widths) {
            frame.push_rect(RectPrimitive::new(
                style.bar_origin_x,
                style.top_padding + offset,
                width.current().max(0.0),
                style.bar_thickness,
                self.props.bar_color,
            ));
        }

        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    fn relayout(&mut self) {
        self.layout = BarLayout::compute(&self.props, &self.style);
        trace!(
            rows = self.layout.rows,
            max = self.layout.scale.max(),
            width = self.props.viewport_width,
            "bar chart relayout"
        );
    }

    /// Drives each bar towards its target width.
    ///
    /// Bars whose value (or the shared maximum) changed restart from zero;
    /// the others retarget from their current width.
    fn sync_animations(&mut self, previous_values: &[f64], previous_max: Option<f64>) {
        if !self.mounted {
            return;
        }
        let rows = self.layout.rows;
        for mut stale in self.widths.drain(rows.min(self.widths.len())..) {
            stale.retire();
        }
        while self.widths.len() < rows {
            self.widths.push(TimedScalar::new(0.0));
        }

        let max_changed = previous_max.is_none_or(|max| max.to_bits() != self.layout.scale.max().to_bits());
        let duration = self.style.animation.duration();
        let easing = self.style.animation.easing;
        let mut restarted = 0_usize;

        for (index, width) in self.widths.iter_mut().enumerate() {
            let value_changed = previous_values
                .get(index)
                .is_none_or(|previous| previous.to_bits() != self.props.values[index].to_bits());
            if max_changed || value_changed {
                width.jump_to(0.0);
                restarted += 1;
            }
            width.set(self.layout.targets[index], duration, easing);
        }

        debug!(rows, restarted, max_changed, "bar chart animations synced");
    }
}
