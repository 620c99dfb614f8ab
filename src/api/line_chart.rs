use tracing::{debug, trace};

use crate::animation::{AnimatedScalar, AnimationConfig, TimedScalar};
use crate::core::{
    ChartBounds, Insets, LabelStyle, MappedPoint, NumberFormat, ValueScale, Viewport, XLabel,
    YTick, line_x_labels, map_points_in_slots, y_axis_ticks,
};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RenderFrame, Renderer, StrokeStyle,
    TextHAlign, TextPrimitive,
};

use super::validate_advance_delta;

/// One series of a multi-line chart together with its stroke color.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub values: Vec<f64>,
    pub color: Color,
}

impl Dataset {
    #[must_use]
    pub fn new(values: Vec<f64>, color: Color) -> Self {
        Self { values, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartProps {
    pub datasets: Vec<Dataset>,
    pub labels: Vec<String>,
    pub viewport: Viewport,
    pub label_color: Color,
    pub number_format: NumberFormat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineChartStyle {
    pub insets: Insets,
    pub line_width: f64,
    pub axis_width: f64,
    pub marker_radius: f64,
    pub y_divisions: usize,
    pub label_style: LabelStyle,
    /// Distance from the baseline down to the x label anchor.
    pub x_label_gap: f64,
    /// Distance from the y axis left to the tick label anchor.
    pub y_label_gap: f64,
    pub animation: AnimationConfig,
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            insets: Insets::line_chart_default(),
            line_width: 2.0,
            axis_width: 1.0,
            marker_radius: 4.0,
            y_divisions: crate::core::axis::DEFAULT_Y_DIVISIONS,
            label_style: LabelStyle::default(),
            x_label_gap: 25.0,
            y_label_gap: 5.0,
            animation: AnimationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LineLayout {
    bounds: ChartBounds,
    scale: ValueScale,
    /// Per dataset, points already offset into viewport space.
    points: Vec<Vec<MappedPoint>>,
    y_ticks: Vec<YTick>,
    x_labels: Vec<XLabel>,
}

impl LineLayout {
    fn compute(props: &LineChartProps, style: &LineChartStyle) -> Self {
        let bounds = ChartBounds::from_viewport(props.viewport, style.insets);
        let scale = ValueScale::from_series(props.datasets.iter().map(|d| d.values.as_slice()));

        let point_count = props
            .datasets
            .iter()
            .map(|dataset| dataset.values.len())
            .max()
            .unwrap_or(0);

        let points: Vec<Vec<MappedPoint>> = props
            .datasets
            .iter()
            .map(|dataset| {
                map_points_in_slots(&dataset.values, point_count, bounds.width, bounds.height, scale)
                    .map(|point| MappedPoint {
                        x: bounds.origin_x + point.x,
                        y: bounds.origin_y + point.y,
                    })
                    .collect()
            })
            .collect();

        Self {
            bounds,
            scale,
            points,
            y_ticks: y_axis_ticks(scale, style.y_divisions, bounds.height).into_vec(),
            x_labels: line_x_labels(&props.labels, point_count, bounds.width, style.label_style),
        }
    }
}

/// Multi-series trend chart with animated stroke reveal and point markers.
#[derive(Debug)]
pub struct LineChart {
    props: LineChartProps,
    style: LineChartStyle,
    layout: LineLayout,
    path_progress: Vec<TimedScalar>,
    marker_scale: Vec<Vec<TimedScalar>>,
    mounted: bool,
}

impl LineChart {
    /// Lays out the chart and starts the entrance animation.
    pub fn new(props: LineChartProps, style: LineChartStyle) -> ChartResult<Self> {
        props.viewport.ensure_valid()?;
        let layout = LineLayout::compute(&props, &style);
        let mut chart = Self {
            props,
            style,
            layout,
            path_progress: Vec::new(),
            marker_scale: Vec::new(),
            mounted: true,
        };
        chart.restart_animation();
        Ok(chart)
    }

    /// Replaces all props; animations restart only when dataset values change.
    pub fn set_props(&mut self, props: LineChartProps) -> ChartResult<()> {
        props.viewport.ensure_valid()?;
        let values_changed = !same_values(&self.props.datasets, &props.datasets);
        self.props = props;
        self.relayout();
        if values_changed {
            self.restart_animation();
        }
        Ok(())
    }

    /// Replaces only the datasets (the common refresh path).
    pub fn set_datasets(&mut self, datasets: Vec<Dataset>, labels: Vec<String>) {
        let values_changed = !same_values(&self.props.datasets, &datasets);
        self.props.datasets = datasets;
        self.props.labels = labels;
        self.relayout();
        if values_changed {
            self.restart_animation();
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.props.viewport = viewport.ensure_valid()?;
        self.relayout();
        Ok(())
    }

    /// Advances every animated element; returns `true` while any is running.
    pub fn advance(&mut self, delta_seconds: f64) -> ChartResult<bool> {
        validate_advance_delta(delta_seconds)?;
        let mut running = false;
        for scalar in self
            .path_progress
            .iter_mut()
            .chain(self.marker_scale.iter_mut().flatten())
        {
            running |= scalar.advance(delta_seconds);
        }
        Ok(running)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.path_progress
            .iter()
            .chain(self.marker_scale.iter().flatten())
            .any(AnimatedScalar::is_animating)
    }

    /// Cancels all animations; the chart keeps its last drawn state.
    pub fn unmount(&mut self) {
        for scalar in self
            .path_progress
            .iter_mut()
            .chain(self.marker_scale.iter_mut().flatten())
        {
            scalar.retire();
        }
        self.mounted = false;
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn props(&self) -> &LineChartProps {
        &self.props
    }

    #[must_use]
    pub fn value_scale(&self) -> ValueScale {
        self.layout.scale
    }

    #[must_use]
    pub fn bounds(&self) -> ChartBounds {
        self.layout.bounds
    }

    /// Viewport-space points of one dataset; empty for unknown indices.
    #[must_use]
    pub fn points(&self, dataset_index: usize) -> &[MappedPoint] {
        self.layout
            .points
            .get(dataset_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn y_ticks(&self) -> &[YTick] {
        &self.layout.y_ticks
    }

    #[must_use]
    pub fn x_labels(&self) -> &[XLabel] {
        &self.layout.x_labels
    }

    /// Builds the frame: axes, series paths, x labels, y labels, markers.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let layout = &self.layout;
        let bounds = layout.bounds;
        let style = &self.style;
        let label_color = self.props.label_color;
        let mut frame = RenderFrame::new(self.props.viewport);

        frame.push_line(LinePrimitive::new(
            bounds.origin_x,
            bounds.baseline_y(),
            bounds.right_x(),
            bounds.baseline_y(),
            style.axis_width,
            label_color,
        ));
        frame.push_line(LinePrimitive::new(
            bounds.origin_x,
            bounds.baseline_y(),
            bounds.origin_x,
            bounds.origin_y,
            style.axis_width,
            label_color,
        ));

        for (index, (dataset, points)) in self.props.datasets.iter().zip(&layout.points).enumerate() {
            if points.is_empty() {
                continue;
            }
            let stroke = StrokeStyle::solid(dataset.color, style.line_width);
            let mut path = PathPrimitive::polyline(points.iter().map(|p| (p.x, p.y)), stroke);
            let length = path.length();
            if length > 0.0 {
                let progress = self.path_progress.get(index).map_or(1.0, AnimatedScalar::current);
                path.stroke = stroke.with_dash(length, length * (1.0 - progress.clamp(0.0, 1.0)));
            }
            frame.push_path(path);
        }

        let font_size = style.label_style.font_size_px;
        for label in layout.x_labels.iter().filter(|label| !label.text.is_empty()) {
            frame.push_text(
                TextPrimitive::new(
                    label.text.clone(),
                    bounds.origin_x + label.x,
                    bounds.baseline_y() + style.x_label_gap,
                    font_size,
                    label_color,
                    TextHAlign::Center,
                )
                .with_rotation(label.rotation_deg),
            );
        }

        for tick in &layout.y_ticks {
            frame.push_text(TextPrimitive::new(
                self.props.number_format.format(tick.value),
                bounds.origin_x - style.y_label_gap,
                bounds.origin_y + tick.offset,
                font_size,
                label_color,
                TextHAlign::Right,
            ));
        }

        for (dataset_index, (dataset, points)) in
            self.props.datasets.iter().zip(&layout.points).enumerate()
        {
            for (point_index, point) in points.iter().enumerate() {
                let scale = self
                    .marker_scale
                    .get(dataset_index)
                    .and_then(|markers| markers.get(point_index))
                    .map_or(1.0, AnimatedScalar::current);
                frame.push_circle(CirclePrimitive::filled(
                    point.x,
                    point.y,
                    style.marker_radius * scale.max(0.0),
                    dataset.color,
                ));
            }
        }

        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    fn relayout(&mut self) {
        self.layout = LineLayout::compute(&self.props, &self.style);
        trace!(
            datasets = self.props.datasets.len(),
            max = self.layout.scale.max(),
            "line chart relayout"
        );
    }

    /// Resets every path/marker scalar to zero and drives it to one.
    fn restart_animation(&mut self) {
        if !self.mounted {
            return;
        }
        for scalar in self
            .path_progress
            .iter_mut()
            .chain(self.marker_scale.iter_mut().flatten())
        {
            scalar.retire();
        }

        let duration = self.style.animation.duration();
        let easing = self.style.animation.easing;
        let start = |mut scalar: TimedScalar| {
            scalar.set(1.0, duration, easing);
            scalar
        };

        self.path_progress = self
            .layout
            .points
            .iter()
            .map(|_| start(TimedScalar::new(0.0)))
            .collect();
        self.marker_scale = self
            .layout
            .points
            .iter()
            .map(|points| points.iter().map(|_| start(TimedScalar::new(0.0))).collect())
            .collect();

        debug!(
            datasets = self.path_progress.len(),
            duration_ms = self.style.animation.duration_ms,
            "line chart animation restarted"
        );
    }
}

fn same_values(left: &[Dataset], right: &[Dataset]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|(a, b)| {
            a.values.len() == b.values.len()
                && a
                    .values
                    .iter()
                    .zip(&b.values)
                    .all(|(x, y)| x.to_bits() == y.to_bits())
        })
}
