use std::f64::consts::PI;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::{AnimatedScalar, AnimationConfig, TimedScalar};
use crate::core::{Viewport, format_percentage};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LineCap, RenderFrame, Renderer, StrokeStyle, TextHAlign, TextPrimitive,
};

use super::validate_advance_delta;

pub const SAFE_GREEN: [u8; 3] = [76, 175, 80];
pub const WARNING_YELLOW: [u8; 3] = [255, 235, 59];
pub const DANGER_RED: [u8; 3] = [211, 47, 47];

/// How far the sweep steps back before re-animating, in percentage points.
const REANIMATE_STEP_BACK: f64 = 5.0;

/// Clamps to `[0, 100]`; non-finite input becomes 0.
#[must_use]
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Green -> yellow over `[0, 50]`, yellow -> red over `(50, 100]`, red above.
#[must_use]
pub fn severity_color(percentage: f64) -> Color {
    let percentage = if percentage.is_finite() { percentage.max(0.0) } else { 0.0 };
    let [red, green, blue] = if percentage <= 50.0 {
        lerp_rgb(SAFE_GREEN, WARNING_YELLOW, percentage / 50.0)
    } else if percentage <= 100.0 {
        lerp_rgb(WARNING_YELLOW, DANGER_RED, (percentage - 50.0) / 50.0)
    } else {
        DANGER_RED
    };
    Color::from_rgb8(red, green, blue)
}

fn lerp_rgb(from: [u8; 3], to: [u8; 3], factor: f64) -> [u8; 3] {
    let mut out = [0_u8; 3];
    for (channel, (start, end)) in out.iter_mut().zip(from.into_iter().zip(to)) {
        let start = f64::from(start);
        let end = f64::from(end);
        *channel = (start + (end - start) * factor).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Which value the centre label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DonutLabelPolicy {
    /// Rounded input, so overspending reads e.g. "150%".
    #[default]
    Raw,
    /// Rounded clamped value, matching the drawn sweep.
    Clamped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutChartProps {
    /// Budget usage; not clamped by the caller.
    pub percentage: f64,
    pub size: f64,
    pub stroke_width: f64,
    pub label: String,
    /// Sweep duration; `None` falls back to the style's animation config.
    pub duration_ms: Option<u64>,
}

impl DonutChartProps {
    #[must_use]
    pub fn new(percentage: f64, label: impl Into<String>) -> Self {
        Self {
            percentage,
            size: 200.0,
            stroke_width: 20.0,
            label: label.into(),
            duration_ms: None,
        }
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: f64, stroke_width: f64) -> Self {
        self.size = size;
        self.stroke_width = stroke_width;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ChartError::InvalidData(
                "donut size must be finite and > 0".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite()
            || self.stroke_width <= 0.0
            || self.stroke_width >= self.size
        {
            return Err(ChartError::InvalidData(
                "donut stroke width must be finite and in (0, size)".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutChartStyle {
    pub track_color: Color,
    pub text_color: Color,
    pub value_font_size_px: f64,
    pub label_font_size_px: f64,
    pub label_policy: DonutLabelPolicy,
    pub animation: AnimationConfig,
}

impl Default for DonutChartStyle {
    fn default() -> Self {
        Self {
            track_color: Color::rgb(1.0, 1.0, 1.0),
            text_color: Color::rgb(0.0, 0.0, 0.0),
            value_font_size_px: 24.0,
            label_font_size_px: 16.0,
            label_policy: DonutLabelPolicy::default(),
            animation: AnimationConfig::default(),
        }
    }
}

/// Ring metrics derived from the diameter and stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutGeometry {
    pub center: f64,
    pub radius: f64,
    pub circumference: f64,
}

impl DonutGeometry {
    #[must_use]
    pub fn new(size: f64, stroke_width: f64) -> Self {
        Self {
            center: size / 2.0,
            radius: (size - stroke_width) / 2.0,
            circumference: PI * (size - stroke_width),
        }
    }

    /// Dash offset hiding everything past `percentage` of the ring.
    #[must_use]
    pub fn dash_offset(self, percentage: f64) -> f64 {
        self.circumference * (1.0 - clamp_percentage(percentage) / 100.0)
    }

    #[must_use]
    pub fn arc_length(self, percentage: f64) -> f64 {
        self.circumference * clamp_percentage(percentage) / 100.0
    }
}

/// Budget-usage gauge re-animated on data refresh and on screen focus.
#[derive(Debug)]
pub struct DonutChart {
    props: DonutChartProps,
    style: DonutChartStyle,
    geometry: DonutGeometry,
    sweep: TimedScalar,
    mounted: bool,
}

impl DonutChart {
    pub fn new(props: DonutChartProps, style: DonutChartStyle) -> ChartResult<Self> {
        props.validate()?;
        let mut chart = Self {
            geometry: DonutGeometry::new(props.size, props.stroke_width),
            props,
            style,
            sweep: TimedScalar::new(0.0),
            mounted: true,
        };
        chart.animate();
        Ok(chart)
    }

    /// Observes every write to the animated sweep value.
    pub fn set_sweep_observer(&mut self, observer: impl FnMut(f64) + 'static) {
        self.sweep.set_observer(observer);
    }

    pub fn set_props(&mut self, props: DonutChartProps) -> ChartResult<()> {
        props.validate()?;
        let changed = props != self.props;
        self.geometry = DonutGeometry::new(props.size, props.stroke_width);
        self.props = props;
        if changed {
            self.animate();
        }
        Ok(())
    }

    pub fn set_percentage(&mut self, percentage: f64) {
        if percentage.to_bits() == self.props.percentage.to_bits() {
            return;
        }
        self.props.percentage = percentage;
        self.animate();
    }

    /// Host screen regained focus: replay the sweep.
    pub fn on_focus(&mut self) {
        self.animate();
    }

    /// Host screen lost focus: stop where the sweep is.
    pub fn on_blur(&mut self) {
        self.sweep.cancel();
    }

    /// Cancels the animation; the sweep value never changes afterwards.
    pub fn unmount(&mut self) {
        self.sweep.retire();
        self.mounted = false;
        trace!("donut chart unmounted");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn advance(&mut self, delta_seconds: f64) -> ChartResult<bool> {
        validate_advance_delta(delta_seconds)?;
        Ok(self.sweep.advance(delta_seconds))
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.sweep.is_animating()
    }

    #[must_use]
    pub fn props(&self) -> &DonutChartProps {
        &self.props
    }

    #[must_use]
    pub fn geometry(&self) -> DonutGeometry {
        self.geometry
    }

    /// Percentage used for geometry and color.
    #[must_use]
    pub fn clamped_percentage(&self) -> f64 {
        clamp_percentage(self.props.percentage)
    }

    /// Sweep percentage as currently animated.
    #[must_use]
    pub fn displayed_percentage(&self) -> f64 {
        self.sweep.current()
    }

    #[must_use]
    pub fn color(&self) -> Color {
        severity_color(self.clamped_percentage())
    }

    #[must_use]
    pub fn value_text(&self) -> String {
        match self.style.label_policy {
            DonutLabelPolicy::Raw => {
                let raw = if self.props.percentage.is_finite() { self.props.percentage } else { 0.0 };
                format_percentage(raw)
            }
            DonutLabelPolicy::Clamped => format_percentage(self.clamped_percentage()),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        let side = self.props.size.ceil() as u32;
        Viewport::new(side, side)
    }

    /// Builds the frame: track ring, value arc, value text, label text.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let geometry = self.geometry;
        let center = geometry.center;
        let mut frame = RenderFrame::new(self.viewport());

        frame.push_circle(CirclePrimitive::stroked(
            center,
            center,
            geometry.radius,
            StrokeStyle::solid(self.style.track_color, self.props.stroke_width),
        ));

        let arc = StrokeStyle::solid(self.color(), self.props.stroke_width)
            .with_dash(
                geometry.circumference,
                geometry.dash_offset(self.displayed_percentage()),
            )
            .with_cap(LineCap::Round);
        frame.push_circle(
            CirclePrimitive::stroked(center, center, geometry.radius, arc).with_rotation(-90.0),
        );

        frame.push_text(
            TextPrimitive::new(
                self.value_text(),
                center,
                center + self.style.value_font_size_px / 4.0,
                self.style.value_font_size_px,
                self.style.text_color,
                TextHAlign::Center,
            )
            .bold(),
        );
        if !self.props.label.is_empty() {
            frame.push_text(TextPrimitive::new(
                self.props.label.clone(),
                center,
                center + self.style.value_font_size_px / 4.0 + self.style.label_font_size_px * 1.25,
                self.style.label_font_size_px,
                self.style.text_color,
                TextHAlign::Center,
            ));
        }

        Ok(frame)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }

    /// Steps back slightly from the current sweep, then eases to the target.
    fn animate(&mut self) {
        if !self.mounted {
            return;
        }
        let target = self.clamped_percentage();
        let from = (self.sweep.current() - REANIMATE_STEP_BACK).max(0.0);
        self.sweep.jump_to(from);
        let duration = self
            .props
            .duration_ms
            .map_or_else(|| self.style.animation.duration(), Duration::from_millis);
        self.sweep.set(target, duration, self.style.animation.easing);
        debug!(from, target, "donut sweep animation started");
    }
}
