use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses any CSS color string (`#75c2be`, `rgba(255, 99, 132, 1)`, `red`).
    pub fn parse_css(input: &str) -> ChartResult<Self> {
        let parsed = input
            .trim()
            .parse::<css_color_parser::Color>()
            .map_err(|_| ChartError::InvalidConfig(format!("invalid color `{input}`")))?;
        Ok(Self::rgba(
            f64::from(parsed.r) / 255.0,
            f64::from(parsed.g) / 255.0,
            f64::from(parsed.b) / 255.0,
            f64::from(parsed.a).clamp(0.0, 1.0),
        ))
    }

    /// Channels rounded to 8-bit values.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let to_byte = |channel: f64| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_byte(self.red), to_byte(self.green), to_byte(self.blue)]
    }

    /// CSS `rgb(...)` / `rgba(...)` notation.
    #[must_use]
    pub fn to_css(self) -> String {
        let [red, green, blue] = self.to_rgb8();
        if self.alpha >= 1.0 {
            format!("rgb({red}, {green}, {blue})")
        } else {
            format!("rgba({red}, {green}, {blue}, {})", self.alpha.clamp(0.0, 1.0))
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Single-length dash pattern, as used for stroke-reveal animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDash {
    pub length: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Option<StrokeDash>,
    pub cap: LineCap,
}

impl StrokeStyle {
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
            cap: LineCap::Butt,
        }
    }

    #[must_use]
    pub const fn with_dash(mut self, length: f64, offset: f64) -> Self {
        self.dash = Some(StrokeDash { length, offset });
        self
    }

    #[must_use]
    pub const fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(dash) = self.dash {
            if !dash.length.is_finite() || dash.length < 0.0 || !dash.offset.is_finite() {
                return Err(ChartError::InvalidData(
                    "stroke dash must be finite with length >= 0".to_owned(),
                ));
            }
        }
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        StrokeStyle::solid(self.color, self.stroke_width).validate()
    }
}

/// Filled axis-aligned rectangle. Zero width is valid (an empty bar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x, self.y, self.width, self.height], "rect geometry")?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Circle with optional fill and stroke.
///
/// `rotation_deg` rotates the stroke start around the centre; SVG circles
/// start their stroke at 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
    pub rotation_deg: f64,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn filled(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: Some(fill),
            stroke: None,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub const fn stroked(cx: f64, cy: f64, radius: f64, stroke: StrokeStyle) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: None,
            stroke: Some(stroke),
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub const fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.cx, self.cy, self.radius, self.rotation_deg], "circle geometry")?;
        if self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
}

impl PathCommand {
    #[must_use]
    pub const fn point(self) -> (f64, f64) {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => (x, y),
        }
    }
}

/// Stroked polyline built from straight segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: SmallVec<[PathCommand; 12]>,
    pub stroke: StrokeStyle,
}

impl PathPrimitive {
    /// Builds `M p0 L p1 L p2 ...` through `points`.
    #[must_use]
    pub fn polyline(points: impl IntoIterator<Item = (f64, f64)>, stroke: StrokeStyle) -> Self {
        let commands = points
            .into_iter()
            .enumerate()
            .map(|(index, (x, y))| {
                if index == 0 {
                    PathCommand::MoveTo { x, y }
                } else {
                    PathCommand::LineTo { x, y }
                }
            })
            .collect();
        Self { commands, stroke }
    }

    /// Total stroked length; `MoveTo` breaks do not count.
    #[must_use]
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        let mut previous: Option<(f64, f64)> = None;
        for command in &self.commands {
            let (x, y) = command.point();
            if let (PathCommand::LineTo { .. }, Some((px, py))) = (command, previous) {
                length += (x - px).hypot(y - py);
            }
            previous = Some((x, y));
        }
        length
    }

    pub fn validate(&self) -> ChartResult<()> {
        for command in &self.commands {
            let (x, y) = command.point();
            ensure_finite(&[x, y], "path coordinates")?;
        }
        self.stroke.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Rotation around `(x, y)`; negative values tilt text upwards.
    pub rotation_deg: f64,
    pub bold: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_deg: 0.0,
            bold: false,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y, self.rotation_deg], "text placement")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Any drawable element of a [`crate::render::RenderFrame`].
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Path(path) => path.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, PathPrimitive, RectPrimitive, StrokeStyle};

    #[test]
    fn parses_css_colors_used_by_the_dashboard() {
        let teal = Color::parse_css("#75c2be").expect("hex color");
        assert_eq!(teal.to_rgb8(), [0x75, 0xc2, 0xbe]);

        let expenses = Color::parse_css("rgba(255, 99, 132, 1)").expect("rgba color");
        assert_eq!(expenses.to_rgb8(), [255, 99, 132]);
        assert_eq!(expenses.alpha, 1.0);

        assert!(Color::parse_css("not-a-color").is_err());
    }

    #[test]
    fn css_output_round_trips_rgb8() {
        assert_eq!(Color::from_rgb8(76, 175, 80).to_css(), "rgb(76, 175, 80)");
    }

    #[test]
    fn path_length_sums_segments() {
        let stroke = StrokeStyle::solid(Color::rgb(0.0, 0.0, 0.0), 2.0);
        let path = PathPrimitive::polyline([(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)], stroke);
        assert!((path.length() - 11.0).abs() <= 1e-12);
        assert_eq!(PathPrimitive::polyline([], stroke).length(), 0.0);
    }

    #[test]
    fn zero_width_rect_is_valid_but_negative_is_not() {
        let color = Color::rgb(0.5, 0.5, 0.5);
        assert!(RectPrimitive::new(0.0, 0.0, 0.0, 30.0, color).validate().is_ok());
        assert!(RectPrimitive::new(0.0, 0.0, -1.0, 30.0, color).validate().is_err());
    }
}
