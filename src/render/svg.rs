use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LineCap, PathCommand, PathPrimitive, Primitive, RenderFrame, Renderer,
    StrokeStyle, TextHAlign, TextPrimitive,
};

/// Serializes frames into standalone SVG documents.
///
/// The last document is kept so hosts (and tests) can hand it to an
/// `<img>`/WebView or write it to disk.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    font_family: Option<String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(&self, frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::with_capacity(256 + frame.primitives.len() * 96);
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}""#,
            w = frame.viewport.width,
            h = frame.viewport.height,
        )?;
        if let Some(family) = &self.font_family {
            write!(out, r#" font-family="{}""#, escape(family))?;
        }
        out.push('>');

        for primitive in &frame.primitives {
            match primitive {
                Primitive::Line(line) => write!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                    num(line.x1),
                    num(line.y1),
                    num(line.x2),
                    num(line.y2),
                    line.color.to_css(),
                    num(line.stroke_width),
                )?,
                Primitive::Rect(rect) => write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    num(rect.x),
                    num(rect.y),
                    num(rect.width),
                    num(rect.height),
                    rect.fill_color.to_css(),
                )?,
                Primitive::Circle(circle) => write_circle(&mut out, circle)?,
                Primitive::Path(path) => write_path(&mut out, path)?,
                Primitive::Text(text) => write_text(&mut out, text)?,
            }
        }

        out.push_str("</svg>");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = self
            .write_frame(frame)
            .map_err(|err| ChartError::Backend(format!("failed to write svg: {err}")))?;
        Ok(())
    }
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#,
        num(circle.cx),
        num(circle.cy),
        num(circle.radius),
        circle.fill.map_or_else(|| "none".to_owned(), Color::to_css),
    )?;
    if let Some(stroke) = circle.stroke {
        write_stroke(out, stroke)?;
    }
    if circle.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            num(circle.rotation_deg),
            num(circle.cx),
            num(circle.cy),
        )?;
    }
    out.push_str("/>");
    Ok(())
}

fn write_path(out: &mut String, path: &PathPrimitive) -> std::fmt::Result {
    out.push_str(r#"<path d=""#);
    for (index, command) in path.commands.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        match *command {
            PathCommand::MoveTo { x, y } => write!(out, "M{} {}", num(x), num(y))?,
            PathCommand::LineTo { x, y } => write!(out, "L{} {}", num(x), num(y))?,
        }
    }
    out.push_str(r#"" fill="none""#);
    write_stroke(out, path.stroke)?;
    out.push_str("/>");
    Ok(())
}

fn write_stroke(out: &mut String, stroke: StrokeStyle) -> std::fmt::Result {
    write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        stroke.color.to_css(),
        num(stroke.width),
    )?;
    if let Some(dash) = stroke.dash {
        write!(
            out,
            r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
            num(dash.length),
            num(dash.offset),
        )?;
    }
    if stroke.cap == LineCap::Round {
        out.push_str(r#" stroke-linecap="round""#);
    }
    Ok(())
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}""#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        text.color.to_css(),
    )?;
    if text.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    if text.rotation_deg != 0.0 {
        write!(
            out,
            r#" transform="rotate({} {} {})""#,
            num(text.rotation_deg),
            num(text.x),
            num(text.y),
        )?;
    }
    write!(out, ">{}</text>", escape(&text.text))
}

/// Compact number text: integers without a fraction, others with up to 3 decimals.
fn num(value: f64) -> String {
    let rounded = (value * 1_000.0).round() / 1_000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    if rounded == rounded.trunc() {
        format!("{rounded:.0}")
    } else {
        let text = format!("{rounded:.3}");
        text.trim_end_matches('0').to_owned()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
