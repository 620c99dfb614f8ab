use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LineCap, PathCommand, PathPrimitive, Primitive, RenderFrame, Renderer,
    StrokeStyle, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Extension for renderers that can draw into a host-owned Cairo context.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer, offscreen or on an external context.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for primitive in &frame.primitives {
            match primitive {
                Primitive::Line(line) => {
                    apply_color(context, line.color);
                    context.set_line_width(line.stroke_width);
                    context.set_dash(&[], 0.0);
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    stats.lines_drawn += 1;
                }
                Primitive::Rect(rect) => {
                    context.rectangle(rect.x, rect.y, rect.width, rect.height);
                    apply_color(context, rect.fill_color);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    stats.rects_drawn += 1;
                }
                Primitive::Circle(circle) => {
                    draw_circle(context, circle)?;
                    stats.circles_drawn += 1;
                }
                Primitive::Path(path) => {
                    draw_path(context, path)?;
                    stats.paths_drawn += 1;
                }
                Primitive::Text(text) => {
                    draw_text(context, text)?;
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_circle(context: &Context, circle: &CirclePrimitive) -> ChartResult<()> {
    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(circle.cx, circle.cy);
    context.rotate(circle.rotation_deg.to_radians());
    context.new_path();
    context.arc(0.0, 0.0, circle.radius, 0.0, TAU);

    if let Some(fill) = circle.fill {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
    }
    if let Some(stroke) = circle.stroke {
        apply_stroke(context, stroke);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke circle", err))?;
    }
    context.new_path();
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    context.new_path();
    for command in &path.commands {
        match *command {
            PathCommand::MoveTo { x, y } => context.move_to(x, y),
            PathCommand::LineTo { x, y } => context.line_to(x, y),
        }
    }
    apply_stroke(context, path.stroke);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke path", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    if text.bold {
        font_description.set_weight(pango::Weight::Bold);
    }
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(text.x, text.y);
    context.rotate(text.rotation_deg.to_radians());
    apply_color(context, text.color);
    // Frame y is the text baseline; Pango positions layouts by their top edge.
    context.move_to(dx, -f64::from(text_height));
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn apply_stroke(context: &Context, stroke: StrokeStyle) {
    apply_color(context, stroke.color);
    context.set_line_width(stroke.width);
    context.set_line_cap(match stroke.cap {
        LineCap::Butt => cairo::LineCap::Butt,
        LineCap::Round => cairo::LineCap::Round,
    });
    match stroke.dash {
        // Cairo treats a zero-length dash array entry as an error.
        Some(dash) if dash.length > 0.0 => context.set_dash(&[dash.length], dash.offset),
        _ => context.set_dash(&[], 0.0),
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
