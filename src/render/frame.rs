use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, PathPrimitive, Primitive, RectPrimitive, TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are kept in registration order, which is also paint order:
/// later primitives draw on top of earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub primitives: Vec<Primitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.push(Primitive::Line(line));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.push(Primitive::Rect(rect));
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.push(Primitive::Circle(circle));
    }

    pub fn push_path(&mut self, path: PathPrimitive) {
        self.push(Primitive::Path(path));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.push(Primitive::Text(text));
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.push_line(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.push_text(text);
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Path(path) => Some(path),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.ensure_valid()?;
        for primitive in &self.primitives {
            primitive.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::RenderFrame;
    use crate::core::Viewport;
    use crate::render::{Color, LinePrimitive, TextHAlign, TextPrimitive};

    #[test]
    fn keeps_registration_order() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let frame = RenderFrame::new(Viewport::new(100, 100))
            .with_text(TextPrimitive::new("a", 1.0, 1.0, 12.0, black, TextHAlign::Left))
            .with_line(LinePrimitive::new(0.0, 0.0, 10.0, 0.0, 1.0, black));

        assert!(matches!(frame.primitives[0], crate::render::Primitive::Text(_)));
        assert_eq!(frame.lines().count(), 1);
        assert_eq!(frame.texts().count(), 1);
        frame.validate().expect("valid frame");
    }

    #[test]
    fn invalid_viewport_fails_validation() {
        assert!(RenderFrame::new(Viewport::new(0, 10)).validate().is_err());
    }
}
