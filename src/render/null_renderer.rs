use crate::error::ChartResult;
use crate::render::{Primitive, RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so tests catch NaN geometry or empty
/// labels before a real backend sees them.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_circle_count: usize,
    pub last_path_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut counts = [0_usize; 5];
        for primitive in &frame.primitives {
            let slot = match primitive {
                Primitive::Line(_) => 0,
                Primitive::Rect(_) => 1,
                Primitive::Circle(_) => 2,
                Primitive::Path(_) => 3,
                Primitive::Text(_) => 4,
            };
            counts[slot] += 1;
        }
        [
            self.last_line_count,
            self.last_rect_count,
            self.last_circle_count,
            self.last_path_count,
            self.last_text_count,
        ] = counts;
        self.frames_rendered += 1;
        Ok(())
    }
}
