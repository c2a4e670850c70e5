use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::path::Path;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub bars_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Offscreen rendering goes through `Renderer::render` into an owned image
/// surface; GTK draw callbacks use `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    font_family: String,
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
            font_family: "DM Sans".to_owned(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the last offscreen frame as PNG.
    pub fn write_png(&self, path: &Path) -> ChartResult<()> {
        let mut file = std::fs::File::create(path).map_err(|err| {
            ChartError::InvalidData(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for line in &frame.lines {
            stroke_line(context, line)?;
            stats.lines_drawn += 1;
        }
        for bar in &frame.bars {
            draw_bar(context, bar)?;
            stats.bars_drawn += 1;
        }
        for text in &frame.texts {
            self.show_text(context, text);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }

    // Text is vertically centered on `text.y`.
    fn show_text(&self, context: &Context, text: &TextPrimitive) {
        let layout = pangocairo::functions::create_layout(context);
        let weight = if text.bold { " Bold" } else { "" };
        let font = FontDescription::from_string(&format!(
            "{}{weight} {}px",
            self.font_family, text.font_size_px
        ));
        layout.set_font_description(Some(&font));
        layout.set_text(&text.text);

        let (width, height) = layout.pixel_size();
        let width = f64::from(width);
        let left = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - width / 2.0,
            TextHAlign::Right => text.x - width,
        };
        apply_color(context, text.color);
        context.move_to(left, text.y - f64::from(height) / 2.0);
        pangocairo::functions::show_layout(context, &layout);
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

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_bar(context: &Context, bar: &RectPrimitive) -> ChartResult<()> {
    context.rectangle(bar.x, bar.y, bar.width, bar.height);
    apply_color(context, bar.fill_color);
    if bar.border_width <= 0.0 {
        return context
            .fill()
            .map_err(|err| map_backend_error("failed to fill bar", err));
    }
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill bar", err))?;
    apply_color(context, bar.border_color);
    context.set_line_width(bar.border_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to outline bar", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
