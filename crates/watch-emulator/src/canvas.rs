//! Display-list canvas
//!
//! Each pen keeps the strokes and text it has drawn since its last clear.
//! Rendering replays every display list over the background into the
//! framebuffer; presenting copies the framebuffer to the window, if any.
//! Nothing reaches the window between commits once auto-redraw is off.

use std::path::Path;
use std::time::Duration;

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_6X10, FONT_8X13, FONT_8X13_BOLD, FONT_9X18_BOLD,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{Point, Primitive};
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable;
use watch_core::{Canvas, FontSpec, PenId, TextAlign, Vec2};

use crate::config::EmulatorConfig;
use crate::error::EmulatorError;
use crate::framebuffer::Framebuffer;
use crate::window::Window;

/// Diameter of the visible pen cursor in pixels
const CURSOR_DIAMETER: u32 = 7;

#[derive(Debug, Clone)]
enum Item {
    Segment {
        from: Vec2,
        to: Vec2,
        color: Rgb888,
        width: f32,
    },
    Text {
        at: Vec2,
        text: String,
        align: TextAlign,
        font: FontSpec,
        color: Rgb888,
    },
}

#[derive(Debug, Clone)]
struct Pen {
    position: Vec2,
    color: Rgb888,
    width: f32,
    visible: bool,
    items: Vec<Item>,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            color: Rgb888::BLACK,
            width: 1.0,
            visible: true,
            items: Vec::new(),
        }
    }
}

/// [`Canvas`] backed by an RGB framebuffer and, optionally, a desktop window
pub struct EmulatorCanvas {
    framebuffer: Framebuffer,
    background: Rgb888,
    title: String,
    pens: Vec<Pen>,
    auto_redraw: bool,
    frames: u64,
    window: Option<Window>,
}

impl EmulatorCanvas {
    /// Framebuffer-only canvas for CI, tests and screenshots
    pub fn headless(config: &EmulatorConfig) -> Self {
        Self {
            framebuffer: Framebuffer::new(config.width, config.height),
            background: Rgb888::WHITE,
            title: String::new(),
            pens: Vec::new(),
            auto_redraw: true,
            frames: 0,
            window: None,
        }
    }

    /// Canvas presented in a desktop window
    pub fn windowed(config: &EmulatorConfig, title: &str) -> Result<Self, EmulatorError> {
        let window = Window::new(title, config)?;
        let mut canvas = Self::headless(config);
        canvas.title = title.to_owned();
        canvas.window = Some(window);
        Ok(canvas)
    }

    /// Pixels of the last rendered frame
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Frames presented so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Current title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// `true` when frames go to a window
    pub fn is_windowed(&self) -> bool {
        self.window.is_some()
    }

    /// Save the last rendered frame as PNG
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), EmulatorError> {
        let path = path.as_ref();
        let fb = &self.framebuffer;
        let img = image::RgbImage::from_fn(fb.width(), fb.height(), |x, y| {
            let c = fb.get_pixel(x, y).unwrap_or(Rgb888::BLACK);
            image::Rgb([c.r(), c.g(), c.b()])
        });
        img.save(path)
            .map_err(|e| EmulatorError::Screenshot(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "screenshot saved");
        Ok(())
    }

    /// Replay every display list into the framebuffer
    pub fn render(&mut self) {
        self.framebuffer.fill(self.background);
        let origin = Origin::of(&self.framebuffer);

        for pen in &self.pens {
            for item in &pen.items {
                draw_item(&mut self.framebuffer, origin, item);
            }
        }
        for pen in self.pens.iter().filter(|p| p.visible) {
            Circle::with_center(origin.to_point(pen.position), CURSOR_DIAMETER)
                .into_styled(PrimitiveStyle::with_fill(pen.color))
                .draw(&mut self.framebuffer)
                .unwrap_or_else(|never| match never {});
        }
    }

    fn present_frame(&mut self) -> Result<(), EmulatorError> {
        self.render();
        self.frames = self.frames.saturating_add(1);
        if let Some(window) = self.window.as_mut() {
            window.present(&self.framebuffer.to_xrgb())?;
        }
        Ok(())
    }

    fn after_draw(&mut self) -> Result<(), EmulatorError> {
        if self.auto_redraw {
            self.present_frame()
        } else {
            Ok(())
        }
    }

    fn pen_mut(&mut self, pen: PenId) -> Result<&mut Pen, EmulatorError> {
        usize::try_from(pen.index())
            .ok()
            .and_then(|i| self.pens.get_mut(i))
            .ok_or(EmulatorError::UnknownPen(pen.index()))
    }
}

/// Maps logical y-up coordinates onto framebuffer pixels
#[derive(Debug, Clone, Copy)]
struct Origin {
    cx: f32,
    cy: f32,
}

impl Origin {
    #[allow(clippy::cast_precision_loss)]
    fn of(fb: &Framebuffer) -> Self {
        Self {
            cx: fb.width() as f32 / 2.0,
            cy: fb.height() as f32 / 2.0,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn to_point(self, v: Vec2) -> Point {
        Point::new((self.cx + v.x).round() as i32, (self.cy - v.y).round() as i32)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke_width(width: f32) -> u32 {
    if width.is_finite() {
        width.round().clamp(1.0, 64.0) as u32
    } else {
        1
    }
}

/// Closest available face for the requested size and weight
fn pick_font(font: FontSpec) -> &'static MonoFont<'static> {
    match (font.size, font.bold) {
        (0..=10, _) => &FONT_6X10,
        (11..=14, false) => &FONT_8X13,
        (11..=14, true) => &FONT_8X13_BOLD,
        (15..=20, false) => &FONT_10X20,
        (15..=20, true) => &FONT_9X18_BOLD,
        _ => &profont::PROFONT_24_POINT,
    }
}

fn draw_item(fb: &mut Framebuffer, origin: Origin, item: &Item) {
    match item {
        Item::Segment {
            from,
            to,
            color,
            width,
        } => {
            Line::new(origin.to_point(*from), origin.to_point(*to))
                .into_styled(PrimitiveStyle::with_stroke(*color, stroke_width(*width)))
                .draw(fb)
                .unwrap_or_else(|never| match never {});
        }
        Item::Text {
            at,
            text,
            align,
            font,
            color,
        } => {
            let character_style = MonoTextStyle::new(pick_font(*font), *color);
            let alignment = match align {
                TextAlign::Left => Alignment::Left,
                TextAlign::Center => Alignment::Center,
                TextAlign::Right => Alignment::Right,
            };
            let text_style = TextStyleBuilder::new()
                .alignment(alignment)
                .baseline(Baseline::Middle)
                .build();
            Text::with_text_style(text, origin.to_point(*at), character_style, text_style)
                .draw(fb)
                .map(|_| ())
                .unwrap_or_else(|never| match never {});
        }
    }
}

impl Canvas for EmulatorCanvas {
    type Error = EmulatorError;

    fn set_background(&mut self, color: Rgb888) -> Result<(), Self::Error> {
        self.background = color;
        self.after_draw()
    }

    fn set_title(&mut self, title: &str) -> Result<(), Self::Error> {
        title.clone_into(&mut self.title);
        if let Some(window) = self.window.as_ref() {
            window.set_title(title);
        }
        Ok(())
    }

    fn disable_auto_redraw(&mut self) -> Result<(), Self::Error> {
        self.auto_redraw = false;
        Ok(())
    }

    fn commit_frame(&mut self) -> Result<(), Self::Error> {
        self.present_frame()?;
        tracing::debug!(frame = self.frames, "frame committed");
        Ok(())
    }

    fn create_pen(&mut self) -> Result<PenId, Self::Error> {
        let index = u32::try_from(self.pens.len())
            .map_err(|_| EmulatorError::UnknownPen(u32::MAX))?;
        self.pens.push(Pen::default());
        Ok(PenId::new(index))
    }

    fn move_to(&mut self, pen: PenId, to: Vec2) -> Result<(), Self::Error> {
        self.pen_mut(pen)?.position = to;
        Ok(())
    }

    fn line_to(&mut self, pen: PenId, to: Vec2) -> Result<(), Self::Error> {
        let state = self.pen_mut(pen)?;
        let segment = Item::Segment {
            from: state.position,
            to,
            color: state.color,
            width: state.width,
        };
        state.items.push(segment);
        state.position = to;
        self.after_draw()
    }

    fn write_text(
        &mut self,
        pen: PenId,
        text: &str,
        align: TextAlign,
        font: FontSpec,
    ) -> Result<(), Self::Error> {
        let state = self.pen_mut(pen)?;
        let item = Item::Text {
            at: state.position,
            text: text.to_owned(),
            align,
            font,
            color: state.color,
        };
        state.items.push(item);
        self.after_draw()
    }

    fn clear(&mut self, pen: PenId) -> Result<(), Self::Error> {
        self.pen_mut(pen)?.items.clear();
        self.after_draw()
    }

    fn set_color(&mut self, pen: PenId, color: Rgb888) -> Result<(), Self::Error> {
        self.pen_mut(pen)?.color = color;
        Ok(())
    }

    fn set_line_width(&mut self, pen: PenId, width: f32) -> Result<(), Self::Error> {
        self.pen_mut(pen)?.width = width;
        Ok(())
    }

    fn hide(&mut self, pen: PenId) -> Result<(), Self::Error> {
        self.pen_mut(pen)?.visible = false;
        self.after_draw()
    }

    fn is_open(&self) -> bool {
        self.window.as_ref().map_or(true, Window::is_open)
    }

    /// Sleep for `duration` while keeping the window responsive.
    ///
    /// In windowed mode the OS event loop is pumped every ~16 ms so the window
    /// stays draggable and closable. Headless canvases fall back to
    /// `std::thread::sleep`.
    fn wait(&mut self, duration: Duration) -> Result<(), Self::Error> {
        match self.window.as_mut() {
            Some(window) => window.pump_events(duration),
            None => std::thread::sleep(duration),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_centre_and_y_points_up() {
        let origin = Origin::of(&Framebuffer::new(100, 80));
        assert_eq!(origin.to_point(Vec2::ZERO), Point::new(50, 40));
        assert_eq!(origin.to_point(Vec2::new(10.0, 10.0)), Point::new(60, 30));
    }

    #[test]
    fn test_font_choice_by_size() {
        assert_eq!(pick_font(FontSpec::regular(8)).character_size.width, 6);
        assert_eq!(pick_font(FontSpec::bold(20)).character_size.width, 9);
        assert_eq!(pick_font(FontSpec::regular(18)).character_size.width, 10);
        assert!(pick_font(FontSpec::bold(36)).character_size.height > 20);
    }

    #[test]
    fn test_stroke_width_bounds() {
        assert_eq!(stroke_width(0.2), 1);
        assert_eq!(stroke_width(6.0), 6);
        assert_eq!(stroke_width(f32::NAN), 1);
    }
}
