//! Canvas port
//!
//! The drawing surface is an opaque capability. Each visual component owns one
//! or more pens; clearing a pen erases only what that pen drew, so a hand can
//! redraw itself without touching the face underneath.
//!
//! Drawing calls accumulate into a pending frame. Nothing becomes visible
//! until [`Canvas::commit_frame`] once auto-redraw has been disabled.

use core::fmt::{Debug, Display};
use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;

use crate::geometry::Vec2;

/// Handle to a canvas-side pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PenId(u32);

impl PenId {
    /// Wrap a backend-assigned pen number.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The backend-assigned pen number.
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Horizontal anchoring of written text relative to the pen position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the pen position.
    Left,
    /// Text is centered on the pen position.
    #[default]
    Center,
    /// Text ends at the pen position.
    Right,
}

/// Requested font. Backends pick the closest face they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    /// Nominal size in logical pixels.
    pub size: u16,
    /// Bold weight.
    pub bold: bool,
}

impl FontSpec {
    /// Regular weight at `size`.
    pub const fn regular(size: u16) -> Self {
        Self { size, bold: false }
    }

    /// Bold weight at `size`.
    pub const fn bold(size: u16) -> Self {
        Self { size, bold: true }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::regular(12)
    }
}

/// A 2-D drawing surface with pens, text and explicit frame commits.
///
/// Coordinates are logical: origin at the centre, y axis up.
pub trait Canvas {
    /// Backend error type.
    type Error: Debug + Display;

    /// Fill color behind everything.
    fn set_background(&mut self, color: Rgb888) -> Result<(), Self::Error>;

    /// Window or surface title.
    fn set_title(&mut self, title: &str) -> Result<(), Self::Error>;

    /// Stop presenting after every drawing call; frames appear only on commit.
    fn disable_auto_redraw(&mut self) -> Result<(), Self::Error>;

    /// Present everything drawn since the last commit.
    fn commit_frame(&mut self) -> Result<(), Self::Error>;

    /// Allocate a new pen. Pens start visible, black, width 1, at the origin.
    fn create_pen(&mut self) -> Result<PenId, Self::Error>;

    /// Move without drawing.
    fn move_to(&mut self, pen: PenId, to: Vec2) -> Result<(), Self::Error>;

    /// Draw a straight segment from the current position to `to`.
    fn line_to(&mut self, pen: PenId, to: Vec2) -> Result<(), Self::Error>;

    /// Write `text` at the pen position.
    fn write_text(
        &mut self,
        pen: PenId,
        text: &str,
        align: TextAlign,
        font: FontSpec,
    ) -> Result<(), Self::Error>;

    /// Erase everything this pen has drawn.
    fn clear(&mut self, pen: PenId) -> Result<(), Self::Error>;

    /// Color for subsequent strokes and text.
    fn set_color(&mut self, pen: PenId, color: Rgb888) -> Result<(), Self::Error>;

    /// Stroke width in logical pixels.
    fn set_line_width(&mut self, pen: PenId, width: f32) -> Result<(), Self::Error>;

    /// Hide the pen cursor itself (its drawings stay).
    fn hide(&mut self, pen: PenId) -> Result<(), Self::Error>;

    /// `false` once the user closed the surface.
    fn is_open(&self) -> bool {
        true
    }

    /// Suspend the caller for `duration`.
    ///
    /// The watch loop calls this with short slices and checks for stop
    /// requests in between. Windowed backends override it to keep servicing
    /// OS events.
    fn wait(&mut self, duration: Duration) -> Result<(), Self::Error> {
        std::thread::sleep(duration);
        Ok(())
    }
}
