//! CPU-based RGB framebuffer
//!
//! Implements embedded-graphics `DrawTarget`, so every primitive and mono font
//! the canvas uses draws straight into it.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

/// CPU-based framebuffer in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Vec<Rgb888>,
    width: u32,
    height: u32,
}

impl Framebuffer {
    /// Create new framebuffer filled with white
    pub fn new(width: u32, height: u32) -> Self {
        let size = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            pixels: vec![Rgb888::WHITE; size],
            width,
            height,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixels, row-major
    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).ok()
        } else {
            None
        }
    }

    /// Set pixel at coordinates; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) {
        if let Some(slot) = self.index(x, y).and_then(|i| self.pixels.get_mut(i)) {
            *slot = color;
        }
    }

    /// Get pixel at coordinates
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.index(x, y).and_then(|i| self.pixels.get(i)).copied()
    }

    /// Fill entire framebuffer with color
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// Convert to softbuffer's `0x00RRGGBB` layout
    pub fn to_xrgb(&self) -> Vec<u32> {
        self.pixels.iter().map(|&c| to_xrgb(c)).collect()
    }
}

/// Pack a color as `0x00RRGGBB`
pub fn to_xrgb(color: Rgb888) -> u32 {
    (u32::from(color.r()) << 16) | (u32::from(color.g()) << 8) | u32::from(color.b())
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::{Point, Primitive};
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::Drawable;

    #[test]
    fn test_new_is_white() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 12);
        assert_eq!(fb.get_pixel(3, 2), Some(Rgb888::WHITE));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(4, 0, Rgb888::RED);
        assert_eq!(fb.get_pixel(4, 0), None);
        assert!(fb.pixels().iter().all(|&p| p == Rgb888::WHITE));
    }

    #[test]
    fn test_draw_target_clips_negative_coordinates() {
        let mut fb = Framebuffer::new(10, 10);
        let drawn = Rectangle::new(Point::new(-5, -5), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::BLUE))
            .draw(&mut fb);
        assert!(drawn.is_ok());
        assert_eq!(fb.get_pixel(0, 0), Some(Rgb888::BLUE));
        assert_eq!(fb.get_pixel(2, 2), Some(Rgb888::BLUE));
        assert_eq!(fb.get_pixel(3, 3), Some(Rgb888::WHITE));
    }

    #[test]
    fn test_xrgb_packing() {
        assert_eq!(to_xrgb(Rgb888::new(0x12, 0x34, 0x56)), 0x0012_3456);
    }
}
