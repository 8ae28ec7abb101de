//! Dial: ring, tick marks and the twelve numerals.

use heapless::Vec;

use crate::canvas::{Canvas, FontSpec, PenId, TextAlign};
use crate::config::{DIGIT_SIZE_RATIO, RING_SCALE, RING_SEGMENTS};
use crate::geometry::{Angle, Vec2};
use crate::theme::Theme;

/// One numeral on the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Digit {
    /// 1..=12
    pub value: u8,
    /// Centre of the numeral.
    pub position: Vec2,
    /// Glyph size in logical pixels.
    pub size: f32,
}

impl Digit {
    /// Clockwise angle of this numeral from 12 o'clock.
    pub fn angle(&self) -> Angle {
        Angle::from_degrees(f32::from(self.value) * 30.0)
    }
}

/// Static dial drawn once at setup.
#[derive(Debug, Clone)]
pub struct ClockFace {
    radius: f32,
    center: Vec2,
    digits: Vec<Digit, 12>,
    pen: Option<PenId>,
}

impl ClockFace {
    /// Dial of `radius` around `center`. Call [`ClockFace::setup`] before drawing.
    pub fn new(radius: f32, center: Vec2) -> Self {
        Self {
            radius,
            center,
            digits: Vec::new(),
            pen: None,
        }
    }

    /// Place the twelve numerals, 12 at the top, 30° apart.
    ///
    /// Calling again produces the same layout.
    pub fn setup(&mut self) {
        self.digits.clear();
        for value in 1..=12u8 {
            let angle = Angle::from_degrees(f32::from(value) * 30.0);
            let digit = Digit {
                value,
                position: self.center.polar(self.radius, angle),
                size: self.radius * DIGIT_SIZE_RATIO,
            };
            self.digits.push(digit).ok();
        }
    }

    /// Numerals placed by the last [`ClockFace::setup`].
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// Numeral radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Dial centre.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Radius of the outer ring.
    pub fn ring_radius(&self) -> f32 {
        self.radius * RING_SCALE
    }

    /// Draw ring, tick marks and numerals. Does not commit.
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C, theme: &Theme) -> Result<(), C::Error> {
        let pen = match self.pen {
            Some(pen) => pen,
            None => {
                let pen = canvas.create_pen()?;
                canvas.hide(pen)?;
                self.pen = Some(pen);
                pen
            }
        };

        canvas.clear(pen)?;
        canvas.set_color(pen, theme.face)?;
        canvas.set_line_width(pen, 3.0)?;

        let ring = self.ring_radius();
        canvas.move_to(pen, self.center.polar(ring, Angle::ZERO))?;
        let step = 360.0 / f32::from(RING_SEGMENTS);
        for i in 1..=RING_SEGMENTS {
            let angle = Angle::from_degrees(f32::from(i) * step);
            canvas.line_to(pen, self.center.polar(ring, angle))?;
        }

        // Minute ticks between the numerals and the ring; longer at the hours
        for minute in 0..60u8 {
            let angle = Angle::from_degrees(f32::from(minute) * 6.0);
            let inner = if minute % 5 == 0 { 0.92 } else { 0.96 };
            canvas.set_line_width(pen, if minute % 5 == 0 { 2.0 } else { 1.0 })?;
            canvas.move_to(pen, self.center.polar(ring * inner, angle))?;
            canvas.line_to(pen, self.center.polar(ring, angle))?;
        }

        canvas.set_color(pen, theme.digit)?;
        for digit in &self.digits {
            let size = digit_font_size(digit.size);
            canvas.move_to(pen, digit.position)?;
            let numeral = digit.value.to_string();
            canvas.write_text(pen, &numeral, TextAlign::Center, FontSpec::bold(size))?;
        }

        tracing::debug!(radius = self.radius, digits = self.digits.len(), "dial drawn");
        Ok(())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn digit_font_size(size: f32) -> u16 {
    size.round().clamp(1.0, f32::from(u16::MAX)) as u16
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_places_twelve_digits() {
        let mut face = ClockFace::new(100.0, Vec2::ZERO);
        assert!(face.digits().is_empty());
        face.setup();
        assert_eq!(face.digits().len(), 12);
        let values: std::vec::Vec<u8> = face.digits().iter().map(|d| d.value).collect();
        assert_eq!(values, (1..=12).collect::<std::vec::Vec<u8>>());
    }

    #[test]
    fn test_twelve_is_at_the_top() {
        let mut face = ClockFace::new(100.0, Vec2::new(5.0, 5.0));
        face.setup();
        let twelve = face.digits()[11];
        assert!((twelve.position.x - 5.0).abs() < 1e-3);
        assert!((twelve.position.y - 105.0).abs() < 1e-3);
        let three = face.digits()[2];
        assert!((three.position.x - 105.0).abs() < 1e-3);
        assert!((three.position.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_digit_font_size_clamps() {
        assert_eq!(digit_font_size(20.4), 20);
        assert_eq!(digit_font_size(0.1), 1);
    }
}
