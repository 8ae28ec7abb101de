//! A single clock hand.

use embedded_graphics::pixelcolor::Rgb888;

use crate::canvas::{Canvas, PenId};
use crate::geometry::{Angle, Vec2};

/// A straight hand rotating about a pivot.
///
/// Each hand draws with its own pen so that redrawing erases only the
/// previous rendering of this hand.
#[derive(Debug, Clone)]
pub struct Hand {
    length: f32,
    width: f32,
    color: Rgb888,
    pivot: Vec2,
    angle: Angle,
    pen: Option<PenId>,
}

impl Hand {
    /// New hand pointing at 12.
    pub fn new(length: f32, width: f32, color: Rgb888, pivot: Vec2) -> Self {
        Self {
            length,
            width,
            color,
            pivot,
            angle: Angle::ZERO,
            pen: None,
        }
    }

    /// Point the hand at `angle` (degrees, normalized).
    pub fn update(&mut self, angle: impl Into<Angle>) {
        self.angle = angle.into();
    }

    /// Current angle.
    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// Length from pivot to tip.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Stroke color.
    pub fn color(&self) -> Rgb888 {
        self.color
    }

    /// Rotation centre.
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// The pen this hand draws with, once it has drawn.
    pub fn pen(&self) -> Option<PenId> {
        self.pen
    }

    /// End point of the hand at its current angle.
    pub fn tip(&self) -> Vec2 {
        self.pivot.polar(self.length, self.angle)
    }

    /// Erase the previous rendering and draw at the current angle.
    pub fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), C::Error> {
        let pen = match self.pen {
            Some(pen) => pen,
            None => {
                let pen = canvas.create_pen()?;
                canvas.set_color(pen, self.color)?;
                canvas.set_line_width(pen, self.width)?;
                canvas.hide(pen)?;
                self.pen = Some(pen);
                pen
            }
        };

        canvas.clear(pen)?;
        canvas.move_to(pen, self.pivot)?;
        canvas.line_to(pen, self.tip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_normalizes() {
        let mut hand = Hand::new(10.0, 1.0, Rgb888::new(0, 0, 0), Vec2::ZERO);
        hand.update(450.0);
        assert_eq!(hand.angle().degrees(), 90.0);
        hand.update(-90.0);
        assert_eq!(hand.angle().degrees(), 270.0);
        hand.update(f32::NAN);
        assert_eq!(hand.angle(), Angle::ZERO);
    }

    #[test]
    fn test_tip_follows_angle() {
        let mut hand = Hand::new(50.0, 2.0, Rgb888::new(255, 0, 0), Vec2::new(1.0, 1.0));
        assert!((hand.tip().y - 51.0).abs() < 1e-3);
        hand.update(Angle::from_degrees(90.0));
        assert!((hand.tip().x - 51.0).abs() < 1e-3);
        assert!((hand.tip().y - 1.0).abs() < 1e-3);
    }
}
