//! Angles and logical canvas coordinates.
//!
//! One convention for the whole workspace: origin at the canvas centre, y axis
//! up, angles in degrees measured clockwise from 12 o'clock.

use core::ops::{Add, Mul, Sub};

/// A hand or digit orientation in degrees, always normalized to `[0, 360)`.
///
/// # Examples
///
/// ```
/// use watch_core::Angle;
///
/// assert_eq!(Angle::from_degrees(370.0).degrees(), 10.0);
/// assert_eq!(Angle::from_degrees(-90.0).degrees(), 270.0);
/// assert_eq!(Angle::from_degrees(f32::NAN).degrees(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    /// 12 o'clock.
    pub const ZERO: Self = Self(0.0);

    /// Normalize any input into `[0, 360)`.
    ///
    /// Negative values wrap; non-finite values collapse to zero so that no
    /// caller input can make a hand undrawable.
    pub fn from_degrees(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return Self::ZERO;
        }
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        if wrapped >= 360.0 {
            Self::ZERO
        } else {
            Self(wrapped)
        }
    }

    /// Degrees in `[0, 360)`.
    pub fn degrees(self) -> f32 {
        self.0
    }

    /// Unit vector pointing along this angle in y-up coordinates.
    pub fn direction(self) -> Vec2 {
        let radians = self.0.to_radians();
        Vec2::new(radians.sin(), radians.cos())
    }
}

impl From<f32> for Angle {
    fn from(degrees: f32) -> Self {
        Self::from_degrees(degrees)
    }
}

/// A point (or offset) in logical canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal position, positive to the right.
    pub x: f32,
    /// Vertical position, positive upwards.
    pub y: f32,
}

impl Vec2 {
    /// The canvas centre.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point `distance` away from `self` along `angle`.
    pub fn polar(self, distance: f32, angle: Angle) -> Self {
        self + angle.direction() * distance
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f32 {
        let d = other - self;
        d.x.hypot(d.y)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_angle_wraps_full_turns() {
        assert_eq!(Angle::from_degrees(360.0), Angle::ZERO);
        assert_eq!(Angle::from_degrees(720.0 + 45.0).degrees(), 45.0);
    }

    #[test]
    fn test_angle_wraps_negative() {
        assert_eq!(Angle::from_degrees(-30.0).degrees(), 330.0);
        assert_eq!(Angle::from_degrees(-360.0), Angle::ZERO);
    }

    #[test]
    fn test_angle_tiny_negative_stays_in_range() {
        let angle = Angle::from_degrees(-1e-9);
        assert!(angle.degrees() < 360.0);
        assert!(angle.degrees() >= 0.0);
    }

    #[test]
    fn test_angle_non_finite_is_zero() {
        assert_eq!(Angle::from_degrees(f32::INFINITY), Angle::ZERO);
        assert_eq!(Angle::from_degrees(f32::NEG_INFINITY), Angle::ZERO);
        assert_eq!(Angle::from_degrees(f32::NAN), Angle::ZERO);
    }

    #[test]
    fn test_direction_is_clockwise_from_top() {
        let up = Angle::ZERO.direction();
        assert!((up.x).abs() < EPS && (up.y - 1.0).abs() < EPS);

        let three = Angle::from_degrees(90.0).direction();
        assert!((three.x - 1.0).abs() < EPS && three.y.abs() < EPS);

        let six = Angle::from_degrees(180.0).direction();
        assert!(six.x.abs() < EPS && (six.y + 1.0).abs() < EPS);

        let nine = Angle::from_degrees(270.0).direction();
        assert!((nine.x + 1.0).abs() < EPS && nine.y.abs() < EPS);
    }

    #[test]
    fn test_polar_offsets_from_origin() {
        let center = Vec2::new(10.0, -5.0);
        let p = center.polar(100.0, Angle::from_degrees(90.0));
        assert!((p.x - 110.0).abs() < EPS);
        assert!((p.y + 5.0).abs() < EPS);
        assert!((center.distance(p) - 100.0).abs() < EPS);
    }
}
