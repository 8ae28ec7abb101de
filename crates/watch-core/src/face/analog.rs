//! Analog face: dial plus hour, minute and second hands.

use chrono::{NaiveTime, Timelike};
use embedded_graphics::pixelcolor::Rgb888;

use crate::canvas::Canvas;
use crate::config::{validate_radius, HOUR_HAND, MINUTE_HAND, SECOND_HAND};
use crate::error::ConfigError;
use crate::face::clock_face::ClockFace;
use crate::face::hand::Hand;
use crate::face::WatchFace;
use crate::geometry::{Angle, Vec2};
use crate::theme::Theme;

/// `second × 6°`.
#[allow(clippy::cast_precision_loss)]
pub fn second_angle(time: NaiveTime) -> Angle {
    Angle::from_degrees((time.second() % 60) as f32 * 6.0)
}

/// `minute × 6° + second × 0.1°`; sweeps smoothly within a minute.
#[allow(clippy::cast_precision_loss)]
pub fn minute_angle(time: NaiveTime) -> Angle {
    Angle::from_degrees(time.minute() as f32 * 6.0 + (time.second() % 60) as f32 * 0.1)
}

/// `(hour mod 12) × 30° + minute × 0.5°`.
#[allow(clippy::cast_precision_loss)]
pub fn hour_angle(time: NaiveTime) -> Angle {
    Angle::from_degrees((time.hour() % 12) as f32 * 30.0 + time.minute() as f32 * 0.5)
}

/// Dial and three hands, all centred on the canvas origin.
#[derive(Debug, Clone)]
pub struct AnalogFace {
    dial: ClockFace,
    hour: Hand,
    minute: Hand,
    second: Hand,
}

impl AnalogFace {
    /// Face of `radius` colored by `theme`.
    pub fn new(radius: f32, theme: &Theme) -> Result<Self, ConfigError> {
        validate_radius(radius)?;
        let hand = |(ratio, width): (f32, f32), color: Rgb888| {
            Hand::new(radius * ratio, width, color, Vec2::ZERO)
        };
        Ok(Self {
            dial: ClockFace::new(radius, Vec2::ZERO),
            hour: hand(HOUR_HAND, theme.hour_hand),
            minute: hand(MINUTE_HAND, theme.minute_hand),
            second: hand(SECOND_HAND, theme.second_hand),
        })
    }

    /// The dial.
    pub fn dial(&self) -> &ClockFace {
        &self.dial
    }

    /// Hour hand.
    pub fn hour_hand(&self) -> &Hand {
        &self.hour
    }

    /// Minute hand.
    pub fn minute_hand(&self) -> &Hand {
        &self.minute
    }

    /// Second hand.
    pub fn second_hand(&self) -> &Hand {
        &self.second
    }
}

impl WatchFace for AnalogFace {
    fn setup<C: Canvas>(&mut self, canvas: &mut C, theme: &Theme) -> Result<(), C::Error> {
        self.dial.setup();
        self.dial.draw(canvas, theme)
    }

    fn update<C: Canvas>(&mut self, canvas: &mut C, now: NaiveTime) -> Result<(), C::Error> {
        self.hour.update(hour_angle(now));
        self.hour.draw(canvas)?;
        self.minute.update(minute_angle(now));
        self.minute.draw(canvas)?;
        self.second.update(second_angle(now));
        self.second.draw(canvas)
    }
}
