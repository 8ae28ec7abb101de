//! Watch face strategies.
//!
//! A face owns every visual component it draws and the pens behind them.
//! The driver calls [`WatchFace::setup`] once and [`WatchFace::update`] once
//! per tick; faces issue drawing calls but never commit frames.

pub mod analog;
pub mod clock_face;
pub mod digital;
pub mod hand;

use chrono::NaiveTime;

use crate::canvas::Canvas;
use crate::theme::Theme;

use self::analog::AnalogFace;
use self::digital::DigitalFace;

/// Per-variant rendering behavior.
pub trait WatchFace {
    /// Draw static elements and allocate pens.
    fn setup<C: Canvas>(&mut self, canvas: &mut C, theme: &Theme) -> Result<(), C::Error>;

    /// Redraw dynamic elements for `now`.
    fn update<C: Canvas>(&mut self, canvas: &mut C, now: NaiveTime) -> Result<(), C::Error>;
}

/// A face chosen at run time from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredFace {
    /// Dial and hands.
    Analog(AnalogFace),
    /// Text readout.
    Digital(DigitalFace),
}

impl From<AnalogFace> for ConfiguredFace {
    fn from(face: AnalogFace) -> Self {
        Self::Analog(face)
    }
}

impl From<DigitalFace> for ConfiguredFace {
    fn from(face: DigitalFace) -> Self {
        Self::Digital(face)
    }
}

impl WatchFace for ConfiguredFace {
    fn setup<C: Canvas>(&mut self, canvas: &mut C, theme: &Theme) -> Result<(), C::Error> {
        match self {
            Self::Analog(face) => face.setup(canvas, theme),
            Self::Digital(face) => face.setup(canvas, theme),
        }
    }

    fn update<C: Canvas>(&mut self, canvas: &mut C, now: NaiveTime) -> Result<(), C::Error> {
        match self {
            Self::Analog(face) => face.update(canvas, now),
            Self::Digital(face) => face.update(canvas, now),
        }
    }
}
