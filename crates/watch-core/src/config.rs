//! Application configuration and constants
//!
//! Central configuration values used across the workspace. Window titles,
//! default sizes and face proportions should reference these constants rather
//! than hardcoding values.

use core::str::FromStr;
use core::time::Duration;

use crate::alarm::{Alarm, AlarmTime};
use crate::error::ConfigError;
use crate::face::analog::AnalogFace;
use crate::face::digital::{DigitalFace, TimeFormat};
use crate::face::ConfiguredFace;
use crate::theme::Theme;

/// The application name
pub const APP_NAME: &str = "Watch";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default window title
pub const WINDOW_TITLE: &str = "Watch";

/// Default analog dial radius in logical pixels
pub const DEFAULT_RADIUS: f32 = 200.0;

/// Default refresh period in seconds
pub const DEFAULT_UPDATE_INTERVAL_SECS: f64 = 1.0;

/// Longest single suspend between stop checks
pub const WAIT_SLICE: Duration = Duration::from_millis(50);

/// Default square canvas edge in pixels (fits a default dial plus its ring)
pub const CANVAS_SIZE: u32 = 480;

/// Ring radius as a multiple of the numeral radius
pub const RING_SCALE: f32 = 1.15;

/// Segments used to approximate the ring
pub const RING_SEGMENTS: u16 = 120;

/// Numeral size as a fraction of the radius
pub const DIGIT_SIZE_RATIO: f32 = 0.1;

/// Hour hand: length as a fraction of the radius, stroke width
pub const HOUR_HAND: (f32, f32) = (0.5, 6.0);

/// Minute hand: length as a fraction of the radius, stroke width
pub const MINUTE_HAND: (f32, f32) = (0.7, 4.0);

/// Second hand: length as a fraction of the radius, stroke width
pub const SECOND_HAND: (f32, f32) = (0.9, 2.0);

/// Digital readout font size
pub const DIGITAL_FONT_SIZE: u16 = 36;

/// Which face a watch shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaceKind {
    /// Dial, numerals and three hands.
    #[default]
    Analog,
    /// Text readout.
    Digital,
}

impl FromStr for FaceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analog" | "analogue" => Ok(Self::Analog),
            "digital" => Ok(Self::Digital),
            _ => Err(ConfigError::InvalidFace(s.to_owned())),
        }
    }
}

/// Construction-time configuration for a watch.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    /// Face variant.
    pub face: FaceKind,
    /// Colors.
    pub theme: Theme,
    /// Analog dial radius. Ignored by the digital face.
    pub radius: f32,
    /// Digital format. Ignored by the analog face.
    pub time_format: TimeFormat,
    /// Alarm times; empty means no alarm.
    pub alarms: Vec<AlarmTime>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            face: FaceKind::default(),
            theme: Theme::default(),
            radius: DEFAULT_RADIUS,
            time_format: TimeFormat::default(),
            alarms: Vec::new(),
        }
    }
}

impl WatchConfig {
    /// Reject values no face could be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.face == FaceKind::Analog {
            validate_radius(self.radius)?;
        }
        if let Some(bad) = self.alarms.iter().find(|a| !a.is_valid()) {
            return Err(ConfigError::InvalidAlarm(bad.to_string()));
        }
        Ok(())
    }

    /// Build the configured face strategy.
    pub fn build_face(&self) -> Result<ConfiguredFace, ConfigError> {
        self.validate()?;
        Ok(match self.face {
            FaceKind::Analog => ConfiguredFace::Analog(AnalogFace::new(self.radius, &self.theme)?),
            FaceKind::Digital => {
                ConfiguredFace::Digital(DigitalFace::new(self.time_format, &self.theme))
            }
        })
    }

    /// The alarm set, if any alarms were configured.
    pub fn alarm(&self) -> Option<Alarm> {
        if self.alarms.is_empty() {
            None
        } else {
            Some(self.alarms.iter().copied().collect())
        }
    }
}

/// Radius must be finite and strictly positive.
pub fn validate_radius(radius: f32) -> Result<(), ConfigError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius(radius))
    }
}
