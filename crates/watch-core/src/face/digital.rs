//! Digital face: a single line of text.

use core::fmt;
use core::str::FromStr;

use chrono::{NaiveTime, Timelike};
use embedded_graphics::pixelcolor::Rgb888;

use crate::canvas::{Canvas, FontSpec, PenId, TextAlign};
use crate::config::DIGITAL_FONT_SIZE;
use crate::error::ConfigError;
use crate::face::WatchFace;
use crate::geometry::Vec2;
use crate::theme::Theme;

/// How the digital readout renders the time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:MM:SS`
    #[default]
    H24,
    /// `hh:MM:SS AM|PM`
    H12,
}

impl TimeFormat {
    /// Render `time`.
    ///
    /// ```
    /// use watch_core::{NaiveTime, TimeFormat};
    ///
    /// let t = NaiveTime::from_hms_opt(13, 5, 9).unwrap();
    /// assert_eq!(TimeFormat::H24.format(t), "13:05:09");
    /// assert_eq!(TimeFormat::H12.format(t), "01:05:09 PM");
    /// ```
    pub fn format(self, time: NaiveTime) -> String {
        let (hour, minute, second) = (time.hour(), time.minute(), time.second() % 60);
        match self {
            TimeFormat::H24 => format!("{:02}:{:02}:{:02}", hour, minute, second),
            TimeFormat::H12 => {
                let meridiem = if hour < 12 { "AM" } else { "PM" };
                let hour12 = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                format!("{:02}:{:02}:{:02} {}", hour12, minute, second, meridiem)
            }
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::H24 => f.write_str("24h"),
            TimeFormat::H12 => f.write_str("12h"),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24h" | "24" => Ok(TimeFormat::H24),
            "12h" | "12" => Ok(TimeFormat::H12),
            _ => Err(ConfigError::InvalidTimeFormat(s.to_owned())),
        }
    }
}

/// Text readout anchored at a fixed point.
#[derive(Debug, Clone)]
pub struct DigitalDisplay {
    anchor: Vec2,
    font: FontSpec,
    color: Rgb888,
    pen: Option<PenId>,
    text: String,
}

impl DigitalDisplay {
    /// Readout centred on `anchor`.
    pub fn new(anchor: Vec2, font: FontSpec, color: Rgb888) -> Self {
        Self {
            anchor,
            font,
            color,
            pen: None,
            text: String::new(),
        }
    }

    /// Text shown by the last update.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Allocate the pen. Called implicitly by the first update.
    pub fn setup<C: Canvas>(&mut self, canvas: &mut C) -> Result<PenId, C::Error> {
        if let Some(pen) = self.pen {
            return Ok(pen);
        }
        let pen = canvas.create_pen()?;
        canvas.set_color(pen, self.color)?;
        canvas.hide(pen)?;
        self.pen = Some(pen);
        Ok(pen)
    }

    /// Replace the shown text.
    pub fn update<C: Canvas>(&mut self, canvas: &mut C, text: &str) -> Result<(), C::Error> {
        let pen = self.setup(canvas)?;
        canvas.clear(pen)?;
        canvas.move_to(pen, self.anchor)?;
        canvas.write_text(pen, text, TextAlign::Center, self.font)?;
        text.clone_into(&mut self.text);
        Ok(())
    }
}

/// Formatted local time on a centred readout.
#[derive(Debug, Clone)]
pub struct DigitalFace {
    format: TimeFormat,
    display: DigitalDisplay,
}

impl DigitalFace {
    /// Readout in `format`, colored by the theme's digit color.
    pub fn new(format: TimeFormat, theme: &Theme) -> Self {
        Self {
            format,
            display: DigitalDisplay::new(Vec2::ZERO, FontSpec::bold(DIGITAL_FONT_SIZE), theme.digit),
        }
    }

    /// Active format.
    pub fn format(&self) -> TimeFormat {
        self.format
    }

    /// The readout.
    pub fn display(&self) -> &DigitalDisplay {
        &self.display
    }
}

impl WatchFace for DigitalFace {
    fn setup<C: Canvas>(&mut self, canvas: &mut C, _theme: &Theme) -> Result<(), C::Error> {
        self.display.setup(canvas).map(|_| ())
    }

    fn update<C: Canvas>(&mut self, canvas: &mut C, now: NaiveTime) -> Result<(), C::Error> {
        let text = self.format.format(now);
        self.display.update(canvas, &text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("24H".parse::<TimeFormat>().unwrap(), TimeFormat::H24);
        assert_eq!(" 12h".parse::<TimeFormat>().unwrap(), TimeFormat::H12);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "36h".parse::<TimeFormat>(),
            Err(ConfigError::InvalidTimeFormat("36h".into()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for format in [TimeFormat::H24, TimeFormat::H12] {
            assert_eq!(format.to_string().parse::<TimeFormat>().unwrap(), format);
        }
    }
}
