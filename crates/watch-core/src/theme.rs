//! Color themes.

use core::str::FromStr;

use embedded_graphics::pixelcolor::Rgb888;

use crate::error::ConfigError;

/// Six colors that fully determine how a watch looks.
///
/// Any value of this record is a valid custom theme. Bound to a watch at
/// construction and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Canvas background.
    pub background: Rgb888,
    /// Dial ring and tick marks.
    pub face: Rgb888,
    /// Numerals and digital readout.
    pub digit: Rgb888,
    /// Hour hand.
    pub hour_hand: Rgb888,
    /// Minute hand.
    pub minute_hand: Rgb888,
    /// Second hand.
    pub second_hand: Rgb888,
}

impl Theme {
    /// Dark ink on white.
    pub const LIGHT: Self = Self {
        background: Rgb888::new(0xff, 0xff, 0xff),
        face: Rgb888::new(0xf0, 0xf0, 0xf0),
        digit: Rgb888::new(0x00, 0x00, 0x00),
        hour_hand: Rgb888::new(0x00, 0x00, 0x00),
        minute_hand: Rgb888::new(0x00, 0x00, 0xff),
        second_hand: Rgb888::new(0xff, 0x00, 0x00),
    };

    /// Light ink on near-black.
    pub const DARK: Self = Self {
        background: Rgb888::new(0x1a, 0x1a, 0x1a),
        face: Rgb888::new(0x33, 0x33, 0x33),
        digit: Rgb888::new(0xff, 0xff, 0xff),
        hour_hand: Rgb888::new(0xff, 0xff, 0xff),
        minute_hand: Rgb888::new(0x66, 0xa3, 0xff),
        second_hand: Rgb888::new(0xff, 0x66, 0x66),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::LIGHT
    }
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_color(s: &str) -> Option<Rgb888> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            Some(Rgb888::new(r, g, b))
        }
        3 => {
            let nibble = |i: usize| -> Option<u8> {
                let v = u8::from_str_radix(hex.get(i..=i)?, 16).ok()?;
                Some(v * 0x11)
            };
            Some(Rgb888::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    /// `light`, `dark`, or six comma separated colors in field order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("light") {
            return Ok(Self::LIGHT);
        }
        if trimmed.eq_ignore_ascii_case("dark") {
            return Ok(Self::DARK);
        }

        let invalid = || ConfigError::InvalidTheme(s.to_owned());
        let colors = trimmed
            .split(',')
            .map(parse_color)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        match colors.as_slice() {
            [background, face, digit, hour_hand, minute_hand, second_hand] => Ok(Self {
                background: *background,
                face: *face,
                digit: *digit,
                hour_hand: *hour_hand,
                minute_hand: *minute_hand,
                second_hand: *second_hand,
            }),
            _ => Err(invalid()),
        }
    }
}
