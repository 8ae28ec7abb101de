//! Watch core — the time-driven rendering and update model.
//!
//! Maps wall-clock time to visual state (hand angles, digit glyphs), drives
//! the refresh loop and runs the alarm-check state machine. Drawing happens
//! through the [`Canvas`] port; concrete backends live in other crates
//! (`watch-emulator` for the desktop, `watch-testing` for tests).
//!
//! # Architecture
//!
//! ```text
//! Watch (driver: setup → tick loop → stopped)
//!   ├── WatchFace strategy (AnalogFace | DigitalFace)
//!   │     ├── ClockFace + 3 × Hand
//!   │     └── DigitalDisplay
//!   ├── Option<AlarmMonitor>
//!   ├── ClockSource (SystemClock in production)
//!   └── Canvas (owned, lent to components each tick)
//! ```
//!
//! # Coordinates
//!
//! Logical canvas coordinates have their origin at the canvas centre with the
//! y axis pointing up. An [`Angle`] of zero points at 12 o'clock and grows
//! clockwise, so the unit direction for angle θ is `(sin θ, cos θ)`. Digit
//! placement and hand rendering both go through [`Vec2::polar`].
//!
//! # Example
//!
//! ```no_run
//! use watch_core::{Canvas, RunOptions, Shutdown, SystemClock, Theme, UpdateInterval, Watch};
//!
//! fn launch<C: Canvas>(canvas: C) -> Result<(), watch_core::WatchError<C::Error>> {
//!     let mut watch = Watch::analog(canvas, SystemClock, Theme::DARK, 200.0)?;
//!     let interval = UpdateInterval::from_secs_f64(1.0)?;
//!     watch.run(RunOptions::new(interval), &Shutdown::new())?;
//!     Ok(())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alarm;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod error;
pub mod face;
pub mod geometry;
pub mod theme;
pub mod watch;

pub use alarm::{Alarm, AlarmMonitor, AlarmTime, AlarmTrigger, NoopTrigger};
pub use canvas::{Canvas, FontSpec, PenId, TextAlign};
pub use clock::{ClockSource, SystemClock};
pub use config::{FaceKind, WatchConfig};
pub use error::{ConfigError, WatchError};
pub use face::analog::{hour_angle, minute_angle, second_angle, AnalogFace};
pub use face::clock_face::{ClockFace, Digit};
pub use face::digital::{DigitalDisplay, DigitalFace, TimeFormat};
pub use face::hand::Hand;
pub use face::{ConfiguredFace, WatchFace};
pub use geometry::{Angle, Vec2};
pub use theme::Theme;
pub use watch::{
    RunOptions, RunSummary, Shutdown, StopReason, TickReport, UpdateInterval, Watch, WatchState,
};

/// Color type used by every theme and canvas call.
pub use embedded_graphics::pixelcolor::Rgb888 as Color;

/// Re-exported so callers and backends agree on the wall-clock type.
pub use chrono::NaiveTime;
