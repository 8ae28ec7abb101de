//! Wall-clock port.

use chrono::NaiveTime;

/// Source of the current local time of day.
pub trait ClockSource {
    /// Current local time. Sub-second precision is allowed but only whole
    /// seconds drive the display.
    fn now(&self) -> NaiveTime;
}

/// The host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

impl<T: ClockSource + ?Sized> ClockSource for &T {
    fn now(&self) -> NaiveTime {
        (**self).now()
    }
}
