//! Alarm set and the per-tick alarm check.
//!
//! [`Alarm`] is a plain set of `(hour, minute, second)` entries.
//! [`AlarmMonitor`] adds the one piece of state the refresh loop needs: the
//! last second that fired, so a matching second triggers exactly once even
//! when ticks arrive faster than once per second.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

use chrono::{NaiveTime, Timelike};

use crate::error::ConfigError;

/// A time of day with whole-second resolution.
///
/// Constructed unchecked; out-of-range values are representable but can
/// never match a real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlarmTime {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
}

impl AlarmTime {
    /// Build from components without range checks.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Whole-second view of `time`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn of(time: NaiveTime) -> Self {
        // chrono keeps these below 24 and 60
        Self::new(time.hour() as u8, time.minute() as u8, (time.second() % 60) as u8)
    }

    /// `true` when every component is inside its clock range.
    pub const fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for AlarmTime {
    type Err = ConfigError;

    /// `HH:MM` or `HH:MM:SS`, range-checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidAlarm(s.to_owned());
        let mut parts = s.trim().split(':');
        let mut field = |required: bool| -> Result<u8, ConfigError> {
            match parts.next() {
                Some(p) if !p.is_empty() && p.len() <= 2 => p.parse().map_err(|_| invalid()),
                None if !required => Ok(0),
                _ => Err(invalid()),
            }
        };
        let hour = field(true)?;
        let minute = field(true)?;
        let second = field(false)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let time = Self::new(hour, minute, second);
        if time.is_valid() {
            Ok(time)
        } else {
            Err(invalid())
        }
    }
}

/// Set of alarm times.
///
/// ```
/// use watch_core::{Alarm, NaiveTime};
///
/// let mut alarm = Alarm::new();
/// alarm.add_alarm(12, 0, 0);
/// assert!(alarm.check_alarms(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
/// assert!(alarm.remove_alarm(12, 0, 0));
/// assert!(!alarm.remove_alarm(12, 0, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alarm {
    entries: BTreeSet<AlarmTime>,
}

impl Alarm {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `(hour, minute, second)`. Duplicates are a no-op.
    pub fn add_alarm(&mut self, hour: u8, minute: u8, second: u8) {
        self.add(AlarmTime::new(hour, minute, second));
    }

    /// Insert `(hour, minute, 0)`.
    pub fn add_alarm_hm(&mut self, hour: u8, minute: u8) {
        self.add_alarm(hour, minute, 0);
    }

    /// Insert an entry. Returns `false` if it was already present.
    pub fn add(&mut self, time: AlarmTime) -> bool {
        let inserted = self.entries.insert(time);
        if inserted {
            tracing::debug!(alarm = %time, "alarm added");
        }
        inserted
    }

    /// Remove `(hour, minute, second)`. Returns `false` if it was absent.
    pub fn remove_alarm(&mut self, hour: u8, minute: u8, second: u8) -> bool {
        self.remove(AlarmTime::new(hour, minute, second))
    }

    /// Remove `(hour, minute, 0)`. Returns `false` if it was absent.
    pub fn remove_alarm_hm(&mut self, hour: u8, minute: u8) -> bool {
        self.remove_alarm(hour, minute, 0)
    }

    /// Remove an entry. Returns `false` if it was absent.
    pub fn remove(&mut self, time: AlarmTime) -> bool {
        self.entries.remove(&time)
    }

    /// `true` when `now`'s whole second is in the set.
    pub fn check_alarms(&self, now: NaiveTime) -> bool {
        self.entries.contains(&AlarmTime::of(now))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &AlarmTime> + '_ {
        self.entries.iter()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<AlarmTime> for Alarm {
    fn from_iter<I: IntoIterator<Item = AlarmTime>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<AlarmTime> for Alarm {
    fn extend<I: IntoIterator<Item = AlarmTime>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Action run when an alarm fires.
pub trait AlarmTrigger {
    /// Fire.
    fn trigger(&mut self);
}

impl<F: FnMut()> AlarmTrigger for F {
    fn trigger(&mut self) {
        self()
    }
}

/// Trigger that only logs (the monitor already does).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrigger;

impl AlarmTrigger for NoopTrigger {
    fn trigger(&mut self) {}
}

/// Alarm set plus the last second that fired.
#[derive(Debug, Clone, Default)]
pub struct AlarmMonitor {
    alarm: Alarm,
    last_fired: Option<AlarmTime>,
}

impl AlarmMonitor {
    /// Watch `alarm`.
    pub fn new(alarm: Alarm) -> Self {
        Self {
            alarm,
            last_fired: None,
        }
    }

    /// The watched set.
    pub fn alarm(&self) -> &Alarm {
        &self.alarm
    }

    /// Mutable access to the watched set.
    pub fn alarm_mut(&mut self) -> &mut Alarm {
        &mut self.alarm
    }

    /// Check `now` and run `hook` on the first tick of a matching second.
    ///
    /// Returns whether the hook ran.
    pub fn poll<T: AlarmTrigger + ?Sized>(&mut self, now: NaiveTime, hook: &mut T) -> bool {
        let current = AlarmTime::of(now);
        if !self.alarm.check_alarms(now) {
            self.last_fired = None;
            return false;
        }
        if self.last_fired == Some(current) {
            return false;
        }

        self.last_fired = Some(current);
        tracing::info!(alarm = %current, "alarm triggered");
        hook.trigger();
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut alarm = Alarm::new();
        assert!(alarm.add(AlarmTime::new(6, 0, 0)));
        assert!(!alarm.add(AlarmTime::new(6, 0, 0)));
        alarm.add_alarm_hm(6, 0);
        assert_eq!(alarm.len(), 1);
    }

    #[test]
    fn test_remove_hm_targets_second_zero() {
        let mut alarm = Alarm::new();
        alarm.add_alarm_hm(6, 15);
        alarm.add_alarm(6, 15, 30);
        assert!(alarm.remove_alarm_hm(6, 15));
        assert!(!alarm.remove_alarm_hm(6, 15));
        assert!(!alarm.check_alarms(t(6, 15, 0)));
        assert!(alarm.check_alarms(t(6, 15, 30)));
        assert_eq!(alarm.len(), 1);
    }

    #[test]
    fn test_out_of_range_never_matches() {
        let mut alarm = Alarm::new();
        alarm.add_alarm(25, 61, 99);
        assert_eq!(alarm.len(), 1);
        assert!(!alarm.check_alarms(t(1, 1, 39)));
    }

    #[test]
    fn test_iter_is_sorted() {
        let alarm: Alarm = [AlarmTime::new(9, 0, 0), AlarmTime::new(7, 30, 0)]
            .into_iter()
            .collect();
        let times: Vec<String> = alarm.iter().map(ToString::to_string).collect();
        assert_eq!(times, ["07:30:00", "09:00:00"]);
    }

    #[test]
    fn test_parse_alarm_time() {
        assert_eq!("07:30".parse::<AlarmTime>().unwrap(), AlarmTime::new(7, 30, 0));
        assert_eq!("23:59:59".parse::<AlarmTime>().unwrap(), AlarmTime::new(23, 59, 59));
        assert!("24:00".parse::<AlarmTime>().is_err());
        assert!("12".parse::<AlarmTime>().is_err());
        assert!("12:00:00:00".parse::<AlarmTime>().is_err());
        assert!("ab:cd".parse::<AlarmTime>().is_err());
        assert!("12::".parse::<AlarmTime>().is_err());
    }

    #[test]
    fn test_monitor_fires_once_per_second() {
        let mut alarm = Alarm::new();
        alarm.add_alarm(12, 0, 0);
        let mut monitor = AlarmMonitor::new(alarm);
        let mut fired = 0;
        let mut hook = || fired += 1;

        let noon = t(12, 0, 0);
        let noon_half = NaiveTime::from_hms_milli_opt(12, 0, 0, 500).unwrap();
        assert!(monitor.poll(noon, &mut hook));
        assert!(!monitor.poll(noon_half, &mut hook));
        assert!(!monitor.poll(t(12, 0, 1), &mut hook));
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_monitor_rearms_after_non_matching_tick() {
        let mut alarm = Alarm::new();
        alarm.add_alarm(0, 0, 5);
        let mut monitor = AlarmMonitor::new(alarm);
        assert!(monitor.poll(t(0, 0, 5), &mut NoopTrigger));
        assert!(!monitor.poll(t(0, 0, 6), &mut NoopTrigger));
        assert!(monitor.poll(t(0, 0, 5), &mut NoopTrigger));
    }
}
