//! Watch driver: setup, per-tick update and the refresh loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveTime;

use crate::alarm::{Alarm, AlarmMonitor, AlarmTrigger, NoopTrigger};
use crate::canvas::Canvas;
use crate::clock::ClockSource;
use crate::config::{WatchConfig, DEFAULT_UPDATE_INTERVAL_SECS, WAIT_SLICE, WINDOW_TITLE};
use crate::error::{ConfigError, WatchError};
use crate::face::analog::AnalogFace;
use crate::face::digital::{DigitalFace, TimeFormat};
use crate::face::{ConfiguredFace, WatchFace};
use crate::theme::Theme;

/// Driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Constructed, nothing drawn yet.
    Created,
    /// Setup done; ticks allowed.
    Running,
    /// Loop ended. Terminal.
    Stopped,
}

/// Cooperative stop request, safe to raise from another thread.
#[derive(Debug, Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    /// Not yet requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop at its next boundary.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop was requested.
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Time between ticks. Always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateInterval(Duration);

impl UpdateInterval {
    /// Interval of `secs` seconds.
    pub fn from_secs_f64(secs: f64) -> Result<Self, ConfigError> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ConfigError::InvalidUpdateInterval(secs));
        }
        match Duration::try_from_secs_f64(secs) {
            Ok(duration) if !duration.is_zero() => Ok(Self(duration)),
            _ => Err(ConfigError::InvalidUpdateInterval(secs)),
        }
    }

    /// Interval of `duration`; zero is rejected.
    pub fn from_duration(duration: Duration) -> Result<Self, ConfigError> {
        if duration.is_zero() {
            Err(ConfigError::InvalidUpdateInterval(0.0))
        } else {
            Ok(Self(duration))
        }
    }

    /// The interval.
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for UpdateInterval {
    fn default() -> Self {
        Self(Duration::from_secs_f64(DEFAULT_UPDATE_INTERVAL_SECS))
    }
}

/// Parameters for [`Watch::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Suspend between ticks.
    pub interval: UpdateInterval,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

impl RunOptions {
    /// Run until shut down or closed.
    pub fn new(interval: UpdateInterval) -> Self {
        Self {
            interval,
            max_ticks: None,
        }
    }

    /// Also stop after `max_ticks` ticks.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Time read from the clock for this tick.
    pub time: NaiveTime,
    /// An alarm fired on this tick.
    pub alarm_triggered: bool,
}

/// Why [`Watch::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// [`Shutdown::request`] was called.
    Shutdown,
    /// The canvas reported it was closed.
    CanvasClosed,
    /// [`RunOptions::max_ticks`] was reached.
    TickLimit,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed.
    pub ticks: u64,
    /// Ticks on which an alarm fired.
    pub alarms_triggered: u64,
    /// Why the loop ended.
    pub stop_reason: StopReason,
}

/// A clock bound to a canvas, a time source, a theme and a face.
pub struct Watch<C, S, F> {
    canvas: C,
    clock: S,
    theme: Theme,
    face: F,
    alarm: Option<AlarmMonitor>,
    trigger: Box<dyn AlarmTrigger>,
    state: WatchState,
    title: String,
}

impl<C: Canvas, S: ClockSource, F: WatchFace> Watch<C, S, F> {
    /// Watch with an explicit face strategy.
    pub fn new(canvas: C, clock: S, theme: Theme, face: F) -> Self {
        Self {
            canvas,
            clock,
            theme,
            face,
            alarm: None,
            trigger: Box::new(NoopTrigger),
            state: WatchState::Created,
            title: WINDOW_TITLE.to_owned(),
        }
    }

    /// Attach an alarm checked after every visual update.
    pub fn with_alarm(mut self, alarm: Alarm, trigger: impl AlarmTrigger + 'static) -> Self {
        self.alarm = Some(AlarmMonitor::new(alarm));
        self.trigger = Box::new(trigger);
        self
    }

    /// Replace the default window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Bound theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Face strategy.
    pub fn face(&self) -> &F {
        &self.face
    }

    /// The alarm set, when one is attached.
    pub fn alarm(&self) -> Option<&Alarm> {
        self.alarm.as_ref().map(AlarmMonitor::alarm)
    }

    /// Mutable alarm set, when one is attached.
    pub fn alarm_mut(&mut self) -> Option<&mut Alarm> {
        self.alarm.as_mut().map(AlarmMonitor::alarm_mut)
    }

    /// Borrow the canvas.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Mutably borrow the canvas.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Release the canvas.
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Configure the canvas, draw static elements and commit the first frame.
    ///
    /// A no-op once running; an error after the watch stopped.
    pub fn setup(&mut self) -> Result<(), WatchError<C::Error>> {
        match self.state {
            WatchState::Created => {}
            WatchState::Running => return Ok(()),
            WatchState::Stopped => return Err(WatchError::NotRunning),
        }

        let result = self.setup_canvas();
        match result {
            Ok(()) => {
                self.state = WatchState::Running;
                tracing::info!(title = %self.title, "watch set up");
                Ok(())
            }
            Err(err) => {
                self.state = WatchState::Stopped;
                Err(WatchError::Canvas(err))
            }
        }
    }

    fn setup_canvas(&mut self) -> Result<(), C::Error> {
        self.canvas.set_background(self.theme.background)?;
        self.canvas.set_title(&self.title)?;
        self.canvas.disable_auto_redraw()?;
        self.face.setup(&mut self.canvas, &self.theme)?;
        self.canvas.commit_frame()
    }

    /// Read the clock once, redraw, commit, then check alarms.
    pub fn tick(&mut self) -> Result<TickReport, WatchError<C::Error>> {
        if self.state != WatchState::Running {
            return Err(WatchError::NotRunning);
        }

        let now = self.clock.now();
        let drawn = self
            .face
            .update(&mut self.canvas, now)
            .and_then(|()| self.canvas.commit_frame());
        if let Err(err) = drawn {
            self.state = WatchState::Stopped;
            return Err(WatchError::Canvas(err));
        }

        let alarm_triggered = match self.alarm.as_mut() {
            Some(monitor) => monitor.poll(now, self.trigger.as_mut()),
            None => false,
        };

        tracing::debug!(time = %now, alarm_triggered, "tick");
        Ok(TickReport {
            time: now,
            alarm_triggered,
        })
    }

    /// Set up, then tick every `options.interval` until stopped.
    ///
    /// Each tick is scheduled from the start of the previous one, so the time
    /// spent drawing is taken out of the following wait.
    ///
    /// Shutdown, a closed canvas and the tick limit all end the run normally.
    /// Canvas errors end it with an error. The watch is `Stopped` afterwards
    /// either way.
    pub fn run(
        &mut self,
        options: RunOptions,
        shutdown: &Shutdown,
    ) -> Result<RunSummary, WatchError<C::Error>> {
        let result = self.run_loop(options, shutdown);
        self.state = WatchState::Stopped;
        match &result {
            Ok(summary) => tracing::info!(
                ticks = summary.ticks,
                alarms = summary.alarms_triggered,
                reason = ?summary.stop_reason,
                "watch stopped"
            ),
            Err(err) => tracing::error!(error = %err, "watch stopped with error"),
        }
        result
    }

    fn run_loop(
        &mut self,
        options: RunOptions,
        shutdown: &Shutdown,
    ) -> Result<RunSummary, WatchError<C::Error>> {
        self.setup()?;

        let interval = options.interval.as_duration();
        tracing::info!(interval_ms = interval.as_millis(), max_ticks = ?options.max_ticks, "watch running");

        let mut ticks: u64 = 0;
        let mut alarms_triggered: u64 = 0;
        let limit_reached = |ticks: u64| options.max_ticks.is_some_and(|max| ticks >= max);

        let stop_reason = loop {
            if let Some(reason) = self.stop_requested(shutdown) {
                break reason;
            }
            if limit_reached(ticks) {
                break StopReason::TickLimit;
            }

            let started = Instant::now();
            let report = self.tick()?;
            ticks = ticks.saturating_add(1);
            if report.alarm_triggered {
                alarms_triggered = alarms_triggered.saturating_add(1);
            }

            let elapsed = started.elapsed();
            if elapsed > interval {
                tracing::warn!(
                    elapsed_ms = elapsed.as_millis(),
                    interval_ms = interval.as_millis(),
                    "tick overran the update interval; seconds may be skipped"
                );
            }

            if limit_reached(ticks) {
                break StopReason::TickLimit;
            }

            if let Some(reason) = self.suspend(interval.saturating_sub(elapsed), shutdown)? {
                break reason;
            }
        };

        Ok(RunSummary {
            ticks,
            alarms_triggered,
            stop_reason,
        })
    }

    /// Wait out `remaining` in slices of at most [`WAIT_SLICE`], returning
    /// early when a stop is requested.
    fn suspend(
        &mut self,
        mut remaining: Duration,
        shutdown: &Shutdown,
    ) -> Result<Option<StopReason>, WatchError<C::Error>> {
        while !remaining.is_zero() {
            if let Some(reason) = self.stop_requested(shutdown) {
                return Ok(Some(reason));
            }
            let slice = remaining.min(WAIT_SLICE);
            self.canvas.wait(slice).map_err(WatchError::Canvas)?;
            remaining = remaining.saturating_sub(slice);
        }
        Ok(None)
    }

    fn stop_requested(&self, shutdown: &Shutdown) -> Option<StopReason> {
        if shutdown.is_requested() {
            Some(StopReason::Shutdown)
        } else if !self.canvas.is_open() {
            Some(StopReason::CanvasClosed)
        } else {
            None
        }
    }
}

impl<C: Canvas, S: ClockSource> Watch<C, S, AnalogFace> {
    /// Analog watch of `radius`.
    pub fn analog(canvas: C, clock: S, theme: Theme, radius: f32) -> Result<Self, ConfigError> {
        let face = AnalogFace::new(radius, &theme)?;
        Ok(Self::new(canvas, clock, theme, face))
    }

    /// Analog watch that runs `trigger` when `alarm` matches.
    pub fn analog_with_alarm(
        canvas: C,
        clock: S,
        theme: Theme,
        radius: f32,
        alarm: Alarm,
        trigger: impl AlarmTrigger + 'static,
    ) -> Result<Self, ConfigError> {
        Ok(Self::analog(canvas, clock, theme, radius)?.with_alarm(alarm, trigger))
    }
}

impl<C: Canvas, S: ClockSource> Watch<C, S, DigitalFace> {
    /// Digital watch in `format`.
    pub fn digital(canvas: C, clock: S, theme: Theme, format: TimeFormat) -> Self {
        let face = DigitalFace::new(format, &theme);
        Self::new(canvas, clock, theme, face)
    }
}

impl<C: Canvas, S: ClockSource> Watch<C, S, ConfiguredFace> {
    /// Watch built from validated configuration.
    pub fn from_config(
        canvas: C,
        clock: S,
        config: &WatchConfig,
        trigger: impl AlarmTrigger + 'static,
    ) -> Result<Self, ConfigError> {
        let face = config.build_face()?;
        let watch = Self::new(canvas, clock, config.theme, face);
        Ok(match config.alarm() {
            Some(alarm) => watch.with_alarm(alarm, trigger),
            None => watch,
        })
    }
}

impl<C, S, F> core::fmt::Debug for Watch<C, S, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Watch")
            .field("state", &self.state)
            .field("theme", &self.theme)
            .field("alarm", &self.alarm)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_interval_rejects_bad_values() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-12] {
            assert!(UpdateInterval::from_secs_f64(secs).is_err(), "{secs}");
        }
        assert!(UpdateInterval::from_duration(Duration::ZERO).is_err());
    }

    #[test]
    fn test_update_interval_default_is_one_second() {
        assert_eq!(UpdateInterval::default().as_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_shutdown_is_shared_between_clones() {
        let shutdown = Shutdown::new();
        let remote = shutdown.clone();
        assert!(!shutdown.is_requested());
        remote.request();
        assert!(shutdown.is_requested());
    }

    #[test]
    fn test_run_options_builder() {
        let options = RunOptions::default().with_max_ticks(3);
        assert_eq!(options.max_ticks, Some(3));
        assert_eq!(options.interval, UpdateInterval::default());
    }
}
