//! Watch testing utilities
//!
//! Deterministic doubles for the ports `watch-core` depends on:
//!
//! - [`RecordingCanvas`]: a [`Canvas`] that records every call and keeps a
//!   per-pen display list, with hooks to close itself or fail on demand
//! - [`CommitCounter`]: shared view of a canvas' commit count, readable from
//!   inside an alarm hook
//! - [`ManualClock`]: a [`ClockSource`] under test control, optionally
//!   advancing by a fixed step on every read
//! - [`CountingTrigger`]: an [`AlarmTrigger`] that counts how often it fired
//!
//! # Quick start
//!
//! ```
//! use watch_core::{RunOptions, Shutdown, Theme, UpdateInterval, Watch};
//! use watch_testing::{ManualClock, RecordingCanvas};
//!
//! let clock = ManualClock::at(10, 8, 30);
//! let mut watch = Watch::analog(RecordingCanvas::new(), clock, Theme::LIGHT, 100.0).unwrap();
//! let options = RunOptions::new(UpdateInterval::default()).with_max_ticks(3);
//! let summary = watch.run(options, &Shutdown::new()).unwrap();
//! assert_eq!(summary.ticks, 3);
//! assert_eq!(watch.canvas().commit_count(), 4); // setup + 3 ticks
//! ```

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveTime;
use embedded_graphics::pixelcolor::Rgb888;
use watch_core::{AlarmTrigger, Canvas, ClockSource, FontSpec, PenId, Shutdown, TextAlign, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// RecordingCanvas
// ─────────────────────────────────────────────────────────────────────────────

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `set_background`
    SetBackground(Rgb888),
    /// `set_title`
    SetTitle(String),
    /// `disable_auto_redraw`
    DisableAutoRedraw,
    /// `commit_frame`
    CommitFrame,
    /// `create_pen`
    CreatePen(PenId),
    /// `move_to`
    MoveTo(PenId, Vec2),
    /// `line_to`
    LineTo(PenId, Vec2),
    /// `write_text`
    WriteText {
        /// Pen.
        pen: PenId,
        /// Text written.
        text: String,
        /// Alignment.
        align: TextAlign,
        /// Requested font.
        font: FontSpec,
    },
    /// `clear`
    Clear(PenId),
    /// `set_color`
    SetColor(PenId, Rgb888),
    /// `set_line_width`
    SetLineWidth(PenId, f32),
    /// `hide`
    Hide(PenId),
    /// `wait`
    Wait(Duration),
}

/// Something a pen left on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Straight stroke.
    Segment {
        /// Start.
        from: Vec2,
        /// End.
        to: Vec2,
        /// Stroke color.
        color: Rgb888,
        /// Stroke width.
        width: f32,
    },
    /// Text run.
    Text {
        /// Anchor.
        at: Vec2,
        /// Content.
        text: String,
        /// Alignment.
        align: TextAlign,
        /// Requested font.
        font: FontSpec,
        /// Fill color.
        color: Rgb888,
    },
}

/// State of one pen.
#[derive(Debug, Clone, PartialEq)]
pub struct PenState {
    /// Current position.
    pub position: Vec2,
    /// Current color.
    pub color: Rgb888,
    /// Current stroke width.
    pub width: f32,
    /// Cursor visibility.
    pub visible: bool,
    /// Marks since the last clear.
    pub marks: Vec<Mark>,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            color: Rgb888::new(0, 0, 0),
            width: 1.0,
            visible: true,
            marks: Vec::new(),
        }
    }
}

/// Errors raised by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingCanvasError {
    /// Pen was never created on this canvas.
    UnknownPen(PenId),
    /// Failure injected with [`RecordingCanvas::fail_commit_at`].
    Injected,
}

impl std::fmt::Display for RecordingCanvasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingCanvasError::UnknownPen(pen) => write!(f, "Unknown pen #{}", pen.index()),
            RecordingCanvasError::Injected => write!(f, "Injected canvas failure"),
        }
    }
}

impl std::error::Error for RecordingCanvasError {}

/// Frames committed on a [`RecordingCanvas`], shared with its clones.
#[derive(Debug, Clone, Default)]
pub struct CommitCounter(Rc<Cell<u64>>);

impl CommitCounter {
    /// Commits so far.
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

/// In-memory [`Canvas`] that records every call.
///
/// `wait` returns immediately unless [`RecordingCanvas::sleep_on_wait`] is set,
/// so loops run at full speed in tests.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    pens: Vec<PenState>,
    background: Option<Rgb888>,
    title: Option<String>,
    auto_redraw: bool,
    commits: CommitCounter,
    waits: Vec<Duration>,
    open: bool,
    close_after_commits: Option<u64>,
    fail_commit_at: Option<u64>,
    shutdown_after: Option<(u64, Shutdown)>,
    sleep_on_wait: bool,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    /// Open canvas with auto-redraw on and no pens.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            pens: Vec::new(),
            background: None,
            title: None,
            auto_redraw: true,
            commits: CommitCounter::default(),
            waits: Vec::new(),
            open: true,
            close_after_commits: None,
            fail_commit_at: None,
            shutdown_after: None,
            sleep_on_wait: false,
        }
    }

    /// Report closed once `commits` frames have been committed.
    pub fn close_after(mut self, commits: u64) -> Self {
        self.close_after_commits = Some(commits);
        self
    }

    /// Fail the `commit`-th commit (1-based) with [`RecordingCanvasError::Injected`].
    pub fn fail_commit_at(mut self, commit: u64) -> Self {
        self.fail_commit_at = Some(commit);
        self
    }

    /// Raise `shutdown` once `commits` frames have been committed.
    pub fn shutdown_after(mut self, commits: u64, shutdown: Shutdown) -> Self {
        self.shutdown_after = Some((commits, shutdown));
        self
    }

    /// Really sleep in `wait`.
    pub fn sleep_on_wait(mut self, sleep: bool) -> Self {
        self.sleep_on_wait = sleep;
        self
    }

    /// Mark the canvas closed, as if the user closed the window.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Every call so far, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls (pen state is kept).
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of committed frames.
    pub fn commit_count(&self) -> u64 {
        self.commits.get()
    }

    /// Handle that keeps reporting the commit count after the canvas moved
    /// into a watch.
    pub fn commit_counter(&self) -> CommitCounter {
        self.commits.clone()
    }

    /// Durations passed to `wait`.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Background set by the watch.
    pub fn background(&self) -> Option<Rgb888> {
        self.background
    }

    /// Title set by the watch.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether drawing calls would be presented immediately.
    pub fn auto_redraw(&self) -> bool {
        self.auto_redraw
    }

    /// Pens created so far.
    pub fn pen_count(&self) -> usize {
        self.pens.len()
    }

    /// State of `pen`.
    pub fn pen(&self, pen: PenId) -> Option<&PenState> {
        self.pens.get(pen_slot(pen))
    }

    /// Marks left by `pen` since its last clear.
    pub fn marks(&self, pen: PenId) -> &[Mark] {
        self.pen(pen)
            .map(|state| state.marks.as_slice())
            .unwrap_or_default()
    }

    /// Segment end points drawn by `pen` since its last clear.
    pub fn segments(&self, pen: PenId) -> Vec<(Vec2, Vec2)> {
        self.marks(pen)
            .iter()
            .filter_map(|mark| match mark {
                Mark::Segment { from, to, .. } => Some((*from, *to)),
                Mark::Text { .. } => None,
            })
            .collect()
    }

    /// Every text currently on the canvas, across all pens.
    pub fn texts(&self) -> Vec<&str> {
        self.pens
            .iter()
            .flat_map(|state| state.marks.iter())
            .filter_map(|mark| match mark {
                Mark::Text { text, .. } => Some(text.as_str()),
                Mark::Segment { .. } => None,
            })
            .collect()
    }

    /// Assert `pen` shows exactly one segment.
    pub fn assert_single_segment(&self, pen: PenId) -> Result<(Vec2, Vec2), String> {
        match self.segments(pen).as_slice() {
            [segment] => Ok(*segment),
            other => Err(format!(
                "pen #{} shows {} segments, expected exactly 1",
                pen.index(),
                other.len()
            )),
        }
    }

    fn state_mut(&mut self, pen: PenId) -> Result<&mut PenState, RecordingCanvasError> {
        self.pens
            .get_mut(pen_slot(pen))
            .ok_or(RecordingCanvasError::UnknownPen(pen))
    }
}

fn pen_slot(pen: PenId) -> usize {
    usize::try_from(pen.index()).unwrap_or(usize::MAX)
}

impl Canvas for RecordingCanvas {
    type Error = RecordingCanvasError;

    fn set_background(&mut self, color: Rgb888) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::SetBackground(color));
        self.background = Some(color);
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::SetTitle(title.to_owned()));
        self.title = Some(title.to_owned());
        Ok(())
    }

    fn disable_auto_redraw(&mut self) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::DisableAutoRedraw);
        self.auto_redraw = false;
        Ok(())
    }

    fn commit_frame(&mut self) -> Result<(), Self::Error> {
        let next = self.commits.get().saturating_add(1);
        if self.fail_commit_at == Some(next) {
            return Err(RecordingCanvasError::Injected);
        }
        self.ops.push(DrawOp::CommitFrame);
        self.commits.0.set(next);
        if self.close_after_commits.is_some_and(|n| next >= n) {
            self.open = false;
        }
        if let Some((n, shutdown)) = &self.shutdown_after {
            if next >= *n {
                shutdown.request();
            }
        }
        Ok(())
    }

    fn create_pen(&mut self) -> Result<PenId, Self::Error> {
        let index = u32::try_from(self.pens.len()).unwrap_or(u32::MAX);
        let pen = PenId::new(index);
        self.pens.push(PenState::default());
        self.ops.push(DrawOp::CreatePen(pen));
        Ok(pen)
    }

    fn move_to(&mut self, pen: PenId, to: Vec2) -> Result<(), Self::Error> {
        self.state_mut(pen)?.position = to;
        self.ops.push(DrawOp::MoveTo(pen, to));
        Ok(())
    }

    fn line_to(&mut self, pen: PenId, to: Vec2) -> Result<(), Self::Error> {
        let state = self.state_mut(pen)?;
        let segment = Mark::Segment {
            from: state.position,
            to,
            color: state.color,
            width: state.width,
        };
        state.marks.push(segment);
        state.position = to;
        self.ops.push(DrawOp::LineTo(pen, to));
        Ok(())
    }

    fn write_text(
        &mut self,
        pen: PenId,
        text: &str,
        align: TextAlign,
        font: FontSpec,
    ) -> Result<(), Self::Error> {
        let state = self.state_mut(pen)?;
        let mark = Mark::Text {
            at: state.position,
            text: text.to_owned(),
            align,
            font,
            color: state.color,
        };
        state.marks.push(mark);
        self.ops.push(DrawOp::WriteText {
            pen,
            text: text.to_owned(),
            align,
            font,
        });
        Ok(())
    }

    fn clear(&mut self, pen: PenId) -> Result<(), Self::Error> {
        self.state_mut(pen)?.marks.clear();
        self.ops.push(DrawOp::Clear(pen));
        Ok(())
    }

    fn set_color(&mut self, pen: PenId, color: Rgb888) -> Result<(), Self::Error> {
        self.state_mut(pen)?.color = color;
        self.ops.push(DrawOp::SetColor(pen, color));
        Ok(())
    }

    fn set_line_width(&mut self, pen: PenId, width: f32) -> Result<(), Self::Error> {
        self.state_mut(pen)?.width = width;
        self.ops.push(DrawOp::SetLineWidth(pen, width));
        Ok(())
    }

    fn hide(&mut self, pen: PenId) -> Result<(), Self::Error> {
        self.state_mut(pen)?.visible = false;
        self.ops.push(DrawOp::Hide(pen));
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn wait(&mut self, duration: Duration) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Wait(duration));
        self.waits.push(duration);
        if self.sleep_on_wait {
            std::thread::sleep(duration);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ManualClock
// ─────────────────────────────────────────────────────────────────────────────

/// A clock the test sets by hand.
///
/// Clones share the same time, so a test can keep a handle after moving the
/// clock into a watch.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: Rc<Cell<NaiveTime>>,
    step: Option<chrono::Duration>,
}

impl ManualClock {
    /// Clock stopped at `time`.
    pub fn new(time: NaiveTime) -> Self {
        Self {
            time: Rc::new(Cell::new(time)),
            step: None,
        }
    }

    /// Clock stopped at `hour:minute:second`; out-of-range input gives midnight.
    pub fn at(hour: u32, minute: u32, second: u32) -> Self {
        Self::new(NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN))
    }

    /// Advance by `step` after every read.
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = chrono::Duration::from_std(step).ok();
        self
    }

    /// Jump to `time`.
    pub fn set(&self, time: NaiveTime) {
        self.time.set(time);
    }

    /// Move forward by `by`, wrapping at midnight.
    pub fn advance(&self, by: Duration) {
        if let Ok(delta) = chrono::Duration::from_std(by) {
            let (next, _) = self.time.get().overflowing_add_signed(delta);
            self.time.set(next);
        }
    }

    /// The time the next read returns.
    pub fn peek(&self) -> NaiveTime {
        self.time.get()
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> NaiveTime {
        let now = self.time.get();
        if let Some(step) = self.step {
            let (next, _) = now.overflowing_add_signed(step);
            self.time.set(next);
        }
        now
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CountingTrigger
// ─────────────────────────────────────────────────────────────────────────────

/// Alarm hook that counts firings. Clones share the count.
#[derive(Debug, Clone, Default)]
pub struct CountingTrigger {
    count: Rc<Cell<u32>>,
}

impl CountingTrigger {
    /// Zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Firings so far.
    pub fn count(&self) -> u32 {
        self.count.get()
    }
}

impl AlarmTrigger for CountingTrigger {
    fn trigger(&mut self) {
        self.count.set(self.count.get().saturating_add(1));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_to_records_segment_from_position() {
        let mut canvas = RecordingCanvas::new();
        let pen = canvas.create_pen().unwrap();
        canvas.move_to(pen, Vec2::new(1.0, 2.0)).unwrap();
        canvas.line_to(pen, Vec2::new(3.0, 4.0)).unwrap();
        assert_eq!(
            canvas.assert_single_segment(pen).unwrap(),
            (Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))
        );
        canvas.clear(pen).unwrap();
        assert!(canvas.marks(pen).is_empty());
    }

    #[test]
    fn test_unknown_pen_is_an_error() {
        let mut canvas = RecordingCanvas::new();
        let err = canvas.clear(PenId::new(7)).unwrap_err();
        assert_eq!(err, RecordingCanvasError::UnknownPen(PenId::new(7)));
    }

    #[test]
    fn test_close_after_commits() {
        let mut canvas = RecordingCanvas::new().close_after(2);
        canvas.commit_frame().unwrap();
        assert!(canvas.is_open());
        canvas.commit_frame().unwrap();
        assert!(!canvas.is_open());
    }

    #[test]
    fn test_commit_counter_follows_canvas() {
        let mut canvas = RecordingCanvas::new().fail_commit_at(3);
        let counter = canvas.commit_counter();
        canvas.commit_frame().unwrap();
        canvas.commit_frame().unwrap();
        assert_eq!(counter.get(), 2);
        assert!(canvas.commit_frame().is_err());
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_injected_commit_failure() {
        let mut canvas = RecordingCanvas::new().fail_commit_at(2);
        canvas.commit_frame().unwrap();
        assert_eq!(canvas.commit_frame(), Err(RecordingCanvasError::Injected));
        assert_eq!(canvas.commit_count(), 1);
    }

    #[test]
    fn test_manual_clock_steps_and_wraps() {
        let clock = ManualClock::at(23, 59, 59).with_step(Duration::from_secs(1));
        let handle = clock.clone();
        assert_eq!(clock.now(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(handle.peek(), NaiveTime::MIN);
        handle.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), NaiveTime::from_hms_milli_opt(0, 0, 0, 500).unwrap());
    }

    #[test]
    fn test_counting_trigger_shares_count() {
        let counter = CountingTrigger::new();
        let mut hook = counter.clone();
        hook.trigger();
        hook.trigger();
        assert_eq!(counter.count(), 2);
    }
}
