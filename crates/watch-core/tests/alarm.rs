#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveTime;
use watch_core::{
    Alarm, AlarmTime, RunOptions, Shutdown, StopReason, Theme, UpdateInterval, Watch,
};
use watch_testing::{CountingTrigger, ManualClock, RecordingCanvas};

fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[test]
fn add_check_remove_sequence() {
    let mut alarm = Alarm::new();
    alarm.add_alarm(12, 0, 0);
    alarm.add_alarm(7, 30, 15);
    alarm.add_alarm(12, 0, 0);
    assert_eq!(alarm.len(), 2);

    assert!(alarm.check_alarms(t(12, 0, 0)));
    assert!(alarm.check_alarms(NaiveTime::from_hms_milli_opt(7, 30, 15, 250).unwrap()));
    assert!(!alarm.check_alarms(t(12, 0, 1)));

    assert!(alarm.remove_alarm(12, 0, 0));
    assert!(!alarm.check_alarms(t(12, 0, 0)));
    assert!(!alarm.remove_alarm(12, 0, 0));
    assert!(!alarm.remove_alarm(1, 2, 3));

    alarm.add_alarm_hm(12, 30);
    assert!(alarm.check_alarms(t(12, 30, 0)));
    assert!(alarm.remove_alarm_hm(12, 30));
    assert!(!alarm.check_alarms(t(12, 30, 0)));

    alarm.clear();
    assert!(alarm.is_empty());
}

#[test]
fn analog_with_alarm_triggers_after_drawing() {
    let clock = ManualClock::at(6, 59, 59);
    let handle = clock.clone();
    let canvas = RecordingCanvas::new();
    let commits = canvas.commit_counter();
    let seen_at_fire = Rc::new(Cell::new(None));
    let record = Rc::clone(&seen_at_fire);
    let mut alarm = Alarm::new();
    alarm.add_alarm_hm(7, 0);

    let mut watch = Watch::analog_with_alarm(
        canvas,
        clock,
        Theme::LIGHT,
        120.0,
        alarm,
        move || record.set(Some(commits.get())),
    )
    .unwrap();
    watch.setup().unwrap();

    assert!(!watch.tick().unwrap().alarm_triggered);
    assert_eq!(seen_at_fire.get(), None);

    handle.set(t(7, 0, 0));
    let report = watch.tick().unwrap();
    assert!(report.alarm_triggered);
    assert_eq!(report.time, t(7, 0, 0));
    // setup, 06:59:59 and 07:00:00 were all committed when the hook ran
    assert_eq!(seen_at_fire.get(), Some(3));

    let pen = watch.face().second_hand().pen().unwrap();
    let (_, tip) = watch.canvas().assert_single_segment(pen).unwrap();
    assert!(tip.distance(watch.face().second_hand().tip()) < 1e-3);
}

#[test]
fn hook_counts_each_firing() {
    let trigger = CountingTrigger::new();
    let mut alarm = Alarm::new();
    alarm.add_alarm_hm(7, 0);

    let mut watch = Watch::analog_with_alarm(
        RecordingCanvas::new(),
        ManualClock::at(7, 0, 0),
        Theme::LIGHT,
        120.0,
        alarm,
        trigger.clone(),
    )
    .unwrap();
    watch.setup().unwrap();
    assert!(watch.tick().unwrap().alarm_triggered);
    assert_eq!(trigger.count(), 1);
}

#[test]
fn sub_second_interval_fires_exactly_once_per_matching_second() {
    let clock = ManualClock::at(11, 59, 59).with_step(Duration::from_millis(250));
    let trigger = CountingTrigger::new();
    let alarm: Alarm = [AlarmTime::new(12, 0, 0)].into_iter().collect();

    let mut watch = Watch::analog(RecordingCanvas::new(), clock, Theme::DARK, 100.0)
        .unwrap()
        .with_alarm(alarm, trigger.clone());

    // 11:59:59.000 .. 12:00:01.750 → four reads inside the matching second
    let interval = UpdateInterval::from_secs_f64(0.25).unwrap();
    let summary = watch
        .run(RunOptions::new(interval).with_max_ticks(12), &Shutdown::new())
        .unwrap();

    assert_eq!(summary.ticks, 12);
    assert_eq!(summary.stop_reason, StopReason::TickLimit);
    assert_eq!(summary.alarms_triggered, 1);
    assert_eq!(trigger.count(), 1);
}

#[test]
fn each_matching_second_fires_once_at_one_second_interval() {
    let clock = ManualClock::at(8, 59, 58).with_step(Duration::from_secs(1));
    let trigger = CountingTrigger::new();
    let alarm: Alarm = ["08:59:59", "09:00:00", "09:00:02"]
        .iter()
        .map(|s| s.parse::<AlarmTime>().unwrap())
        .collect();

    let mut watch = Watch::analog(RecordingCanvas::new(), clock, Theme::LIGHT, 100.0)
        .unwrap()
        .with_alarm(alarm, trigger.clone());
    let summary = watch
        .run(RunOptions::default().with_max_ticks(6), &Shutdown::new())
        .unwrap();

    assert_eq!(summary.alarms_triggered, 3);
    assert_eq!(trigger.count(), 3);
}

#[test]
fn digital_watch_can_carry_an_alarm() {
    let clock = ManualClock::at(6, 30, 0);
    let trigger = CountingTrigger::new();
    let mut alarm = Alarm::new();
    alarm.add_alarm(6, 30, 0);

    let mut watch = Watch::digital(
        RecordingCanvas::new(),
        clock,
        Theme::LIGHT,
        watch_core::TimeFormat::H24,
    )
    .with_alarm(alarm, trigger.clone());
    watch.setup().unwrap();
    assert!(watch.tick().unwrap().alarm_triggered);
    assert_eq!(trigger.count(), 1);

    assert!(watch.alarm_mut().unwrap().remove_alarm(6, 30, 0));
    assert!(watch.alarm().unwrap().is_empty());
}

#[test]
fn closure_hook_is_accepted() {
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let mut alarm = Alarm::new();
    alarm.add_alarm(0, 0, 0);

    let mut watch = Watch::analog_with_alarm(
        RecordingCanvas::new(),
        ManualClock::at(0, 0, 0),
        Theme::LIGHT,
        50.0,
        alarm,
        move || flag.set(true),
    )
    .unwrap();
    watch.setup().unwrap();
    watch.tick().unwrap();
    assert!(fired.get());
}
