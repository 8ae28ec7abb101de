#![allow(clippy::unwrap_used)]

use embedded_graphics::pixelcolor::RgbColor;
use watch_core::{Canvas, Theme, TimeFormat, Watch};
use watch_emulator::{EmulatorCanvas, EmulatorConfig, EmulatorError};
use watch_testing::ManualClock;

#[test]
fn headless_digital_watch_screenshot_is_a_png_of_canvas_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("digital.png");

    let canvas = EmulatorCanvas::headless(&EmulatorConfig::square(200));
    let mut watch = Watch::digital(canvas, ManualClock::at(9, 41, 0), Theme::DARK, TimeFormat::H24);
    watch.setup().unwrap();
    watch.tick().unwrap();
    watch.canvas().screenshot(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (200, 200));
    let bg = Theme::DARK.background;
    assert_eq!(img.get_pixel(0, 0).0, [bg.r(), bg.g(), bg.b()]);
    let has_text = img.pixels().any(|p| p.0 == [0xff, 0xff, 0xff]);
    assert!(has_text);
}

#[test]
fn screenshot_to_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("shot.png");
    let mut canvas = EmulatorCanvas::headless(&EmulatorConfig::square(10));
    canvas.commit_frame().unwrap();
    let err = canvas.screenshot(&path).unwrap_err();
    assert!(matches!(err, EmulatorError::Screenshot(_)));
}
