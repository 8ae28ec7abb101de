//! Watch Emulator
//!
//! Desktop [`Canvas`](watch_core::Canvas) backend for `watch-core`.
//!
//! - RGB framebuffer with embedded-graphics integration
//! - Display-list canvas (one list per pen, replayed on commit)
//! - Window management (winit + softbuffer)
//! - Headless mode for CI and PNG screenshots
//!
//! # Example
//!
//! ```no_run
//! use watch_core::{RunOptions, Shutdown, SystemClock, Theme, UpdateInterval, Watch};
//! use watch_emulator::{EmulatorCanvas, EmulatorConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let canvas = EmulatorCanvas::windowed(&EmulatorConfig::default(), "Watch")?;
//! let mut watch = Watch::analog(canvas, SystemClock, Theme::DARK, 200.0)?;
//! watch.run(RunOptions::new(UpdateInterval::default()), &Shutdown::new())?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod config;
pub mod error;
pub mod framebuffer;
mod window;

pub use canvas::EmulatorCanvas;
pub use config::EmulatorConfig;
pub use error::EmulatorError;
pub use framebuffer::Framebuffer;
