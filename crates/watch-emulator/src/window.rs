//! Isolated window management layer
//!
//! Based on softbuffer pattern: https://github.com/rust-windowing/softbuffer
//! Follows "isolate the madness" principle - all platform-specific code here.
//!
//! The event loop is never handed over with `run_app`; instead it is pumped
//! from the watch loop's suspend step so one thread drives both.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as WinitWindow, WindowAttributes, WindowId};

use crate::config::EmulatorConfig;
use crate::error::EmulatorError;

type WindowSurface = Surface<Arc<WinitWindow>, Arc<WinitWindow>>;

/// How long a single pump may block before the deadline is re-checked.
const PUMP_SLICE: Duration = Duration::from_millis(16);

/// Attempts made to obtain the window during startup.
const CREATE_ATTEMPTS: u32 = 50;

/// Window management (isolated from application logic)
pub struct Window {
    event_loop: EventLoop<()>,
    window: Arc<WinitWindow>,
    surface: WindowSurface,
    width: u32,
    height: u32,
    scale: u32,
    open: bool,
}

/// Handles events between frames
struct EventHandler {
    close_requested: bool,
}

impl ApplicationHandler for EventHandler {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is already created before the loop is pumped
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.close_requested = true,
            _ => {}
        }
    }
}

/// Creates the window on the first `resumed` callback
struct WindowCreator {
    window_attributes: Option<WindowAttributes>,
    created: Option<Result<(Arc<WinitWindow>, WindowSurface), EmulatorError>>,
}

impl WindowCreator {
    fn create(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
    ) -> Result<(Arc<WinitWindow>, WindowSurface), EmulatorError> {
        let window = event_loop
            .create_window(attributes)
            .map(Arc::new)
            .map_err(|e| EmulatorError::WindowInit(format!("window: {}", e)))?;
        let context = Context::new(window.clone())
            .map_err(|e| EmulatorError::WindowInit(format!("context: {}", e)))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| EmulatorError::WindowInit(format!("surface: {}", e)))?;
        Ok((window, surface))
    }
}

impl ApplicationHandler for WindowCreator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attributes) = self.window_attributes.take() {
            self.created = Some(Self::create(event_loop, attributes));
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

impl Window {
    /// Open a non-resizable window sized for `config`
    pub fn new(title: &str, config: &EmulatorConfig) -> Result<Self, EmulatorError> {
        let mut event_loop =
            EventLoop::new().map_err(|e| EmulatorError::WindowInit(format!("event loop: {}", e)))?;

        let (window_w, window_h) = config.window_size();
        let window_attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(window_w, window_h))
            .with_resizable(false);

        let mut creator = WindowCreator {
            window_attributes: Some(window_attributes),
            created: None,
        };

        // Pump until resumed() has run; most platforms need a single pass
        for _ in 0..CREATE_ATTEMPTS {
            let status = event_loop.pump_app_events(Some(Duration::from_millis(1)), &mut creator);
            if creator.created.is_some() || matches!(status, PumpStatus::Exit(_)) {
                break;
            }
        }

        let (window, mut surface) = creator.created.unwrap_or_else(|| {
            Err(EmulatorError::WindowInit("event loop never resumed".into()))
        })?;

        let (w, h) = match (NonZeroU32::new(window_w), NonZeroU32::new(window_h)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(EmulatorError::WindowInit("window has zero size".into())),
        };
        surface
            .resize(w, h)
            .map_err(|e| EmulatorError::WindowInit(format!("resize: {}", e)))?;

        tracing::debug!(width = window_w, height = window_h, "window created");

        Ok(Self {
            event_loop,
            window,
            surface,
            width: config.width,
            height: config.height,
            scale: config.scale.max(1),
            open: true,
        })
    }

    /// `false` once the user closed the window or pressed Escape
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Update the title bar
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Service OS events for `duration`, returning early if the window closes
    pub fn pump_events(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        let mut handler = EventHandler {
            close_requested: false,
        };

        while self.open {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let status = self
                .event_loop
                .pump_app_events(Some(remaining.min(PUMP_SLICE)), &mut handler);
            if handler.close_requested || matches!(status, PumpStatus::Exit(_)) {
                tracing::info!("window closed");
                self.open = false;
            }
        }
    }

    /// Present `xrgb` pixels (logical size, row-major), upscaled nearest-neighbour
    pub fn present(&mut self, xrgb: &[u32]) -> Result<(), EmulatorError> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| EmulatorError::Present(e.to_string()))?;

        let scale = self.scale;
        let window_width = self.width.saturating_mul(scale);
        for (dst_index, dst) in buffer.iter_mut().enumerate() {
            let Ok(dst_index) = u32::try_from(dst_index) else {
                break;
            };
            let x = (dst_index % window_width) / scale;
            let y = (dst_index / window_width) / scale;
            let src = usize::try_from(y * self.width + x).ok();
            *dst = src.and_then(|i| xrgb.get(i)).copied().unwrap_or(0);
        }

        buffer
            .present()
            .map_err(|e| EmulatorError::Present(e.to_string()))?;
        self.window.request_redraw();
        Ok(())
    }
}
