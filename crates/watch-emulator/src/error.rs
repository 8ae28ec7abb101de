//! Emulator errors

/// Window, presentation and export failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    /// The OS window, graphics context or surface could not be created
    WindowInit(String),
    /// A frame could not be presented
    Present(String),
    /// A screenshot could not be written
    Screenshot(String),
    /// Pen was never created on this canvas
    UnknownPen(u32),
}

impl std::fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmulatorError::WindowInit(msg) => write!(f, "Window initialization failed: {}", msg),
            EmulatorError::Present(msg) => write!(f, "Frame presentation failed: {}", msg),
            EmulatorError::Screenshot(msg) => write!(f, "Screenshot failed: {}", msg),
            EmulatorError::UnknownPen(pen) => write!(f, "Unknown pen #{}", pen),
        }
    }
}

impl std::error::Error for EmulatorError {}
