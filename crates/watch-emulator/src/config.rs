//! Emulator configuration

use watch_core::config::CANVAS_SIZE;

/// Canvas size and window presentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Upscaling factor (1 = no scaling, 2 = 2x for visibility, etc.)
    pub scale: u32,
}

impl EmulatorConfig {
    /// Default configuration: square canvas, 1:1 pixel mapping
    pub const DEFAULT: Self = Self {
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
        scale: 1,
    };

    /// Square canvas, 2x upscaling for high-density screens
    pub const DEFAULT_2X: Self = Self {
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
        scale: 2,
    };

    /// Square canvas of `size` pixels
    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            scale: 1,
        }
    }

    /// Same canvas, presented at `scale` (clamped to at least 1)
    pub const fn with_scale(mut self, scale: u32) -> Self {
        self.scale = if scale == 0 { 1 } else { scale };
        self
    }

    /// Window size after scaling
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.width.saturating_mul(self.scale),
            self.height.saturating_mul(self.scale),
        )
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_never_zero() {
        assert_eq!(EmulatorConfig::DEFAULT.with_scale(0).scale, 1);
    }

    #[test]
    fn test_window_size_scales() {
        assert_eq!(EmulatorConfig::square(100).with_scale(3).window_size(), (300, 300));
        assert_eq!(EmulatorConfig::DEFAULT_2X.window_size(), (960, 960));
    }
}
