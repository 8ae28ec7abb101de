//! Error types.

/// Invalid construction-time or run-time configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Analog radius must be finite and positive.
    InvalidRadius(f32),
    /// Unknown digital time format token.
    InvalidTimeFormat(String),
    /// Update interval must be finite and positive.
    InvalidUpdateInterval(f64),
    /// Theme name or color list could not be parsed.
    InvalidTheme(String),
    /// Alarm time could not be parsed or is out of range.
    InvalidAlarm(String),
    /// Unknown face variant.
    InvalidFace(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidRadius(r) => {
                write!(f, "Invalid radius: {} (must be finite and > 0)", r)
            }
            ConfigError::InvalidTimeFormat(s) => {
                write!(f, "Invalid time format: '{}' (expected 24h or 12h)", s)
            }
            ConfigError::InvalidUpdateInterval(secs) => {
                write!(f, "Invalid update interval: {}s (must be finite and > 0)", secs)
            }
            ConfigError::InvalidTheme(s) => write!(
                f,
                "Invalid theme: '{}' (expected light, dark or six comma separated colors)",
                s
            ),
            ConfigError::InvalidAlarm(s) => {
                write!(f, "Invalid alarm: '{}' (expected HH:MM or HH:MM:SS)", s)
            }
            ConfigError::InvalidFace(s) => {
                write!(f, "Invalid face: '{}' (expected analog or digital)", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure while setting up or running a watch.
#[derive(Debug)]
pub enum WatchError<E> {
    /// Rejected configuration.
    Config(ConfigError),
    /// The canvas backend failed; the run ends.
    Canvas(E),
    /// `tick` was called before `setup` or after the watch stopped.
    NotRunning,
}

impl<E> From<ConfigError> for WatchError<E> {
    fn from(err: ConfigError) -> Self {
        WatchError::Config(err)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for WatchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::Config(err) => write!(f, "Configuration error: {}", err),
            WatchError::Canvas(err) => write!(f, "Canvas error: {}", err),
            WatchError::NotRunning => write!(f, "Watch is not running"),
        }
    }
}

impl<E> std::error::Error for WatchError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WatchError::Config(err) => Some(err),
            WatchError::Canvas(err) => Some(err),
            WatchError::NotRunning => None,
        }
    }
}
