use std::fmt;
use std::time::Duration;

/// Rejected clock configuration. Returned before any window is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The clock list is empty.
    NoClocks,
    /// A timezone string is not in the IANA database.
    InvalidTimezone { canvas: String, timezone: String },
    /// A clock has an empty canvas identifier.
    EmptyCanvas { index: usize },
    /// Two clocks share a canvas identifier.
    DuplicateCanvas(String),
    /// The per-tick sweep must rotate at least one degree.
    ZeroBatch,
    /// The tick period must be non-zero.
    ZeroTick,
    /// A period, alignment or intro timing is longer than `max`.
    DurationOutOfRange { field: &'static str, max: Duration },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoClocks => write!(f, "no clocks configured"),
            ConfigError::InvalidTimezone { canvas, timezone } => {
                write!(f, "clock '{canvas}': unknown timezone '{timezone}'")
            }
            ConfigError::EmptyCanvas { index } => {
                write!(f, "clock #{index}: canvas identifier is empty")
            }
            ConfigError::DuplicateCanvas(canvas) => {
                write!(f, "canvas '{canvas}' is bound to more than one clock")
            }
            ConfigError::ZeroBatch => write!(f, "animation batch must be at least 1 degree"),
            ConfigError::ZeroTick => write!(f, "tick period must be non-zero"),
            ConfigError::DurationOutOfRange { field, max } => {
                write!(f, "{field} must not exceed {}s", max.as_secs())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
