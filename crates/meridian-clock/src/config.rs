//! Compiled-in defaults and the validated configuration types.

use std::collections::HashSet;
use std::time::Duration;

use chrono_tz::Tz;

use crate::animator::BatchMode;
use crate::error::ConfigError;

/// Longest period, alignment or intro timing accepted by [`ClockConfig::validate`].
pub const MAX_DURATION: Duration = Duration::from_secs(3600);

/// One configured clock: a timezone drawn on a named canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockSpec {
    /// Shown under the clock; the timezone is shown when absent.
    pub name: Option<String>,
    /// Unique canvas identifier.
    pub canvas: String,
    /// IANA timezone, e.g. `Europe/Moscow`.
    pub timezone: String,
}

impl ClockSpec {
    pub fn new(canvas: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self { name: None, canvas: canvas.into(), timezone: timezone.into() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Hands are drawn larger on wide windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WideScreen {
    /// Logical window width above which `scale` applies.
    pub threshold: f32,
    pub scale: f32,
}

impl Default for WideScreen {
    fn default() -> Self {
        Self { threshold: 1500.0, scale: 1.4 }
    }
}

impl WideScreen {
    /// View scale for a window of the given logical width.
    pub fn scale_for(&self, window_width: f32) -> f32 {
        if window_width > self.threshold { self.scale } else { 1.0 }
    }
}

/// Timings of the one-time startup sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroTiming {
    pub logo_fade: Duration,
    pub background_fade: Duration,
    /// After the background fade, delay before hands start ramping in.
    pub hands_delay: Duration,
    /// Opacity added to the hands every frame while ramping.
    pub hands_step: f32,
    /// After the background fade, delay before labels fade in.
    pub labels_delay: Duration,
    pub labels_fade: Duration,
    /// Logo toggles after the labels are in; toggle `t` fires `1000/t` ms after the previous one.
    pub logo_blinks: u32,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            logo_fade: Duration::from_millis(200),
            background_fade: Duration::from_millis(400),
            hands_delay: Duration::from_millis(200),
            hands_step: 0.05,
            labels_delay: Duration::from_millis(500),
            labels_fade: Duration::from_millis(200),
            logo_blinks: 9,
        }
    }
}

/// Geometry of the clock row, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Largest canvas side before the wide-screen scale is applied.
    pub max_side: f32,
    /// Horizontal gap between canvases and at both window edges.
    pub gap: f32,
    /// Height of the logo band at the top of the window.
    pub logo_band: f32,
    /// Space between a canvas and its label.
    pub label_gap: f32,
    pub label_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_side: 120.0,
            gap: 40.0,
            logo_band: 120.0,
            label_gap: 14.0,
            label_size: 18.0,
        }
    }
}

/// Everything the controller needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub clocks: Vec<ClockSpec>,
    /// Degrees swept per tick, one degree per frame.
    pub batch_degrees: u32,
    pub batch_mode: BatchMode,
    pub tick: Duration,
    /// The first tick is aligned to `start_alignment - current millisecond`.
    pub start_alignment: Duration,
    /// After a resize the ticks restart `resize_alignment - current millisecond` later.
    pub resize_alignment: Duration,
    pub wide_screen: WideScreen,
    pub intro: IntroTiming,
    pub layout: LayoutConfig,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            clocks: default_clocks(),
            batch_degrees: 6,
            batch_mode: BatchMode::default(),
            tick: Duration::from_millis(1000),
            start_alignment: Duration::from_millis(2000),
            resize_alignment: Duration::from_millis(1000),
            wide_screen: WideScreen::default(),
            intro: IntroTiming::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// New York, Kyiv and Moscow.
pub fn default_clocks() -> Vec<ClockSpec> {
    vec![
        ClockSpec::new("clock_new_york", "America/New_York").named("New York"),
        ClockSpec::new("clock_kyiv", "Europe/Kiev").named("Kyiv"),
        ClockSpec::new("clock_moscow", "Europe/Moscow").named("Moscow"),
    ]
}

impl ClockConfig {
    /// Checks the configuration and parses every timezone, in clock order.
    pub fn validate(&self) -> Result<Vec<Tz>, ConfigError> {
        if self.clocks.is_empty() {
            return Err(ConfigError::NoClocks);
        }
        if self.batch_degrees == 0 {
            return Err(ConfigError::ZeroBatch);
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        for (field, value) in self.durations() {
            if value > MAX_DURATION {
                return Err(ConfigError::DurationOutOfRange { field, max: MAX_DURATION });
            }
        }

        let mut seen = HashSet::new();
        let mut zones = Vec::with_capacity(self.clocks.len());

        for (index, spec) in self.clocks.iter().enumerate() {
            if spec.canvas.trim().is_empty() {
                return Err(ConfigError::EmptyCanvas { index });
            }
            if !seen.insert(spec.canvas.as_str()) {
                return Err(ConfigError::DuplicateCanvas(spec.canvas.clone()));
            }
            let tz: Tz = spec.timezone.parse().map_err(|_| ConfigError::InvalidTimezone {
                canvas: spec.canvas.clone(),
                timezone: spec.timezone.clone(),
            })?;
            zones.push(tz);
        }

        Ok(zones)
    }

    fn durations(&self) -> [(&'static str, Duration); 8] {
        [
            ("tick", self.tick),
            ("start_alignment", self.start_alignment),
            ("resize_alignment", self.resize_alignment),
            ("intro.logo_fade", self.intro.logo_fade),
            ("intro.background_fade", self.intro.background_fade),
            ("intro.hands_delay", self.intro.hands_delay),
            ("intro.labels_delay", self.intro.labels_delay),
            ("intro.labels_fade", self.intro.labels_fade),
        ]
    }
}
