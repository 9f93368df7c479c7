use chrono::Timelike;

/// Clockwise angles from 12 o'clock, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

/// Absolute hand angles for a local time.
///
/// The hour hand advances one degree per two whole minutes, matching the
/// once-per-even-minute nudge applied while the clock runs. `resize` shows the
/// second hand one tick ahead.
pub fn hand_angles<T: Timelike>(time: &T, resize: bool) -> HandAngles {
    let seconds = time.second() + u32::from(resize);
    let minutes = time.minute();
    let (_, hour12) = time.hour12();

    HandAngles {
        hour: normalize(((hour12 % 12) * 30 + minutes / 2) as f32),
        minute: normalize((minutes * 6) as f32),
        second: normalize((seconds * 6) as f32),
    }
}

/// Wraps `degrees` into `[0, 360)`.
#[inline]
pub fn normalize(degrees: f32) -> f32 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if d >= 360.0 { 0.0 } else { d }
}
