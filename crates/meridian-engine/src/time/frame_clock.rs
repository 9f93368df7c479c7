use std::time::{Duration, Instant};

/// Timing of one presented frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic timestamp of this frame.
    pub now: Instant,
    /// Time since the previous frame, unclamped.
    pub gap: Duration,
    /// Frames presented before this one.
    pub frame_index: u64,
}

impl FrameTime {
    /// True when the gap is longer than `limit`, e.g. after the window was
    /// hidden or the loop slept until the next clock tick.
    pub fn is_late(&self, limit: Duration) -> bool {
        self.gap > limit
    }
}

/// Stamps frames for one window.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None, frame_index: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let gap = self.last.map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);

        let ft = FrameTime { now, gap, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_no_gap() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.gap, Duration::ZERO);
        assert_eq!(ft.frame_index, 0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn gap_measures_time_between_frames() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let ft = clock.tick_at(start + Duration::from_millis(900));

        assert_eq!(ft.gap, Duration::from_millis(900));
        assert_eq!(ft.frame_index, 1);
        assert!(ft.is_late(Duration::from_millis(250)));
        assert!(!ft.is_late(Duration::from_secs(1)));
    }
}
