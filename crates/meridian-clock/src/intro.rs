//! One-time startup sequence.
//!
//! `Idle → LogoFade → BackgroundFade → Reveal → Done`. The logo fades in,
//! then the clock faces; during `Reveal` the hands ramp in (driven by the
//! controller once [`IntroCue::hands_ramp`] fires), the labels fade in and the
//! logo blinks with a slowing rhythm.

use std::f32::consts::PI;

use std::time::{Duration, Instant};

use crate::config::IntroTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    Idle,
    LogoFade,
    BackgroundFade,
    Reveal,
    Done,
}

/// Which of the two logo images is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoVariant {
    Primary,
    Alternate,
}

/// One-shot signals produced by [`IntroSequence::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntroCue {
    pub hands_ramp: bool,
}

/// Eased progress used by every fade: slow start, slow end.
pub fn swing(p: f32) -> f32 {
    if p >= 1.0 {
        return 1.0;
    }
    let p = p.max(0.0);
    0.5 - (PI * p).cos() / 2.0
}

/// Offsets of the logo toggles from the end of the label fade.
///
/// Toggle `t` (1-based) lands `1000/t` ms after the previous one.
pub fn blink_offsets(count: u32) -> Vec<Duration> {
    let mut acc = 0.0f64;
    (1..=count)
        .map(|t| {
            acc += 1000.0 / f64::from(t);
            Duration::from_micros((acc * 1000.0).round() as u64)
        })
        .collect()
}

#[derive(Debug)]
pub struct IntroSequence {
    timing: IntroTiming,
    blinks: Vec<Duration>,
    phase: IntroPhase,
    phase_started: Option<Instant>,

    logo_opacity: f32,
    background_opacity: f32,
    label_opacity: f32,
    toggles: u32,
    hands_cued: bool,
}

impl IntroSequence {
    pub fn new(timing: IntroTiming) -> Self {
        let blinks = blink_offsets(timing.logo_blinks);
        Self {
            timing,
            blinks,
            phase: IntroPhase::Idle,
            phase_started: None,
            logo_opacity: 0.0,
            background_opacity: 0.0,
            label_opacity: 0.0,
            toggles: 0,
            hands_cued: false,
        }
    }

    /// Starts the logo fade. Ignored unless idle.
    pub fn start(&mut self, now: Instant) {
        if self.phase != IntroPhase::Idle {
            return;
        }
        log::debug!("intro started");
        self.enter(IntroPhase::LogoFade, now);
    }

    /// Jumps to the end state: everything visible, no cue pending.
    pub fn finish(&mut self) {
        self.logo_opacity = 1.0;
        self.background_opacity = 1.0;
        self.label_opacity = 1.0;
        self.toggles = self.blinks.len() as u32;
        self.hands_cued = true;
        self.phase = IntroPhase::Done;
    }

    /// Moves the sequence to `now`, passing through as many phases as elapsed.
    pub fn advance(&mut self, now: Instant) -> IntroCue {
        let mut cue = IntroCue::default();
        let Some(mut started) = self.phase_started else {
            return cue;
        };

        loop {
            match self.phase {
                IntroPhase::Idle | IntroPhase::Done => break,

                IntroPhase::LogoFade => {
                    let dur = self.timing.logo_fade;
                    let p = progress(now, started, dur);
                    self.logo_opacity = swing(p);
                    if p < 1.0 {
                        break;
                    }
                    started += dur;
                    self.enter(IntroPhase::BackgroundFade, started);
                }

                IntroPhase::BackgroundFade => {
                    let dur = self.timing.background_fade;
                    let p = progress(now, started, dur);
                    self.background_opacity = swing(p);
                    if p < 1.0 {
                        break;
                    }
                    started += dur;
                    self.enter(IntroPhase::Reveal, started);
                }

                IntroPhase::Reveal => {
                    if !self.hands_cued && now >= started + self.timing.hands_delay {
                        self.hands_cued = true;
                        cue.hands_ramp = true;
                    }

                    let labels_start = started + self.timing.labels_delay;
                    let labels_dur = self.timing.labels_fade;
                    self.label_opacity = swing(progress(now, labels_start, labels_dur));

                    let labels_end = labels_start + labels_dur;
                    if now >= labels_end {
                        let since = now - labels_end;
                        self.toggles = self.blinks.iter().filter(|&&o| o <= since).count() as u32;
                    }

                    if self.hands_cued && self.toggles as usize == self.blinks.len() && now >= labels_end {
                        self.phase = IntroPhase::Done;
                        log::debug!("intro done");
                    }
                    break;
                }
            }
        }

        cue
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// True while something is still fading or blinking.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, IntroPhase::Idle | IntroPhase::Done)
    }

    pub fn logo_opacity(&self) -> f32 {
        self.logo_opacity
    }

    pub fn background_opacity(&self) -> f32 {
        self.background_opacity
    }

    pub fn label_opacity(&self) -> f32 {
        self.label_opacity
    }

    /// Logo toggles performed so far.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    pub fn logo_variant(&self) -> LogoVariant {
        if self.toggles % 2 == 0 { LogoVariant::Primary } else { LogoVariant::Alternate }
    }

    fn enter(&mut self, phase: IntroPhase, at: Instant) {
        log::trace!("intro phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
        self.phase_started = Some(at);
    }
}

/// Linear progress of `now` through `[start, start + dur]`, in `[0, 1]`.
fn progress(now: Instant, start: Instant, dur: Duration) -> f32 {
    if dur.is_zero() {
        return if now >= start { 1.0 } else { 0.0 };
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / dur.as_secs_f64()).clamp(0.0, 1.0) as f32
}
