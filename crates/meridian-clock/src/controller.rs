//! Owns the clocks. Hands follow wall-clock time; timers and the intro run
//! on monotonic time.
//!
//! Lifecycle:
//! - [`initialize`](ClockController::initialize) builds canvases and hands and
//!   schedules the start on a second boundary
//! - the start snaps every hand to local time, starts the intro and the
//!   once-per-second tick
//! - each tick queues the hands that moved into the [`HandAnimator`]
//! - a resize after the start tears everything down, rebuilds it already
//!   visible, and restarts the tick on the next second boundary
//!
//! Nothing here blocks or sleeps: the caller invokes
//! [`on_frame`](ClockController::on_frame) once per frame and asks
//! [`pacing`](ClockController::pacing) when the next frame is needed.

use std::time::{Duration, Instant};

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use meridian_engine::coords::Viewport;
use meridian_engine::paint::Color;
use meridian_engine::scene::DrawList;
use meridian_engine::text::{FontId, FontSystem};

use crate::angles::hand_angles;
use crate::animator::{HandAnimator, HandSet};
use crate::canvas::CanvasHost;
use crate::clock::{Clock, ClockId, ClockRegistry, hand_ref};
use crate::config::ClockConfig;
use crate::error::ConfigError;
use crate::hand::{HandKind, HandsGroup};
use crate::intro::IntroSequence;
use crate::layout::Layout;
use crate::paint::{Palette, paint_face, paint_hands, paint_label, paint_logo};
use crate::time_source::TimeSource;
use crate::timers::{Fired, TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockEvent {
    Start,
    Tick,
    ResizeResume,
}

/// When the controller next needs a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePacing {
    /// Something is animating.
    EveryFrame,
    /// Nothing changes before this instant.
    At(Instant),
}

pub struct ClockController<T: TimeSource> {
    config: ClockConfig,
    time: T,

    clocks: ClockRegistry,
    host: CanvasHost,
    animator: HandAnimator,
    timers: Timers<ClockEvent>,
    intro: IntroSequence,
    palette: Palette,

    layout: Layout,
    /// Latest window size reported.
    viewport: Viewport,
    /// Window size the current canvases were built for.
    layout_viewport: Viewport,

    initialized: bool,
    started: bool,
    resize_handler: bool,
    hands_ramp: bool,

    clock_interval: Option<TimerId>,
    resize_timeout: Option<TimerId>,
}

impl<T: TimeSource> ClockController<T> {
    /// Validates `config` and registers one clock per entry, in order.
    pub fn new(config: ClockConfig, time: T) -> Result<Self, ConfigError> {
        let zones = config.validate()?;

        let mut clocks = ClockRegistry::new();
        for (index, (spec, tz)) in config.clocks.iter().zip(zones).enumerate() {
            clocks.insert(Clock::new(ClockId(index), spec, tz));
        }

        let layout = Layout::compute(Viewport::default(), 0, &config.layout, &config.wide_screen);

        Ok(Self {
            animator: HandAnimator::new(config.batch_mode),
            intro: IntroSequence::new(config.intro.clone()),
            config,
            time,
            clocks,
            host: CanvasHost::new(),
            timers: Timers::new(),
            palette: Palette::default(),
            layout,
            viewport: Viewport::default(),
            layout_viewport: Viewport::default(),
            initialized: false,
            started: false,
            resize_handler: false,
            hands_ramp: false,
            clock_interval: None,
            resize_timeout: None,
        })
    }

    /// Builds canvases and hidden hands for `viewport` and schedules the start.
    ///
    /// Calling it again is ignored.
    pub fn initialize(&mut self, viewport: Viewport) {
        if self.initialized {
            log::warn!("clock controller already initialized");
            return;
        }
        self.initialized = true;
        self.viewport = viewport;

        self.initialize_canvas();
        self.render_clocks();
        self.add_resize_handler();
        self.run_clocks();

        log::info!(
            "initialized {} clocks at {}x{}",
            self.clocks.len(),
            viewport.width,
            viewport.height
        );
    }

    /// Lays out the current viewport and binds a fresh canvas to every clock.
    ///
    /// Old canvases are released first, so the live count never exceeds the
    /// number of clocks.
    pub fn initialize_canvas(&mut self) {
        self.layout = Layout::compute(
            self.viewport,
            self.clocks.len(),
            &self.config.layout,
            &self.config.wide_screen,
        );
        self.layout_viewport = self.viewport;

        for clock in self.clocks.iter_mut() {
            clock.teardown();
        }

        for (clock, slot) in self.clocks.iter_mut().zip(&self.layout.slots) {
            let canvas = self.host.acquire(clock.canvas_key(), slot.canvas, self.layout.view_scale);
            clock.bind_canvas(canvas);
        }

        log::debug!(
            "bound {} canvases (side {:.1}, view scale {})",
            self.host.live_count(),
            self.layout.slots.first().map_or(0.0, |s| s.canvas.size.x),
            self.layout.view_scale
        );
    }

    /// Gives every clock a new set of hands at 12 o'clock, fully transparent.
    pub fn render_clocks(&mut self) {
        for clock in self.clocks.iter_mut() {
            clock.set_hands(HandsGroup::new());
        }
    }

    /// Enables [`on_resize`](Self::on_resize). Until the start has run it only
    /// records the new size.
    pub fn add_resize_handler(&mut self) {
        self.resize_handler = true;
    }

    /// Schedules the start `start_alignment - current millisecond` from now.
    pub fn run_clocks(&mut self) {
        let delay = aligned_delay(self.time.now(), self.config.start_alignment);
        self.timers.after(self.time.instant(), delay, ClockEvent::Start);
        log::debug!("clocks start in {}ms", delay.as_millis());
    }

    /// Window resized to `viewport` (logical pixels).
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if !self.resize_handler || !self.started {
            log::trace!("resize to {}x{} before start", viewport.width, viewport.height);
            return;
        }

        if let Some(id) = self.clock_interval.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.resize_timeout.take() {
            self.timers.cancel(id);
        }
        self.animator.abandon();
        if self.intro.is_active() {
            self.intro.finish();
            self.hands_ramp = false;
        }

        self.initialize_canvas();
        self.render_clocks();
        self.set_current_time(true);
        for clock in self.clocks.iter_mut() {
            if let Some(hands) = clock.hands_mut() {
                hands.set_opacity(1.0);
            }
        }

        let delay = aligned_delay(self.time.now(), self.config.resize_alignment);
        let id = self.timers.after(self.time.instant(), delay, ClockEvent::ResizeResume);
        self.resize_timeout = Some(id);
        log::debug!(
            "resized to {}x{}, ticking resumes in {}ms",
            viewport.width,
            viewport.height,
            delay.as_millis()
        );
    }

    /// Rotates every hand to the current local time of its clock.
    ///
    /// `is_resize` shows the second hand one second ahead, covering the tick
    /// skipped until the interval restarts.
    pub fn set_current_time(&mut self, is_resize: bool) {
        for id in self.clocks.ids() {
            let Some(local) = self.get_moment(id) else { continue };
            let target = hand_angles(&local, is_resize);

            for (kind, angle) in [
                (HandKind::Hour, target.hour),
                (HandKind::Minute, target.minute),
                (HandKind::Second, target.second),
            ] {
                let current = self.clocks.angle(hand_ref(id, kind)).unwrap_or(0.0);
                self.rotate_hand(id, kind, angle - current);
            }

            if let Some(hands) = self.clocks.get_mut(id).and_then(Clock::hands_mut) {
                hands.hand_mut(HandKind::Minute).set_last_minute(local.minute());
            }
        }
    }

    /// Starts the once-per-second tick, first firing one period after `anchor`.
    pub fn run_clocks_interval(&mut self, anchor: Instant) {
        let id = self.timers.every(anchor, self.config.tick, ClockEvent::Tick);
        self.clock_interval = Some(id);
    }

    /// One tick: queue every second hand, queue minute hands whose minute
    /// changed, nudge the hour hand on even minutes, then sweep.
    pub fn on_clock_tick(&mut self) {
        for id in self.clocks.ids() {
            let Some(local) = self.get_moment(id) else { continue };
            let minute = local.minute();

            self.animator.add(hand_ref(id, HandKind::Second));

            let Some(hands) = self.clocks.get_mut(id).and_then(Clock::hands_mut) else {
                continue;
            };
            let last = hands.hand(HandKind::Minute).last_minute();
            hands.hand_mut(HandKind::Minute).set_last_minute(minute);

            if last != Some(minute) {
                self.animator.add(hand_ref(id, HandKind::Minute));
                if minute % 2 == 0 {
                    self.rotate_hand(id, HandKind::Hour, 1.0);
                }
                log::trace!("{id:?} minute {last:?} -> {minute}");
            }
        }

        self.animator.run(self.config.batch_degrees, &mut self.clocks);
    }

    /// Starts the one-time intro at `now`.
    pub fn run_introducing(&mut self, now: Instant) {
        self.intro.start(now);
    }

    /// One step of the hands fade-in. Stops once every clock is opaque.
    pub fn introduce_frame_handler(&mut self) {
        let step = self.config.intro.hands_step;
        let mut done = true;
        for clock in self.clocks.iter_mut() {
            if let Some(hands) = clock.hands_mut() {
                hands.set_opacity(hands.opacity() + step);
                done &= hands.opacity() >= 1.0;
            }
        }
        if done {
            self.hands_ramp = false;
            log::debug!("hands fully visible");
        }
    }

    /// Relative clockwise rotation of one hand about its canvas center.
    pub fn rotate_hand(&mut self, clock: ClockId, kind: HandKind, degrees: f32) {
        self.clocks.rotate_hand(hand_ref(clock, kind), degrees);
    }

    /// Current local time of a clock.
    pub fn get_moment(&self, clock: ClockId) -> Option<DateTime<Tz>> {
        let tz = self.clocks.get(clock)?.timezone();
        Some(self.time.now_in(tz))
    }

    /// Fires due timers, advances the intro and sweeps the current batch.
    pub fn on_frame(&mut self) {
        let now = self.time.instant();

        for Fired { deadline, event, .. } in self.timers.poll(now) {
            match event {
                ClockEvent::Start => self.on_start(deadline, now),
                ClockEvent::Tick => self.on_clock_tick(),
                ClockEvent::ResizeResume => self.on_resize_resume(deadline),
            }
        }

        if self.intro.advance(now).hands_ramp {
            self.hands_ramp = true;
        }
        if self.hands_ramp {
            self.introduce_frame_handler();
        }

        self.animator.on_frame(&mut self.clocks);
    }

    pub fn pacing(&self) -> FramePacing {
        if self.animator.is_running() || self.intro.is_active() || self.hands_ramp {
            return FramePacing::EveryFrame;
        }
        match self.timers.next_deadline() {
            Some(deadline) => FramePacing::At(deadline),
            None => FramePacing::EveryFrame,
        }
    }

    /// Repaints the whole window into `list`. Labels are skipped without a font.
    pub fn paint(&self, list: &mut DrawList, fonts: &FontSystem, font: Option<FontId>) {
        list.clear();

        paint_logo(
            list,
            self.layout.logo_center,
            self.layout.logo_radius,
            self.intro.logo_opacity(),
            self.intro.logo_variant(),
            &self.palette,
        );

        let label_color = Color::from_hex(self.palette.label).with_opacity(self.intro.label_opacity());

        for (clock, slot) in self.clocks.iter().zip(&self.layout.slots) {
            if let Some(canvas) = clock.canvas() {
                list.push_clip(canvas.rect());
                paint_face(list, canvas, self.intro.background_opacity(), &self.palette);
                if let Some(hands) = clock.hands() {
                    paint_hands(list, canvas, hands);
                }
                list.pop_clip();
            }

            if let Some(font) = font {
                paint_label(
                    list,
                    fonts,
                    font,
                    clock.label(),
                    slot.label_anchor,
                    self.config.layout.label_size,
                    label_color,
                );
            }
        }
    }

    pub fn clear_color(&self) -> Color {
        Color::from_hex(self.palette.page)
    }

    pub fn clocks(&self) -> &ClockRegistry {
        &self.clocks
    }

    pub fn host(&self) -> &CanvasHost {
        &self.host
    }

    pub fn animator(&self) -> &HandAnimator {
        &self.animator
    }

    pub fn intro(&self) -> &IntroSequence {
        &self.intro
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True while the per-second interval is scheduled.
    pub fn is_ticking(&self) -> bool {
        self.clock_interval.is_some()
    }

    /// True between a resize and the restart of the interval.
    pub fn resize_pending(&self) -> bool {
        self.resize_timeout.is_some()
    }

    pub fn hands_ramp_active(&self) -> bool {
        self.hands_ramp
    }

    /// The tick grid is anchored at `deadline`; the intro starts when it is
    /// seen, at `now`.
    fn on_start(&mut self, deadline: Instant, now: Instant) {
        if self.viewport != self.layout_viewport {
            self.initialize_canvas();
            self.render_clocks();
        }
        self.set_current_time(false);
        self.run_introducing(now);
        self.run_clocks_interval(deadline);
        self.started = true;
        log::info!(
            "clocks started at {} ({:?} late)",
            self.time.now().format("%H:%M:%S%.3f UTC"),
            now.saturating_duration_since(deadline)
        );
    }

    fn on_resize_resume(&mut self, deadline: Instant) {
        self.resize_timeout = None;
        self.run_clocks_interval(deadline);
        log::trace!("ticking resumed after resize");
    }
}

/// `alignment` minus the milliseconds already elapsed in the current second.
fn aligned_delay(now: DateTime<Utc>, alignment: Duration) -> Duration {
    alignment.saturating_sub(Duration::from_millis(u64::from(now.timestamp_subsec_millis())))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::time_source::ManualTimeSource;

    const NY: ClockId = ClockId(0);

    fn t0() -> DateTime<Utc> {
        // 03:45:30.250 in New York.
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 45, 30).unwrap() + ms(250)
    }

    fn ms(n: i64) -> TimeDelta {
        TimeDelta::milliseconds(n)
    }

    fn viewport() -> Viewport {
        Viewport::new(1200.0, 520.0)
    }

    fn controller() -> (ClockController<ManualTimeSource>, ManualTimeSource) {
        let time = ManualTimeSource::new(t0());
        let ctl = ClockController::new(ClockConfig::default(), time.clone()).unwrap();
        (ctl, time)
    }

    /// Initialized and past the aligned start (08:45:32.000 UTC).
    fn started() -> (ClockController<ManualTimeSource>, ManualTimeSource) {
        let (mut ctl, time) = controller();
        ctl.initialize(viewport());
        time.advance(ms(1750));
        ctl.on_frame();
        assert!(ctl.is_started());
        (ctl, time)
    }

    fn angle(ctl: &ClockController<ManualTimeSource>, clock: ClockId, kind: HandKind) -> f32 {
        ctl.clocks().angle(hand_ref(clock, kind)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ClockConfig { clocks: Vec::new(), ..ClockConfig::default() };
        let err = ClockController::new(cfg, ManualTimeSource::new(t0())).err();
        assert_eq!(err, Some(ConfigError::NoClocks));
    }

    #[test]
    fn initialize_binds_hidden_hands_and_waits_for_boundary() {
        let (mut ctl, time) = controller();
        let mono = time.instant();
        ctl.initialize(viewport());

        assert_eq!(ctl.host().live_count(), 3);
        assert!(ctl.clocks().iter().all(|c| c.hands().unwrap().opacity() == 0.0));
        assert_eq!(ctl.pacing(), FramePacing::At(mono + Duration::from_millis(1750)));

        time.advance(ms(1749));
        ctl.on_frame();
        assert!(!ctl.is_started());
        assert_eq!(angle(&ctl, NY, HandKind::Second), 0.0);
    }

    #[test]
    fn start_snaps_hands_to_local_time() {
        let (ctl, _) = started();
        assert_eq!(angle(&ctl, NY, HandKind::Hour), 112.0);
        assert_eq!(angle(&ctl, NY, HandKind::Minute), 270.0);
        assert_eq!(angle(&ctl, NY, HandKind::Second), 192.0);

        // Moscow is 11:45:32.
        assert_eq!(angle(&ctl, ClockId(2), HandKind::Hour), 352.0);
        assert!(ctl.is_ticking());
        assert_eq!(ctl.pacing(), FramePacing::EveryFrame);
    }

    #[test]
    fn tick_sweeps_six_degrees_over_six_frames() {
        let (mut ctl, time) = started();
        time.advance(ms(1000));

        ctl.on_frame();
        assert_eq!(angle(&ctl, NY, HandKind::Second), 193.0);
        for _ in 0..5 {
            ctl.on_frame();
        }
        assert_eq!(angle(&ctl, NY, HandKind::Second), 198.0);
        assert!(!ctl.animator().is_running());

        ctl.on_frame();
        assert_eq!(angle(&ctl, NY, HandKind::Second), 198.0);
        assert_eq!(angle(&ctl, NY, HandKind::Minute), 270.0);
    }

    #[test]
    fn ticks_continue_after_wall_clock_steps_back() {
        let (mut ctl, time) = started();
        time.set(time.now() - TimeDelta::seconds(60));

        for _ in 0..10 {
            time.advance(ms(1000));
            for _ in 0..8 {
                ctl.on_frame();
            }
        }
        assert_eq!(angle(&ctl, NY, HandKind::Second), 252.0);
    }

    #[test]
    fn late_start_keeps_ticks_on_the_boundary() {
        let (mut ctl, time) = controller();
        ctl.initialize(viewport());

        // The start frame arrives 300ms after its deadline.
        time.advance(ms(2050));
        ctl.on_frame();
        assert!(ctl.is_started());
        assert_eq!(angle(&ctl, NY, HandKind::Second), 192.0);

        // 08:45:33.000: one period after the deadline, not after the frame.
        time.advance(ms(700));
        ctl.on_frame();
        assert_eq!(angle(&ctl, NY, HandKind::Second), 193.0);
    }

    #[test]
    fn hour_hand_nudged_once_per_even_minute() {
        let (mut ctl, time) = controller();
        ctl.initialize(viewport());

        let at = |m: u32| Utc.with_ymd_and_hms(2024, 1, 15, 8, m, 10).unwrap();
        time.set(at(4));
        ctl.set_current_time(false);
        assert_eq!(angle(&ctl, NY, HandKind::Hour), 92.0);

        let mut hours = Vec::new();
        for m in [5, 5, 6, 6, 7] {
            time.set(at(m));
            ctl.on_clock_tick();
            hours.push(angle(&ctl, NY, HandKind::Hour));
        }
        assert_eq!(hours, vec![92.0, 92.0, 93.0, 93.0, 93.0]);

        // Last tick changed the minute: every second and minute hand sweeps.
        assert_eq!(ctl.animator().active().len(), 6);
    }

    #[test]
    fn resize_before_start_only_records_size() {
        let (mut ctl, time) = controller();
        ctl.initialize(viewport());
        ctl.on_resize(Viewport::new(1600.0, 900.0));

        assert_eq!(ctl.host().issued(), 3);
        assert!(!ctl.resize_pending());
        assert_eq!(ctl.layout().view_scale, 1.0);

        // The start picks up the new size.
        time.advance(ms(1750));
        ctl.on_frame();
        assert_eq!(ctl.layout().view_scale, 1.4);
        assert_eq!(ctl.host().live_count(), 3);
        assert_eq!(angle(&ctl, NY, HandKind::Second), 192.0);
    }

    #[test]
    fn resize_rebuilds_and_restarts_on_next_boundary() {
        let (mut ctl, time) = started();
        time.advance(ms(300));

        for width in [1000.0, 1100.0, 1300.0, 1600.0, 1250.0] {
            ctl.on_resize(Viewport::new(width, 520.0));
        }
        assert_eq!(ctl.host().live_count(), 3);
        assert_eq!(ctl.host().issued(), 3 + 5 * 3);
        assert!(!ctl.is_ticking());
        assert!(ctl.resize_pending());

        // Shown one second ahead, fully visible.
        assert_eq!(angle(&ctl, NY, HandKind::Second), 198.0);
        assert!(ctl.clocks().iter().all(|c| c.hands().unwrap().opacity() == 1.0));

        time.advance(ms(699));
        ctl.on_frame();
        assert!(ctl.resize_pending());

        // 08:45:33.000
        time.advance(ms(1));
        ctl.on_frame();
        assert!(ctl.is_ticking() && !ctl.resize_pending());
        assert_eq!(angle(&ctl, NY, HandKind::Second), 198.0);

        time.advance(ms(1000));
        for _ in 0..6 {
            ctl.on_frame();
        }
        assert_eq!(angle(&ctl, NY, HandKind::Second), 204.0);
    }

    #[test]
    fn resize_abandons_sweep_in_flight() {
        let (mut ctl, time) = started();
        time.advance(ms(1000));
        ctl.on_frame();
        assert!(ctl.animator().is_running());

        ctl.on_resize(Viewport::new(900.0, 520.0));
        assert!(!ctl.animator().is_running());
        for _ in 0..6 {
            ctl.on_frame();
        }
        // 08:45:33 plus the resize second.
        assert_eq!(angle(&ctl, NY, HandKind::Second), 204.0);
    }

    #[test]
    fn resize_during_intro_finishes_it() {
        let (mut ctl, time) = started();
        time.advance(ms(800));
        ctl.on_frame();
        assert!(ctl.intro().is_active() && ctl.hands_ramp_active());

        ctl.on_resize(Viewport::new(900.0, 520.0));
        assert!(!ctl.intro().is_active());
        assert!(!ctl.hands_ramp_active());
        assert_eq!(ctl.intro().background_opacity(), 1.0);
        assert_eq!(ctl.intro().label_opacity(), 1.0);
        assert!(ctl.clocks().iter().all(|c| c.hands().unwrap().opacity() == 1.0));
    }

    #[test]
    fn hands_ramp_in_during_intro() {
        let (mut ctl, time) = started();
        assert!(!ctl.hands_ramp_active());

        // Logo 200ms, background 400ms, then 200ms until the hands.
        time.advance(ms(800));
        ctl.on_frame();
        assert!(ctl.hands_ramp_active());

        let mut frames = 1;
        while ctl.hands_ramp_active() && frames < 30 {
            ctl.on_frame();
            frames += 1;
        }
        assert!((20..=21).contains(&frames), "{frames}");
        assert!(ctl.clocks().iter().all(|c| c.hands().unwrap().opacity() == 1.0));
    }

    #[test]
    fn paint_clips_each_canvas() {
        let (mut ctl, time) = started();
        time.advance(ms(5000));
        ctl.on_frame();

        let mut list = DrawList::new();
        ctl.paint(&mut list, &FontSystem::new(), None);

        // Logo ring + dot, then per clock: disc, 12 ticks, 3 hands, pivot.
        assert_eq!(list.len(), 2 + 3 * 17);
        let canvas = ctl.clocks().get(NY).unwrap().canvas().unwrap().rect();
        assert_eq!(list.items()[2].clip_rect, Some(canvas));
    }
}
