//! Per-frame sweep of the hands that moved on a tick.
//!
//! Each tick queues hands with [`HandAnimator::add`] and starts a batch with
//! [`HandAnimator::run`]. Every frame then rotates each hand of the batch by
//! one degree until the batch target is reached; a 6 degree tick takes six
//! frames.

use crate::clock::ClockId;
use crate::hand::HandKind;

/// Identifies one hand of one clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandRef {
    pub clock: ClockId,
    pub kind: HandKind,
}

/// Where batch rotations are applied.
pub trait HandSet {
    fn rotate_hand(&mut self, hand: HandRef, degrees: f32);
}

/// How a new batch treats an unfinished one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// `run` completes the unfinished batch at once, then sweeps only the
    /// hands added since the previous `run`.
    #[default]
    Isolated,
    /// One shared queue: hands of an unfinished batch stay in the set and the
    /// progress counter restarts from zero.
    Shared,
}

#[derive(Debug, Default)]
pub struct HandAnimator {
    mode: BatchMode,
    /// Hands being swept.
    active: Vec<HandRef>,
    /// Hands added since the last `run` (isolated mode only).
    pending: Vec<HandRef>,
    target: u32,
    progress: u32,
    subscribed: bool,
}

impl HandAnimator {
    pub fn new(mode: BatchMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Queues a hand for the next batch. Duplicates are kept.
    pub fn add(&mut self, hand: HandRef) {
        match self.mode {
            BatchMode::Isolated => self.pending.push(hand),
            BatchMode::Shared => self.active.push(hand),
        }
    }

    /// Starts a batch of `degrees` one-degree steps.
    pub fn run<H: HandSet>(&mut self, degrees: u32, hands: &mut H) {
        if self.mode == BatchMode::Isolated {
            if self.subscribed && self.progress < self.target {
                let remaining = (self.target - self.progress) as f32;
                log::trace!(
                    "finishing {} hands of an unfinished batch by {remaining} degrees",
                    self.active.len()
                );
                for &hand in &self.active {
                    hands.rotate_hand(hand, remaining);
                }
            }
            self.active = std::mem::take(&mut self.pending);
        }

        self.target = degrees;
        self.progress = 0;
        self.subscribed = true;
    }

    /// Advances the current batch by one frame. Returns whether a batch is still running.
    pub fn on_frame<H: HandSet>(&mut self, hands: &mut H) -> bool {
        if !self.subscribed {
            return false;
        }
        if self.progress >= self.target {
            self.stop();
            return false;
        }

        for &hand in &self.active {
            hands.rotate_hand(hand, 1.0);
        }
        self.progress += 1;

        if self.progress >= self.target {
            self.stop();
        }
        self.subscribed
    }

    /// Drops the current batch and anything queued, without rotating.
    pub fn abandon(&mut self) {
        if self.subscribed || !self.pending.is_empty() {
            log::debug!(
                "abandoning batch ({} active, {} pending, {}/{} degrees)",
                self.active.len(),
                self.pending.len(),
                self.progress,
                self.target
            );
        }
        self.pending.clear();
        self.stop();
        self.target = 0;
        self.progress = 0;
    }

    pub fn is_running(&self) -> bool {
        self.subscribed
    }

    pub fn active(&self) -> &[HandRef] {
        &self.active
    }

    pub fn pending(&self) -> &[HandRef] {
        &self.pending
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    fn stop(&mut self) {
        self.active.clear();
        self.subscribed = false;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Angles(HashMap<HandRef, f32>);

    impl HandSet for Angles {
        fn rotate_hand(&mut self, hand: HandRef, degrees: f32) {
            *self.0.entry(hand).or_default() += degrees;
        }
    }

    impl Angles {
        fn of(&self, hand: HandRef) -> f32 {
            self.0.get(&hand).copied().unwrap_or(0.0)
        }
    }

    const A: HandRef = HandRef { clock: ClockId(0), kind: HandKind::Second };
    const B: HandRef = HandRef { clock: ClockId(1), kind: HandKind::Second };
    const M: HandRef = HandRef { clock: ClockId(0), kind: HandKind::Minute };

    #[test]
    fn six_degree_batch_drains_in_six_frames() {
        for mode in [BatchMode::Isolated, BatchMode::Shared] {
            let mut anim = HandAnimator::new(mode);
            let mut angles = Angles::default();
            anim.add(A);
            anim.add(B);
            anim.run(6, &mut angles);

            for frame in 1..=6 {
                anim.on_frame(&mut angles);
                assert_eq!(angles.of(A), frame as f32, "{mode:?}");
                assert_eq!(angles.of(B), frame as f32, "{mode:?}");
            }
            assert!(!anim.is_running());
            assert!(anim.active().is_empty());

            for _ in 0..10 {
                assert!(!anim.on_frame(&mut angles));
            }
            assert_eq!(angles.of(A), 6.0);
        }
    }

    #[test]
    fn zero_degree_run_rotates_nothing() {
        let mut anim = HandAnimator::new(BatchMode::Isolated);
        let mut angles = Angles::default();
        anim.add(A);
        anim.run(0, &mut angles);
        assert!(!anim.on_frame(&mut angles));
        assert_eq!(angles.of(A), 0.0);
        assert!(anim.active().is_empty());
    }

    #[test]
    fn duplicates_rotate_twice() {
        let mut anim = HandAnimator::new(BatchMode::Isolated);
        let mut angles = Angles::default();
        anim.add(A);
        anim.add(A);
        anim.run(3, &mut angles);
        while anim.on_frame(&mut angles) {}
        assert_eq!(angles.of(A), 6.0);
    }

    #[test]
    fn isolated_run_completes_unfinished_batch() {
        let mut anim = HandAnimator::new(BatchMode::Isolated);
        let mut angles = Angles::default();
        anim.add(A);
        anim.add(M);
        anim.run(6, &mut angles);
        anim.on_frame(&mut angles);
        anim.on_frame(&mut angles);

        // Next tick arrives mid-sweep with only the second hand.
        anim.add(A);
        anim.run(6, &mut angles);
        assert_eq!(angles.of(M), 6.0);
        assert_eq!(angles.of(A), 6.0);
        assert_eq!(anim.active(), &[A]);

        while anim.on_frame(&mut angles) {}
        assert_eq!(angles.of(A), 12.0);
        assert_eq!(angles.of(M), 6.0);
    }

    #[test]
    fn shared_run_keeps_stale_hands_and_restarts_progress() {
        let mut anim = HandAnimator::new(BatchMode::Shared);
        let mut angles = Angles::default();
        anim.add(A);
        anim.add(M);
        anim.run(6, &mut angles);
        anim.on_frame(&mut angles);
        anim.on_frame(&mut angles);

        anim.add(A);
        anim.run(6, &mut angles);
        assert_eq!(anim.active(), &[A, M, A]);
        assert_eq!(anim.progress(), 0);

        while anim.on_frame(&mut angles) {}
        // 2 frames before the restart, then 6 more; A appears twice in the set.
        assert_eq!(angles.of(M), 8.0);
        assert_eq!(angles.of(A), 2.0 + 12.0);
    }

    #[test]
    fn abandon_drops_everything_without_rotating() {
        let mut anim = HandAnimator::new(BatchMode::Isolated);
        let mut angles = Angles::default();
        anim.add(A);
        anim.run(6, &mut angles);
        anim.on_frame(&mut angles);
        anim.add(B);

        anim.abandon();
        assert!(!anim.is_running());
        assert!(anim.pending().is_empty());
        assert!(!anim.on_frame(&mut angles));
        assert_eq!(angles.of(A), 1.0);

        // A later run with nothing pending sweeps nothing.
        anim.run(6, &mut angles);
        while anim.on_frame(&mut angles) {}
        assert_eq!(angles.of(A), 1.0);
        assert_eq!(angles.of(B), 0.0);
    }
}
