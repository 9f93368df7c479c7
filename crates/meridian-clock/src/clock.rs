use std::collections::BTreeMap;

use chrono_tz::Tz;

use crate::animator::{HandRef, HandSet};
use crate::canvas::Canvas;
use crate::config::ClockSpec;
use crate::hand::{HandKind, HandsGroup};

/// Stable handle to a clock; also its position in the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockId(pub usize);

/// A named timezone-bound analog clock.
///
/// The clock lives for the whole run; its canvas and hands are replaced
/// wholesale whenever the layout is rebuilt.
#[derive(Debug)]
pub struct Clock {
    id: ClockId,
    name: Option<String>,
    canvas_key: String,
    timezone: Tz,
    canvas: Option<Canvas>,
    hands: Option<HandsGroup>,
}

impl Clock {
    pub fn new(id: ClockId, spec: &ClockSpec, timezone: Tz) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            canvas_key: spec.canvas.clone(),
            timezone,
            canvas: None,
            hands: None,
        }
    }

    pub fn id(&self) -> ClockId {
        self.id
    }

    /// Text shown under the clock.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.timezone.name())
    }

    pub fn canvas_key(&self) -> &str {
        &self.canvas_key
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Binds `canvas`, returning the previous one, if any, to the caller.
    pub fn bind_canvas(&mut self, canvas: Canvas) -> Option<Canvas> {
        self.canvas.replace(canvas)
    }

    /// Drops the canvas and the hands drawn on it.
    pub fn teardown(&mut self) {
        self.hands = None;
        if let Some(canvas) = self.canvas.take() {
            canvas.release();
        }
    }

    pub fn hands(&self) -> Option<&HandsGroup> {
        self.hands.as_ref()
    }

    pub fn hands_mut(&mut self) -> Option<&mut HandsGroup> {
        self.hands.as_mut()
    }

    pub fn set_hands(&mut self, hands: HandsGroup) {
        self.hands = Some(hands);
    }
}

/// All clocks, ordered by id.
#[derive(Debug, Default)]
pub struct ClockRegistry {
    clocks: BTreeMap<ClockId, Clock>,
}

impl ClockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, clock: Clock) {
        self.clocks.insert(clock.id(), clock);
    }

    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    pub fn get(&self, id: ClockId) -> Option<&Clock> {
        self.clocks.get(&id)
    }

    pub fn get_mut(&mut self, id: ClockId) -> Option<&mut Clock> {
        self.clocks.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clock> {
        self.clocks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Clock> {
        self.clocks.values_mut()
    }

    pub fn ids(&self) -> Vec<ClockId> {
        self.clocks.keys().copied().collect()
    }

    /// Angle of one hand, if the clock currently has hands.
    pub fn angle(&self, hand: HandRef) -> Option<f32> {
        self.get(hand.clock)?.hands().map(|h| h.hand(hand.kind).angle())
    }
}

impl HandSet for ClockRegistry {
    fn rotate_hand(&mut self, hand: HandRef, degrees: f32) {
        match self.get_mut(hand.clock).and_then(Clock::hands_mut) {
            Some(hands) => hands.hand_mut(hand.kind).rotate(degrees),
            None => log::trace!("rotate skipped: {:?} has no hands", hand.clock),
        }
    }
}

/// Shorthand used by the controller and tests.
pub fn hand_ref(clock: ClockId, kind: HandKind) -> HandRef {
    HandRef { clock, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasHost;
    use meridian_engine::coords::Rect;

    fn registry() -> ClockRegistry {
        let mut reg = ClockRegistry::new();
        reg.insert(Clock::new(ClockId(0), &ClockSpec::new("a", "UTC"), Tz::UTC));
        reg.insert(Clock::new(
            ClockId(1),
            &ClockSpec::new("b", "Asia/Tokyo").named("Tokyo"),
            Tz::Asia__Tokyo,
        ));
        reg
    }

    #[test]
    fn label_falls_back_to_timezone() {
        let reg = registry();
        assert_eq!(reg.get(ClockId(0)).unwrap().label(), "UTC");
        assert_eq!(reg.get(ClockId(1)).unwrap().label(), "Tokyo");
    }

    #[test]
    fn rotation_goes_through_registry() {
        let mut reg = registry();
        reg.get_mut(ClockId(1)).unwrap().set_hands(HandsGroup::new());

        let minute = hand_ref(ClockId(1), HandKind::Minute);
        reg.rotate_hand(minute, 12.0);
        assert_eq!(reg.angle(minute), Some(12.0));

        // No hands bound yet: ignored.
        reg.rotate_hand(hand_ref(ClockId(0), HandKind::Minute), 12.0);
        assert_eq!(reg.angle(hand_ref(ClockId(0), HandKind::Minute)), None);
    }

    #[test]
    fn teardown_releases_canvas() {
        let mut host = CanvasHost::new();
        let mut reg = registry();
        let clock = reg.get_mut(ClockId(0)).unwrap();
        assert!(clock.bind_canvas(host.acquire("a", Rect::new(0.0, 0.0, 10.0, 10.0), 1.0)).is_none());
        clock.set_hands(HandsGroup::new());
        assert_eq!(host.live_count(), 1);

        clock.teardown();
        assert!(clock.canvas().is_none() && clock.hands().is_none());
        assert_eq!(host.live_count(), 0);
    }
}
