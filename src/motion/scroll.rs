//! Scroll-driven animation: an observable scroll position, trigger regions,
//! scrubbed progress and bindings that turn progress into targets.

use super::ease::Ease;
use super::tween::TweenTarget;
use crate::types::ScrollOffset;

/// Handle returned by [`ScrollObservable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(ScrollOffset)>;

/// Broadcasts scroll offsets to subscribers.
#[derive(Default)]
pub struct ScrollObservable {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    last: Option<ScrollOffset>,
}

impl std::fmt::Debug for ScrollObservable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollObservable")
            .field("observers", &self.observers.len())
            .field("last", &self.last)
            .finish()
    }
}

impl ScrollObservable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer`. If an offset has already been published the
    /// observer is called with it immediately.
    pub fn subscribe(
        &mut self,
        mut observer: impl FnMut(ScrollOffset) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        if let Some(last) = self.last {
            observer(last);
        }
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, offset: ScrollOffset) {
        self.last = Some(offset);
        for (_, observer) in &mut self.observers {
            observer(offset);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    pub fn last(&self) -> Option<ScrollOffset> {
        self.last
    }

    /// Drop every subscriber (teardown).
    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

/// A scroll region in page pixels. Progress runs 0 → 1 between `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    pub start: f64,
    pub end: f64,
    /// Seconds the animation lags behind the scrollbar; `None` follows it exactly.
    pub scrub: Option<f64>,
}

impl ScrollTrigger {
    pub fn between(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            scrub: None,
        }
    }

    /// From the element's top meeting the viewport bottom until its bottom
    /// leaves the viewport top.
    pub fn across_viewport(element_top: f64, element_height: f64, viewport_height: f64) -> Self {
        Self::between(element_top - viewport_height, element_top + element_height)
    }

    #[must_use]
    pub fn scrub(mut self, seconds: f64) -> Self {
        self.scrub = Some(seconds.max(0.0));
        self
    }

    pub fn progress(&self, offset: ScrollOffset) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if offset.0 >= self.start { 1.0 } else { 0.0 };
        }
        ((offset.0 - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Progress that trails its target with a time constant of `lag` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubbedProgress {
    current: f64,
    target: f64,
    lag: f64,
}

/// Remaining distance below which scrubbing snaps to the target.
const SCRUB_EPSILON: f64 = 1e-4;

impl ScrubbedProgress {
    pub fn new(lag: Option<f64>) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            lag: lag.unwrap_or(0.0).max(0.0),
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target.clamp(0.0, 1.0);
        if self.lag <= 0.0 {
            self.current = self.target;
        }
    }

    /// Move toward the target by `dt` seconds worth of catch-up.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.lag <= 0.0 {
            self.current = self.target;
        } else {
            let step = (dt.max(0.0) / self.lag).min(1.0);
            self.current += (self.target - self.current) * step;
            if (self.target - self.current).abs() < SCRUB_EPSILON {
                self.current = self.target;
            }
        }
        self.current
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.current).abs() < SCRUB_EPSILON
    }
}

/// Maps scroll progress within a trigger onto a from → to interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBinding {
    pub trigger: ScrollTrigger,
    pub from: TweenTarget,
    pub to: TweenTarget,
    pub ease: Ease,
}

impl ScrollBinding {
    pub fn new(trigger: ScrollTrigger, from: TweenTarget, to: TweenTarget, ease: Ease) -> Self {
        Self {
            trigger,
            from,
            to,
            ease,
        }
    }

    /// Target for raw (un-eased) progress `t`.
    pub fn sample(&self, t: f64) -> TweenTarget {
        TweenTarget::lerp(&self.from, &self.to, self.ease.apply(t))
    }

    pub fn sample_at(&self, offset: ScrollOffset) -> TweenTarget {
        self.sample(self.trigger.progress(offset))
    }
}

/// One-shot entrance: plays once when the element scrolls into view and
/// never reverses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntranceTrigger {
    /// Scroll offset at which the entrance plays.
    pub fire_at: f64,
    fired: bool,
}

impl EntranceTrigger {
    /// Fires when the element top passes `inset` pixels above the viewport bottom.
    pub fn new(element_top: f64, viewport_height: f64, inset: f64) -> Self {
        Self {
            fire_at: element_top - (viewport_height - inset),
            fired: false,
        }
    }

    /// Returns true exactly once: on the first offset at or past `fire_at`.
    pub fn check(&mut self, offset: ScrollOffset) -> bool {
        if self.fired || offset.0 < self.fire_at {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
