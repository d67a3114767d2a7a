//! Declarative target states and the per-property animator that plays them.

use serde::{Deserialize, Serialize};

use super::ease::Ease;

/// Target state pushed to the animation subsystem.
///
/// Unset properties are left alone; set properties are animated from
/// wherever they currently are to the given value over `duration` seconds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TweenTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Seconds; zero applies the target on the next frame.
    pub duration: f64,
    pub ease: Ease,
}

impl TweenTarget {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    #[must_use]
    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    #[must_use]
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Properties present in both `from` and `to`, interpolated at `t` in `[0, 1]`.
    /// The result applies immediately (zero duration).
    pub fn lerp(from: &TweenTarget, to: &TweenTarget, t: f64) -> TweenTarget {
        let mix = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => Some(a + (b - a) * t),
            _ => None,
        };
        TweenTarget {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            opacity: mix(from.opacity, to.opacity),
            scale: mix(from.scale, to.scale),
            rotation: mix(from.rotation, to.rotation),
            duration: 0.0,
            ease: Ease::Linear,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.opacity.is_none()
            && self.scale.is_none()
            && self.rotation.is_none()
    }
}

/// Resolved visual state of one element.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Style {
    /// CSS `transform` value for this style.
    pub fn transform(&self) -> String {
        format!(
            "translate3d({:.2}px, {:.2}px, 0) rotate({:.3}deg) scale({:.4})",
            self.x, self.y, self.rotation, self.scale
        )
    }

    /// Copy every property `target` sets, ignoring timing.
    #[must_use]
    pub fn with(mut self, target: &TweenTarget) -> Self {
        if let Some(v) = target.x {
            self.x = v;
        }
        if let Some(v) = target.y {
            self.y = v;
        }
        if let Some(v) = target.opacity {
            self.opacity = v;
        }
        if let Some(v) = target.scale {
            self.scale = v;
        }
        if let Some(v) = target.rotation {
            self.rotation = v;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prop {
    X,
    Y,
    Opacity,
    Scale,
    Rotation,
}

const PROPS: [Prop; 5] = [Prop::X, Prop::Y, Prop::Opacity, Prop::Scale, Prop::Rotation];

impl Prop {
    fn get(self, style: &Style) -> f64 {
        match self {
            Prop::X => style.x,
            Prop::Y => style.y,
            Prop::Opacity => style.opacity,
            Prop::Scale => style.scale,
            Prop::Rotation => style.rotation,
        }
    }

    fn set(self, style: &mut Style, value: f64) {
        match self {
            Prop::X => style.x = value,
            Prop::Y => style.y = value,
            Prop::Opacity => style.opacity = value,
            Prop::Scale => style.scale = value,
            Prop::Rotation => style.rotation = value,
        }
    }

    fn target(self, target: &TweenTarget) -> Option<f64> {
        match self {
            Prop::X => target.x,
            Prop::Y => target.y,
            Prop::Opacity => target.opacity,
            Prop::Scale => target.scale,
            Prop::Rotation => target.rotation,
        }
    }

    fn slot(self) -> usize {
        match self {
            Prop::X => 0,
            Prop::Y => 1,
            Prop::Opacity => 2,
            Prop::Scale => 3,
            Prop::Rotation => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Track {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    ease: Ease,
}

impl Track {
    fn sample(&self, now: f64) -> (f64, bool) {
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0);
        (
            self.from + (self.to - self.from) * self.ease.apply(t),
            t >= 1.0,
        )
    }
}

/// Plays `TweenTarget`s against a `Style`, one track per property.
///
/// A new target overwrites only the tracks for the properties it sets,
/// starting from the property's current sampled value.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    style: Style,
    tracks: [Option<Track>; 5],
}

impl Animator {
    pub fn new(initial: Style) -> Self {
        Self {
            style: initial,
            tracks: [None; 5],
        }
    }

    /// Current style without advancing time.
    pub fn style(&self) -> Style {
        self.style
    }

    /// True when no property is still moving.
    pub fn is_idle(&self) -> bool {
        self.tracks.iter().all(Option::is_none)
    }

    /// Start animating toward `target` at time `now` (seconds).
    pub fn retarget(&mut self, target: &TweenTarget, now: f64) {
        self.tick(now);
        for prop in PROPS {
            let Some(to) = prop.target(target) else {
                continue;
            };
            let Some(slot) = self.tracks.get_mut(prop.slot()) else {
                continue;
            };
            if target.duration <= 0.0 {
                prop.set(&mut self.style, to);
                *slot = None;
            } else {
                *slot = Some(Track {
                    from: prop.get(&self.style),
                    to,
                    start: now,
                    duration: target.duration,
                    ease: target.ease,
                });
            }
        }
    }

    /// Advance every track to `now` and return the resulting style.
    pub fn tick(&mut self, now: f64) -> Style {
        for prop in PROPS {
            let Some(slot) = self.tracks.get_mut(prop.slot()) else {
                continue;
            };
            if let Some(track) = slot {
                let (value, done) = track.sample(now);
                prop.set(&mut self.style, value);
                if done {
                    *slot = None;
                }
            }
        }
        self.style
    }
}
