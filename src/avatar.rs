//! Pointer-following tilt for the biography avatar.
//!
//! The avatar leans a little toward the pointer and a glare highlight
//! slides across it. State is per component; two avatars on a page track
//! independently.

use serde::{Deserialize, Serialize};

use crate::motion::{presets, Ease, TweenTarget};
use crate::types::Rect;

const MAX_ROTATION: f64 = 2.0;
const ROTATION_GAIN: f64 = 5.0;
const MAX_SHIFT: f64 = 20.0;
const SHIFT_GAIN: f64 = 50.0;
const HIGHLIGHT_OFFSET: f64 = 0.7;
const HIGHLIGHT_TRAVEL: f64 = 20.0;
const TILT_DURATION: f64 = 0.5;

/// Pointer position relative to the avatar centre, as a fraction of its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TiltPercent {
    pub x: f64,
    pub y: f64,
}

/// Targets for the avatar and its highlight for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarTilt {
    pub avatar: TweenTarget,
    pub highlight: TweenTarget,
}

/// Which element of the avatar a target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvatarPart {
    Avatar,
    Highlight,
}

#[derive(Debug, Clone, Default)]
pub struct AvatarTracker {
    last: Option<TiltPercent>,
    active: bool,
}

impl AvatarTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking; returns the intro animation as (initial, final).
    pub fn mount(&mut self) -> (TweenTarget, TweenTarget) {
        self.active = true;
        presets::avatar_intro()
    }

    pub fn unmount(&mut self) {
        self.active = false;
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_percent(&self) -> Option<TiltPercent> {
        self.last
    }

    /// Tilt for a pointer at client `(x, y)` over an avatar laid out at `rect`.
    /// Returns `None` when unmounted or when the avatar has no size.
    pub fn pointer_move(
        &mut self,
        rect: &Rect,
        client_x: f64,
        client_y: f64,
    ) -> Option<AvatarTilt> {
        if !self.active {
            return None;
        }
        let percent = tilt_percent(rect, client_x, client_y)?;
        self.last = Some(percent);
        Some(tilt_for(percent))
    }
}

/// Fractional offset of the pointer from the rect centre, or `None` for an
/// empty rect.
pub fn tilt_percent(rect: &Rect, client_x: f64, client_y: f64) -> Option<TiltPercent> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let (cx, cy) = rect.center();
    Some(TiltPercent {
        x: (client_x - cx) / rect.width / 2.0,
        y: (client_y - cy) / rect.height / 2.0,
    })
}

pub fn tilt_for(p: TiltPercent) -> AvatarTilt {
    let dist_from_center = 1.0 - p.x.abs();
    AvatarTilt {
        avatar: TweenTarget::new()
            .rotation((ROTATION_GAIN * p.x).clamp(-MAX_ROTATION, MAX_ROTATION))
            .x((SHIFT_GAIN * p.x).clamp(-MAX_SHIFT, MAX_SHIFT))
            .y((SHIFT_GAIN * p.y).clamp(-MAX_SHIFT, MAX_SHIFT))
            .duration(TILT_DURATION)
            .ease(Ease::POWER3_OUT),
        highlight: TweenTarget::new()
            .opacity((dist_from_center - HIGHLIGHT_OFFSET).clamp(0.0, 1.0))
            .x(-HIGHLIGHT_TRAVEL / 2.0 + HIGHLIGHT_TRAVEL * p.x)
            .duration(TILT_DURATION)
            .ease(Ease::POWER3_OUT),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    const RECT: Rect = Rect {
        left: 100.0,
        top: 100.0,
        width: 200.0,
        height: 200.0,
    };

    #[test]
    fn test_centre_is_neutral() {
        let mut tracker = AvatarTracker::new();
        tracker.mount();
        let tilt = tracker.pointer_move(&RECT, 200.0, 200.0).unwrap();
        assert_eq!(tilt.avatar.rotation, Some(0.0));
        assert_eq!(tilt.avatar.x, Some(0.0));
        assert!((tilt.highlight.opacity.unwrap() - 0.3).abs() < 1e-9);
        assert_eq!(tilt.highlight.x, Some(-10.0));
    }

    #[test]
    fn test_far_pointer_is_clamped() {
        let tilt = tilt_for(tilt_percent(&RECT, 2000.0, -2000.0).unwrap());
        assert_eq!(tilt.avatar.rotation, Some(2.0));
        assert_eq!(tilt.avatar.x, Some(20.0));
        assert_eq!(tilt.avatar.y, Some(-20.0));
        assert_eq!(tilt.highlight.opacity, Some(0.0));
    }

    #[test]
    fn test_empty_rect_and_unmounted() {
        let mut tracker = AvatarTracker::new();
        assert!(tracker.pointer_move(&RECT, 0.0, 0.0).is_none());
        tracker.mount();
        assert!(tracker.pointer_move(&Rect::default(), 0.0, 0.0).is_none());
        tracker.unmount();
        assert!(tracker.last_percent().is_none());
    }
}
