//! Motion primitives: easing, targets, frame batching and scroll-driven
//! bindings. Nothing here touches the DOM; the `web` module feeds these
//! from browser events.

mod batch;
mod ease;
pub mod presets;
mod scroll;
mod tween;

pub use batch::FrameBatch;
pub use ease::{Ease, EaseDir};
pub use scroll::{
    EntranceTrigger, ScrollBinding, ScrollObservable, ScrollTrigger, ScrubbedProgress,
    SubscriptionId,
};
pub use tween::{Animator, Style, TweenTarget};
