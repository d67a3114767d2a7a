//! The site's stock timelines: navbar collapse, tech-row marquee, list
//! entrances and the hero/avatar intros.

use super::ease::Ease;
use super::scroll::{EntranceTrigger, ScrollBinding, ScrollTrigger};
use super::tween::TweenTarget;

/// Navbar link slide-out while the page scrolls past the header.
pub fn navbar_links() -> ScrollBinding {
    ScrollBinding::new(
        ScrollTrigger::between(-20.0, 150.0).scrub(1.5),
        TweenTarget::new().y(0.0),
        TweenTarget::new().y(-200.0),
        Ease::POWER2_IN_OUT,
    )
}

/// Navbar bar lift that follows the link slide.
pub fn navbar_bar() -> ScrollBinding {
    ScrollBinding::new(
        ScrollTrigger::between(50.0, 150.0).scrub(1.0),
        TweenTarget::new().y(0.0),
        TweenTarget::new().y(-100.0),
        Ease::POWER2_OUT,
    )
}

/// Marquee offset magnitude for a row, `jitter` in `[0, 1]` picking a
/// value between 400 and 600 pixels.
fn marquee_magnitude(jitter: f64) -> f64 {
    400.0 + 200.0 * jitter.clamp(0.0, 1.0)
}

/// Horizontal drift for tech row `index` across the section's time on screen.
/// Even rows travel right to left, odd rows left to right.
pub fn tech_row(
    index: usize,
    section_top: f64,
    section_height: f64,
    viewport_height: f64,
    jitter_from: f64,
    jitter_to: f64,
) -> ScrollBinding {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
    ScrollBinding::new(
        ScrollTrigger::across_viewport(section_top, section_height, viewport_height).scrub(4.0),
        TweenTarget::new().x(sign * marquee_magnitude(jitter_from)),
        TweenTarget::new().x(-sign * marquee_magnitude(jitter_to)),
        Ease::POWER1_IN_OUT,
    )
}

/// Content list item entrance: pixels above the viewport bottom at which
/// the item starts to rise in.
pub const LIST_ENTRANCE_INSET: f64 = 100.0;

/// Entrance trigger and the (initial, final) targets for a list item.
pub fn list_item_entrance(
    item_top: f64,
    viewport_height: f64,
) -> (EntranceTrigger, TweenTarget, TweenTarget) {
    (
        EntranceTrigger::new(item_top, viewport_height, LIST_ENTRANCE_INSET),
        TweenTarget::new().opacity(0.0).y(20.0),
        TweenTarget::new()
            .opacity(1.0)
            .y(0.0)
            .duration(1.3)
            .ease(Ease::elastic()),
    )
}

/// Avatar intro: (initial, final).
pub fn avatar_intro() -> (TweenTarget, TweenTarget) {
    (
        TweenTarget::new().opacity(0.0).scale(1.4),
        TweenTarget::new()
            .opacity(1.0)
            .scale(1.0)
            .duration(1.0)
            .ease(Ease::POWER3_IN_OUT),
    )
}

/// A target that starts `delay` seconds into a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub delay: f64,
    pub from: TweenTarget,
    pub to: TweenTarget,
}

/// Name intro: the split characters swing in one by one in random order,
/// then the job title drops in halfway through.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroIntro {
    /// One cue per character, in document order.
    pub chars: Vec<Cue>,
    pub job_title: Cue,
}

const HERO_CHAR_DELAY: f64 = 0.2;
const HERO_CHAR_DURATION: f64 = 1.0;
const HERO_CHAR_STAGGER: f64 = 0.1;
const HERO_TITLE_DURATION: f64 = 0.5;

impl HeroIntro {
    /// Seconds until the last cue settles.
    pub fn total_duration(&self) -> f64 {
        self.chars
            .iter()
            .chain(std::iter::once(&self.job_title))
            .map(|cue| cue.delay + cue.to.duration)
            .fold(0.0, f64::max)
    }
}

/// Hero intro for `char_count` characters. `random` supplies one value per
/// character; characters are staggered in ascending order of those values.
pub fn hero_intro(char_count: usize, mut random: impl FnMut() -> f64) -> HeroIntro {
    let mut order: Vec<(usize, f64)> = (0..char_count).map(|i| (i, random())).collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mut slots = vec![0usize; char_count];
    for (slot, (char_index, _)) in order.into_iter().enumerate() {
        if let Some(entry) = slots.get_mut(char_index) {
            *entry = slot;
        }
    }

    let char_from = TweenTarget::new().x(-100.0).opacity(0.0).rotation(-10.0);
    let char_to = TweenTarget::new()
        .x(0.0)
        .opacity(1.0)
        .rotation(0.0)
        .duration(HERO_CHAR_DURATION)
        .ease(Ease::elastic());
    let chars = slots
        .into_iter()
        .map(|slot| Cue {
            delay: HERO_CHAR_DELAY + HERO_CHAR_STAGGER * slot as f64,
            from: char_from,
            to: char_to,
        })
        .collect();

    // Starts when half of the staggered character tween has played.
    let stagger_span = HERO_CHAR_STAGGER * char_count.saturating_sub(1) as f64;
    let job_title = Cue {
        delay: HERO_CHAR_DELAY + (stagger_span + HERO_CHAR_DURATION) / 2.0,
        from: TweenTarget::new().y(-20.0).opacity(0.0).scale(1.0),
        to: TweenTarget::new()
            .y(0.0)
            .opacity(1.0)
            .scale(1.0)
            .duration(HERO_TITLE_DURATION)
            .ease(Ease::POWER1_OUT),
    };

    HeroIntro { chars, job_title }
}
