//! Motion layer tests
//!
//! Easing curves, frame batching, the animator, scroll observables and the
//! stock scroll timelines.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use folioview::motion::{
    presets, Animator, Ease, EaseDir, FrameBatch, ScrollObservable, ScrubbedProgress, Style,
    TweenTarget,
};
use folioview::reveal::Channel;
use folioview::ScrollOffset;
use test_case::test_case;

const EPS: f64 = 1e-9;

// =============================================================================
// EASING
// =============================================================================

#[test_case("none" ; "linear")]
#[test_case("power1.inOut" ; "power1 in out")]
#[test_case("power2.out" ; "power2 out")]
#[test_case("power3.in" ; "power3 in")]
#[test_case("back.out(2)" ; "back")]
#[test_case("elastic.out(1,0.3)" ; "elastic")]
fn test_ease_endpoints(name: &str) {
    let ease: Ease = name.parse().unwrap();
    assert!(ease.apply(0.0).abs() < EPS, "{name} at 0");
    assert!((ease.apply(1.0) - 1.0).abs() < EPS, "{name} at 1");
    assert_eq!(ease.to_string(), name);
}

#[test]
fn test_ease_clamps_input() {
    let ease = Ease::POWER3_OUT;
    assert_eq!(ease.apply(-3.0), ease.apply(0.0));
    assert_eq!(ease.apply(7.0), ease.apply(1.0));
}

#[test]
fn test_back_out_overshoots() {
    let ease = Ease::BackOut(2.0);
    let peak = (1..100)
        .map(|i| ease.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn test_power_out_is_monotonic() {
    for power in 1..=3u8 {
        let ease = Ease::Power(power, EaseDir::Out);
        let mut prev = 0.0;
        for i in 1..=50 {
            let v = ease.apply(f64::from(i) / 50.0);
            assert!(v >= prev, "power{power} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn test_unknown_ease_rejected() {
    assert!("bounce.out".parse::<Ease>().is_err());
    assert!("power2.sideways".parse::<Ease>().is_err());
    assert!("back.in(2)".parse::<Ease>().is_err());
}

#[test]
fn test_ease_css() {
    assert_eq!(Ease::Linear.css(), "linear");
    assert!(Ease::POWER3_OUT.css().starts_with("cubic-bezier("));
    assert!(Ease::elastic().css().starts_with("linear(0.0000"));
}

// =============================================================================
// FRAME BATCH
// =============================================================================

#[test]
fn test_batch_latest_wins_per_channel() {
    let mut batch = FrameBatch::new();
    assert!(batch.push(Channel::Position, TweenTarget::new().x(1.0)));
    assert!(!batch.push(Channel::Position, TweenTarget::new().x(2.0)));
    assert!(!batch.push(Channel::Fade, TweenTarget::new().opacity(1.0)));
    assert!(!batch.push(Channel::Position, TweenTarget::new().x(3.0)));

    let flushed = batch.flush();
    assert_eq!(flushed.len(), 2);
    assert_eq!(flushed[0].0, Channel::Position);
    assert_eq!(flushed[0].1.x, Some(3.0));
    assert_eq!(flushed[1].1.opacity, Some(1.0));
    assert!(batch.is_empty());
    assert!(batch.push(Channel::Fade, TweenTarget::new()));
}

// =============================================================================
// ANIMATOR
// =============================================================================

#[test]
fn test_animator_reaches_target() {
    let mut animator = Animator::new(Style::default());
    animator.retarget(&TweenTarget::new().x(100.0).duration(1.0), 0.0);
    let mid = animator.tick(0.5);
    assert!(mid.x > 0.0 && mid.x < 100.0);
    let end = animator.tick(1.0);
    assert_eq!(end.x, 100.0);
    assert!(animator.is_idle());
}

#[test]
fn test_animator_channels_are_independent() {
    let mut animator = Animator::new(Style::default());
    animator.retarget(&TweenTarget::new().opacity(0.0).duration(1.0), 0.0);
    animator.retarget(&TweenTarget::new().x(50.0).duration(0.0), 0.25);
    let style = animator.style();
    assert_eq!(style.x, 50.0);
    assert!(style.opacity < 1.0 && style.opacity > 0.0);
    assert!(!animator.is_idle());
}

#[test]
fn test_style_transform() {
    let style = Style::default().with(&TweenTarget::new().x(10.0).rotation(-3.0));
    assert_eq!(
        style.transform(),
        "translate3d(10.00px, 0.00px, 0) rotate(-3.000deg) scale(1.0000)"
    );
}

// =============================================================================
// SCROLL
// =============================================================================

#[test]
fn test_observable_subscribe_and_unsubscribe() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut observable = ScrollObservable::new();
    let sink = Rc::clone(&seen);
    let id = observable.subscribe(move |offset| sink.borrow_mut().push(offset.0));

    observable.publish(ScrollOffset(10.0));
    observable.publish(ScrollOffset(20.0));
    assert!(observable.unsubscribe(id));
    assert!(!observable.unsubscribe(id));
    observable.publish(ScrollOffset(30.0));

    assert_eq!(*seen.borrow(), vec![10.0, 20.0]);
    assert_eq!(observable.last(), Some(ScrollOffset(30.0)));
}

#[test]
fn test_late_subscriber_sees_last_offset() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut observable = ScrollObservable::new();
    observable.publish(ScrollOffset(42.0));
    let sink = Rc::clone(&seen);
    observable.subscribe(move |offset| sink.borrow_mut().push(offset.0));
    assert_eq!(*seen.borrow(), vec![42.0]);
    observable.clear();
    assert_eq!(observable.subscriber_count(), 0);
}

#[test]
fn test_scrub_converges() {
    let mut progress = ScrubbedProgress::new(Some(1.0));
    progress.set_target(1.0);
    let first = progress.advance(0.1);
    assert!(first > 0.0 && first < 1.0);
    for _ in 0..500 {
        progress.advance(0.1);
    }
    assert!(progress.is_settled());
    assert_eq!(progress.current(), 1.0);
}

#[test]
fn test_unscrubbed_progress_follows_immediately() {
    let mut progress = ScrubbedProgress::new(None);
    progress.set_target(0.6);
    assert_eq!(progress.current(), 0.6);
}

#[test_case(-20.0, 0.0 ; "before start")]
#[test_case(150.0, -200.0 ; "at end")]
#[test_case(5000.0, -200.0 ; "past end")]
fn test_navbar_links_slide(offset: f64, expected_y: f64) {
    let binding = presets::navbar_links();
    assert_eq!(binding.sample_at(ScrollOffset(offset)).y, Some(expected_y));
}

#[test]
fn test_navbar_bar_half_way() {
    let binding = presets::navbar_bar();
    let y = binding.sample_at(ScrollOffset(100.0)).y.unwrap();
    assert!((y - -87.5).abs() < EPS);
    assert_eq!(binding.trigger.scrub, Some(1.0));
}

#[test]
fn test_list_entrance_fires_once() {
    let (mut trigger, initial, target) = presets::list_item_entrance(1000.0, 800.0);
    assert!(!trigger.check(ScrollOffset(299.0)));
    assert!(trigger.check(ScrollOffset(300.0)));
    assert!(!trigger.check(ScrollOffset(900.0)));
    assert!(!trigger.check(ScrollOffset(0.0)));
    assert!(trigger.has_fired());
    assert_eq!(initial.y, Some(20.0));
    assert_eq!(target.ease, Ease::elastic());
}

#[test]
fn test_tech_row_jitter_range() {
    for jitter in [0.0, 0.25, 1.0, 3.0] {
        let row = presets::tech_row(2, 0.0, 100.0, 800.0, jitter, jitter);
        let from = row.from.x.unwrap();
        assert!((400.0..=600.0).contains(&from));
        assert_eq!(row.to.x, Some(-from));
    }
}
