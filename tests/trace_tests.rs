//! Trace replay tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use folioview::reveal::{parse_trace, replay, Channel, Lifecycle, TraceEvent};
use folioview::{FolioError, RevealConfig};

#[test]
fn test_explicit_mount_uses_its_scroll() {
    let events = parse_trace(
        r#"[{"type":"mount","scroll":300},{"type":"move","x":10,"y":20}]"#,
    )
    .unwrap();
    let result = replay(RevealConfig::default(), &events);
    assert_eq!(result.steps[0].update.unwrap().channel, Channel::Fade);
    assert_eq!(result.final_state.pointer.y, 320.0);
}

#[test]
fn test_events_after_unmount_are_inert() {
    let events = [
        TraceEvent::Move { x: 5.0, y: 5.0 },
        TraceEvent::Unmount,
        TraceEvent::Move { x: 50.0, y: 50.0 },
        TraceEvent::Enter { index: 0 },
    ];
    let result = replay(RevealConfig::default(), &events);
    assert!(result.steps[2].update.is_none());
    assert!(result.steps[3].update.is_none());
    assert_eq!(result.final_state.pointer.x, 5.0);
    assert!(!result.final_state.hovering);
    assert_eq!(result.final_state.lifecycle, Lifecycle::Unmounted);
}

#[test]
fn test_resize_changes_preview_clamp() {
    let config = RevealConfig::from_json(r#"{"policy":{"kind":"imagePreview"}}"#).unwrap();
    let events = [
        TraceEvent::Resize {
            width: 600.0,
            height: 800.0,
        },
        TraceEvent::Move { x: 580.0, y: 100.0 },
    ];
    let result = replay(config, &events);
    assert!(result.steps[0].update.is_none());
    assert_eq!(result.steps[1].update.unwrap().target.x, Some(350.0));
}

#[test]
fn test_replay_serializes_camel_case() {
    let events = parse_trace(r#"[{"type":"enter","index":1}]"#).unwrap();
    let json = serde_json::to_string(&replay(RevealConfig::default(), &events)).unwrap();
    assert!(json.contains(r#""finalState""#));
    assert!(json.contains(r#""activeIndex":1"#));
}

#[test]
fn test_unknown_event_is_error() {
    let err = parse_trace(r#"[{"type":"wheel"}]"#).unwrap_err();
    assert!(matches!(err, FolioError::Json(_)));
}

#[test]
fn test_first_preview_move_has_unsigned_zero_lean() {
    let config = RevealConfig::from_json(r#"{"policy":{"kind":"imagePreview"}}"#).unwrap();
    let events = parse_trace(r#"[{"type":"move","x":400,"y":300}]"#).unwrap();
    let json = serde_json::to_string(&replay(config, &events)).unwrap();
    assert!(json.contains(r#""rotation":0.0"#), "{json}");
    assert!(!json.contains("-0.0"), "{json}");
}
