//! Pointer-reveal controller.
//!
//! Keeps the floating "Explore" badge (or image preview) under the cursor
//! while the pointer is over a content list:
//! - pointer moves are recorded in page coordinates,
//! - scrolling without pointer motion shifts the stored position by the
//!   scroll delta so the element stays put relative to the content,
//! - entering/leaving list items fades the element in and out.
//!
//! The controller is plain state: each operation returns the target the
//! animation layer should play, and the `web` module owns the listeners.

mod policy;
mod trace;

use serde::{Deserialize, Serialize};

use crate::config::{RevealConfig, RevealPolicy};
use crate::content::ContentList;
use crate::motion::TweenTarget;
use crate::types::{HoverState, PointerState, ScrollOffset, ViewportSize};

pub use trace::{parse_trace, replay, Replay, TraceEvent, TraceStep};

/// Where the controller is in its mount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Lifecycle {
    #[default]
    Created,
    Mounted,
    Unmounted,
}

/// Independent animation channels of the floating element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    /// Translation (and lean, for image previews).
    Position,
    /// Opacity and scale.
    Fade,
}

/// One target for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealUpdate {
    pub channel: Channel,
    pub target: TweenTarget,
}

/// Snapshot of controller state, mostly for hosts and traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealSnapshot {
    pub pointer: PointerState,
    pub scroll: ScrollOffset,
    pub hovering: bool,
    pub active_index: Option<usize>,
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone)]
pub struct RevealController {
    config: RevealConfig,
    pointer: PointerState,
    /// Pointer at the previous move event, for the preview lean.
    last_move: Option<PointerState>,
    scroll: ScrollOffset,
    hover: HoverState,
    lifecycle: Lifecycle,
}

impl RevealController {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            pointer: PointerState::default(),
            last_move: None,
            scroll: ScrollOffset::default(),
            hover: HoverState::default(),
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn is_hovering(&self) -> bool {
        self.hover.is_hovering()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.hover.active_index()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            pointer: self.pointer,
            scroll: self.scroll,
            hovering: self.is_hovering(),
            active_index: self.active_index(),
            lifecycle: self.lifecycle,
        }
    }

    /// Start tracking. Captures the initial scroll offset and returns the
    /// hidden state the element should start in.
    pub fn mount(&mut self, initial_scroll: ScrollOffset) -> Option<RevealUpdate> {
        if self.lifecycle != Lifecycle::Created {
            return None;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.scroll = initial_scroll;
        tracing::debug!(scroll = initial_scroll.0, "reveal controller mounted");
        Some(RevealUpdate {
            channel: Channel::Fade,
            target: self.fade_target(false).duration(0.0),
        })
    }

    /// Stop tracking. Hover state is dropped and every later call is ignored.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.hover.leave();
        self.last_move = None;
        tracing::debug!("reveal controller unmounted");
    }

    /// Resize notification from the host.
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        if self.is_mounted() {
            self.config.viewport = viewport;
        }
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Option<RevealUpdate> {
        if !self.is_mounted() {
            return None;
        }
        self.pointer = PointerState::from_client(client_x, client_y, self.scroll);
        let target = self.config.policy.position_target(
            &self.pointer,
            Some(self.last_move.as_ref().unwrap_or(&self.pointer)),
            self.scroll,
            self.config.viewport,
        );
        self.last_move = Some(self.pointer);
        Some(RevealUpdate {
            channel: Channel::Position,
            target,
        })
    }

    pub fn scroll(&mut self, offset: ScrollOffset) -> Option<RevealUpdate> {
        if !self.is_mounted() {
            return None;
        }
        let delta = self.scroll.delta_to(offset);
        self.scroll = offset;
        self.pointer.y += delta;
        if let Some(last) = self.last_move.as_mut() {
            last.y += delta;
        }
        let target = self.config.policy.position_target(
            &self.pointer,
            None,
            self.scroll,
            self.config.viewport,
        );
        Some(RevealUpdate {
            channel: Channel::Position,
            target,
        })
    }

    /// Pointer entered item `index`. Fades in when not already showing.
    pub fn hover_enter(&mut self, index: usize) -> Option<RevealUpdate> {
        if !self.is_mounted() {
            return None;
        }
        let was_hovering = self.hover.is_hovering();
        self.hover.enter(index);
        if was_hovering {
            return None;
        }
        Some(RevealUpdate {
            channel: Channel::Fade,
            target: self.fade_target(true),
        })
    }

    /// Pointer left the list. Fades out when showing.
    pub fn hover_leave(&mut self) -> Option<RevealUpdate> {
        if !self.is_mounted() || !self.hover.is_hovering() {
            return None;
        }
        self.hover.leave();
        Some(RevealUpdate {
            channel: Channel::Fade,
            target: self.fade_target(false),
        })
    }

    /// Preview URL for the hovered item, when the policy shows images.
    pub fn active_preview(&self, content: &ContentList) -> Option<String> {
        let RevealPolicy::ImagePreview(preview) = &self.config.policy else {
            return None;
        };
        let item = content.item(self.active_index()?)?;
        content
            .preview_image(item)
            .map(|img| img.src(&preview.image_params()))
    }

    fn fade_target(&self, visible: bool) -> TweenTarget {
        let fade = &self.config.fade;
        TweenTarget::new()
            .opacity(if visible { 1.0 } else { 0.0 })
            .scale(if visible { 1.0 } else { fade.hidden_scale })
            .duration(fade.duration)
            .ease(fade.ease)
    }
}

/// Preview URLs to load ahead of hovering, indexed like the list items.
pub fn preload_sources(config: &RevealConfig, content: &ContentList) -> Vec<Option<String>> {
    match &config.policy {
        RevealPolicy::ImagePreview(preview) => content.preview_sources(&preview.image_params()),
        RevealPolicy::Badge(_) => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mounted() -> RevealController {
        let mut c = RevealController::new(RevealConfig::default());
        c.mount(ScrollOffset(0.0));
        c
    }

    #[test]
    fn test_pointer_starts_at_origin() {
        let c = RevealController::new(RevealConfig::default());
        assert_eq!(c.pointer(), PointerState::new(0.0, 0.0));
        assert_eq!(c.lifecycle(), Lifecycle::Created);
    }

    #[test]
    fn test_ignored_before_mount() {
        let mut c = RevealController::new(RevealConfig::default());
        assert!(c.pointer_move(10.0, 10.0).is_none());
        assert!(c.hover_enter(0).is_none());
        assert_eq!(c.pointer(), PointerState::default());
    }

    #[test]
    fn test_mount_starts_hidden() {
        let mut c = RevealController::new(RevealConfig::default());
        let update = c.mount(ScrollOffset(120.0)).unwrap();
        assert_eq!(update.channel, Channel::Fade);
        assert_eq!(update.target.opacity, Some(0.0));
        assert_eq!(update.target.duration, 0.0);
        assert_eq!(c.scroll_offset(), ScrollOffset(120.0));
        assert!(c.mount(ScrollOffset(0.0)).is_none());
    }

    #[test]
    fn test_move_adds_scroll() {
        let mut c = RevealController::new(RevealConfig::default());
        c.mount(ScrollOffset(300.0));
        let update = c.pointer_move(100.0, 200.0).unwrap();
        assert_eq!(c.pointer(), PointerState::new(100.0, 500.0));
        assert_eq!(update.target.x, Some(55.0));
        assert_eq!(update.target.y, Some(445.0));
    }

    #[test]
    fn test_reenter_does_not_refade() {
        let mut c = mounted();
        assert!(c.hover_enter(0).is_some());
        assert!(c.hover_enter(1).is_none());
        assert_eq!(c.active_index(), Some(1));
    }

    #[test]
    fn test_leave_without_hover_is_noop() {
        let mut c = mounted();
        assert!(c.hover_leave().is_none());
    }

    #[test]
    fn test_scroll_shifts_lean_reference() {
        let mut c = RevealController::new(RevealConfig {
            policy: RevealPolicy::ImagePreview(Default::default()),
            ..RevealConfig::default()
        });
        c.mount(ScrollOffset(0.0));
        c.pointer_move(400.0, 300.0);
        c.scroll(ScrollOffset(80.0));
        // Same client position after the scroll: no horizontal travel, no lean.
        let update = c.pointer_move(400.0, 300.0).unwrap();
        assert_eq!(update.target.rotation, Some(0.0));
    }

    #[test]
    fn test_unmount_clears_hover() {
        let mut c = mounted();
        c.hover_enter(3);
        c.unmount();
        assert!(!c.is_hovering());
        assert_eq!(c.active_index(), None);
        assert!(c.scroll(ScrollOffset(10.0)).is_none());
    }
}
