//! Recorded event traces, replayed through a controller offline.

use serde::{Deserialize, Serialize};

use super::{RevealController, RevealSnapshot, RevealUpdate};
use crate::config::RevealConfig;
use crate::error::Result;
use crate::types::{ScrollOffset, ViewportSize};

/// One recorded host event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TraceEvent {
    Mount { scroll: f64 },
    Move { x: f64, y: f64 },
    Scroll { offset: f64 },
    Enter { index: usize },
    Leave,
    Resize { width: f64, height: f64 },
    Unmount,
}

/// What one event produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceStep {
    pub event: TraceEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<RevealUpdate>,
    pub state: RevealSnapshot,
}

/// Full replay output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replay {
    pub steps: Vec<TraceStep>,
    pub final_state: RevealSnapshot,
}

pub fn parse_trace(json: &str) -> Result<Vec<TraceEvent>> {
    Ok(serde_json::from_str(json)?)
}

impl RevealController {
    /// Apply one recorded event.
    pub fn apply(&mut self, event: TraceEvent) -> Option<RevealUpdate> {
        match event {
            TraceEvent::Mount { scroll } => self.mount(ScrollOffset(scroll)),
            TraceEvent::Move { x, y } => self.pointer_move(x, y),
            TraceEvent::Scroll { offset } => self.scroll(ScrollOffset(offset)),
            TraceEvent::Enter { index } => self.hover_enter(index),
            TraceEvent::Leave => self.hover_leave(),
            TraceEvent::Resize { width, height } => {
                self.set_viewport(ViewportSize { width, height });
                None
            }
            TraceEvent::Unmount => {
                self.unmount();
                None
            }
        }
    }
}

/// Replay `events` through a fresh controller. A trace that does not start
/// with `mount` is mounted at scroll offset zero first.
pub fn replay(config: RevealConfig, events: &[TraceEvent]) -> Replay {
    let mut controller = RevealController::new(config);
    if !matches!(events.first(), Some(TraceEvent::Mount { .. })) {
        controller.mount(ScrollOffset(0.0));
    }
    let steps = events
        .iter()
        .map(|&event| {
            let update = controller.apply(event);
            TraceStep {
                event,
                update,
                state: controller.snapshot(),
            }
        })
        .collect();
    tracing::debug!(events = events.len(), "trace replayed");
    Replay {
        steps,
        final_state: controller.snapshot(),
    }
}
