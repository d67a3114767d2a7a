use serde::{Deserialize, Serialize};

/// Latest known pointer position in page coordinates
/// (client coordinates plus vertical scroll offset).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

impl PointerState {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a page-space position from client coordinates and the current scroll offset.
    pub fn from_client(client_x: f64, client_y: f64, scroll: ScrollOffset) -> Self {
        Self {
            x: client_x,
            y: client_y + scroll.0,
        }
    }

    /// Horizontal distance travelled since `previous`.
    pub fn dx_since(&self, previous: &PointerState) -> f64 {
        self.x - previous.x
    }
}

/// Last observed vertical scroll position of the page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ScrollOffset(pub f64);

impl ScrollOffset {
    /// Signed distance from `self` to `next`.
    pub fn delta_to(self, next: ScrollOffset) -> f64 {
        next.0 - self.0
    }
}

/// Hover state over a tracked item collection.
///
/// `active_index` is the only stored field so "hovering iff an index is
/// active" holds by construction.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoverState {
    active_index: Option<usize>,
}

impl HoverState {
    pub fn is_hovering(&self) -> bool {
        self.active_index.is_some()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub(crate) fn enter(&mut self, index: usize) {
        self.active_index = Some(index);
    }

    pub(crate) fn leave(&mut self) {
        self.active_index = None;
    }
}

/// Axis-aligned rectangle in client coordinates (a `getBoundingClientRect` snapshot).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Visible window size in CSS pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}
