//! Browser bindings (wasm32 only).
//!
//! Each exported view owns its listeners and its animation frame. Dropping
//! or destroying a view removes every listener it attached and cancels the
//! pending frame, so nothing fires after teardown.

mod avatar;
mod reveal;
mod scene;

pub use avatar::AvatarView;
pub use reveal::RevealView;
pub use scene::ScrollScene;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement};

use crate::error::{FolioError, Result};
use crate::motion::Style;
use crate::types::{Rect, ScrollOffset, ViewportSize};

pub(crate) fn dom_error(context: &str, err: &JsValue) -> FolioError {
    FolioError::Dom(format!("{context}: {err:?}"))
}

/// High-resolution timestamp in milliseconds.
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

pub(crate) fn window_scroll() -> ScrollOffset {
    ScrollOffset(
        web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0),
    )
}

pub(crate) fn window_size() -> Option<ViewportSize> {
    let window = web_sys::window()?;
    Some(ViewportSize {
        width: window.inner_width().ok()?.as_f64()?,
        height: window.inner_height().ok()?.as_f64()?,
    })
}

pub(crate) fn element_rect(element: &HtmlElement) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Write a resolved style to an element's inline style.
pub(crate) fn apply_style(element: &HtmlElement, style: &Style) {
    let css = element.style();
    let _ = css.set_property("transform", &style.transform());
    let _ = css.set_property("opacity", &format!("{:.4}", style.opacity));
    let _ = css.set_property("visibility", "visible");
}

/// One attached DOM listener. Removed from its target on drop.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| dom_error(event, &e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// `requestAnimationFrame` bookkeeping: at most one request outstanding.
#[derive(Default)]
pub(crate) struct FrameLoop {
    handle: Option<i32>,
    closure: Option<Closure<dyn FnMut(f64)>>,
    stopped: bool,
}

impl FrameLoop {
    /// Cancel the pending frame and refuse further requests.
    pub(crate) fn stop(&mut self) {
        self.stopped = true;
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        self.closure = None;
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Shared view state that renders on animation frames.
pub(crate) trait FrameDriven: Sized + 'static {
    fn frame_loop(&mut self) -> &mut FrameLoop;

    /// Called once per requested frame with the rAF timestamp (ms).
    fn on_frame(state: &Rc<RefCell<Self>>, now_ms: f64);
}

/// Ask for a frame unless one is already pending or the view is torn down.
pub(crate) fn request_frame<T: FrameDriven>(state: &Rc<RefCell<T>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut s = state.borrow_mut();
    let frames = s.frame_loop();
    if frames.stopped || frames.handle.is_some() {
        return;
    }
    if frames.closure.is_none() {
        let weak_state = Rc::downgrade(state);
        frames.closure = Some(Closure::wrap(Box::new(move |now: f64| {
            if let Some(state) = weak_state.upgrade() {
                state.borrow_mut().frame_loop().handle = None;
                T::on_frame(&state, now);
            }
        }) as Box<dyn FnMut(f64)>));
    }
    if let Some(callback) = frames.closure.as_ref() {
        frames.handle = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// Collect the `HtmlElement`s of a JS array, skipping anything else.
pub(crate) fn elements_of(array: &js_sys::Array) -> Vec<HtmlElement> {
    array
        .iter()
        .filter_map(|value| value.dyn_into::<HtmlElement>().ok())
        .collect()
}
