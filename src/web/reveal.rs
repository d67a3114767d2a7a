//! `RevealView`: the pointer-reveal controller wired to a list and its
//! floating element.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, MouseEvent, Node};

use super::{
    apply_style, dom_error, now_ms, request_frame, window_scroll, window_size, FrameDriven,
    FrameLoop, Listener,
};
use crate::config::RevealConfig;
use crate::content::ContentList;
use crate::error::{FolioError, Result};
use crate::motion::{Animator, FrameBatch, Style};
use crate::reveal::{preload_sources, Channel, RevealController, RevealUpdate};

pub(crate) struct RevealShared {
    controller: RevealController,
    batch: FrameBatch<Channel>,
    animator: Animator,
    frames: FrameLoop,
    reveal: HtmlElement,
    content: Option<ContentList>,
    animation_callback: Option<Function>,
    shown_preview: Option<String>,
}

impl FrameDriven for RevealShared {
    fn frame_loop(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }

    fn on_frame(state: &Rc<RefCell<Self>>, now_ms: f64) {
        let (callback, updates) = {
            let mut s = state.borrow_mut();
            (s.animation_callback.clone(), s.batch.flush())
        };

        if let Some(callback) = callback {
            for (channel, target) in updates {
                let update = RevealUpdate { channel, target };
                match serde_wasm_bindgen::to_value(&update) {
                    Ok(value) => {
                        if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                            tracing::warn!(error = ?e, "animation callback threw");
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "could not serialize reveal update"),
                }
            }
            return;
        }

        let keep_running = {
            let mut s = state.borrow_mut();
            let now = now_ms / 1000.0;
            for (_, target) in &updates {
                s.animator.retarget(target, now);
            }
            let style = s.animator.tick(now);
            apply_style(&s.reveal, &style);
            !s.animator.is_idle()
        };
        if keep_running {
            request_frame(state);
        }
    }
}

impl RevealShared {
    fn push(&mut self, update: Option<RevealUpdate>) -> bool {
        match update {
            Some(update) => {
                self.batch.push(update.channel, update.target);
                true
            }
            None => false,
        }
    }

    /// Swap the preview background when the hovered item changes.
    fn sync_preview(&mut self) {
        let wanted = self
            .content
            .as_ref()
            .and_then(|content| self.controller.active_preview(content));
        if wanted.is_none() || wanted == self.shown_preview {
            return;
        }
        if let Some(url) = wanted.as_deref() {
            let _ = self
                .reveal
                .style()
                .set_property("background-image", &format!("url(\"{url}\")"));
        }
        self.shown_preview = wanted;
    }
}

/// Pointer-following reveal element over a content list.
#[wasm_bindgen]
pub struct RevealView {
    state: Rc<RefCell<RevealShared>>,
    listeners: Vec<Listener>,
}

fn internal_pointer_move(state: &Rc<RefCell<RevealShared>>, client_x: f64, client_y: f64) {
    let pushed = {
        let mut s = state.borrow_mut();
        let update = s.controller.pointer_move(client_x, client_y);
        s.push(update)
    };
    if pushed {
        request_frame(state);
    }
}

fn internal_scroll(state: &Rc<RefCell<RevealShared>>) {
    let pushed = {
        let mut s = state.borrow_mut();
        let update = s.controller.scroll(window_scroll());
        s.push(update)
    };
    if pushed {
        request_frame(state);
    }
}

fn internal_hover_enter(state: &Rc<RefCell<RevealShared>>, index: usize) {
    let pushed = {
        let mut s = state.borrow_mut();
        let update = s.controller.hover_enter(index);
        s.sync_preview();
        s.push(update)
    };
    if pushed {
        request_frame(state);
    }
}

fn internal_hover_leave(state: &Rc<RefCell<RevealShared>>) {
    let pushed = {
        let mut s = state.borrow_mut();
        let update = s.controller.hover_leave();
        s.push(update)
    };
    if pushed {
        request_frame(state);
    }
}

/// Item index under an event target inside `list`: the nearest
/// `data-index` attribute, else the position of the list child containing it.
fn item_index(list: &HtmlElement, target: &Element) -> Option<usize> {
    if let Ok(Some(tagged)) = target.closest("[data-index]") {
        let node: &Node = &tagged;
        if list.contains(Some(node)) && !list.is_same_node(Some(node)) {
            if let Some(index) = tagged
                .get_attribute("data-index")
                .and_then(|raw| raw.trim().parse::<usize>().ok())
            {
                return Some(index);
            }
        }
    }

    let mut child = target.clone();
    loop {
        let parent = child.parent_element()?;
        let node: &Node = &parent;
        if list.is_same_node(Some(node)) {
            break;
        }
        child = parent;
    }
    let child: &Node = &child;
    let children = list.children();
    (0..children.length())
        .position(|i| children.item(i).is_some_and(|c| c.is_same_node(Some(child))))
}

impl RevealView {
    fn attach_listeners(&mut self, list: &HtmlElement) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| FolioError::Dom("no window".into()))?;

        {
            let state = Rc::clone(&self.state);
            self.listeners.push(Listener::attach(&window, "mousemove", true, move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    internal_pointer_move(
                        &state,
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                    );
                }
            })?);
        }

        {
            let state = Rc::clone(&self.state);
            self.listeners.push(Listener::attach(&window, "scroll", true, move |_event: Event| {
                internal_scroll(&state);
            })?);
        }

        {
            let state = Rc::clone(&self.state);
            self.listeners.push(Listener::attach(&window, "resize", true, move |_event: Event| {
                if let Some(size) = window_size() {
                    state.borrow_mut().controller.set_viewport(size);
                }
            })?);
        }

        {
            let state = Rc::clone(&self.state);
            self.listeners.push(Listener::attach(list, "mouseleave", true, move |_event: Event| {
                internal_hover_leave(&state);
            })?);
        }

        {
            let state = Rc::clone(&self.state);
            let owner = list.clone();
            self.listeners.push(Listener::attach(list, "mouseover", true, move |event: Event| {
                let index = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|target| item_index(&owner, &target));
                if let Some(index) = index {
                    internal_hover_enter(&state, index);
                }
            })?);
        }
        Ok(())
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state.borrow().controller.is_mounted() {
            Ok(())
        } else {
            Err(FolioError::Detached)
        }
    }

    fn teardown(&mut self) {
        self.listeners.clear();
        let mut s = self.state.borrow_mut();
        s.controller.unmount();
        s.batch.clear();
        s.frames.stop();
        s.animation_callback = None;
    }
}

#[wasm_bindgen]
impl RevealView {
    /// Mount a reveal element over `list`.
    ///
    /// `config` is an optional plain object matching `RevealConfig`
    /// (camelCase); missing fields take the site defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        list: HtmlElement,
        reveal: HtmlElement,
        config: JsValue,
    ) -> std::result::Result<RevealView, JsValue> {
        console_error_panic_hook::set_once();

        let mut config: RevealConfig = if config.is_undefined() || config.is_null() {
            RevealConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| FolioError::Config(e.to_string()))?
        };
        if let Some(size) = window_size() {
            config.viewport = size;
        }
        config.validate()?;

        let mut controller = RevealController::new(config);
        let mut batch = FrameBatch::new();
        if let Some(initial) = controller.mount(window_scroll()) {
            batch.push(initial.channel, initial.target);
        }

        let state = Rc::new(RefCell::new(RevealShared {
            controller,
            batch,
            animator: Animator::new(Style::default()),
            frames: FrameLoop::default(),
            reveal,
            content: None,
            animation_callback: None,
            shown_preview: None,
        }));

        let mut view = RevealView {
            state,
            listeners: Vec::new(),
        };
        view.attach_listeners(&list)?;
        request_frame(&view.state);
        tracing::info!(listeners = view.listeners.len(), "reveal view mounted");
        Ok(view)
    }

    /// Provide the list content (used for preview images).
    #[wasm_bindgen(js_name = "setContent")]
    pub fn set_content(&mut self, content: JsValue) -> std::result::Result<(), JsValue> {
        self.ensure_live()?;
        let content: ContentList = serde_wasm_bindgen::from_value(content)
            .map_err(|e| FolioError::Config(e.to_string()))?;
        let sources = preload_sources(self.state.borrow().controller.config(), &content);
        preload_images(sources);
        self.state.borrow_mut().content = Some(content);
        Ok(())
    }

    /// Forward targets to `callback` instead of animating the element here.
    /// Pass `undefined` to go back to built-in animation.
    #[wasm_bindgen(js_name = "setAnimationCallback")]
    pub fn set_animation_callback(
        &mut self,
        callback: Option<Function>,
    ) -> std::result::Result<(), JsValue> {
        self.ensure_live()?;
        self.state.borrow_mut().animation_callback = callback;
        Ok(())
    }

    /// Host-driven hover, for lists rendered outside the mounted element.
    #[wasm_bindgen(js_name = "hoverEnter")]
    pub fn hover_enter(&mut self, index: u32) -> std::result::Result<(), JsValue> {
        self.ensure_live()?;
        let index = usize::try_from(index).map_err(|e| FolioError::Other(e.to_string()))?;
        if let Some(content) = self.state.borrow().content.as_ref() {
            let len = content.items.len();
            if index >= len {
                return Err(FolioError::IndexOutOfRange { index, len }.into());
            }
        }
        internal_hover_enter(&self.state, index);
        Ok(())
    }

    #[wasm_bindgen(js_name = "hoverLeave")]
    pub fn hover_leave(&mut self) -> std::result::Result<(), JsValue> {
        self.ensure_live()?;
        internal_hover_leave(&self.state);
        Ok(())
    }

    /// Current pointer/scroll/hover state.
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        let snapshot = self.state.borrow().controller.snapshot();
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Detach every listener and cancel pending animation.
    pub fn destroy(&mut self) {
        self.teardown();
        tracing::info!("reveal view destroyed");
    }
}

impl Drop for RevealView {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Start loading preview images so the first hover shows them at once.
fn preload_images(sources: Vec<Option<String>>) {
    let urls: Vec<String> = sources.into_iter().flatten().collect();
    if urls.is_empty() {
        return;
    }
    tracing::debug!(count = urls.len(), "preloading preview images");
    for url in urls {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = ?dom_error("image", &e), "preload skipped");
                return;
            }
        };
        image.set_src(&url);
        spawn_local(async move {
            if let Err(e) = JsFuture::from(image.decode()).await {
                tracing::warn!(%url, error = ?e, "preview image failed to decode");
            }
        });
    }
}
