//! `AvatarView`: pointer tilt for the biography avatar.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent};

use super::{apply_style, element_rect, now_ms, request_frame, FrameDriven, FrameLoop, Listener};
use crate::avatar::{AvatarPart, AvatarTracker};
use crate::error::FolioError;
use crate::motion::{Animator, FrameBatch, Style};

pub(crate) struct AvatarShared {
    tracker: AvatarTracker,
    batch: FrameBatch<AvatarPart>,
    avatar_anim: Animator,
    highlight_anim: Animator,
    frames: FrameLoop,
    container: HtmlElement,
    avatar: HtmlElement,
    highlight: Option<HtmlElement>,
}

impl FrameDriven for AvatarShared {
    fn frame_loop(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }

    fn on_frame(state: &Rc<RefCell<Self>>, now_ms: f64) {
        let keep_running = {
            let mut s = state.borrow_mut();
            let now = now_ms / 1000.0;
            for (part, target) in s.batch.flush() {
                match part {
                    AvatarPart::Avatar => s.avatar_anim.retarget(&target, now),
                    AvatarPart::Highlight => s.highlight_anim.retarget(&target, now),
                }
            }
            let avatar_style = s.avatar_anim.tick(now);
            apply_style(&s.avatar, &avatar_style);
            let highlight_style = s.highlight_anim.tick(now);
            if let Some(highlight) = s.highlight.as_ref() {
                apply_style(highlight, &highlight_style);
            }
            !(s.avatar_anim.is_idle() && s.highlight_anim.is_idle())
        };
        if keep_running {
            request_frame(state);
        }
    }
}

fn internal_pointer_move(state: &Rc<RefCell<AvatarShared>>, client_x: f64, client_y: f64) {
    let pushed = {
        let mut s = state.borrow_mut();
        let rect = element_rect(&s.container);
        match s.tracker.pointer_move(&rect, client_x, client_y) {
            Some(tilt) => {
                s.batch.push(AvatarPart::Avatar, tilt.avatar);
                s.batch.push(AvatarPart::Highlight, tilt.highlight);
                true
            }
            None => false,
        }
    };
    if pushed {
        request_frame(state);
    }
}

/// Avatar that leans toward the pointer, with a sliding glare highlight.
#[wasm_bindgen]
pub struct AvatarView {
    state: Rc<RefCell<AvatarShared>>,
    listeners: Vec<Listener>,
}

impl AvatarView {
    fn teardown(&mut self) {
        self.listeners.clear();
        let mut s = self.state.borrow_mut();
        s.tracker.unmount();
        s.batch.clear();
        s.frames.stop();
    }
}

#[wasm_bindgen]
impl AvatarView {
    /// Track the pointer over `container`, tilting `avatar` and sliding
    /// the optional `highlight`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        avatar: HtmlElement,
        highlight: Option<HtmlElement>,
    ) -> Result<AvatarView, JsValue> {
        console_error_panic_hook::set_once();

        let mut tracker = AvatarTracker::new();
        let (initial, intro) = tracker.mount();
        let mut avatar_anim = Animator::new(Style::default().with(&initial));
        avatar_anim.retarget(&intro, now_ms() / 1000.0);
        apply_style(&avatar, &avatar_anim.style());

        let state = Rc::new(RefCell::new(AvatarShared {
            tracker,
            batch: FrameBatch::new(),
            avatar_anim,
            highlight_anim: Animator::new(Style {
                opacity: 0.0,
                ..Style::default()
            }),
            frames: FrameLoop::default(),
            container,
            avatar,
            highlight,
        }));

        let window = web_sys::window().ok_or_else(|| FolioError::Dom("no window".into()))?;
        let move_state = Rc::clone(&state);
        let listener = Listener::attach(&window, "mousemove", true, move |event: Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                internal_pointer_move(
                    &move_state,
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                );
            }
        })?;

        request_frame(&state);
        Ok(AvatarView {
            state,
            listeners: vec![listener],
        })
    }

    /// Detach the pointer listener and stop animating.
    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl Drop for AvatarView {
    fn drop(&mut self) {
        self.teardown();
    }
}
