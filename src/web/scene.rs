//! `ScrollScene`: scroll-scrubbed timelines (navbar collapse, tech-row
//! marquee), one-shot list entrances and the hero intro.
//!
//! Window scroll events are published on a [`ScrollObservable`]; each
//! binding subscribes and only records its target progress. Frames then
//! ease every track toward its target and write styles.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement};

use super::{
    apply_style, element_rect, elements_of, now_ms, request_frame, window_scroll, window_size,
    FrameDriven, FrameLoop, Listener,
};
use crate::error::FolioError;
use crate::motion::presets::Cue;
use crate::motion::{
    presets, Animator, EntranceTrigger, ScrollBinding, ScrollObservable, ScrubbedProgress, Style,
    TweenTarget,
};
use crate::types::{ScrollOffset, ViewportSize};

enum TrackKind {
    Scrub {
        binding: ScrollBinding,
        progress: ScrubbedProgress,
    },
    Entrance {
        trigger: EntranceTrigger,
        target: TweenTarget,
        pending: bool,
    },
    /// Plays `target` once, `delay` seconds after the first frame.
    Timed {
        delay: f64,
        target: TweenTarget,
        started_at: Option<f64>,
        done: bool,
    },
}

struct Track {
    element: HtmlElement,
    kind: TrackKind,
    animator: Animator,
}

type Tracks = Rc<RefCell<Vec<Track>>>;

pub(crate) struct SceneShared {
    observable: ScrollObservable,
    tracks: Tracks,
    frames: FrameLoop,
    last_frame_ms: Option<f64>,
}

impl FrameDriven for SceneShared {
    fn frame_loop(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }

    fn on_frame(state: &Rc<RefCell<Self>>, now_ms: f64) {
        let keep_running = {
            let mut s = state.borrow_mut();
            let dt = s
                .last_frame_ms
                .map_or(0.0, |last| ((now_ms - last) / 1000.0).max(0.0));
            s.last_frame_ms = Some(now_ms);
            let now = now_ms / 1000.0;

            let mut busy = false;
            for track in s.tracks.borrow_mut().iter_mut() {
                match &mut track.kind {
                    TrackKind::Scrub { binding, progress } => {
                        let t = progress.advance(dt);
                        track.animator.retarget(&binding.sample(t), now);
                        busy |= !progress.is_settled();
                    }
                    TrackKind::Entrance {
                        target, pending, ..
                    } => {
                        if *pending {
                            *pending = false;
                            track.animator.retarget(target, now);
                        }
                    }
                    TrackKind::Timed {
                        delay,
                        target,
                        started_at,
                        done,
                    } => {
                        if !*done {
                            let start = *started_at.get_or_insert(now);
                            if now - start >= *delay {
                                *done = true;
                                track.animator.retarget(target, now);
                            } else {
                                busy = true;
                            }
                        }
                    }
                }
                let style = track.animator.tick(now);
                apply_style(&track.element, &style);
                busy |= !track.animator.is_idle();
            }
            if !busy {
                s.last_frame_ms = None;
            }
            busy
        };
        if keep_running {
            request_frame(state);
        }
    }
}

/// Scroll-driven animations for a page.
#[wasm_bindgen]
pub struct ScrollScene {
    state: Rc<RefCell<SceneShared>>,
    listeners: Vec<Listener>,
}

fn page_top(element: &HtmlElement) -> f64 {
    element_rect(element).top + window_scroll().0
}

impl ScrollScene {
    fn viewport(&self) -> ViewportSize {
        window_size().unwrap_or_default()
    }

    /// Register a track and apply its initial style. Returns its index.
    fn push_track(&mut self, element: HtmlElement, kind: TrackKind, initial: Style) -> usize {
        apply_style(&element, &initial);
        let tracks = Rc::clone(&self.state.borrow().tracks);
        let mut list = tracks.borrow_mut();
        list.push(Track {
            element,
            kind,
            animator: Animator::new(initial),
        });
        list.len() - 1
    }

    /// Register a track and subscribe it to scroll updates.
    fn add_track(&mut self, element: HtmlElement, kind: TrackKind, initial: Style) {
        let index = self.push_track(element, kind, initial);
        let tracks = Rc::clone(&self.state.borrow().tracks);

        let observed = Rc::clone(&tracks);
        self.state.borrow_mut().observable.subscribe(move |offset: ScrollOffset| {
            if let Some(track) = observed.borrow_mut().get_mut(index) {
                match &mut track.kind {
                    TrackKind::Scrub { binding, progress } => {
                        progress.set_target(binding.trigger.progress(offset));
                    }
                    TrackKind::Entrance {
                        trigger, pending, ..
                    } => {
                        if trigger.check(offset) {
                            *pending = true;
                        }
                    }
                    TrackKind::Timed { .. } => {}
                }
            }
        });
    }

    fn add_binding(&mut self, element: HtmlElement, binding: ScrollBinding) {
        let initial = Style::default().with(&binding.sample(0.0));
        self.add_track(
            element,
            TrackKind::Scrub {
                binding,
                progress: ScrubbedProgress::new(binding.trigger.scrub),
            },
            initial,
        );
    }

    fn add_cue(&mut self, element: HtmlElement, cue: Cue) {
        self.push_track(
            element,
            TrackKind::Timed {
                delay: cue.delay,
                target: cue.to,
                started_at: None,
                done: false,
            },
            Style::default().with(&cue.from),
        );
    }

    fn publish(state: &Rc<RefCell<SceneShared>>) {
        state.borrow_mut().observable.publish(window_scroll());
        request_frame(state);
    }

    fn teardown(&mut self) {
        self.listeners.clear();
        let mut s = self.state.borrow_mut();
        s.observable.clear();
        s.frames.stop();
        s.tracks.borrow_mut().clear();
    }
}

#[wasm_bindgen]
impl ScrollScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ScrollScene, JsValue> {
        console_error_panic_hook::set_once();

        let state = Rc::new(RefCell::new(SceneShared {
            observable: ScrollObservable::new(),
            tracks: Rc::new(RefCell::new(Vec::new())),
            frames: FrameLoop::default(),
            last_frame_ms: None,
        }));

        let window = web_sys::window().ok_or_else(|| FolioError::Dom("no window".into()))?;
        let scroll_state = Rc::clone(&state);
        let listener = Listener::attach(&window, "scroll", true, move |_event: Event| {
            ScrollScene::publish(&scroll_state);
        })?;

        Ok(ScrollScene {
            state,
            listeners: vec![listener],
        })
    }

    /// Slide the navbar links up and lift the bar as the page leaves the top.
    #[wasm_bindgen(js_name = "bindNavbar")]
    pub fn bind_navbar(&mut self, bar: HtmlElement, links: js_sys::Array) -> Result<(), JsValue> {
        self.ensure_live()?;
        for link in elements_of(&links) {
            self.add_binding(link, presets::navbar_links());
        }
        self.add_binding(bar, presets::navbar_bar());
        Self::publish(&self.state);
        Ok(())
    }

    /// Drift alternating tech rows across the screen while `section` is visible.
    #[wasm_bindgen(js_name = "bindTechRows")]
    pub fn bind_tech_rows(
        &mut self,
        section: HtmlElement,
        rows: js_sys::Array,
    ) -> Result<(), JsValue> {
        self.ensure_live()?;
        let top = page_top(&section);
        let height = element_rect(&section).height;
        let viewport = self.viewport();
        for (index, row) in elements_of(&rows).into_iter().enumerate() {
            let binding = presets::tech_row(
                index,
                top,
                height,
                viewport.height,
                js_sys::Math::random(),
                js_sys::Math::random(),
            );
            self.add_binding(row, binding);
        }
        Self::publish(&self.state);
        Ok(())
    }

    /// Fade/rise each item in once when it first scrolls into view.
    #[wasm_bindgen(js_name = "bindEntrances")]
    pub fn bind_entrances(&mut self, items: js_sys::Array) -> Result<(), JsValue> {
        self.ensure_live()?;
        let viewport = self.viewport();
        for item in elements_of(&items) {
            let (trigger, initial, target) =
                presets::list_item_entrance(page_top(&item), viewport.height);
            self.add_track(
                item,
                TrackKind::Entrance {
                    trigger,
                    target,
                    pending: false,
                },
                Style::default().with(&initial),
            );
        }
        Self::publish(&self.state);
        Ok(())
    }

    /// Play the name intro: `chars` swing in with a random stagger, then
    /// `job_title` drops in. `hero` is revealed first.
    #[wasm_bindgen(js_name = "playHeroIntro")]
    pub fn play_hero_intro(
        &mut self,
        hero: HtmlElement,
        chars: js_sys::Array,
        job_title: Option<HtmlElement>,
    ) -> Result<(), JsValue> {
        self.ensure_live()?;
        let _ = hero.style().set_property("opacity", "1");
        let chars = elements_of(&chars);
        let intro = presets::hero_intro(chars.len(), js_sys::Math::random);
        for (element, cue) in chars.into_iter().zip(intro.chars) {
            let _ = element.style().set_property("transform-origin", "left top");
            self.add_cue(element, cue);
        }
        if let Some(title) = job_title {
            self.add_cue(title, intro.job_title);
        }
        tracing::debug!(duration = intro.total_duration(), "hero intro started");
        request_frame(&self.state);
        Ok(())
    }

    /// Number of live scroll subscriptions.
    #[wasm_bindgen(js_name = "subscriptionCount")]
    pub fn subscription_count(&self) -> u32 {
        u32::try_from(self.state.borrow().observable.subscriber_count()).unwrap_or(u32::MAX)
    }

    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl ScrollScene {
    fn ensure_live(&self) -> Result<(), FolioError> {
        if self.state.borrow().frames.is_stopped() {
            Err(FolioError::Detached)
        } else {
            Ok(())
        }
    }
}

impl Drop for ScrollScene {
    fn drop(&mut self) {
        self.teardown();
    }
}
