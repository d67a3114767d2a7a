//! folioview - interaction layer for a content-driven portfolio site
//!
//! Pointer and scroll choreography compiled to WebAssembly:
//! - Hover reveal: an "Explore" badge or image preview that trails the
//!   cursor over content lists and fades in/out with hover
//! - Avatar tilt that follows the pointer
//! - Scroll-scrubbed timelines (navbar collapse, tech-row marquee) and
//!   one-shot list entrances
//!
//! The controllers are plain Rust state machines usable on any target;
//! the `web` module binds them to the DOM on wasm32.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { RevealView, ScrollScene } from 'folioview';
//! await init();
//! const reveal = new RevealView(listEl, badgeEl, { policy: { kind: 'badge' } });
//! const scene = new ScrollScene();
//! scene.bindNavbar(navEl, [...navEl.querySelectorAll('a')]);
//! // on navigation away:
//! reveal.destroy();
//! scene.destroy();
//! ```

// Controllers and data
pub mod avatar;
pub mod config;
pub mod content;
pub mod error;
pub mod motion;
pub mod reveal;
pub mod types;

// Browser bindings
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use web::{AvatarView, RevealView, ScrollScene};

pub use config::RevealConfig;
pub use error::{FolioError, Result};
pub use reveal::RevealController;
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
