//! Common test utilities for folioview integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use folioview::config::{PreviewConfig, RevealPolicy};
use folioview::content::{ContentItem, ContentKind, ContentList, ImageRef};
use folioview::reveal::{Channel, RevealUpdate};
use folioview::{RevealConfig, RevealController, ScrollOffset, ViewportSize};

/// Controller with the default badge policy, mounted at `scroll`.
pub fn mounted_badge(scroll: f64) -> RevealController {
    let mut controller = RevealController::new(RevealConfig::default());
    controller.mount(ScrollOffset(scroll));
    controller
}

/// Controller with the image preview policy and a 1000x800 viewport.
pub fn mounted_preview(scroll: f64) -> RevealController {
    let mut controller = RevealController::new(RevealConfig {
        policy: RevealPolicy::ImagePreview(PreviewConfig::default()),
        viewport: ViewportSize {
            width: 1000.0,
            height: 800.0,
        },
        ..RevealConfig::default()
    });
    controller.mount(ScrollOffset(scroll));
    controller
}

/// Unwrap an update and check its channel.
pub fn expect_channel(update: Option<RevealUpdate>, channel: Channel) -> RevealUpdate {
    let update = update.expect("expected an update");
    assert_eq!(update.channel, channel, "wrong channel for {update:?}");
    update
}

pub fn image(url: &str) -> ImageRef {
    ImageRef {
        url: url.to_string(),
        alt: None,
    }
}

/// Three projects: titled with cover, untitled, titled without cover.
pub fn sample_projects() -> ContentList {
    ContentList {
        kind: ContentKind::Projects,
        items: vec![
            ContentItem {
                uid: "folio".to_string(),
                title: Some("Folio".to_string()),
                tags: vec!["Rust".to_string(), "WASM".to_string()],
                cover_image: Some(image("https://images.example/folio.png")),
                date: Some("2024-03-15".to_string()),
            },
            ContentItem {
                uid: "draft".to_string(),
                title: None,
                ..ContentItem::default()
            },
            ContentItem {
                uid: "shapes".to_string(),
                title: Some("Shapes".to_string()),
                tags: vec!["3D".to_string()],
                cover_image: None,
                date: None,
            },
        ],
        view_more_text: Some("View Project".to_string()),
        fallback_image: Some(image("https://images.example/fallback.png")),
    }
}
