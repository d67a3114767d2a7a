//! Where the floating element goes for a given pointer position.

use crate::config::{BadgeConfig, PreviewConfig, RevealPolicy};
use crate::content::ImageParams;
use crate::motion::{Ease, TweenTarget};
use crate::types::{PointerState, ScrollOffset, ViewportSize};

/// Clamp that tolerates an inverted range (tiny viewports) by pinning to `min`.
fn clamp_to(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

impl BadgeConfig {
    fn position(&self, pointer: &PointerState) -> TweenTarget {
        TweenTarget::new()
            .x(pointer.x - self.offset_x)
            .y(pointer.y - self.offset_y)
            .duration(0.0)
            .ease(Ease::Linear)
    }
}

impl PreviewConfig {
    fn position(
        &self,
        pointer: &PointerState,
        previous: Option<&PointerState>,
        scroll: ScrollOffset,
        viewport: ViewportSize,
    ) -> TweenTarget {
        let max_x = viewport.width - self.edge_x;
        let max_y = scroll.0 + viewport.height - self.edge_y;
        let mut target = TweenTarget::new()
            .x(clamp_to(pointer.x - self.offset_x, 0.0, max_x))
            .y(clamp_to(pointer.y - self.offset_y, 0.0, max_y))
            .duration(self.duration)
            .ease(self.ease);
        if let Some(previous) = previous {
            // Lean by horizontal speed, in the direction of travel.
            let dx = pointer.dx_since(previous);
            target = target.rotation(if dx.abs() > 0.0 { dx } else { 0.0 });
        }
        target
    }

    /// CDN parameters for the preview image.
    pub fn image_params(&self) -> ImageParams {
        ImageParams {
            crop: true,
            width: Some(self.width),
            height: Some(self.height),
            exposure: Some(self.exposure),
            quality: None,
        }
    }
}

impl RevealPolicy {
    /// Position target for the floating element.
    ///
    /// `previous` is the pointer position at the last move event; pass `None`
    /// when the element is repositioned without pointer motion (scrolling),
    /// which leaves any lean untouched.
    pub fn position_target(
        &self,
        pointer: &PointerState,
        previous: Option<&PointerState>,
        scroll: ScrollOffset,
        viewport: ViewportSize,
    ) -> TweenTarget {
        match self {
            RevealPolicy::Badge(badge) => badge.position(pointer),
            RevealPolicy::ImagePreview(preview) => {
                preview.position(pointer, previous, scroll, viewport)
            }
        }
    }

    pub fn shows_images(&self) -> bool {
        matches!(self, RevealPolicy::ImagePreview(_))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_centres_under_cursor() {
        let policy = RevealPolicy::default();
        let target = policy.position_target(
            &PointerState::new(100.0, 200.0),
            None,
            ScrollOffset(0.0),
            ViewportSize::default(),
        );
        assert_eq!(target.x, Some(55.0));
        assert_eq!(target.y, Some(145.0));
        assert_eq!(target.rotation, None);
        assert_eq!(target.duration, 0.0);
    }

    #[test]
    fn test_preview_clamps_to_viewport() {
        let policy = RevealPolicy::ImagePreview(PreviewConfig::default());
        let viewport = ViewportSize {
            width: 1000.0,
            height: 800.0,
        };
        let near_origin = policy.position_target(
            &PointerState::new(10.0, 10.0),
            None,
            ScrollOffset(0.0),
            viewport,
        );
        assert_eq!(near_origin.x, Some(0.0));
        assert_eq!(near_origin.y, Some(0.0));

        let far = policy.position_target(
            &PointerState::new(5000.0, 5000.0),
            None,
            ScrollOffset(100.0),
            viewport,
        );
        assert_eq!(far.x, Some(750.0));
        assert_eq!(far.y, Some(550.0));
    }

    #[test]
    fn test_preview_leans_with_direction() {
        let policy = RevealPolicy::ImagePreview(PreviewConfig::default());
        let viewport = ViewportSize::default();
        let prev = PointerState::new(400.0, 400.0);
        let lean = |x: f64| {
            policy
                .position_target(
                    &PointerState::new(x, 400.0),
                    Some(&prev),
                    ScrollOffset(0.0),
                    viewport,
                )
                .rotation
        };
        assert_eq!(lean(412.0), Some(12.0));
        assert_eq!(lean(390.0), Some(-10.0));
    }

    #[test]
    fn test_preview_still_pointer_has_positive_zero_lean() {
        let policy = RevealPolicy::ImagePreview(PreviewConfig::default());
        let at = PointerState::new(300.0, 300.0);
        let target = policy.position_target(
            &at,
            Some(&at),
            ScrollOffset(0.0),
            ViewportSize::default(),
        );
        let rotation = target.rotation.unwrap_or(f64::NAN);
        assert_eq!(rotation, 0.0);
        assert!(rotation.is_sign_positive());
        let json = serde_json::to_string(&target).unwrap_or_default();
        assert!(json.contains(r#""rotation":0.0"#), "{json}");
    }

    #[test]
    fn test_preview_image_params() {
        let params = PreviewConfig::default().image_params();
        assert_eq!(params.width, Some(220));
        assert_eq!(params.height, Some(320));
        assert_eq!(params.exposure, Some(-10));
    }
}
