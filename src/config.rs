//! Reveal controller configuration.
//!
//! Every field has a default matching the live site, so hosts only pass
//! what they override. Accepted as JSON or (on wasm32) as a plain JS object.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::motion::Ease;
use crate::types::ViewportSize;

/// Fixed-size circular badge centred under the cursor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeConfig {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Diameter in CSS pixels.
    pub size: f64,
    pub label: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            offset_x: 45.0,
            offset_y: 55.0,
            size: 96.0,
            label: "Explore".to_string(),
        }
    }
}

/// Per-item preview image that leans into the direction of travel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewConfig {
    /// Preview size in CSS pixels.
    pub width: u32,
    pub height: u32,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Horizontal room kept free at the right edge of the viewport.
    pub edge_x: f64,
    /// Vertical room kept free at the bottom of the viewport.
    pub edge_y: f64,
    pub duration: f64,
    pub ease: Ease,
    /// Exposure adjustment passed to the image CDN.
    pub exposure: i32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 220,
            height: 320,
            offset_x: 110.0,
            offset_y: 160.0,
            edge_x: 250.0,
            edge_y: 350.0,
            duration: 1.3,
            ease: Ease::BackOut(2.0),
            exposure: -10,
        }
    }
}

/// How the floating element presents itself. One per controller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RevealPolicy {
    Badge(BadgeConfig),
    ImagePreview(PreviewConfig),
}

impl Default for RevealPolicy {
    fn default() -> Self {
        RevealPolicy::Badge(BadgeConfig::default())
    }
}

/// Show/hide animation of the floating element.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FadeConfig {
    pub duration: f64,
    pub ease: Ease,
    /// Scale of the element while hidden.
    pub hidden_scale: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration: 0.4,
            ease: Ease::POWER3_OUT,
            hidden_scale: 0.2,
        }
    }
}

/// Top-level configuration for a reveal controller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RevealConfig {
    pub policy: RevealPolicy,
    pub fade: FadeConfig,
    pub viewport: ViewportSize,
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FolioError::Config(format!("{name} must be a finite non-negative number, got {value}")))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FolioError::Config(format!("{name} must be positive, got {value}")))
    }
}

impl RevealConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RevealConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot animate sensibly.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("fade.duration", self.fade.duration)?;
        check_positive("fade.hiddenScale", self.fade.hidden_scale)?;
        if self.fade.hidden_scale > 1.0 {
            return Err(FolioError::Config(format!(
                "fade.hiddenScale must not exceed 1, got {}",
                self.fade.hidden_scale
            )));
        }
        check_positive("viewport.width", self.viewport.width)?;
        check_positive("viewport.height", self.viewport.height)?;
        match &self.policy {
            RevealPolicy::Badge(badge) => {
                check_positive("policy.size", badge.size)?;
                check_non_negative("policy.offsetX", badge.offset_x)?;
                check_non_negative("policy.offsetY", badge.offset_y)?;
            }
            RevealPolicy::ImagePreview(preview) => {
                if preview.width == 0 || preview.height == 0 {
                    return Err(FolioError::Config(
                        "policy.width and policy.height must be positive".to_string(),
                    ));
                }
                check_non_negative("policy.duration", preview.duration)?;
                check_non_negative("policy.edgeX", preview.edge_x)?;
                check_non_negative("policy.edgeY", preview.edge_y)?;
            }
        }
        Ok(())
    }
}
