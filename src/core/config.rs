//! Configuration for a zoom session
//!
//! [`GeometryConfig`] describes the device and the content being shown and is
//! fixed for the lifetime of one engine. [`MotionProfile`] selects how settle
//! animations behave, either through presets or a custom [`MotionConfig`].

use crate::{
    animation::transitions::{DecayConfig, SpringConfig, TimingConfig},
    core::{
        constants::{DOUBLE_TAP_MAX_DELAY_MS, DOUBLE_TAP_MAX_DISTANCE},
        geo::Size,
    },
    Result, ZoomError,
};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Device and content geometry supplied once per viewing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Viewport of the device in display-independent pixels
    pub device: Size,
    /// Native width / height of the content
    pub aspect_ratio: f64,
    /// Horizontal inset of inline content on each side
    #[serde(default)]
    pub horizontal_padding: f64,
    /// Inline layout box; derived from the device and aspect ratio when absent
    #[serde(default)]
    pub container: Option<Size>,
    /// Corner radius of inline content
    #[serde(default)]
    pub corner_radius: Option<f64>,
    /// Vector content does not re-rasterize on layout changes and needs scale compensation
    #[serde(default)]
    pub is_vector: bool,
    /// Lay content out square regardless of its aspect ratio
    #[serde(default)]
    pub force_square: bool,
    /// When false every gesture is ignored
    #[serde(default = "default_true")]
    pub interactive: bool,
}

impl GeometryConfig {
    pub fn new(device: Size, aspect_ratio: f64, horizontal_padding: f64) -> Self {
        Self {
            device,
            aspect_ratio,
            horizontal_padding,
            container: None,
            corner_radius: None,
            is_vector: false,
            force_square: false,
            interactive: true,
        }
    }

    /// Rejects geometry the engine cannot lay out
    pub fn validate(&self) -> Result<()> {
        if !self.device.is_positive() {
            return Err(ZoomError::InvalidGeometry(format!(
                "device size must be positive, got {}x{}",
                self.device.width, self.device.height
            )));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ZoomError::InvalidGeometry(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if !self.horizontal_padding.is_finite() || self.horizontal_padding < 0.0 {
            return Err(ZoomError::InvalidGeometry(format!(
                "horizontal padding must be non-negative, got {}",
                self.horizontal_padding
            )));
        }
        if self.horizontal_padding * 2.0 >= self.device.width {
            return Err(ZoomError::InvalidGeometry(
                "horizontal padding leaves no room for content".to_string(),
            ));
        }
        if let Some(container) = self.container {
            let valid = |v: f64| v.is_finite() && v >= 0.0;
            if !valid(container.width) || !valid(container.height) {
                return Err(ZoomError::InvalidGeometry(format!(
                    "container size must be non-negative, got {}x{}",
                    container.width, container.height
                )));
            }
        }
        if let Some(radius) = self.corner_radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ZoomError::InvalidGeometry(format!(
                    "corner radius must be non-negative, got {}",
                    radius
                )));
            }
        }
        Ok(())
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::new(Size::new(375.0, 812.0), 1.0, 20.0)
    }
}

/// Settle curves and tap recognition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Bounds corrections and double-tap zoom
    pub timing: TimingConfig,
    /// Entering the zoomed mode
    pub enter_spring: SpringConfig,
    /// Leaving the zoomed mode and snapping back to rest
    pub exit_spring: SpringConfig,
    /// Free scroll after a flick
    pub decay: DecayConfig,
    pub double_tap_max_delay_ms: u64,
    pub double_tap_max_distance: f64,
    /// Complete every settle in the same update that starts it
    pub instant: bool,
}

/// Presets for settle animations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum MotionProfile {
    #[default]
    Standard,
    /// No settle animations, values jump to their targets
    Reduced,
    Custom(MotionConfig),
}

impl MotionProfile {
    pub fn resolve(&self) -> MotionConfig {
        match self {
            Self::Standard => MotionConfig {
                timing: TimingConfig::default(),
                enter_spring: SpringConfig::new(600.0, 40.0, 1.5),
                exit_spring: SpringConfig::new(800.0, 68.0, 2.0),
                decay: DecayConfig::default(),
                double_tap_max_delay_ms: DOUBLE_TAP_MAX_DELAY_MS,
                double_tap_max_distance: DOUBLE_TAP_MAX_DISTANCE,
                instant: false,
            },
            Self::Reduced => MotionConfig {
                instant: true,
                ..Self::Standard.resolve()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionProfile::default().resolve()
    }
}
