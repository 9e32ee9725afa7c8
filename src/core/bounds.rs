//! Translation limits for zoomed content.
//!
//! Content may only be panned on an axis once its scale passes the axis'
//! breaking scale, and even then its edges never move inward past the
//! viewport edge.

use crate::core::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Limits on one axis for a given target scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    /// Scale at which the content exactly fills the viewport on this axis
    pub breaking_scale: f64,
    /// Largest allowed |translation| on this axis
    pub max_displacement: f64,
    /// Scale the limits were computed for
    pub target_scale: f64,
}

impl AxisBounds {
    /// Limits for one axis. `content` is the content extent on that axis at scale 1.
    pub fn new(device: f64, content: f64, target_scale: f64, zoom_ratio: f64) -> Self {
        let breaking_scale = if content > 0.0 && (device / content).is_finite() {
            device / content
        } else {
            1.0
        };
        let zoom_ratio = if zoom_ratio > 0.0 && zoom_ratio.is_finite() {
            zoom_ratio
        } else {
            1.0
        };
        let max_displacement =
            device * ((target_scale / breaking_scale).max(1.0) - 1.0) / 2.0 / zoom_ratio;

        Self {
            breaking_scale,
            max_displacement,
            target_scale,
        }
    }

    /// Whether the content overflows the viewport on this axis
    pub fn pans(&self) -> bool {
        self.target_scale > self.breaking_scale
    }

    pub fn clamp(&self, translation: f64) -> f64 {
        translation.clamp(-self.max_displacement, self.max_displacement)
    }

    pub fn contains(&self, translation: f64) -> bool {
        translation.abs() <= self.max_displacement
    }

    /// Where a translation has to be animated to, if anywhere.
    /// Content that fits is always re-centered.
    pub fn settle(&self, translation: f64) -> Option<f64> {
        if !self.pans() {
            Some(0.0)
        } else if translation > self.max_displacement {
            Some(self.max_displacement)
        } else if translation < -self.max_displacement {
            Some(-self.max_displacement)
        } else {
            None
        }
    }

    /// Where a requested translation ends up once bounded
    pub fn bound(&self, translation: f64) -> f64 {
        if self.pans() {
            self.clamp(translation)
        } else {
            0.0
        }
    }
}

/// Limits on both axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplacementBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

impl DisplacementBounds {
    /// Limits for `target_scale`. While inline the breaking scale is measured
    /// against the inline box, once zoomed against the fullscreen size.
    pub fn for_scale(viewport: &Viewport, target_scale: f64, zoomed: bool) -> Self {
        let content = if zoomed {
            viewport.full
        } else {
            viewport.container
        };
        Self {
            x: AxisBounds::new(
                viewport.device.width,
                content.width,
                target_scale,
                viewport.zoom_ratio,
            ),
            y: AxisBounds::new(
                viewport.device.height,
                content.height,
                target_scale,
                viewport.zoom_ratio,
            ),
        }
    }
}
