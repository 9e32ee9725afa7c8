use crate::core::{
    config::GeometryConfig,
    constants::{CHROME_OFFSET, DEFAULT_CORNER_RADIUS},
    geo::{Point, Size},
};
use serde::{Deserialize, Serialize};

/// Derived layout of one piece of content: where it sits inline, how large it
/// becomes fullscreen and the ratio between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The device viewport
    pub device: Size,
    /// Inline layout box of the content
    pub container: Size,
    /// Largest box with the content's aspect ratio that fits the device
    pub full: Size,
    /// `full.height / container.height`, or 1 when that is undefined
    pub zoom_ratio: f64,
    /// Corner radius of the inline box
    pub corner_radius: f64,
    /// Whether rendered scale needs vector compensation
    pub is_vector: bool,
}

/// Layout transform of the box hosting the content (inline to fullscreen)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerTransform {
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for ContainerTransform {
    fn default() -> Self {
        Self {
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

/// Visual transform consumed by the renderer every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Content offset from its resting center, in pixels
    pub translate_x: f64,
    pub translate_y: f64,
    /// Rendered content scale (vector compensation included)
    pub scale: f64,
    pub corner_radius: f64,
    pub container: ContainerTransform,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            corner_radius: DEFAULT_CORNER_RADIUS,
            container: ContainerTransform::default(),
        }
    }
}

impl Transform {
    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is effectively an identity transform of the content
    pub fn is_identity(&self) -> bool {
        (self.scale - 1.0).abs() < 0.001
            && self.translate_x.abs() < 0.1
            && self.translate_y.abs() < 0.1
    }
}

/// Guarded division used wherever a layout ratio may be undefined
fn ratio(numerator: f64, denominator: f64) -> f64 {
    let value = numerator / denominator;
    if denominator > 0.0 && value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

impl Viewport {
    /// Derives the layout for a session
    pub fn new(config: &GeometryConfig) -> Self {
        let device = config.device;
        let aspect_ratio = config.aspect_ratio;
        let container = config
            .container
            .unwrap_or_else(|| Self::inline_container(config));

        let full = Size::new(
            device.width.min(device.height * aspect_ratio),
            device.height.min(device.width / aspect_ratio),
        );

        let zoom_ratio = ratio(full.height, container.height);
        if container.height <= 0.0 || !container.height.is_finite() {
            log::warn!(
                "container height {} is unusable, zoom ratio falls back to 1",
                container.height
            );
        }

        Self {
            device,
            container,
            full,
            zoom_ratio,
            corner_radius: config.corner_radius.unwrap_or(DEFAULT_CORNER_RADIUS),
            is_vector: config.is_vector,
        }
    }

    /// Inline layout box: full width between paddings, at most half the device tall
    pub fn inline_container(config: &GeometryConfig) -> Size {
        let max_width = config.device.width - config.horizontal_padding * 2.0;
        let max_height = config.device.height / 2.0;
        let aspect_ratio = config.aspect_ratio;

        let size = if aspect_ratio == 1.0 || config.force_square {
            Size::new(max_width, max_width)
        } else if aspect_ratio > 1.0 {
            Size::new(max_width, max_width / aspect_ratio)
        } else if max_width / aspect_ratio > max_height {
            Size::new(aspect_ratio * max_height, max_height)
        } else {
            Size::new(max_width, max_width / aspect_ratio)
        };

        // degenerate ratios fall back to a square box
        if size.is_positive() {
            size
        } else {
            Size::new(max_width, max_width)
        }
    }

    /// `full.width / container.width`, the width growth from inline to fullscreen
    pub fn width_ratio(&self) -> f64 {
        ratio(self.full.width, self.container.width)
    }

    /// Height of the empty band above and below fullscreen content
    pub fn letterbox(&self) -> f64 {
        (self.device.height - self.full.height) / 2.0
    }

    /// Whether an absolute y coordinate falls in the band above or below fullscreen content
    pub fn is_in_letterbox(&self, y: f64) -> bool {
        let band = self.letterbox();
        (y > 0.0 && y < band) || (y <= self.device.height && y > self.device.height - band)
    }

    /// Center of the device viewport
    pub fn center(&self) -> Point {
        self.device.center()
    }

    /// Transform of the hosting box for a given zoom progress
    pub fn container_transform(&self, progress: f64, y_displacement: f64) -> ContainerTransform {
        let settle_offset =
            progress * (y_displacement + self.letterbox() - CHROME_OFFSET);
        let centering = progress * (self.full.height - self.container.height) / 2.0;
        ContainerTransform {
            translate_y: settle_offset + centering,
            scale: 1.0 + progress * (self.zoom_ratio - 1.0),
        }
    }

    /// Scale actually handed to the renderer
    pub fn rendered_scale(&self, scale: f64, progress: f64) -> f64 {
        if self.is_vector {
            scale + progress * (self.width_ratio() * scale - scale)
        } else {
            scale
        }
    }

    /// Full output transform for the given state
    pub fn transform(
        &self,
        scale: f64,
        translate: Point,
        progress: f64,
        y_displacement: f64,
    ) -> Transform {
        Transform {
            translate_x: translate.x,
            translate_y: translate.y,
            scale: self.rendered_scale(scale, progress),
            corner_radius: (1.0 - progress) * self.corner_radius,
            container: self.container_transform(progress, y_displacement),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&GeometryConfig::default())
    }
}
