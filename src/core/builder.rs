//! Engine builder for fluent API configuration
//!
//! This module provides a ZoomEngineBuilder that allows for fluent configuration
//! of zoom engines with motion profiles, layout overrides and interaction options.

use crate::{
    core::{
        config::{GeometryConfig, MotionConfig, MotionProfile},
        engine::ZoomEngine,
        geo::Size,
    },
    Result,
};

/// Builder for creating and configuring ZoomEngine instances
#[derive(Debug, Clone)]
pub struct ZoomEngineBuilder {
    /// Layout inputs
    geometry: GeometryConfig,
    /// Settle animation configuration
    motion: MotionProfile,
    /// Sheet offset applied once zoomed
    y_displacement: f64,
}

impl ZoomEngineBuilder {
    /// Create a new ZoomEngineBuilder with default settings
    pub fn new() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            motion: MotionProfile::default(),
            y_displacement: 0.0,
        }
    }

    /// Set the device viewport size
    pub fn with_device(mut self, device: Size) -> Self {
        self.geometry.device = device;
        self
    }

    /// Set the content aspect ratio (width / height)
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.geometry.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the horizontal padding of the inline layout
    pub fn with_horizontal_padding(mut self, padding: f64) -> Self {
        self.geometry.horizontal_padding = padding;
        self
    }

    /// Use an explicit inline container instead of the derived one
    pub fn with_container(mut self, container: Size) -> Self {
        self.geometry.container = Some(container);
        self
    }

    /// Set the inline corner radius
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.geometry.corner_radius = Some(radius);
        self
    }

    /// Mark the content as vector art that needs scale compensation
    pub fn with_vector_content(mut self, is_vector: bool) -> Self {
        self.geometry.is_vector = is_vector;
        self
    }

    /// Force a square inline container whatever the aspect ratio
    pub fn with_force_square(mut self, force_square: bool) -> Self {
        self.geometry.force_square = force_square;
        self
    }

    /// Enable or disable gesture handling
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.geometry.interactive = interactive;
        self
    }

    /// Replace all geometry inputs at once
    pub fn with_geometry(mut self, geometry: GeometryConfig) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the motion profile
    pub fn with_motion(mut self, profile: MotionProfile) -> Self {
        self.motion = profile;
        self
    }

    /// Set custom motion options
    pub fn with_motion_options(mut self, options: MotionConfig) -> Self {
        self.motion = MotionProfile::Custom(options);
        self
    }

    /// Set the initial sheet offset
    pub fn with_y_displacement(mut self, y_displacement: f64) -> Self {
        self.y_displacement = y_displacement;
        self
    }

    /// Validate the configuration and create the engine
    pub fn build(self) -> Result<ZoomEngine> {
        let mut engine = ZoomEngine::new(self.geometry, self.motion)?;
        if self.y_displacement != 0.0 {
            engine.set_y_displacement(self.y_displacement);
        }
        Ok(engine)
    }
}

impl Default for ZoomEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset configurations for common content
impl ZoomEngineBuilder {
    /// Photo in a feed: derived layout, standard motion
    pub fn photo(device: Size, aspect_ratio: f64) -> Self {
        Self::new()
            .with_device(device)
            .with_aspect_ratio(aspect_ratio)
    }

    /// Vector artwork shown in a square tile
    pub fn artwork(device: Size, aspect_ratio: f64) -> Self {
        Self::photo(device, aspect_ratio)
            .with_vector_content(true)
            .with_force_square(true)
    }

    /// Any content with the reduced-motion profile
    pub fn reduced_motion(device: Size, aspect_ratio: f64) -> Self {
        Self::photo(device, aspect_ratio).with_motion(MotionProfile::Reduced)
    }

    /// Display only: gestures are ignored
    pub fn static_preview(device: Size, aspect_ratio: f64) -> Self {
        Self::photo(device, aspect_ratio).with_interactive(false)
    }
}
