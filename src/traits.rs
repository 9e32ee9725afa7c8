//! Shared trait abstractions
//!
//! `Lerp` is the interpolation seam used by tweens; `ZoomObserver` is the
//! output boundary through which rendering and chrome layers receive updates.

use crate::core::{geo::Point, viewport::Transform};

/// Unified interpolation trait
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

/// Receives engine output. Both callbacks run synchronously on the caller's thread.
pub trait ZoomObserver {
    /// A new transform is ready to be applied to the displayed content
    fn on_transform(&mut self, transform: &Transform);

    /// The settled zoom mode flipped; hosts typically hide or show chrome here
    fn on_zoom_changed(&mut self, _zoomed: bool) {}
}

/// Observer that ignores every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ZoomObserver for NoopObserver {
    fn on_transform(&mut self, _transform: &Transform) {}
}

/// Observer that records everything it receives, mostly useful in tests and replays
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub transforms: Vec<Transform>,
    pub zoom_changes: Vec<bool>,
}

impl ZoomObserver for RecordingObserver {
    fn on_transform(&mut self, transform: &Transform) {
        self.transforms.push(*transform);
    }

    fn on_zoom_changed(&mut self, zoomed: bool) {
        self.zoom_changes.push(zoomed);
    }
}
