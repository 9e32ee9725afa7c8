use crate::{
    animation::transitions::AnimatedValue,
    core::{constants::MIN_IMAGE_SCALE, geo::Point},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discrete zoom mode as seen by view-state observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPhase {
    /// Content sits in its inline layout
    Inline,
    /// Zoom was requested, layout is animating to fullscreen
    Entering,
    /// Content is fullscreen; scale and pan are live
    Zoomed,
    /// Exit was requested, layout is animating back inline
    Exiting,
}

/// Which continuous stream a release belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Pan,
    Pinch,
}

/// Mutable visual state of one displayed content item
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    pub scale: AnimatedValue,
    pub translate_x: AnimatedValue,
    pub translate_y: AnimatedValue,
    /// 0 = inline layout, 1 = fullscreen layout
    pub progress: AnimatedValue,
    /// Optimistic zoom flag, flipped as soon as a transition is requested
    pub is_zoomed: bool,
}

impl GestureState {
    pub fn new() -> Self {
        Self {
            scale: AnimatedValue::new(MIN_IMAGE_SCALE),
            translate_x: AnimatedValue::new(0.0),
            translate_y: AnimatedValue::new(0.0),
            progress: AnimatedValue::new(0.0),
            is_zoomed: false,
        }
    }

    pub fn translation(&self) -> Point {
        Point::new(self.translate_x.get(), self.translate_y.get())
    }

    pub fn phase(&self) -> ZoomPhase {
        let progress = self.progress.get();
        let moving = self.progress.is_animating();
        match (self.is_zoomed, moving) {
            (true, true) => ZoomPhase::Entering,
            (true, false) if progress < 1.0 => ZoomPhase::Entering,
            (true, false) => ZoomPhase::Zoomed,
            (false, true) => ZoomPhase::Exiting,
            (false, false) if progress > 0.0 => ZoomPhase::Exiting,
            (false, false) => ZoomPhase::Inline,
        }
    }

    /// Whether no settle animation is running
    pub fn is_settled(&self) -> bool {
        !(self.scale.is_animating()
            || self.translate_x.is_animating()
            || self.translate_y.is_animating()
            || self.progress.is_animating())
    }

    /// Advances every running settle animation; returns whether anything moved
    pub fn tick(&mut self, dt: Duration) -> bool {
        // non-short-circuiting so every variable advances
        let scale = self.scale.tick(dt);
        let x = self.translate_x.tick(dt);
        let y = self.translate_y.tick(dt);
        let progress = self.progress.tick(dt);
        scale | x | y | progress
    }

    /// Completes every running settle animation immediately
    pub fn finish_all(&mut self) {
        self.scale.finish();
        self.translate_x.finish();
        self.translate_y.finish();
        self.progress.finish();
    }

    /// Stops every running settle animation where it is
    pub fn cancel_all(&mut self) {
        self.scale.cancel();
        self.translate_x.cancel();
        self.translate_y.cancel();
        self.progress.cancel();
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new()
    }
}

/// Ephemeral context of one pan stream
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanContext {
    pub active: bool,
    pub start_scale: f64,
    pub start_y: f64,
    /// Cumulative translation reported by the previous event
    pub prev_translation: Point,
}

impl PanContext {
    pub fn begin(&mut self, scale: f64, translate_y: f64) {
        *self = Self {
            active: true,
            start_scale: scale,
            start_y: translate_y,
            prev_translation: Point::default(),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Ephemeral context of one pinch stream
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinchContext {
    pub active: bool,
    pub start_scale: f64,
    /// Event scale of the first active sample
    pub initial_event_scale: Option<f64>,
    /// Event scale of the previous two-pointer sample
    pub prev_event_scale: Option<f64>,
    /// Content scale when focal tracking began
    pub anchor_scale: f64,
    /// Translation after the last two-pointer sample
    pub prev_translate: Point,
    /// Set while pinching back in from below the minimum scale of zoomed content
    pub block_exit: bool,
    /// Set once a pointer lifted; the rest of the stream is ignored
    pub suspended: bool,
}

impl PinchContext {
    pub fn begin(&mut self, scale: f64, translation: Point) {
        *self = Self {
            active: true,
            start_scale: scale,
            anchor_scale: scale,
            prev_translate: translation,
            ..Self::default()
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
