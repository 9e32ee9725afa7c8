//! # Zoomable
//!
//! Gesture-driven pinch, pan and zoom geometry for displayed images.
//!
//! The [`ZoomEngine`] consumes decoded pan, pinch and tap events and
//! maintains the content transform (scale, translation, layout progress)
//! together with a discrete zoomed flag. Releases settle the content through
//! timing, spring and decay animations that the host advances frame by frame.
//! The [`InputHandler`] adds recognizer gating, tap disambiguation and
//! observer notification on top of the engine.

pub mod animation;
pub mod core;
pub mod input;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::ZoomEngineBuilder,
    config::{GeometryConfig, MotionConfig, MotionProfile},
    engine::{ZoomEngine, ZoomUpdate},
    geo::{Point, Size},
    state::ZoomPhase,
    viewport::{Transform, Viewport},
};

pub use crate::input::{events::GestureEvent, handler::InputHandler};

pub use crate::traits::ZoomObserver;

pub use crate::animation::{transitions::AnimatedValue, tweening::Tween};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ZoomError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ZoomError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Error type alias for convenience
pub type Error = ZoomError;
