//! Prelude module for common zoomable types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use zoomable::prelude::*;`

pub use crate::core::{
    bounds::{AxisBounds, DisplacementBounds},
    builder::ZoomEngineBuilder,
    config::{GeometryConfig, MotionConfig, MotionProfile},
    engine::{ReleaseDecision, ReleasePlan, Settle, ZoomEngine, ZoomUpdate},
    geo::{Point, Size},
    state::{GestureKind, ZoomPhase},
    viewport::{ContainerTransform, Transform, Viewport},
};

pub use crate::input::{
    events::{GestureEvent, GesturePhase, PanEvent, PinchEvent, TapEvent},
    gestures::{TapConfig, TapRecognizer},
    handler::InputHandler,
};

pub use crate::animation::{
    AnimatedValue, DecayConfig, EasingFunction, FrameClock, SpringConfig, TimingConfig,
};

pub use crate::traits::{Lerp, NoopObserver, RecordingObserver, ZoomObserver};

pub use crate::{Error as ZoomError, Result};

pub use std::time::Duration;
