pub mod bounds;
pub mod builder;
pub mod config;
pub mod constants;
pub mod engine;
pub mod geo;
pub mod state;
pub mod viewport;

pub use bounds::{AxisBounds, DisplacementBounds};
pub use builder::ZoomEngineBuilder;
pub use config::{GeometryConfig, MotionConfig, MotionProfile};
pub use engine::{ReleaseDecision, ReleasePlan, Settle, ZoomEngine, ZoomUpdate};
pub use geo::{Point, Size};
pub use state::{GestureKind, GestureState, ZoomPhase};
pub use viewport::{ContainerTransform, Transform, Viewport};
