pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{GestureEvent, GesturePhase, PanEvent, PinchEvent, TapEvent};
pub use gestures::{TapConfig, TapRecognizer};
pub use handler::InputHandler;
