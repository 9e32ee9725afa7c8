use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a continuous gesture stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Start,
    Active,
    End,
    Cancel,
    Fail,
}

impl GesturePhase {
    /// Whether this phase terminates the stream
    pub fn is_release(&self) -> bool {
        matches!(self, GesturePhase::End | GesturePhase::Cancel | GesturePhase::Fail)
    }
}

/// Pan stream sample. Translation is cumulative since the stream started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanEvent {
    pub translation_x: f64,
    pub translation_y: f64,
    #[serde(default)]
    pub velocity_x: f64,
    #[serde(default)]
    pub velocity_y: f64,
    #[serde(default = "default_pointers")]
    pub number_of_pointers: u32,
    pub phase: GesturePhase,
}

fn default_pointers() -> u32 {
    1
}

impl PanEvent {
    pub fn new(phase: GesturePhase, translation_x: f64, translation_y: f64) -> Self {
        Self {
            translation_x,
            translation_y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            number_of_pointers: 1,
            phase,
        }
    }

    pub fn with_velocity(mut self, velocity_x: f64, velocity_y: f64) -> Self {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
        self
    }

    pub fn with_pointers(mut self, number_of_pointers: u32) -> Self {
        self.number_of_pointers = number_of_pointers;
        self
    }
}

/// Pinch stream sample. `scale` is cumulative since the stream started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchEvent {
    pub scale: f64,
    pub focal_x: f64,
    pub focal_y: f64,
    #[serde(default = "default_pinch_pointers")]
    pub number_of_pointers: u32,
    pub phase: GesturePhase,
}

fn default_pinch_pointers() -> u32 {
    2
}

impl PinchEvent {
    pub fn new(phase: GesturePhase, scale: f64, focal: Point) -> Self {
        Self {
            scale,
            focal_x: focal.x,
            focal_y: focal.y,
            number_of_pointers: 2,
            phase,
        }
    }

    pub fn with_pointers(mut self, number_of_pointers: u32) -> Self {
        self.number_of_pointers = number_of_pointers;
        self
    }

    pub fn focal(&self) -> Point {
        Point::new(self.focal_x, self.focal_y)
    }
}

/// A recognised tap in absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapEvent {
    pub absolute_x: f64,
    pub absolute_y: f64,
}

impl TapEvent {
    pub fn new(absolute_x: f64, absolute_y: f64) -> Self {
        Self {
            absolute_x,
            absolute_y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.absolute_x, self.absolute_y)
    }
}

/// Decoded gesture input consumed by the zoom engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Pan(PanEvent),
    Pinch(PinchEvent),
    SingleTap(TapEvent),
    DoubleTap(TapEvent),
}

impl GestureEvent {
    /// Gets the position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            GestureEvent::Pinch(pinch) => Some(pinch.focal()),
            GestureEvent::SingleTap(tap) | GestureEvent::DoubleTap(tap) => Some(tap.position()),
            GestureEvent::Pan(_) => None,
        }
    }

    /// Checks if this is a discrete tap
    pub fn is_tap(&self) -> bool {
        matches!(self, GestureEvent::SingleTap(_) | GestureEvent::DoubleTap(_))
    }
}
