//! Engine-wide constants for zoom bounds, dismissal and settle physics.

/// Resting scale of content that exactly fills its layout box.
pub const MIN_IMAGE_SCALE: f64 = 1.0;

/// Largest resting scale a gesture may settle at.
pub const MAX_IMAGE_SCALE: f64 = 4.0;

/// Vertical displacement plus velocity (display-independent units) that dismisses
/// zoomed content on pan release. Multiplied by the target scale.
pub const DISMISS_THRESHOLD: f64 = 250.0;

/// Lower bound of the scale a double tap zooms into.
pub const DOUBLE_TAP_MIN_SCALE: f64 = 2.5;

/// Per-millisecond velocity retention of the free-scroll decay.
pub const DECAY_DECELERATION: f64 = 0.97;

/// Height reserved above inline content by the host sheet chrome.
pub const CHROME_OFFSET: f64 = 85.0;

/// Corner radius of inline content when none is configured.
pub const DEFAULT_CORNER_RADIUS: f64 = 16.0;

/// Duration of timing-curve settle animations, in milliseconds.
pub const ADJUST_DURATION_MS: u64 = 300;

/// Maximum delay between the taps of a double tap, in milliseconds.
pub const DOUBLE_TAP_MAX_DELAY_MS: u64 = 420;

/// Maximum distance between the taps of a double tap, in pixels.
pub const DOUBLE_TAP_MAX_DISTANCE: f64 = 50.0;
