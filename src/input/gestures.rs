use crate::{
    core::{
        constants::{DOUBLE_TAP_MAX_DELAY_MS, DOUBLE_TAP_MAX_DISTANCE},
        geo::Point,
    },
    input::events::{GestureEvent, TapEvent},
};
use std::time::Duration;

/// Configuration for tap recognition
#[derive(Debug, Clone, PartialEq)]
pub struct TapConfig {
    /// Maximum time between the taps of a double tap
    pub double_tap_timeout: Duration,
    /// Maximum distance between the taps of a double tap
    pub double_tap_distance_threshold: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout: Duration::from_millis(DOUBLE_TAP_MAX_DELAY_MS),
            double_tap_distance_threshold: DOUBLE_TAP_MAX_DISTANCE,
        }
    }
}

/// Splits raw taps into single and double taps.
///
/// While double taps are enabled a single tap is held back until the
/// double-tap window has passed, so the two never fire for the same touch.
/// Timestamps are monotonic offsets supplied by the caller.
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    config: TapConfig,
    double_tap_enabled: bool,
    pending: Option<(Point, Duration)>,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self::with_config(TapConfig::default())
    }

    pub fn with_config(config: TapConfig) -> Self {
        Self {
            config,
            double_tap_enabled: true,
            pending: None,
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn is_double_tap_enabled(&self) -> bool {
        self.double_tap_enabled
    }

    /// Enables or disables double taps. Disabling releases a held tap.
    pub fn set_double_tap_enabled(&mut self, enabled: bool) -> Option<GestureEvent> {
        self.double_tap_enabled = enabled;
        if enabled {
            None
        } else {
            self.flush()
        }
    }

    /// Whether a single tap is waiting for the double-tap window to close
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feeds a raw tap; returns the gestures it resolves
    pub fn tap(&mut self, position: Point, now: Duration) -> Vec<GestureEvent> {
        let mut output = Vec::new();

        if !self.double_tap_enabled {
            output.extend(self.flush());
            output.push(GestureEvent::SingleTap(TapEvent::new(position.x, position.y)));
            return output;
        }

        if let Some((last_position, last_time)) = self.pending.take() {
            let time_diff = now.saturating_sub(last_time);
            let distance = position.distance_to(&last_position);

            if time_diff <= self.config.double_tap_timeout
                && distance <= self.config.double_tap_distance_threshold
            {
                output.push(GestureEvent::DoubleTap(TapEvent::new(position.x, position.y)));
                return output;
            }

            output.push(GestureEvent::SingleTap(TapEvent::new(
                last_position.x,
                last_position.y,
            )));
        }

        self.pending = Some((position, now));
        output
    }

    /// Releases a held tap once its double-tap window has passed
    pub fn poll(&mut self, now: Duration) -> Option<GestureEvent> {
        match self.pending {
            Some((_, time)) if now.saturating_sub(time) > self.config.double_tap_timeout => {
                self.flush()
            }
            _ => None,
        }
    }

    /// Releases a held tap immediately
    pub fn flush(&mut self) -> Option<GestureEvent> {
        self.pending
            .take()
            .map(|(position, _)| GestureEvent::SingleTap(TapEvent::new(position.x, position.y)))
    }

    /// Drops any held tap
    pub fn reset(&mut self) {
        self.pending = None;
    }
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
