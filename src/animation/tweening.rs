use crate::animation::interpolation::EasingFunction;
use crate::traits::Lerp;
use std::time::Duration;

/// A timing animation between two values, advanced by explicit frame deltas
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T: Lerp + Clone> {
    /// Starting value
    pub from: T,
    /// Ending value
    pub to: T,
    /// Animation duration
    pub duration: Duration,
    /// Easing function to use
    pub easing: EasingFunction,
    elapsed: Duration,
}

impl<T: Lerp + Clone> Tween<T> {
    /// Create a new tween with the default settle curve
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self::with_easing(from, to, duration, EasingFunction::ADJUST)
    }

    /// Create a new tween with custom easing
    pub fn with_easing(from: T, to: T, duration: Duration, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            elapsed: Duration::ZERO,
        }
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        }
    }

    /// Check if the animation is finished
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Get the current value
    pub fn current_value(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        let eased_progress = self.easing.apply(self.progress());
        self.from.lerp(&self.to, eased_progress)
    }

    /// Advance the tween and return the current value
    pub fn update(&mut self, dt: Duration) -> T {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.current_value()
    }
}
