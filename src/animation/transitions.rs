//! Settle animations that bring a single state variable to rest after a gesture.
//!
//! Three curves exist: a timing tween, a damped spring and a clamped velocity
//! decay. An [`AnimatedValue`] owns at most one of them at a time; assigning the
//! value directly or starting another animation cancels the running one.

use crate::animation::{interpolation::EasingFunction, tweening::Tween};
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest integration step used by springs, in seconds
const SPRING_MAX_STEP: f64 = 1.0 / 240.0;

/// Decay stops once speed falls below this many units per second
const DECAY_REST_SPEED: f64 = 1.0;

/// Parameters of a timing settle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub duration_ms: u64,
    pub easing: EasingFunction,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: crate::core::constants::ADJUST_DURATION_MS,
            easing: EasingFunction::ADJUST,
        }
    }
}

/// Parameters of a damped spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Stop at the target instead of swinging past it
    pub overshoot_clamping: bool,
    pub rest_displacement: f64,
    pub rest_speed: f64,
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            overshoot_clamping: true,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }

    /// Damping ratio; below 1.0 the free spring oscillates
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness.max(1e-4) * self.mass.max(1e-4)).sqrt())
    }
}

/// Parameters of a velocity decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Fraction of velocity retained per millisecond
    pub deceleration: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            deceleration: crate::core::constants::DECAY_DECELERATION,
        }
    }
}

/// A damped spring integrated with semi-implicit Euler sub-steps
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    pub position: f64,
    pub velocity: f64,
    pub target: f64,
    config: SpringConfig,
    start_side: f64,
    done: bool,
}

impl Spring {
    pub fn new(from: f64, target: f64, velocity: f64, config: SpringConfig) -> Self {
        let start_side = (from - target).signum();
        let done = from == target && velocity == 0.0;
        Self {
            position: if done { target } else { from },
            velocity,
            target,
            config,
            start_side,
            done,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }

    pub fn update(&mut self, dt: Duration) -> f64 {
        if self.done {
            return self.position;
        }

        let k = self.config.stiffness.max(1e-4);
        let c = self.config.damping.max(0.0);
        let m = self.config.mass.max(1e-4);

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 && !self.done {
            let h = remaining.min(SPRING_MAX_STEP);
            remaining -= h;

            let acceleration = (-k * (self.position - self.target) - c * self.velocity) / m;
            self.velocity += acceleration * h;
            self.position += self.velocity * h;

            let crossed = (self.position - self.target).signum() != self.start_side
                && self.start_side != 0.0;
            let at_rest = self.velocity.abs() < self.config.rest_speed
                && (self.position - self.target).abs() < self.config.rest_displacement;

            if (self.config.overshoot_clamping && crossed) || at_rest {
                self.position = self.target;
                self.velocity = 0.0;
                self.done = true;
            }
        }

        self.position
    }
}

/// Free scroll that bleeds off velocity and stops at the clamp range
#[derive(Debug, Clone, PartialEq)]
pub struct Decay {
    pub position: f64,
    /// Units per second
    pub velocity: f64,
    deceleration: f64,
    clamp: Option<(f64, f64)>,
    done: bool,
}

impl Decay {
    pub fn new(from: f64, velocity: f64, config: DecayConfig, clamp: Option<(f64, f64)>) -> Self {
        Self {
            position: from,
            velocity,
            deceleration: config.deceleration.clamp(0.0, 1.0),
            clamp,
            done: velocity.abs() < DECAY_REST_SPEED,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Position the decay comes to rest at, honouring the clamp range
    pub fn resting_position(&self) -> f64 {
        let travel = if self.done {
            0.0
        } else if (1.0 - self.deceleration).abs() < 1e-9 {
            self.velocity.signum() * f64::INFINITY
        } else {
            self.velocity / 1000.0 * self.deceleration / (1.0 - self.deceleration)
        };
        self.clamp_position(self.position + travel)
    }

    fn clamp_position(&self, position: f64) -> f64 {
        match self.clamp {
            Some((lo, hi)) => position.clamp(lo.min(hi), hi.max(lo)),
            None => position,
        }
    }

    pub fn update(&mut self, dt: Duration) -> f64 {
        if self.done {
            return self.position;
        }

        let dt_ms = dt.as_secs_f64() * 1000.0;
        let per_ms = self.velocity / 1000.0;
        let kv = self.deceleration.powf(dt_ms);
        let kx = if (1.0 - self.deceleration).abs() < 1e-9 {
            dt_ms
        } else {
            self.deceleration * (1.0 - kv) / (1.0 - self.deceleration)
        };

        self.position += per_ms * kx;
        self.velocity = per_ms * kv * 1000.0;

        let clamped = self.clamp_position(self.position);
        if clamped != self.position {
            self.position = clamped;
            self.velocity = 0.0;
            self.done = true;
        } else if self.velocity.abs() < DECAY_REST_SPEED {
            self.velocity = 0.0;
            self.done = true;
        }

        self.position
    }
}

/// Any animation that can drive an [`AnimatedValue`]
#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    Timing(Tween<f64>),
    Spring(Spring),
    Decay(Decay),
}

impl Animation {
    pub fn timing(from: f64, to: f64, config: &TimingConfig) -> Self {
        Animation::Timing(Tween::with_easing(
            from,
            to,
            Duration::from_millis(config.duration_ms),
            config.easing,
        ))
    }

    pub fn spring(from: f64, to: f64, config: &SpringConfig) -> Self {
        Animation::Spring(Spring::new(from, to, 0.0, *config))
    }

    pub fn decay(from: f64, velocity: f64, config: &DecayConfig, clamp: (f64, f64)) -> Self {
        Animation::Decay(Decay::new(from, velocity, *config, Some(clamp)))
    }

    /// Value this animation settles at
    pub fn target(&self) -> f64 {
        match self {
            Animation::Timing(tween) => tween.to,
            Animation::Spring(spring) => spring.target,
            Animation::Decay(decay) => decay.resting_position(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Animation::Timing(tween) => tween.is_finished(),
            Animation::Spring(spring) => spring.is_finished(),
            Animation::Decay(decay) => decay.is_finished(),
        }
    }

    pub fn update(&mut self, dt: Duration) -> f64 {
        match self {
            Animation::Timing(tween) => tween.update(dt),
            Animation::Spring(spring) => spring.update(dt),
            Animation::Decay(decay) => decay.update(dt),
        }
    }
}

/// A scalar driven either directly by gestures or by one settle animation
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    value: f64,
    animation: Option<Animation>,
}

impl AnimatedValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    /// Assigns the value, cancelling any running animation
    pub fn set(&mut self, value: f64) {
        self.animation = None;
        self.value = value;
    }

    /// Replaces any running animation with `animation`
    pub fn animate(&mut self, animation: Animation) {
        if animation.is_finished() {
            self.value = animation.target();
            self.animation = None;
        } else {
            self.animation = Some(animation);
        }
    }

    pub fn timing_to(&mut self, target: f64, config: &TimingConfig) {
        self.animate(Animation::timing(self.value, target, config));
    }

    pub fn spring_to(&mut self, target: f64, config: &SpringConfig) {
        self.animate(Animation::spring(self.value, target, config));
    }

    pub fn decay(&mut self, velocity: f64, config: &DecayConfig, clamp: (f64, f64)) {
        self.animate(Animation::decay(self.value, velocity, config, clamp));
    }

    /// Completes any running animation immediately
    pub fn finish(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.value = animation.target();
        }
    }

    /// Stops any running animation where it is
    pub fn cancel(&mut self) {
        self.animation = None;
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    /// Value once the running animation (if any) comes to rest
    pub fn resting_value(&self) -> f64 {
        self.animation
            .as_ref()
            .map(Animation::target)
            .unwrap_or(self.value)
    }

    /// Advances the running animation; returns whether the value changed
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let before = self.value;
        self.value = animation.update(dt);
        if animation.is_finished() {
            self.animation = None;
        }
        self.value != before
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Measures wall-clock time between frames for hosts without their own frame clock
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Time since the previous call; zero on the first call
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
