pub mod interpolation;
pub mod transitions;
pub mod tweening;

// Re-export commonly used types for convenience
pub use interpolation::{EasingFunction, Interpolation};
pub use transitions::{
    AnimatedValue, Animation, Decay, DecayConfig, FrameClock, Spring, SpringConfig, TimingConfig,
};
pub use tweening::Tween;
