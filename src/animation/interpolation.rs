use crate::traits::Lerp;
use serde::{Deserialize, Serialize};

/// Easing curves available to timing animations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingFunction {
    Linear,
    /// CSS-style cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier(f64, f64, f64, f64),
}

impl EasingFunction {
    /// Deceleration curve used by every timing settle
    pub const ADJUST: EasingFunction = EasingFunction::CubicBezier(0.4, 0.0, 0.22, 1.0);

    /// Apply the easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            EasingFunction::Linear => t,
            EasingFunction::CubicBezier(x1, y1, x2, y2) => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = Interpolation::solve_bezier_x(x1, x2, t);
                Interpolation::bezier_cubic(0.0, y1, y2, 1.0, u)
            }
        }
    }
}

/// Main interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two f64 values
    pub fn linear(start: f64, end: f64, t: f64) -> f64 {
        start.lerp(&end, t)
    }

    /// Interpolation with easing function
    pub fn ease(start: f64, end: f64, t: f64, easing: EasingFunction) -> f64 {
        let eased_t = easing.apply(t);
        Self::linear(start, end, eased_t)
    }

    /// Interpolate along a bezier curve
    pub fn bezier_cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        let tt = t * t;
        let uu = u * u;
        let uuu = uu * u;
        let ttt = tt * t;

        uuu * p0 + 3.0 * uu * t * p1 + 3.0 * u * tt * p2 + ttt * p3
    }

    fn bezier_slope(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Finds the curve parameter whose x coordinate equals `x`.
    /// Newton-Raphson first, bisection when the slope flattens out.
    fn solve_bezier_x(x1: f64, x2: f64, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..8 {
            let err = Self::bezier_cubic(0.0, x1, x2, 1.0, t) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let slope = Self::bezier_slope(x1, x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = Self::bezier_cubic(0.0, x1, x2, 1.0, t);
            if (value - x).abs() < 1e-7 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}
