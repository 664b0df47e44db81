//! Property tweens driven by the host's compositor clock.
//!
//! Only the transitions grid separators need: linear-ish interpolation of a
//! single `f64` property between two values over a fixed duration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress `t` in [0, 1] to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out (slow end).
    EaseOut,
    /// Quadratic ease-in-out.
    EaseInOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Interpolates one value from `from` to `to` over `duration`.
///
/// Elapsed time is accumulated as [`Duration`] so repeated small ticks do not
/// drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing: Easing::Linear,
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress before easing, in [0, 1].
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Easing, Tween};

    #[test]
    fn linear_tween_interpolates_and_lands_exactly() {
        let mut tween = Tween::new(10.0, 20.0, Duration::from_millis(500));
        assert_eq!(tween.value(), 10.0);

        tween.advance(Duration::from_millis(250));
        assert!((tween.value() - 15.0).abs() <= 1e-9);
        assert!(!tween.is_complete());

        tween.advance(Duration::from_millis(400));
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 20.0);
    }

    #[test]
    fn zero_duration_tween_is_immediately_complete() {
        let tween = Tween::new(0.0, 1.0, Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn easing_curves_keep_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }
}
