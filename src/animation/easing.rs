use serde::{Deserialize, Serialize};

/// Progress curve applied to normalized transition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuad,
}

impl Easing {
    /// Maps `t` in `[0, 1]` to eased progress; out-of-range input is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for easing in [
            Easing::Linear,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::EaseOutQuad,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn ease_out_front_loads_progress() {
        assert!((Easing::EaseOutCubic.apply(0.5) - 0.875).abs() <= 1e-12);
        assert!(Easing::EaseOutCubic.apply(0.25) > Easing::Linear.apply(0.25));
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::EaseOutQuad.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseOutQuad.apply(7.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 1.0);
    }
}
