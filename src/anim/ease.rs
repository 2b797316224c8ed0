//! Easing curves used by the page's tweens

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ease {
    #[default]
    Linear,
    Power1Out,
    Power2Out,
    Power3Out,
    Power1InOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power1InOut,
    ];

    #[test]
    fn test_endpoints_are_stable() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_monotonic_spot_check() {
        for ease in ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{:?}", ease);
            assert!(b < c, "{:?}", ease);
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Ease::Power1Out.apply(0.3) > 0.3);
        assert!(Ease::Power3Out.apply(0.3) > Ease::Power2Out.apply(0.3));
    }

    #[test]
    fn test_clamps_outside_unit_range() {
        assert_eq!(Ease::Power2Out.apply(-1.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(3.0), 1.0);
    }
}
