//! Easing curves used by the tween engine.

/// Maps normalized tween time to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// No easing (`none`).
    Linear,
    /// Cubic ease-out (`power2.out`).
    Power2Out,
    /// Quartic ease-out (`power3.out`).
    Power3Out,
}

impl Ease {
    /// Apply the curve to `t`, clamped into `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 3] = [Ease::Linear, Ease::Power2Out, Ease::Power3Out];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn input_is_clamped() {
        for ease in ALL {
            assert_eq!(ease.apply(-0.5), 0.0);
            assert_eq!(ease.apply(1.5), 1.0);
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        assert!(Ease::Power2Out.apply(0.3) > Ease::Linear.apply(0.3));
        assert!(Ease::Power3Out.apply(0.3) > Ease::Power2Out.apply(0.3));
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in ALL {
            let mut prev = 0.0;
            for step in 1..=100 {
                let v = ease.apply(step as f64 / 100.0);
                assert!(v >= prev);
                prev = v;
            }
        }
    }
}
