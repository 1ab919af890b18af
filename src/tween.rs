//! Time-based interpolation of a single value.
//!
//! A tween is plain data sampled with an explicit timestamp. Whoever owns the
//! `Option<Tween>` slot owns the animation: replacing or clearing the slot is
//! how a tween is cancelled, so a superseded tween can never write again.

use crate::ease::Ease;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_secs: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: (duration_secs * 1000.0).max(1.0),
            ease,
        }
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }

    pub fn sample(&self, now_ms: f64) -> f64 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Restart towards `new_to` from wherever this tween currently is.
    pub fn retarget(&mut self, now_ms: f64, new_to: f64) {
        let current = self.sample(now_ms);
        *self = Self::new(current, new_to, now_ms, self.duration_ms / 1000.0, self.ease);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_between_endpoints() {
        let tween = Tween::new(10.0, 20.0, 1000.0, 0.5, Ease::Linear);
        assert_eq!(tween.sample(1000.0), 10.0);
        assert!((tween.sample(1250.0) - 15.0).abs() < 1e-9);
        assert_eq!(tween.sample(1500.0), 20.0);
        assert_eq!(tween.sample(9000.0), 20.0);
    }

    #[test]
    fn done_after_duration() {
        let tween = Tween::new(0.0, 1.0, 0.0, 0.3, Ease::Power2Out);
        assert!(!tween.is_done(299.0));
        assert!(tween.is_done(300.0));
    }

    #[test]
    fn sampling_before_start_holds_origin() {
        let tween = Tween::new(5.0, 8.0, 100.0, 1.0, Ease::Power3Out);
        assert_eq!(tween.sample(50.0), 5.0);
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let mut tween = Tween::new(0.0, 100.0, 0.0, 1.0, Ease::Linear);
        tween.retarget(500.0, 0.0);
        assert!((tween.sample(500.0) - 50.0).abs() < 1e-9);
        assert!(tween.is_done(1500.0));
        assert_eq!(tween.sample(1500.0), 0.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tween = Tween::new(0.0, 3.0, 0.0, 0.0, Ease::Linear);
        assert_eq!(tween.sample(1.0), 3.0);
    }
}
