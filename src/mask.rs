//! Mask reveal mapping: scroll progress to mask extent and opacity.

use crate::config::{DIAGONAL_MULTIPLIER, VIEWPORT_MAX_MULTIPLIER};
use crate::scroll::ToggleEvent;
use crate::settings::MaskSizeFormula;

/// Largest mask extent in pixels for a viewport of `width` x `height`.
///
/// Both formulas overshoot the viewport by a wide margin so the mask shape is
/// fully out of frame at progress 1.
pub fn max_mask_extent(formula: MaskSizeFormula, width: f64, height: f64) -> f64 {
    let width = width.max(0.0);
    let height = height.max(0.0);
    match formula {
        MaskSizeFormula::Diagonal => width.hypot(height) * DIAGONAL_MULTIPLIER,
        MaskSizeFormula::ViewportMax => width.max(height) * VIEWPORT_MAX_MULTIPLIER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskFrame {
    pub extent_px: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaskReveal {
    formula: MaskSizeFormula,
    max_extent: f64,
    active: bool,
}

impl MaskReveal {
    pub fn new(formula: MaskSizeFormula, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            formula,
            max_extent: max_mask_extent(formula, viewport_width, viewport_height),
            active: false,
        }
    }

    pub fn max_extent(&self) -> f64 {
        self.max_extent
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) {
        self.max_extent = max_mask_extent(self.formula, viewport_width, viewport_height);
    }

    /// Progress is clamped to [0, 1]; a mask size or opacity outside that
    /// range is meaningless.
    pub fn frame(&self, progress: f64) -> MaskFrame {
        let progress = progress.clamp(0.0, 1.0);
        MaskFrame {
            extent_px: progress * self.max_extent,
            opacity: progress,
        }
    }

    /// Apply a range toggle. Only leaving backwards past the start clears
    /// the active state. Returns true when the state changed.
    pub fn toggle(&mut self, event: ToggleEvent) -> bool {
        let next = !matches!(event, ToggleEvent::LeaveBack);
        let changed = next != self.active;
        self.active = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EffectConfig;

    #[test]
    fn diagonal_formula() {
        assert_eq!(max_mask_extent(MaskSizeFormula::Diagonal, 300.0, 400.0), 7500.0);
    }

    #[test]
    fn viewport_max_formula() {
        assert_eq!(
            max_mask_extent(MaskSizeFormula::ViewportMax, 1280.0, 720.0),
            3840.0
        );
    }

    #[test]
    fn both_formulas_cover_viewport() {
        for formula in [MaskSizeFormula::Diagonal, MaskSizeFormula::ViewportMax] {
            let m = max_mask_extent(formula, 1920.0, 1080.0);
            assert!(m >= 1920.0_f64.hypot(1080.0));
        }
    }

    #[test]
    fn extent_is_linear_and_monotonic() {
        let reveal = MaskReveal::new(MaskSizeFormula::Diagonal, 300.0, 400.0);
        assert_eq!(reveal.frame(0.0).extent_px, 0.0);
        assert_eq!(reveal.frame(1.0).extent_px, reveal.max_extent());
        let mut prev = -1.0;
        for step in 0..=50 {
            let frame = reveal.frame(step as f64 / 50.0);
            assert!(frame.extent_px >= prev);
            prev = frame.extent_px;
        }
        assert_eq!(reveal.frame(0.25).opacity, 0.25);
    }

    #[test]
    fn resize_recomputes_extent() {
        let mut reveal = MaskReveal::new(MaskSizeFormula::ViewportMax, 100.0, 50.0);
        assert_eq!(reveal.max_extent(), 300.0);
        reveal.resize(200.0, 400.0);
        assert_eq!(reveal.max_extent(), 1200.0);
    }

    #[test]
    fn frame_clamps_out_of_range_progress() {
        let config = EffectConfig {
            clamp_progress: false,
            ..Default::default()
        };
        let reveal = MaskReveal::new(MaskSizeFormula::Diagonal, 1280.0, 800.0);

        let before = reveal.frame(config.bound_progress(-0.4));
        assert_eq!(before, MaskFrame { extent_px: 0.0, opacity: 0.0 });

        let after = reveal.frame(config.bound_progress(1.3));
        assert_eq!(
            after,
            MaskFrame {
                extent_px: reveal.max_extent(),
                opacity: 1.0,
            }
        );
    }

    #[test]
    fn only_leave_back_deactivates() {
        let mut reveal = MaskReveal::new(MaskSizeFormula::Diagonal, 10.0, 10.0);
        assert!(!reveal.is_active());
        assert!(reveal.toggle(ToggleEvent::Enter));
        assert!(!reveal.toggle(ToggleEvent::Leave));
        assert!(reveal.is_active());
        assert!(!reveal.toggle(ToggleEvent::EnterBack));
        assert!(reveal.toggle(ToggleEvent::LeaveBack));
        assert!(!reveal.is_active());
    }
}
