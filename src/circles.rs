//! Concentric circles mapping.
//!
//! Every circle starts at the same initial scale and grows at one shared rate.
//! Circles are staggered by their start progress so that a circle begins
//! growing once the previous one has reached the trigger scale.

use crate::config::{
    BASE_MAX_SCALE, FADE_OUT_FROM, FADE_OUT_WINDOW, INITIAL_SCALE, MAX_CIRCLE_OPACITY, MAX_SCALE_STEP,
    MIN_CIRCLE_OPACITY, TIGHT_THREE_BUDGET, TIGHT_THREE_OFFSETS, TRIGGER_SCALE,
};
use crate::settings::{OpacityReference, StaggerMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFrame {
    pub scale: f64,
    pub opacity: f64,
}

impl CircleFrame {
    pub fn hidden() -> Self {
        Self {
            scale: INITIAL_SCALE,
            opacity: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleLayout {
    start_progress: Vec<f64>,
    max_scales: Vec<f64>,
    scale_per_progress: f64,
    reference: OpacityReference,
}

impl CircleLayout {
    pub fn new(count: usize, stagger: StaggerMode, reference: OpacityReference) -> Self {
        let (start_progress, budget) = match (stagger, count) {
            (StaggerMode::TightThree, 3) => (TIGHT_THREE_OFFSETS.to_vec(), TIGHT_THREE_BUDGET),
            (_, 0) => (Vec::new(), 1.0),
            _ => {
                let budget = 1.0 / count as f64;
                ((0..count).map(|i| i as f64 * budget).collect(), budget)
            }
        };

        Self {
            start_progress,
            max_scales: (0..count)
                .map(|i| BASE_MAX_SCALE + i as f64 * MAX_SCALE_STEP)
                .collect(),
            scale_per_progress: (TRIGGER_SCALE - INITIAL_SCALE) / budget,
            reference,
        }
    }

    pub fn len(&self) -> usize {
        self.start_progress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_progress.is_empty()
    }

    pub fn start_progress(&self) -> &[f64] {
        &self.start_progress
    }

    pub fn max_scales(&self) -> &[f64] {
        &self.max_scales
    }

    /// Scale growth per unit of progress, shared by every circle.
    pub fn scale_per_progress(&self) -> f64 {
        self.scale_per_progress
    }

    pub fn scale(&self, index: usize, progress: f64) -> f64 {
        match self.start_progress.get(index) {
            Some(&start) if progress >= start => {
                INITIAL_SCALE + (progress - start) * self.scale_per_progress
            }
            _ => INITIAL_SCALE,
        }
    }

    pub fn opacity(&self, index: usize, progress: f64) -> f64 {
        let Some(&start) = self.start_progress.get(index) else {
            return 0.0;
        };
        // Scale starts inclusively, but a circle stays invisible until it has
        // actually grown past its start.
        if progress <= start {
            return 0.0;
        }

        let span = self.reference_max_scale(index) - INITIAL_SCALE;
        let normalized = if span > 0.0 {
            ((self.scale(index, progress) - INITIAL_SCALE) / span).min(1.0)
        } else {
            1.0
        };
        let mut opacity =
            MIN_CIRCLE_OPACITY + normalized * (MAX_CIRCLE_OPACITY - MIN_CIRCLE_OPACITY);

        if progress > FADE_OUT_FROM {
            opacity *= (1.0 - progress) / FADE_OUT_WINDOW;
        }
        opacity.max(0.0)
    }

    fn reference_max_scale(&self, index: usize) -> f64 {
        let chosen = match self.reference {
            OpacityReference::FirstCircle => self.max_scales.first(),
            OpacityReference::OwnCircle => self.max_scales.get(index),
        };
        chosen.copied().unwrap_or(BASE_MAX_SCALE)
    }

    pub fn frame(&self, progress: f64) -> Vec<CircleFrame> {
        (0..self.len())
            .map(|i| CircleFrame {
                scale: self.scale(i, progress),
                opacity: self.opacity(i, progress),
            })
            .collect()
    }
}
