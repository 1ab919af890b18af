//! Runtime-selectable behaviour for the two effects.
//!
//! Pages differ in stagger, mask sizing and counter feel. Each difference is
//! a named option so a page picks its behaviour explicitly.

use crate::scroll::Scrub;
use serde::{Deserialize, Serialize};

/// How circle start offsets are distributed over the progress range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaggerMode {
    /// Circle `i` starts at `i / N`.
    Equal,
    /// Three circles start at 0, 0.23 and 0.46. Any other count uses `Equal`.
    TightThree,
}

/// Formula for the maximum mask extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskSizeFormula {
    /// Viewport diagonal times 15.
    Diagonal,
    /// Larger viewport side times 3.
    ViewportMax,
}

/// How the counter follows scroll progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterMode {
    /// Counter value is written straight from progress.
    Direct,
    /// Counter eases towards progress and coasts after scrolling stops.
    Inertia,
}

/// Which max scale normalizes circle opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpacityReference {
    /// Every circle normalizes against circle 0's max scale.
    FirstCircle,
    /// Circle `i` normalizes against its own max scale.
    OwnCircle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    pub stagger: StaggerMode,
    pub mask_size: MaskSizeFormula,
    pub counter: CounterMode,
    pub opacity_reference: OpacityReference,
    /// Clamp observer progress to [0, 1] before mapping.
    pub clamp_progress: bool,
    /// Catch-up time for circle and mask progress. `0` follows scroll exactly.
    /// The counter always reads raw progress.
    pub scrub_secs: f64,
    pub resize_debounce_ms: u32,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            stagger: StaggerMode::TightThree,
            mask_size: MaskSizeFormula::Diagonal,
            counter: CounterMode::Inertia,
            opacity_reference: OpacityReference::FirstCircle,
            clamp_progress: true,
            scrub_secs: 0.0,
            resize_debounce_ms: crate::config::RESIZE_DEBOUNCE_MS,
            log_level: "warn".to_string(),
        }
    }
}

impl EffectConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    /// Scrub for the circle and mask observers.
    pub fn visual_scrub(&self) -> Scrub {
        if self.scrub_secs > 0.0 {
            Scrub::Smooth(self.scrub_secs)
        } else {
            Scrub::Direct
        }
    }

    /// Apply the clamp policy to an observed progress value.
    pub fn bound_progress(&self, progress: f64) -> f64 {
        if self.clamp_progress {
            progress.clamp(0.0, 1.0)
        } else {
            progress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = EffectConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EffectConfig::default());
    }

    #[test]
    fn kebab_case_variants_parse() {
        let cfg = EffectConfig::from_json(
            r#"{"stagger":"equal","maskSize":"viewport-max","counter":"direct",
                "opacityReference":"own-circle","clampProgress":false}"#,
        )
        .unwrap();
        assert_eq!(cfg.stagger, StaggerMode::Equal);
        assert_eq!(cfg.mask_size, MaskSizeFormula::ViewportMax);
        assert_eq!(cfg.counter, CounterMode::Direct);
        assert_eq!(cfg.opacity_reference, OpacityReference::OwnCircle);
        assert!(!cfg.clamp_progress);
        assert_eq!(cfg.resize_debounce_ms, 250);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(EffectConfig::from_json(r#"{"stagger":"random"}"#).is_err());
    }

    #[test]
    fn bad_log_level_falls_back_to_warn() {
        let cfg = EffectConfig {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert_eq!(cfg.log_level_filter(), log::LevelFilter::Warn);
        let cfg = EffectConfig {
            log_level: "debug".into(),
            ..Default::default()
        };
        assert_eq!(cfg.log_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn scrub_secs_selects_visual_scrub() {
        assert_eq!(EffectConfig::default().visual_scrub(), Scrub::Direct);
        let cfg = EffectConfig::from_json(r#"{"scrubSecs":1.0}"#).unwrap();
        assert_eq!(cfg.visual_scrub(), Scrub::Smooth(1.0));
        let cfg = EffectConfig::from_json(r#"{"scrubSecs":-2}"#).unwrap();
        assert_eq!(cfg.visual_scrub(), Scrub::Direct);
    }

    #[test]
    fn bound_progress_respects_clamp_flag() {
        let mut cfg = EffectConfig::default();
        assert_eq!(cfg.bound_progress(1.2), 1.0);
        assert_eq!(cfg.bound_progress(-0.1), 0.0);
        cfg.clamp_progress = false;
        assert_eq!(cfg.bound_progress(1.2), 1.2);
    }
}
