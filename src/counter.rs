//! Percentage counter driven by scroll progress.
//!
//! In `direct` mode the displayed value is written straight from progress.
//! In `inertia` mode the value eases towards progress, and once scrolling has
//! been idle for a short while it coasts further in the direction of the last
//! measured scroll velocity.

use crate::config::{
    DEFAULT_COUNTER_MAX, DEFAULT_COUNTER_MIN, IDLE_DELAY_MS, INERTIA_STRENGTH,
    INERTIA_TWEEN_SECS, INERTIA_VELOCITY_THRESHOLD, SETTLE_TWEEN_SECS,
};
use crate::ease::Ease;
use crate::scroll::{Layout, ScrollObserver, ScrollRange, Scrub};
use crate::settings::{CounterMode, EffectConfig};
use crate::timer::IdleTimer;
use crate::tween::Tween;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_FLOAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap());

/// Parse the numeric prefix of an attribute value, e.g. `"42.5%"` -> 42.5.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    LEADING_FLOAT_REGEX
        .captures(input)
        .and_then(|c| c[1].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Text for the two counter targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterText {
    pub number: String,
    /// Two fractional digits followed by `%`.
    pub decimal: String,
}

/// Format to two decimals and split on the decimal point.
pub fn format_counter(value: f64) -> CounterText {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value);
    let (number, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    CounterText {
        number: number.to_string(),
        decimal: format!("{}%", fraction),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterRange {
    pub min: f64,
    pub max: f64,
}

impl Default for CounterRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_COUNTER_MIN,
            max: DEFAULT_COUNTER_MAX,
        }
    }
}

impl CounterRange {
    /// Build from `data-min` / `data-max`. Missing or unparsable values fall
    /// back to the defaults.
    pub fn from_attributes(min: Option<&str>, max: Option<&str>) -> Self {
        Self {
            min: min.and_then(parse_leading_float).unwrap_or(DEFAULT_COUNTER_MIN),
            max: max.and_then(parse_leading_float).unwrap_or(DEFAULT_COUNTER_MAX),
        }
    }

    pub fn value_at(&self, progress: f64) -> f64 {
        self.min + (self.max - self.min) * progress
    }

    /// Inverse of [`value_at`](Self::value_at). A zero-width range maps to 0.
    pub fn progress_of(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        (value - self.min) / span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Settle,
    Coast,
}

/// What happened when the idle timer fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdleOutcome {
    /// Velocity was negligible; nothing started.
    Rest,
    /// A coast towards `target` started.
    Coast { target: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterTick {
    /// New displayed value, when it changed this frame.
    pub value: Option<f64>,
    pub idle: Option<IdleOutcome>,
}

#[derive(Debug, Clone)]
pub struct Counter {
    mode: CounterMode,
    range: CounterRange,
    value: f64,
    last_progress: f64,
    last_time_ms: f64,
    velocity: f64,
    motion: Option<(Motion, Tween)>,
    idle: IdleTimer,
}

impl Counter {
    pub fn new(mode: CounterMode, range: CounterRange, now_ms: f64) -> Self {
        Self {
            mode,
            range,
            value: range.min,
            last_progress: 0.0,
            last_time_ms: now_ms,
            velocity: 0.0,
            motion: None,
            idle: IdleTimer::new(IDLE_DELAY_MS),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_coasting(&self) -> bool {
        matches!(self.motion, Some((Motion::Coast, _)))
    }

    /// Handle a progress emission. Returns the value to display immediately
    /// in `direct` mode.
    pub fn on_progress(&mut self, progress: f64, now_ms: f64) -> Option<f64> {
        let target = self.range.value_at(progress);

        if self.mode == CounterMode::Direct {
            self.value = target;
            self.last_progress = progress;
            self.last_time_ms = now_ms;
            return Some(target);
        }

        let elapsed_ms = now_ms - self.last_time_ms;
        if elapsed_ms <= 0.0 {
            return None;
        }
        self.velocity = (progress - self.last_progress) / (elapsed_ms / 1000.0);

        // Replacing the slot cancels a coast in flight.
        self.motion = Some((
            Motion::Settle,
            Tween::new(self.value, target, now_ms, SETTLE_TWEEN_SECS, Ease::Power2Out),
        ));
        self.last_progress = progress;
        self.last_time_ms = now_ms;
        self.idle.restart(now_ms);
        None
    }

    /// Advance tweens and the idle timer to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> CounterTick {
        let mut tick = CounterTick::default();
        self.advance(now_ms, &mut tick);

        if self.idle.poll(now_ms) {
            let outcome = self.start_coast(now_ms);
            tick.idle = Some(outcome);
            self.advance(now_ms, &mut tick);
        }
        tick
    }

    fn advance(&mut self, now_ms: f64, tick: &mut CounterTick) {
        let Some((motion, tween)) = self.motion else {
            return;
        };
        let sampled = tween.sample(now_ms);
        if sampled != self.value {
            self.value = sampled;
            tick.value = Some(sampled);
        }
        if tween.is_done(now_ms) {
            self.motion = None;
            if motion == Motion::Coast {
                self.velocity = 0.0;
            }
        }
    }

    fn start_coast(&mut self, now_ms: f64) -> IdleOutcome {
        if self.velocity.abs() <= INERTIA_VELOCITY_THRESHOLD {
            return IdleOutcome::Rest;
        }

        let current = self.range.progress_of(self.value);
        let projected = (current + self.velocity * INERTIA_STRENGTH).clamp(0.0, 1.0);
        let target = self.range.value_at(projected);
        debug!(
            "Counter coasting: velocity={:.3}/s progress {:.3} -> {:.3}",
            self.velocity, current, projected
        );
        self.motion = Some((
            Motion::Coast,
            Tween::new(self.value, target, now_ms, INERTIA_TWEEN_SECS, Ease::Power3Out),
        ));
        IdleOutcome::Coast { target }
    }
}

/// Runs a [`Counter`] off the scroll position, one call per frame.
///
/// Velocity and idle detection are measured on raw scroll progress, so the
/// observer here always scrubs directly. Smoothing of the displayed value
/// comes from the counter's own settle tween.
#[derive(Debug, Clone)]
pub struct CounterDriver {
    observer: ScrollObserver,
    counter: Counter,
    config: EffectConfig,
}

impl CounterDriver {
    pub fn new(
        range: ScrollRange,
        layout: &Layout,
        counter: Counter,
        config: &EffectConfig,
    ) -> Self {
        Self {
            observer: ScrollObserver::new(range, layout, Scrub::Direct),
            counter,
            config: config.clone(),
        }
    }

    pub fn refresh(&mut self, layout: &Layout) {
        self.observer.refresh(layout);
    }

    /// Feed this frame's scroll offset. The returned value, if any, is what
    /// the counter should display now.
    pub fn step(&mut self, scroll_y: f64, now_ms: f64) -> CounterTick {
        let mut written = None;
        if let Some(update) = self.observer.update(scroll_y, now_ms) {
            let progress = self.config.bound_progress(update.progress);
            written = self.counter.on_progress(progress, now_ms);
        }
        let mut tick = self.counter.tick(now_ms);
        if tick.value.is_none() {
            tick.value = written;
        }
        tick
    }
}
