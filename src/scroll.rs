//! Scroll-progress observation.
//!
//! A [`ScrollRange`] is two markers describing where progress 0 and 1 sit
//! relative to a trigger element. Markers are resolved to document pixel
//! positions against a [`Layout`] snapshot, and a [`ScrollObserver`] turns
//! successive scroll offsets into progress updates plus enter/leave toggles.
//!
//! Marker syntax:
//! - `"<trigger edge> <viewport edge>"`, each edge one of `top`, `center`,
//!   `bottom`, `N%` or `Npx` (bare numbers are pixels). `"top center"` means
//!   "when the trigger's top meets the viewport's center".
//! - `"+=N%"` / `"+=Npx"`, an offset from the resolved start. Percentages are
//!   of the viewport height.

use crate::ease::Ease;
use crate::tween::Tween;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static EDGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(top|center|bottom|-?\d+(?:\.\d+)?(?:%|px)?)$").unwrap());
static ANCHORED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s+(\S+)$").unwrap());
static RELATIVE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+=\s*(-?\d+(?:\.\d+)?)(%|px)?$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerParseError {
    Empty,
    InvalidEdge(String),
    InvalidFormat(String),
}

impl fmt::Display for MarkerParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerParseError::Empty => write!(f, "Scroll marker cannot be empty"),
            MarkerParseError::InvalidEdge(edge) => write!(
                f,
                "Invalid marker edge '{}'. Use top, center, bottom, N% or Npx",
                edge
            ),
            MarkerParseError::InvalidFormat(marker) => write!(
                f,
                "Invalid scroll marker '{}'. Use \"top center\" or \"+=400%\"",
                marker
            ),
        }
    }
}

impl std::error::Error for MarkerParseError {}

/// A position along one axis of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    /// Fraction of the box extent, `top` = 0, `bottom` = 1.
    Fraction(f64),
    Pixels(f64),
}

impl Edge {
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Edge::Fraction(f) => f * extent,
            Edge::Pixels(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !EDGE_REGEX.is_match(s) {
            return Err(MarkerParseError::InvalidEdge(s.to_string()));
        }
        match s {
            "top" => Ok(Edge::Fraction(0.0)),
            "center" => Ok(Edge::Fraction(0.5)),
            "bottom" => Ok(Edge::Fraction(1.0)),
            _ => parse_length(s).ok_or_else(|| MarkerParseError::InvalidEdge(s.to_string())),
        }
    }
}

fn parse_length(s: &str) -> Option<Edge> {
    if let Some(pct) = s.strip_suffix('%') {
        return pct.parse::<f64>().ok().map(|v| Edge::Fraction(v / 100.0));
    }
    s.trim_end_matches("px").parse::<f64>().ok().map(Edge::Pixels)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    /// Scroll offset at which `trigger` edge meets `viewport` edge.
    Anchored { trigger: Edge, viewport: Edge },
    /// Offset past the resolved start, in viewport units.
    Relative(Edge),
}

impl FromStr for Marker {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MarkerParseError::Empty);
        }

        if let Some(captures) = RELATIVE_REGEX.captures(trimmed) {
            let amount: f64 = captures[1]
                .parse()
                .map_err(|_| MarkerParseError::InvalidFormat(trimmed.to_string()))?;
            let edge = match captures.get(2).map(|m| m.as_str()) {
                Some("%") => Edge::Fraction(amount / 100.0),
                _ => Edge::Pixels(amount),
            };
            return Ok(Marker::Relative(edge));
        }

        if let Some(captures) = ANCHORED_REGEX.captures(trimmed) {
            return Ok(Marker::Anchored {
                trigger: captures[1].parse()?,
                viewport: captures[2].parse()?,
            });
        }

        Err(MarkerParseError::InvalidFormat(trimmed.to_string()))
    }
}

/// Geometry snapshot the markers resolve against, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub trigger_top: f64,
    pub trigger_height: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: Marker,
    pub end: Marker,
}

impl ScrollRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, MarkerParseError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    pub fn resolve(&self, layout: &Layout) -> ResolvedRange {
        let start = resolve_marker(self.start, layout, layout.trigger_top);
        let end = resolve_marker(self.end, layout, start);
        ResolvedRange { start, end }
    }
}

fn resolve_marker(marker: Marker, layout: &Layout, origin: f64) -> f64 {
    match marker {
        Marker::Anchored { trigger, viewport } => {
            layout.trigger_top + trigger.resolve(layout.trigger_height)
                - viewport.resolve(layout.viewport_height)
        }
        Marker::Relative(offset) => origin + offset.resolve(layout.viewport_height),
    }
}

/// Where the scroll offset sits relative to a resolved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Before,
    Inside,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRange {
    pub start: f64,
    pub end: f64,
}

impl ResolvedRange {
    /// Unclamped progress. A degenerate range jumps from 0 to 1 at `start`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        (scroll_y - self.start) / span
    }

    pub fn region(&self, scroll_y: f64) -> Region {
        if scroll_y < self.start {
            Region::Before
        } else if scroll_y > self.end {
            Region::After
        } else {
            Region::Inside
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Toggles crossed when moving between regions, in crossing order.
pub fn transitions(from: Region, to: Region) -> &'static [ToggleEvent] {
    use Region::*;
    use ToggleEvent::*;
    match (from, to) {
        (Before, Inside) => &[Enter],
        (Before, After) => &[Enter, Leave],
        (Inside, After) => &[Leave],
        (After, Inside) => &[EnterBack],
        (After, Before) => &[EnterBack, LeaveBack],
        (Inside, Before) => &[LeaveBack],
        _ => &[],
    }
}

/// How progress follows the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scrub {
    Direct,
    /// Progress catches up with the scroll position over this many seconds.
    Smooth(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollUpdate {
    pub progress: f64,
    pub events: Vec<ToggleEvent>,
}

#[derive(Debug, Clone)]
pub struct ScrollObserver {
    range: ScrollRange,
    resolved: ResolvedRange,
    scrub: Scrub,
    region: Option<Region>,
    raw: Option<f64>,
    smoothing: Option<Tween>,
    emitted: Option<f64>,
}

impl ScrollObserver {
    pub fn new(range: ScrollRange, layout: &Layout, scrub: Scrub) -> Self {
        Self {
            range,
            resolved: range.resolve(layout),
            scrub,
            region: None,
            raw: None,
            smoothing: None,
            emitted: None,
        }
    }

    pub fn resolved(&self) -> ResolvedRange {
        self.resolved
    }

    /// Re-resolve markers after a layout change.
    pub fn refresh(&mut self, layout: &Layout) {
        self.resolved = self.range.resolve(layout);
        self.raw = None;
        debug!(
            "Scroll range refreshed: start={:.1}px end={:.1}px",
            self.resolved.start, self.resolved.end
        );
    }

    /// Feed the current scroll offset. Returns an update when progress moved
    /// or a toggle boundary was crossed.
    pub fn update(&mut self, scroll_y: f64, now_ms: f64) -> Option<ScrollUpdate> {
        let raw = self.resolved.progress(scroll_y);
        let region = self.resolved.region(scroll_y);

        let events = transitions(self.region.unwrap_or(Region::Before), region).to_vec();
        self.region = Some(region);

        let progress = match self.scrub {
            Scrub::Direct => raw,
            Scrub::Smooth(secs) => {
                if self.raw != Some(raw) {
                    match self.smoothing.as_mut() {
                        Some(tween) => tween.retarget(now_ms, raw),
                        None => {
                            let from = self.emitted.unwrap_or(raw);
                            self.smoothing =
                                Some(Tween::new(from, raw, now_ms, secs, Ease::Power3Out));
                        }
                    }
                }
                self.smoothing.map_or(raw, |t| t.sample(now_ms))
            }
        };
        self.raw = Some(raw);

        if self.emitted == Some(progress) && events.is_empty() {
            return None;
        }
        self.emitted = Some(progress);
        Some(ScrollUpdate { progress, events })
    }
}
