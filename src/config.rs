//! Tuning constants shared by both effects.

// Timing
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const IDLE_DELAY_MS: f64 = 150.0;
pub const SETTLE_TWEEN_SECS: f64 = 0.3;
pub const INERTIA_TWEEN_SECS: f64 = 0.6;

// Inertia
pub const INERTIA_STRENGTH: f64 = 0.15;
pub const INERTIA_VELOCITY_THRESHOLD: f64 = 0.01;

// Circles
pub const INITIAL_SCALE: f64 = 0.15;
pub const TRIGGER_SCALE: f64 = 3.5;
pub const BASE_MAX_SCALE: f64 = 3.0;
pub const MAX_SCALE_STEP: f64 = 0.5;
pub const TIGHT_THREE_OFFSETS: [f64; 3] = [0.0, 0.23, 0.46];
pub const TIGHT_THREE_BUDGET: f64 = 0.23;
pub const MIN_CIRCLE_OPACITY: f64 = 0.1;
pub const MAX_CIRCLE_OPACITY: f64 = 0.6;
pub const FADE_OUT_FROM: f64 = 0.9;
pub const FADE_OUT_WINDOW: f64 = 0.1;

// Mask
pub const DIAGONAL_MULTIPLIER: f64 = 15.0;
pub const VIEWPORT_MAX_MULTIPLIER: f64 = 3.0;
pub const MASK_ACTIVE_CLASS: &str = "mask-active";

// Counter defaults when data-min / data-max are absent
pub const DEFAULT_COUNTER_MIN: f64 = 0.0;
pub const DEFAULT_COUNTER_MAX: f64 = 99.95;

// Scroll ranges
pub const REVEAL_START: &str = "top top";
pub const REVEAL_END: &str = "+=400%";
pub const CIRCLES_START: &str = "top center";
pub const CIRCLES_END: &str = "bottom center";

// DOM selectors
pub const REVEAL_SECTION_SELECTOR: &str = r#"[data-animation="star-mask"]"#;
pub const MASK_BLOCK_SELECTOR: &str = "[data-mask-block]";
pub const COUNTER_BLOCK_SELECTOR: &str = "[data-counter-block]";
pub const CIRCLE_SELECTOR: &str = "[data-circle]";
pub const COUNTER_NUMBER_SELECTOR: &str = r#"[data-counter-text="number"]"#;
pub const COUNTER_DECIMAL_SELECTOR: &str = r#"[data-counter-text="decimal"]"#;
pub const CONFIG_SCRIPT_SELECTOR: &str = "script[data-scroll-config]";
