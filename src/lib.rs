//! Scroll-linked reveal effects for marketing pages, compiled to wasm.
//!
//! Two independent effects are mounted onto marked-up DOM:
//! - a mask reveal whose mask size and opacity follow scroll progress
//! - concentric circles that grow in a staggered sequence, with a percentage
//!   counter that can coast after scrolling stops
//!
//! The mapping from progress to visual values lives in pure modules
//! ([`mask`], [`circles`], [`counter`]) and is tested natively. The browser
//! side is a single animation-frame loop plus a debounced resize listener,
//! both owned by the [`ScrollEffects`] handle and torn down when it drops.

use gloo_utils::window;
use log::{info, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod circles;
pub mod config;
pub mod counter;
pub mod ease;
pub mod mask;
pub mod scroll;
pub mod settings;
pub mod timer;
pub mod tween;

mod concentric;
mod dom;
mod frame;
mod logger;
mod reveal;

use concentric::ConcentricEffect;
use frame::FrameLoop;
use reveal::RevealEffect;
use scroll::MarkerParseError;
use timer::{BrowserTimers, Debouncer};

pub use settings::EffectConfig;

/// Why an effect could not be mounted.
#[derive(Debug, Clone, PartialEq)]
pub enum MountError {
    MissingElement(&'static str),
    NoCircles,
    InvalidMarker(MarkerParseError),
    InvalidConfig(String),
    Browser(String),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::MissingElement(selector) => {
                write!(f, "Required element not found: {}", selector)
            }
            MountError::NoCircles => write!(f, "No circle elements found"),
            MountError::InvalidMarker(err) => write!(f, "Invalid scroll range: {}", err),
            MountError::InvalidConfig(msg) => write!(f, "Invalid effect config: {}", msg),
            MountError::Browser(msg) => write!(f, "Browser API call failed: {}", msg),
        }
    }
}

impl std::error::Error for MountError {}

impl From<MarkerParseError> for MountError {
    fn from(err: MarkerParseError) -> Self {
        MountError::InvalidMarker(err)
    }
}

impl From<JsValue> for MountError {
    fn from(err: JsValue) -> Self {
        MountError::Browser(format!("{:?}", err))
    }
}

/// The mounted effects. Either may be absent when its markup is missing.
struct Effects {
    reveal: Option<RevealEffect>,
    concentric: Option<ConcentricEffect>,
}

impl Effects {
    fn on_frame(&mut self, scroll_y: f64, now_ms: f64) {
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.on_frame(scroll_y, now_ms);
        }
        if let Some(concentric) = self.concentric.as_mut() {
            concentric.on_frame(scroll_y, now_ms);
        }
    }

    fn refresh(&mut self) {
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.refresh();
        }
        if let Some(concentric) = self.concentric.as_mut() {
            concentric.refresh();
        }
    }
}

/// Window `resize` listener that refreshes the effects once per burst.
struct ResizeListener {
    closure: Closure<dyn FnMut()>,
}

impl ResizeListener {
    fn attach(effects: Weak<RefCell<Effects>>, delay_ms: u32) -> Result<Self, JsValue> {
        let mut debouncer = Debouncer::new(BrowserTimers, delay_ms);
        let closure = Closure::wrap(Box::new(move || {
            let effects = effects.clone();
            debouncer.call(move || {
                if let Some(effects) = effects.upgrade() {
                    info!("Viewport resized, refreshing scroll ranges");
                    effects.borrow_mut().refresh();
                }
            });
        }) as Box<dyn FnMut()>);

        window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        Ok(Self { closure })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = window()
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}

/// Handle owning every running effect. Dropping it (or calling `destroy`)
/// stops the frame loop and removes the resize listener.
#[wasm_bindgen]
pub struct ScrollEffects {
    effects: Rc<RefCell<Effects>>,
    _frames: FrameLoop,
    _resize: ResizeListener,
}

impl ScrollEffects {
    /// Mount both effects onto the current document.
    ///
    /// A missing section only disables that effect; the error is logged and
    /// the other effect still runs.
    pub fn mount(config: EffectConfig) -> Result<Self, MountError> {
        console_error_panic_hook::set_once();
        logger::init(config.log_level_filter());

        let reveal = match RevealEffect::mount(&config) {
            Ok(effect) => Some(effect),
            Err(e) => {
                warn!("Diamond reveal skipped: {}", e);
                None
            }
        };
        let concentric = match ConcentricEffect::mount(&config, dom::now_ms()) {
            Ok(effect) => Some(effect),
            Err(e) => {
                warn!("Concentric circles skipped: {}", e);
                None
            }
        };
        if reveal.is_none() && concentric.is_none() {
            info!("No scroll effects found on this page");
        }

        let effects = Rc::new(RefCell::new(Effects { reveal, concentric }));
        let frame_effects = effects.clone();
        let frames = FrameLoop::start(move |timestamp| {
            frame_effects
                .borrow_mut()
                .on_frame(dom::scroll_y(), timestamp);
        })?;
        let resize = ResizeListener::attach(Rc::downgrade(&effects), config.resize_debounce_ms)?;

        Ok(Self {
            effects,
            _frames: frames,
            _resize: resize,
        })
    }
}

#[wasm_bindgen]
impl ScrollEffects {
    /// Mount with a config object; `undefined` or `null` selects defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ScrollEffects, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EffectConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&MountError::InvalidConfig(e.to_string()).to_string()))?
        };
        Self::mount(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Mount using the JSON in `<script type="application/json" data-scroll-config>`,
    /// or defaults when the page has none.
    #[wasm_bindgen(js_name = fromDocument)]
    pub fn from_document() -> Result<ScrollEffects, JsValue> {
        let config = match dom::query(config::CONFIG_SCRIPT_SELECTOR).and_then(|el| el.text_content()) {
            Some(json) => EffectConfig::from_json(&json).map_err(|e| {
                JsValue::from_str(&MountError::InvalidConfig(e.to_string()).to_string())
            })?,
            None => EffectConfig::default(),
        };
        Self::mount(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Re-measure scroll ranges and the viewport immediately.
    pub fn refresh(&self) {
        self.effects.borrow_mut().refresh();
    }

    /// Stop all effects.
    pub fn destroy(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_errors_describe_the_cause() {
        let err = MountError::MissingElement(config::MASK_BLOCK_SELECTOR);
        assert_eq!(err.to_string(), "Required element not found: [data-mask-block]");
        assert_eq!(MountError::NoCircles.to_string(), "No circle elements found");
    }

    #[test]
    fn marker_errors_convert() {
        let err: MountError = "sideways".parse::<scroll::Marker>().unwrap_err().into();
        assert!(matches!(err, MountError::InvalidMarker(_)));
        assert!(err.to_string().starts_with("Invalid scroll range:"));
    }
}
