//! `requestAnimationFrame` loop that runs until dropped.

use gloo_utils::window;
use log::warn;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    callback: FrameCallback,
    request_id: Rc<Cell<i32>>,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp on every animation frame.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(0));

        let next = callback.clone();
        let next_id = request_id.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            on_frame(timestamp);
            if let Some(cb) = next.borrow().as_ref() {
                match window().request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => next_id.set(id),
                    Err(e) => warn!("Animation frame request failed: {:?}", e),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = match callback.borrow().as_ref() {
            Some(cb) => window().request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        request_id.set(id);

        Ok(Self {
            callback,
            request_id,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        let _ = window().cancel_animation_frame(self.request_id.get());
        // Breaks the closure's reference to itself.
        self.callback.borrow_mut().take();
    }
}
