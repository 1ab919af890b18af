//! Diamond reveal effect: wires the mask mapper to the page.

use crate::config::{
    MASK_ACTIVE_CLASS, MASK_BLOCK_SELECTOR, REVEAL_END, REVEAL_SECTION_SELECTOR, REVEAL_START,
};
use crate::dom;
use crate::mask::{MaskFrame, MaskReveal};
use crate::scroll::{ScrollObserver, ScrollRange};
use crate::settings::EffectConfig;
use crate::MountError;
use log::{debug, info};
use web_sys::HtmlElement;

pub struct RevealEffect {
    section: HtmlElement,
    mask: HtmlElement,
    observer: ScrollObserver,
    reveal: MaskReveal,
    config: EffectConfig,
    progress: f64,
}

impl RevealEffect {
    pub fn mount(config: &EffectConfig) -> Result<Self, MountError> {
        let section = dom::query(REVEAL_SECTION_SELECTOR)
            .ok_or(MountError::MissingElement(REVEAL_SECTION_SELECTOR))?;
        let mask =
            dom::query(MASK_BLOCK_SELECTOR).ok_or(MountError::MissingElement(MASK_BLOCK_SELECTOR))?;

        let range = ScrollRange::parse(REVEAL_START, REVEAL_END)?;
        let observer = ScrollObserver::new(range, &dom::layout_of(&section), config.visual_scrub());
        let (width, height) = dom::viewport_size();
        let reveal = MaskReveal::new(config.mask_size, width, height);

        write_mask_size(&mask, 0.0);
        dom::set_style(&mask, "opacity", "0");
        info!(
            "Diamond reveal mounted, max mask extent {:.0}px",
            reveal.max_extent()
        );

        Ok(Self {
            section,
            mask,
            observer,
            reveal,
            config: config.clone(),
            progress: 0.0,
        })
    }

    pub fn on_frame(&mut self, scroll_y: f64, now_ms: f64) {
        let Some(update) = self.observer.update(scroll_y, now_ms) else {
            return;
        };

        for event in update.events {
            if self.reveal.toggle(event) {
                debug!("Mask {:?}, active={}", event, self.reveal.is_active());
                dom::set_class(&self.mask, MASK_ACTIVE_CLASS, self.reveal.is_active());
            }
        }

        self.progress = self.config.bound_progress(update.progress);
        self.write(self.reveal.frame(self.progress));
    }

    /// Re-measure after a viewport change.
    pub fn refresh(&mut self) {
        self.observer.refresh(&dom::layout_of(&self.section));
        let (width, height) = dom::viewport_size();
        self.reveal.resize(width, height);
        self.write(self.reveal.frame(self.progress));
    }

    fn write(&self, frame: MaskFrame) {
        write_mask_size(&self.mask, frame.extent_px);
        dom::set_style(&self.mask, "opacity", &frame.opacity.to_string());
    }
}

fn write_mask_size(mask: &HtmlElement, extent_px: f64) {
    let value = format!("{}px", extent_px);
    dom::set_style(mask, "mask-size", &value);
    dom::set_style(mask, "-webkit-mask-size", &value);
}
