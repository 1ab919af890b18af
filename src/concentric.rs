//! Concentric circles effect with its percentage counter.

use crate::circles::{CircleFrame, CircleLayout};
use crate::config::{
    CIRCLES_END, CIRCLES_START, CIRCLE_SELECTOR, COUNTER_BLOCK_SELECTOR, COUNTER_DECIMAL_SELECTOR,
    COUNTER_NUMBER_SELECTOR,
};
use crate::counter::{format_counter, Counter, CounterDriver, CounterRange};
use crate::dom;
use crate::scroll::{ScrollObserver, ScrollRange};
use crate::settings::EffectConfig;
use crate::MountError;
use log::{info, warn};
use web_sys::HtmlElement;

/// Counter state plus the elements it writes to.
struct CounterDisplay {
    number: HtmlElement,
    decimal: HtmlElement,
    driver: CounterDriver,
}

impl CounterDisplay {
    fn write(&self, value: f64) {
        let text = format_counter(value);
        dom::set_text(&self.number, &text.number);
        dom::set_text(&self.decimal, &text.decimal);
    }
}

pub struct ConcentricEffect {
    section: HtmlElement,
    circles: Vec<HtmlElement>,
    layout: CircleLayout,
    observer: ScrollObserver,
    counter: Option<CounterDisplay>,
    config: EffectConfig,
}

impl ConcentricEffect {
    pub fn mount(config: &EffectConfig, now_ms: f64) -> Result<Self, MountError> {
        let section = dom::query(COUNTER_BLOCK_SELECTOR)
            .ok_or(MountError::MissingElement(COUNTER_BLOCK_SELECTOR))?;
        let circles = dom::query_all(CIRCLE_SELECTOR);
        if circles.is_empty() {
            return Err(MountError::NoCircles);
        }

        let range = ScrollRange::parse(CIRCLES_START, CIRCLES_END)?;
        let section_layout = dom::layout_of(&section);
        let layout = CircleLayout::new(circles.len(), config.stagger, config.opacity_reference);
        let observer = ScrollObserver::new(range, &section_layout, config.visual_scrub());

        for circle in &circles {
            write_circle(circle, CircleFrame::hidden());
        }

        let counter = match (
            dom::query(COUNTER_NUMBER_SELECTOR),
            dom::query(COUNTER_DECIMAL_SELECTOR),
        ) {
            (Some(number), Some(decimal)) => {
                let bounds = CounterRange::from_attributes(
                    section.get_attribute("data-min").as_deref(),
                    section.get_attribute("data-max").as_deref(),
                );
                let counter = Counter::new(config.counter, bounds, now_ms);
                let display = CounterDisplay {
                    number,
                    decimal,
                    driver: CounterDriver::new(range, &section_layout, counter, config),
                };
                display.write(bounds.min);
                Some(display)
            }
            _ => {
                warn!("Counter text elements not found, animating circles only");
                None
            }
        };

        info!(
            "Concentric circles mounted: {} circles, starts {:?}",
            layout.len(),
            layout.start_progress()
        );

        Ok(Self {
            section,
            circles,
            layout,
            observer,
            counter,
            config: config.clone(),
        })
    }

    pub fn on_frame(&mut self, scroll_y: f64, now_ms: f64) {
        if let Some(update) = self.observer.update(scroll_y, now_ms) {
            let progress = self.config.bound_progress(update.progress);
            for (circle, frame) in self.circles.iter().zip(self.layout.frame(progress)) {
                write_circle(circle, frame);
            }
        }

        if let Some(display) = self.counter.as_mut() {
            if let Some(value) = display.driver.step(scroll_y, now_ms).value {
                display.write(value);
            }
        }
    }

    /// Re-measure after a viewport change.
    pub fn refresh(&mut self) {
        let section_layout = dom::layout_of(&self.section);
        self.observer.refresh(&section_layout);
        if let Some(display) = self.counter.as_mut() {
            display.driver.refresh(&section_layout);
        }
    }
}

fn write_circle(circle: &HtmlElement, frame: CircleFrame) {
    dom::set_style(circle, "transform", &format!("scale({})", frame.scale));
    dom::set_style(circle, "opacity", &frame.opacity.to_string());
}
