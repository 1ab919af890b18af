//! Demo page for the scroll effects using Yew.
//! Renders the marked-up sections and mounts the effects once they exist.

use log::error;
use scroll_reveal::config::{DEFAULT_COUNTER_MAX, DEFAULT_COUNTER_MIN};
use scroll_reveal::{EffectConfig, ScrollEffects};
use yew::prelude::*;

const CIRCLE_COUNT: usize = 3;

/// Spacer section so there is something to scroll past.
#[function_component]
fn Spacer(props: &SpacerProps) -> Html {
    html! {
        <section class="spacer">
            <h2>{ props.title.as_str() }</h2>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SpacerProps {
    title: AttrValue,
}

/// Image revealed through a growing diamond mask.
#[function_component]
fn DiamondReveal() -> Html {
    html! {
        <section class="star-mask" data-animation="star-mask">
            <div class="star-mask__sticky">
                <div class="star-mask__image" data-mask-block="" />
            </div>
        </section>
    }
}

/// Concentric circles with the percentage counter in the middle.
#[function_component]
fn CounterBlock() -> Html {
    html! {
        <section
            class="counter-block"
            data-counter-block=""
            data-min={DEFAULT_COUNTER_MIN.to_string()}
            data-max={DEFAULT_COUNTER_MAX.to_string()}
        >
            <div class="counter-block__stage">
                { (0..CIRCLE_COUNT).map(|i| html! {
                    <div class="counter-block__circle" data-circle={i.to_string()} />
                }).collect::<Html>() }
                <div class="counter-block__value">
                    <span data-counter-text="number">{ "0" }</span>
                    <span class="counter-block__point">{ "." }</span>
                    <span data-counter-text="decimal">{ "00%" }</span>
                </div>
            </div>
        </section>
    }
}

/// Page wiring: mounts the effects after the first render and tears them
/// down when the page unmounts.
#[function_component]
fn App() -> Html {
    use_effect_with((), |_| {
        let effects = match ScrollEffects::mount(EffectConfig::default()) {
            Ok(effects) => Some(effects),
            Err(e) => {
                error!("Scroll effects failed to start: {}", e);
                None
            }
        };
        move || drop(effects)
    });

    html! {
        <main class="page">
            <Spacer title="Scroll to reveal" />
            <DiamondReveal />
            <Spacer title="Keep going" />
            <CounterBlock />
            <Spacer title="Fin" />
        </main>
    }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    yew::Renderer::<App>::new().render();
}
