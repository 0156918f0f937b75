use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use crate::config::Settings;
use crate::dom::{self, Bindings, Listener, TimerSlot};

pub const SUBSCRIBING_LABEL: &str = "Subscribing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Subscribing { original_label: String },
    Subscribed,
}

/// Simulated subscription: no request is ever sent.
#[derive(Debug, Default)]
pub struct Flow {
    phase: Phase,
}

impl Flow {
    #[cfg(test)]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Starts a submission. Returns the in-progress button state, or `None`
    /// when one is already pending.
    pub fn submit(&mut self, current_label: &str) -> Option<ButtonState> {
        if matches!(self.phase, Phase::Subscribing { .. }) {
            return None;
        }
        self.phase = Phase::Subscribing {
            original_label: current_label.to_string(),
        };
        Some(ButtonState {
            label: SUBSCRIBING_LABEL.to_string(),
            disabled: true,
        })
    }

    /// Finishes the pending submission and returns the button state to
    /// restore.
    pub fn complete(&mut self) -> Option<ButtonState> {
        match std::mem::replace(&mut self.phase, Phase::Subscribed) {
            Phase::Subscribing { original_label } => Some(ButtonState {
                label: original_label,
                disabled: false,
            }),
            previous => {
                self.phase = previous;
                None
            }
        }
    }
}

fn render_button(button: &HtmlButtonElement, state: &ButtonState) {
    button.set_text_content(Some(&state.label));
    button.set_disabled(state.disabled);
}

pub fn attach(document: &Document, settings: &Settings) -> Option<Bindings> {
    let form: HtmlElement = dom::by_id(document, "newsletter-form")?;
    let success: HtmlElement = dom::by_id(document, "newsletter-success")?;

    let flow = Rc::new(RefCell::new(Flow::default()));
    let slot = TimerSlot::default();
    let delay = settings.newsletter_delay_ms;

    let mut bindings = Bindings::default();
    {
        let form_ref = form.clone();
        let slot = slot.clone();
        bindings.listen(Listener::new(&form, "submit", move |e| {
            e.prevent_default();

            let button = form_ref
                .query_selector("button")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
            let label = button
                .as_ref()
                .and_then(|b| b.text_content())
                .unwrap_or_default();
            let Some(busy) = flow.borrow_mut().submit(&label) else {
                return;
            };
            if let Some(button) = &button {
                render_button(button, &busy);
            }

            let form = form_ref.clone();
            let success = success.clone();
            let flow = flow.clone();
            slot.schedule(delay, move || {
                if !form.is_connected() {
                    log::debug!("Newsletter form detached before confirmation");
                    return;
                }
                dom::set_style(&form, "display", "none");
                dom::set_style(&success, "display", "block");
                if let (Some(button), Some(restored)) = (button, flow.borrow_mut().complete()) {
                    render_button(&button, &restored);
                }
            });
        }));
    }
    bindings.track_timer(slot);
    Some(bindings)
}
