use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement};

use crate::dom::{self, Bindings, Listener};

pub const CTA_SELECTOR: &str = ".platform-cta";
pub const CARD_SELECTOR: &str = ".platform-card";
const UNKNOWN_PLATFORM: &str = "unknown";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub platform: String,
    pub destination: String,
    pub at: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(platform: Option<String>, destination: String) -> Self {
        Self {
            platform: platform.unwrap_or_else(|| UNKNOWN_PLATFORM.to_string()),
            destination,
            at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!("User clicked on {} - {}", self.platform, self.destination)
    }
}

/// Where tracked clicks go. Swap in a real analytics client here.
pub trait ClickSink {
    fn record(&self, event: &ClickEvent);
}

pub struct ConsoleSink;

impl ClickSink for ConsoleSink {
    fn record(&self, event: &ClickEvent) {
        log::info!("{}", event.summary());
        if let Ok(json) = serde_json::to_string(event) {
            log::debug!("click event {}", json);
        }
    }
}

pub fn attach(document: &Document, sink: Rc<dyn ClickSink>) -> Option<Bindings> {
    let ctas = dom::select_all(document, CTA_SELECTOR);
    if ctas.is_empty() {
        return None;
    }

    let mut bindings = Bindings::default();
    for cta in ctas {
        let sink = sink.clone();
        let control = cta.clone();
        // No preventDefault: the link still navigates.
        bindings.listen(Listener::new(&cta, "click", move |_| {
            let platform = control
                .closest(CARD_SELECTOR)
                .ok()
                .flatten()
                .and_then(|card| card.get_attribute("data-platform"));
            let destination = match control.dyn_ref::<HtmlAnchorElement>() {
                Some(anchor) => anchor.href(),
                None => control.get_attribute("href").unwrap_or_default(),
            };
            sink.record(&ClickEvent::new(platform, destination));
        }));
    }
    Some(bindings)
}
