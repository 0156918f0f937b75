use wasm_bindgen::JsValue;
use web_sys::{Document, Element, IntersectionObserverInit};

use crate::config::Settings;
use crate::dom::{self, Bindings, Watch, Watcher};

pub const PENDING_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "visible";

/// A set of cards revealed with a cascading delay.
pub struct RevealGroup {
    pub selector: &'static str,
    pub stagger_secs: f64,
}

impl RevealGroup {
    pub fn groups(settings: &Settings) -> [RevealGroup; 2] {
        [
            RevealGroup {
                selector: ".platform-card",
                stagger_secs: settings.platform_stagger_secs,
            },
            RevealGroup {
                selector: ".step-card",
                stagger_secs: settings.step_stagger_secs,
            },
        ]
    }

    /// `transition-delay` value for the card at `index` within the group.
    pub fn delay(&self, index: usize) -> String {
        // Rounded to the millisecond so 3 * 0.1 renders as 0.3s
        let secs = (index as f64 * self.stagger_secs * 1000.0).round() / 1000.0;
        format!("{}s", secs)
    }
}

/// Reveal state of one card. Once revealed, a card stays revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Revealed,
}

impl Visibility {
    fn of(card: &Element) -> Self {
        if dom::has_class(card, VISIBLE_CLASS) {
            Visibility::Revealed
        } else {
            Visibility::Hidden
        }
    }

    /// State after one intersection report, and whether the card still needs
    /// watching.
    pub fn report(self, intersecting: bool) -> (Visibility, Watch) {
        match (self, intersecting) {
            (Visibility::Hidden, false) => (Visibility::Hidden, Watch::Keep),
            _ => (Visibility::Revealed, Watch::Release),
        }
    }
}

pub fn attach(document: &Document, settings: &Settings) -> Option<Bindings> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(settings.reveal_threshold));
    options.set_root_margin(&settings.reveal_root_margin);

    let on_report = |card: &Element, intersecting: bool| {
        let (visibility, watch) = Visibility::of(card).report(intersecting);
        if visibility == Visibility::Revealed {
            dom::add_class(card, VISIBLE_CLASS);
        }
        watch
    };
    let watcher = match Watcher::new(Some(&options), on_report) {
        Ok(watcher) => watcher,
        Err(e) => {
            log::warn!("Scroll reveal disabled: {}", e);
            return None;
        }
    };

    let mut observed = 0;
    for group in RevealGroup::groups(settings) {
        for (index, card) in dom::select_all(document, group.selector).iter().enumerate() {
            dom::add_class(card, PENDING_CLASS);
            dom::set_style(card, "transition-delay", &group.delay(index));
            watcher.observe(card);
            observed += 1;
        }
    }

    if observed == 0 {
        return None;
    }
    log::debug!("Watching {} cards for reveal", observed);

    let mut bindings = Bindings::default();
    bindings.watch(watcher);
    Some(bindings)
}
