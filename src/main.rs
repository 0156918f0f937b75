use std::rc::Rc;

use log::{error, info, warn};
use yew::prelude::*;

mod config;
mod dom;
mod error;
mod behaviors {
    pub mod accordion;
    pub mod calculator;
    pub mod click_tracking;
    pub mod filter;
    pub mod hover;
    pub mod lazy;
    pub mod newsletter;
    pub mod reveal;
    pub mod ripple;
    pub mod scroll_progress;
    pub mod smooth_scroll;
}

use behaviors::{
    accordion, calculator,
    click_tracking::{self, ConsoleSink},
    filter, hover, lazy, newsletter, reveal, ripple,
    scroll_progress::ScrollProgress,
    smooth_scroll,
};
use config::Settings;
use dom::Bindings;
use error::BehaviorError;

/// Id of the element the behavior layer mounts into, appended to `<body>`
/// so the pre-rendered markup is left alone.
const MOUNT_ID: &str = "easybucks-behaviors";

/// Attaches every page behavior. Each one is independent: a behavior whose
/// elements are missing is skipped without affecting the rest.
fn attach_all() -> Result<Bindings, BehaviorError> {
    let (window, document) = dom::window_and_document()?;
    let settings = Settings::load(&document);

    let mut all = Bindings::default();
    let mut attach = |name: &str, bindings: Option<Bindings>| match bindings {
        Some(bindings) => all.extend(bindings),
        None => log::debug!("{} not present on this page", name),
    };

    attach("smooth scroll", smooth_scroll::attach(&document));
    attach("scroll reveal", reveal::attach(&document, &settings));
    attach("click tracking", click_tracking::attach(&document, Rc::new(ConsoleSink)));
    attach("card hover", hover::attach_cards(&document));
    attach("orb parallax", Some(hover::attach_parallax(&window, &document)));
    attach("lazy reveal", lazy::attach(&window, &document));
    attach("ripple", ripple::attach(&document));
    attach("earnings calculator", calculator::attach(&document, &settings));
    attach("platform filter", filter::attach(&document));
    attach("faq accordion", accordion::attach(&document));
    attach("newsletter", newsletter::attach(&document, &settings));

    info!("Attached {} page bindings", all.len());
    Ok(all)
}

#[function_component]
fn App() -> Html {
    use_effect_with_deps(
        move |_| {
            let bindings = match attach_all() {
                Ok(bindings) => Some(bindings),
                Err(e) => {
                    error!("Page behaviors unavailable: {}", e);
                    None
                }
            };
            // Dropping the bindings detaches every listener and cancels pending timers
            move || drop(bindings)
        },
        (),
    );

    html! {
        <>
            <style>
                {ripple::RIPPLE_CSS}
                {calculator::PULSE_CSS}
            </style>
            <ScrollProgress />
        </>
    }
}

fn print_banner() {
    gloo_console::log!("%cEasyBucks 💰", "color: #8B5CF6; font-size: 24px; font-weight: bold;");
    gloo_console::log!("%cStart earning money online today!", "color: #EC4899; font-size: 14px;");
}

fn mount_point() -> Result<web_sys::Element, BehaviorError> {
    let (_, document) = dom::window_and_document()?;
    if let Some(existing) = document.get_element_by_id(MOUNT_ID) {
        return Ok(existing);
    }
    let host = document.create_element("div")?;
    host.set_id(MOUNT_ID);
    document.body().ok_or(BehaviorError::NoDocument)?.append_child(&host)?;
    Ok(host)
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    print_banner();

    match mount_point() {
        Ok(host) => {
            info!("Starting page behaviors");
            yew::Renderer::<App>::with_root(host).render();
        }
        Err(e) => warn!("No place to mount page behaviors: {}", e),
    }
}
