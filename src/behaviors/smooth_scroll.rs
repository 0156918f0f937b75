use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom::{self, Bindings, Listener};

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Element id an in-page href points at. A bare `#` points nowhere.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn attach(document: &Document) -> Option<Bindings> {
    let anchors = dom::select_all(document, ANCHOR_SELECTOR);
    if anchors.is_empty() {
        return None;
    }

    let mut bindings = Bindings::default();
    for anchor in anchors {
        let document = document.clone();
        let link = anchor.clone();
        bindings.listen(Listener::new(&anchor, "click", move |e| {
            e.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            if let Some(target) = fragment_target(&href).and_then(|id| document.get_element_by_id(id)) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }));
    }
    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_names_an_id() {
        assert_eq!(fragment_target("#platforms"), Some("platforms"));
        assert_eq!(fragment_target("#faq-section"), Some("faq-section"));
    }

    #[test]
    fn bare_hash_and_external_links_have_no_target() {
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("https://example.com/#top"), None);
        assert_eq!(fragment_target(""), None);
    }
}
