use web_sys::{Document, Element, Window};

use crate::dom::{self, Bindings, Watch, Watcher};

pub const LAZY_CLASS: &str = "lazy";

fn selector() -> String {
    format!(".{}", LAZY_CLASS)
}

/// Elements stay lazy until their first intersection report.
fn settle(intersecting: bool) -> Watch {
    if intersecting {
        Watch::Release
    } else {
        Watch::Keep
    }
}

pub fn attach(window: &Window, document: &Document) -> Option<Bindings> {
    if !dom::supports_intersection_observer(window) {
        log::debug!("IntersectionObserver unavailable, lazy reveal skipped");
        return None;
    }

    let elements = dom::select_all(document, &selector());
    if elements.is_empty() {
        return None;
    }

    let on_report = |el: &Element, intersecting: bool| {
        let watch = settle(intersecting);
        if watch == Watch::Release {
            dom::remove_class(el, LAZY_CLASS);
        }
        watch
    };
    let watcher = match Watcher::new(None, on_report) {
        Ok(watcher) => watcher,
        Err(e) => {
            log::warn!("Lazy reveal disabled: {}", e);
            return None;
        }
    };
    for el in &elements {
        watcher.observe(el);
    }

    let mut bindings = Bindings::default();
    bindings.watch(watcher);
    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_targets_lazy_class() {
        assert_eq!(selector(), ".lazy");
    }

    #[test]
    fn released_only_once_visible() {
        assert_eq!(settle(false), Watch::Keep);
        assert_eq!(settle(true), Watch::Release);
    }
}
