use yew::prelude::*;

use crate::dom::{self, Listener};

const BAR_STYLE: &str = "position: fixed; top: 0; left: 0; height: 3px; \
    background: linear-gradient(90deg, #8B5CF6 0%, #EC4899 100%); \
    z-index: 9999; transition: width 0.1s ease;";

/// Share of the page scrolled past, as a percentage in `[0, 100]`. A page
/// with nothing to scroll reports 0.
pub fn scrolled_percent(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

#[function_component(ScrollProgress)]
pub fn scroll_progress() -> Html {
    let percent = use_state(|| 0.0_f64);

    {
        let percent = percent.clone();
        use_effect_with_deps(move |_| {
            let listener = dom::window_and_document().ok().map(|(window, document)| {
                let target = window.clone();
                Listener::new(&target, "scroll", move |_| {
                    let Some(root) = document.document_element() else {
                        return;
                    };
                    let scroll_y = window.scroll_y().unwrap_or(0.0);
                    percent.set(scrolled_percent(
                        scroll_y,
                        root.scroll_height() as f64,
                        root.client_height() as f64,
                    ));
                })
            });

            move || drop(listener)
        }, ());
    }

    html! {
        <div class="scroll-progress" style={format!("{} width: {}%;", BAR_STYLE, *percent)}></div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_page_is_zero() {
        assert_eq!(scrolled_percent(0.0, 3000.0, 800.0), 0.0);
    }

    #[test]
    fn bottom_of_page_is_full() {
        assert_eq!(scrolled_percent(2200.0, 3000.0, 800.0), 100.0);
        assert_eq!(scrolled_percent(1100.0, 3000.0, 800.0), 50.0);
    }

    #[test]
    fn unscrollable_page_stays_empty() {
        assert_eq!(scrolled_percent(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scrolled_percent(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(scrolled_percent(2500.0, 3000.0, 800.0), 100.0);
        assert_eq!(scrolled_percent(-40.0, 3000.0, 800.0), 0.0);
    }
}
