use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent, Window};

use crate::dom::{self, Bindings, Listener};

pub const CARD_SELECTOR: &str = ".platform-card";
pub const ORB_SELECTOR: &str = ".gradient-orb";

pub const LIFTED: &str = "translateY(-8px) scale(1.02)";
pub const RESTING: &str = "translateY(0) scale(1)";

/// Pixel offset of the orb at `index` for a pointer at `(x, y)` in a
/// `width` x `height` viewport. Later orbs travel further.
pub fn orb_offset(index: usize, pointer: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
    let speed = (index as f64 + 1.0) * 10.0;
    let (x, y) = pointer;
    let (width, height) = viewport;
    ((x / width - 0.5) * speed, (y / height - 0.5) * speed)
}

pub fn translate((x, y): (f64, f64)) -> String {
    format!("translate({}px, {}px)", x, y)
}

pub fn attach_cards(document: &Document) -> Option<Bindings> {
    let cards = dom::select_all(document, CARD_SELECTOR);
    if cards.is_empty() {
        return None;
    }

    let mut bindings = Bindings::default();
    for card in cards {
        let entered = card.clone();
        bindings.listen(Listener::new(&card, "mouseenter", move |_| {
            dom::set_style(&entered, "transform", LIFTED);
        }));
        let left = card.clone();
        bindings.listen(Listener::new(&card, "mouseleave", move |_| {
            dom::set_style(&left, "transform", RESTING);
        }));
    }
    Some(bindings)
}

/// Orbs are looked up on every move so the effect works before the page has
/// finished loading.
pub fn attach_parallax(window: &Window, document: &Document) -> Bindings {
    let window = window.clone();
    let lookup = document.clone();
    let mut bindings = Bindings::default();
    bindings.listen(Listener::new(document, "mousemove", move |e| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let pointer = (e.client_x() as f64, e.client_y() as f64);
        for (index, orb) in dom::select_all(&lookup, ORB_SELECTOR).iter().enumerate() {
            dom::set_style(orb, "transform", &translate(orb_offset(index, pointer, (width, height))));
        }
    }));
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pointer_leaves_orbs_still() {
        for index in 0..3 {
            assert_eq!(orb_offset(index, (500.0, 400.0), (1000.0, 800.0)), (0.0, 0.0));
        }
    }

    #[test]
    fn later_orbs_move_further() {
        let viewport = (1000.0, 800.0);
        assert_eq!(orb_offset(0, (1000.0, 800.0), viewport), (5.0, 5.0));
        assert_eq!(orb_offset(1, (1000.0, 800.0), viewport), (10.0, 10.0));
        assert_eq!(orb_offset(2, (0.0, 0.0), viewport), (-15.0, -15.0));
    }

    #[test]
    fn translate_renders_pixels() {
        assert_eq!(translate((-2.5, 4.0)), "translate(-2.5px, 4px)");
    }
}
