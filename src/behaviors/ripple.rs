use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::dom::{self, Bindings, Listener};

pub const HOST_SELECTOR: &str = ".cta-button, .platform-cta";
pub const RIPPLE_CLASS: &str = "ripple";

pub const RIPPLE_CSS: &str = r#"
    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(255, 255, 255, 0.3);
        transform: scale(0);
        animation: ripple-animation 0.6s ease-out;
        pointer-events: none;
    }

    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
"#;

/// Size and placement of a ripple inside its host, in host-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// `host_size` is the host's client width/height, `host_origin` the
    /// top-left of its bounding rect and `click` the pointer position, all in
    /// viewport coordinates.
    pub fn centered_on(click: (f64, f64), host_origin: (f64, f64), host_size: (f64, f64)) -> Self {
        let diameter = host_size.0.max(host_size.1);
        let radius = diameter / 2.0;
        Self {
            diameter,
            left: click.0 - host_origin.0 - radius,
            top: click.1 - host_origin.1 - radius,
        }
    }
}

/// A control that ripples can be placed in.
pub trait RippleHost {
    type Ripple;

    fn current_ripple(&self) -> Option<Self::Ripple>;
    fn discard(&self, ripple: Self::Ripple);
    fn insert(&self, ripple: Self::Ripple);
}

/// Puts `ripple` in `host`, removing any ripple already there so a host never
/// holds more than one.
pub fn replace_ripple<H: RippleHost>(host: &H, ripple: H::Ripple) {
    if let Some(existing) = host.current_ripple() {
        host.discard(existing);
    }
    host.insert(ripple);
}

impl RippleHost for HtmlElement {
    type Ripple = HtmlElement;

    fn current_ripple(&self) -> Option<HtmlElement> {
        dom::select_in(self, ".ripple")
    }

    fn discard(&self, ripple: HtmlElement) {
        ripple.remove();
    }

    fn insert(&self, ripple: HtmlElement) {
        let _ = self.append_child(&ripple);
    }
}

fn spawn_ripple(document: &Document, host: &HtmlElement, e: &MouseEvent) {
    let rect = host.get_bounding_client_rect();
    let geometry = RippleGeometry::centered_on(
        (e.client_x() as f64, e.client_y() as f64),
        (rect.left(), rect.top()),
        (host.client_width() as f64, host.client_height() as f64),
    );

    let Some(ripple) = document
        .create_element("span")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let size = format!("{}px", geometry.diameter);
    dom::set_style(&ripple, "width", &size);
    dom::set_style(&ripple, "height", &size);
    dom::set_style(&ripple, "left", &format!("{}px", geometry.left));
    dom::set_style(&ripple, "top", &format!("{}px", geometry.top));
    dom::add_class(&ripple, RIPPLE_CLASS);

    replace_ripple(host, ripple);
}

pub fn attach(document: &Document) -> Option<Bindings> {
    let hosts = dom::select_all(document, HOST_SELECTOR);
    if hosts.is_empty() {
        return None;
    }

    let mut bindings = Bindings::default();
    for host in hosts {
        dom::set_style(&host, "position", "relative");
        dom::set_style(&host, "overflow", "hidden");

        let document = document.clone();
        let clicked = host.clone();
        bindings.listen(Listener::new(&host, "click", move |e| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                spawn_ripple(&document, &clicked, e);
            }
        }));

        // Finished ripples clean themselves up instead of waiting for the next click.
        bindings.listen(Listener::new(&host, "animationend", move |e| {
            if let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                if dom::has_class(&target, RIPPLE_CLASS) {
                    target.remove();
                }
            }
        }));
    }
    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Button {
        ripples: RefCell<Vec<u32>>,
    }

    impl RippleHost for Button {
        type Ripple = u32;

        fn current_ripple(&self) -> Option<u32> {
            self.ripples.borrow().first().copied()
        }

        fn discard(&self, ripple: u32) {
            self.ripples.borrow_mut().retain(|r| *r != ripple);
        }

        fn insert(&self, ripple: u32) {
            self.ripples.borrow_mut().push(ripple);
        }
    }

    #[test]
    fn first_click_adds_a_ripple() {
        let button = Button::default();
        replace_ripple(&button, 1);
        assert_eq!(*button.ripples.borrow(), vec![1]);
    }

    #[test]
    fn rapid_clicks_replace_instead_of_stacking() {
        let button = Button::default();
        for ripple in 1..=5 {
            replace_ripple(&button, ripple);
            assert_eq!(button.ripples.borrow().len(), 1);
        }
        assert_eq!(*button.ripples.borrow(), vec![5]);
    }

    #[test]
    fn diameter_is_larger_side() {
        let wide = RippleGeometry::centered_on((0.0, 0.0), (0.0, 0.0), (200.0, 48.0));
        assert_eq!(wide.diameter, 200.0);
        let tall = RippleGeometry::centered_on((0.0, 0.0), (0.0, 0.0), (40.0, 120.0));
        assert_eq!(tall.diameter, 120.0);
    }

    #[test]
    fn ripple_is_centered_on_click() {
        // 200x50 button at (100, 300), clicked at (150, 320)
        let g = RippleGeometry::centered_on((150.0, 320.0), (100.0, 300.0), (200.0, 50.0));
        assert_eq!(g.left, -50.0);
        assert_eq!(g.top, -80.0);
        assert_eq!(g.left + g.diameter / 2.0, 50.0);
        assert_eq!(g.top + g.diameter / 2.0, 20.0);
    }
}
