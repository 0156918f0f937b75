//! Presentation-tree primitives shared by every behavior: element queries,
//! class/style setters and owned event/intersection/timer handles that
//! unregister themselves when dropped.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, Window,
};

use crate::error::BehaviorError;

pub fn window_and_document() -> Result<(Window, Document), BehaviorError> {
    let window = web_sys::window().ok_or(BehaviorError::NoWindow)?;
    let document = window.document().ok_or(BehaviorError::NoDocument)?;
    Ok((window, document))
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn select_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    match document.query_selector_all(selector) {
        Ok(list) => html_elements(list),
        Err(e) => {
            log::warn!("Bad selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn select_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(html_elements)
        .unwrap_or_default()
}

pub fn select_in(root: &Element, selector: &str) -> Option<HtmlElement> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Text content of the first `selector` match under `root`, or empty.
pub fn text_in(root: &Element, selector: &str) -> String {
    select_in(root, selector)
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Reading a layout property flushes pending style changes, which lets a
/// removed-then-re-added animation start over.
pub fn force_reflow(el: &HtmlElement) {
    let _ = el.offset_width();
}

pub fn supports_intersection_observer(window: &Window) -> bool {
    Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// An event listener that is removed from its target on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for {}: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// What a watcher should do with an element after one intersection report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Release,
}

/// Viewport-intersection watcher. `on_report` sees every intersection change
/// of every observed element and decides whether to keep watching it.
pub struct Watcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Watcher {
    pub fn new<F>(options: Option<&IntersectionObserverInit>, mut on_report: F) -> Result<Self, BehaviorError>
    where
        F: FnMut(&Element, bool) -> Watch + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                if on_report(&target, entry.is_intersecting()) == Watch::Release {
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let observer = match options {
            Some(init) => {
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), init)?
            }
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
        };

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Holds at most one pending timeout. Dropping or cancelling the slot clears
/// the timer before it fires.
#[derive(Clone, Default)]
pub struct TimerSlot(Rc<RefCell<Option<Timeout>>>);

impl TimerSlot {
    pub fn schedule<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        // Replacing drops (and so clears) any earlier timeout.
        *self.0.borrow_mut() = Some(Timeout::new(millis, callback));
    }

    pub fn cancel(&self) -> bool {
        self.0.borrow_mut().take().is_some()
    }
}

/// Everything one behavior registered. Dropping it detaches the behavior.
#[derive(Default)]
pub struct Bindings {
    listeners: Vec<Listener>,
    watchers: Vec<Watcher>,
    timers: Vec<TimerSlot>,
}

impl Bindings {
    pub fn listen(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn watch(&mut self, watcher: Watcher) {
        self.watchers.push(watcher);
    }

    pub fn track_timer(&mut self, slot: TimerSlot) {
        self.timers.push(slot);
    }

    pub fn extend(&mut self, mut other: Bindings) {
        self.listeners.append(&mut other.listeners);
        self.watchers.append(&mut other.watchers);
        self.timers.append(&mut other.timers);
    }

    pub fn len(&self) -> usize {
        self.listeners.len() + self.watchers.len() + self.timers.len()
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        for slot in &self.timers {
            slot.cancel();
        }
    }
}
