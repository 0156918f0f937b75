use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom::{self, Bindings, Listener};

pub const ACTIVE_CLASS: &str = "active";

/// Single-open accordion: at most one item is open at any time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn new(open: Option<usize>) -> Self {
        Self { open }
    }

    #[cfg(test)]
    pub fn open_item(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Opens `index` (closing whichever item was open), or closes it if it
    /// already was.
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.is_open(index) { None } else { Some(index) };
    }
}

struct FaqItem {
    item: HtmlElement,
    answer: Option<HtmlElement>,
}

impl FaqItem {
    fn render(&self, open: bool) {
        if open {
            dom::add_class(&self.item, ACTIVE_CLASS);
            if let Some(answer) = &self.answer {
                dom::set_style(answer, "max-height", &format!("{}px", answer.scroll_height()));
            }
        } else if dom::has_class(&self.item, ACTIVE_CLASS) {
            dom::remove_class(&self.item, ACTIVE_CLASS);
            if let Some(answer) = &self.answer {
                dom::set_style(answer, "max-height", "0");
            }
        }
    }
}

pub fn attach(document: &Document) -> Option<Bindings> {
    let questions = dom::select_all(document, ".faq-question");
    if questions.is_empty() {
        return None;
    }

    let (questions, items): (Vec<HtmlElement>, Vec<FaqItem>) = questions
        .into_iter()
        .filter_map(|question| {
            let item = question.parent_element()?.dyn_into::<HtmlElement>().ok()?;
            let answer = dom::select_in(&item, ".faq-answer");
            Some((question, FaqItem { item, answer }))
        })
        .unzip();
    let items = Rc::new(items);
    let initially_open = items.iter().position(|faq| dom::has_class(&faq.item, ACTIVE_CLASS));
    let state = Rc::new(RefCell::new(Accordion::new(initially_open)));

    let mut bindings = Bindings::default();
    for (index, question) in questions.iter().enumerate() {
        let items = items.clone();
        let state = state.clone();
        bindings.listen(Listener::new(question, "click", move |_| {
            let mut state = state.borrow_mut();
            state.toggle(index);
            for (i, faq) in items.iter().enumerate() {
                faq.render(state.is_open(i));
            }
        }));
    }
    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_b_closes_a() {
        let mut accordion = Accordion::default();
        accordion.toggle(0);
        assert!(accordion.is_open(0));
        accordion.toggle(1);
        assert!(!accordion.is_open(0));
        assert!(accordion.is_open(1));
    }

    #[test]
    fn clicking_open_item_closes_it() {
        let mut accordion = Accordion::new(Some(2));
        accordion.toggle(2);
        assert_eq!(accordion.open_item(), None);
    }

    #[test]
    fn never_two_open_for_any_click_sequence() {
        let clicks = [0, 3, 3, 1, 2, 2, 2, 0, 1, 1, 4, 0];
        let mut accordion = Accordion::default();
        for click in clicks {
            accordion.toggle(click);
            let open = (0..5).filter(|&i| accordion.is_open(i)).count();
            assert!(open <= 1);
        }
        assert_eq!(accordion.open_item(), Some(0));
    }
}
