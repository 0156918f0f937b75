use std::rc::Rc;

use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::dom::{self, Bindings, Listener};

pub const BUTTON_SELECTOR: &str = ".filter-btn";
pub const CARD_SELECTOR: &str = ".platform-card";
pub const ACTIVE_CLASS: &str = "active";

/// Category chosen by the active filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    All,
    Tag(String),
}

impl Category {
    /// Parses a button's `data-filter` token, used as written. Missing or
    /// `all` means no filter.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            None | Some("all") => Category::All,
            Some(tag) => Category::Tag(tag.to_string()),
        }
    }

    pub fn matches(&self, card: &CardText) -> bool {
        match self {
            Category::All => true,
            Category::Tag(tag) => card
                .tags
                .iter()
                .any(|label| label.to_lowercase().contains(tag.as_str())),
        }
    }
}

/// The searchable text of one platform card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardText {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl CardText {
    fn read(card: &HtmlElement) -> Self {
        Self {
            name: dom::text_in(card, ".platform-name"),
            description: dom::text_in(card, ".platform-description"),
            tags: dom::select_all_in(card, ".feature-tag")
                .iter()
                .filter_map(|tag| tag.text_content())
                .collect(),
        }
    }

    pub fn matches_search(&self, search: &str) -> bool {
        if search.is_empty() {
            return true;
        }
        let search = search.to_lowercase();
        self.name.to_lowercase().contains(&search) || self.description.to_lowercase().contains(&search)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub category: Category,
    pub search: String,
}

impl FilterQuery {
    pub fn shows(&self, card: &CardText) -> bool {
        self.category.matches(card) && card.matches_search(&self.search)
    }
}

struct FilterView {
    document: Document,
    search: HtmlInputElement,
    buttons: Vec<HtmlElement>,
    cards: Vec<HtmlElement>,
}

impl FilterView {
    fn query(&self) -> FilterQuery {
        let active = self
            .document
            .query_selector(".filter-btn.active")
            .ok()
            .flatten()
            .and_then(|btn| btn.get_attribute("data-filter"));
        FilterQuery {
            category: Category::from_token(active.as_deref()),
            search: self.search.value().to_lowercase(),
        }
    }

    fn apply(&self) {
        let query = self.query();
        for card in &self.cards {
            if query.shows(&CardText::read(card)) {
                dom::set_style(card, "display", "block");
                dom::set_style(card, "animation", "none");
                dom::force_reflow(card);
                dom::clear_style(card, "animation");
            } else {
                dom::set_style(card, "display", "none");
            }
        }
    }

    fn activate(&self, chosen: &HtmlElement) {
        for button in &self.buttons {
            dom::remove_class(button, ACTIVE_CLASS);
        }
        dom::add_class(chosen, ACTIVE_CLASS);
    }
}

pub fn attach(document: &Document) -> Option<Bindings> {
    let search: HtmlInputElement = dom::by_id(document, "platform-search")?;
    let buttons = dom::select_all(document, BUTTON_SELECTOR);
    if buttons.is_empty() {
        return None;
    }

    let view = Rc::new(FilterView {
        document: document.clone(),
        search,
        buttons,
        cards: dom::select_all(document, CARD_SELECTOR),
    });

    let mut bindings = Bindings::default();
    {
        let view = view.clone();
        let search = view.search.clone();
        bindings.listen(Listener::new(&search, "input", move |_| view.apply()));
    }
    for button in view.buttons.iter() {
        let view = view.clone();
        let chosen = button.clone();
        bindings.listen(Listener::new(button, "click", move |_| {
            view.activate(&chosen);
            view.apply();
        }));
    }
    Some(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, description: &str, tags: &[&str]) -> CardText {
        CardText {
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn cards() -> Vec<CardText> {
        vec![
            card("Swagbucks", "Earn cash for surveys and shopping", &["Paid Surveys", "Cashback"]),
            card("Prolific", "Academic research studies", &["Surveys", "Research"]),
            card("InboxDollars", "Get paid cash to watch videos", &["Videos", "Surveys"]),
            card("Upwork", "Freelance marketplace", &["Freelance"]),
        ]
    }

    fn shown(query: &FilterQuery) -> Vec<String> {
        cards()
            .into_iter()
            .filter(|c| query.shows(c))
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn all_with_empty_search_shows_everything() {
        let query = FilterQuery {
            category: Category::All,
            search: String::new(),
        };
        assert_eq!(shown(&query).len(), 4);
    }

    #[test]
    fn category_and_search_must_both_match() {
        let query = FilterQuery {
            category: Category::from_token(Some("surveys")),
            search: "cash".to_string(),
        };
        assert_eq!(shown(&query), vec!["Swagbucks", "InboxDollars"]);
    }

    #[test]
    fn tag_match_is_substring_and_case_folded() {
        let query = FilterQuery {
            category: Category::from_token(Some("videos")),
            search: String::new(),
        };
        assert_eq!(shown(&query), vec!["InboxDollars"]);
    }

    #[test]
    fn search_checks_name_or_description() {
        let by_name = FilterQuery {
            category: Category::All,
            search: "UPWORK".to_string(),
        };
        assert_eq!(shown(&by_name), vec!["Upwork"]);

        let by_description = FilterQuery {
            category: Category::All,
            search: "research".to_string(),
        };
        assert_eq!(shown(&by_description), vec!["Prolific"]);
    }

    #[test]
    fn missing_or_all_token_is_unfiltered() {
        assert_eq!(Category::from_token(None), Category::All);
        assert_eq!(Category::from_token(Some("all")), Category::All);
        assert_eq!(Category::from_token(Some("surveys")), Category::Tag("surveys".to_string()));
    }

    #[test]
    fn token_is_not_case_folded() {
        // Tag labels are lowercased before matching, the token is not.
        let query = FilterQuery {
            category: Category::from_token(Some("Surveys")),
            search: String::new(),
        };
        assert!(shown(&query).is_empty());
    }

    #[test]
    fn card_without_text_only_matches_empty_search() {
        let blank = CardText::default();
        assert!(blank.matches_search(""));
        assert!(!blank.matches_search("cash"));
    }
}
