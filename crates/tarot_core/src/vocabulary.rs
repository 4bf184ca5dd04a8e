use std::collections::BTreeSet;

use scraper::Html;

/// Class and id names used by a target page.
///
/// Built once from a document and only read afterwards; it is the key the
/// stylesheet filter matches selectors against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    class_names: BTreeSet<String>,
    ids: BTreeSet<String>,
}

impl Vocabulary {
    /// Harvest every `class` token and `id` value of every element.
    pub fn from_document(document: &Html) -> Self {
        let mut vocabulary = Self::default();
        for element in document.tree.values().filter_map(|node| node.as_element()) {
            vocabulary
                .class_names
                .extend(element.classes().map(str::to_string));
            if let Some(id) = element.id().map(str::trim).filter(|id| !id.is_empty()) {
                vocabulary.ids.insert(id.to_string());
            }
        }
        vocabulary
    }

    pub fn with_class(mut self, name: impl Into<String>) -> Self {
        self.class_names.insert(name.into());
        self
    }

    pub fn with_id(mut self, name: impl Into<String>) -> Self {
        self.ids.insert(name.into());
        self
    }

    pub fn class_names(&self) -> &BTreeSet<String> {
        &self.class_names
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty() && self.ids.is_empty()
    }

    /// True when `selector` names any known class or id as a whole token.
    pub fn is_relevant(&self, selector: &str) -> bool {
        let selector = selector.trim();
        self.class_names
            .iter()
            .any(|name| references(selector, '.', name))
            || self.ids.iter().any(|name| references(selector, '#', name))
    }
}

/// `sigil` immediately followed by `name` occurs in `selector`, closed by a
/// non-identifier character or the end of the selector. A bare `name` is a
/// type selector and never counts.
fn references(selector: &str, sigil: char, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let token = format!("{sigil}{name}");
    let mut from = 0;
    while let Some(offset) = selector[from..].find(&token) {
        let start = from + offset;
        let end = start + token.len();
        if selector[end..].chars().next().map_or(true, |c| !is_ident_char(c)) {
            return true;
        }
        // Step past the sigil so overlapping occurrences are still seen.
        from = start + sigil.len_utf8();
    }
    false
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '\\' || !c.is_ascii()
}
