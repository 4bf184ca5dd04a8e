use std::collections::BTreeSet;

use scraper::Html;

const SOURCE_ATTRS: &[&str] = &["src", "data-src"];

/// Distinct `src`/`data-src` values containing `needle`, sorted.
pub fn collect_sources(document: &Html, needle: &str) -> Vec<String> {
    let mut found = BTreeSet::new();
    for element in document.tree.values().filter_map(|node| node.as_element()) {
        for attr in SOURCE_ATTRS {
            if let Some(value) = element.attr(attr).filter(|value| value.contains(needle)) {
                found.insert(value.to_string());
            }
        }
    }
    found.into_iter().collect()
}
