use scraper::{Html, Selector};

use crate::rules::{parse_rules, StyleRule};
use crate::vocabulary::Vocabulary;

/// Reduce `css` to the rules whose selectors name a class or id in
/// `vocabulary`, keeping source order.
///
/// At-rule blocks keep only their relevant inner rules and disappear when none
/// are left. An empty string means nothing was relevant.
pub fn filter_stylesheet(vocabulary: &Vocabulary, css: &str) -> String {
    let kept = retain_relevant(parse_rules(css), vocabulary);
    render_rules(&kept)
}

pub fn retain_relevant(rules: Vec<StyleRule>, vocabulary: &Vocabulary) -> Vec<StyleRule> {
    rules
        .into_iter()
        .filter_map(|rule| retain(rule, vocabulary))
        .collect()
}

fn retain(rule: StyleRule, vocabulary: &Vocabulary) -> Option<StyleRule> {
    match rule {
        StyleRule::Rule { selector, body } => {
            if vocabulary.is_relevant(&selector) {
                Some(StyleRule::Rule { selector, body })
            } else {
                None
            }
        }
        StyleRule::AtRule { prelude, rules } => {
            let rules = retain_relevant(rules, vocabulary);
            if rules.is_empty() {
                None
            } else {
                Some(StyleRule::AtRule { prelude, rules })
            }
        }
    }
}

/// Top-level units separated by a blank line; nested rules indented two
/// spaces per level.
pub fn render_rules(rules: &[StyleRule]) -> String {
    rules
        .iter()
        .map(|rule| render(rule, 0))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render(rule: &StyleRule, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    match rule {
        StyleRule::Rule { selector, body } => {
            format!("{indent}{selector} {{\n{body}\n{indent}}}")
        }
        StyleRule::AtRule { prelude, rules } => {
            let inner = rules
                .iter()
                .map(|rule| render(rule, depth + 1))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{indent}{prelude} {{\n{inner}\n{indent}}}")
        }
    }
}

/// Contents of every non-empty `<style>` element, trimmed and joined by a
/// blank line.
pub fn collect_internal_css(document: &Html) -> String {
    let Ok(style_sel) = Selector::parse("style") else {
        return String::new();
    };
    document
        .select(&style_sel)
        .map(|style| style.text().collect::<String>())
        .map(|css| css.trim().to_string())
        .filter(|css| !css.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
