use pretty_assertions::assert_eq;
use tarot_core::{collect_internal_css, filter_stylesheet, parse_rules, Html, StyleRule, Vocabulary};

const SHEET: &str =
    ".foo{color:red} .bar{color:blue} @media(max-width:10px){.foo{display:none}}";

#[test]
fn keeps_relevant_rules_and_reduces_media_blocks() {
    let vocab = Vocabulary::default().with_class("foo");
    let out = filter_stylesheet(&vocab, SHEET);
    assert_eq!(
        out,
        ".foo {\ncolor:red\n}\n\n@media(max-width:10px) {\n  .foo {\ndisplay:none\n  }\n}"
    );
    assert!(!out.contains(".bar"));
}

#[test]
fn nothing_relevant_is_an_empty_string() {
    let vocab = Vocabulary::default().with_class("baz");
    assert_eq!(filter_stylesheet(&vocab, SHEET), "");
}

#[test]
fn at_rule_wrapper_only_with_surviving_rules() {
    let vocab = Vocabulary::default().with_class("bar");
    let out = filter_stylesheet(&vocab, SHEET);
    assert_eq!(out, ".bar {\ncolor:blue\n}");
    assert!(!out.contains("@media"));
}

#[test]
fn commented_rules_are_ignored() {
    let vocab = Vocabulary::default().with_class("foo");
    let out = filter_stylesheet(&vocab, "/* .foo{color:red} */ .bar{x:y} /* } */ .foo{z:w}");
    assert_eq!(out, ".foo {\nz:w\n}");
}

#[test]
fn compound_selectors_match_on_any_token() {
    let vocab = Vocabulary::default().with_class("child").with_id("hero");
    let out = filter_stylesheet(
        &vocab,
        ".parent .child{a:b} .parent{c:d} section#hero > p{e:f} #hero-alt{g:h}",
    );
    assert_eq!(out, ".parent .child {\na:b\n}\n\nsection#hero > p {\ne:f\n}");
}

#[test]
fn type_selectors_sharing_a_name_are_not_relevant() {
    let vocab = Vocabulary::default().with_class("button").with_id("main");
    let out = filter_stylesheet(
        &vocab,
        "form button{a:b} main{c:d} .button{e:f} main > #main{g:h}",
    );
    assert_eq!(out, ".button {\ne:f\n}\n\nmain > #main {\ng:h\n}");
}

#[test]
fn keyframes_without_selector_tokens_are_dropped() {
    let vocab = Vocabulary::default().with_class("spin");
    let out = filter_stylesheet(
        &vocab,
        "@keyframes spin{from{transform:rotate(0)}to{transform:rotate(1turn)}} .spin{animation:spin 1s}",
    );
    assert_eq!(out, ".spin {\nanimation:spin 1s\n}");
}

#[test]
fn filtering_is_monotone_in_the_vocabulary() {
    let sheet = ".a{x:1} .b .c{x:2} #d{x:3} @media print{.a{x:4} .e{x:5}} .f:hover{x:6}";
    let names = ["a", "c", "e", "f"];
    let mut vocab = Vocabulary::default();
    let mut previous = Vec::new();
    for name in names {
        vocab = vocab.with_class(name);
        let kept = selectors(&filter_stylesheet(&vocab, sheet));
        for selector in &previous {
            assert!(kept.contains(selector), "{selector} vanished after adding {name}");
        }
        previous = kept;
    }
    let with_id = selectors(&filter_stylesheet(&vocab.clone().with_id("d"), sheet));
    assert!(previous.iter().all(|s| with_id.contains(s)));
    assert!(with_id.contains(&"#d".to_string()));
}

#[test]
fn vocabulary_comes_from_target_markup() {
    let target = Html::parse_document(
        r#"<div class="card-blog-item"><h5 class="card-blog-item__title" id="t">x</h5></div>"#,
    );
    let vocab = Vocabulary::from_document(&target);
    let out = filter_stylesheet(
        &vocab,
        ".card-blog-item{a:b}.card-blog-item-other{c:d}.card-blog-item__title span{e:f}#t{g:h}",
    );
    assert_eq!(
        out,
        ".card-blog-item {\na:b\n}\n\n.card-blog-item__title span {\ne:f\n}\n\n#t {\ng:h\n}"
    );
}

#[test]
fn internal_css_feeds_the_filter() {
    let page = Html::parse_document(
        "<html><head><style>.foo{a:b}</style><style>.bar{c:d}</style></head><body></body></html>",
    );
    let css = collect_internal_css(&page);
    let vocab = Vocabulary::default().with_class("bar");
    assert_eq!(filter_stylesheet(&vocab, &css), ".bar {\nc:d\n}");
}

fn selectors(css: &str) -> Vec<String> {
    fn walk(rules: &[StyleRule], out: &mut Vec<String>) {
        for rule in rules {
            match rule {
                StyleRule::Rule { selector, .. } => out.push(selector.clone()),
                StyleRule::AtRule { rules, .. } => walk(rules, out),
            }
        }
    }
    let mut out = Vec::new();
    walk(&parse_rules(css), &mut out);
    out
}
