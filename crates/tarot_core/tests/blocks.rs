use pretty_assertions::assert_eq;
use tarot_core::{
    extract_blocks, BlockExtractor, BlockKind, ContentBlock, Extractor, Html, DEFAULT_CONTAINER,
};

fn init_logging() {
    tarot_logging::initialize_for_tests();
}

fn extract(html: &str) -> Vec<ContentBlock> {
    init_logging();
    let doc = Html::parse_document(html);
    BlockExtractor::new(DEFAULT_CONTAINER).unwrap().extract(&doc)
}

fn block(index: usize, kind: BlockKind, markup: &str) -> ContentBlock {
    ContentBlock {
        sequence_index: index,
        kind,
        markup: markup.to_string(),
    }
}

#[test]
fn heading_paragraph_and_pruned_list() {
    let blocks = extract(
        r#"<div class="content__body"><h2>Love</h2><p>Great day</p><ul><li>ok</li><li><a href="x">link</a> skip</li></ul></div>"#,
    );
    assert_eq!(
        blocks,
        vec![
            block(1, BlockKind::Heading2, "<h2>Love</h2>"),
            block(2, BlockKind::Paragraph, "<p>Great day</p>"),
            block(3, BlockKind::List, "<ul><li>ok</li></ul>"),
        ]
    );
}

#[test]
fn absent_container_yields_nothing() {
    let blocks = extract("<div class=\"other\"><p>text</p></div>");
    assert!(blocks.is_empty());
}

#[test]
fn invalid_container_selector_is_reported() {
    let doc = Html::parse_document("<p>x</p>");
    let err = extract_blocks(&doc, "div[").unwrap_err();
    assert_eq!(err.selector, "div[");
}

#[test]
fn first_container_match_is_used() {
    let blocks = extract(
        r#"<div class="content__body"><p>first</p></div><div class="content__body"><p>second</p></div>"#,
    );
    assert_eq!(blocks, vec![block(1, BlockKind::Paragraph, "<p>first</p>")]);
}

#[test]
fn serializes_as_index_type_html_records() {
    let blocks = extract(r#"<div class="content__body"><h1>A</h1><ul><li>b</li></ul></div>"#);
    let json = serde_json::to_string(&blocks).unwrap();
    assert_eq!(
        json,
        r#"[{"index":1,"type":"h1","html":"<h1>A</h1>"},{"index":2,"type":"ul","html":"<ul><li>b</li></ul>"}]"#
    );
}

#[test]
fn list_content_is_never_emitted_twice() {
    let blocks = extract(
        r#"<div class="content__body">
            <ul>
              <li><h3>Inner heading</h3><p>inner para</p></li>
              <li>plain</li>
            </ul>
            <p>after</p>
        </div>"#,
    );
    let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BlockKind::List, BlockKind::Paragraph]);
    assert!(blocks[0].markup.contains("inner para"));
    assert_eq!(blocks[1].markup, "<p>after</p>");
}

#[test]
fn paragraphs_inside_fully_linked_list_stay_excluded() {
    let blocks = extract(
        r#"<div class="content__body"><ul><li><a href="a">nav</a><p>blurb</p></li></ul><p>body</p></div>"#,
    );
    assert_eq!(blocks, vec![block(1, BlockKind::Paragraph, "<p>body</p>")]);
}

#[test]
fn standalone_items_outside_lists() {
    let blocks = extract(
        r#"<div class="content__body">
            <ol><li>ordered one</li><li><a href="x">linked</a></li></ol>
            <li>orphan</li>
        </div>"#,
    );
    assert_eq!(
        blocks,
        vec![
            block(1, BlockKind::ListItem, "<li>ordered one</li>"),
            block(2, BlockKind::ListItem, "<li>orphan</li>"),
        ]
    );
}

#[test]
fn emitted_ancestors_cover_their_descendants() {
    let blocks = extract(
        r#"<div class="content__body"><ol><li>item <p>nested para</p></li></ol></div>"#,
    );
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::ListItem);
}

#[test]
fn blank_nodes_are_dropped_and_indices_stay_contiguous() {
    let blocks = extract(
        r#"<div class="content__body"><p>  </p><h1><img src="x"></h1><p>a</p><ul><li> </li></ul><h3>b</h3></div>"#,
    );
    let indices: Vec<_> = blocks.iter().map(|b| b.sequence_index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert_eq!(blocks[1].markup, "<h3>b</h3>");
}

#[test]
fn markup_is_sanitized() {
    let blocks = extract(
        "<div class=\"content__body\"><p>Great\u{1}\n\n    day\t\tahead</p></div>",
    );
    assert_eq!(blocks[0].markup, "<p>Great day ahead</p>");
    for block in &blocks {
        assert!(!block.markup.contains("  "));
        assert!(!block.markup.chars().any(|c| c.is_control()));
    }
}

#[test]
fn control_only_text_is_not_content() {
    let blocks = extract(
        "<div class=\"content__body\"><p>\u{1}\u{2}</p><ul><li>\u{7}</li></ul><li>\u{1F} </li><p>real</p></div>",
    );
    assert_eq!(blocks, vec![block(1, BlockKind::Paragraph, "<p>real</p>")]);
}

#[test]
fn every_item_linked_emits_no_list_or_item() {
    let blocks = extract(
        r#"<div class="content__body"><ul><li><a href="1">one</a></li><li><a href="2">two</a></li></ul></div>"#,
    );
    assert!(blocks.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let html = r#"<div class="content__body"><h2>Career</h2><p>Work</p><ul><li>x</li><li>y</li></ul><li>z</li></div>"#;
    let doc = Html::parse_document(html);
    let extractor = BlockExtractor::new(DEFAULT_CONTAINER).unwrap();
    let first = extractor.extract(&doc);
    let second = extractor.extract(&doc);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn custom_container_selector() {
    let doc = Html::parse_document(r#"<article id="card"><p>scoped</p></article><p>outside</p>"#);
    let blocks = extract_blocks(&doc, "article#card").unwrap();
    assert_eq!(blocks, vec![block(1, BlockKind::Paragraph, "<p>scoped</p>")]);

    let extractor = BlockExtractor::new("article#card").unwrap();
    assert_eq!(extractor.container(), "article#card");
    assert_eq!(extractor.extract(&doc), blocks);
}
