//! Tarot core: pure, IO-free extraction over parsed pages and stylesheets.
mod blocks;
mod card_page;
mod list;
mod marked;
mod paragraphs;
mod rules;
mod sanitize;
mod sources;
mod stylesheet;
mod video;
mod vocabulary;
pub mod walk;

pub use blocks::{
    extract_blocks, BlockExtractor, BlockKind, ContentBlock, Extractor, SelectorError,
    DEFAULT_CONTAINER,
};
pub use card_page::{CardPage, CardPageParser, TextFragment};
pub use list::{prune_linked_items, PrunedList};
pub use marked::{marked_lines, MarkedLine, DEFAULT_MARKER};
pub use paragraphs::{collect_paragraphs, Paragraph};
pub use rules::{parse_rules, strip_comments, StyleRule};
pub use sanitize::{has_visible_text, sanitize_markup, visible_text};
pub use sources::collect_sources;
pub use stylesheet::{collect_internal_css, filter_stylesheet, render_rules, retain_relevant};
pub use video::{list_card_videos, CardVideo};
pub use vocabulary::Vocabulary;

pub use scraper::Html;
