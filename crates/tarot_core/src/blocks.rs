use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tarot_logging::{tarot_debug, tarot_trace};

use crate::list::prune_linked_items;
use crate::sanitize::{has_visible_text, sanitize_markup};
use crate::walk::{contains_element, descendant_elements, has_ancestor_within, is_covered, parent_tag};

/// Content area of a card description page.
pub const DEFAULT_CONTAINER: &str = "div.content__body";

const BLOCK_TAGS: &[&str] = &["p", "ul", "li", "h1", "h2", "h3"];
const LIST_TAGS: &[&str] = &["ul", "li"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "h1")]
    Heading1,
    #[serde(rename = "h2")]
    Heading2,
    #[serde(rename = "h3")]
    Heading3,
    #[serde(rename = "p")]
    Paragraph,
    #[serde(rename = "li")]
    ListItem,
    #[serde(rename = "ul")]
    List,
}

impl BlockKind {
    fn for_text_tag(tag: &str) -> Option<Self> {
        match tag {
            "p" => Some(Self::Paragraph),
            "h1" => Some(Self::Heading1),
            "h2" => Some(Self::Heading2),
            "h3" => Some(Self::Heading3),
            _ => None,
        }
    }
}

/// One emitted unit of page content, serialized as `{index, type, html}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "index")]
    pub sequence_index: usize,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(rename = "html")]
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid container selector `{selector}`: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

pub trait Extractor {
    fn extract(&self, document: &Html) -> Vec<ContentBlock>;
}

/// Structural block extractor scoped to the first element matching a
/// container selector.
///
/// Walks `p`, `ul`, `li` and `h1`-`h3` below the container in document order:
/// - `ul`: emitted as a pruned copy without its link-bearing items;
/// - `li`: emitted only outside a `ul`, and only without a link;
/// - `p`/`h*`: emitted unless nested in a `ul` or `li` below the container.
///
/// Anything inside an emitted node is never visited again.
#[derive(Debug, Clone)]
pub struct BlockExtractor {
    container: Selector,
    container_source: String,
}

impl BlockExtractor {
    pub fn new(container: &str) -> Result<Self, SelectorError> {
        let selector = Selector::parse(container).map_err(|err| SelectorError {
            selector: container.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            container: selector,
            container_source: container.to_string(),
        })
    }

    pub fn container(&self) -> &str {
        &self.container_source
    }
}

impl Extractor for BlockExtractor {
    fn extract(&self, document: &Html) -> Vec<ContentBlock> {
        let Some(container) = document.select(&self.container).next() else {
            tarot_debug!("No element matches container `{}`", self.container_source);
            return Vec::new();
        };

        let mut run = ExtractionRun::new(container.id());
        for candidate in descendant_elements(container, BLOCK_TAGS) {
            if is_covered(*candidate, &run.processed) {
                continue;
            }
            match candidate.value().name() {
                "ul" => run.visit_list(candidate),
                "li" => run.visit_item(candidate),
                tag => run.visit_text(candidate, tag),
            }
        }

        tarot_debug!(
            "Extracted {} blocks from `{}`",
            run.blocks.len(),
            self.container_source
        );
        run.blocks
    }
}

/// Parse `container` and run a one-off extraction over `document`.
pub fn extract_blocks(document: &Html, container: &str) -> Result<Vec<ContentBlock>, SelectorError> {
    Ok(BlockExtractor::new(container)?.extract(document))
}

struct ExtractionRun {
    container: NodeId,
    processed: HashSet<NodeId>,
    blocks: Vec<ContentBlock>,
}

impl ExtractionRun {
    fn new(container: NodeId) -> Self {
        Self {
            container,
            processed: HashSet::new(),
            blocks: Vec::new(),
        }
    }

    fn visit_list(&mut self, list: ElementRef<'_>) {
        match prune_linked_items(list) {
            Some(pruned) => {
                tarot_trace!(
                    "List kept {} items, dropped {} linked",
                    pruned.retained_items,
                    pruned.removed_items
                );
                self.emit(list.id(), BlockKind::List, &pruned.markup);
            }
            None => tarot_trace!("List has no content items left"),
        }
    }

    fn visit_item(&mut self, item: ElementRef<'_>) {
        // Items inside a list belong to that list's block.
        if parent_tag(*item) == Some("ul") {
            return;
        }
        if contains_element(item, "a") || !has_visible_text(item) {
            return;
        }
        self.emit(item.id(), BlockKind::ListItem, &item.html());
    }

    fn visit_text(&mut self, element: ElementRef<'_>, tag: &str) {
        let Some(kind) = BlockKind::for_text_tag(tag) else {
            return;
        };
        if has_ancestor_within(*element, self.container, LIST_TAGS) {
            return;
        }
        if !has_visible_text(element) {
            return;
        }
        self.emit(element.id(), kind, &element.html());
    }

    fn emit(&mut self, node: NodeId, kind: BlockKind, raw: &str) {
        let markup = sanitize_markup(raw);
        if markup.is_empty() {
            return;
        }
        self.blocks.push(ContentBlock {
            sequence_index: self.blocks.len() + 1,
            kind,
            markup,
        });
        self.processed.insert(node);
    }
}
