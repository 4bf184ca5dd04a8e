//! Tree traversal helpers shared by the block and list passes.
//!
//! Nodes are addressed by their arena `NodeId`, so two structurally identical
//! elements are always told apart.

use std::collections::HashSet;

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use scraper::ElementRef;

/// Elements strictly below `container`, in document order, whose tag is in `tags`.
pub fn descendant_elements<'a>(
    container: ElementRef<'a>,
    tags: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |element| tags.contains(&element.value().name()))
}

/// A node is covered when it, or any of its ancestors, was already captured.
pub fn is_covered(node: NodeRef<'_, Node>, processed: &HashSet<NodeId>) -> bool {
    std::iter::once(node)
        .chain(node.ancestors())
        .any(|candidate| processed.contains(&candidate.id()))
}

/// True when an ancestor of `node` strictly below `boundary` has one of `tags`.
pub fn has_ancestor_within(node: NodeRef<'_, Node>, boundary: NodeId, tags: &[&str]) -> bool {
    node.ancestors()
        .take_while(|ancestor| ancestor.id() != boundary)
        .filter_map(ElementRef::wrap)
        .any(|ancestor| tags.contains(&ancestor.value().name()))
}

/// Tag name of the element directly above `node`, if any.
pub fn parent_tag<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.value().name())
}

/// True when some element strictly below `element` is a `tag`.
pub fn contains_element(element: ElementRef<'_>, tag: &str) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| child.value().name() == tag)
}
