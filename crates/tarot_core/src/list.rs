use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use crate::sanitize::has_visible_text;
use crate::walk::contains_element;

/// A list copy with its link-bearing items removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedList {
    /// Outer HTML of the pruned copy, unsanitized.
    pub markup: String,
    pub retained_items: usize,
    pub removed_items: usize,
}

/// Clone `source` into its own tree and detach every direct `<li>` child that
/// holds a hyperlink.
///
/// Returns `None` when no item survives or the copy has no visible text. The
/// tree `source` belongs to is never touched.
pub fn prune_linked_items(source: ElementRef<'_>) -> Option<PrunedList> {
    let tag = source.value().name();
    let mut copy = Html::parse_fragment(&source.html());

    let (list_id, linked): (NodeId, Vec<NodeId>) = {
        let list = copy
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == tag)?;
        let linked = list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|item| item.value().name() == "li" && contains_element(*item, "a"))
            .map(|item| item.id())
            .collect();
        (list.id(), linked)
    };

    for id in &linked {
        if let Some(mut node) = copy.tree.get_mut(*id) {
            node.detach();
        }
    }

    let list = copy.tree.get(list_id).and_then(ElementRef::wrap)?;
    let retained_items = list
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "li")
        .count();
    if retained_items == 0 || !has_visible_text(list) {
        return None;
    }

    Some(PrunedList {
        markup: list.html(),
        retained_items,
        removed_items: linked.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::prune_linked_items;
    use scraper::{Html, Selector};

    fn list_of(doc: &Html) -> scraper::ElementRef<'_> {
        let sel = Selector::parse("ul").unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn removes_only_linked_items() {
        let doc = Html::parse_fragment(
            r#"<ul><li>keep</li><li><a href="x">go</a></li><li>also</li></ul>"#,
        );
        let pruned = prune_linked_items(list_of(&doc)).unwrap();
        assert_eq!(pruned.markup, "<ul><li>keep</li><li>also</li></ul>");
        assert_eq!(pruned.retained_items, 2);
        assert_eq!(pruned.removed_items, 1);
    }

    #[test]
    fn source_tree_is_untouched() {
        let doc = Html::parse_fragment(r#"<ul><li>keep</li><li><a href="x">go</a></li></ul>"#);
        let before = list_of(&doc).html();
        let _ = prune_linked_items(list_of(&doc));
        assert_eq!(list_of(&doc).html(), before);
    }

    #[test]
    fn all_linked_items_drop_the_list() {
        let doc = Html::parse_fragment(r#"<ul><li><a href="a">a</a></li><li><a href="b">b</a></li></ul>"#);
        assert_eq!(prune_linked_items(list_of(&doc)), None);
    }

    #[test]
    fn whitespace_only_items_drop_the_list() {
        let doc = Html::parse_fragment("<ul><li>  </li><li><img src=\"x.png\"></li></ul>");
        assert_eq!(prune_linked_items(list_of(&doc)), None);
    }
}
