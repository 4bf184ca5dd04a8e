use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::sanitize::visible_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// 1-based position among all `<p>` elements of the page, empty ones included.
    pub index: usize,
    pub text: String,
    pub html: String,
}

/// Every `<p>` of the page that has visible text.
pub fn collect_paragraphs(document: &Html) -> Vec<Paragraph> {
    let Ok(p_sel) = Selector::parse("p") else {
        return Vec::new();
    };
    document
        .select(&p_sel)
        .enumerate()
        .filter_map(|(position, p)| {
            let text = visible_text(p);
            if text.is_empty() {
                return None;
            }
            Some(Paragraph {
                index: position + 1,
                text,
                html: p.html(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::collect_paragraphs;
    use scraper::Html;

    #[test]
    fn empty_paragraphs_still_consume_an_index() {
        let doc = Html::parse_document("<p>one</p><p> </p><div><p>three</p></div>");
        let paragraphs = collect_paragraphs(&doc);
        let indexed: Vec<_> = paragraphs.iter().map(|p| (p.index, p.text.as_str())).collect();
        assert_eq!(indexed, vec![(1, "one"), (3, "three")]);
        assert_eq!(paragraphs[1].html, "<p>three</p>");
    }
}
