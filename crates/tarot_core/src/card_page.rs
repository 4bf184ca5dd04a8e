use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::blocks::SelectorError;
use crate::sanitize::visible_text;
use crate::walk::contains_element;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub html: String,
}

impl TextFragment {
    fn of(element: ElementRef<'_>) -> Self {
        Self {
            text: visible_text(element),
            html: element.html(),
        }
    }
}

/// Headline facts of a card description page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPage {
    pub title: Option<TextFragment>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub paragraphs: Vec<TextFragment>,
    pub relationships: Option<TextFragment>,
    pub reversed_meaning: Option<TextFragment>,
    pub yes_no_meaning: Option<TextFragment>,
}

enum Section {
    Relationships,
    Reversed,
    YesNo,
    Body,
}

fn classify(text: &str) -> Section {
    let lower = text.to_lowercase();
    if lower.contains("relationship") {
        Section::Relationships
    } else if lower.contains("reversed meaning") {
        Section::Reversed
    } else if lower.contains("yes / no meaning") || lower.contains("yes/no meaning") {
        Section::YesNo
    } else {
        Section::Body
    }
}

/// Pulls the title, hero image, summary and sorted paragraphs out of a card page.
#[derive(Debug, Clone)]
pub struct CardPageParser {
    container: Selector,
    title: Selector,
    image: Selector,
    description: Selector,
    paragraph: Selector,
}

impl CardPageParser {
    pub fn new(container: &str) -> Result<Self, SelectorError> {
        Ok(Self {
            container: parse(container)?,
            title: parse("h1")?,
            image: parse("img.attachment-post-thumbnail")?,
            description: parse(r#"meta[property="og:description"]"#)?,
            paragraph: parse("p")?,
        })
    }

    pub fn parse(&self, document: &Html) -> CardPage {
        let mut page = CardPage {
            title: document.select(&self.title).next().map(TextFragment::of),
            image_url: document.select(&self.image).next().and_then(|img| {
                let value = img.value();
                value
                    .attr("src")
                    .filter(|src| !src.is_empty())
                    .or_else(|| value.attr("data-src"))
                    .filter(|src| !src.is_empty())
                    .map(str::to_string)
            }),
            description: document
                .select(&self.description)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(str::to_string),
            ..CardPage::default()
        };

        let Some(container) = document.select(&self.container).next() else {
            return page;
        };
        for p in container.select(&self.paragraph) {
            let fragment = TextFragment::of(p);
            match classify(&fragment.text) {
                Section::Relationships => page.relationships = Some(fragment),
                Section::Reversed => page.reversed_meaning = Some(fragment),
                Section::YesNo => page.yes_no_meaning = Some(fragment),
                Section::Body => {
                    if !fragment.text.is_empty() && !contains_element(p, "img") {
                        page.paragraphs.push(fragment);
                    }
                }
            }
        }
        page
    }
}

fn parse(css: &str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|err| SelectorError {
        selector: css.to_string(),
        message: err.to_string(),
    })
}
