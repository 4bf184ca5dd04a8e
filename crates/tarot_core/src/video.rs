use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::sanitize::visible_text;

/// One card tile of the card list page with its preview videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVideo {
    pub card_name: String,
    pub card_url: String,
    pub video_mp4: Option<String>,
    pub video_webm: Option<String>,
}

struct TileSelectors {
    tile: Selector,
    link: Selector,
    title: Selector,
    title_span: Selector,
    video: Selector,
    mp4_source: Selector,
    webm_source: Selector,
}

impl TileSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            tile: Selector::parse("div.card-list__item").ok()?,
            link: Selector::parse("a.card-blog-item").ok()?,
            title: Selector::parse("h5.card-blog-item__title").ok()?,
            title_span: Selector::parse("span").ok()?,
            video: Selector::parse("video.card-video").ok()?,
            mp4_source: Selector::parse(r#"source[type="video/mp4"]"#).ok()?,
            webm_source: Selector::parse(r#"source[type="video/webm"]"#).ok()?,
        })
    }
}

/// Card tiles that carry at least one video URL, in page order.
///
/// With a `base`, relative card and video URLs are resolved against it.
pub fn list_card_videos(document: &Html, base: Option<&Url>) -> Vec<CardVideo> {
    let Some(sel) = TileSelectors::new() else {
        return Vec::new();
    };
    document
        .select(&sel.tile)
        .filter_map(|tile| read_tile(tile, &sel, base))
        .collect()
}

fn read_tile(tile: ElementRef<'_>, sel: &TileSelectors, base: Option<&Url>) -> Option<CardVideo> {
    let video = tile.select(&sel.video).next()?;
    let mp4 = attr_or_source(video, "data-src", &sel.mp4_source);
    let webm = attr_or_source(video, "data-src-webm", &sel.webm_source);
    if mp4.is_none() && webm.is_none() {
        return None;
    }

    let card_url = tile
        .select(&sel.link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .unwrap_or_default();
    let card_name = tile
        .select(&sel.title)
        .next()
        .map(|title| {
            title
                .select(&sel.title_span)
                .next()
                .map(visible_text)
                .unwrap_or_else(|| visible_text(title))
        })
        .unwrap_or_default();

    Some(CardVideo {
        card_name,
        card_url: resolve(card_url, base),
        video_mp4: mp4.map(|url| resolve(url, base)),
        video_webm: webm.map(|url| resolve(url, base)),
    })
}

fn attr_or_source<'a>(video: ElementRef<'a>, attr: &str, source: &Selector) -> Option<&'a str> {
    video
        .value()
        .attr(attr)
        .filter(|value| !value.is_empty())
        .or_else(|| {
            video
                .select(source)
                .next()
                .and_then(|el| el.value().attr("src"))
                .filter(|value| !value.is_empty())
        })
}

fn resolve(reference: &str, base: Option<&Url>) -> String {
    let trimmed = reference.trim();
    match base {
        Some(base) if !trimmed.is_empty() => base
            .join(trimmed)
            .map(String::from)
            .unwrap_or_else(|_| trimmed.to_string()),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{list_card_videos, CardVideo};
    use scraper::Html;
    use url::Url;

    const LIST: &str = r#"
      <div class="card-list__item">
        <a class="card-blog-item" href="/tarot-card-meanings/the-fool">
          <h5 class="card-blog-item__title"><span>The Fool</span> card</h5>
        </a>
        <video class="card-video" data-src="/v/fool.mp4" data-src-webm="/v/fool.webm"></video>
      </div>
      <div class="card-list__item">
        <a class="card-blog-item" href="https://tarotoo.com/magician"></a>
        <h5 class="card-blog-item__title">The Magician</h5>
        <video class="card-video"><source type="video/mp4" src="https://cdn/m.mp4"></video>
      </div>
      <div class="card-list__item"><h5 class="card-blog-item__title">No video</h5></div>
      <div class="card-list__item"><video class="card-video"></video></div>"#;

    #[test]
    fn lists_tiles_with_videos() {
        let videos = list_card_videos(&Html::parse_document(LIST), None);
        assert_eq!(
            videos,
            vec![
                CardVideo {
                    card_name: "The Fool".to_string(),
                    card_url: "/tarot-card-meanings/the-fool".to_string(),
                    video_mp4: Some("/v/fool.mp4".to_string()),
                    video_webm: Some("/v/fool.webm".to_string()),
                },
                CardVideo {
                    card_name: "The Magician".to_string(),
                    card_url: "https://tarotoo.com/magician".to_string(),
                    video_mp4: Some("https://cdn/m.mp4".to_string()),
                    video_webm: None,
                },
            ]
        );
    }

    #[test]
    fn relative_urls_resolve_against_base() {
        let base = Url::parse("https://tarotoo.com/cards/").unwrap();
        let videos = list_card_videos(&Html::parse_document(LIST), Some(&base));
        assert_eq!(videos[0].card_url, "https://tarotoo.com/tarot-card-meanings/the-fool");
        assert_eq!(videos[0].video_mp4.as_deref(), Some("https://tarotoo.com/v/fool.mp4"));
        assert_eq!(videos[1].card_url, "https://tarotoo.com/magician");
    }
}
