use std::sync::Arc;
use std::time::Duration;

use tarot_core::{
    collect_paragraphs, marked_lines, BlockExtractor, CardPage, CardPageParser, CardVideo,
    ContentBlock, Extractor, Html, MarkedLine, SelectorError, DEFAULT_CONTAINER, DEFAULT_MARKER,
};
use tarot_logging::{tarot_debug, tarot_info, tarot_warn};

use crate::decode::{decode_page, DecodeError, DecodedPage};
use crate::fetch::{FetchSettings, Fetcher};
use crate::records::{CardContentRecord, CardDataRecord, CardSource, CrawlStatus, ParagraphReport};
use crate::types::{CrawlEvent, FetchError, JobProgress, ProgressSink};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Clone)]
pub struct CrawlSettings {
    pub fetch: FetchSettings,
    /// Selector of the content area blocks are extracted from.
    pub container: String,
    /// Line prefix picked up by the card data crawl.
    pub marker: String,
    /// Fixed pause between two consecutive requests of a batch.
    pub pause: Duration,
    /// Timestamp source for reports.
    pub clock: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            container: DEFAULT_CONTAINER.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            pause: Duration::from_secs(1),
            clock: Arc::new(String::new),
        }
    }
}

impl std::fmt::Debug for CrawlSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlSettings")
            .field("fetch", &self.fetch)
            .field("container", &self.container)
            .field("marker", &self.marker)
            .field("pause", &self.pause)
            .finish_non_exhaustive()
    }
}

/// Runs fetch → decode → extract for single pages and sequential batches.
///
/// Pages are parsed and dropped between awaits, so no document tree is held
/// across a suspension point.
pub struct Harvester<F: Fetcher> {
    fetcher: F,
    settings: CrawlSettings,
    blocks: BlockExtractor,
    card_pages: CardPageParser,
}

impl<F: Fetcher> Harvester<F> {
    pub fn new(fetcher: F, settings: CrawlSettings) -> Result<Self, SelectorError> {
        let blocks = BlockExtractor::new(&settings.container)?;
        let card_pages = CardPageParser::new(&settings.container)?;
        tarot_debug!("Extracting content below `{}`", blocks.container());
        Ok(Self {
            fetcher,
            settings,
            blocks,
            card_pages,
        })
    }

    pub fn timestamp(&self) -> String {
        (self.settings.clock)()
    }

    pub async fn fetch_page(&self, url: &str) -> Result<DecodedPage, CrawlError> {
        let output = self.fetcher.fetch(url).await?;
        Ok(decode_page(&output.bytes, output.metadata.content_type.as_deref())?)
    }

    pub async fn crawl_card(&self, card: &CardSource) -> CardContentRecord {
        match self.fetch_page(&card.card_url).await {
            Ok(page) => {
                let blocks = self.extract_blocks(&page.html);
                if blocks.is_empty() {
                    tarot_warn!("No content found for card {} ({})", card.id, card.card_url);
                }
                CardContentRecord::extracted(card, blocks)
            }
            Err(err) => {
                tarot_warn!("Cannot crawl card {} ({}): {}", card.id, card.card_url, err);
                CardContentRecord::failed(card, err)
            }
        }
    }

    /// Crawl every card in order. Failures are recorded and the batch goes on.
    pub async fn crawl_cards(
        &self,
        cards: &[CardSource],
        sink: &dyn ProgressSink,
    ) -> Vec<CardContentRecord> {
        let total = cards.len();
        let mut records = Vec::with_capacity(total);
        for (offset, card) in cards.iter().enumerate() {
            let position = offset + 1;
            self.pace(offset).await;
            emit_started(sink, position, total, &card.card_name);
            let record = self.crawl_card(card).await;
            sink.emit(CrawlEvent::JobCompleted {
                position,
                total,
                label: card.card_name.clone(),
                status: record.status,
                items: record.total_blocks,
                error: record.error.clone(),
            });
            records.push(record);
        }
        tarot_info!("Crawled {} cards", records.len());
        records
    }

    pub async fn crawl_paragraphs(&self, url: &str) -> ParagraphReport {
        match self.fetch_page(url).await {
            Ok(page) => {
                let paragraphs = collect_paragraphs(&Html::parse_document(&page.html));
                ParagraphReport {
                    url: url.to_string(),
                    status: CrawlStatus::Success,
                    total_paragraphs: paragraphs.len(),
                    paragraphs,
                    error: None,
                }
            }
            Err(err) => {
                tarot_warn!("Cannot crawl {}: {}", url, err);
                ParagraphReport {
                    url: url.to_string(),
                    status: CrawlStatus::Error,
                    total_paragraphs: 0,
                    paragraphs: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn crawl_card_data(&self, video: &CardVideo) -> CardDataRecord {
        let page = match self.fetch_page(&video.card_url).await {
            Ok(page) => page,
            Err(err) => {
                tarot_warn!("Cannot crawl {}: {}", video.card_name, err);
                return CardDataRecord::failed(video, err);
            }
        };
        let (structured, marked) = self.read_card_page(&page.html);
        CardDataRecord {
            card_name: video.card_name.clone(),
            card_url: video.card_url.clone(),
            status: CrawlStatus::Success,
            structured_content: Some(structured),
            total_marked_items: marked.len(),
            marked_content: marked,
            video_mp4: video.video_mp4.clone(),
            video_webm: video.video_webm.clone(),
            error: None,
        }
    }

    pub async fn crawl_card_data_batch(
        &self,
        videos: &[CardVideo],
        sink: &dyn ProgressSink,
    ) -> Vec<CardDataRecord> {
        let total = videos.len();
        let mut records = Vec::with_capacity(total);
        for (offset, video) in videos.iter().enumerate() {
            let position = offset + 1;
            self.pace(offset).await;
            emit_started(sink, position, total, &video.card_name);
            let record = self.crawl_card_data(video).await;
            sink.emit(CrawlEvent::JobCompleted {
                position,
                total,
                label: video.card_name.clone(),
                status: record.status,
                items: record.total_marked_items,
                error: record.error.clone(),
            });
            records.push(record);
        }
        records
    }

    fn extract_blocks(&self, html: &str) -> Vec<ContentBlock> {
        self.blocks.extract(&Html::parse_document(html))
    }

    fn read_card_page(&self, html: &str) -> (CardPage, Vec<MarkedLine>) {
        let structured = self.card_pages.parse(&Html::parse_document(html));
        (structured, marked_lines(html, &self.settings.marker))
    }

    async fn pace(&self, offset: usize) {
        if offset > 0 && !self.settings.pause.is_zero() {
            tokio::time::sleep(self.settings.pause).await;
        }
    }
}

fn emit_started(sink: &dyn ProgressSink, position: usize, total: usize, label: &str) {
    sink.emit(CrawlEvent::Started(JobProgress {
        position,
        total,
        label: label.to_string(),
    }));
}
