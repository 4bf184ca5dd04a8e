use serde::{Deserialize, Serialize};
use tarot_core::{CardPage, CardVideo, ContentBlock, MarkedLine, Paragraph};

/// One entry of the card index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSource {
    pub id: u32,
    pub card_name: String,
    pub card_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    /// Fetched and at least one item extracted.
    Success,
    /// Fetched, but nothing was extracted.
    Warning,
    /// Fetching or decoding failed.
    Error,
}

impl CrawlStatus {
    pub fn for_item_count(count: usize) -> Self {
        if count == 0 {
            Self::Warning
        } else {
            Self::Success
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContentRecord {
    pub url: String,
    pub status: CrawlStatus,
    #[serde(rename = "cardId")]
    pub card_id: u32,
    pub total_blocks: usize,
    pub blocks: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CardContentRecord {
    pub fn extracted(card: &CardSource, blocks: Vec<ContentBlock>) -> Self {
        Self {
            url: card.card_url.clone(),
            status: CrawlStatus::for_item_count(blocks.len()),
            card_id: card.id,
            total_blocks: blocks.len(),
            blocks,
            error: None,
        }
    }

    pub fn failed(card: &CardSource, error: impl ToString) -> Self {
        Self {
            url: card.card_url.clone(),
            status: CrawlStatus::Error,
            card_id: card.id,
            total_blocks: 0,
            blocks: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphReport {
    pub url: String,
    pub status: CrawlStatus,
    pub total_paragraphs: usize,
    pub paragraphs: Vec<Paragraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Structured page facts merged with the card's video links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDataRecord {
    pub card_name: String,
    pub card_url: String,
    pub status: CrawlStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<CardPage>,
    #[serde(default)]
    pub marked_content: Vec<MarkedLine>,
    pub total_marked_items: usize,
    pub video_mp4: Option<String>,
    pub video_webm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CardDataRecord {
    pub fn failed(video: &CardVideo, error: impl ToString) -> Self {
        Self {
            card_name: video.card_name.clone(),
            card_url: video.card_url.clone(),
            status: CrawlStatus::Error,
            structured_content: None,
            marked_content: Vec::new(),
            total_marked_items: 0,
            video_mp4: video.video_mp4.clone(),
            video_webm: video.video_webm.clone(),
            error: Some(error.to_string()),
        }
    }
}

/// Per-status counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTally {
    pub total: usize,
    pub success: usize,
    pub warning: usize,
    pub error: usize,
}

impl BatchTally {
    pub fn from_statuses(statuses: impl IntoIterator<Item = CrawlStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut tally, status| {
            tally.total += 1;
            match status {
                CrawlStatus::Success => tally.success += 1,
                CrawlStatus::Warning => tally.warning += 1,
                CrawlStatus::Error => tally.error += 1,
            }
            tally
        })
    }
}
