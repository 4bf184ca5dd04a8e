use std::fmt::Write;

use tarot_core::CardVideo;

use crate::records::ParagraphReport;

const RULE_WIDTH: usize = 60;

/// Human-readable listing of a paragraph crawl.
pub fn render_paragraph_report(report: &ParagraphReport, fetched_utc: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let separator = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "URL: {}", report.url);
    if !fetched_utc.is_empty() {
        let _ = writeln!(out, "Fetched: {fetched_utc}");
    }
    let _ = writeln!(out, "Paragraphs: {}", report.total_paragraphs);
    let _ = writeln!(out, "{rule}\n");
    for paragraph in &report.paragraphs {
        let _ = writeln!(out, "[{}]", paragraph.index);
        let _ = writeln!(out, "{}", paragraph.text);
        let _ = writeln!(out, "{separator}\n");
    }
    out
}

/// One MP4 URL per line; cards without an MP4 are skipped.
pub fn render_video_list(videos: &[CardVideo]) -> String {
    videos
        .iter()
        .filter_map(|video| video.video_mp4.as_deref())
        .map(|url| format!("{url}\n"))
        .collect()
}

/// Numbered listing of harvested source URLs under a short header.
pub fn render_source_list(sources: &[String], needle: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sources containing '{needle}':");
    let _ = writeln!(out, "{}\n", "=".repeat(RULE_WIDTH + 20));
    for (position, source) in sources.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", position + 1, source);
    }
    out
}
