use std::path::Path;

use anyhow::{bail, Context, Result};
use tarot_core::{collect_sources, extract_blocks, list_card_videos, CardVideo, Html};
use tarot_engine::{
    deterministic_filename, preview_lines, read_json, read_text, render_paragraph_report,
    render_source_list, render_video_list, write_json, write_scoped_css, AtomicFileWriter,
    BatchTally, CardSource, CrawlSettings, Harvester, ReqwestFetcher, PREVIEW_LINES,
};
use tarot_logging::{tarot_info, tarot_warn};
use url::Url;

use crate::progress::LogSink;

fn harvester(settings: CrawlSettings) -> Result<Harvester<ReqwestFetcher>> {
    let fetcher = ReqwestFetcher::new(settings.fetch.clone());
    Ok(Harvester::new(fetcher, settings)?)
}

pub fn extract_file(input: &Path, output: Option<&Path>, container: &str) -> Result<()> {
    let html = read_text(input)?;
    let blocks = extract_blocks(&Html::parse_document(&html), container)?;
    tarot_info!("Extracted {} blocks from {}", blocks.len(), input.display());
    match output {
        Some(path) => {
            write_json(path, &blocks)?;
            println!("Wrote {} blocks to {}", blocks.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&blocks)?),
    }
    Ok(())
}

pub async fn crawl_content(settings: CrawlSettings, cards: &Path, output: &Path) -> Result<()> {
    let cards: Vec<CardSource> =
        read_json(cards).with_context(|| format!("loading card index {}", cards.display()))?;
    if cards.is_empty() {
        bail!("card index is empty");
    }
    let harvester = harvester(settings)?;
    let records = harvester.crawl_cards(&cards, &LogSink).await;
    write_json(output, &records)?;

    let tally = BatchTally::from_statuses(records.iter().map(|record| record.status));
    println!("Crawled {} cards into {}", tally.total, output.display());
    println!("  success: {}", tally.success);
    println!("  warning: {}", tally.warning);
    println!("  error:   {}", tally.error);
    Ok(())
}

pub async fn crawl_paragraphs(settings: CrawlSettings, url: &str, output_dir: &Path) -> Result<()> {
    let harvester = harvester(settings)?;
    let report = harvester.crawl_paragraphs(url).await;
    if let Some(error) = &report.error {
        bail!("cannot crawl {url}: {error}");
    }

    let title = page_slug(url);
    let json_path = output_dir.join(deterministic_filename(title.as_deref(), url, "json"));
    write_json(&json_path, &report)?;

    let text = render_paragraph_report(&report, &harvester.timestamp());
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let text_path = writer.write(&deterministic_filename(title.as_deref(), url, "txt"), &text)?;

    println!("{} paragraphs", report.total_paragraphs);
    println!("JSON: {}", json_path.display());
    println!("Text: {}", text_path.display());
    println!("{}", preview_lines(&text, PREVIEW_LINES));
    Ok(())
}

pub async fn list_videos(settings: CrawlSettings, url: &str, output: &Path, links: &Path) -> Result<()> {
    let harvester = harvester(settings)?;
    let page = harvester.fetch_page(url).await?;
    let base = Url::parse(url).ok();
    let videos = list_card_videos(&Html::parse_document(&page.html), base.as_ref());
    if videos.is_empty() {
        tarot_warn!("No card videos found on {}", url);
    }
    write_json(output, &videos)?;
    let (writer, filename) = AtomicFileWriter::for_path(links)?;
    writer.write(&filename, &render_video_list(&videos))?;
    println!("{} cards with videos -> {}", videos.len(), output.display());
    Ok(())
}

pub async fn crawl_card_data(settings: CrawlSettings, videos: &Path, output: &Path) -> Result<()> {
    let videos: Vec<CardVideo> =
        read_json(videos).with_context(|| format!("loading video list {}", videos.display()))?;
    let harvester = harvester(settings)?;
    let records = harvester.crawl_card_data_batch(&videos, &LogSink).await;
    write_json(output, &records)?;

    let tally = BatchTally::from_statuses(records.iter().map(|record| record.status));
    let marked: usize = records.iter().map(|record| record.total_marked_items).sum();
    println!(
        "{} cards ({} ok, {} failed), {} marked lines -> {}",
        tally.total,
        tally.success + tally.warning,
        tally.error,
        marked,
        output.display()
    );
    Ok(())
}

pub async fn list_sources(
    settings: CrawlSettings,
    url: &str,
    needle: &str,
    output: Option<&Path>,
) -> Result<()> {
    let harvester = harvester(settings)?;
    let page = harvester.fetch_page(url).await?;
    let sources = collect_sources(&Html::parse_document(&page.html), needle);
    let text = render_source_list(&sources, needle);
    match output {
        Some(path) => {
            let (writer, filename) = AtomicFileWriter::for_path(path)?;
            writer.write(&filename, &text)?;
            println!("{} sources -> {}", sources.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub fn scope_css(source: &Path, target: &Path, output: &Path) -> Result<()> {
    let (scoped, written) = write_scoped_css(source, target, output)?;
    println!(
        "Target uses {} classes and {} ids",
        scoped.class_count, scoped.id_count
    );
    if scoped.used_fallback {
        println!("No relevant rules; kept the full stylesheet");
    } else {
        println!("Kept {} of {} bytes", scoped.css.len(), scoped.source_len);
    }
    println!("Wrote {}", written.display());
    println!("{}", preview_lines(&scoped.css, PREVIEW_LINES));
    Ok(())
}

/// Last non-empty path segment of `url`, used to title per-page outputs.
fn page_slug(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.rev().find(|segment| !segment.is_empty())?;
    Some(segment.to_string())
}
