use tarot_engine::{CrawlEvent, CrawlStatus, ProgressSink};
use tarot_logging::{tarot_info, tarot_warn};

/// Reports batch progress through the log.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: CrawlEvent) {
        match event {
            CrawlEvent::Started(job) => {
                tarot_info!("[{}/{}] {}", job.position, job.total, job.label);
            }
            CrawlEvent::JobCompleted {
                position,
                total,
                label,
                status,
                items,
                error,
            } => match status {
                CrawlStatus::Success => {
                    tarot_info!("[{position}/{total}] {label}: {items} items");
                }
                CrawlStatus::Warning => tarot_warn!("[{position}/{total}] {label}: nothing extracted"),
                CrawlStatus::Error => tarot_warn!(
                    "[{position}/{total}] {label}: {}",
                    error.as_deref().unwrap_or("failed")
                ),
            },
        }
    }
}
