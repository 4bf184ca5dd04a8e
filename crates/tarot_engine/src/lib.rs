//! Tarot engine: fetching, decoding, batch crawling and output files.
mod css;
mod decode;
mod engine;
mod fetch;
mod filename;
mod persist;
mod preview;
mod records;
mod report;
mod types;

pub use css::{scope_stylesheet, write_scoped_css, CssPipelineError, ScopedCss};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use engine::{CrawlError, CrawlSettings, Harvester};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filename::deterministic_filename;
pub use persist::{ensure_output_dir, read_json, read_text, write_json, AtomicFileWriter, PersistError};
pub use preview::{preview_lines, PREVIEW_LINES};
pub use records::{
    BatchTally, CardContentRecord, CardDataRecord, CardSource, CrawlStatus, ParagraphReport,
};
pub use report::{render_paragraph_report, render_source_list, render_video_list};
pub use types::{
    CrawlEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobProgress, ProgressSink,
};
