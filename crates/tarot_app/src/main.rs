mod commands;
mod logging;
mod progress;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tarot_core::DEFAULT_CONTAINER;
use tarot_engine::{CrawlSettings, FetchSettings};

#[derive(Debug, Parser)]
#[command(name = "tarot-harvest", version, about = "Harvest tarot card pages into JSON")]
struct Cli {
    /// More log output; repeat for trace.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Also write the log to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    crawl: CrawlArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct CrawlArgs {
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,
    /// Pause between consecutive requests, in milliseconds.
    #[arg(long, default_value_t = 1000, global = true)]
    pause_ms: u64,
    /// Selector of the content area.
    #[arg(long, default_value = DEFAULT_CONTAINER, global = true)]
    container: String,
    #[arg(long, global = true)]
    user_agent: Option<String>,
}

impl CrawlArgs {
    fn settings(&self) -> CrawlSettings {
        let mut fetch = FetchSettings {
            request_timeout: Duration::from_secs(self.timeout),
            ..FetchSettings::default()
        };
        if let Some(agent) = &self.user_agent {
            fetch.user_agent = agent.clone();
        }
        CrawlSettings {
            fetch,
            container: self.container.clone(),
            pause: Duration::from_millis(self.pause_ms),
            clock: Arc::new(|| chrono::Utc::now().to_rfc3339()),
            ..CrawlSettings::default()
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract content blocks from a saved HTML file.
    Extract {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Crawl every card of a card index and extract its content blocks.
    Content {
        /// JSON list of `{id, card_name, card_url}`.
        #[arg(long, default_value = "tarot_cards.json")]
        cards: PathBuf,
        #[arg(short, long, default_value = "tarot_card_content.json")]
        output: PathBuf,
    },
    /// List every paragraph of one page.
    Paragraphs {
        url: String,
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Collect card names and video links from a card list page.
    Videos {
        url: String,
        #[arg(short, long, default_value = "tarot_videos.json")]
        output: PathBuf,
        /// Plain list of MP4 links.
        #[arg(long, default_value = "tarot_video_links.txt")]
        links: PathBuf,
    },
    /// Crawl structured data and marked lines for every card of a video list.
    Data {
        #[arg(long, default_value = "tarot_videos.json")]
        videos: PathBuf,
        #[arg(short, long, default_value = "tarot_card_data.json")]
        output: PathBuf,
    },
    /// List image and media sources of a page whose URL contains a substring.
    Sources {
        url: String,
        #[arg(long)]
        needle: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Keep only the internal CSS of one page that another page uses.
    Css {
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        target: PathBuf,
        #[arg(short, long, default_value = "filtered.css")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = tarot_logging::level_for_verbosity(cli.verbose, cli.quiet);
    logging::initialize(level, logging::LogDestination::from_option(cli.log_file.clone()));

    let settings = cli.crawl.settings();
    match cli.command {
        Command::Extract { input, output } => {
            commands::extract_file(&input, output.as_deref(), &settings.container)
        }
        Command::Content { cards, output } => commands::crawl_content(settings, &cards, &output).await,
        Command::Paragraphs { url, output_dir } => {
            commands::crawl_paragraphs(settings, &url, &output_dir).await
        }
        Command::Videos { url, output, links } => {
            commands::list_videos(settings, &url, &output, &links).await
        }
        Command::Data { videos, output } => commands::crawl_card_data(settings, &videos, &output).await,
        Command::Sources { url, needle, output } => {
            commands::list_sources(settings, &url, &needle, output.as_deref()).await
        }
        Command::Css {
            source,
            target,
            output,
        } => commands::scope_css(&source, &target, &output),
    }
}
