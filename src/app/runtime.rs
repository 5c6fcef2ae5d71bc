use std::io;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use super::data_io::{DataFormat, emit_record};
use super::fetch::FetchConfig;
use super::scrape::{Scraper, ScraperConfig};
use super::types::{PROFILE_BASE_URL, ProfileTarget};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "allmylinks",
    version,
    about = "Scrape an AllMyLinks profile into text, JSON or CSV"
)]
struct Cli {
    /// Username, or a full http(s) profile URL
    #[arg(value_name = "USERNAME_OR_URL")]
    target: String,

    /// Route both requests through this proxy
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    #[arg(long, value_enum, default_value_t = FileFormatArg::Text)]
    format: FileFormatArg,

    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[arg(long, value_name = "URL", default_value = PROFILE_BASE_URL, hide = true)]
    base_url: String,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
enum FileFormatArg {
    Text,
    Json,
    Csv,
}

impl From<FileFormatArg> for DataFormat {
    fn from(value: FileFormatArg) -> Self {
        match value {
            FileFormatArg::Text => DataFormat::Text,
            FileFormatArg::Json => DataFormat::Json,
            FileFormatArg::Csv => DataFormat::Csv,
        }
    }
}

impl Cli {
    fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            base_url: self.base_url.clone(),
            fetch: FetchConfig {
                proxy_url: self.proxy.clone(),
                timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
            },
        }
    }
}

fn init_logging(verbose: u8) -> io::Result<()> {
    let log_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)
}

pub async fn run() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let target = ProfileTarget::classify(&cli.target);
    let scraper = Scraper::new(cli.scraper_config()).map_err(io::Error::other)?;
    let record = match scraper.scrape(&target).await {
        Ok(record) => record,
        Err(err) => {
            error!("error scraping user info: {err}");
            return Err(io::Error::other(err));
        }
    };
    info!(
        username = %record.username,
        links = record.links.len(),
        "scraped profile"
    );

    emit_record(cli.output.as_deref(), &record, cli.format.into())
}
