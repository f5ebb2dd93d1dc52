//! Command line entry point: download every image listed in a file and print
//! the categorized report on stdout.

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use imagedl::{DownloaderBuilder, LineFileSource, Report, RetryOptions, StyleOptions};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "imagedl", version, about = "Download a list of image URLs")]
struct Cli {
    /// Line-delimited list of image URLs.
    #[arg(long, default_value = "/fixtures/images.txt")]
    list: PathBuf,

    /// Directory where images are stored.
    #[arg(long, default_value = "/downloads")]
    output: PathBuf,

    /// Number of concurrent workers.
    #[arg(long, default_value_t = 10)]
    workers: usize,

    /// URLs per batch.
    #[arg(long, default_value_t = 25)]
    batch_size: usize,

    /// Batches that may wait for a free worker.
    #[arg(long, default_value_t = 10)]
    queue_capacity: usize,

    /// Retries after the first attempt; 0 disables retrying.
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Backoff scale, in milliseconds.
    #[arg(long, default_value_t = 50)]
    base_delay_ms: u64,

    /// Largest acceptable backoff delay, in milliseconds.
    #[arg(long, default_value_t = 3_000)]
    max_delay_ms: u64,

    /// Timeout of a single attempt, in seconds; 0 disables it.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Show progress bars on stderr.
    #[arg(long)]
    progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let style_options = match cli.progress {
        true => StyleOptions::default(),
        false => StyleOptions::hidden(),
    };
    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));

    let downloader = DownloaderBuilder::new()
        .directory(cli.output.clone())
        .workers(cli.workers)
        .queue_capacity(cli.queue_capacity)
        .retry(RetryOptions {
            base_delay: Duration::from_millis(cli.base_delay_ms),
            max_delay: Duration::from_millis(cli.max_delay_ms),
            max_attempts: cli.max_attempts,
        })
        .timeout(timeout)
        .style_options(style_options)
        .build()?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, failing pending downloads");
                cancel.cancel();
            }
        }
    });

    info!("Downloading images listed in {:?} into {:?}", cli.list, cli.output);
    let source = LineFileSource::new(&cli.list, cli.batch_size);
    let report = downloader.download_all(&source, cancel).await?;

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Table => println!("{}", render_table(&report)),
    }

    Ok(())
}

fn render_table(report: &Report) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["category", "count"]);
    for (category, count) in report.counts() {
        table.add_row(vec![Cell::new(category), Cell::new(count)]);
    }
    table.add_row(vec![Cell::new("total"), Cell::new(report.len())]);
    table
}
