//! Core downloader: the worker pool that turns URL batches into a report.
//!
//! # Examples
//!
//! ```rust,no_run
//! use imagedl::batch::LineFileSource;
//! use imagedl::downloader::DownloaderBuilder;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), imagedl::Error> {
//! let downloader = DownloaderBuilder::new().workers(10).build()?;
//! let source = LineFileSource::new("images.txt", 25);
//!
//! let report = downloader.download_all(&source, CancellationToken::new()).await?;
//! println!("{} downloaded", report.downloaded_images.len());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::batch::{Batch, BatchQueue, BatchSource, MemorySource};
use crate::download::{DestinationNamer, Report, Status, Summary};
use crate::error::{Error, Result};
use crate::image::{DownloadImage, ImageClient};
use crate::progress::ProgressDisplay;

use futures::future::join_all;
use reqwest::Url;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Reason recorded for URLs that fail syntax validation.
pub const INVALID_URL_REASON: &str = "image url is invalid";

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), imagedl::Error> {
/// use imagedl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
pub struct Downloader<D = ImageClient> {
    config: DownloaderConfig,
    client: Arc<D>,
    namer: DestinationNamer,
}

impl<D> Clone for Downloader<D> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            client: Arc::clone(&self.client),
            namer: self.namer.clone(),
        }
    }
}

impl<D> fmt::Debug for Downloader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .field("namer", &self.namer)
            .finish()
    }
}

impl<D: DownloadImage> Downloader<D> {
    pub(crate) fn new(config: DownloaderConfig, client: Arc<D>, namer: DestinationNamer) -> Self {
        Self {
            config,
            client,
            namer,
        }
    }

    /// Replaces the destination namer, e.g. to control the unique tokens.
    pub fn with_namer(mut self, namer: DestinationNamer) -> Self {
        self.namer = namer;
        self
    }

    /// Gets the directory where images will be stored.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of workers.
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Gets the batch queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.config.queue_capacity
    }

    /// Gets the full configuration.
    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Downloads an in-memory URL list, `batch_size` URLs per batch.
    pub async fn download_urls<I, S>(&self, urls: I, batch_size: usize) -> Result<Report>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let source = MemorySource::new(urls, batch_size);
        self.download_all(&source, CancellationToken::new()).await
    }

    /// Runs the whole pipeline and returns the categorized report.
    ///
    /// Workers are started before the source begins submitting. The source
    /// waits whenever the queue is full. Once it is exhausted the queue is
    /// closed, workers drain what is left and exit, and the report is
    /// returned. A source failure aborts the run and no report is produced.
    ///
    /// Cancelling `cancel` turns every pending download into a failed
    /// outcome; the report stays complete.
    pub async fn download_all<S>(&self, source: &S, cancel: CancellationToken) -> Result<Report>
    where
        S: BatchSource + ?Sized,
    {
        let (queue, receiver) = BatchQueue::bounded(self.config.queue_capacity);
        let receiver = Arc::new(AsyncMutex::new(receiver));
        let report = Arc::new(Mutex::new(Report::default()));
        let progress = Arc::new(ProgressDisplay::new(self.config.style_options.clone()));
        // Lets an aborted run unwind in-flight downloads without touching the caller's token.
        let run_cancel = cancel.child_token();

        let mut workers = JoinSet::new();
        for id in 0..self.config.workers {
            let worker = Worker {
                id,
                downloader: self.clone(),
                cancel: run_cancel.clone(),
                progress: Arc::clone(&progress),
            };
            workers.spawn(worker.run(Arc::clone(&receiver), Arc::clone(&report)));
        }
        debug!("Started {} workers", workers.len());

        let loaded = source.load(&queue).await;
        // Closing the producer side lets workers finish once the queue drains.
        drop(queue);

        if let Err(e) = loaded {
            warn!("Aborting run: {}", e);
            run_cancel.cancel();
            workers.abort_all();
            progress.finish();
            return Err(e);
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                progress.finish();
                return Err(Error::Internal(format!("worker task failed: {}", e)));
            }
        }
        progress.finish();

        let report = Arc::try_unwrap(report)
            .map_err(|_| Error::Internal("report is still shared after all workers exited".into()))?
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        info!(
            downloaded = report.downloaded_images.len(),
            skipped = report.skipped_images.len(),
            not_found = report.not_found_images.len(),
            invalid = report.invalid_images.len(),
            failed = report.failed_images.len(),
            "All batches processed"
        );

        Ok(report)
    }
}

/// One member of the pool.
struct Worker<D> {
    id: usize,
    downloader: Downloader<D>,
    cancel: CancellationToken,
    progress: Arc<ProgressDisplay>,
}

impl<D: DownloadImage> Worker<D> {
    async fn run(
        self,
        receiver: Arc<AsyncMutex<mpsc::Receiver<Batch>>>,
        report: Arc<Mutex<Report>>,
    ) {
        loop {
            // Only one idle worker waits on the channel at a time; the others
            // queue on the lock.
            let batch = receiver.lock().await.recv().await;
            let Some(batch) = batch else {
                break;
            };

            debug!("worker {} - downloading {} images", self.id, batch.len());
            let partial = self.download_batch(batch).await;

            report
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .merge(partial);
        }
        debug!("worker {} - queue closed, exiting", self.id);
    }

    /// Fans the batch out to one task per URL and collects their outcomes.
    async fn download_batch(&self, batch: Batch) -> Report {
        self.progress.add_pending(batch.len());
        let pb = self.progress.create_batch_progress(self.id, batch.len());

        let mut partial = Report::default();
        let mut urls = Vec::with_capacity(batch.len());
        let mut tasks = Vec::with_capacity(batch.len());

        for url in batch {
            if Url::parse(&url).is_err() {
                let summary = Summary::new(url, Status::Invalid(INVALID_URL_REASON.into()));
                self.complete(&mut partial, summary);
                pb.inc(1);
                continue;
            }

            let client = Arc::clone(&self.downloader.client);
            let cancel = self.cancel.clone();
            let destination = self.downloader.namer.name_for(&url);
            let task_url = url.clone();

            urls.push(url);
            tasks.push(tokio::spawn(async move {
                client.download_image(&cancel, &task_url, destination).await
            }));
        }

        for (url, joined) in urls.into_iter().zip(join_all(tasks).await) {
            let summary = match joined {
                Ok(Ok(path)) => Summary::downloaded(url, path),
                Ok(Err(e)) => Summary::new(url, e.into_status()),
                Err(e) => Summary::new(url, Status::Failed(format!("download task failed: {}", e))),
            };
            self.complete(&mut partial, summary);
            pb.inc(1);
        }

        self.progress.finish_batch(pb);
        partial
    }

    fn complete(&self, partial: &mut Report, summary: Summary) {
        match summary.status() {
            Status::Downloaded => info!("image downloaded: {}", summary.url()),
            status => warn!("could not download image {}: {:?}", summary.url(), status),
        }

        if let Some(ref callback) = self.downloader.config.on_complete {
            // Callback panics are logged; the outcome is still recorded.
            if panic::catch_unwind(AssertUnwindSafe(|| callback(&summary))).is_err() {
                warn!("on_complete callback panicked for {}", summary.url());
            }
        }

        self.progress.increment_main();
        partial.record(summary);
    }
}
