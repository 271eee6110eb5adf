//! Single and parallel stream downloading

use crate::core::progress::{Progress, ProgressCallback};
use crate::error::YtdlError;
use futures_util::future::join_all;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A single stream to download
#[derive(Debug, Clone)]
pub struct StreamDownload {
    /// Stream URL to download from
    pub url: String,
    /// Destination file path
    pub file_path: PathBuf,
}

/// The outcome of one download
#[derive(Debug)]
pub struct DownloadResult {
    /// Destination file path
    pub file_path: PathBuf,
    /// The error, when the download failed
    pub error: Option<YtdlError>,
}

impl DownloadResult {
    /// Whether the download succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Downloads streams to files
#[derive(Debug, Clone)]
pub struct StreamDownloader {
    client: Client,
}

impl StreamDownloader {
    /// Create a downloader using the given HTTP client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Download a stream to a file, reporting progress through the optional
    /// callback.
    ///
    /// Parent directories are created as needed; an existing file is
    /// truncated. On cancellation the partial file is left on disk.
    pub async fn download_stream(
        &self,
        cancel: &CancellationToken,
        url: &str,
        file_path: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<(), YtdlError> {
        debug!("downloading {} -> {}", url, file_path.display());

        let request = self.client.get(url);
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(YtdlError::Cancelled),
            response = request.send() => response?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(YtdlError::HttpError(status.as_u16()));
        }

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() && parent != Path::new(".") {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = File::create(file_path).await?;

        let total = response.content_length().unwrap_or(0);
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        loop {
            let chunk = tokio::select! {
                _ = cancel.cancelled() => return Err(YtdlError::Cancelled),
                chunk = stream.next() => chunk,
            };

            let Some(chunk) = chunk else { break };
            let chunk = chunk?;

            tokio::select! {
                _ = cancel.cancelled() => return Err(YtdlError::Cancelled),
                written = file.write_all(&chunk) => written?,
            }

            downloaded += chunk.len() as u64;
            if let Some(callback) = progress {
                callback(Progress { downloaded, total });
            }
        }

        file.flush().await?;
        info!("downloaded {} bytes to {}", downloaded, file_path.display());
        Ok(())
    }

    /// Download multiple streams concurrently.
    ///
    /// Results come back in input order. When a progress callback is given
    /// it receives the aggregate across all streams. A cancelled token
    /// fails every stream but still yields one result per input.
    pub async fn download_streams_parallel(
        &self,
        cancel: &CancellationToken,
        streams: &[StreamDownload],
        progress: Option<ProgressCallback>,
    ) -> Vec<DownloadResult> {
        if streams.is_empty() {
            return Vec::new();
        }

        let tracker = progress.map(|callback| AggregateProgressTracker::new(streams.len(), callback));

        let tasks = streams.iter().enumerate().map(|(idx, stream)| {
            let tracker = tracker.as_ref();
            async move {
                let slot_progress: Option<ProgressCallback> =
                    tracker.map(|t| t.callback_for(idx));

                let error = self
                    .download_stream(
                        cancel,
                        &stream.url,
                        &stream.file_path,
                        slot_progress.as_ref(),
                    )
                    .await
                    .err();

                DownloadResult {
                    file_path: stream.file_path.clone(),
                    error,
                }
            }
        });

        join_all(tasks).await
    }
}

/// Aggregates per-stream progress into one callback.
///
/// Each producer writes its slot and recomputes the sum inside the same
/// critical section so no update is lost; the callback runs outside the
/// lock.
struct AggregateProgressTracker {
    slots: Mutex<Vec<Progress>>,
    callback: ProgressCallback,
}

impl AggregateProgressTracker {
    fn new(count: usize, callback: ProgressCallback) -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self {
            slots: Mutex::new(vec![Progress::default(); count]),
            callback,
        })
    }

    /// A per-slot callback feeding this tracker.
    fn callback_for(self: &std::sync::Arc<Self>, index: usize) -> ProgressCallback {
        let tracker = std::sync::Arc::clone(self);
        std::sync::Arc::new(move |p| tracker.update(index, p))
    }

    fn update(&self, index: usize, progress: Progress) {
        let aggregate = {
            let mut slots = self.slots.lock().expect("progress slots lock poisoned");
            slots[index] = progress;
            slots.iter().fold(Progress::default(), |acc, p| Progress {
                downloaded: acc.downloaded + p.downloaded,
                total: acc.total + p.total,
            })
        };
        (self.callback)(aggregate);
    }
}
