//! Sequential batch downloading

use crate::core::progress::{BatchProgress, BatchProgressCallback, Progress, ProgressCallback};
use crate::download::downloader::{DownloadResult, StreamDownloader};
use crate::error::YtdlError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// One item of a batch download
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Stream URL to download
    pub url: String,
    /// Destination file path
    pub file_path: PathBuf,
    /// Title shown in progress reports
    pub title: String,
}

/// Download a list of items strictly in order.
///
/// Before each item the callback sees the item's index and title; while it
/// downloads, its byte progress; after it finishes, the bumped completion
/// count. Item `i+1` never starts before item `i` terminates. On
/// cancellation the remaining items are marked cancelled without being
/// attempted.
pub async fn download_batch(
    downloader: &StreamDownloader,
    cancel: &CancellationToken,
    items: &[BatchItem],
    progress: Option<BatchProgressCallback>,
) -> Vec<DownloadResult> {
    let total_count = items.len();
    let mut results = Vec::with_capacity(total_count);

    for (index, item) in items.iter().enumerate() {
        if cancel.is_cancelled() {
            results.push(DownloadResult {
                file_path: item.file_path.clone(),
                error: Some(YtdlError::Cancelled),
            });
            continue;
        }

        if let Some(callback) = &progress {
            callback(BatchProgress {
                completed_count: index,
                total_count,
                current_index: index,
                current_title: item.title.clone(),
                current_progress: None,
            });
        }

        let item_progress: Option<ProgressCallback> = progress.as_ref().map(|callback| {
            let callback = Arc::clone(callback);
            let title = item.title.clone();
            let current: ProgressCallback = Arc::new(move |p: Progress| {
                callback(BatchProgress {
                    completed_count: index,
                    total_count,
                    current_index: index,
                    current_title: title.clone(),
                    current_progress: Some(p),
                });
            });
            current
        });

        let error = downloader
            .download_stream(cancel, &item.url, &item.file_path, item_progress.as_ref())
            .await
            .err();

        if error.is_none() {
            info!("batch item {}/{} done: {}", index + 1, total_count, item.title);
        }

        if let Some(callback) = &progress {
            callback(BatchProgress {
                completed_count: index + 1,
                total_count,
                current_index: index,
                current_title: item.title.clone(),
                current_progress: None,
            });
        }

        results.push(DownloadResult {
            file_path: item.file_path.clone(),
            error,
        });
    }

    results
}
