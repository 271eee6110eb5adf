//! Stream downloading

pub mod batch;
pub mod downloader;

pub use batch::{download_batch, BatchItem};
pub use downloader::{DownloadResult, StreamDownload, StreamDownloader};
