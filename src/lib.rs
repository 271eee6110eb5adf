//! # ytdl - YouTube downloader
//!
//! Resolves a YouTube reference (video, playlist or channel) to a local
//! media file: fetches metadata, enumerates the available streams, selects
//! one by quality preference, downloads the bytes and, when separate video
//! and audio streams are chosen, hands off to FFmpeg to produce a single
//! container file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use ytdl::core::{DownloadOptions, Orchestrator};
//! use ytdl::download::StreamDownloader;
//! use ytdl::platform::WatchPageFetcher;
//!
//! #[tokio::main]
//! async fn main() -> ytdl::Result<()> {
//!     let client = ytdl::platform::client::shared_client().clone();
//!     let orchestrator = Orchestrator::new(
//!         WatchPageFetcher::new(client.clone()),
//!         StreamDownloader::new(client),
//!     );
//!
//!     let cancel = CancellationToken::new();
//!     let path = orchestrator
//!         .download(&cancel, "dQw4w9WgXcQ", &DownloadOptions::default())
//!         .await?;
//!     println!("saved to {}", path.display());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod mux;
pub mod platform;
pub mod tagging;
pub mod utils;

#[cfg(test)]
pub(crate) mod testutil;

pub use crate::core::{DownloadOptions, Orchestrator};
pub use crate::error::YtdlError;

/// Result type alias for ytdl operations
pub type Result<T> = std::result::Result<T, YtdlError>;
