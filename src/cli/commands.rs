//! Command implementations

use crate::cli::args::{DownloadArgs, InfoArgs};
use crate::cli::output::ProgressRenderer;
use crate::core::orchestrator::{DownloadOptions, Orchestrator};
use crate::core::progress::ProgressCallback;
use crate::core::streams::{quality_label, StreamManifest};
use crate::download::downloader::StreamDownloader;
use crate::error::YtdlError;
use crate::platform::client;
use crate::platform::cookies::load_cookies_from_file;
use crate::platform::ids::parse_video_id;
use crate::platform::manifest::get_stream_manifest;
use crate::platform::watch_page::WatchPageFetcher;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Build the HTTP client for a run, seeding a cookie jar when a cookie
/// file was given and applying a non-default timeout when one was asked
/// for.
fn build_client(
    cookie_file: Option<&Path>,
    timeout: std::time::Duration,
) -> Result<Client, YtdlError> {
    let cookies = match cookie_file {
        Some(path) => {
            let cookies = load_cookies_from_file(path)?;
            info!("loaded {} cookies from {}", cookies.len(), path.display());
            cookies
        }
        None => Vec::new(),
    };

    if cookies.is_empty() && timeout == client::DEFAULT_TIMEOUT {
        return Ok(client::shared_client().clone());
    }
    client::build_client(&cookies, timeout)
}

/// Run the `download` command.
pub async fn run_download(cancel: &CancellationToken, args: &DownloadArgs) -> Result<(), YtdlError> {
    let http_client = build_client(args.cookies.as_deref(), args.timeout_duration())?;

    let fetcher = WatchPageFetcher::new(http_client.clone());
    let downloader = StreamDownloader::new(http_client);
    let mut orchestrator = Orchestrator::new(fetcher, downloader);

    let mut renderer = None;
    if !args.no_progress {
        let bar = Arc::new(ProgressRenderer::new("Downloading"));
        let bar_clone = Arc::clone(&bar);
        let callback: ProgressCallback = Arc::new(move |p| bar_clone.update(p));
        orchestrator = orchestrator.with_progress(callback);
        renderer = Some(bar);
    }

    let options = DownloadOptions {
        output: args.output.clone(),
        quality: args.quality.clone(),
        format: args.format.as_str().to_string(),
    };

    let path = orchestrator.download(cancel, &args.url, &options).await?;

    if let Some(bar) = renderer {
        bar.finish();
    }
    println!("Download complete: {}", path.display());

    Ok(())
}

/// Run the `info` command.
pub async fn run_info(cancel: &CancellationToken, args: &InfoArgs) -> Result<(), YtdlError> {
    let http_client = build_client(args.cookies.as_deref(), client::DEFAULT_TIMEOUT)?;

    let video_id = parse_video_id(&args.url)?;
    println!("Fetching info for video: {}\n", video_id);

    let fetcher = WatchPageFetcher::new(http_client.clone());
    let orchestrator = Orchestrator::new(fetcher, StreamDownloader::new(http_client));

    let (video, streaming_data) = orchestrator.fetch_video(cancel, &video_id).await?;

    println!("Title:    {}", video.title);
    println!("Author:   {}", video.author.name);
    println!("Duration: {}", video.duration_string());
    println!("Views:    {}", video.view_count);
    if video.is_live {
        println!("Status:   Live Stream");
    }

    if let Some(streaming_data) = streaming_data {
        let manifest = get_stream_manifest(&streaming_data);
        print_stream_info(&manifest);
    }

    Ok(())
}

/// Run the `version` command.
pub fn run_version() {
    println!("ytdl Version: {}", env!("CARGO_PKG_VERSION"));
}

fn print_stream_info(manifest: &StreamManifest) {
    println!("\nAvailable Formats:");

    if !manifest.video_streams.is_empty() {
        println!("\n  Video:");
        for stream in &manifest.video_streams {
            let quality = if stream.info.quality.is_empty() {
                quality_label(stream.height)
            } else {
                stream.info.quality.clone()
            };
            let gated = if stream.info.url.is_empty() {
                " [cipher-protected]"
            } else {
                ""
            };
            println!(
                "    - {} ({}, {}){}",
                quality, stream.info.container, stream.video_codec, gated
            );
        }
    }

    if !manifest.audio_streams.is_empty() {
        println!("\n  Audio:");
        for stream in &manifest.audio_streams {
            let gated = if stream.info.url.is_empty() {
                " [cipher-protected]"
            } else {
                ""
            };
            println!(
                "    - {} ({}, {}kbps){}",
                stream.info.container,
                stream.audio_codec,
                stream.info.bitrate / 1000,
                gated
            );
        }
    }

    if !manifest.muxed_streams.is_empty() {
        println!("\n  Muxed (Video+Audio):");
        for stream in &manifest.muxed_streams {
            let quality = if stream.video.info.quality.is_empty() {
                quality_label(stream.video.height)
            } else {
                stream.video.info.quality.clone()
            };
            println!("    - {} ({})", quality, stream.video.info.container);
        }
    }
}
