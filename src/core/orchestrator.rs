//! End-to-end download orchestration
//!
//! Consumes an input string, resolves it to an identifier and, for videos,
//! drives the full pipeline: watch page → player response → manifest →
//! option selection → download → optional mux.

use crate::core::options::{get_download_options, select_best_option, QualityPreference};
use crate::core::progress::ProgressCallback;
use crate::core::streams::Container;
use crate::core::video::Video;
use crate::download::downloader::{StreamDownload, StreamDownloader};
use crate::error::YtdlError;
use crate::mux;
use crate::platform::ids::{resolve_query, ChannelKind, Identifier};
use crate::platform::manifest::get_stream_manifest;
use crate::platform::watch_page::WatchPageFetcher;
use crate::utils::filename::{apply_template, DEFAULT_TEMPLATE};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Options governing one download run
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Output directory for the final file
    pub output: PathBuf,
    /// Quality token (best, 1080p, 720p, 480p, 360p, worst, audio)
    pub quality: String,
    /// Output format (mp4, webm, mp3)
    pub format: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            quality: "best".to_string(),
            format: "mp4".to_string(),
        }
    }
}

/// Drives the download pipeline end to end.
pub struct Orchestrator {
    fetcher: WatchPageFetcher,
    downloader: StreamDownloader,
    progress: Option<ProgressCallback>,
}

impl Orchestrator {
    /// Create an orchestrator around a fetcher and downloader.
    pub fn new(fetcher: WatchPageFetcher, downloader: StreamDownloader) -> Self {
        Self {
            fetcher,
            downloader,
            progress: None,
        }
    }

    /// Attach a progress sink. The orchestrator never blocks on it.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Resolve the input and download it, returning the final file path.
    pub async fn download(
        &self,
        cancel: &CancellationToken,
        input: &str,
        options: &DownloadOptions,
    ) -> Result<PathBuf, YtdlError> {
        match resolve_query(input)? {
            Identifier::Search { .. } => Err(YtdlError::SearchUnsupported),
            Identifier::Channel(channel) => {
                if channel.kind != ChannelKind::Id {
                    return Err(YtdlError::ChannelResolutionUnsupported);
                }
                let uploads = channel
                    .uploads_playlist_id()
                    .ok_or(YtdlError::ChannelResolutionUnsupported)?;
                info!("channel {} -> uploads playlist {}", channel.value, uploads);
                self.download_playlist(cancel, &uploads, options).await
            }
            Identifier::Playlist { id } => self.download_playlist(cancel, &id, options).await,
            Identifier::Video { id, .. } => self.download_video(cancel, &id, options).await,
        }
    }

    /// Fetch and convert a video's metadata without downloading anything.
    pub async fn fetch_video(
        &self,
        cancel: &CancellationToken,
        video_id: &str,
    ) -> Result<(Video, Option<crate::platform::player::StreamingData>), YtdlError> {
        let watch_page = self.fetcher.fetch(cancel, video_id).await?;
        let player_response = watch_page.extract_player_response()?;

        if !player_response.playability_status.is_ok() {
            let mut reason = player_response.playability_status.reason.clone();
            if reason.is_empty() {
                reason = "unknown reason".to_string();
            }
            return Err(YtdlError::VideoUnavailable(reason));
        }

        let video = player_response.to_video()?;
        Ok((video, player_response.streaming_data))
    }

    async fn download_playlist(
        &self,
        _cancel: &CancellationToken,
        playlist_id: &str,
        _options: &DownloadOptions,
    ) -> Result<PathBuf, YtdlError> {
        // Enumerating a playlist needs the playlist landing page plus the
        // continuation-token protocol, which the watch page does not carry.
        debug!("playlist download requested for {}", playlist_id);
        Err(YtdlError::PlaylistFetchUnimplemented)
    }

    async fn download_video(
        &self,
        cancel: &CancellationToken,
        video_id: &str,
        options: &DownloadOptions,
    ) -> Result<PathBuf, YtdlError> {
        info!("fetching video info: {}", video_id);

        let (video, streaming_data) = self.fetch_video(cancel, video_id).await?;
        let streaming_data = streaming_data.ok_or(YtdlError::NoStreamingData)?;
        let manifest = get_stream_manifest(&streaming_data);

        debug!(
            "manifest: {} video, {} audio, {} muxed",
            manifest.video_streams.len(),
            manifest.audio_streams.len(),
            manifest.muxed_streams.len()
        );

        let audio_only = options.format.eq_ignore_ascii_case("mp3")
            || options.quality.eq_ignore_ascii_case("audio");

        let container = Container::parse(&options.format);
        let extension = if audio_only {
            "mp3"
        } else {
            container.extension()
        };
        let output_filename = apply_template(DEFAULT_TEMPLATE, &video, extension, "");
        let output_path = options.output.join(output_filename);

        if audio_only {
            return self.download_audio_only(cancel, &manifest, &output_path).await;
        }

        let preference = QualityPreference::parse(&options.quality);
        let download_options = get_download_options(&manifest);
        let selected = select_best_option(&download_options, preference, container);

        let Some(selected) = selected else {
            // No adaptive option fits; fall back to the first muxed stream.
            return self
                .download_first_muxed(cancel, &manifest, &output_path)
                .await;
        };

        info!("selected quality: {}", selected.quality_label());

        if let (Some(video_stream), Some(audio_stream)) =
            (&selected.video_stream, &selected.audio_stream)
        {
            let video_url = &video_stream.info.url;
            let audio_url = &audio_stream.info.url;
            if !video_url.is_empty() && !audio_url.is_empty() && video_url != audio_url {
                return self
                    .download_and_mux(
                        cancel,
                        video_url,
                        video_stream.info.container,
                        audio_url,
                        audio_stream.info.container,
                        &output_path,
                    )
                    .await;
            }
        }

        if let Some(video_stream) = &selected.video_stream {
            if !video_stream.info.url.is_empty() {
                self.download_single(cancel, &video_stream.info.url, &output_path)
                    .await?;
                return Ok(output_path);
            }
        }

        self.download_first_muxed(cancel, &manifest, &output_path)
            .await
    }

    async fn download_audio_only(
        &self,
        cancel: &CancellationToken,
        manifest: &crate::core::streams::StreamManifest,
        output_path: &Path,
    ) -> Result<PathBuf, YtdlError> {
        let best_audio = manifest
            .best_audio_stream()
            .ok_or(YtdlError::NoDownloadableStream)?;
        if best_audio.info.url.is_empty() {
            return Err(YtdlError::NoDownloadableStream);
        }

        info!("downloading audio: {}", best_audio.audio_codec);
        self.download_single(cancel, &best_audio.info.url, output_path)
            .await?;
        Ok(output_path.to_path_buf())
    }

    async fn download_first_muxed(
        &self,
        cancel: &CancellationToken,
        manifest: &crate::core::streams::StreamManifest,
        output_path: &Path,
    ) -> Result<PathBuf, YtdlError> {
        let muxed = manifest
            .muxed_streams
            .first()
            .ok_or(YtdlError::NoDownloadableStream)?;
        if muxed.video.info.url.is_empty() {
            return Err(YtdlError::NoDownloadableStream);
        }

        self.download_single(cancel, &muxed.video.info.url, output_path)
            .await?;
        Ok(output_path.to_path_buf())
    }

    async fn download_single(
        &self,
        cancel: &CancellationToken,
        url: &str,
        output_path: &Path,
    ) -> Result<(), YtdlError> {
        info!("downloading to: {}", output_path.display());
        self.downloader
            .download_stream(cancel, url, output_path, self.progress.as_ref())
            .await
    }

    /// Download separate video and audio streams concurrently into a temp
    /// directory, then hand off to the multiplexer.
    async fn download_and_mux(
        &self,
        cancel: &CancellationToken,
        video_url: &str,
        video_container: Container,
        audio_url: &str,
        audio_container: Container,
        output_path: &Path,
    ) -> Result<PathBuf, YtdlError> {
        let temp_dir = tempfile::Builder::new().prefix("ytdl-").tempdir()?;
        let video_path = temp_dir.path().join(format!("video.{}", video_container));
        let audio_path = temp_dir.path().join(format!("audio.{}", audio_container));

        info!("downloading video and audio streams");
        let streams = vec![
            StreamDownload {
                url: video_url.to_string(),
                file_path: video_path.clone(),
            },
            StreamDownload {
                url: audio_url.to_string(),
                file_path: audio_path.clone(),
            },
        ];

        let results = self
            .downloader
            .download_streams_parallel(cancel, &streams, self.progress.clone())
            .await;

        for result in results {
            if let Some(error) = result.error {
                return Err(error);
            }
        }

        info!("muxing streams");
        mux::mux_streams(cancel, &video_path, &audio_path, output_path).await?;

        info!("download complete: {}", output_path.display());
        Ok(output_path.to_path_buf())
    }
}
