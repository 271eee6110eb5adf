//! Download option materialization and selection

use crate::core::streams::{
    quality_label, AudioStreamInfo, Container, StreamManifest, VideoStreamInfo,
};

/// An ordered quality preference, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityPreference {
    Lowest,
    UpTo360p,
    UpTo480p,
    UpTo720p,
    UpTo1080p,
    Highest,
}

impl QualityPreference {
    /// Parse a user-facing quality token (case-insensitive).
    ///
    /// Unknown tokens fall back to `Highest`.
    pub fn parse(token: &str) -> QualityPreference {
        match token.to_lowercase().as_str() {
            "best" | "highest" => QualityPreference::Highest,
            "1080p" | "1080" => QualityPreference::UpTo1080p,
            "720p" | "720" => QualityPreference::UpTo720p,
            "480p" | "480" => QualityPreference::UpTo480p,
            "360p" | "360" => QualityPreference::UpTo360p,
            "worst" | "lowest" | "audio" => QualityPreference::Lowest,
            _ => QualityPreference::Highest,
        }
    }

    /// The maximum height this preference allows; 0 means unbounded in
    /// either direction.
    pub fn max_height(&self) -> u32 {
        match self {
            QualityPreference::Lowest | QualityPreference::Highest => 0,
            QualityPreference::UpTo360p => 360,
            QualityPreference::UpTo480p => 480,
            QualityPreference::UpTo720p => 720,
            QualityPreference::UpTo1080p => 1080,
        }
    }
}

/// A downloadable unit: either an audio-only stream or a video stream with
/// an optional paired audio stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOption {
    pub container: Container,
    pub is_audio_only: bool,
    pub video_stream: Option<VideoStreamInfo>,
    pub audio_stream: Option<AudioStreamInfo>,
}

impl DownloadOption {
    /// Human-readable quality label for display.
    pub fn quality_label(&self) -> String {
        match &self.video_stream {
            Some(video) => quality_label(video.height),
            None => match &self.audio_stream {
                Some(audio) => format!("{}kbps", audio.info.bitrate / 1000),
                None => "unknown".to_string(),
            },
        }
    }

    fn height(&self) -> u32 {
        self.video_stream.as_ref().map(|v| v.height).unwrap_or(0)
    }
}

/// The highest-bitrate audio stream with the given container, if any.
fn best_audio_with_container(
    manifest: &StreamManifest,
    container: Container,
) -> Option<&AudioStreamInfo> {
    let mut best: Option<&AudioStreamInfo> = None;
    for stream in &manifest.audio_streams {
        if stream.info.container != container {
            continue;
        }
        match best {
            Some(b) if stream.info.bitrate <= b.info.bitrate => {}
            _ => best = Some(stream),
        }
    }
    best
}

/// Materialize every download option the manifest allows.
///
/// Each video stream is paired with the best matching-container audio
/// stream (mp4 with mp4, webm with webm), falling back to the best audio of
/// any container, or to a video-only option when no audio exists. Each
/// muxed stream and each audio stream yields one option of its own.
pub fn get_download_options(manifest: &StreamManifest) -> Vec<DownloadOption> {
    let mut options = Vec::new();

    for video in &manifest.video_streams {
        let audio = best_audio_with_container(manifest, video.info.container)
            .or_else(|| manifest.best_audio_stream());

        options.push(DownloadOption {
            container: video.info.container,
            is_audio_only: false,
            video_stream: Some(video.clone()),
            audio_stream: audio.cloned(),
        });
    }

    for muxed in &manifest.muxed_streams {
        options.push(DownloadOption {
            container: muxed.video.info.container,
            is_audio_only: false,
            video_stream: Some(muxed.video.clone()),
            audio_stream: Some(muxed.audio.clone()),
        });
    }

    for audio in &manifest.audio_streams {
        options.push(DownloadOption {
            container: audio.info.container,
            is_audio_only: true,
            video_stream: None,
            audio_stream: Some(audio.clone()),
        });
    }

    options
}

/// Select the best option for a quality preference and preferred container.
///
/// Bounded preferences that match nothing fall back to the lowest available
/// height rather than failing.
pub fn select_best_option(
    options: &[DownloadOption],
    preference: QualityPreference,
    preferred_container: Container,
) -> Option<DownloadOption> {
    let candidates: Vec<&DownloadOption> = options
        .iter()
        .filter(|o| !o.is_audio_only && o.video_stream.is_some())
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let filtered: Vec<&DownloadOption> = match preference {
        QualityPreference::Highest => {
            let max = candidates.iter().map(|o| o.height()).max().unwrap_or(0);
            candidates.iter().filter(|o| o.height() == max).copied().collect()
        }
        QualityPreference::Lowest => {
            let min = candidates.iter().map(|o| o.height()).min().unwrap_or(0);
            candidates.iter().filter(|o| o.height() == min).copied().collect()
        }
        bounded => {
            let limit = bounded.max_height();
            let within: Vec<&DownloadOption> = candidates
                .iter()
                .filter(|o| o.height() <= limit)
                .copied()
                .collect();
            if within.is_empty() {
                // Nothing fits under the cap; fall back to the lowest set.
                let min = candidates.iter().map(|o| o.height()).min().unwrap_or(0);
                candidates.iter().filter(|o| o.height() == min).copied().collect()
            } else {
                let max = within.iter().map(|o| o.height()).max().unwrap_or(0);
                within.iter().filter(|o| o.height() == max).copied().collect()
            }
        }
    };

    filtered
        .iter()
        .find(|o| o.container == preferred_container)
        .or_else(|| filtered.first())
        .map(|o| (*o).clone())
}
