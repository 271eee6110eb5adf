//! Stream manifest construction
//!
//! Maps the raw format descriptors of `streamingData` into the typed
//! manifest. Classification:
//!
//! - `video/*` descriptors from `adaptiveFormats`, or with at most one
//!   codec, are video-only;
//! - `video/*` descriptors from `formats` whose codecs parameter names a
//!   video codec and an audio codec are muxed;
//! - `audio/*` descriptors are audio-only.
//!
//! Cipher-gated descriptors (no direct URL) are kept with an empty URL so
//! `info` can list them; the downloader never selects them.

use crate::core::streams::{
    quality_label, AudioStreamInfo, Container, MuxedStreamInfo, StreamInfo, StreamManifest,
    VideoStreamInfo,
};
use crate::platform::player::{RawFormat, StreamingData};
use crate::utils::mime::{is_audio_codec, MimeType};
use tracing::debug;

/// Which list a raw format came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatSource {
    Muxed,
    Adaptive,
}

/// Build the stream manifest from decoded streaming data.
pub fn get_stream_manifest(streaming_data: &StreamingData) -> StreamManifest {
    let mut manifest = StreamManifest::default();

    let all = streaming_data
        .formats
        .iter()
        .map(|f| (f, FormatSource::Muxed))
        .chain(
            streaming_data
                .adaptive_formats
                .iter()
                .map(|f| (f, FormatSource::Adaptive)),
        );

    for (format, source) in all {
        let Some(mime) = MimeType::parse(&format.mime_type) else {
            debug!("skipping format {} with unparseable mime type", format.itag);
            continue;
        };

        if mime.is_video() {
            let has_audio_codec = mime.codecs.len() == 2 && is_audio_codec(&mime.codecs[1]);
            if source == FormatSource::Muxed && has_audio_codec {
                manifest.muxed_streams.push(build_muxed_stream(format, &mime));
            } else {
                manifest.video_streams.push(build_video_stream(format, &mime));
            }
        } else if mime.is_audio() {
            manifest.audio_streams.push(build_audio_stream(format, &mime));
        } else {
            debug!(
                "skipping format {} with media type {}",
                format.itag, mime.media_type
            );
        }
    }

    manifest
}

fn container_for(mime: &MimeType) -> Container {
    match mime.subtype.as_str() {
        "mp4" => Container::Mp4,
        "webm" => Container::Webm,
        "3gpp" => Container::Threegp,
        _ => infer_container_from_codecs(&mime.codecs),
    }
}

fn infer_container_from_codecs(codecs: &[String]) -> Container {
    match codecs.first().map(String::as_str) {
        Some(c) if c.starts_with("opus") || c.starts_with("vp") => Container::Webm,
        Some(c) if c.starts_with("vorbis") => Container::Ogg,
        Some(c) if c.starts_with("mp3") => Container::Mp3,
        _ => Container::Mp4,
    }
}

fn parse_content_length(format: &RawFormat) -> u64 {
    format
        .content_length
        .as_deref()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn stream_url(format: &RawFormat) -> String {
    format.url.clone().unwrap_or_default()
}

fn common_info(format: &RawFormat, mime: &MimeType, quality: String, codec: String) -> StreamInfo {
    let content_length = parse_content_length(format);
    StreamInfo {
        url: stream_url(format),
        quality,
        bitrate: format.bitrate,
        codec,
        container: container_for(mime),
        size: content_length,
        mime_type: format.mime_type.clone(),
        content_length,
    }
}

fn build_video_stream(format: &RawFormat, mime: &MimeType) -> VideoStreamInfo {
    let video_codec = mime.codecs.first().cloned().unwrap_or_default();
    let height = format.height.unwrap_or(0);
    let quality = format
        .quality_label
        .clone()
        .unwrap_or_else(|| quality_label(height));

    VideoStreamInfo {
        info: common_info(format, mime, quality, video_codec.clone()),
        width: format.width.unwrap_or(0),
        height,
        framerate: format.fps.unwrap_or(0),
        video_codec,
    }
}

fn build_audio_stream(format: &RawFormat, mime: &MimeType) -> AudioStreamInfo {
    let audio_codec = mime.codecs.first().cloned().unwrap_or_default();
    let quality = format!("{}kbps", format.bitrate / 1000);

    let (audio_language, is_default) = match &format.audio_track {
        Some(track) => (track.display_name.clone(), track.audio_is_default),
        None => (String::new(), true),
    };

    AudioStreamInfo {
        info: common_info(format, mime, quality, audio_codec.clone()),
        audio_codec,
        sample_rate: format
            .audio_sample_rate
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
        channel_count: format.audio_channels.unwrap_or(0),
        audio_language,
        is_default,
    }
}

fn build_muxed_stream(format: &RawFormat, mime: &MimeType) -> MuxedStreamInfo {
    let video = build_video_stream(format, mime);
    let audio_codec = mime.codecs.get(1).cloned().unwrap_or_default();

    let audio = AudioStreamInfo {
        info: common_info(
            format,
            mime,
            format!("{}kbps", format.bitrate / 1000),
            audio_codec.clone(),
        ),
        audio_codec,
        sample_rate: format
            .audio_sample_rate
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
        channel_count: format.audio_channels.unwrap_or(0),
        audio_language: String::new(),
        is_default: true,
    };

    MuxedStreamInfo { video, audio }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_format(mime_type: &str, url: Option<&str>) -> RawFormat {
        RawFormat {
            mime_type: mime_type.to_string(),
            url: url.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_adaptive_video_classified_video_only() {
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![RawFormat {
                height: Some(1080),
                width: Some(1920),
                fps: Some(30),
                bitrate: 4_000_000,
                ..raw_format(r#"video/mp4; codecs="avc1.640028""#, Some("https://v"))
            }],
        };

        let manifest = get_stream_manifest(&data);
        assert_eq!(manifest.video_streams.len(), 1);
        assert!(manifest.audio_streams.is_empty());
        assert!(manifest.muxed_streams.is_empty());

        let stream = &manifest.video_streams[0];
        assert_eq!(stream.height, 1080);
        assert_eq!(stream.width, 1920);
        assert_eq!(stream.framerate, 30);
        assert_eq!(stream.video_codec, "avc1.640028");
        assert_eq!(stream.info.container, Container::Mp4);
    }

    #[test]
    fn test_muxed_format_classified_muxed() {
        // The format-18 family: video/mp4 with both codecs, from `formats`.
        let data = StreamingData {
            formats: vec![RawFormat {
                height: Some(360),
                ..raw_format(
                    r#"video/mp4; codecs="avc1.42001E, mp4a.40.2""#,
                    Some("https://muxed"),
                )
            }],
            adaptive_formats: vec![],
        };

        let manifest = get_stream_manifest(&data);
        assert!(manifest.video_streams.is_empty());
        assert_eq!(manifest.muxed_streams.len(), 1);

        let muxed = &manifest.muxed_streams[0];
        assert_eq!(muxed.video.video_codec, "avc1.42001E");
        assert_eq!(muxed.audio.audio_codec, "mp4a.40.2");
        assert_eq!(muxed.video.info.url, "https://muxed");
    }

    #[test]
    fn test_two_codec_adaptive_stays_video_only() {
        // Same codec pair but from adaptiveFormats: not muxed.
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![raw_format(
                r#"video/mp4; codecs="avc1.42001E, mp4a.40.2""#,
                Some("https://v"),
            )],
        };

        let manifest = get_stream_manifest(&data);
        assert_eq!(manifest.video_streams.len(), 1);
        assert!(manifest.muxed_streams.is_empty());
    }

    #[test]
    fn test_audio_classified_audio_only() {
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![RawFormat {
                bitrate: 128_000,
                audio_sample_rate: Some("44100".to_string()),
                audio_channels: Some(2),
                ..raw_format(r#"audio/webm; codecs="opus""#, Some("https://a"))
            }],
        };

        let manifest = get_stream_manifest(&data);
        assert_eq!(manifest.audio_streams.len(), 1);

        let stream = &manifest.audio_streams[0];
        assert_eq!(stream.audio_codec, "opus");
        assert_eq!(stream.sample_rate, 44100);
        assert_eq!(stream.channel_count, 2);
        assert_eq!(stream.info.container, Container::Webm);
        assert_eq!(stream.info.quality, "128kbps");
    }

    #[test]
    fn test_content_length_parsing() {
        let mut format = raw_format(r#"video/mp4; codecs="avc1""#, Some("https://v"));
        format.content_length = Some("1048576".to_string());

        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![format],
        };
        let manifest = get_stream_manifest(&data);
        assert_eq!(manifest.video_streams[0].info.content_length, 1_048_576);
        assert_eq!(manifest.video_streams[0].info.size, 1_048_576);

        // Invalid and missing content lengths collapse to 0.
        let mut format = raw_format(r#"video/mp4; codecs="avc1""#, Some("https://v"));
        format.content_length = Some("garbage".to_string());
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![format],
        };
        assert_eq!(
            get_stream_manifest(&data).video_streams[0].info.content_length,
            0
        );
    }

    #[test]
    fn test_cipher_gated_entry_kept_with_empty_url() {
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![RawFormat {
                signature_cipher: Some("s=abc&url=https%3A%2F%2Fx".to_string()),
                ..raw_format(r#"video/mp4; codecs="avc1""#, None)
            }],
        };

        let manifest = get_stream_manifest(&data);
        assert_eq!(manifest.video_streams.len(), 1);
        assert!(manifest.video_streams[0].info.url.is_empty());
    }

    #[test]
    fn test_unparseable_mime_skipped() {
        let data = StreamingData {
            formats: vec![raw_format("garbage", Some("https://x"))],
            adaptive_formats: vec![],
        };
        assert!(get_stream_manifest(&data).is_empty());
    }

    #[test]
    fn test_quality_label_fallbacks() {
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![RawFormat {
                height: Some(720),
                quality_label: Some("720p60".to_string()),
                ..raw_format(r#"video/mp4; codecs="avc1""#, Some("https://v"))
            }],
        };
        assert_eq!(get_stream_manifest(&data).video_streams[0].info.quality, "720p60");

        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![RawFormat {
                height: Some(720),
                ..raw_format(r#"video/mp4; codecs="avc1""#, Some("https://v"))
            }],
        };
        assert_eq!(get_stream_manifest(&data).video_streams[0].info.quality, "720p");
    }

    #[test]
    fn test_audio_track_language() {
        let data = StreamingData {
            formats: vec![],
            adaptive_formats: vec![RawFormat {
                audio_track: Some(crate::platform::player::AudioTrack {
                    display_name: "English (original)".to_string(),
                    id: "en.4".to_string(),
                    audio_is_default: true,
                }),
                ..raw_format(r#"audio/mp4; codecs="mp4a.40.2""#, Some("https://a"))
            }],
        };

        let stream = &get_stream_manifest(&data).audio_streams[0];
        assert_eq!(stream.audio_language, "English (original)");
        assert!(stream.is_default);
    }

    #[test]
    fn test_mixed_manifest() {
        let data = StreamingData {
            formats: vec![raw_format(
                r#"video/mp4; codecs="avc1.42001E, mp4a.40.2""#,
                Some("https://muxed"),
            )],
            adaptive_formats: vec![
                RawFormat {
                    height: Some(1080),
                    ..raw_format(r#"video/mp4; codecs="avc1.640028""#, Some("https://v1080"))
                },
                RawFormat {
                    height: Some(720),
                    ..raw_format(r#"video/webm; codecs="vp9""#, Some("https://v720"))
                },
                RawFormat {
                    bitrate: 128_000,
                    ..raw_format(r#"audio/mp4; codecs="mp4a.40.2""#, Some("https://a"))
                },
            ],
        };

        let manifest = get_stream_manifest(&data);
        assert_eq!(manifest.video_streams.len(), 2);
        assert_eq!(manifest.audio_streams.len(), 1);
        assert_eq!(manifest.muxed_streams.len(), 1);
        assert_eq!(manifest.len(), 4);
    }
}
