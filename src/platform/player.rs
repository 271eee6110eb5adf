//! Player response extraction
//!
//! The watch page embeds a JSON object assigned to
//! `ytInitialPlayerResponse`. The extractor locates the marker, skips the
//! `=` assignment, and decodes exactly one JSON value from that position,
//! tolerating whatever script text follows it.

use crate::core::video::{Author, Thumbnail, Video};
use crate::error::YtdlError;
use crate::platform::cipher::SignatureCipher;
use crate::platform::watch_page::WatchPage;
use serde::Deserialize;
use std::time::Duration;

/// Marker preceding the embedded player response JSON.
const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse";

/// The embedded player response object, reduced to the subtrees the
/// pipeline consumes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerResponse {
    pub video_details: VideoDetails,
    pub playability_status: PlayabilityStatus,
    pub streaming_data: Option<StreamingData>,
    pub microformat: Option<Microformat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub channel_id: String,
    /// Duration in seconds, string-encoded by YouTube
    pub length_seconds: String,
    /// View count, string-encoded; may be empty
    pub view_count: String,
    pub short_description: String,
    pub keywords: Vec<String>,
    pub is_live_content: bool,
    pub is_private: bool,
    pub thumbnail: ThumbnailList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThumbnailList {
    pub thumbnails: Vec<RawThumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawThumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: String,
}

impl PlayabilityStatus {
    /// Whether the video is playable.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamingData {
    pub formats: Vec<RawFormat>,
    pub adaptive_formats: Vec<RawFormat>,
}

/// A raw stream format descriptor as YouTube serves it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormat {
    pub itag: u32,
    /// Direct URL; absent for cipher-gated formats
    pub url: Option<String>,
    pub mime_type: String,
    pub bitrate: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<u32>,
    pub quality_label: Option<String>,
    /// Content length in bytes, string-encoded
    pub content_length: Option<String>,
    pub audio_sample_rate: Option<String>,
    pub audio_channels: Option<u32>,
    pub audio_track: Option<AudioTrack>,
    pub signature_cipher: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioTrack {
    pub display_name: String,
    pub id: String,
    pub audio_is_default: bool,
}

impl RawFormat {
    /// Whether this format needs signature-cipher decryption before its
    /// URL can be used.
    pub fn needs_cipher_decryption(&self) -> bool {
        self.url.as_deref().unwrap_or("").is_empty() && self.signature_cipher.is_some()
    }

    /// The parsed signature cipher descriptor, when the format carries
    /// one.
    pub fn cipher(&self) -> Option<SignatureCipher> {
        self.signature_cipher
            .as_deref()
            .and_then(SignatureCipher::parse)
    }
}

/// Optional microformat subtree carrying category and upload date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Microformat {
    pub player_microformat_renderer: MicroformatRenderer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicroformatRenderer {
    pub category: String,
    pub upload_date: String,
}

impl WatchPage {
    /// Extract and decode the embedded player response.
    pub fn extract_player_response(&self) -> Result<PlayerResponse, YtdlError> {
        extract_player_response(&self.html)
    }
}

/// Locate and decode the `ytInitialPlayerResponse` object in watch page
/// HTML.
pub fn extract_player_response(html: &str) -> Result<PlayerResponse, YtdlError> {
    let marker = html
        .find(PLAYER_RESPONSE_MARKER)
        .ok_or(YtdlError::PlayerResponseNotFound)?;

    let mut rest = html[marker + PLAYER_RESPONSE_MARKER.len()..].trim_start();
    rest = rest
        .strip_prefix('=')
        .ok_or(YtdlError::PlayerResponseNotFound)?
        .trim_start();

    // Decode one JSON value; script text after it is expected and ignored.
    let mut deserializer = serde_json::Deserializer::from_str(rest);
    PlayerResponse::deserialize(&mut deserializer).map_err(YtdlError::PlayerResponseJsonInvalid)
}

impl PlayerResponse {
    /// Convert the decoded details into the immutable [`Video`] record.
    pub fn to_video(&self) -> Result<Video, YtdlError> {
        let details = &self.video_details;

        let duration = if details.length_seconds.is_empty() {
            Duration::ZERO
        } else {
            let seconds: u64 = details
                .length_seconds
                .parse()
                .map_err(|_| YtdlError::InvalidDuration(details.length_seconds.clone()))?;
            Duration::from_secs(seconds)
        };

        let view_count: u64 = details.view_count.parse().unwrap_or(0);

        let thumbnails = details
            .thumbnail
            .thumbnails
            .iter()
            .map(|t| Thumbnail {
                url: t.url.clone(),
                width: t.width,
                height: t.height,
            })
            .collect();

        let (category, upload_date) = match &self.microformat {
            Some(m) => {
                let renderer = &m.player_microformat_renderer;
                let upload_date = if renderer.upload_date.is_empty() {
                    None
                } else {
                    Some(renderer.upload_date.clone())
                };
                (renderer.category.clone(), upload_date)
            }
            None => (String::new(), None),
        };

        Ok(Video {
            id: details.video_id.clone(),
            title: details.title.clone(),
            author: Author {
                name: details.author.clone(),
                channel_id: details.channel_id.clone(),
                url: format!("https://www.youtube.com/channel/{}", details.channel_id),
            },
            duration,
            description: details.short_description.clone(),
            view_count,
            upload_date,
            thumbnails,
            keywords: details.keywords.clone(),
            category,
            is_live: details.is_live_content,
            is_private: details.is_private,
        })
    }
}
