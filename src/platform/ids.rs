//! Parsing and validation of YouTube video, playlist and channel identifiers

use crate::error::YtdlError;
use regex::Regex;
use url::Url;

/// The type of a parsed channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Raw channel ID (e.g., UCuAXFkgsw1L7xaCfnd5JJOw)
    Id,
    /// Channel handle (e.g., @MrBeast)
    Handle,
    /// Custom channel URL (e.g., /c/MrBeast)
    Custom,
    /// Legacy user URL (e.g., /user/PewDiePie)
    User,
}

/// A parsed channel identifier with its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelIdentifier {
    pub kind: ChannelKind,
    pub value: String,
}

impl ChannelIdentifier {
    /// Derive the uploads playlist ID from a channel ID.
    ///
    /// Only raw channel IDs can be converted; the uploads playlist is the
    /// channel ID with the `UC` prefix replaced by `UU`.
    pub fn uploads_playlist_id(&self) -> Option<String> {
        if self.kind == ChannelKind::Id && self.value.starts_with("UC") {
            Some(format!("UU{}", &self.value[2..]))
        } else {
            None
        }
    }
}

/// A resolved input query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// A single video, with playlist context when the URL carried both
    Video {
        id: String,
        playlist: Option<String>,
    },
    /// A playlist
    Playlist { id: String },
    /// A channel in any of its URL forms
    Channel(ChannelIdentifier),
    /// A search query (input prefixed with `?`)
    Search { query: String },
}

fn video_id_regex() -> Regex {
    Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap()
}

fn playlist_id_regex() -> Regex {
    Regex::new(
        r"^(PL[a-zA-Z0-9_-]{32}|WL|LL|LM|RD[a-zA-Z0-9_-]+|OL[a-zA-Z0-9_-]+|OLAK5uy_[a-zA-Z0-9_-]+|UU[a-zA-Z0-9_-]+|FL[a-zA-Z0-9_-]+)$",
    )
    .unwrap()
}

fn channel_id_regex() -> Regex {
    Regex::new(r"^UC[a-zA-Z0-9_-]{22}$").unwrap()
}

/// Check if the given string is a valid YouTube video ID.
///
/// Valid video IDs are exactly 11 characters of letters, numbers,
/// underscores and hyphens.
pub fn is_valid_video_id(id: &str) -> bool {
    video_id_regex().is_match(id)
}

/// Check if the given string is a valid YouTube playlist ID.
pub fn is_valid_playlist_id(id: &str) -> bool {
    playlist_id_regex().is_match(id)
}

/// Check if the given string is a valid YouTube channel ID.
///
/// Valid channel IDs are 24 characters starting with "UC".
pub fn is_valid_channel_id(id: &str) -> bool {
    channel_id_regex().is_match(id)
}

fn is_youtube_host(host: &str) -> bool {
    let host = host.to_lowercase();
    host == "youtube.com"
        || host == "www.youtube.com"
        || host == "m.youtube.com"
        || host == "youtu.be"
}

fn is_watch_host(host: &str) -> bool {
    let host = host.to_lowercase();
    host == "youtube.com" || host == "www.youtube.com" || host == "m.youtube.com"
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Extract the ID portion from a path, truncating at the first `?` or `/`.
fn extract_path_id<'a>(path: &'a str, prefix: &str) -> &'a str {
    let id = path.strip_prefix(prefix).unwrap_or(path);
    match id.find(['?', '/']) {
        Some(idx) => &id[..idx],
        None => id,
    }
}

/// Extract the first segment of a path (before any `/`).
fn first_path_segment(path: &str) -> &str {
    match path.find('/') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Extract the video ID from a YouTube URL or validate a raw video ID.
///
/// Supported forms:
///   - `https://www.youtube.com/watch?v=VIDEO_ID`
///   - `https://youtu.be/VIDEO_ID`
///   - `https://www.youtube.com/embed/VIDEO_ID`
///   - `https://www.youtube.com/v/VIDEO_ID`
///   - `VIDEO_ID` (raw 11-character ID)
pub fn parse_video_id(input: &str) -> Result<String, YtdlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(YtdlError::InvalidVideoId);
    }

    if is_valid_video_id(input) {
        return Ok(input.to_string());
    }

    let parsed = Url::parse(input).map_err(|_| YtdlError::InvalidVideoId)?;
    let host = parsed.host_str().unwrap_or("");
    let path = parsed.path();

    let video_id = if is_watch_host(host) && path == "/watch" {
        query_param(&parsed, "v").unwrap_or_default()
    } else if host.eq_ignore_ascii_case("youtu.be") && path.len() > 1 {
        extract_path_id(path, "/").to_string()
    } else if is_watch_host(host) && path.starts_with("/embed/") {
        extract_path_id(path, "/embed/").to_string()
    } else if is_watch_host(host) && path.starts_with("/v/") {
        extract_path_id(path, "/v/").to_string()
    } else {
        return Err(YtdlError::InvalidVideoId);
    };

    if !is_valid_video_id(&video_id) {
        return Err(YtdlError::InvalidVideoId);
    }

    Ok(video_id)
}

/// Extract the playlist ID from a YouTube URL or validate a raw playlist ID.
///
/// Supported forms:
///   - `https://www.youtube.com/playlist?list=PLAYLIST_ID`
///   - `https://www.youtube.com/watch?v=VIDEO_ID&list=PLAYLIST_ID`
///   - `PLAYLIST_ID` (raw playlist ID)
pub fn parse_playlist_id(input: &str) -> Result<String, YtdlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(YtdlError::InvalidPlaylistId);
    }

    if is_valid_playlist_id(input) {
        return Ok(input.to_string());
    }

    let parsed = Url::parse(input).map_err(|_| YtdlError::InvalidPlaylistId)?;
    if !is_youtube_host(parsed.host_str().unwrap_or("")) {
        return Err(YtdlError::InvalidPlaylistId);
    }

    let playlist_id = query_param(&parsed, "list").unwrap_or_default();
    if !is_valid_playlist_id(&playlist_id) {
        return Err(YtdlError::InvalidPlaylistId);
    }

    Ok(playlist_id)
}

/// Extract the channel identifier from a YouTube URL or validate a raw
/// channel ID.
///
/// Supported forms:
///   - `https://www.youtube.com/channel/CHANNEL_ID`
///   - `https://www.youtube.com/@handle`
///   - `https://www.youtube.com/c/customname`
///   - `https://www.youtube.com/user/username`
///   - `CHANNEL_ID` (raw 24-character ID starting with UC)
pub fn parse_channel_identifier(input: &str) -> Result<ChannelIdentifier, YtdlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(YtdlError::InvalidChannelId);
    }

    if is_valid_channel_id(input) {
        return Ok(ChannelIdentifier {
            kind: ChannelKind::Id,
            value: input.to_string(),
        });
    }

    let parsed = Url::parse(input).map_err(|_| YtdlError::InvalidChannelId)?;
    if !is_youtube_host(parsed.host_str().unwrap_or("")) {
        return Err(YtdlError::InvalidChannelId);
    }

    let path = parsed.path().trim_end_matches('/');

    if let Some(rest) = path.strip_prefix("/channel/") {
        let channel_id = first_path_segment(rest);
        if is_valid_channel_id(channel_id) {
            return Ok(ChannelIdentifier {
                kind: ChannelKind::Id,
                value: channel_id.to_string(),
            });
        }
        return Err(YtdlError::InvalidChannelId);
    }

    if let Some(rest) = path.strip_prefix("/@") {
        let handle = first_path_segment(rest);
        if !handle.is_empty() {
            return Ok(ChannelIdentifier {
                kind: ChannelKind::Handle,
                value: handle.to_string(),
            });
        }
        return Err(YtdlError::InvalidChannelId);
    }

    if let Some(rest) = path.strip_prefix("/c/") {
        let name = first_path_segment(rest);
        if !name.is_empty() {
            return Ok(ChannelIdentifier {
                kind: ChannelKind::Custom,
                value: name.to_string(),
            });
        }
        return Err(YtdlError::InvalidChannelId);
    }

    if let Some(rest) = path.strip_prefix("/user/") {
        let name = first_path_segment(rest);
        if !name.is_empty() {
            return Ok(ChannelIdentifier {
                kind: ChannelKind::User,
                value: name.to_string(),
            });
        }
        return Err(YtdlError::InvalidChannelId);
    }

    Err(YtdlError::InvalidChannelId)
}

/// Analyze the input and determine what kind of YouTube content it refers
/// to.
///
/// Handles video URLs and IDs, playlist URLs and IDs, channel URLs in all
/// formats, and explicit search queries prefixed with `?`.
///
/// Priority order: search (`?`) > video > playlist > channel. A watch URL
/// carrying both `v` and `list` resolves to a video with the playlist kept
/// as context.
pub fn resolve_query(input: &str) -> Result<Identifier, YtdlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(YtdlError::UnresolvableQuery);
    }

    if let Some(query) = input.strip_prefix('?') {
        if query.is_empty() {
            return Err(YtdlError::UnresolvableQuery);
        }
        return Ok(Identifier::Search {
            query: query.to_string(),
        });
    }

    // Watch URLs can carry both a video and a playlist; check that case
    // before the individual parsers so the playlist context is not lost.
    if let Ok(parsed) = Url::parse(input) {
        if is_youtube_host(parsed.host_str().unwrap_or("")) && parsed.path().starts_with("/watch") {
            let video_id = query_param(&parsed, "v").unwrap_or_default();
            if is_valid_video_id(&video_id) {
                let playlist = query_param(&parsed, "list").filter(|id| is_valid_playlist_id(id));
                return Ok(Identifier::Video {
                    id: video_id,
                    playlist,
                });
            }
        }
    }

    if let Ok(id) = parse_video_id(input) {
        return Ok(Identifier::Video { id, playlist: None });
    }

    if let Ok(id) = parse_playlist_id(input) {
        return Ok(Identifier::Playlist { id });
    }

    if let Ok(channel) = parse_channel_identifier(input) {
        return Ok(Identifier::Channel(channel));
    }

    Err(YtdlError::UnresolvableQuery)
}
