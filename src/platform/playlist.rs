//! Playlist metadata parsing
//!
//! Playlist landing pages embed their header as JSON under
//! `playlistHeaderRenderer`. Full enumeration needs the continuation-token
//! protocol and is not implemented; the header parsers below cover the
//! metadata a landing page carries.

use crate::core::video::{Author, Thumbnail};
use serde::Deserialize;

/// A YouTube playlist with its metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    /// Playlist identifier
    pub id: String,
    /// Playlist title
    pub title: String,
    /// Playlist creator
    pub author: Author,
    /// Number of videos in the playlist
    pub video_count: u32,
    /// Description (may be empty)
    pub description: String,
    /// Available thumbnail images
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeaderData {
    header: Header,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Header {
    playlist_header_renderer: HeaderRenderer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HeaderRenderer {
    title: TitleText,
    num_videos_text: RunsText,
    owner_text: RunsText,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TitleText {
    simple_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunsText {
    runs: Vec<Run>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Run {
    text: String,
    navigation_endpoint: NavigationEndpoint,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NavigationEndpoint {
    browse_endpoint: BrowseEndpoint,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BrowseEndpoint {
    browse_id: String,
}

/// Extract the playlist title from playlist header JSON.
pub fn parse_playlist_title(json_data: &str) -> Result<String, serde_json::Error> {
    let data: HeaderData = serde_json::from_str(json_data)?;
    Ok(data.header.playlist_header_renderer.title.simple_text)
}

/// Extract the video count from playlist header JSON.
///
/// The count text can be bare (`"42"`) or decorated (`"42 videos"`);
/// either way the first number wins. Missing text yields 0.
pub fn parse_playlist_video_count(json_data: &str) -> Result<u32, serde_json::Error> {
    let data: HeaderData = serde_json::from_str(json_data)?;
    let runs = &data.header.playlist_header_renderer.num_videos_text.runs;

    let Some(run) = runs.first() else {
        return Ok(0);
    };

    let digits: String = run
        .text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    Ok(digits.parse().unwrap_or(0))
}

/// Extract the playlist author from playlist header JSON.
pub fn parse_playlist_author(json_data: &str) -> Result<Author, serde_json::Error> {
    let data: HeaderData = serde_json::from_str(json_data)?;
    let runs = &data.header.playlist_header_renderer.owner_text.runs;

    let Some(run) = runs.first() else {
        return Ok(Author::default());
    };

    Ok(Author {
        name: run.text.clone(),
        channel_id: run.navigation_endpoint.browse_endpoint.browse_id.clone(),
        url: String::new(),
    })
}
