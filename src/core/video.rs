//! Video metadata types

use std::fmt;
use std::time::Duration;

/// A YouTube video with its metadata.
///
/// Constructed by the player response extractor from a single JSON decode;
/// immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Video {
    /// Unique 11-character video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Channel that uploaded the video
    pub author: Author,
    /// Length of the video
    pub duration: Duration,
    /// Description text
    pub description: String,
    /// Number of views
    pub view_count: u64,
    /// Upload date in YYYY-MM-DD form, when known
    pub upload_date: Option<String>,
    /// Available thumbnail images
    pub thumbnails: Vec<Thumbnail>,
    /// Tags/keywords
    pub keywords: Vec<String>,
    /// Category (e.g., "Music", "Gaming")
    pub category: String,
    /// Whether this is a live stream
    pub is_live: bool,
    /// Whether the video is private
    pub is_private: bool,
}

impl Video {
    /// The duration formatted as `H:MM:SS` or `M:SS`.
    pub fn duration_string(&self) -> String {
        let total = self.duration.as_secs();
        let h = total / 3600;
        let m = (total % 3600) / 60;
        let s = total % 60;

        if h > 0 {
            format!("{}:{:02}:{:02}", h, m, s)
        } else {
            format!("{}:{:02}", m, s)
        }
    }

    /// The highest-resolution thumbnail, if any.
    pub fn best_thumbnail(&self) -> Option<&Thumbnail> {
        best_thumbnail(&self.thumbnails)
    }

    /// The URL of the best thumbnail, falling back to the predictable
    /// hqdefault URL when the metadata carried none.
    pub fn thumbnail_url(&self) -> String {
        thumbnail_url(&self.id, &self.thumbnails)
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.author.name,
            self.title,
            self.duration_string()
        )
    }
}

/// The channel/uploader of a video
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Display name of the channel
    pub name: String,
    /// Unique channel identifier
    pub channel_id: String,
    /// Channel URL
    pub url: String,
}

/// A video thumbnail image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    /// Total pixel count, used to rank thumbnails.
    pub fn resolution(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// The highest-resolution thumbnail from a slice, or `None` when empty.
pub fn best_thumbnail(thumbnails: &[Thumbnail]) -> Option<&Thumbnail> {
    let mut best: Option<&Thumbnail> = None;
    for thumbnail in thumbnails {
        match best {
            Some(b) if thumbnail.resolution() <= b.resolution() => {}
            _ => best = Some(thumbnail),
        }
    }
    best
}

/// The URL of the best thumbnail for a video, with the hqdefault fallback
/// for videos whose metadata carries no thumbnail list.
pub fn thumbnail_url(video_id: &str, thumbnails: &[Thumbnail]) -> String {
    match best_thumbnail(thumbnails) {
        Some(t) => t.url.clone(),
        None => format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", video_id),
    }
}
