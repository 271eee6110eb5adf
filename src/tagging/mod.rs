//! Metadata tagging collaborator
//!
//! Tag injection consumes a completed file and a metadata record. Real
//! ID3/MP4 writers live behind the [`MetadataTagger`] trait; the shipped
//! implementation is an in-memory scaffold that records what would be
//! written, which is what the test suite exercises.

use crate::core::video::{thumbnail_url, Video};
use crate::error::YtdlError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Metadata tags attached to a media file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub title: String,
    pub artist: String,
    pub comment: String,
    /// URL of the embedded cover art, when one was injected
    pub thumbnail_url: Option<String>,
}

/// Injects metadata tags into completed media files
pub trait MetadataTagger {
    /// Write title/artist/description tags from the video metadata.
    fn inject(&self, path: &Path, video: &Video) -> Result<(), YtdlError>;

    /// Embed the video's best thumbnail as cover art.
    fn inject_thumbnail(&self, path: &Path, video: &Video) -> Result<(), YtdlError>;
}

/// In-memory tag store keyed by file path.
#[derive(Debug, Default)]
pub struct MemoryTagger {
    tags: Mutex<HashMap<PathBuf, Tags>>,
}

impl MemoryTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tags recorded for a file, if any.
    pub fn tags_for(&self, path: &Path) -> Option<Tags> {
        self.tags.lock().expect("tag store lock poisoned").get(path).cloned()
    }
}

impl MetadataTagger for MemoryTagger {
    fn inject(&self, path: &Path, video: &Video) -> Result<(), YtdlError> {
        let mut tags = self.tags.lock().expect("tag store lock poisoned");
        let entry = tags.entry(path.to_path_buf()).or_default();
        entry.title = video.title.clone();
        entry.artist = video.author.name.clone();
        entry.comment = video.description.clone();
        Ok(())
    }

    fn inject_thumbnail(&self, path: &Path, video: &Video) -> Result<(), YtdlError> {
        let mut tags = self.tags.lock().expect("tag store lock poisoned");
        let entry = tags.entry(path.to_path_buf()).or_default();
        entry.thumbnail_url = Some(thumbnail_url(&video.id, &video.thumbnails));
        Ok(())
    }
}
