//! MIME type parsing for stream format descriptors
//!
//! YouTube format descriptors carry a MIME type of the form
//! `video/mp4; codecs="avc1.640028, mp4a.40.2"`. The media type, subtype
//! and codec list drive stream classification and container inference.

/// A parsed MIME type with its codecs parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType {
    /// Media type (e.g., "video", "audio")
    pub media_type: String,
    /// Subtype (e.g., "mp4", "webm")
    pub subtype: String,
    /// Codec identifiers from the codecs parameter, in order
    pub codecs: Vec<String>,
}

impl MimeType {
    /// Parse a MIME type string like `video/mp4; codecs="avc1, mp4a.40.2"`.
    ///
    /// Missing or empty codecs parameters yield an empty codec list.
    pub fn parse(raw: &str) -> Option<MimeType> {
        let mut sections = raw.split(';');
        let essence = sections.next()?.trim();

        let (media_type, subtype) = essence.split_once('/')?;
        if media_type.is_empty() || subtype.is_empty() {
            return None;
        }

        let mut codecs = Vec::new();
        for section in sections {
            let section = section.trim();
            if let Some(value) = section.strip_prefix("codecs=") {
                let value = value.trim_matches('"');
                codecs = value
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
            }
        }

        Some(MimeType {
            media_type: media_type.trim().to_lowercase(),
            subtype: subtype.trim().to_lowercase(),
            codecs,
        })
    }

    /// Check if this is a video MIME type.
    pub fn is_video(&self) -> bool {
        self.media_type == "video"
    }

    /// Check if this is an audio MIME type.
    pub fn is_audio(&self) -> bool {
        self.media_type == "audio"
    }
}

/// Check if a codec identifier names an audio codec.
pub fn is_audio_codec(codec: &str) -> bool {
    let codec = codec.to_lowercase();
    codec.starts_with("mp4a")
        || codec.starts_with("opus")
        || codec.starts_with("vorbis")
        || codec.starts_with("mp3")
        || codec.starts_with("ac-3")
        || codec.starts_with("ec-3")
}
