//! Terminal output: progress rendering and user-facing error mapping

use crate::core::progress::Progress;
use crate::error::YtdlError;
use indicatif::{ProgressBar, ProgressStyle};

/// A download progress bar driven by core progress callbacks.
pub struct ProgressRenderer {
    bar: ProgressBar,
}

impl ProgressRenderer {
    /// Create a progress bar with an initially unknown length.
    pub fn new(message: &str) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("progress template is valid")
            .progress_chars("=>-");

        let bar = ProgressBar::new(0);
        bar.set_style(style);
        bar.set_message(message.to_string());

        Self { bar }
    }

    /// Update the bar from a progress report.
    pub fn update(&self, progress: Progress) {
        if progress.total > 0 && self.bar.length() != Some(progress.total) {
            self.bar.set_length(progress.total);
        }
        self.bar.set_position(progress.downloaded);
    }

    /// Finish the bar and leave it on screen.
    pub fn finish(&self) {
        self.bar.finish();
    }
}

/// A user-facing rendering of an error: a message plus optional guidance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserError {
    pub message: String,
    pub suggestion: Option<String>,
}

impl UserError {
    /// Format for display: `Error: <message>` plus the suggestion block
    /// when one exists.
    pub fn format(&self) -> String {
        match &self.suggestion {
            Some(suggestion) => format!("Error: {}\n\nSuggestion: {}", self.message, suggestion),
            None => format!("Error: {}", self.message),
        }
    }
}

/// Map an error to its operator-visible message and suggestion.
///
/// This is the single place where guidance text is attached; components
/// below the CLI return bare error kinds.
pub fn map_user_error(err: &YtdlError) -> UserError {
    match err {
        YtdlError::InvalidVideoId => UserError {
            message: "Invalid video URL or ID".to_string(),
            suggestion: Some(
                "Make sure you're using a valid YouTube URL like:\n  - https://www.youtube.com/watch?v=VIDEO_ID\n  - https://youtu.be/VIDEO_ID\n  - Or just the 11-character video ID"
                    .to_string(),
            ),
        },
        YtdlError::InvalidPlaylistId => UserError {
            message: "Invalid playlist URL or ID".to_string(),
            suggestion: Some(
                "Make sure you're using a valid YouTube playlist URL like:\n  - https://www.youtube.com/playlist?list=PLAYLIST_ID"
                    .to_string(),
            ),
        },
        YtdlError::InvalidChannelId => UserError {
            message: "Invalid channel URL or ID".to_string(),
            suggestion: Some(
                "Make sure you're using a valid YouTube channel URL like:\n  - https://www.youtube.com/channel/CHANNEL_ID\n  - https://www.youtube.com/@handle"
                    .to_string(),
            ),
        },
        YtdlError::UnresolvableQuery => UserError {
            message: "Unable to recognize the URL or ID".to_string(),
            suggestion: Some(
                "Check that the URL is a valid YouTube video, playlist, or channel URL".to_string(),
            ),
        },
        YtdlError::SearchUnsupported => UserError {
            message: "Search queries are not supported for download".to_string(),
            suggestion: Some("Pass a video, playlist, or channel URL instead".to_string()),
        },
        YtdlError::ChannelResolutionUnsupported | YtdlError::PlaylistFetchUnimplemented => {
            UserError {
                message: err.to_string(),
                suggestion: Some(
                    "Download individual videos from the playlist or channel instead".to_string(),
                ),
            }
        }
        YtdlError::MultiplexerNotFound => UserError {
            message: "FFmpeg not found".to_string(),
            suggestion: Some(
                "FFmpeg is required for muxing video and audio streams.\nPlease install FFmpeg and make sure it's in your PATH.\nDownload from: https://ffmpeg.org/download.html"
                    .to_string(),
            ),
        },
        YtdlError::MuxFailed(_) => UserError {
            message: err.to_string(),
            suggestion: Some("Check that FFmpeg is working: ffmpeg -version".to_string()),
        },
        YtdlError::RateLimited(_) => UserError {
            message: "Too many requests - rate limited by YouTube".to_string(),
            suggestion: Some("Wait a few minutes before trying again".to_string()),
        },
        YtdlError::VideoUnavailable(reason) => UserError {
            message: format!("Video is unavailable: {}", reason),
            suggestion: Some(
                "The video may be:\n  - Private or deleted\n  - Age-restricted\n  - Blocked in your region\n  - Requires sign-in"
                    .to_string(),
            ),
        },
        YtdlError::HttpError(403) => UserError {
            message: "Access forbidden (HTTP 403)".to_string(),
            suggestion: Some("The content may be restricted or your IP may be blocked".to_string()),
        },
        YtdlError::HttpError(404) | YtdlError::UnexpectedStatus(404) => UserError {
            message: "Content not found (HTTP 404)".to_string(),
            suggestion: Some(
                "The video, playlist, or channel may have been deleted".to_string(),
            ),
        },
        YtdlError::NoStreamingData | YtdlError::NoDownloadableStream => UserError {
            message: err.to_string(),
            suggestion: Some(
                "The video may be live, cipher-protected, or region-locked".to_string(),
            ),
        },
        YtdlError::CookieOpen(_) | YtdlError::CookieLineMalformed { .. } | YtdlError::CookieIo(_) => {
            UserError {
                message: format!("Failed to load cookies: {}", err),
                suggestion: Some(
                    "Pass a Netscape format cookie file (7 tab-separated fields per line)"
                        .to_string(),
                ),
            }
        }
        YtdlError::Request(source) => {
            if source.is_timeout() {
                UserError {
                    message: "Connection timed out".to_string(),
                    suggestion: Some("Check your internet connection and try again".to_string()),
                }
            } else if source.is_connect() {
                UserError {
                    message: "Could not connect to host".to_string(),
                    suggestion: Some(
                        "Check your internet connection and DNS settings".to_string(),
                    ),
                }
            } else {
                UserError {
                    message: err.to_string(),
                    suggestion: None,
                }
            }
        }
        YtdlError::Io(source) => {
            // ENOSPC has no stable ErrorKind mapping.
            if source.raw_os_error() == Some(28) {
                return UserError {
                    message: "No space left on device".to_string(),
                    suggestion: Some("Free up some disk space and try again".to_string()),
                };
            }
            match source.kind() {
                std::io::ErrorKind::PermissionDenied => UserError {
                    message: "Permission denied".to_string(),
                    suggestion: Some(
                        "Check that you have write permissions to the output directory"
                            .to_string(),
                    ),
                },
                std::io::ErrorKind::NotFound => UserError {
                    message: "File or directory not found".to_string(),
                    suggestion: Some("Make sure the output directory exists".to_string()),
                },
                _ => UserError {
                    message: err.to_string(),
                    suggestion: None,
                },
            }
        }
        YtdlError::Cancelled => UserError {
            message: "Cancelled".to_string(),
            suggestion: None,
        },
        _ => UserError {
            message: err.to_string(),
            suggestion: None,
        },
    }
}
