//! Error types for ytdl

use thiserror::Error;

/// Main error type for ytdl operations
#[derive(Debug, Error)]
pub enum YtdlError {
    #[error("invalid video ID")]
    InvalidVideoId,

    #[error("invalid playlist ID")]
    InvalidPlaylistId,

    #[error("invalid channel identifier")]
    InvalidChannelId,

    #[error("unresolvable query")]
    UnresolvableQuery,

    #[error("search queries are not supported for download")]
    SearchUnsupported,

    #[error("channel download requires resolving the channel ID - not yet implemented")]
    ChannelResolutionUnsupported,

    #[error("playlist download requires fetching the playlist page - not yet implemented")]
    PlaylistFetchUnimplemented,

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("HTTP error: {0}")]
    HttpError(u16),

    #[error("video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("no streaming data available")]
    NoStreamingData,

    #[error("no downloadable stream found")]
    NoDownloadableStream,

    #[error("player response not found in watch page")]
    PlayerResponseNotFound,

    #[error("player response JSON invalid: {0}")]
    PlayerResponseJsonInvalid(#[source] serde_json::Error),

    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    #[error("opening cookie file: {0}")]
    CookieOpen(#[source] std::io::Error),

    #[error("cookie file line {line}: {reason}")]
    CookieLineMalformed { line: usize, reason: String },

    #[error("reading cookie file: {0}")]
    CookieIo(#[source] std::io::Error),

    #[error("ffmpeg not found")]
    MultiplexerNotFound,

    #[error("ffmpeg mux failed: {0}")]
    MuxFailed(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl YtdlError {
    /// Check if this error is an invalid-input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            YtdlError::InvalidVideoId
                | YtdlError::InvalidPlaylistId
                | YtdlError::InvalidChannelId
                | YtdlError::UnresolvableQuery
        )
    }

    /// Check if this error came from the remote protocol layer
    pub fn is_remote_protocol(&self) -> bool {
        matches!(
            self,
            YtdlError::RateLimited(_)
                | YtdlError::UnexpectedStatus(_)
                | YtdlError::HttpError(_)
                | YtdlError::VideoUnavailable(_)
                | YtdlError::NoStreamingData
                | YtdlError::NoDownloadableStream
                | YtdlError::PlayerResponseNotFound
                | YtdlError::PlayerResponseJsonInvalid(_)
                | YtdlError::InvalidDuration(_)
        )
    }

    /// Check if this error is cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, YtdlError::Cancelled)
    }
}
