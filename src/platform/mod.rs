//! YouTube-specific plumbing: identifiers, transport, watch page, player
//! response, stream manifest

pub mod cipher;
pub mod client;
pub mod cookies;
pub mod ids;
pub mod manifest;
pub mod player;
pub mod playlist;
pub mod watch_page;

pub use cipher::SignatureCipher;
pub use cookies::{load_cookies_from_file, Cookie};
pub use ids::{resolve_query, ChannelIdentifier, ChannelKind, Identifier};
pub use manifest::get_stream_manifest;
pub use player::PlayerResponse;
pub use watch_page::{WatchPage, WatchPageFetcher};
