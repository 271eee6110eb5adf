//! External multiplexer gateway

pub mod ffmpeg;

pub use ffmpeg::{is_available, mux_streams, try_get_cli_file_path};
