//! Command line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// YouTube downloader CLI
#[derive(Parser, Debug)]
#[command(name = "ytdl", author, version, about = "A CLI tool for downloading YouTube videos, playlists, and channel content.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a YouTube video, playlist, or channel
    Download(DownloadArgs),
    /// Show video metadata
    Info(InfoArgs),
    /// Show version information
    Version,
}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// YouTube URL or ID
    pub url: String,

    /// Output directory for downloaded files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Video quality (best, 1080p, 720p, 480p, 360p, audio)
    #[arg(short, long, value_name = "QUALITY", default_value = "best")]
    pub quality: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "mp4")]
    pub format: OutputFormat,

    /// Path to Netscape format cookie file (for age-restricted or private videos)
    #[arg(long, value_name = "FILE")]
    pub cookies: Option<PathBuf>,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Disable progress output
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// YouTube URL or ID
    pub url: String,

    /// Path to Netscape format cookie file (for age-restricted or private videos)
    #[arg(long, value_name = "FILE")]
    pub cookies: Option<PathBuf>,
}

/// Output container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Mp4,
    Webm,
    Mp3,
}

impl OutputFormat {
    /// The format name as passed to the pipeline.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Webm => "webm",
            OutputFormat::Mp3 => "mp3",
        }
    }
}

impl DownloadArgs {
    /// HTTP timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }
}
