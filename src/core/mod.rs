//! Core types and orchestration

pub mod options;
pub mod orchestrator;
pub mod progress;
pub mod streams;
pub mod video;

pub use options::{DownloadOption, QualityPreference};
pub use orchestrator::{DownloadOptions, Orchestrator};
pub use progress::{BatchProgress, Progress};
pub use streams::{Container, StreamManifest};
pub use video::{Author, Thumbnail, Video};
