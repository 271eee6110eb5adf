//! Shared utilities

pub mod filename;
pub mod mime;

pub use filename::{apply_template, sanitize_filename};
