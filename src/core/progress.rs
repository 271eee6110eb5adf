//! Progress reporting types

use std::sync::Arc;

/// Progress of a single download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Bytes downloaded so far
    pub downloaded: u64,
    /// Total size in bytes; 0 when unknown
    pub total: u64,
}

impl Progress {
    /// Completion percentage (0-100); 0 when the total is unknown.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.downloaded as f64 / self.total as f64 * 100.0
    }
}

/// Callback reporting single-download progress.
///
/// Invoked from download tasks; implementations must not block.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Progress of a batch of downloads
#[derive(Debug, Clone, Default)]
pub struct BatchProgress {
    /// Items finished so far
    pub completed_count: usize,
    /// Total number of items
    pub total_count: usize,
    /// Index of the item currently being processed
    pub current_index: usize,
    /// Title of the current item
    pub current_title: String,
    /// Progress of the current item's download, when one is running
    pub current_progress: Option<Progress>,
}

/// Callback reporting batch progress.
pub type BatchProgressCallback = Arc<dyn Fn(BatchProgress) + Send + Sync>;

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let progress = Progress {
            downloaded: 100,
            total: 0,
        };
        assert_eq!(progress.percentage(), 0.0);

        let progress = Progress {
            downloaded: 50,
            total: 100,
        };
        assert_eq!(progress.percentage(), 50.0);

        let progress = Progress {
            downloaded: 100,
            total: 100,
        };
        assert_eq!(progress.percentage(), 100.0);

        let progress = Progress {
            downloaded: 0,
            total: 100,
        };
        assert_eq!(progress.percentage(), 0.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_batch_progress_default() {
        let progress = BatchProgress::default();
        assert_eq!(progress.completed_count, 0);
        assert_eq!(progress.total_count, 0);
        assert!(progress.current_progress.is_none());
    }
}
