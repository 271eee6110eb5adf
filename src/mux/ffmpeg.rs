//! FFmpeg discovery and stream muxing

use crate::error::YtdlError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Longest stderr snippet carried into a mux failure.
const STDERR_SNIPPET_LEN: usize = 512;

/// The FFmpeg executable name for the current OS.
fn cli_file_name() -> &'static str {
    if cfg!(windows) {
        "ffmpeg.exe"
    } else {
        "ffmpeg"
    }
}

/// Directories probed for FFmpeg, in order: current working directory, the
/// directory of this executable, then every PATH entry. Duplicates are
/// skipped.
fn probe_directory_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut seen = HashSet::new();

    let mut add_path = |p: PathBuf| {
        if !p.as_os_str().is_empty() && seen.insert(p.clone()) {
            paths.push(p);
        }
    };

    if let Ok(cwd) = std::env::current_dir() {
        add_path(cwd);
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            add_path(dir.to_path_buf());
        }
    }

    if let Some(path_env) = std::env::var_os("PATH") {
        for entry in std::env::split_paths(&path_env) {
            add_path(entry);
        }
    }

    paths
}

/// Find an executable by name in the given directories; first hit wins.
fn find_in_dirs(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// The path of the FFmpeg executable, or `None` when it is not installed.
pub fn try_get_cli_file_path() -> Option<PathBuf> {
    find_in_dirs(&probe_directory_paths(), cli_file_name())
}

/// The path of the FFmpeg executable.
pub fn get_cli_file_path() -> Result<PathBuf, YtdlError> {
    try_get_cli_file_path().ok_or(YtdlError::MultiplexerNotFound)
}

/// Whether FFmpeg is available on this system.
pub fn is_available() -> bool {
    try_get_cli_file_path().is_some()
}

/// Whether FFmpeg sits next to this executable (bundled install).
pub fn is_bundled() -> bool {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(cli_file_name())))
        .map(|candidate| candidate.is_file())
        .unwrap_or(false)
}

/// The FFmpeg argument vector for muxing without re-encoding.
fn build_mux_args(video_path: &Path, audio_path: &Path, output_path: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        video_path.display().to_string(),
        "-i".to_string(),
        audio_path.display().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        "-y".to_string(),
        output_path.display().to_string(),
    ]
}

/// Combine a video stream and an audio stream into one container file.
///
/// Streams are copied, not re-encoded. The child's stderr is captured for
/// diagnostics; its stdout is ignored. Cancellation kills the child. A
/// failed mux leaves partial output on disk; deletion is the caller's
/// concern.
pub async fn mux_streams(
    cancel: &CancellationToken,
    video_path: &Path,
    audio_path: &Path,
    output_path: &Path,
) -> Result<(), YtdlError> {
    let ffmpeg_path = get_cli_file_path()?;
    let args = build_mux_args(video_path, audio_path, output_path);

    debug!("running {} {}", ffmpeg_path.display(), args.join(" "));

    let child = Command::new(&ffmpeg_path)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let output = tokio::select! {
        _ = cancel.cancelled() => {
            // kill_on_drop terminates the child when the future is dropped.
            return Err(YtdlError::Cancelled);
        }
        output = child.wait_with_output() => output?,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let snippet: String = stderr.chars().take(STDERR_SNIPPET_LEN).collect();
        return Err(YtdlError::MuxFailed(snippet));
    }

    info!("muxed {} + {} -> {}", video_path.display(), audio_path.display(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_file_name() {
        let name = cli_file_name();
        if cfg!(windows) {
            assert_eq!(name, "ffmpeg.exe");
        } else {
            assert_eq!(name, "ffmpeg");
        }
    }

    #[test]
    fn test_build_mux_args() {
        let args = build_mux_args(
            Path::new("video.mp4"),
            Path::new("audio.m4a"),
            Path::new("out.mp4"),
        );
        assert_eq!(
            args,
            vec!["-i", "video.mp4", "-i", "audio.m4a", "-c", "copy", "-y", "out.mp4"]
        );
    }

    #[test]
    fn test_probe_directory_paths_no_duplicates() {
        let paths = probe_directory_paths();
        let unique: HashSet<&PathBuf> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn test_find_in_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join(cli_file_name());
        std::fs::write(&target, b"").unwrap();

        let other = tempfile::tempdir().unwrap();

        // First existing candidate wins.
        let found = find_in_dirs(
            &[other.path().to_path_buf(), dir.path().to_path_buf()],
            cli_file_name(),
        );
        assert_eq!(found.unwrap(), target);

        // Nothing found in empty or unrelated directories.
        assert!(find_in_dirs(&[], cli_file_name()).is_none());
        assert!(find_in_dirs(&[other.path().to_path_buf()], cli_file_name()).is_none());
    }

    #[test]
    fn test_find_in_dirs_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(cli_file_name())).unwrap();

        assert!(find_in_dirs(&[dir.path().to_path_buf()], cli_file_name()).is_none());
    }

    #[tokio::test]
    async fn test_mux_not_found_fails_fast() {
        // Only meaningful where ffmpeg is genuinely absent; when it is
        // installed the discovery path is exercised instead.
        if is_available() {
            return;
        }

        let cancel = CancellationToken::new();
        let err = mux_streams(
            &cancel,
            Path::new("v.mp4"),
            Path::new("a.m4a"),
            Path::new("o.mp4"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, YtdlError::MultiplexerNotFound));
    }
}
