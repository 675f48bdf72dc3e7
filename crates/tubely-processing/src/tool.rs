//! ffmpeg / ffprobe subprocess wrapper

use crate::error::MediaError;
use crate::probe::{parse_probe_output, StreamInfo};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// External media toolchain used by the video upload path.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// List the streams of the media file at `path`.
    async fn probe(&self, path: &Path) -> Result<Vec<StreamInfo>, MediaError>;

    /// Rewrite `input` into `output` with the moov atom up front. Codecs are copied.
    async fn remux_faststart(&self, input: &Path, output: &Path) -> Result<(), MediaError>;
}

/// Validate that a tool path doesn't contain shell metacharacters or dangerous sequences
fn validate_tool_path(path: &str) -> Result<(), MediaError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.is_empty() || path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(MediaError::InvalidToolPath(format!(
            "Path contains dangerous characters: {}",
            path
        )));
    }

    if path.contains("..") {
        return Err(MediaError::InvalidToolPath(format!(
            "Path contains directory traversal: {}",
            path
        )));
    }

    if !path
        .chars()
        .all(|c| c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\')
    {
        return Err(MediaError::InvalidToolPath(format!(
            "Path contains unsafe characters: {}",
            path
        )));
    }

    Ok(())
}

/// Runs the real `ffprobe` and `ffmpeg` binaries.
///
/// Processes are awaited without a timeout; a hung tool holds its request.
/// A child is killed when its request is dropped, so it cannot write into
/// a temp path that has already been cleaned up.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegTool {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> Result<Self, MediaError> {
        validate_tool_path(&ffmpeg_path)?;
        validate_tool_path(&ffprobe_path)?;
        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
        })
    }
}

#[async_trait]
impl MediaTool for FfmpegTool {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<Vec<StreamInfo>, MediaError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| MediaError::ProbeFailed(format!("Failed to execute ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(MediaError::ProbeFailed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let streams = parse_probe_output(&output.stdout)?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            stream_count = streams.len(),
            "Video probe completed"
        );

        Ok(streams)
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn remux_faststart(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        let start = std::time::Instant::now();

        let result = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-movflags", "faststart", "-codec", "copy", "-f", "mp4"])
            .arg(output)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                MediaError::ProcessingFailed(format!("Failed to execute ffmpeg: {}", e))
            })?;

        if !result.status.success() {
            return Err(MediaError::ProcessingFailed(format!(
                "ffmpeg exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            "Fast start remux completed"
        );

        Ok(())
    }
}
