//! ffprobe output model

use crate::error::MediaError;
use serde::Deserialize;

/// One entry of `ffprobe -show_streams`.
///
/// ffprobe omits fields that do not apply to a stream (audio streams have no
/// `width`, video streams no `sample_rate`), so everything but the index is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub index: u32,
    pub codec_name: Option<String>,
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub avg_frame_rate: Option<String>,
    pub duration: Option<String>,
    pub bit_rate: Option<String>,
    pub sample_rate: Option<String>,
    pub channels: Option<u32>,
}

impl StreamInfo {
    pub fn is_video(&self) -> bool {
        self.codec_type.as_deref() == Some("video")
    }

    /// Width and height, when both are present and non-zero.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<StreamInfo>,
}

/// Parse the JSON printed by `ffprobe -print_format json -show_streams`.
pub fn parse_probe_output(stdout: &[u8]) -> Result<Vec<StreamInfo>, MediaError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| MediaError::ProbeFailed(format!("Failed to parse ffprobe output: {}", e)))?;
    Ok(output.streams)
}
