#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tubely_processing::{MediaError, MediaTool, StreamInfo};

/// What the fake remux writes to its output path.
#[derive(Debug, Clone, Copy)]
pub enum RemuxBehavior {
    /// Prefix the input bytes with a marker.
    Rewrite,
    /// Create the output but leave it empty.
    Empty,
    /// Fail without writing anything.
    Fail,
}

/// Stand-in for ffmpeg/ffprobe that records the paths it was handed.
pub struct FakeMediaTool {
    streams: Option<Vec<StreamInfo>>,
    remux: RemuxBehavior,
    pub probed: Mutex<Vec<PathBuf>>,
    pub remux_outputs: Mutex<Vec<PathBuf>>,
}

pub const REMUX_MARKER: &[u8] = b"faststart:";

impl FakeMediaTool {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self::with_streams(vec![
            StreamInfo {
                index: 0,
                codec_name: Some("aac".to_string()),
                codec_type: Some("audio".to_string()),
                sample_rate: Some("48000".to_string()),
                channels: Some(2),
                ..Default::default()
            },
            StreamInfo {
                index: 1,
                codec_name: Some("h264".to_string()),
                codec_type: Some("video".to_string()),
                width: Some(width),
                height: Some(height),
                avg_frame_rate: Some("30/1".to_string()),
                ..Default::default()
            },
        ])
    }

    pub fn with_streams(streams: Vec<StreamInfo>) -> Self {
        Self {
            streams: Some(streams),
            remux: RemuxBehavior::Rewrite,
            probed: Mutex::new(Vec::new()),
            remux_outputs: Mutex::new(Vec::new()),
        }
    }

    pub fn landscape() -> Self {
        Self::with_dimensions(1920, 1080)
    }

    /// Probe fails as if ffprobe could not read the file.
    pub fn unreadable() -> Self {
        Self {
            streams: None,
            ..Self::landscape()
        }
    }

    pub fn remux(mut self, behavior: RemuxBehavior) -> Self {
        self.remux = behavior;
        self
    }

    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }

    pub fn remux_output_paths(&self) -> Vec<PathBuf> {
        self.remux_outputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTool for FakeMediaTool {
    async fn probe(&self, path: &Path) -> Result<Vec<StreamInfo>, MediaError> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        self.streams
            .clone()
            .ok_or_else(|| MediaError::ProbeFailed("moov atom not found".to_string()))
    }

    async fn remux_faststart(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        self.remux_outputs.lock().unwrap().push(output.to_path_buf());
        match self.remux {
            RemuxBehavior::Rewrite => {
                let mut data = REMUX_MARKER.to_vec();
                data.extend(tokio::fs::read(input).await.unwrap());
                tokio::fs::write(output, data).await.unwrap();
                Ok(())
            }
            RemuxBehavior::Empty => {
                tokio::fs::write(output, b"").await.unwrap();
                Ok(())
            }
            RemuxBehavior::Fail => Err(MediaError::ProcessingFailed(
                "ffmpeg exited with 1".to_string(),
            )),
        }
    }
}
