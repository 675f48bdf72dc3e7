use crate::error::MediaError;
use crate::probe::StreamInfo;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Aspect ratio class of a video, used to pick its storage prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
    Other,
}

impl AspectRatio {
    /// Classify by exact integer relation: `w == 16h/9` is landscape,
    /// `h == 16w/9` is portrait. Near misses (e.g. 1366x768) are `Other`.
    pub fn classify(width: u32, height: u32) -> Self {
        let (w, h) = (u64::from(width), u64::from(height));
        if w == 16 * h / 9 {
            AspectRatio::Landscape
        } else if h == 16 * w / 9 {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    /// Classify the first video stream of a probe result.
    pub fn from_streams(streams: &[StreamInfo]) -> Result<Self, MediaError> {
        let stream = streams
            .iter()
            .find(|s| s.is_video())
            .ok_or_else(|| MediaError::ProbeFailed("No video stream found".to_string()))?;

        let (width, height) = stream.dimensions().ok_or_else(|| {
            MediaError::ProbeFailed(format!("Stream {} has no dimensions", stream.index))
        })?;

        Ok(Self::classify(width, height))
    }

    /// The ratio as ffprobe users usually write it ("16:9", "9:16", "other").
    pub fn as_ratio_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Other => "other",
        }
    }

    pub fn key_prefix(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_ratio_str())
    }
}
