//! Tubely media processing
//!
//! Wraps the external ffmpeg toolchain: `ffprobe` to read stream metadata and
//! classify the aspect ratio, `ffmpeg` to move the MP4 index (moov atom) to
//! the front of the file so players can start before the download finishes.
//!
//! The tools sit behind the [`MediaTool`] trait so callers can substitute a
//! fake in tests.

pub mod aspect;
pub mod error;
pub mod faststart;
pub mod probe;
pub mod tool;

pub use aspect::AspectRatio;
pub use error::MediaError;
pub use faststart::normalize_for_fast_start;
pub use probe::{parse_probe_output, StreamInfo};
pub use tool::{FfmpegTool, MediaTool};
