use crate::error::MediaError;
use crate::tool::MediaTool;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Path of the remuxed copy of `input`: `<input>.processing`.
pub fn processing_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(".processing");
    PathBuf::from(path)
}

/// Produce a fast-start copy of the MP4 at `input`.
///
/// The returned `TempPath` owns the output file and removes it on drop, also
/// when this function fails part way. The input file is left untouched.
pub async fn normalize_for_fast_start(
    tool: &dyn MediaTool,
    input: &Path,
) -> Result<TempPath, MediaError> {
    let output = TempPath::from_path(processing_path(input));

    tool.remux_faststart(input, &output).await?;

    let metadata = tokio::fs::metadata(&output).await.map_err(|e| {
        MediaError::ProcessingFailed(format!("Processed file missing: {}", e))
    })?;
    if metadata.len() == 0 {
        return Err(MediaError::ProcessingFailed(
            "Processed file is empty".to_string(),
        ));
    }

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        size_bytes = metadata.len(),
        "Video normalized for fast start"
    );

    Ok(output)
}
