//! Common utilities for file upload handlers

use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use bytes::{Bytes, BytesMut};
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;

/// A form file read fully into memory.
#[derive(Debug)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub content_type: String,
}

/// A form file streamed to a temporary file. The file is deleted on drop.
#[derive(Debug)]
pub struct SpooledFile {
    pub file: NamedTempFile,
    pub size: u64,
}

impl SpooledFile {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate the declared content type against an allowlist and return it normalized.
pub fn validate_content_type<S: AsRef<str>>(
    content_type: Option<&str>,
    allowed_types: &[S],
) -> Result<String, AppError> {
    let declared = content_type
        .ok_or_else(|| AppError::InvalidContentType("No content type declared".to_string()))?;
    let normalized = normalize_mime_type(declared);

    if !allowed_types
        .iter()
        .any(|ct| ct.as_ref().eq_ignore_ascii_case(&normalized))
    {
        return Err(AppError::InvalidContentType(format!(
            "{} is not one of: {}",
            declared,
            allowed_types
                .iter()
                .map(|ct| ct.as_ref())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(normalized)
}

/// File extension for a normalized MIME type: the subtype ("image/png" -> "png").
pub fn extension_for_content_type(content_type: &str) -> Result<&str, AppError> {
    match content_type.split_once('/') {
        Some((_, subtype))
            if !subtype.is_empty()
                && subtype
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '+') =>
        {
            Ok(subtype)
        }
        _ => Err(AppError::InvalidContentType(format!(
            "Cannot derive a file extension from {}",
            content_type
        ))),
    }
}

/// Turn axum's plain-text rejection (wrong content type, missing boundary)
/// into a `BadUpload` so it renders like every other upload failure.
pub fn accept_multipart(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Multipart, AppError> {
    multipart.map_err(|e| AppError::BadUpload(format!("Body is not multipart: {}", e.body_text())))
}

fn size_exceeded(field_name: &str, max_bytes: usize) -> AppError {
    AppError::BadUpload(format!(
        "Field '{}' exceeds maximum size of {} bytes",
        field_name, max_bytes
    ))
}

fn duplicate_field(field_name: &str) -> AppError {
    AppError::BadUpload(format!(
        "Multiple '{}' fields are not allowed",
        field_name
    ))
}

fn missing_field(field_name: &str) -> AppError {
    AppError::BadUpload(format!("No '{}' field provided", field_name))
}

async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, AppError> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadUpload(format!("Failed to read multipart: {}", e)))
}

async fn next_chunk(field: &mut Field<'_>) -> Result<Option<Bytes>, AppError> {
    field
        .chunk()
        .await
        .map_err(|e| AppError::BadUpload(format!("Failed to read file data: {}", e)))
}

/// Read exactly one file field into memory.
///
/// Other fields are skipped. The declared content type is checked against
/// `allowed_types` before any of the field's bytes are read.
pub async fn read_form_file<S: AsRef<str>>(
    mut multipart: Multipart,
    field_name: &str,
    max_bytes: usize,
    allowed_types: &[S],
) -> Result<UploadedFile, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(mut field) = next_field(&mut multipart).await? {
        if field.name() != Some(field_name) {
            continue;
        }
        if upload.is_some() {
            return Err(duplicate_field(field_name));
        }

        let content_type = validate_content_type(field.content_type(), allowed_types)?;

        let mut buffer = BytesMut::new();
        while let Some(chunk) = next_chunk(&mut field).await? {
            if buffer.len() + chunk.len() > max_bytes {
                return Err(size_exceeded(field_name, max_bytes));
            }
            buffer.extend_from_slice(&chunk);
        }

        upload = Some(UploadedFile {
            bytes: buffer.freeze(),
            content_type,
        });
    }

    upload.ok_or_else(|| missing_field(field_name))
}

/// Stream exactly one file field into a fresh `tubely-upload-*.mp4` file under `temp_dir`.
///
/// Same contract as [`read_form_file`]; the data never sits in memory as a whole.
/// A partly written file is removed when the upload is rejected.
pub async fn spool_form_file<S: AsRef<str>>(
    mut multipart: Multipart,
    field_name: &str,
    max_bytes: usize,
    allowed_types: &[S],
    temp_dir: &Path,
) -> Result<SpooledFile, AppError> {
    let mut upload: Option<SpooledFile> = None;

    while let Some(mut field) = next_field(&mut multipart).await? {
        if field.name() != Some(field_name) {
            continue;
        }
        if upload.is_some() {
            return Err(duplicate_field(field_name));
        }

        validate_content_type(field.content_type(), allowed_types)?;

        let temp = tempfile::Builder::new()
            .prefix("tubely-upload-")
            .suffix(".mp4")
            .tempfile_in(temp_dir)
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {}", e)))?;
        let handle = temp
            .reopen()
            .map_err(|e| AppError::Internal(format!("Failed to open temp file: {}", e)))?;
        let mut writer = tokio::fs::File::from_std(handle);

        let mut size: u64 = 0;
        while let Some(chunk) = next_chunk(&mut field).await? {
            size += chunk.len() as u64;
            if size > max_bytes as u64 {
                return Err(size_exceeded(field_name, max_bytes));
            }
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to write temp file: {}", e)))?;
        }
        writer
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to flush temp file: {}", e)))?;

        tracing::debug!(
            path = %temp.path().display(),
            size_bytes = size,
            "Upload spooled to disk"
        );

        upload = Some(SpooledFile { file: temp, size });
    }

    upload.ok_or_else(|| missing_field(field_name))
}
