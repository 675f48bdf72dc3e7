/// Multipart field carrying the thumbnail image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart field carrying the video file.
pub const VIDEO_FIELD: &str = "video";

/// The only accepted media type for video uploads.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Issuer claim required on access tokens.
pub const TOKEN_ISSUER: &str = "tubely-access";

pub const BYTES_PER_MB: usize = 1024 * 1024;
