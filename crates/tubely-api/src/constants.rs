//! API path constants

/// API base path prefix
pub const API_BASE: &str = "/api";

/// Mount point of the local asset directory
pub const ASSETS_PATH: &str = "/assets";

/// Body allowance on top of the file bound for multipart framing and other fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Public URL of a memory-strategy thumbnail.
pub fn thumbnail_url(public_base_url: &str, video_id: uuid::Uuid) -> String {
    format!(
        "{}{}/thumbnails/{}",
        public_base_url.trim_end_matches('/'),
        API_BASE,
        video_id
    )
}
