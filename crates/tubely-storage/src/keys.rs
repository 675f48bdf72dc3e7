//! Shared key generation for storage backends.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use uuid::Uuid;

/// Number of random bytes behind every video key token.
const VIDEO_TOKEN_BYTES: usize = 32;

/// Generate a fresh key for a processed video: `{prefix}/{token}.mp4`.
///
/// Uniqueness rests on the 256-bit random token; collisions are not checked.
pub fn video_key(prefix: &str) -> String {
    format!("{}/{}.mp4", prefix.trim_matches('/'), random_token())
}

/// Key for a video's thumbnail: `{video_id}.{ext}`.
///
/// Re-uploading a thumbnail for the same video overwrites the previous object.
pub fn thumbnail_key(video_id: Uuid, extension: &str) -> String {
    format!("{}.{}", video_id, extension)
}

fn random_token() -> String {
    let bytes: [u8; VIDEO_TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
