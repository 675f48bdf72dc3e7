#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};

/// 8-byte PNG signature plus padding; handlers never decode images.
pub fn png_bytes() -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0u8; 56]);
    data
}

/// A few bytes standing in for an MP4; the fake media tool never parses them.
pub fn mp4_bytes() -> Vec<u8> {
    let mut data = b"\x00\x00\x00\x18ftypmp42".to_vec();
    data.extend_from_slice(b"mdat-before-moov");
    data
}

pub fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(data)
            .file_name("thumbnail.png")
            .mime_type(mime_type),
    )
}

pub fn video_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "video",
        Part::bytes(data).file_name("boots.mp4").mime_type(mime_type),
    )
}
