pub mod thumbnails;
pub mod videos;

pub use thumbnails::{Thumbnail, ThumbnailCache};
pub use videos::fetch_owned_video;
