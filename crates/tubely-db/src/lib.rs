//! Tubely database layer
//!
//! The video record store. Records are created elsewhere in the platform; the
//! upload endpoints only read them and attach asset URLs.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
