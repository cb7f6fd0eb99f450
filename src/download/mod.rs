//! Report downloads
//!
//! Streams a completed report from its pre-signed URL to a local file.

mod downloader;
mod naming;

pub use downloader::Downloader;
pub use naming::{format_size, sanitize_filename};
