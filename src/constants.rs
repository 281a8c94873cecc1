use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Largest accepted upload, enforced again by the multipart field limit.
pub const MAX_IMAGE_BYTES: usize = 1024 * 1024;

/// Quality used when thumbnails are re-encoded as JPEG.
pub const JPEG_QUALITY: u8 = 80;
