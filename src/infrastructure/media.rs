use std::io::Cursor;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use image::{codecs::jpeg::JpegEncoder, ImageFormat, ImageReader};
use tokio::fs;

use crate::constants::JPEG_QUALITY;
use crate::domain::identity::unique_millis;
use crate::errors::AppError;

/// Supported upload formats. Anything else is rejected at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Png => ".png",
            ImageKind::Jpeg => ".jpg",
        }
    }
}

/// One uploaded image, fully buffered in memory. Nothing touches the
/// media directory until validation has passed.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Vec<u8>,
    pub file_name: String,
}

impl UploadedImage {
    pub fn from_temp_file(file: TempFile) -> Result<Self, AppError> {
        let data = std::fs::read(file.file.path())?;
        Ok(UploadedImage {
            data,
            file_name: file.file_name.unwrap_or_default(),
        })
    }

    /// MIME sniff on the actual bytes; the client-declared content type is
    /// not trusted.
    pub fn kind(&self) -> Option<ImageKind> {
        match infer::get(&self.data).map(|t| t.mime_type()) {
            Some("image/png") => Some(ImageKind::Png),
            Some("image/jpeg") => Some(ImageKind::Jpeg),
            _ => None,
        }
    }
}

/// Filesystem store for uploaded images, one folder per resource kind
/// under `<root>/images/`. Stored paths are relative to `<root>` so they
/// can be served directly beneath the public `/images` prefix.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MediaStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-encodes the buffered image at a fixed quality and writes it to
    /// `images/<resource>/<millis><ext>`. Returns the relative path that
    /// gets persisted on the entity.
    pub async fn store(&self, resource: &str, image: &UploadedImage) -> Result<String, AppError> {
        let kind = image
            .kind()
            .ok_or_else(|| AppError::FileError("unsupported image format".into()))?;

        let encoded = reencode(&image.data, kind)?;

        let rel_dir = Path::new("images").join(resource);
        let dir = self.root.join(&rel_dir);
        fs::create_dir_all(&dir).await?;

        let file_name = format!("{}{}", unique_millis(), kind.extension());
        fs::write(dir.join(&file_name), encoded).await?;

        Ok(rel_dir.join(file_name).to_string_lossy().into_owned())
    }

    /// Deletes a previously stored file. A file that is already gone is
    /// logged and ignored; it must not block the surrounding operation.
    pub async fn remove(&self, rel_path: &str) -> Result<(), AppError> {
        let path = self.root.join(rel_path);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("stored file already missing: {}", path.display());
                Ok(())
            }
            Err(e) => Err(AppError::from(e)),
        }
    }

    /// Best-effort cleanup after a failed write path; errors are logged
    /// because the original failure is the one worth surfacing.
    pub async fn discard(&self, rel_path: &str) {
        if let Err(e) = self.remove(rel_path).await {
            tracing::error!("failed to clean up {}: {}", rel_path, e);
        }
    }
}

fn reencode(data: &[u8], kind: ImageKind) -> Result<Vec<u8>, AppError> {
    let decoded = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(AppError::from)?
        .decode()
        .map_err(|e| AppError::FileError(format!("image decode failed: {}", e)))?;

    let mut out = Vec::new();
    match kind {
        ImageKind::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            decoded
                .write_with_encoder(encoder)
                .map_err(|e| AppError::FileError(format!("image encode failed: {}", e)))?;
        }
        ImageKind::Png => {
            decoded
                .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
                .map_err(|e| AppError::FileError(format!("image encode failed: {}", e)))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(2, 2, image::Rgb([120, 30, 200]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn temp_store() -> MediaStore {
        let dir = std::env::temp_dir().join(format!("media-test-{}", uuid::Uuid::new_v4()));
        MediaStore::new(dir)
    }

    #[test]
    fn kind_is_sniffed_from_bytes_not_extension() {
        let upload = UploadedImage { data: png_bytes(), file_name: "photo.jpg".into() };
        assert_eq!(upload.kind(), Some(ImageKind::Png));

        let junk = UploadedImage { data: b"plain text".to_vec(), file_name: "a.png".into() };
        assert_eq!(junk.kind(), None);
    }

    #[actix_rt::test]
    async fn store_writes_under_resource_folder_and_remove_deletes() {
        let store = temp_store();
        let upload = UploadedImage { data: png_bytes(), file_name: "pic.png".into() };

        let rel = store.store("articles", &upload).await.unwrap();
        assert!(rel.starts_with("images/articles/"));
        assert!(rel.ends_with(".png"));
        assert!(store.root().join(&rel).is_file());

        store.remove(&rel).await.unwrap();
        assert!(!store.root().join(&rel).exists());
    }

    #[actix_rt::test]
    async fn removing_a_missing_file_is_a_no_op() {
        let store = temp_store();
        assert!(store.remove("images/articles/nope.png").await.is_ok());
    }

    #[actix_rt::test]
    async fn two_stores_in_same_millisecond_get_distinct_names() {
        let store = temp_store();
        let upload = UploadedImage { data: png_bytes(), file_name: "pic.png".into() };

        let first = store.store("projects", &upload).await.unwrap();
        let second = store.store("projects", &upload).await.unwrap();
        assert_ne!(first, second);
    }
}
