pub mod articles;
pub mod auth;
pub mod certificates;
pub mod project_categories;
pub mod projects;
pub mod tags;

use crate::constants::MAX_IMAGE_BYTES;
use crate::domain::validation::FormValidator;
use crate::infrastructure::media::UploadedImage;

/// Normalized list-endpoint inputs. Pagination stays off unless the caller
/// sent both `page` and `limit`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: String,
}

#[derive(Debug)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Checks an uploaded image against the size cap and the PNG/JPEG sniff,
/// pushing field errors instead of failing fast.
pub(crate) fn check_image(
    validator: &mut FormValidator,
    image: Option<UploadedImage>,
    required: bool,
) -> Option<UploadedImage> {
    let Some(image) = image else {
        if required {
            validator.push("image", "Image is required");
        }
        return None;
    };
    if image.data.len() > MAX_IMAGE_BYTES {
        validator.push("image", "Image must not exceed 1 MB");
        return None;
    }
    if image.kind().is_none() {
        validator.push("image", "Image must be a PNG or JPEG file");
        return None;
    }
    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_upload(bytes: Vec<u8>) -> UploadedImage {
        UploadedImage {
            data: bytes,
            file_name: "shot.png".to_string(),
        }
    }

    fn tiny_png() -> Vec<u8> {
        let mut img = image::RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn missing_image_is_an_error_only_when_required() {
        let mut v = FormValidator::new();
        assert!(check_image(&mut v, None, false).is_none());
        assert!(v.is_valid());

        let mut v = FormValidator::new();
        assert!(check_image(&mut v, None, true).is_none());
        assert!(!v.is_valid());
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut v = FormValidator::new();
        let upload = png_upload(vec![0u8; MAX_IMAGE_BYTES + 1]);
        assert!(check_image(&mut v, Some(upload), true).is_none());
        assert!(!v.is_valid());
    }

    #[test]
    fn non_image_bytes_are_rejected() {
        let mut v = FormValidator::new();
        let upload = png_upload(b"definitely not a picture".to_vec());
        assert!(check_image(&mut v, Some(upload), true).is_none());
        assert!(!v.is_valid());
    }

    #[test]
    fn valid_png_passes_through() {
        let mut v = FormValidator::new();
        let upload = png_upload(tiny_png());
        assert!(check_image(&mut v, Some(upload), true).is_some());
        assert!(v.is_valid());
    }
}
