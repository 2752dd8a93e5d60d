//! Profile photo pipeline: size check, decode, downsample to fit 300x300, JPEG re-encode,
//! data URI.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};
use thiserror::Error;
use tracing::debug;

pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;
pub const MAX_WIDTH: u32 = 300;
pub const MAX_HEIGHT: u32 = 300;
pub const JPEG_QUALITY: u8 = 70;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("File size too big. Please choose an image under 4MB.")]
    TooLarge { bytes: usize },

    #[error("Could not read the image: {0}")]
    Decode(String),

    #[error("Could not compress the image: {0}")]
    Encode(String),
}

/// Target size for a `width`x`height` image: the longer side is clamped to its limit and
/// the other side scaled by the same factor, truncated. Images already inside the box
/// keep their size.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let (mut w, mut h) = (width as f64, height as f64);
    if w > h {
        if w > max_w as f64 {
            h *= max_w as f64 / w;
            w = max_w as f64;
        }
    } else if h > max_h as f64 {
        w *= max_h as f64 / h;
        h = max_h as f64;
    }
    ((w as u32).max(1), (h as u32).max(1))
}

/// Turns an uploaded file into the data URI stored as `personal.photo`.
/// CPU bound; run it off the async runtime.
pub fn process_upload(bytes: &[u8]) -> Result<String, PhotoError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(PhotoError::TooLarge { bytes: bytes.len() });
    }

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PhotoError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| PhotoError::Decode(e.to_string()))?;

    let (w, h) = img.dimensions();
    let (tw, th) = fit_within(w, h, MAX_WIDTH, MAX_HEIGHT);
    let resized = if (tw, th) == (w, h) {
        img.to_rgb8()
    } else {
        img.resize_exact(tw, th, FilterType::Triangle).to_rgb8()
    };

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(|e| PhotoError::Encode(e.to_string()))?;

    debug!(
        "Photo processed: {w}x{h} -> {tw}x{th}, {} bytes JPEG",
        jpeg.len()
    );
    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn decoded_size(data_uri: &str) -> (u32, u32) {
        let b64 = data_uri
            .strip_prefix("data:image/jpeg;base64,")
            .expect("not a jpeg data uri");
        let bytes = BASE64.decode(b64).unwrap();
        image::load_from_memory(&bytes).unwrap().dimensions()
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(1200, 600, 300, 300), (300, 150));
        assert_eq!(fit_within(600, 1200, 300, 300), (150, 300));
        assert_eq!(fit_within(1000, 1000, 300, 300), (300, 300));
        assert_eq!(fit_within(200, 100, 300, 300), (200, 100));
        assert_eq!(fit_within(1000, 333, 300, 300), (300, 99));
    }

    #[test]
    fn test_wide_upload_is_stored_at_300_by_150() {
        let uri = process_upload(&png(1200, 600)).unwrap();
        assert_eq!(decoded_size(&uri), (300, 150));
    }

    #[test]
    fn test_small_upload_keeps_size() {
        let uri = process_upload(&png(120, 80)).unwrap();
        assert_eq!(decoded_size(&uri), (120, 80));
    }

    #[test]
    fn test_oversized_file_rejected_before_decode() {
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = process_upload(&bytes).unwrap_err();
        assert!(matches!(err, PhotoError::TooLarge { .. }));
        assert_eq!(
            err.to_string(),
            "File size too big. Please choose an image under 4MB."
        );
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = process_upload(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PhotoError::Decode(_)));
    }
}
