//! Loading images from disk or memory, with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Load and decode the image at `path`.
///
/// The format is detected from the file contents, not the extension.
/// EXIF orientation is applied so the returned pixels are upright.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read,
/// `DecodeError::InvalidFormat` if the contents are not a recognized image,
/// and `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn load_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    decode_bytes(&bytes)
}

/// Decode an in-memory image file, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw encoded file bytes (JPEG, PNG, ...)
///
/// # Returns
///
/// A `DecodedImage` with RGB pixel data and correct orientation applied.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Extract EXIF orientation from encoded image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 10) as u8, (y * 10) as u8, 200])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    /// Encode a JPEG carrying an EXIF Orientation tag in an APP1 segment.
    fn encode_jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        let mut jpeg = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut jpeg, ImageFormat::Jpeg)
            .unwrap();
        let jpeg = jpeg.into_inner();

        let field = exif::Field {
            tag: Tag::Orientation,
            ifd_num: In::PRIMARY,
            value: exif::Value::Short(vec![orientation]),
        };
        let mut writer = exif::experimental::Writer::new();
        writer.push_field(&field);
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).unwrap();

        let mut app1 = b"Exif\0\0".to_vec();
        app1.extend_from_slice(&tiff.into_inner());
        let segment_len = u16::try_from(app1.len() + 2).unwrap();

        // SOI, then APP1, then the rest of the encoded stream
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_decode_valid_png() {
        let img = decode_bytes(&encode_png(4, 3)).unwrap();

        assert_eq!(img.width, 4);
        assert_eq!(img.height, 3);
        assert_eq!(img.pixels.len(), 4 * 3 * 3);
        assert_eq!(img.pixel(2, 1), [20, 10, 200]);
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_bytes(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(16, 16);
        let result = decode_bytes(&png[..40]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_image(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        std::fs::write(&path, encode_png(8, 5)).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!((img.width, img.height), (8, 5));
    }

    #[test]
    fn test_load_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actually_png.jpg");
        std::fs::write(&path, encode_png(3, 2)).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        assert_eq!(extract_orientation(&encode_png(2, 2)), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_from_jpeg() {
        let jpeg = encode_jpeg_with_orientation(16, 8, 6);
        assert_eq!(extract_orientation(&jpeg), Orientation::Rotate90CW);
    }

    #[test]
    fn test_load_applies_exif_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotated.jpg");
        std::fs::write(&path, encode_jpeg_with_orientation(32, 16, 6)).unwrap();

        let img = load_image(&path).unwrap();

        // Stored landscape, displayed portrait
        assert_eq!((img.width, img.height), (16, 32));
        // Left (red) half of the stored image ends up on top after a clockwise turn
        let [r, _, b] = img.pixel(8, 2);
        assert!(r > 200 && b < 60, "top pixel {:?}", img.pixel(8, 2));
        let [r, _, b] = img.pixel(8, 29);
        assert!(b > 200 && r < 60, "bottom pixel {:?}", img.pixel(8, 29));
    }

    #[test]
    fn test_load_normal_orientation_keeps_dimensions() {
        let img = decode_bytes(&encode_jpeg_with_orientation(32, 16, 1)).unwrap();
        assert_eq!((img.width, img.height), (32, 16));
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::Rotate90CW).into_rgb8();

        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb_img = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let img = DynamicImage::ImageRgb8(rgb_img);

        let result = apply_orientation(img, Orientation::FlipHorizontal).into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
