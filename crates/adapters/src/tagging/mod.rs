use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::experimental::Writer;
use exif::{Exif, Field, In, Reader, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageDecoder, ImageEncoder, ImageFormat, ImageReader};
use lillio_download_application::{ApplicationError, ExifTagger};
use tracing::debug;

pub const DEFAULT_JPEG_QUALITY: u8 = 75;

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Re-encodes images with their EXIF date tags replaced. Other primary-IFD tags of an
/// existing EXIF block are carried over.
#[derive(Debug, Clone)]
pub struct ExifDateTagger {
    jpeg_quality: u8,
}

impl Default for ExifDateTagger {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExifDateTagger {
    pub fn with_jpeg_quality(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }
}

impl ExifTagger for ExifDateTagger {
    fn write_capture_date(&self, path: &Path, timestamp: &str) -> Result<(), ApplicationError> {
        let reader = ImageReader::open(path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Io(error.to_string()))?;
        let format = reader.format().ok_or_else(|| {
            ApplicationError::Decode(format!("unrecognized image format: {}", path.display()))
        })?;

        let mut decoder = reader
            .into_decoder()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        let existing = decoder
            .exif_metadata()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        let image = DynamicImage::from_decoder(decoder)
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        let exif = build_exif(existing.as_deref(), timestamp)?;
        let encoded = encode_with_exif(&image, format, exif, self.jpeg_quality)?;
        fs::write(path, encoded).map_err(|error| ApplicationError::Io(error.to_string()))?;

        debug!(path = %path.display(), ?format, timestamp, "rewrote EXIF date tags");
        Ok(())
    }
}

fn build_exif(existing: Option<&[u8]>, timestamp: &str) -> Result<Vec<u8>, ApplicationError> {
    let (retained, little_endian) = match existing.map(read_existing) {
        Some(Ok(exif)) => (
            exif.fields()
                .filter(|field| carries_over(field))
                .cloned()
                .collect::<Vec<_>>(),
            exif.little_endian(),
        ),
        Some(Err(error)) => {
            debug!(%error, "discarding unreadable EXIF block");
            (Vec::new(), true)
        }
        None => (Vec::new(), true),
    };

    let dates: Vec<Field> = DATE_TAGS
        .iter()
        .map(|&tag| Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![timestamp.as_bytes().to_vec()]),
        })
        .collect();

    let mut writer = Writer::new();
    for field in retained.iter().chain(&dates) {
        writer.push_field(field);
    }

    let mut buffer = Cursor::new(Vec::new());
    writer
        .write(&mut buffer, little_endian)
        .map_err(|error| ApplicationError::Decode(format!("failed to encode EXIF: {error}")))?;
    Ok(buffer.into_inner())
}

fn read_existing(raw: &[u8]) -> Result<Exif, exif::Error> {
    let tiff = raw.strip_prefix(EXIF_HEADER).unwrap_or(raw);
    Reader::new().read_raw(tiff.to_vec())
}

fn carries_over(field: &Field) -> bool {
    field.ifd_num == In::PRIMARY
        && !DATE_TAGS.contains(&field.tag)
        && !matches!(field.value, Value::Unknown(..))
}

fn encode_with_exif(
    image: &DynamicImage,
    format: ImageFormat,
    exif: Vec<u8>,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ApplicationError> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality);
            encoder
                .set_exif_metadata(exif)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?;
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        }
        ImageFormat::Png => {
            let mut encoder = PngEncoder::new(&mut buffer);
            encoder
                .set_exif_metadata(exif)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?;
            image
                .write_with_encoder(encoder)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        }
        ImageFormat::WebP => {
            let mut encoder = WebPEncoder::new_lossless(&mut buffer);
            encoder
                .set_exif_metadata(exif)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?;
            let image = if image.color().has_alpha() {
                DynamicImage::ImageRgba8(image.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(image.to_rgb8())
            };
            image
                .write_with_encoder(encoder)
                .map_err(|error| ApplicationError::Decode(error.to_string()))?;
        }
        other => {
            return Err(ApplicationError::Decode(format!(
                "{other:?} images cannot carry EXIF metadata"
            )));
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;

    use image::{ImageBuffer, Rgb, Rgba};
    use tempfile::TempDir;

    use super::*;

    const STAMP: &str = "2024:09:06 00:00:00";

    fn ascii(exif: &Exif, tag: Tag) -> Option<Vec<u8>> {
        match &exif.get_field(tag, In::PRIMARY)?.value {
            Value::Ascii(values) => values.first().cloned(),
            _ => None,
        }
    }

    fn read_jpeg_exif(path: &Path) -> Exif {
        let file = File::open(path).expect("open");
        Reader::new()
            .read_from_container(&mut BufReader::new(file))
            .expect("exif")
    }

    fn jpeg_with_make(path: &Path, make: &str) {
        let fields = [
            Field {
                tag: Tag::Make,
                ifd_num: In::PRIMARY,
                value: Value::Ascii(vec![make.as_bytes().to_vec()]),
            },
            Field {
                tag: Tag::DateTimeOriginal,
                ifd_num: In::PRIMARY,
                value: Value::Ascii(vec![b"1999:12:31 23:59:59".to_vec()]),
            },
        ];
        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).expect("write exif");

        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, 90);
        encoder
            .set_exif_metadata(tiff.into_inner())
            .expect("exif supported");
        let image = ImageBuffer::from_fn(40, 20, |_x, _y| Rgb([200_u8, 120_u8, 40_u8]));
        DynamicImage::ImageRgb8(image)
            .write_with_encoder(encoder)
            .expect("encode");
        fs::write(path, bytes).expect("write jpeg");
    }

    #[test]
    fn writes_all_three_date_tags_into_a_bare_jpeg() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("2024-09-06.jpg");
        let img = ImageBuffer::from_fn(32, 16, |_x, _y| Rgb([10_u8, 20_u8, 30_u8]));
        img.save(&path).expect("save");

        ExifDateTagger::default()
            .write_capture_date(&path, STAMP)
            .expect("tag");

        let exif = read_jpeg_exif(&path);
        for tag in DATE_TAGS {
            assert_eq!(ascii(&exif, tag), Some(STAMP.as_bytes().to_vec()), "tag {tag}");
        }
        assert_eq!(image::image_dimensions(&path).expect("dimensions"), (32, 16));
    }

    #[test]
    fn keeps_unrelated_tags_and_replaces_old_dates() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("camera.jpg");
        jpeg_with_make(&path, "Lillio");

        ExifDateTagger::with_jpeg_quality(90)
            .write_capture_date(&path, STAMP)
            .expect("tag");

        let exif = read_jpeg_exif(&path);
        assert_eq!(ascii(&exif, Tag::Make), Some(b"Lillio".to_vec()));
        assert_eq!(
            ascii(&exif, Tag::DateTimeOriginal),
            Some(STAMP.as_bytes().to_vec())
        );
        assert!(!exif.little_endian());
    }

    #[test]
    fn tags_png_files() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("2024-09-06.png");
        let img = ImageBuffer::from_fn(8, 8, |x, _y| Rgba([x as u8, 0_u8, 0_u8, 128_u8]));
        img.save(&path).expect("save");

        ExifDateTagger::default()
            .write_capture_date(&path, STAMP)
            .expect("tag");

        let mut decoder = ImageReader::open(&path)
            .expect("open")
            .with_guessed_format()
            .expect("format")
            .into_decoder()
            .expect("decoder");
        let raw = decoder
            .exif_metadata()
            .expect("read exif")
            .expect("exif present");
        let exif = read_existing(&raw).expect("parse exif");
        assert_eq!(ascii(&exif, Tag::DateTime), Some(STAMP.as_bytes().to_vec()));
    }

    #[test]
    fn tags_webp_files_with_alpha() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("2024-09-06.webp");
        let img = ImageBuffer::from_fn(8, 8, |_x, y| Rgba([0_u8, y as u8, 200_u8, 64_u8]));
        img.save(&path).expect("save");

        ExifDateTagger::default()
            .write_capture_date(&path, STAMP)
            .expect("tag");

        let mut decoder = ImageReader::open(&path)
            .expect("open")
            .with_guessed_format()
            .expect("format")
            .into_decoder()
            .expect("decoder");
        assert!(decoder.color_type().has_alpha());
        let raw = decoder
            .exif_metadata()
            .expect("read exif")
            .expect("exif present");
        let exif = read_existing(&raw).expect("parse exif");
        for tag in DATE_TAGS {
            assert_eq!(ascii(&exif, tag), Some(STAMP.as_bytes().to_vec()), "tag {tag}");
        }
    }

    #[test]
    fn non_image_content_fails_and_is_left_alone() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("2024-09-06.jpg");
        fs::write(&path, b"<html>not an image</html>").expect("write");

        let result = ExifDateTagger::default().write_capture_date(&path, STAMP);

        assert!(result.is_err());
        assert_eq!(
            fs::read(&path).expect("read"),
            b"<html>not an image</html>"
        );
    }

    #[test]
    fn formats_without_exif_support_fail_and_are_left_alone() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("2024-09-06.gif");
        let img = ImageBuffer::from_fn(4, 4, |_x, _y| Rgba([1_u8, 2_u8, 3_u8, 255_u8]));
        img.save(&path).expect("save");
        let before = fs::read(&path).expect("read");

        let result = ExifDateTagger::default().write_capture_date(&path, STAMP);

        assert!(matches!(result, Err(ApplicationError::Decode(_))));
        assert_eq!(fs::read(&path).expect("read"), before);
    }
}
