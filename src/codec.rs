use std::{fs, io::Cursor, path::Path};

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageFormat, ImageResult, RgbImage};

use crate::error::{Error, Result};

pub const DEFAULT_QUALITY: u8 = 60;

/// Reads an image, detecting the format from its contents.
pub fn decode(path: &Path) -> Result<DynamicImage> {
    let decode_error = |source: image::ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = image::io::Reader::open(path)
        .map_err(|e| decode_error(e.into()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.into()))?;
    let img = reader.decode().map_err(decode_error)?;

    log::debug!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img)
}

/// Writes `img` to `path`. JPEG destinations use `quality`, everything else
/// uses the format implied by the extension. Nothing is written unless
/// encoding succeeds.
pub fn encode(path: &Path, img: &RgbImage, quality: u8) -> Result<()> {
    write_image(path, img, quality).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_image(path: &Path, img: &RgbImage, quality: u8) -> ImageResult<()> {
    let format = ImageFormat::from_path(path)?;
    let mut buf = Cursor::new(Vec::new());

    if format == ImageFormat::Jpeg {
        log::debug!("Encoding JPEG at quality {}", quality);
        JpegEncoder::new_with_quality(&mut buf, quality).encode_image(img)?;
    } else {
        img.write_to(&mut buf, format)?;
    }

    Ok(fs::write(path, buf.into_inner())?)
}

#[cfg(test)]
mod tests {
    use std::env;

    use image::Rgb;

    use super::*;

    fn noise(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let n = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)).wrapping_mul(2_654_435_761);
            Rgb([(n >> 8) as u8, (n >> 16) as u8, (n >> 24) as u8])
        })
    }

    #[test]
    fn missing_source_is_a_decode_error() {
        let path = env::temp_dir().join("image-backdrop-does-not-exist.png");
        assert!(matches!(decode(&path), Err(Error::Decode { .. })));
    }

    #[test]
    fn unknown_extension_is_an_encode_error() {
        let path = env::temp_dir().join("image-backdrop-output.unknownext");
        let img = RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]));
        assert!(matches!(encode(&path, &img, DEFAULT_QUALITY), Err(Error::Encode { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        // DDS is recognised by extension but has no encoder.
        let path = env::temp_dir().join(format!("image-backdrop-{}.dds", std::process::id()));
        let img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        assert!(matches!(encode(&path, &img, DEFAULT_QUALITY), Err(Error::Encode { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn writes_jpeg_with_quality() {
        let low = env::temp_dir().join(format!("image-backdrop-{}-q10.jpg", std::process::id()));
        let high = env::temp_dir().join(format!("image-backdrop-{}-q95.jpg", std::process::id()));
        let img = noise(64, 64);
        encode(&low, &img, 10).unwrap();
        encode(&high, &img, 95).unwrap();

        let decoded = decode(&high).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 64));

        let low_size = fs::metadata(&low).unwrap().len();
        let high_size = fs::metadata(&high).unwrap().len();
        assert!(high_size > low_size, "q95 {high_size} bytes, q10 {low_size} bytes");

        let _ = fs::remove_file(&low);
        let _ = fs::remove_file(&high);
    }
}
