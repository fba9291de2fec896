use image::{DynamicImage, ImageBuffer, Pixel, Rgb, RgbImage, Rgba};
use rayon::prelude::*;

use crate::{
    color::Color,
    error::{Error, Result},
    opacity::Opacity,
};

/// Blends one foreground pixel over an opaque background color.
///
/// The requested opacity is attenuated by the foreground's own alpha, so a
/// fully transparent pixel leaves the background untouched.
pub fn merge_colors(foreground: &Rgba<u8>, background: &Rgb<u8>, opacity: Opacity) -> Rgb<u8> {
    let factor = opacity.value() * (foreground.0[3] as f64 / 255.0);

    // Nothing to mix at either end.
    if factor <= 0.0 {
        return *background;
    }
    if factor >= 1.0 {
        return Rgb([foreground.0[0], foreground.0[1], foreground.0[2]]);
    }

    let map_channel = |fg: u8, bg: u8| round_channel(bg as f64 * (1.0 - factor) + fg as f64 * factor);

    Rgb([
        map_channel(foreground.0[0], background.0[0]),
        map_channel(foreground.0[1], background.0[1]),
        map_channel(foreground.0[2], background.0[2]),
    ])
}

/// Round half up, clamped into a channel.
fn round_channel(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Composites `foreground` over a canvas filled with `background`.
///
/// Works for any 8-bit pixel type; pixels without alpha are treated as fully
/// opaque. The result is flattened RGB with the foreground's dimensions.
/// Rows are blended in parallel.
pub fn blend<P>(
    background: Color,
    opacity: Opacity,
    foreground: &ImageBuffer<P, Vec<u8>>,
) -> Result<RgbImage>
where
    P: Pixel<Subpixel = u8> + Sync,
{
    let (width, height) = foreground.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    let background = background.to_rgb();
    let mut out = RgbImage::new(width, height);
    let row_len = width as usize * 3;

    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let fg = foreground.get_pixel(x as u32, y as u32).to_rgba();
                px.copy_from_slice(&merge_colors(&fg, &background, opacity).0);
            }
        });

    Ok(out)
}

/// Blends a decoded image, keeping its alpha channel only when it has one.
pub fn blend_dynamic(
    background: Color,
    opacity: Opacity,
    foreground: &DynamicImage,
) -> Result<RgbImage> {
    match foreground {
        DynamicImage::ImageRgb8(buf) => blend(background, opacity, buf),
        DynamicImage::ImageRgba8(buf) => blend(background, opacity, buf),
        other if other.color().has_alpha() => blend(background, opacity, &other.to_rgba8()),
        other => blend(background, opacity, &other.to_rgb8()),
    }
}
