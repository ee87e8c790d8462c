//! Float RGB canvases and conversions to and from 8-bit images

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ndarray::{Array3, Zip};

/// Row-major `height x width x 3` float image in the 0..255 range
pub type Canvas = Array3<f32>;

/// Convert an 8-bit image into a float canvas
pub fn to_canvas(image: &RgbImage) -> Canvas {
    let (width, height) = image.dimensions();
    Canvas::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        image
            .get_pixel_checked(x as u32, y as u32)
            .and_then(|pixel| pixel.0.get(c))
            .map_or(0.0, |&v| f32::from(v))
    })
}

/// Round and saturate one channel value to 8 bits
pub fn quantize(value: f32) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

/// Convert a float canvas back to an 8-bit image, saturating out-of-range values
pub fn to_image(canvas: &Canvas) -> RgbImage {
    let (height, width, _) = canvas.dim();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        Rgb([0, 1, 2].map(|c| canvas.get((y, x, c)).map_or(0, |&v| quantize(v))))
    })
}

/// Bilinear resize to the target size; a no-op copy when sizes already match
pub fn resize(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, FilterType::Triangle)
    }
}

/// `alpha * first + (1 - alpha) * second`, element-wise
///
/// Both canvases must share one shape; a mismatch returns `first` unchanged.
pub fn weighted_blend(first: &Canvas, second: &Canvas, alpha: f32) -> Canvas {
    if first.dim() != second.dim() {
        return first.clone();
    }
    let mut blended = Canvas::zeros(first.dim());
    Zip::from(&mut blended)
        .and(first)
        .and(second)
        .for_each(|out, &a, &b| *out = alpha.mul_add(a - b, b));
    blended
}
