//! Skin colour sampling in LAB space
//!
//! Colours use the 8-bit LAB convention common to imaging libraries: L is
//! rescaled from `0..=100` to `0..=255` and both chroma axes are offset by 128.

use image::RgbImage;

use crate::analysis::features::SkinColor;
use crate::geometry::Point;
use crate::io::configuration::SKIN_SAMPLE_RADIUS;

// D65 reference white
const WHITE_X: f64 = 0.950_456;
const WHITE_Z: f64 = 1.088_754;

const LAB_THRESHOLD: f64 = 0.008_856;

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_THRESHOLD {
        t.cbrt()
    } else {
        7.787f64.mul_add(t, 16.0 / 116.0)
    }
}

/// Convert one sRGB pixel to 8-bit LAB
pub fn rgb_to_lab(rgb: [u8; 3]) -> SkinColor {
    let [r, g, b] = rgb.map(srgb_to_linear);

    let x = 0.412_453f64.mul_add(r, 0.357_580f64.mul_add(g, 0.180_423 * b)) / WHITE_X;
    let y = 0.212_671f64.mul_add(r, 0.715_160f64.mul_add(g, 0.072_169 * b));
    let z = 0.019_334f64.mul_add(r, 0.119_193f64.mul_add(g, 0.950_227 * b)) / WHITE_Z;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    let l = if y > LAB_THRESHOLD {
        116.0f64.mul_add(fy, -16.0)
    } else {
        903.3 * y
    };

    SkinColor::new(
        l * 255.0 / 100.0,
        500.0f64.mul_add(fx - fy, 128.0),
        200.0f64.mul_add(fy - fz, 128.0),
    )
}

/// Mean LAB colour of the square window around `(cx, cy)`, clipped to the image
///
/// Returns `None` when the clipped window is empty.
pub fn window_mean(image: &RgbImage, cx: i64, cy: i64, radius: i64) -> Option<SkinColor> {
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    let x0 = (cx - radius).max(0);
    let x1 = (cx + radius + 1).min(w);
    let y0 = (cy - radius).max(0);
    let y1 = (cy + radius + 1).min(h);

    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(pixel) = image.get_pixel_checked(x as u32, y as u32) {
                let lab = rgb_to_lab(pixel.0).channels();
                for (acc, v) in sum.iter_mut().zip(lab) {
                    *acc += v;
                }
                count += 1;
            }
        }
    }

    (count > 0).then(|| {
        let n = count as f64;
        SkinColor::new(sum[0] / n, sum[1] / n, sum[2] / n)
    })
}

/// Sample skin colour from cheek quads given in pixel coordinates
///
/// Each quad's centre is the integer mean of its integer vertex positions.
/// Falls back to [`SkinColor::default`] when no window yields a sample.
pub fn sample_skin(image: &RgbImage, quads: &[[Point; 4]]) -> SkinColor {
    let samples: Vec<SkinColor> = quads
        .iter()
        .filter_map(|quad| {
            let xs: i64 = quad.iter().map(|p| p.x as i64).sum();
            let ys: i64 = quad.iter().map(|p| p.y as i64).sum();
            let cx = (xs as f64 / 4.0) as i64;
            let cy = (ys as f64 / 4.0) as i64;
            window_mean(image, cx, cy, SKIN_SAMPLE_RADIUS)
        })
        .collect();

    if samples.is_empty() {
        return SkinColor::default();
    }

    let n = samples.len() as f64;
    let mut mean = [0.0; 3];
    for sample in &samples {
        for (acc, v) in mean.iter_mut().zip(sample.channels()) {
            *acc += v / n;
        }
    }
    SkinColor::from(mean)
}
