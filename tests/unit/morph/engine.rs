//! Tests for the triangulated morph and its fallbacks

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use kinmorph::geometry::{LandmarkSet, Point};
    use kinmorph::morph::engine::{BOUNDARY_POINTS, boundary_points};
    use kinmorph::morph::{
        Composite, MorphConfig, MorphSource, MorphingEngine, SeamBlend, SeamSkipReason,
    };
    use kinmorph::{KinError, Parent};

    fn hexagon(cx: f64, cy: f64, r: f64) -> LandmarkSet {
        let mut points = vec![Point::new(cx, cy)];
        points.extend((0..6).map(|k| {
            let angle = f64::from(k) * std::f64::consts::PI / 3.0;
            Point::new(r.mul_add(angle.cos(), cx), r.mul_add(angle.sin(), cy))
        }));
        points.into()
    }

    fn engine(size: u32) -> MorphingEngine {
        MorphingEngine::new(MorphConfig {
            width: size,
            height: size,
            ..MorphConfig::default()
        })
    }

    // Tests boundary points sit on the canvas corners and edge midpoints
    // Verified by placing corners at width instead of width - 1
    #[test]
    fn test_boundary_points() {
        let points = boundary_points(512, 256);
        assert_eq!(points.len(), BOUNDARY_POINTS);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(256.0, 0.0));
        assert_eq!(points[4], Point::new(511.0, 128.0));
        assert_eq!(points[7], Point::new(511.0, 255.0));
    }

    // Tests configuration validation
    // Verified by accepting alpha above one
    #[test]
    fn test_config_validation() {
        assert!(MorphConfig::default().validate().is_ok());
        let bad_alpha = MorphConfig {
            alpha: -0.1,
            ..MorphConfig::default()
        };
        assert!(bad_alpha.validate().is_err());
        let empty = MorphConfig {
            width: 0,
            ..MorphConfig::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(KinError::InvalidParameter {
                parameter: "canvas",
                ..
            })
        ));
    }

    // Tests the child layout is triangulated together with the boundary
    // Verified by omitting the boundary points
    #[test]
    fn test_triangulated_morph() {
        let a = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 90]));
        let b = RgbImage::from_fn(64, 64, |x, y| Rgb([(y * 4) as u8, 30, (x * 4) as u8]));
        let la = hexagon(32.0, 32.0, 12.0);
        let lb = hexagon(30.0, 34.0, 14.0);
        let child = hexagon(31.0, 33.0, 13.0);

        let result = engine(64)
            .morph(
                MorphSource {
                    image: &a,
                    landmarks: &la,
                },
                MorphSource {
                    image: &b,
                    landmarks: &lb,
                },
                &child,
            )
            .unwrap();

        let n = child.len() + BOUNDARY_POINTS;
        assert_eq!(result.composite, Composite::Triangulated);
        assert!(result.triangles.len() >= n - 2);
        assert!(result.triangles.iter().flatten().all(|&i| i < n));
        assert_eq!(result.image.dimensions(), (64, 64));
        assert_eq!(result.skipped_triangles, 0);
        assert!(matches!(result.seam, SeamBlend::Applied { .. }));
    }

    // Tests flat parents give the flat colour mix everywhere
    // Verified by weighting parent B with alpha
    #[test]
    fn test_uniform_parents_blend_exactly() {
        let a = RgbImage::from_pixel(40, 40, Rgb([200, 0, 60]));
        let b = RgbImage::from_pixel(50, 50, Rgb([0, 0, 200]));
        let la = hexagon(20.0, 20.0, 8.0);
        let lb = hexagon(25.0, 25.0, 10.0);
        let config = MorphConfig {
            width: 32,
            height: 32,
            alpha: 0.75,
            ..MorphConfig::default()
        };

        let result = MorphingEngine::new(config)
            .morph(
                MorphSource {
                    image: &a,
                    landmarks: &la,
                },
                MorphSource {
                    image: &b,
                    landmarks: &lb,
                },
                &la,
            )
            .unwrap();

        assert!(result.image.pixels().all(|p| *p == Rgb([150, 0, 95])));
    }

    // Tests identical parents reproduce the parent image
    // Verified by sampling parent B at parent A's landmarks
    #[test]
    fn test_identical_parents() {
        let image = RgbImage::from_fn(48, 48, |x, y| Rgb([(x * 5) as u8, (y * 5) as u8, 128]));
        let landmarks = hexagon(24.0, 24.0, 10.0);
        let source = MorphSource {
            image: &image,
            landmarks: &landmarks,
        };
        let result = engine(48).morph(source, source, &landmarks).unwrap();

        let max_diff = result
            .image
            .pixels()
            .zip(image.pixels())
            .flat_map(|(p, q)| p.0.into_iter().zip(q.0).map(|(u, v)| u.abs_diff(v)))
            .max()
            .unwrap();
        assert!(max_diff <= 2, "max channel difference {max_diff}");
    }

    // Tests a one-pixel canvas falls back to the weighted blend
    // Verified by returning an error on empty triangulations
    #[test]
    fn test_fallback_blend() {
        let a = RgbImage::from_pixel(10, 10, Rgb([100, 100, 100]));
        let b = RgbImage::from_pixel(10, 10, Rgb([200, 50, 0]));
        let landmarks = hexagon(5.0, 5.0, 3.0);
        let result = engine(1)
            .morph(
                MorphSource {
                    image: &a,
                    landmarks: &landmarks,
                },
                MorphSource {
                    image: &b,
                    landmarks: &landmarks,
                },
                &landmarks,
            )
            .unwrap();

        assert_eq!(result.composite, Composite::FallbackBlend);
        assert!(result.triangles.is_empty());
        assert_eq!(
            result.seam,
            SeamBlend::Skipped(SeamSkipReason::NotTriangulated)
        );
        assert_eq!(*result.image.get_pixel(0, 0), Rgb([150, 75, 50]));
    }

    // Tests zero seam iterations disable smoothing
    // Verified by running one sweep regardless
    #[test]
    fn test_seam_disabled() {
        let image = RgbImage::from_pixel(20, 20, Rgb([9, 9, 9]));
        let landmarks = hexagon(10.0, 10.0, 5.0);
        let source = MorphSource {
            image: &image,
            landmarks: &landmarks,
        };
        let config = MorphConfig {
            width: 20,
            height: 20,
            seam_iterations: 0,
            ..MorphConfig::default()
        };
        let result = MorphingEngine::new(config)
            .morph(source, source, &landmarks)
            .unwrap();
        assert_eq!(result.seam, SeamBlend::Skipped(SeamSkipReason::Disabled));
    }

    // Tests child landmarks outside the canvas are clamped, not rejected
    // Verified by dropping out-of-canvas child points
    #[test]
    fn test_child_clamped() {
        let image = RgbImage::from_pixel(16, 16, Rgb([50, 60, 70]));
        let landmarks = hexagon(8.0, 8.0, 4.0);
        let wild: LandmarkSet = landmarks
            .iter()
            .map(|p| Point::new(p.x * 10.0 - 40.0, p.y))
            .collect::<Vec<_>>()
            .into();
        let source = MorphSource {
            image: &image,
            landmarks: &landmarks,
        };
        let result = engine(16).morph(source, source, &wild).unwrap();
        assert_eq!(result.image.dimensions(), (16, 16));
        assert!(result.image.pixels().all(|p| *p == Rgb([50, 60, 70])));
    }

    // Tests an empty parent image is a decode failure for that parent
    // Verified by resizing empty images
    #[test]
    fn test_empty_parent() {
        let image = RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]));
        let empty = RgbImage::new(0, 0);
        let landmarks = hexagon(4.0, 4.0, 2.0);
        let result = engine(8).morph(
            MorphSource {
                image: &image,
                landmarks: &landmarks,
            },
            MorphSource {
                image: &empty,
                landmarks: &landmarks,
            },
            &landmarks,
        );
        assert!(matches!(
            result,
            Err(KinError::DecodeFailure {
                parent: Parent::B,
                ..
            })
        ));
    }
}
