//! Tests for gradient-domain seam smoothing

#[cfg(test)]
mod tests {
    use kinmorph::geometry::Point;
    use kinmorph::morph::canvas::Canvas;
    use kinmorph::morph::seam::{SeamBlend, SeamSkipReason, SeamSolver};

    const SOLVER: SeamSolver = SeamSolver {
        iterations: 150,
        relaxation: 1.8,
    };

    fn square(lo: f64, hi: f64) -> Vec<Point> {
        vec![
            Point::new(lo, lo),
            Point::new(hi, lo),
            Point::new(hi, hi),
            Point::new(lo, hi),
        ]
    }

    // Tests a constant offset inside the face is pulled to the background
    // Verified by starting the solve from the background only
    #[test]
    fn test_offset_removed() {
        let mut composite = Canvas::from_elem((16, 16, 3), 200.0);
        let background = Canvas::from_elem((16, 16, 3), 100.0);
        let outcome = SOLVER.blend(&mut composite, &background, &square(3.0, 12.0));

        assert!(matches!(outcome, SeamBlend::Applied { pixels } if pixels == 100));
        assert!(composite.iter().all(|&v| (v - 100.0).abs() < 0.5));
    }

    // Tests matching gradients and boundary leave the image unchanged
    // Verified by dropping the guidance term
    #[test]
    fn test_consistent_gradient_kept() {
        let ramp = Canvas::from_shape_fn((20, 20, 3), |(y, x, c)| (x * 5 + y * 3 + c) as f32);
        let mut composite = ramp.clone();
        let outcome = SOLVER.blend(&mut composite, &ramp, &square(2.0, 17.0));

        assert!(matches!(outcome, SeamBlend::Applied { .. }));
        for (got, want) in composite.iter().zip(ramp.iter()) {
            assert!((got - want).abs() < 0.01);
        }
    }

    // Tests interior detail survives while its level follows the background
    // Verified by copying the background over the whole region
    #[test]
    fn test_detail_preserved() {
        let background = Canvas::from_elem((24, 24, 3), 80.0);
        let mut composite = Canvas::from_elem((24, 24, 3), 180.0);
        for c in 0..3 {
            composite[(12, 12, c)] = 220.0;
        }
        SOLVER.blend(&mut composite, &background, &square(4.0, 19.0));

        let peak = composite[(12, 12, 0)];
        let beside = composite[(12, 10, 0)];
        assert!(peak - beside > 20.0, "peak {peak} beside {beside}");
        assert!(beside < 130.0);
    }

    // Tests pixels outside the hull take the background
    // Verified by leaving the composite outside the mask
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_outside_is_background() {
        let mut composite = Canvas::from_elem((16, 16, 3), 10.0);
        let background = Canvas::from_elem((16, 16, 3), 90.0);
        SOLVER.blend(&mut composite, &background, &square(5.0, 10.0));
        assert_eq!(composite[(1, 1, 0)], 90.0);
        assert_eq!(composite[(15, 15, 2)], 90.0);
    }

    // Tests unusable inputs skip smoothing and keep the composite
    // Verified by solving on a mismatched background
    #[test]
    fn test_skip_reasons() {
        let background = Canvas::from_elem((10, 10, 3), 50.0);
        let original = Canvas::from_elem((10, 10, 3), 70.0);

        let mut composite = original.clone();
        let small = Canvas::from_elem((5, 10, 3), 50.0);
        assert_eq!(
            SOLVER.blend(&mut composite, &small, &square(2.0, 7.0)),
            SeamBlend::Skipped(SeamSkipReason::ShapeMismatch)
        );

        let line = [Point::new(1.0, 1.0), Point::new(5.0, 5.0), Point::new(8.0, 8.0)];
        assert_eq!(
            SOLVER.blend(&mut composite, &background, &line),
            SeamBlend::Skipped(SeamSkipReason::DegenerateHull { vertices: 2 })
        );

        let sliver = [Point::new(0.1, 0.1), Point::new(0.4, 0.1), Point::new(0.1, 0.4)];
        assert_eq!(
            SOLVER.blend(&mut composite, &background, &sliver),
            SeamBlend::Skipped(SeamSkipReason::EmptyMask)
        );
        assert_eq!(composite, original);
    }

    // Tests skip reasons render readable text
    // Verified by printing debug names
    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SeamSkipReason::DegenerateHull { vertices: 1 }.to_string(),
            "face hull has 1 vertices, need at least 3"
        );
        assert_eq!(SeamSkipReason::Disabled.to_string(), "seam smoothing disabled");
    }
}
