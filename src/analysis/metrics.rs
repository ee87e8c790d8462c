//! Facial geometry metrics from canonical landmarks
//!
//! Every metric is a Euclidean distance or ratio between fixed mesh indices,
//! measured in pixels of the analysed image.

use serde::{Deserialize, Serialize};

use crate::analysis::features::Measurements;
use crate::analysis::landmarks::{
    CHIN, FOREHEAD_TOP, LEFT_CHEEK, LEFT_EYE_BOTTOM, LEFT_EYE_INNER, LEFT_EYE_OUTER, LEFT_EYE_TOP,
    LEFT_EYEBROW_INNER, LEFT_JAW, LOWER_LIP_BOTTOM, MOUTH_LEFT, MOUTH_RIGHT, NOSE_BRIDGE_TOP,
    NOSE_LEFT, NOSE_RIGHT, NOSE_TIP, RIGHT_CHEEK, RIGHT_EYE_BOTTOM, RIGHT_EYE_INNER,
    RIGHT_EYE_OUTER, RIGHT_EYE_TOP, RIGHT_EYEBROW_INNER, RIGHT_JAW, UPPER_LIP_TOP,
};
use crate::geometry::Point;
use crate::io::configuration::{DOUBLE_EYELID_FACTOR, RATIO_EPSILON};

/// Measurements of one face plus the double-eyelid heuristic
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryMetrics {
    /// Continuous measurements
    pub measurements: Measurements,
    /// Whether the brow sits high enough above the lid to suggest a crease
    pub double_eyelid: bool,
}

impl GeometryMetrics {
    /// Face width over face height
    pub fn face_ratio(&self) -> f64 {
        self.measurements.face_width / (self.measurements.face_height + RATIO_EPSILON)
    }

    /// Nose width over face width
    pub fn nose_ratio(&self) -> f64 {
        self.measurements.nose_width / (self.measurements.face_width + RATIO_EPSILON)
    }
}

/// Tunables for metric computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricOptions {
    /// Brow-to-lid distance over eye height above which a double eyelid is assumed
    pub double_eyelid_factor: f64,
}

impl Default for MetricOptions {
    fn default() -> Self {
        Self {
            double_eyelid_factor: DOUBLE_EYELID_FACTOR,
        }
    }
}

/// Compute metrics from pixel-space landmarks
///
/// `px` resolves a canonical index to pixel coordinates; callers guarantee
/// every referenced index exists.
pub fn compute_metrics(px: impl Fn(usize) -> Point, options: &MetricOptions) -> GeometryMetrics {
    let left_eye_center = px(LEFT_EYE_INNER).midpoint(&px(LEFT_EYE_OUTER));
    let right_eye_center = px(RIGHT_EYE_INNER).midpoint(&px(RIGHT_EYE_OUTER));
    let interpupillary = right_eye_center.distance(&left_eye_center);

    let face_height = px(CHIN).distance(&px(FOREHEAD_TOP));
    let face_width = px(RIGHT_CHEEK).distance(&px(LEFT_CHEEK));

    let nose_tip = px(NOSE_TIP);
    let nose_bridge = px(NOSE_BRIDGE_TOP);
    let nose_length = nose_tip.distance(&nose_bridge);
    let nose_width = px(NOSE_RIGHT).distance(&px(NOSE_LEFT));
    let nose_bridge_height = (nose_bridge.y - nose_tip.y).abs();

    let left_eye_h = px(LEFT_EYE_TOP).distance(&px(LEFT_EYE_BOTTOM));
    let left_eye_w = px(LEFT_EYE_OUTER).distance(&px(LEFT_EYE_INNER));
    let right_eye_h = px(RIGHT_EYE_TOP).distance(&px(RIGHT_EYE_BOTTOM));
    let right_eye_w = px(RIGHT_EYE_OUTER).distance(&px(RIGHT_EYE_INNER));
    let eye_ratio = f64::midpoint(
        left_eye_h / (left_eye_w + RATIO_EPSILON),
        right_eye_h / (right_eye_w + RATIO_EPSILON),
    );
    let eye_height = f64::midpoint(left_eye_h, right_eye_h);

    let mouth_width = px(MOUTH_RIGHT).distance(&px(MOUTH_LEFT));
    let lip_thickness = px(LOWER_LIP_BOTTOM).distance(&px(UPPER_LIP_TOP));

    let jaw_width = px(RIGHT_JAW).distance(&px(LEFT_JAW));

    let left_brow_eye = px(LEFT_EYEBROW_INNER).distance(&px(LEFT_EYE_TOP));
    let right_brow_eye = px(RIGHT_EYEBROW_INNER).distance(&px(RIGHT_EYE_TOP));
    let double_eyelid =
        f64::midpoint(left_brow_eye, right_brow_eye) > eye_height * options.double_eyelid_factor;

    GeometryMetrics {
        measurements: Measurements {
            interpupillary,
            face_width,
            face_height,
            nose_width,
            nose_length,
            nose_bridge_height,
            eye_height,
            eye_ratio,
            mouth_width,
            lip_thickness,
            jaw_width,
        },
        double_eyelid,
    }
}
