//! Canonical face-mesh numbering
//!
//! Indices follow the 478-point refined face mesh (468 surface points plus
//! ten iris points). Only the points named here are consumed by the crate.

/// Inner corner of the left eye
pub const LEFT_EYE_INNER: usize = 133;
/// Outer corner of the left eye
pub const LEFT_EYE_OUTER: usize = 33;
/// Upper lid of the left eye
pub const LEFT_EYE_TOP: usize = 159;
/// Lower lid of the left eye
pub const LEFT_EYE_BOTTOM: usize = 145;
/// Inner corner of the right eye
pub const RIGHT_EYE_INNER: usize = 362;
/// Outer corner of the right eye
pub const RIGHT_EYE_OUTER: usize = 263;
/// Upper lid of the right eye
pub const RIGHT_EYE_TOP: usize = 386;
/// Lower lid of the right eye
pub const RIGHT_EYE_BOTTOM: usize = 374;

/// Inner end of the left eyebrow
pub const LEFT_EYEBROW_INNER: usize = 107;
/// Inner end of the right eyebrow
pub const RIGHT_EYEBROW_INNER: usize = 336;

/// Nose tip
pub const NOSE_TIP: usize = 1;
/// Top of the nose bridge, between the eyes
pub const NOSE_BRIDGE_TOP: usize = 6;
/// Left alar point
pub const NOSE_LEFT: usize = 129;
/// Right alar point
pub const NOSE_RIGHT: usize = 358;

/// Left mouth corner
pub const MOUTH_LEFT: usize = 61;
/// Right mouth corner
pub const MOUTH_RIGHT: usize = 291;
/// Inner edge of the upper lip
pub const UPPER_LIP_TOP: usize = 13;
/// Inner edge of the lower lip
pub const LOWER_LIP_BOTTOM: usize = 14;

/// Lowest point of the chin
pub const CHIN: usize = 152;
/// Top of the forehead on the face oval
pub const FOREHEAD_TOP: usize = 10;
/// Leftmost cheek point on the face oval
pub const LEFT_CHEEK: usize = 234;
/// Rightmost cheek point on the face oval
pub const RIGHT_CHEEK: usize = 454;
/// Left jaw angle
pub const LEFT_JAW: usize = 172;
/// Right jaw angle
pub const RIGHT_JAW: usize = 397;

/// Four points bounding the left cheek sampling area
pub const LEFT_CHEEK_QUAD: [usize; 4] = [50, 101, 118, 117];
/// Four points bounding the right cheek sampling area
pub const RIGHT_CHEEK_QUAD: [usize; 4] = [280, 330, 347, 346];

/// Morphing subset, ordered: face oval, eyebrows, eyes, nose, mouth
pub const MORPH_INDICES: [usize; 76] = [
    // Face oval
    10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378, 400, 377, 152,
    148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67, 109,
    // Eyebrows
    107, 66, 105, 63, 70, 336, 296, 334, 293, 300,
    // Eyes
    33, 160, 158, 133, 153, 144, 362, 385, 387, 263, 373, 380,
    // Nose
    1, 2, 98, 327, 129, 358,
    // Mouth
    61, 39, 37, 0, 267, 269, 291, 405, 314, 17, 84, 181,
];

/// Minimum mesh length needed by the metric formulas
pub const REQUIRED_LANDMARKS: usize = RIGHT_CHEEK + 1;
