//! Landmark detector seam
//!
//! The crate never runs a neural detector itself. Callers construct a
//! [`LandmarkDetector`] once per process and hand it to the extractor, which
//! owns it for its whole lifetime. Detectors must be shareable across threads:
//! backends that cannot run concurrent inference are wrapped in
//! [`SerializedDetector`], which admits one call at a time.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

/// One landmark in normalized image coordinates (`x`, `y` in `[0, 1]`, relative depth `z`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct MeshPoint {
    /// Horizontal position as a fraction of image width
    pub x: f64,
    /// Vertical position as a fraction of image height
    pub y: f64,
    /// Depth relative to the face centre
    pub z: f64,
}

impl MeshPoint {
    /// Create a mesh point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for MeshPoint {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<MeshPoint> for [f64; 3] {
    fn from(p: MeshPoint) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Landmarks of a single detected face in canonical mesh order
pub type FaceMesh = Vec<MeshPoint>;

/// Facial landmark detector configured for refined eye landmarks
pub trait LandmarkDetector: Send + Sync {
    /// Detect faces in an RGB image, most confident first
    ///
    /// An empty result means no face was found.
    fn detect(&self, image: &RgbImage) -> Vec<FaceMesh>;
}

/// Serializes access to a detector that is not safe for concurrent inference
pub struct SerializedDetector<D> {
    inner: Mutex<D>,
}

impl<D> SerializedDetector<D> {
    /// Wrap a detector behind a lock
    pub const fn new(detector: D) -> Self {
        Self {
            inner: Mutex::new(detector),
        }
    }
}

/// Detector backends that need exclusive access for each inference call
pub trait ExclusiveDetector: Send {
    /// Detect faces, with exclusive access to the backend
    fn detect_exclusive(&mut self, image: &RgbImage) -> Vec<FaceMesh>;
}

impl<D: ExclusiveDetector> LandmarkDetector for SerializedDetector<D> {
    fn detect(&self, image: &RgbImage) -> Vec<FaceMesh> {
        // A poisoned lock only means another caller panicked mid-inference
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.detect_exclusive(image)
    }
}

/// Stable fingerprint of an image's dimensions and pixels
pub fn image_fingerprint(image: &RgbImage) -> u64 {
    let mut hasher = DefaultHasher::new();
    image.width().hash(&mut hasher);
    image.height().hash(&mut hasher);
    image.as_raw().hash(&mut hasher);
    hasher.finish()
}

/// Serves landmark meshes computed ahead of time, keyed by image content
///
/// Images that were never registered report no face.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedDetector {
    meshes: HashMap<u64, Vec<FaceMesh>>,
}

impl PrecomputedDetector {
    /// Create an empty lookup detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the faces to report for an image
    pub fn register(&mut self, image: &RgbImage, faces: Vec<FaceMesh>) {
        self.meshes.insert(image_fingerprint(image), faces);
    }

    /// Builder-style registration
    #[must_use]
    pub fn with(mut self, image: &RgbImage, faces: Vec<FaceMesh>) -> Self {
        self.register(image, faces);
        self
    }
}

impl LandmarkDetector for PrecomputedDetector {
    fn detect(&self, image: &RgbImage) -> Vec<FaceMesh> {
        self.meshes
            .get(&image_fingerprint(image))
            .cloned()
            .unwrap_or_default()
    }
}
