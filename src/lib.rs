//! Child face prediction from two parent portraits
//!
//! Each parent image is reduced to facial landmarks, geometry metrics, skin
//! colour and trait categories. A genetics-inspired model blends the two
//! records into a predicted child record, and a Delaunay morph warps both
//! parents onto the child landmark layout to produce a reference image.

#![forbid(unsafe_code)]

/// Landmark detection, geometry metrics and trait classification
pub mod analysis;
/// Heritability tables, random draws and the blending engine
pub mod genetics;
/// Points, triangulation, affine maps and pixel masks
pub mod geometry;
/// Command-line front end, file formats, progress display and error handling
pub mod io;
/// Triangulated morphing and seam smoothing
pub mod morph;
/// Stage sequencing from parent images to child record and reference image
pub mod pipeline;

pub use io::error::{KinError, Parent, Result};
pub use pipeline::{Degradation, Pipeline, PipelineOutcome, ReferenceImage, decode_image};
