//! Command-line interface for predicting a child record and reference image

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analysis::detector::{FaceMesh, PrecomputedDetector, image_fingerprint};
use crate::analysis::features::{ChildFeatureSet, ParentFeatureSet};
use crate::genetics::config::GeneticsConfig;
use crate::io::configuration::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_ALPHA, DEFAULT_FEATURES_OUTPUT, DEFAULT_MORPH_OUTPUT,
    DEFAULT_SEED, SEAM_ITERATIONS,
};
use crate::io::error::{Parent, Result};
use crate::io::image::{load_parent_image, save_png};
use crate::io::json::{read_json, write_json};
use crate::io::progress::StageProgress;
use crate::morph::MorphConfig;
use crate::pipeline::{Pipeline, PipelineOutcome, ReferenceImage};

#[derive(Parser, Debug)]
#[command(name = "kinmorph")]
#[command(
    author,
    version,
    about = "Predict a child's facial features and a morphed reference image from two parents"
)]
/// Command-line arguments for a single prediction run
pub struct Cli {
    /// Image of the first parent
    #[arg(value_name = "PARENT_A")]
    pub parent_a: PathBuf,

    /// Image of the second parent
    #[arg(value_name = "PARENT_B")]
    pub parent_b: PathBuf,

    /// Face mesh JSON for the first parent: faces of normalized [x, y, z] points
    #[arg(long, value_name = "JSON")]
    pub mesh_a: PathBuf,

    /// Face mesh JSON for the second parent
    #[arg(long, value_name = "JSON")]
    pub mesh_b: PathBuf,

    /// Output path for the morphed reference PNG
    #[arg(short, long, default_value = DEFAULT_MORPH_OUTPUT)]
    pub output: PathBuf,

    /// Output path for the child feature record
    #[arg(short, long, default_value = DEFAULT_FEATURES_OUTPUT)]
    pub features: PathBuf,

    /// Random seed for reproducible predictions
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Weight of parent A in the morph colour mix
    #[arg(short, long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Side length of the square reference image
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    /// Genetics configuration JSON overriding the built-in tables
    #[arg(short, long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and lower logging to warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Morph settings derived from the arguments
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero size or an out-of-range alpha
    pub fn morph_config(&self) -> Result<MorphConfig> {
        let (width, height) = self
            .size
            .map_or((CANVAS_WIDTH, CANVAS_HEIGHT), |side| (side, side));
        let config = MorphConfig {
            width,
            height,
            alpha: self.alpha,
            seam_iterations: SEAM_ITERATIONS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Genetics configuration from `--config`, or the built-in tables
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn genetics_config(&self) -> Result<GeneticsConfig> {
        self.config
            .as_deref()
            .map_or_else(|| Ok(GeneticsConfig::default()), GeneticsConfig::from_path)
    }
}

/// Child record written next to the reference image
#[derive(Debug, Serialize)]
pub struct ChildReport<'a> {
    /// Version tag of the genetics tables used
    pub genetics_version: &'a str,
    /// Seed the prediction was drawn with
    pub seed: u64,
    /// First parent's analysed features
    pub parent_a: &'a ParentFeatureSet,
    /// Second parent's analysed features
    pub parent_b: &'a ParentFeatureSet,
    /// Predicted child features
    pub child: &'a ChildFeatureSet,
    /// Path of the reference image, when one was produced
    pub reference_image: Option<&'a Path>,
    /// Human-readable recoverable conditions
    pub degradations: Vec<String>,
}

/// Runs one prediction from command-line arguments to files on disk
pub struct RunProcessor {
    cli: Cli,
    progress: StageProgress,
}

impl RunProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            StageProgress::new()
        } else {
            StageProgress::hidden()
        };
        Self { cli, progress }
    }

    fn load_meshes(path: &Path, parent: Parent) -> Result<Vec<FaceMesh>> {
        let faces: Vec<FaceMesh> = read_json(path)?;
        info!(%parent, faces = faces.len(), path = %path.display(), "loaded face mesh");
        Ok(faces)
    }

    /// Run the prediction and write its outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An argument or the genetics configuration is invalid
    /// - An image or mesh file cannot be read or decoded
    /// - Either parent has no usable face
    /// - An output file cannot be written
    pub fn process(&mut self) -> Result<PipelineOutcome> {
        let genetics = self.cli.genetics_config()?;
        let morph = self.cli.morph_config()?;

        let image_a = load_parent_image(&self.cli.parent_a, Parent::A)?;
        let image_b = load_parent_image(&self.cli.parent_b, Parent::B)?;
        let faces_a = Self::load_meshes(&self.cli.mesh_a, Parent::A)?;
        let faces_b = Self::load_meshes(&self.cli.mesh_b, Parent::B)?;
        let mut detector = PrecomputedDetector::new().with(&image_a, faces_a);
        // Meshes are keyed by pixels, so identical images share one entry
        if image_fingerprint(&image_a) == image_fingerprint(&image_b) {
            warn!("parent images are identical, analysing both with parent A's mesh");
        } else {
            detector.register(&image_b, faces_b);
        }

        let pipeline = Pipeline::new(detector, &genetics, morph);
        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        let progress = &mut self.progress;
        let outcome = pipeline.run_observed(&image_a, &image_b, &mut rng, |stage| {
            progress.start(stage);
        })?;
        self.progress.finish();

        for degradation in &outcome.degradations {
            warn!(%degradation, "prediction degraded");
        }

        let reference_path = match &outcome.reference {
            ReferenceImage::Available(result) => {
                save_png(&result.image, &self.cli.output)?;
                info!(path = %self.cli.output.display(), "wrote reference image");
                Some(self.cli.output.as_path())
            }
            ReferenceImage::Unavailable(_) => None,
        };

        let report = ChildReport {
            genetics_version: &genetics.version,
            seed: self.cli.seed,
            parent_a: &outcome.parent_a,
            parent_b: &outcome.parent_b,
            child: &outcome.child,
            reference_image: reference_path,
            degradations: outcome.degradations.iter().map(ToString::to_string).collect(),
        };
        write_json(&report, &self.cli.features)?;
        info!(path = %self.cli.features.display(), "wrote child record");

        Ok(outcome)
    }
}
