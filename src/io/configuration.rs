//! Pipeline constants and runtime configuration defaults

// Output canvas shared by the morphing engine and the CLI
/// Default reference image width in pixels
pub const CANVAS_WIDTH: u32 = 512;
/// Default reference image height in pixels
pub const CANVAS_HEIGHT: u32 = 512;

/// Default weight of parent A in colour mixing
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Gauss-Seidel sweeps for the seam smoothing solve
pub const SEAM_ITERATIONS: usize = 150;
/// Over-relaxation factor for the seam smoothing solve
pub const SEAM_RELAXATION: f32 = 1.8;

// Guards against division by zero in ratio metrics
/// Epsilon added to ratio denominators
pub const RATIO_EPSILON: f64 = 1e-6;

/// Brow-to-eyelid distance over eye height above which a double eyelid is assumed
pub const DOUBLE_EYELID_FACTOR: f64 = 1.8;

/// Half-width of the square cheek sampling window (5x5 pixels)
pub const SKIN_SAMPLE_RADIUS: i64 = 2;

/// Heritability used when a trait is missing from the table
pub const DEFAULT_HERITABILITY: f64 = 0.5;
/// Mendelian probability used when a trait is missing from the table
pub const DEFAULT_MENDELIAN_PROBABILITY: f64 = 0.5;

/// Version tag of the built-in genetics tables
pub const GENETICS_CONFIG_VERSION: &str = "2024.1";

/// Fixed seed for reproducible runs
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Default reference image file name
pub const DEFAULT_MORPH_OUTPUT: &str = "morph.png";
/// Default child record file name
pub const DEFAULT_FEATURES_OUTPUT: &str = "child.json";
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
