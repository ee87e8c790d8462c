//! Inheritance model: coefficient tables, random draws and the blending engine

/// Child feature prediction from two parents
pub mod blending;
/// Versioned configuration with validation
pub mod config;
/// Seedable random draws and clipped weight distributions
pub mod sampling;
/// Heritability and Mendelian probability tables
pub mod tables;
