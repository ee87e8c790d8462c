/// Command-line arguments and the run processor
pub mod cli;
/// Compile-time defaults
pub mod configuration;
/// Crate error type and parent attribution
pub mod error;
/// Image loading and PNG export
pub mod image;
/// JSON reading and writing
pub mod json;
/// Stage progress display
pub mod progress;
