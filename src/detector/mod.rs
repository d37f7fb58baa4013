//! EAN-8 symbol detection on a binarized scanline
//!
//! - Module width estimation from bar run lengths
//! - Resampling pixels to one bit per module
//! - Guard structure location and segment extraction

/// Module width estimation
pub mod module_width;
/// Pixel-to-module resampling
pub mod resample;
/// Guard structure location and segment extraction
pub mod structure;
