//! Image preprocessing ahead of the decoder
//!
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Binarization (Otsu's method and fixed threshold) into 0/255 scanlines

pub mod binarization;
pub mod grayscale;
