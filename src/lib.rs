//! ean8_scan - EAN-8 barcode decoding from binarized scanlines
//!
//! The decode pipeline runs on one horizontal row of 0/255 pixels:
//! module width estimation, resampling to modules, guard structure location,
//! digit decoding against the L/R code tables, and check digit validation.
//! Grayscale conversion, binarization and image I/O live in [`utils`] and
//! [`tools`] as an outer layer the pipeline never depends on.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Digit decoding, code tables, checksum, errors and configuration
pub mod decoder;
/// Module width estimation, resampling and guard location
pub mod detector;
/// Digits to modules to pixels, for synthetic symbols
pub mod encoder;
/// Core data structures (Segment, DecodedDigits, layout constants)
pub mod models;
/// Image loading/saving and dataset iteration
pub mod tools;
/// Grayscale conversion and binarization
pub mod utils;

pub use decoder::config::ScanConfig;
pub use decoder::error::{DecodeError, ErrorKind, Result};
pub use models::{DecodedDigits, ScanReport, Segment};

use decoder::digit::DigitDecoder;
use detector::module_width::ModuleWidthEstimator;
use detector::resample::Resampler;
use detector::structure::SegmentExtractor;
use rayon::prelude::*;
use tracing::debug;
use utils::binarization::{otsu_threshold, threshold_binarize};
use utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};

/// Intermediate results of one pass over a scanline
struct RowDecode {
    module_width: usize,
    start: usize,
    digits: DecodedDigits,
}

fn run_pipeline(row: &[u8]) -> Result<RowDecode> {
    if row.is_empty() {
        return Err(DecodeError::InvalidInput {
            reason: "empty scanline",
        });
    }

    let module_width = ModuleWidthEstimator::estimate(row);
    debug!(pixels = row.len(), module_width, "estimated module width");

    let bits = Resampler::resample(row, module_width)?;
    debug!(modules = bits.len(), "resampled scanline");

    let segment = SegmentExtractor::extract(bits)?;
    let digits = DigitDecoder::decode(&segment)?;
    debug!(%digits, checksum_valid = digits.checksum_valid, "decoded digits");

    Ok(RowDecode {
        module_width,
        start: segment.start(),
        digits,
    })
}

/// Decode a binarized scanline (0 = bar, non-zero = space)
///
/// Fails with [`DecodeError::ChecksumMismatch`] when the check digit disagrees.
pub fn decode_row(row: &[u8]) -> Result<DecodedDigits> {
    decode_row_lenient(row)?.verified()
}

/// Decode a binarized scanline, reporting the checksum verdict instead of failing on it
pub fn decode_row_lenient(row: &[u8]) -> Result<DecodedDigits> {
    run_pipeline(row).map(|decoded| decoded.digits)
}

/// Decode independent scanlines in parallel; results keep the input order
pub fn decode_rows(rows: &[&[u8]]) -> Vec<Result<DecodedDigits>> {
    rows.par_iter().map(|row| decode_row(row)).collect()
}

/// Scan a grayscale image with the `EAN8_*` environment configuration
pub fn scan_grayscale(gray: &[u8], width: usize, height: usize) -> Result<ScanReport> {
    Scanner::from_env().scan_grayscale(gray, width, height)
}

/// Scan an RGB image with the `EAN8_*` environment configuration
pub fn scan_rgb(rgb: &[u8], width: usize, height: usize) -> Result<ScanReport> {
    Scanner::from_env().scan_rgb(rgb, width, height)
}

/// Image scanner: picks a row, binarizes it and runs the decode pipeline
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Scanner with Otsu thresholding on the middle row
    pub fn new() -> Self {
        Self::default()
    }

    /// Scanner configured from the environment
    pub fn from_env() -> Self {
        Self::with_config(ScanConfig::from_env())
    }

    /// Scanner with an explicit configuration
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan a grayscale image (1 byte per pixel, row-major)
    ///
    /// The threshold is computed over the whole image, then only the selected
    /// row is binarized and decoded.
    pub fn scan_grayscale(&self, gray: &[u8], width: usize, height: usize) -> Result<ScanReport> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidInput {
                reason: "image has no pixels",
            });
        }
        if gray.len() != width * height {
            return Err(DecodeError::InvalidInput {
                reason: "buffer length does not match dimensions",
            });
        }

        let threshold = self.config.threshold.unwrap_or_else(|| otsu_threshold(gray));
        let row = self.config.resolve_row(height);
        debug!(threshold, row, width, height, "scanning grayscale image");

        let scanline = threshold_binarize(&gray[row * width..(row + 1) * width], threshold);
        let decoded = run_pipeline(&scanline)?;

        Ok(ScanReport {
            row,
            threshold,
            module_width: decoded.module_width,
            start: decoded.start,
            digits: decoded.digits.verified()?,
        })
    }

    /// Scan an RGB image (3 bytes per pixel)
    pub fn scan_rgb(&self, rgb: &[u8], width: usize, height: usize) -> Result<ScanReport> {
        if rgb.len() != width * height * 3 {
            return Err(DecodeError::InvalidInput {
                reason: "buffer length does not match dimensions",
            });
        }
        let gray = if width >= 800 || height >= 800 {
            rgb_to_grayscale_parallel(rgb, width, height)
        } else {
            rgb_to_grayscale(rgb, width, height)
        };
        self.scan_grayscale(&gray, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_modules, render_image, render_scanline};

    fn scanline(digits: &[u8; 8], module_width: usize) -> Vec<u8> {
        render_scanline(&encode_modules(digits).unwrap(), module_width, 9)
    }

    #[test]
    fn test_decode_row() {
        for module_width in 1..=4 {
            let row = scanline(&[9, 6, 3, 8, 5, 0, 7, 4], module_width);
            let decoded = decode_row(&row).unwrap();
            assert_eq!(decoded.digits, [9, 6, 3, 8, 5, 0, 7, 4]);
            assert!(decoded.checksum_valid);
        }
    }

    #[test]
    fn test_checksum_mismatch() {
        let row = scanline(&[4, 0, 0, 9, 6, 5, 7, 2], 3);

        let lenient = decode_row_lenient(&row).unwrap();
        assert_eq!(lenient.digits, [4, 0, 0, 9, 6, 5, 7, 2]);
        assert!(!lenient.checksum_valid);

        assert_eq!(
            decode_row(&row),
            Err(DecodeError::ChecksumMismatch {
                digits: [4, 0, 0, 9, 6, 5, 7, 2],
                expected: 5,
            })
        );
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(decode_row(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
        // No bars at all: module width cannot be determined
        assert_eq!(
            decode_row(&[255u8; 300]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_structure_not_found() {
        let row: Vec<u8> = (0..210).map(|i| if i % 3 == 2 { 255 } else { 0 }).collect();
        assert_eq!(
            decode_row(&row).unwrap_err().kind(),
            ErrorKind::StructureNotFound
        );
    }

    #[test]
    fn test_decode_failure() {
        // Alternating bars and spaces line up with every guard but no digit
        let row: Vec<u8> = (0..200).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
        assert_eq!(
            decode_row(&row),
            Err(DecodeError::DecodeFailure {
                position: 0,
                pattern: 0b0101010,
            })
        );
    }

    #[test]
    fn test_decode_rows_keeps_order() {
        let good = scanline(&[9, 6, 3, 8, 5, 0, 7, 4], 2);
        let other = scanline(&[4, 0, 0, 9, 6, 5, 7, 5], 2);
        let blank = vec![255u8; 100];
        let rows = vec![good.as_slice(), blank.as_slice(), other.as_slice()];

        let results = decode_rows(&rows);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().digits, [9, 6, 3, 8, 5, 0, 7, 4]);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().digits, [4, 0, 0, 9, 6, 5, 7, 5]);
    }

    #[test]
    fn test_scan_grayscale_with_soft_levels() {
        let (pixels, width, height) = render_image(&[9, 6, 3, 8, 5, 0, 7, 4], 3, 10, 20).unwrap();
        // Washed-out print: bars at 40, paper at 210
        let gray: Vec<u8> = pixels.iter().map(|&p| if p == 0 { 40 } else { 210 }).collect();

        let report = Scanner::new().scan_grayscale(&gray, width, height).unwrap();
        assert_eq!(report.row, 10);
        assert_eq!(report.module_width, 3);
        assert_eq!(report.start, 10);
        assert!(report.threshold >= 40 && report.threshold < 210);
        assert_eq!(report.digits.to_string(), "96385074");
    }

    #[test]
    fn test_scan_grayscale_config() {
        let (mut pixels, width, height) = render_image(&[9, 6, 3, 8, 5, 0, 7, 4], 2, 10, 6).unwrap();
        // Blank out every row but the first
        pixels[width..].fill(255);

        assert!(Scanner::new().scan_grayscale(&pixels, width, height).is_err());

        let scanner = Scanner::with_config(ScanConfig::default().with_row(0).with_threshold(128));
        let report = scanner.scan_grayscale(&pixels, width, height).unwrap();
        assert_eq!(report.row, 0);
        assert_eq!(report.threshold, 128);
        assert_eq!(report.digits.digits, [9, 6, 3, 8, 5, 0, 7, 4]);
    }

    #[test]
    fn test_scan_bad_dimensions() {
        let scanner = Scanner::new();
        assert!(matches!(
            scanner.scan_grayscale(&[0u8; 10], 3, 3),
            Err(DecodeError::InvalidInput { .. })
        ));
        assert!(matches!(
            scanner.scan_grayscale(&[], 0, 0),
            Err(DecodeError::InvalidInput { .. })
        ));
        assert!(matches!(
            scanner.scan_rgb(&[0u8; 10], 2, 2),
            Err(DecodeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_scan_rgb() {
        let (pixels, width, height) = render_image(&[4, 0, 0, 9, 6, 5, 7, 5], 2, 10, 5).unwrap();
        let rgb: Vec<u8> = pixels.iter().flat_map(|&p| [p, p, p]).collect();
        let report = Scanner::new().scan_rgb(&rgb, width, height).unwrap();
        assert_eq!(report.digits.digits, [4, 0, 0, 9, 6, 5, 7, 5]);
    }
}
