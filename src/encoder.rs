//! EAN-8 encoding: digits to modules to pixels
//!
//! The inverse of the decode pipeline. Used to build synthetic scanlines and
//! images for tests, benchmarks and the `render` command.

use crate::decoder::checksum::Checksum;
use crate::decoder::error::{DecodeError, Result};
use crate::decoder::tables::CodeSet;
use crate::models::layout::{
    DIGIT_MODULES, DIGITS_PER_SET, EAN8_DIGITS, EAN8_MODULES, EDGE_GUARD, MIDDLE_GUARD,
};

/// Pixel value of a bar
pub const BAR: u8 = 0;
/// Pixel value of a space
pub const SPACE: u8 = 255;

/// Module bitstream of the 8 digits (67 modules, true = bar)
///
/// The check digit is encoded as given, so invalid-checksum symbols can be built.
pub fn encode_modules(digits: &[u8; EAN8_DIGITS]) -> Result<Vec<bool>> {
    let mut modules = Vec::with_capacity(EAN8_MODULES);
    modules.extend_from_slice(&EDGE_GUARD);
    push_set(&mut modules, &digits[..DIGITS_PER_SET], CodeSet::Left)?;
    modules.extend_from_slice(&MIDDLE_GUARD);
    push_set(&mut modules, &digits[DIGITS_PER_SET..], CodeSet::Right)?;
    modules.extend_from_slice(&EDGE_GUARD);
    Ok(modules)
}

fn push_set(modules: &mut Vec<bool>, digits: &[u8], set: CodeSet) -> Result<()> {
    for &digit in digits {
        let pattern = set.pattern(digit).ok_or(DecodeError::InvalidInput {
            reason: "digit out of range 0-9",
        })?;
        for bit in (0..DIGIT_MODULES).rev() {
            modules.push((pattern >> bit) & 1 == 1);
        }
    }
    Ok(())
}

/// Append the check digit to a 7-digit payload
pub fn with_check_digit(payload: &[u8; EAN8_DIGITS - 1]) -> Result<[u8; EAN8_DIGITS]> {
    if payload.iter().any(|&d| d > 9) {
        return Err(DecodeError::InvalidInput {
            reason: "digit out of range 0-9",
        });
    }
    let mut digits = [0u8; EAN8_DIGITS];
    digits[..EAN8_DIGITS - 1].copy_from_slice(payload);
    digits[EAN8_DIGITS - 1] = Checksum::compute(payload);
    Ok(digits)
}

/// Expand modules into a pixel scanline, `quiet_modules` of white on both sides
pub fn render_scanline(modules: &[bool], module_width: usize, quiet_modules: usize) -> Vec<u8> {
    let quiet = quiet_modules * module_width;
    let mut row = Vec::with_capacity(modules.len() * module_width + 2 * quiet);
    row.resize(quiet, SPACE);
    for &bar in modules {
        let pixel = if bar { BAR } else { SPACE };
        row.extend(std::iter::repeat(pixel).take(module_width));
    }
    row.resize(row.len() + quiet, SPACE);
    row
}

/// Grayscale image of a symbol: every row is the same scanline
///
/// Returns `(pixels, width, height)`.
pub fn render_image(
    digits: &[u8; EAN8_DIGITS],
    module_width: usize,
    quiet_modules: usize,
    height: usize,
) -> Result<(Vec<u8>, usize, usize)> {
    if module_width == 0 || height == 0 {
        return Err(DecodeError::InvalidInput {
            reason: "module width and height must be non-zero",
        });
    }
    let row = render_scanline(&encode_modules(digits)?, module_width, quiet_modules);
    let width = row.len();
    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..height {
        pixels.extend_from_slice(&row);
    }
    Ok((pixels, width, height))
}
