//! Grayscale conversion with integer luma
//! Y = 0.299*R + 0.587*G + 0.114*B, computed as (76*R + 150*G + 29*B) >> 8

use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGB bytes to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale(rgb, width * height, 3)
}

/// Convert packed RGBA bytes to grayscale (alpha is ignored)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale(rgba, width * height, 4)
}

fn to_grayscale(pixels: &[u8], pixel_count: usize, channels: usize) -> Vec<u8> {
    pixels
        .chunks_exact(channels)
        .take(pixel_count)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Convert RGB to grayscale, processing rows in parallel
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * 3;
            *out = luma(rgb[idx], rgb[idx + 1], rgb[idx + 2]);
        }
    });

    gray
}
