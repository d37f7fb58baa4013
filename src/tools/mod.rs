//! Image I/O and dataset helpers shared by the CLI, benches and tests

use crate::decoder::config::max_dim;
use crate::decoder::error::DecodeError;
use crate::models::ScanReport;
use image::GenericImageView;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of the image-level tools
#[derive(Debug, Error)]
pub enum ToolError {
    /// Loading or saving the image failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The image loaded but the barcode did not decode
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Load an image as 8-bit grayscale along with its dimensions.
///
/// Images larger than `EAN8_MAX_DIM` on their longest side are downscaled.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?;
    let gray = match max_dim() {
        Some(limit) => {
            let (orig_w, orig_h) = img.dimensions();
            if orig_w.max(orig_h) > limit {
                img.resize(limit, limit, image::imageops::FilterType::Triangle)
                    .to_luma8()
            } else {
                img.to_luma8()
            }
        }
        None => img.to_luma8(),
    };
    let (width, height) = gray.dimensions();
    Ok((gray.into_raw(), width as usize, height as usize))
}

/// Write a grayscale buffer as an image; the format follows the file extension.
pub fn save_gray<P: AsRef<Path>>(
    path: P,
    gray: &[u8],
    width: usize,
    height: usize,
) -> Result<(), ToolError> {
    if gray.len() != width * height {
        return Err(DecodeError::InvalidInput {
            reason: "buffer length does not match dimensions",
        }
        .into());
    }
    image::save_buffer(
        path,
        gray,
        width as u32,
        height as u32,
        image::ColorType::L8,
    )?;
    Ok(())
}

/// Load an image and scan it with the environment configuration.
pub fn scan_image<P: AsRef<Path>>(path: P) -> Result<ScanReport, ToolError> {
    let (gray, width, height) = load_gray(path)?;
    Ok(crate::scan_grayscale(&gray, width, height)?)
}

/// Default dataset root from `EAN8_DATASET_ROOT`.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("EAN8_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Iterate image paths under `root`, sorted, with an optional limit.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp" | "pgm") {
                    images.push(path);
                }
            }
        }
    }

    images
}
