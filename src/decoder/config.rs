use std::str::FromStr;
use std::sync::OnceLock;

fn parse_value<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    parse_value(std::env::var(name).ok().as_deref())
}

static THRESHOLD: OnceLock<Option<u8>> = OnceLock::new();

/// Fixed binarization threshold from `EAN8_THRESHOLD`
pub(crate) fn threshold_override() -> Option<u8> {
    *THRESHOLD.get_or_init(|| parse_env("EAN8_THRESHOLD"))
}

static SCAN_ROW: OnceLock<Option<usize>> = OnceLock::new();

/// Scanline row from `EAN8_SCAN_ROW`
pub(crate) fn scan_row_override() -> Option<usize> {
    *SCAN_ROW.get_or_init(|| parse_env("EAN8_SCAN_ROW"))
}

static MAX_DIM: OnceLock<Option<u32>> = OnceLock::new();

/// Downscale limit for loaded images from `EAN8_MAX_DIM`; 0 disables it
pub(crate) fn max_dim() -> Option<u32> {
    *MAX_DIM.get_or_init(|| parse_env::<u32>("EAN8_MAX_DIM").filter(|&v| v > 0))
}

/// How an image is turned into the scanline handed to the decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanConfig {
    /// Fixed threshold; `None` computes Otsu's threshold over the whole image
    pub threshold: Option<u8>,
    /// Row to scan; `None` picks the middle row
    pub row: Option<usize>,
}

impl ScanConfig {
    /// Configuration from the `EAN8_*` environment variables
    pub fn from_env() -> Self {
        Self {
            threshold: threshold_override(),
            row: scan_row_override(),
        }
    }

    /// Use a fixed binarization threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Scan a specific row
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Row to scan in an image of `height` rows (`height` must be non-zero)
    pub fn resolve_row(&self, height: usize) -> usize {
        self.row.unwrap_or(height / 2).min(height.saturating_sub(1))
    }
}
