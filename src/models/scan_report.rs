use super::DecodedDigits;

/// Outcome of scanning one image row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Row of the image that was decoded
    pub row: usize,
    /// Threshold used to binarize the row
    pub threshold: u8,
    /// Estimated pixel width of one module
    pub module_width: usize,
    /// First module of the start guard
    pub start: usize,
    /// Decoded digits
    pub digits: DecodedDigits,
}
