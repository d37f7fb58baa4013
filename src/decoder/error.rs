//! Error taxonomy of the decode pipeline.

use thiserror::Error;

/// Failure category, without the details carried by [`DecodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty scanline, zero module width, or malformed caller data
    InvalidInput,
    /// No offset satisfies all three guard checks
    StructureNotFound,
    /// A 7-module window matches no code table entry
    DecodeFailure,
    /// Digits decoded but the check digit disagrees
    ChecksumMismatch,
    /// A pipeline buffer could not be allocated
    AllocationFailure,
}

/// Errors produced by the decode pipeline. Every stage fails fast with the first one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The caller supplied something the pipeline cannot work with
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: &'static str,
    },

    /// The module bitstream holds no EAN-8 layout
    #[error("invalid format: no EAN-8 structure in {modules} modules")]
    StructureNotFound {
        /// Length of the searched bitstream
        modules: usize,
    },

    /// A digit window is not a valid L-set/R-set code
    #[error("invalid decode: pattern {pattern:07b} at digit {position} is not a known code")]
    DecodeFailure {
        /// Digit index, 0..8
        position: usize,
        /// The 7 modules packed MSB first
        pattern: u8,
    },

    /// The recomputed check digit differs from the 8th digit
    #[error("invalid checksum: expected check digit {expected}, found {}", .digits[7])]
    ChecksumMismatch {
        /// All decoded digits
        digits: [u8; 8],
        /// Check digit computed over the first seven
        expected: u8,
    },

    /// Reserving a pipeline buffer failed
    #[error("memory allocation error")]
    AllocationFailure,
}

impl DecodeError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidInput { .. } => ErrorKind::InvalidInput,
            DecodeError::StructureNotFound { .. } => ErrorKind::StructureNotFound,
            DecodeError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            DecodeError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            DecodeError::AllocationFailure => ErrorKind::AllocationFailure,
        }
    }
}

/// Result alias used throughout the pipeline
pub type Result<T> = std::result::Result<T, DecodeError>;
