//! EAN-8 digit decoding
//!
//! Everything that happens once a [`Segment`](crate::models::Segment) has been located:
//! - Code tables (L-set / R-set)
//! - Digit window decoding
//! - Check digit validation
//! - Error taxonomy and scan configuration

/// Check digit computation and validation
pub mod checksum;
pub mod config;
/// 7-module window decoding
pub mod digit;
/// Pipeline errors
pub mod error;
/// L-set and R-set code tables
pub mod tables;
