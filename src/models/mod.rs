pub mod digits;
pub mod layout;
pub mod scan_report;
pub mod segment;

pub use digits::DecodedDigits;
pub use scan_report::ScanReport;
pub use segment::Segment;
