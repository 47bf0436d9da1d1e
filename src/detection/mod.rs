//! Project type detection from directory contents

pub mod registry;
pub mod scanner;

pub use registry::{Detector, DetectorError, DetectorRegistry, DetectorSummary, DEFAULT_DETECTORS};
pub use scanner::{DirectoryScanner, ScanError};
