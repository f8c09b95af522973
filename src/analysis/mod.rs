//! Analysis result aggregation
//!
//! Combines the detector outputs into the result consumed by the
//! orchestration layer.

pub mod result;

pub use result::{AnalysisMetadata, AnalysisResult};
