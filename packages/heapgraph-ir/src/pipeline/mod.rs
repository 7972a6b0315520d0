//! Pipeline orchestration

pub mod report;
pub mod service;

pub use report::{GraphSummary, RetainedSizeEntry, RetainedSizeReport, TypeStats};
pub use service::HeapGraphService;
