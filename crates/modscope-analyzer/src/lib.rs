//! modscope-analyzer — snapshot pipeline service and source enumeration

pub mod enumerate;
pub mod service;

pub use enumerate::{FsEnumerator, SourceEnumerator, TRANSLATION_UNIT_EXTENSIONS};
pub use service::AnalyzerService;
