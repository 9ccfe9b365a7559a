//! TenderKit Parse — tender file text extraction, requirement mining,
//! confidence estimation, multi-file merge.

pub mod confidence;
pub mod doc;
pub mod extract;
pub mod file;
pub mod merge;
pub mod parser;
pub mod types;

pub use confidence::{estimate_confidence, ConfidenceLevel};
pub use file::FileType;
pub use parser::TenderParser;
pub use types::{DeliveryRequirements, ParseResult, ProjectInfo, TenderInfo};
