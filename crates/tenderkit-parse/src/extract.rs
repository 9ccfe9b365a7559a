//! Heuristic information extraction from tender text.
//!
//! Keyword matching, regex field capture, and fragment scoring — a
//! best-effort text-mining layer, not a verified information extractor.

pub mod delivery;
pub mod keywords;
pub mod project_info;
pub mod requirements;

pub use keywords::Category;
pub use requirements::{extract_by_category, extract_requirements};
