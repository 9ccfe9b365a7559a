//! Structured records produced by the parsing pipeline.

use serde::{Deserialize, Serialize};

use crate::confidence::{self, ConfidenceLevel};
use crate::file::FileType;

/// Project metadata fields captured from tender text.
///
/// Every field is optional; tender documents rarely carry all of them and
/// a missing field is a normal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_name: Option<String>,
    pub project_no: Option<String>,
    pub tenderer: Option<String>,
    pub address: Option<String>,
    pub delivery_period: Option<String>,
    /// Body of the bidder-qualification section, when one is found.
    pub qualification_section: Option<String>,
}

/// Delivery-period requirements mined from tender text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequirements {
    /// Delivery period in days, when a numeric period was found.
    pub delivery_days: Option<u32>,
    /// The full delivery-period phrase as written, or empty.
    pub delivery_text: String,
}

/// Output of parsing one tender file. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub project_info: ProjectInfo,
    pub qualification_requirements: Vec<String>,
    pub product_requirements: Vec<String>,
    pub technical_requirements: Vec<String>,
    pub commercial_requirements: Vec<String>,
    pub delivery: DeliveryRequirements,
    /// Keyword-bearing requirement fragments in discovery order, capped.
    pub requirements: Vec<String>,
    /// Heuristic extraction reliability estimate in [0, 1].
    pub confidence_score: f64,
    pub source_format: FileType,
    /// Source text, retained for audit and the merge step.
    pub raw_text: String,
}

impl ParseResult {
    /// Confidence band backing the review UI.
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence_score)
    }

    /// Traffic-light color for the confidence band.
    pub fn confidence_color(&self) -> &'static str {
        self.confidence_level().color()
    }

    /// Review hints for low-confidence parses.
    pub fn suggestions(&self) -> Vec<String> {
        confidence::suggestions(self)
    }
}

/// Unified tender record merged from one or more parsed files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderInfo {
    pub project_info: ProjectInfo,
    pub qualification_requirements: Vec<String>,
    pub product_requirements: Vec<String>,
    pub technical_requirements: Vec<String>,
    pub commercial_requirements: Vec<String>,
    pub delivery: DeliveryRequirements,
    /// Union of the per-file requirement lists, first-seen order.
    pub requirements: Vec<String>,
    /// True if the tender demands separate technical and commercial bids.
    pub require_separate_bids: bool,
    /// Concatenation of all source texts, for audit.
    pub raw_text: String,
}

impl From<ParseResult> for TenderInfo {
    fn from(result: ParseResult) -> Self {
        Self {
            project_info: result.project_info,
            qualification_requirements: result.qualification_requirements,
            product_requirements: result.product_requirements,
            technical_requirements: result.technical_requirements,
            commercial_requirements: result.commercial_requirements,
            delivery: result.delivery,
            requirements: result.requirements,
            require_separate_bids: false,
            raw_text: result.raw_text,
        }
    }
}
