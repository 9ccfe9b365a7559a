//! Extraction confidence scoring.
//!
//! A heuristic, non-probabilistic estimate meant only to flag "needs human
//! review". The component weights, caps, and the 0.8/0.6/0.4 level
//! thresholds are part of the observable contract — the review UI branches
//! on them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::file::FileType;
use crate::types::ParseResult;

/// Markers that make a requirement read as concrete: standard numbers,
/// certification words, year ranges.
static CONCRETE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(GB|IEC|ISO|DL|JB)\s*/?\s*T?\s*\d+|证书|认证|资质|等级|\d{4}\s*[-~至]\s*\d{4}")
        .unwrap()
});

/// Markers that make a requirement read as vague.
const VAGUE_MARKERS: &[&str] = &["等", "相关", "类似", "最好", "需要"];

/// Confidence bands backing the review UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    Uncertain,
}

impl ConfidenceLevel {
    /// Band for a score: ≥0.8 high, ≥0.6 medium, ≥0.4 low, else uncertain.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else if score >= 0.4 {
            Self::Low
        } else {
            Self::Uncertain
        }
    }

    /// Cosmetic traffic-light mapping of the same thresholds.
    pub fn color(self) -> &'static str {
        match self {
            Self::High => "green",
            Self::Medium => "yellow",
            Self::Low => "orange",
            Self::Uncertain => "red",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
            Self::Uncertain => write!(f, "uncertain"),
        }
    }
}

/// Estimate how reliable an automatic extraction is, in [0, 1].
///
/// Quantity (max 30), quality over the first 10 requirements (max 40), and
/// source-format reliability (max 30) sum to a raw 100-point score.
/// `None` for the format means the source is unknown.
pub fn estimate_confidence(requirements: &[String], source_format: Option<FileType>) -> f64 {
    if requirements.is_empty() {
        return 0.0;
    }

    let quantity = (requirements.len() as f64 * 1.5).min(30.0);

    let inspected = &requirements[..requirements.len().min(10)];
    let mut quality_sum: f64 = 0.0;
    for req in inspected {
        let chars = req.chars().count();
        // Length points are additive: a long requirement earns both.
        if chars > 10 {
            quality_sum += 3.0;
        }
        if chars > 20 {
            quality_sum += 4.0;
        }
        if CONCRETE_RE.is_match(req) {
            quality_sum += 2.0;
        }
        if !VAGUE_MARKERS.iter().any(|m| req.contains(m)) {
            quality_sum += 2.0;
        }
    }
    let quality = quality_sum.min(40.0) / inspected.len() as f64 * 10.0;

    let format = match source_format {
        Some(FileType::Pdf) => 30.0,
        Some(FileType::Docx) => 25.0,
        Some(FileType::Doc) => 15.0,
        None => 10.0,
    };

    ((quantity + quality + format) / 100.0).clamp(0.0, 1.0)
}

/// Review hints surfaced alongside the parse result.
pub fn suggestions(result: &ParseResult) -> Vec<String> {
    let mut out = Vec::new();

    if result.requirements.is_empty() {
        out.push("未提取到任何需求，请人工核对原文件内容".to_string());
    } else if result.requirements.len() < 5 {
        out.push("提取到的需求较少，建议人工补充遗漏条目".to_string());
    }

    if result.confidence_score < 0.4 {
        out.push("文件可能不是标准招标文件格式，建议转换为 .docx 后重新上传".to_string());
        out.push("建议逐条人工校验提取结果".to_string());
    } else if result.confidence_score < 0.6 {
        out.push("置信度偏低，建议仔细校验解析结果".to_string());
    }

    if result.source_format == FileType::Doc {
        out.push("旧版 .doc 格式解析可靠性较低，建议另存为 .docx".to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeliveryRequirements, ProjectInfo};

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        assert_eq!(estimate_confidence(&[], Some(FileType::Pdf)), 0.0);
    }

    #[test]
    fn test_bounds() {
        let many: Vec<String> = (0..50)
            .map(|i| format!("具备电力工程施工总承包资质证书且业绩完整充分第{i}项"))
            .collect();
        let score = estimate_confidence(&many, Some(FileType::Pdf));
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(0.79999), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.80001), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.59999), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.4), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.39999), ConfidenceLevel::Uncertain);
    }

    #[test]
    fn test_high_confidence_pdf_scenario() {
        // 15 long, concrete, non-vague requirements out of a PDF:
        // quantity 22.5, quality capped at 40, format 30 → 0.925.
        let items: Vec<String> = (0..15)
            .map(|i| format!("具备GB7251标准认证的成套开关设备制造能力第{i}项资质证书"))
            .collect();
        let score = estimate_confidence(&items, Some(FileType::Pdf));
        assert!((score - 0.925).abs() < 1e-9);
        assert_eq!(ConfidenceLevel::from_score(score), ConfidenceLevel::High);
    }

    #[test]
    fn test_sparse_doc_scenario_is_uncertain() {
        // Two short, vague requirements from a legacy DOC.
        let items = reqs(&["提供相关资质等", "需要类似案例"]);
        let score = estimate_confidence(&items, Some(FileType::Doc));
        assert!(score < 0.4);
        assert_eq!(ConfidenceLevel::from_score(score), ConfidenceLevel::Uncertain);
    }

    #[test]
    fn test_format_reliability_ordering() {
        let items = reqs(&["具备电力施工总承包资质证书"]);
        let pdf = estimate_confidence(&items, Some(FileType::Pdf));
        let docx = estimate_confidence(&items, Some(FileType::Docx));
        let doc = estimate_confidence(&items, Some(FileType::Doc));
        let unknown = estimate_confidence(&items, None);
        assert!(pdf > docx && docx > doc && doc > unknown);
    }

    #[test]
    fn test_low_confidence_suggestions() {
        let result = ParseResult {
            project_info: ProjectInfo::default(),
            qualification_requirements: vec![],
            product_requirements: vec![],
            technical_requirements: vec![],
            commercial_requirements: vec![],
            delivery: DeliveryRequirements::default(),
            requirements: reqs(&["提供相关资质等", "需要类似案例"]),
            confidence_score: 0.31,
            source_format: FileType::Doc,
            raw_text: String::new(),
        };
        let hints = suggestions(&result);
        assert!(hints.iter().any(|h| h.contains("标准招标文件格式")));
        assert!(hints.iter().any(|h| h.contains(".docx")));
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(ConfidenceLevel::High.color(), "green");
        assert_eq!(ConfidenceLevel::Uncertain.color(), "red");
    }
}
