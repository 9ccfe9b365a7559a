//! Tender parsing pipeline: file → text → structured record.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use tenderkit_core::{Error, Result};

use crate::confidence;
use crate::extract::keywords::Category;
use crate::extract::{delivery, project_info, requirements};
use crate::file::{self, FileType};
use crate::merge;
use crate::types::{ParseResult, TenderInfo};

/// Parses tender files into structured requirement records.
pub struct TenderParser;

impl TenderParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single tender file.
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        let file_type = FileType::from_path(path)?;
        let text = file::extract_text(path, file_type)?;
        info!(
            "extracted {} chars from {} ({})",
            text.chars().count(),
            path.display(),
            file_type
        );
        Ok(self.parse_text(&text, file_type))
    }

    /// Build a structured record from already-extracted text.
    pub fn parse_text(&self, text: &str, source_format: FileType) -> ParseResult {
        let reqs = requirements::extract_requirements(text);
        let confidence_score = confidence::estimate_confidence(&reqs, Some(source_format));
        debug!(
            "{} requirements extracted, confidence {:.2}",
            reqs.len(),
            confidence_score
        );

        ParseResult {
            project_info: project_info::extract_project_info(text),
            qualification_requirements: requirements::extract_by_category(
                text,
                Category::Qualification,
            ),
            product_requirements: requirements::extract_by_category(text, Category::Product),
            technical_requirements: requirements::extract_by_category(text, Category::Technical),
            commercial_requirements: requirements::extract_by_category(text, Category::Commercial),
            delivery: delivery::extract_delivery(text),
            requirements: reqs,
            confidence_score,
            source_format,
            raw_text: text.to_string(),
        }
    }

    /// Parse several files from the same tender and merge them into one record.
    pub fn parse_files(&self, paths: &[PathBuf]) -> Result<TenderInfo> {
        if paths.is_empty() {
            return Err(Error::EmptyInput);
        }
        let results = paths
            .iter()
            .map(|p| self.parse_file(p))
            .collect::<Result<Vec<_>>>()?;
        merge::merge(results)
    }
}

impl Default for TenderParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceLevel;

    const SAMPLE: &str = "\
项目名称：某工业园区10kV开关柜采购项目
项目编号：HY-2025-017
招标人：某工业园区管委会
交货期：合同签订后60天内交货
投标人须具备电力工程施工总承包三级及以上资质证书
投标人须提供有效的质量管理体系认证
本项目采购KYN28A-12户内交流金属铠装移开式开关设备
设备防护等级不低于IP4X，额定电压12kV
报价为固定总价，含运输与安装费用
质保期自验收合格之日起不少于24个月
技术标与商务标分别密封包装
";

    #[test]
    fn test_parse_text_end_to_end() {
        let parser = TenderParser::new();
        let result = parser.parse_text(SAMPLE, FileType::Docx);

        assert_eq!(
            result.project_info.project_name.as_deref(),
            Some("某工业园区10kV开关柜采购项目")
        );
        assert_eq!(result.delivery.delivery_days, Some(60));
        assert!(!result.requirements.is_empty());
        assert!(result
            .qualification_requirements
            .iter()
            .any(|r| r.contains("资质")));
        assert!(result
            .product_requirements
            .iter()
            .any(|r| r.contains("开关设备") || r.contains("开关柜")));
        assert!(result
            .commercial_requirements
            .iter()
            .any(|r| r.contains("报价") || r.contains("质保")));
        assert!(result.confidence_score > 0.0 && result.confidence_score <= 1.0);
    }

    #[test]
    fn test_parse_text_empty_input() {
        let parser = TenderParser::new();
        let result = parser.parse_text("", FileType::Pdf);
        assert!(result.requirements.is_empty());
        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.confidence_level(), ConfidenceLevel::Uncertain);
    }

    #[test]
    fn test_parse_files_empty_list() {
        let parser = TenderParser::new();
        assert!(matches!(
            parser.parse_files(&[]),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_parse_file_unsupported_extension() {
        let parser = TenderParser::new();
        let err = parser.parse_file(Path::new("tender.xlsx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
