//! Requirement fragment mining.
//!
//! Splits tender text into sentence-like fragments, drops noise, and keeps
//! the fragments carrying category keywords. A requirement spanning several
//! sentences is only partially captured; that is an accepted limitation of
//! the fragment model.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::keywords::Category;

/// Maximum requirements returned per document.
pub const MAX_REQUIREMENTS: usize = 20;
/// Fragments shorter than this many characters carry no requirement.
const MIN_FRAGMENT_CHARS: usize = 5;

// Noise patterns: enumerator prefixes, dates, phone numbers, emails, URLs,
// and header/letterhead boilerplate.
static ENUMERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[（(]?[一二三四五六七八九十\d]+[）)、．.:：]").unwrap());
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}\s*年\s*\d{1,2}\s*月|\d{4}[-/]\d{1,2}[-/]\d{1,2}").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"1[3-9]\d{9}|\d{3,4}-\d{7,8}").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://|www\.").unwrap());
static BOILERPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(招标文件|投标邀请|投标须知|目\s*录|附件|第[一二三四五六七八九十\d]+[章节部分页卷])")
        .unwrap()
});
static COMPANY_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.{0,24}(有限公司|有限责任公司|集团)$").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Split text into sentence-like fragments on Chinese terminators and newlines.
pub fn split_fragments(text: &str) -> Vec<&str> {
    text.split(['。', '！', '？', '；', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_noise(fragment: &str) -> bool {
    ENUMERATOR_RE.is_match(fragment)
        || DATE_RE.is_match(fragment)
        || PHONE_RE.is_match(fragment)
        || EMAIL_RE.is_match(fragment)
        || URL_RE.is_match(fragment)
        || BOILERPLATE_RE.is_match(fragment)
        || COMPANY_LINE_RE.is_match(fragment)
}

/// Extract keyword-bearing requirement fragments from tender text.
///
/// Deterministic: output preserves first-seen order in the source text.
/// Empty or whitespace-only input yields an empty result.
pub fn extract_requirements(text: &str) -> Vec<String> {
    extract_matching(text, |fragment_lower| {
        Category::ALL.iter().any(|c| {
            c.keywords()
                .iter()
                .any(|kw| fragment_lower.contains(kw.to_lowercase().as_str()))
        })
    })
}

/// Extract fragments bearing keywords of a single category.
pub fn extract_by_category(text: &str, category: Category) -> Vec<String> {
    extract_matching(text, |fragment_lower| {
        category
            .keywords()
            .iter()
            .any(|kw| fragment_lower.contains(kw.to_lowercase().as_str()))
    })
}

fn extract_matching(text: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for fragment in split_fragments(text) {
        if fragment.chars().count() < MIN_FRAGMENT_CHARS {
            continue;
        }
        if is_noise(fragment) {
            continue;
        }
        let normalized = WHITESPACE_RE.replace_all(fragment, " ").trim().to_string();
        let lower = normalized.to_lowercase();
        if !keep(&lower) {
            continue;
        }
        if !seen.insert(lower) {
            continue;
        }
        out.push(normalized);
        if out.len() >= MAX_REQUIREMENTS {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(extract_requirements("").is_empty());
        assert!(extract_requirements("   \n\n  ").is_empty());
    }

    #[test]
    fn test_keyword_fragments_kept_in_order() {
        let text = "投标人须具备电力工程施工总承包三级资质。\
                    产品为10kV高压开关柜。\
                    这一句没有任何标记词汇可言。\
                    质保期不低于三年，提供售后服务。";
        let reqs = extract_requirements(text);
        assert_eq!(reqs.len(), 3);
        assert!(reqs[0].contains("资质"));
        assert!(reqs[1].contains("开关柜"));
        assert!(reqs[2].contains("售后"));
    }

    #[test]
    fn test_short_fragments_dropped() {
        // "资质" alone is under the 5-character floor.
        assert!(extract_requirements("资质。").is_empty());
    }

    #[test]
    fn test_noise_fragments_dropped() {
        let text = "2024年3月15日发布招标公告资质。\
                    联系电话13912345678，资质咨询。\
                    详见www.example.com资质页面。\
                    一、投标人资质要求如下。";
        assert!(extract_requirements(text).is_empty());
    }

    #[test]
    fn test_company_letterhead_dropped() {
        // Keyword-bearing letterhead lines are still boilerplate.
        let reqs = extract_requirements("某某高压电气设备有限公司\n某某输变电集团\n");
        assert!(reqs.is_empty());
    }

    #[test]
    fn test_dedup_case_insensitive_first_seen() {
        let text = "需提供10KV开关柜技术参数。\
                    中间还有别的要求：提供质保服务承诺。\
                    需提供10kv开关柜技术参数。";
        let reqs = extract_requirements(text);
        assert_eq!(reqs.len(), 2);
        assert!(reqs[0].contains("10KV"));
    }

    #[test]
    fn test_whitespace_normalized() {
        let reqs = extract_requirements("投标人   须有  有效资质    证书文件。");
        assert_eq!(reqs, vec!["投标人 须有 有效资质 证书文件"]);
    }

    #[test]
    fn test_output_capped() {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("投标人资质证明材料需包含第 {i} 项内容说明。"));
        }
        assert_eq!(extract_requirements(&text).len(), MAX_REQUIREMENTS);
    }

    #[test]
    fn test_category_extraction_is_scoped() {
        let text = "投标人须具备安全生产许可证。本项目采购35kV变压器两台。";
        let quals = extract_by_category(text, Category::Qualification);
        assert_eq!(quals.len(), 1);
        assert!(quals[0].contains("许可证"));
        let products = extract_by_category(text, Category::Product);
        assert_eq!(products.len(), 1);
        assert!(products[0].contains("变压器"));
    }

    #[test]
    fn test_determinism() {
        let text = "提供开关柜。保证交货期三十天。具备电力资质等级证明。";
        let a = extract_requirements(text);
        let b = extract_requirements(text);
        assert_eq!(a, b);
    }
}
