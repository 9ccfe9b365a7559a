//! Tender suitability scoring.
//!
//! Three sub-scores — completeness, capability match, requirement clarity —
//! combine into a weighted total with a go/no-go threshold at 60. The
//! capability component awards +30 for having any case portfolio at all;
//! cases are not relevance-tagged, so this intentionally rewards track
//! record rather than fit. Stricter case-relevance scoring is a product
//! decision, not a cleanup.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tenderkit_parse::TenderInfo;
use tenderkit_store::{Case, Product, Qualification};

use crate::keywords;

const COMPLETENESS_WEIGHT: f64 = 0.25;
const CAPABILITY_WEIGHT: f64 = 0.40;
const CLARITY_WEIGHT: f64 = 0.35;

/// Totals at or above this are considered worth bidding on.
const SUITABLE_THRESHOLD: f64 = 60.0;
/// Project amounts above this trigger a resource risk flag.
const LARGE_PROJECT_AMOUNT: f64 = 10_000_000.0;

/// Concrete wording markers for the clarity check.
const CONCRETE_MARKERS: &[&str] = &[
    "资质", "证书", "产品", "案例", "经验", "职称", "年限", "金额", "等级", "认证",
];
/// Vague wording markers for the clarity check.
const VAGUE_MARKERS: &[&str] = &["等", "相关", "类似", "最好", "需要"];
/// Measurable-unit markers for the clarity check.
const MEASURABLE_MARKERS: &[&str] = &["级", "年", "个", "万元", "万吨", "km", "MPa", "kV"];

/// Parsed tender record as the evaluator consumes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenderProfile {
    pub project_name: Option<String>,
    pub client: Option<String>,
    /// ISO date (`YYYY-MM-DD`); an unparseable value silently skips the
    /// time-risk check.
    pub bid_deadline: Option<String>,
    pub project_amount: Option<f64>,
    pub requirements: Vec<String>,
    pub quote_format: Option<String>,
    pub payment_terms: Option<String>,
}

impl From<&TenderInfo> for TenderProfile {
    fn from(info: &TenderInfo) -> Self {
        Self {
            project_name: info.project_info.project_name.clone(),
            client: info.project_info.tenderer.clone(),
            bid_deadline: None,
            project_amount: None,
            requirements: info.requirements.clone(),
            quote_format: None,
            payment_terms: None,
        }
    }
}

/// Company capability snapshot the evaluator scores against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyCapabilities {
    pub products: Vec<Product>,
    pub certifications: Vec<Qualification>,
    pub cases: Vec<Case>,
    pub industries: Vec<String>,
}

/// Weighted suitability verdict for one tender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_score: f64,
    pub completeness_score: f64,
    pub capability_score: f64,
    pub clarity_score: f64,
    pub is_suitable: bool,
    pub suggestions: Vec<String>,
    pub risks: Vec<String>,
}

/// Scores a tender against the company capability profile.
pub struct TenderEvaluator {
    capabilities: CompanyCapabilities,
}

impl TenderEvaluator {
    pub fn new(capabilities: CompanyCapabilities) -> Self {
        Self { capabilities }
    }

    /// Evaluate a tender. Pure with respect to its inputs; the current
    /// local date feeds the deadline risk window.
    pub fn evaluate(&self, tender: &TenderProfile) -> EvaluationResult {
        self.evaluate_at(tender, Local::now().date_naive())
    }

    /// Evaluation with an explicit "today" for the deadline risk window.
    pub fn evaluate_at(&self, tender: &TenderProfile, as_of: NaiveDate) -> EvaluationResult {
        let completeness = self.completeness(tender);
        let capability = self.capability_match(tender);
        let clarity = self.clarity(tender);
        let total = weighted_total(completeness, capability, clarity);

        debug!(
            "evaluation: total={:.2} completeness={:.0} capability={:.0} clarity={:.0}",
            total, completeness, capability, clarity
        );

        EvaluationResult {
            total_score: total,
            completeness_score: completeness,
            capability_score: capability,
            clarity_score: clarity,
            is_suitable: total >= SUITABLE_THRESHOLD,
            suggestions: self.suggestions(completeness, capability, clarity),
            risks: self.risks(tender, as_of),
        }
    }

    /// Presence of the basic tender fields. Missing requirements deduct
    /// rather than merely score zero, so sums can go negative before the
    /// final clamp.
    fn completeness(&self, tender: &TenderProfile) -> f64 {
        let mut score: f64 = 0.0;
        if non_empty(&tender.project_name) {
            score += 10.0;
        }
        if non_empty(&tender.client) {
            score += 10.0;
        }
        if non_empty(&tender.bid_deadline) {
            score += 10.0;
        }
        if tender.project_amount.is_some_and(|a| a != 0.0) {
            score += 10.0;
        }
        if tender.requirements.is_empty() {
            score -= 10.0;
        } else {
            score += 20.0;
        }
        if non_empty(&tender.quote_format) {
            score += 10.0;
        }
        if non_empty(&tender.payment_terms) {
            score += 10.0;
        }
        score.clamp(0.0, 100.0)
    }

    /// How well the company's catalog, certifications, cases, and declared
    /// industries line up with the requirement text.
    fn capability_match(&self, tender: &TenderProfile) -> f64 {
        let mut score: f64 = 0.0;
        let product_keywords = keywords::extract_product_keywords(&tender.requirements);

        let any_product = self.capabilities.products.iter().any(|p| {
            let name = p.name.to_lowercase();
            let category = p.category.to_lowercase();
            let model = p.model.to_lowercase();
            product_keywords.iter().any(|kw| {
                name.contains(kw) || category.contains(kw) || model.contains(kw)
            })
        });
        score += if any_product { 40.0 } else { -10.0 };

        let any_cert = self.capabilities.certifications.iter().any(|cert| {
            let cert_name = cert.name.to_lowercase();
            let cert_level = cert.level.to_lowercase();
            tender.requirements.iter().any(|req| {
                let req_lower = req.to_lowercase();
                cert_name.contains(&req_lower) || req_lower.contains(&cert_level)
            })
        });
        score += if any_cert { 30.0 } else { -10.0 };

        if !self.capabilities.cases.is_empty() {
            score += 30.0;
        }

        for industry in &self.capabilities.industries {
            let industry_lower = industry.to_lowercase();
            if tender
                .requirements
                .iter()
                .any(|req| req.to_lowercase().contains(&industry_lower))
            {
                score += 10.0;
            }
        }

        score.clamp(0.0, 100.0)
    }

    /// How specific and measurable the requirement wording is, over the
    /// first ten requirements. Zero requirements score exactly zero.
    fn clarity(&self, tender: &TenderProfile) -> f64 {
        if tender.requirements.is_empty() {
            return 0.0;
        }
        let inspected = &tender.requirements[..tender.requirements.len().min(10)];

        let mut score = 0.0;
        for req in inspected {
            let req_lower = req.to_lowercase();
            if req.chars().count() > 5 {
                score += 5.0;
            }
            if CONCRETE_MARKERS.iter().any(|kw| req_lower.contains(kw)) {
                score += 5.0;
            }
            if !VAGUE_MARKERS.iter().any(|kw| req_lower.contains(kw)) {
                score += 3.0;
            }
            if MEASURABLE_MARKERS.iter().any(|kw| req.contains(kw)) {
                score += 2.0;
            }
        }

        (score * 100.0 / inspected.len() as f64).clamp(0.0, 100.0)
    }

    /// Banded advice against each sub-score.
    fn suggestions(&self, completeness: f64, capability: f64, clarity: f64) -> Vec<String> {
        let mut out = Vec::new();

        if completeness < 60.0 {
            out.push("招标文件基本信息不完整，建议补充项目名称、客户、截止日期等信息".to_string());
        } else if completeness < 80.0 {
            out.push("招标文件基本信息较完整".to_string());
        }

        if capability < 40.0 {
            out.push("公司产品/资质/案例与招标需求匹配度较低".to_string());
            out.push("建议更新公司数据库，补充相关产品、资质证书与行业案例".to_string());
        } else if capability < 70.0 {
            out.push("公司能力基本匹配".to_string());
        }

        if clarity < 50.0 {
            out.push("招标需求不够明确，存在模糊表述，建议与招标方沟通确认细节".to_string());
        } else if clarity < 70.0 {
            out.push("招标需求较为明确".to_string());
        }

        if capability < 40.0 {
            out.push("风险提示：中标可能性较低，建议谨慎考虑是否参与投标".to_string());
        } else if capability < 60.0 {
            out.push("建议仔细评估后决定是否参与投标".to_string());
        }

        out
    }

    /// Time, resource, and requirement risks.
    fn risks(&self, tender: &TenderProfile, as_of: NaiveDate) -> Vec<String> {
        let mut out = Vec::new();

        if let Some(deadline) = tender.bid_deadline.as_deref() {
            // A malformed deadline degrades the check, never the evaluation.
            if let Ok(date) = NaiveDate::parse_from_str(deadline, "%Y-%m-%d") {
                let days_left = (date - as_of).num_days();
                if days_left < 7 {
                    out.push(format!("时间风险：距离截止日期只有 {days_left} 天"));
                } else if days_left < 14 {
                    out.push(format!("时间紧张：距离截止日期只有 {days_left} 天"));
                }
            }
        }

        if tender
            .project_amount
            .is_some_and(|a| a > LARGE_PROJECT_AMOUNT)
        {
            out.push("资源风险：项目金额较大，需要评估资源投入".to_string());
        }

        if tender.requirements.is_empty() {
            out.push("需求风险：没有明确的技术要求".to_string());
        }

        out
    }
}

/// One-line overall verdict for a computed result.
pub fn summary(result: &EvaluationResult) -> String {
    if result.is_suitable {
        if result.total_score >= 80.0 {
            "非常适合：建议积极参与".to_string()
        } else if result.total_score >= 70.0 {
            "适合：建议正常准备".to_string()
        } else {
            "基本适合：需要仔细评估".to_string()
        }
    } else {
        "不太适合：建议谨慎考虑".to_string()
    }
}

fn weighted_total(completeness: f64, capability: f64, clarity: f64) -> f64 {
    let total = completeness * COMPLETENESS_WEIGHT
        + capability * CAPABILITY_WEIGHT
        + clarity * CLARITY_WEIGHT;
    (total * 100.0).round() / 100.0
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_capabilities() -> CompanyCapabilities {
        CompanyCapabilities {
            products: vec![
                Product {
                    id: 1,
                    name: "户内交流金属铠装移开式开关设备".to_string(),
                    model: "KYN28A-12".to_string(),
                    category: "高压开关柜".to_string(),
                    ..Product::default()
                },
                Product {
                    id: 2,
                    name: "低压抽出式开关柜".to_string(),
                    model: "MNS".to_string(),
                    category: "低压开关柜".to_string(),
                    ..Product::default()
                },
            ],
            certifications: vec![
                Qualification {
                    id: 1,
                    name: "电力工程施工总承包".to_string(),
                    level: "三级".to_string(),
                    ..Qualification::default()
                },
                Qualification {
                    id: 2,
                    name: "质量管理体系认证".to_string(),
                    level: "一级".to_string(),
                    ..Qualification::default()
                },
            ],
            cases: vec![Case {
                id: 1,
                project_name: "钢铁集团10kV中压柜".to_string(),
                industry: "钢铁".to_string(),
                product_type: "开关柜".to_string(),
                amount: 550_000.0,
                year: 2025,
                ..Case::default()
            }],
            industries: vec!["电力".to_string(), "钢铁".to_string()],
        }
    }

    fn sample_tender() -> TenderProfile {
        TenderProfile {
            project_name: Some("某工业园区10kV开关柜采购".to_string()),
            client: Some("某工业园区".to_string()),
            bid_deadline: Some("2099-03-15".to_string()),
            project_amount: Some(500_000.0),
            requirements: vec![
                "KYN28A-12 户内交流金属铠装移开式开关柜".to_string(),
                "三级及以上电力工程施工总承包资质".to_string(),
                "质量管理体系认证".to_string(),
                "类似项目案例3个".to_string(),
                "项目经验5年以上".to_string(),
            ],
            quote_format: Some("固定总价".to_string()),
            payment_terms: Some("验收后90天付款".to_string()),
        }
    }

    #[test]
    fn test_weighted_total_exact() {
        assert_eq!(weighted_total(80.0, 50.0, 60.0), 61.0);
    }

    #[test]
    fn test_weight_threshold_boundary() {
        assert!(weighted_total(80.0, 50.0, 60.0) >= SUITABLE_THRESHOLD);
        assert!(weighted_total(0.0, 100.0, 50.0) < SUITABLE_THRESHOLD);
    }

    #[test]
    fn test_full_evaluation_is_suitable() {
        let evaluator = TenderEvaluator::new(sample_capabilities());
        let result = evaluator.evaluate(&sample_tender());

        assert_eq!(result.completeness_score, 80.0);
        assert!(result.capability_score >= 70.0);
        assert!(result.is_suitable);
        assert!(result.total_score >= 60.0);
        assert!(result.risks.iter().all(|r| !r.contains("时间")));
    }

    #[test]
    fn test_completeness_clamps_at_zero() {
        let evaluator = TenderEvaluator::new(CompanyCapabilities::default());
        let result = evaluator.evaluate(&TenderProfile::default());
        assert_eq!(result.completeness_score, 0.0);
        assert_eq!(result.clarity_score, 0.0);
        assert!(!result.is_suitable);
    }

    #[test]
    fn test_empty_requirements_risk_flag() {
        let evaluator = TenderEvaluator::new(sample_capabilities());
        let tender = TenderProfile {
            requirements: vec![],
            ..sample_tender()
        };
        let result = evaluator.evaluate(&tender);
        assert!(result.risks.iter().any(|r| r.contains("需求风险")));
    }

    #[test]
    fn test_deadline_risk_bands() {
        let evaluator = TenderEvaluator::new(sample_capabilities());
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let urgent = TenderProfile {
            bid_deadline: Some("2026-03-05".to_string()),
            ..sample_tender()
        };
        let result = evaluator.evaluate_at(&urgent, as_of);
        assert!(result.risks.iter().any(|r| r.contains("时间风险")));

        let tight = TenderProfile {
            bid_deadline: Some("2026-03-11".to_string()),
            ..sample_tender()
        };
        let result = evaluator.evaluate_at(&tight, as_of);
        assert!(result.risks.iter().any(|r| r.contains("时间紧张")));

        let relaxed = TenderProfile {
            bid_deadline: Some("2026-06-01".to_string()),
            ..sample_tender()
        };
        let result = evaluator.evaluate_at(&relaxed, as_of);
        assert!(result.risks.iter().all(|r| !r.contains("时间")));
    }

    #[test]
    fn test_malformed_deadline_skips_time_check() {
        let evaluator = TenderEvaluator::new(sample_capabilities());
        let tender = TenderProfile {
            bid_deadline: Some("尽快".to_string()),
            ..sample_tender()
        };
        let result = evaluator.evaluate(&tender);
        assert!(result.risks.iter().all(|r| !r.contains("时间")));
    }

    #[test]
    fn test_large_amount_resource_risk() {
        let evaluator = TenderEvaluator::new(sample_capabilities());
        let tender = TenderProfile {
            project_amount: Some(20_000_000.0),
            ..sample_tender()
        };
        let result = evaluator.evaluate(&tender);
        assert!(result.risks.iter().any(|r| r.contains("资源风险")));
    }

    #[test]
    fn test_low_capability_suggestions() {
        let evaluator = TenderEvaluator::new(CompanyCapabilities::default());
        let result = evaluator.evaluate(&sample_tender());
        assert!(result.capability_score < 40.0);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("匹配度较低")));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("谨慎考虑")));
    }

    #[test]
    fn test_case_portfolio_bonus_is_unconditional() {
        // Identical tenders; the only difference is an unrelated case on file.
        let base = CompanyCapabilities {
            products: sample_capabilities().products,
            ..CompanyCapabilities::default()
        };
        let mut with_case = base.clone();
        with_case.cases.push(Case {
            id: 1,
            project_name: "完全无关的项目".to_string(),
            year: 2020,
            ..Case::default()
        });
        let tender = sample_tender();
        // Products match (+40), certifications miss (−10): 30 vs 60.
        let a = TenderEvaluator::new(base).evaluate(&tender).capability_score;
        let b = TenderEvaluator::new(with_case)
            .evaluate(&tender)
            .capability_score;
        assert_eq!(b - a, 30.0);
    }

    #[test]
    fn test_summary_bands() {
        let mut result = EvaluationResult {
            total_score: 85.0,
            completeness_score: 0.0,
            capability_score: 0.0,
            clarity_score: 0.0,
            is_suitable: true,
            suggestions: vec![],
            risks: vec![],
        };
        assert!(summary(&result).contains("非常适合"));
        result.total_score = 72.0;
        assert!(summary(&result).contains("正常准备"));
        result.total_score = 61.0;
        assert!(summary(&result).contains("仔细评估"));
        result.total_score = 40.0;
        result.is_suitable = false;
        assert!(summary(&result).contains("谨慎考虑"));
    }
}
