//! Capability matching heuristics.
//!
//! Requirement text and stored capability names use inconsistent granularity
//! (a requirement may say "10kV" where a product name says
//! "10kV开关柜KYN28A-12"), so every containment test runs in both
//! directions. No match is never an error: each operation falls back to a
//! usable non-empty subset where one exists, so downstream document
//! sections are never blank.

use std::collections::HashSet;

use crate::types::{Case, Product, Qualification};

/// Keyword matches below this count trigger the certificate-file fallback.
const QUALIFICATION_FALLBACK_MIN: usize = 10;
/// Size of the certificate-file fallback set.
const QUALIFICATION_FALLBACK_LIMIT: usize = 20;
/// Products returned when no keywords are given.
const PRODUCT_DEFAULT_LIMIT: usize = 10;

/// Match qualifications against requirement text.
///
/// For each requirement in order, the first not-yet-matched qualification
/// whose name or level contains — or is contained by — the requirement is
/// taken. When fewer than ten qualifications match, the keyword result is
/// discarded in favor of the first twenty qualifications that carry a
/// certificate file, in collection order.
pub fn match_qualifications(
    requirements: &[String],
    qualifications: &[Qualification],
) -> Vec<Qualification> {
    let mut matched: Vec<Qualification> = Vec::new();
    let mut matched_ids: HashSet<u64> = HashSet::new();

    for req in requirements {
        let req_lower = req.to_lowercase();
        for q in qualifications {
            if matched_ids.contains(&q.id) {
                continue;
            }
            let name_lower = q.name.to_lowercase();
            let level_lower = q.level.to_lowercase();
            if req_lower.contains(&name_lower)
                || req_lower.contains(&level_lower)
                || name_lower.contains(&req_lower)
                || level_lower.contains(&req_lower)
            {
                matched_ids.insert(q.id);
                matched.push(q.clone());
                break;
            }
        }
    }

    if matched.len() < QUALIFICATION_FALLBACK_MIN && !qualifications.is_empty() {
        matched = qualifications
            .iter()
            .filter(|q| !q.cert_file.is_empty())
            .take(QUALIFICATION_FALLBACK_LIMIT)
            .cloned()
            .collect();
    }

    matched
}

/// Match past-project cases by product type, most recent first.
///
/// `industry` is accepted but does not constrain results — callers pass it
/// today and observe no filtering; changing that is a product decision.
pub fn match_cases(
    _industry: Option<&str>,
    product_type: Option<&str>,
    min_amount: f64,
    limit: usize,
    cases: &[Case],
) -> Vec<Case> {
    let product_type = product_type.unwrap_or("").trim();
    if product_type.is_empty() {
        return most_recent(cases, limit);
    }

    let needle = product_type.to_lowercase();
    let mut matched: Vec<Case> = cases
        .iter()
        .filter(|c| {
            c.product_type.to_lowercase().contains(&needle)
                || c.project_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        return most_recent(cases, limit);
    }

    if min_amount > 0.0 {
        matched.retain(|c| c.amount >= min_amount);
    }
    matched.sort_by(|a, b| b.year.cmp(&a.year));
    matched.truncate(limit);
    matched
}

/// Most recent cases by year; the sort is stable so ties keep collection order.
fn most_recent(cases: &[Case], limit: usize) -> Vec<Case> {
    let mut sorted = cases.to_vec();
    sorted.sort_by(|a, b| b.year.cmp(&a.year));
    sorted.truncate(limit);
    sorted
}

/// Match catalog products against free-text keywords.
///
/// Without keywords the first ten products are returned. With keywords,
/// a product is taken at most once when any keyword is contained in its
/// name, model, or category — or when its name or model is contained in
/// the keyword. Zero matches against a non-empty catalog return the whole
/// catalog rather than nothing.
pub fn match_products(keywords: &[String], products: &[Product]) -> Vec<Product> {
    if keywords.is_empty() {
        return products.iter().take(PRODUCT_DEFAULT_LIMIT).cloned().collect();
    }

    let mut matched: Vec<Product> = Vec::new();
    for p in products {
        let name_lower = p.name.to_lowercase();
        let model_lower = p.model.to_lowercase();
        let category_lower = p.category.to_lowercase();

        let hit = keywords.iter().any(|kw| {
            let kw_lower = kw.to_lowercase();
            name_lower.contains(&kw_lower)
                || model_lower.contains(&kw_lower)
                || category_lower.contains(&kw_lower)
                || kw_lower.contains(&name_lower)
                || kw_lower.contains(&model_lower)
        });
        if hit {
            matched.push(p.clone());
        }
    }

    if matched.is_empty() && !products.is_empty() {
        return products.to_vec();
    }
    matched
}
