//! Delivery-period extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DeliveryRequirements;

static DELIVERY_DAYS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"交货期[：:]\s*(\d+)\s*[天日]").unwrap(),
        Regex::new(r"(\d+)\s*[天日]内?交货").unwrap(),
        Regex::new(r"工期[：:]\s*(\d+)\s*[天日]").unwrap(),
    ]
});

static DELIVERY_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"交货期[：:]\s*([^\n]+)").unwrap());

/// Mine the delivery period: a day count when one is stated numerically,
/// plus the full phrase as written.
pub fn extract_delivery(text: &str) -> DeliveryRequirements {
    let delivery_days = DELIVERY_DAYS_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    });

    let delivery_text = DELIVERY_TEXT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    DeliveryRequirements {
        delivery_days,
        delivery_text,
    }
}
