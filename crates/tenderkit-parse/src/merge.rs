//! Multi-file merge of per-file parse results.

use tenderkit_core::{Error, Result};

use crate::types::{ParseResult, ProjectInfo, TenderInfo};

/// Keywords demanding separate technical and commercial bid documents.
const SEPARATE_BID_KEYWORDS: &[&str] = &[
    "技术标",
    "商务标",
    "分开",
    "分别",
    "技术部分",
    "商务部分",
    "技术文件",
    "商务文件",
];

/// Merge per-file parse results into one tender record.
///
/// The first file is the base. Later files overwrite scalar project fields
/// only with non-empty values (last-non-empty-wins), union the requirement
/// lists preserving first-seen order, and overwrite the delivery day count
/// only when they provide one. The separate-bids flag is computed once over
/// the combined text, after all merges.
pub fn merge(results: Vec<ParseResult>) -> Result<TenderInfo> {
    let mut iter = results.into_iter();
    let base = iter.next().ok_or(Error::EmptyInput)?;
    let mut info = TenderInfo::from(base);

    for result in iter {
        merge_project_info(&mut info.project_info, result.project_info);
        union_into(
            &mut info.qualification_requirements,
            result.qualification_requirements,
        );
        union_into(&mut info.product_requirements, result.product_requirements);
        union_into(
            &mut info.technical_requirements,
            result.technical_requirements,
        );
        union_into(
            &mut info.commercial_requirements,
            result.commercial_requirements,
        );
        union_into(&mut info.requirements, result.requirements);
        if result.delivery.delivery_days.is_some() {
            info.delivery.delivery_days = result.delivery.delivery_days;
        }
        info.raw_text.push_str("\n\n");
        info.raw_text.push_str(&result.raw_text);
    }

    info.require_separate_bids = requires_separate_bids(&info.raw_text);
    Ok(info)
}

/// True if the text demands separate technical and commercial bids.
pub fn requires_separate_bids(text: &str) -> bool {
    SEPARATE_BID_KEYWORDS.iter().any(|kw| text.contains(kw))
}

fn merge_project_info(base: &mut ProjectInfo, new: ProjectInfo) {
    merge_field(&mut base.project_name, new.project_name);
    merge_field(&mut base.project_no, new.project_no);
    merge_field(&mut base.tenderer, new.tenderer);
    merge_field(&mut base.address, new.address);
    merge_field(&mut base.delivery_period, new.delivery_period);
}

fn merge_field(base: &mut Option<String>, new: Option<String>) {
    if let Some(value) = new {
        if !value.trim().is_empty() {
            *base = Some(value);
        }
    }
}

fn union_into(base: &mut Vec<String>, new: Vec<String>) {
    for item in new {
        if !base.contains(&item) {
            base.push(item);
        }
    }
}
