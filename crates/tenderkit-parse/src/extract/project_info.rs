//! Project metadata field capture.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ProjectInfo;

static PROJECT_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"项目名称[：:]\s*([^\n]+)").unwrap());
static PROJECT_NO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"项目编号[：:]\s*([^\n]+)").unwrap());
static TENDERER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"招标人[：:]\s*([^\n]+)").unwrap());
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"项目地址[：:]\s*([^\n]+)").unwrap());
static DELIVERY_PERIOD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"交货期[：:]\s*([^\n]+)").unwrap());

/// `一、`-style numbered headings mark the start of the next section.
static SECTION_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[一二三四五六七八九十]+、").unwrap());

const QUALIFICATION_SECTION_TITLE: &str = "投标人资格要求";

/// Capture the project metadata fields present in the text.
pub fn extract_project_info(text: &str) -> ProjectInfo {
    ProjectInfo {
        project_name: capture(&PROJECT_NAME_RE, text),
        project_no: capture(&PROJECT_NO_RE, text),
        tenderer: capture(&TENDERER_RE, text),
        address: capture(&ADDRESS_RE, text),
        delivery_period: capture(&DELIVERY_PERIOD_RE, text),
        qualification_section: extract_section(text, QUALIFICATION_SECTION_TITLE),
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Grab the lines following a section title, stopping at the next numbered
/// heading. Returns `None` when the title is absent or the section is empty.
pub fn extract_section(text: &str, section_title: &str) -> Option<String> {
    let start = text.find(section_title)?;
    let body = &text[start + section_title.len()..];

    let mut content = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if SECTION_HEADING_RE.is_match(line) {
            break;
        }
        content.push(line);
    }

    if content.is_empty() {
        None
    } else {
        Some(content.join("\n"))
    }
}
