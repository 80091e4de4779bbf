pub mod fields;
pub mod penalty;
pub mod text;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CaseError;
use crate::feed::FeedEntry;
use fields::ExtractedFields;

static DATASERNO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"dataserno=([0-9]+)").unwrap());

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One enforcement notice as written to `<dataserno>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub dataserno: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub description_html: String,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub categories: Vec<String>,
    pub extracted_fields: ExtractedFields,
}

/// Numeric case identifier carried in the entry link.
pub fn case_id(link: &str) -> Option<String> {
    DATASERNO_RE.captures(link).map(|c| c[1].to_string())
}

/// Pull the labelled fields and the fine amount out of a description.
pub fn extract(html: &str) -> ExtractedFields {
    let text = text::plain_text(html);
    let mut fields = fields::extract_fields(&text);
    fields.penalty_amount = penalty::find_amount(&text);
    fields
}

pub fn build_case(entry: &FeedEntry) -> Result<Case, CaseError> {
    let dataserno = case_id(&entry.link).ok_or_else(|| CaseError::MissingId {
        link: entry.link.clone(),
    })?;

    Ok(Case {
        dataserno,
        title: entry.title.clone(),
        link: entry.link.clone(),
        description: text::strip_tags(&entry.description),
        description_html: entry.description.clone(),
        pub_date: entry.pub_date.map(|d| d.format(DATE_FORMAT).to_string()),
        categories: entry.categories.clone(),
        extracted_fields: extract(&entry.description),
    })
}
