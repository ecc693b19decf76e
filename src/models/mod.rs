use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when a source omits the company or location.
pub const PLACEHOLDER: &str = "—";

/// Source of a job listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Duunitori, scraped from HTML result pages. Primary source.
    MarkupSource,
    /// Työmarkkinatori JSON search API. Secondary source.
    ApiSource,
}

impl SourceId {
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::MarkupSource => "Duunitori",
            SourceId::ApiSource => "Työmarkkinatori",
        }
    }
}

/// Cross-reference to the same posting found in another source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alternate {
    pub source_id: SourceId,
    pub url: String,
}

/// One normalized job posting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Listing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source_id: SourceId,
    pub alternates: Vec<Alternate>,
}

impl Listing {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.title, &self.company, &self.location)
    }
}

/// Identity used to recognize the same posting across sources.
///
/// Each component is lower-cased with surrounding whitespace trimmed and
/// inner whitespace runs collapsed to a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub title: String,
    pub company: String,
    pub location: String,
}

impl DedupKey {
    pub fn new(title: &str, company: &str, location: &str) -> Self {
        Self {
            title: fold(title),
            company: fold(company),
            location: fold(location),
        }
    }
}

/// Trim and collapse inner whitespace runs to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-folded [`collapse_whitespace`], the form used for comparisons.
pub(crate) fn fold(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

/// Search input supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    pub page: u32,
}

impl SearchRequest {
    /// Build a request; `page` is clamped to at least 1.
    pub fn new(query: impl Into<String>, location: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            page: page.max(1),
        }
    }

    /// Parse a page number the way the web shell does: anything that is not
    /// a positive integer means page 1.
    pub fn parse_page(raw: &str) -> u32 {
        raw.trim().parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1)
    }
}

/// Aggregated output for one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "jobs")]
    pub listings: Vec<Listing>,
    #[serde(rename = "has_next")]
    pub has_next_page: bool,
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl SearchResult {
    pub fn alternates_count(&self) -> usize {
        self.listings.iter().map(|l| l.alternates.len()).sum()
    }
}
