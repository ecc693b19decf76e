use crate::location::LocationClassification;
use crate::models::SourceId;
use serde::{Deserialize, Serialize};

/// Search parameters handed to every source
#[derive(Debug, Clone)]
pub struct SourceQuery<'a> {
    /// Free-text query, may be empty
    pub query: &'a str,
    /// Location as the user typed it, may be empty
    pub location: &'a str,
    /// 1-based page number
    pub page: u32,
    pub classification: &'a LocationClassification,
}

/// A listing as a source delivered it, before normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawListing {
    pub source_id: SourceId,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub url: String,
}

/// One page of raw results
#[derive(Debug, Clone, Default)]
pub struct SourcePage {
    pub listings: Vec<RawListing>,
    pub has_next_page: bool,
}
