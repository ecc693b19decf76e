use crate::models::{collapse_whitespace, Listing, PLACEHOLDER};
use crate::scrapers::RawListing;

/// Map a raw listing into the common shape.
///
/// Text fields are trimmed with inner whitespace collapsed; a missing or
/// blank company or location becomes [`PLACEHOLDER`]. Returns `None` when
/// the title is blank.
pub fn normalize(raw: &RawListing) -> Option<Listing> {
    let title = collapse_whitespace(&raw.title);
    if title.is_empty() {
        return None;
    }

    Some(Listing {
        title,
        company: or_placeholder(raw.company.as_deref()),
        location: or_placeholder(raw.location.as_deref()),
        url: raw.url.trim().to_string(),
        source_id: raw.source_id,
        alternates: Vec::new(),
    })
}

pub fn normalize_all(raws: &[RawListing]) -> Vec<Listing> {
    raws.iter().filter_map(normalize).collect()
}

fn or_placeholder(text: Option<&str>) -> String {
    text.map(collapse_whitespace)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
