use crate::config::MatchMode;
use crate::location::LocationClassification;
use crate::models::{fold, Listing};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Location texts standing for several places at once ("Turku ja 2 muuta")
fn aggregate_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(
            r"(?i)(\b(ja|and)\s+\d+\s+(muuta|more|others?)\b|\+\s*\d+|\b(useita|multiple|various|several)\b|eri paikkakunnilla)",
        )
        .expect("aggregate marker pattern is valid")
    })
}

pub fn is_aggregate_location(location: &str) -> bool {
    aggregate_marker().is_match(location)
}

/// Keep the listings that belong to the requested location.
///
/// Regions are left alone since the sources were already asked for a
/// region-scoped page. For a city, listings with an aggregate location are
/// dropped and the rest are compared with `mode`.
pub fn filter_by_location(
    listings: Vec<Listing>,
    location: &str,
    classification: &LocationClassification,
    mode: MatchMode,
) -> Vec<Listing> {
    let wanted = fold(location);
    if wanted.is_empty() || classification.is_region {
        return listings;
    }

    let before = listings.len();
    let kept: Vec<Listing> = listings
        .into_iter()
        .filter(|listing| {
            let have = fold(&listing.location);
            if is_aggregate_location(&have) {
                return false;
            }
            match mode {
                MatchMode::Exact => have == wanted,
                MatchMode::Substring => have.contains(&wanted),
            }
        })
        .collect();

    debug!(
        "After city filter: {} of {} listings (location={})",
        kept.len(),
        before,
        location
    );
    kept
}
