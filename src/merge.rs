use crate::models::{Alternate, DedupKey, Listing};
use std::collections::HashMap;
use tracing::debug;

/// Merge primary and secondary listings into one deduplicated list.
///
/// Primary listings keep their order and come first. A secondary listing
/// whose [`DedupKey`] is already present is recorded as an alternate on the
/// existing entry; the rest are appended in their own order. The output is
/// capped at `max_results`.
pub fn merge(primary: Vec<Listing>, secondary: Vec<Listing>, max_results: usize) -> Vec<Listing> {
    let mut merged: Vec<Listing> = Vec::with_capacity(primary.len() + secondary.len());
    let mut index: HashMap<DedupKey, usize> = HashMap::new();

    for listing in primary.into_iter().chain(secondary) {
        let key = listing.dedup_key();
        match index.get(&key).copied() {
            Some(pos) => {
                let existing = &mut merged[pos];
                if existing.source_id == listing.source_id {
                    debug!(
                        "Dropping repeated {} listing '{}'",
                        listing.source_id.display_name(),
                        listing.title
                    );
                    continue;
                }
                existing.alternates.push(Alternate {
                    source_id: listing.source_id,
                    url: listing.url,
                });
            }
            None => {
                index.insert(key, merged.len());
                merged.push(Listing {
                    alternates: Vec::new(),
                    ..listing
                });
            }
        }
    }

    if merged.len() > max_results {
        debug!("Capping {} merged listings at {}", merged.len(), max_results);
        merged.truncate(max_results);
    }
    merged
}
