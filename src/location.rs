use std::collections::HashSet;

/// Whether a location string names a whole region or a single locality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationClassification {
    pub is_region: bool,
    /// Normalized form used in region URLs; empty for empty input
    pub slug: String,
}

/// Classify `location` against the known region slugs.
///
/// The slug is the trimmed, lower-cased input with whitespace runs replaced
/// by a single hyphen and Finnish diacritics folded to ASCII, so that
/// "Päijät-Häme" and "paijat-hame" land on the same region.
pub fn classify(location: &str, regions: &HashSet<String>) -> LocationClassification {
    let slug = slugify(location);
    let is_region = !slug.is_empty() && regions.contains(&slug);

    LocationClassification { is_region, slug }
}

pub fn slugify(location: &str) -> String {
    location
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ä' | 'å' => 'a',
            'ö' => 'o',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AggregatorConfig;

    fn regions() -> HashSet<String> {
        AggregatorConfig::default().regions
    }

    #[test]
    fn known_region_is_region() {
        let c = classify("uusimaa", &regions());
        assert!(c.is_region);
        assert_eq!(c.slug, "uusimaa");
    }

    #[test]
    fn region_with_spaces_and_case() {
        let c = classify("  Varsinais Suomi ", &regions());
        assert!(c.is_region);
        assert_eq!(c.slug, "varsinais-suomi");
    }

    #[test]
    fn diacritics_fold_to_region_slug() {
        let c = classify("Päijät-Häme", &regions());
        assert!(c.is_region);
        assert_eq!(c.slug, "paijat-hame");
    }

    #[test]
    fn city_is_not_region() {
        let c = classify("Turku", &regions());
        assert!(!c.is_region);
        assert_eq!(c.slug, "turku");
    }

    #[test]
    fn empty_input() {
        let c = classify("   ", &regions());
        assert!(!c.is_region);
        assert!(c.slug.is_empty());
    }
}
