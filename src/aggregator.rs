use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::filter::filter_by_location;
use crate::location::classify;
use crate::merge::merge;
use crate::models::{SearchRequest, SearchResult};
use crate::normalize::normalize_all;
use crate::scrapers::{
    DuunitoriScraper, ListingSource, SourcePage, SourceQuery, TyomarkkinatoriScraper,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Searches both sources and merges their results
pub struct Aggregator {
    config: Arc<AggregatorConfig>,
    primary: Box<dyn ListingSource>,
    secondary: Box<dyn ListingSource>,
}

impl Aggregator {
    /// Build an aggregator talking to Duunitori and Työmarkkinatori
    pub fn new(config: AggregatorConfig) -> Result<Self> {
        config.validate()?;
        let primary = DuunitoriScraper::new(config.markup.clone())?;
        let secondary = TyomarkkinatoriScraper::new(config.api.clone())?;

        Ok(Self::with_sources(
            config,
            Box::new(primary),
            Box::new(secondary),
        ))
    }

    pub fn with_sources(
        config: AggregatorConfig,
        primary: Box<dyn ListingSource>,
        secondary: Box<dyn ListingSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            primary,
            secondary,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Run one search. Always returns a result; a primary source failure is
    /// reported through `SearchResult::error`.
    pub async fn search(&self, request: &SearchRequest) -> SearchResult {
        let page = request.page.max(1);
        let classification = classify(&request.location, &self.config.regions);
        info!(
            "Searching query='{}' location='{}' page={} (region: {})",
            request.query, request.location, page, classification.is_region
        );

        let query = SourceQuery {
            query: &request.query,
            location: &request.location,
            page,
            classification: &classification,
        };

        let (primary, secondary) =
            tokio::join!(self.primary.fetch(&query), self.secondary.fetch(&query));

        let mut error = None;
        let primary = match primary {
            Ok(page) => page,
            Err(e) => {
                warn!("{} fetch failed: {}", self.primary.source_name(), e);
                error = Some(e.user_message());
                SourcePage::default()
            }
        };
        let secondary = secondary.unwrap_or_else(|e| {
            warn!("{} fetch failed: {}", self.secondary.source_name(), e);
            SourcePage::default()
        });

        let merged = merge(
            normalize_all(&primary.listings),
            normalize_all(&secondary.listings),
            self.config.max_results,
        );
        let listings = filter_by_location(
            merged,
            &request.location,
            &classification,
            self.config.filter.match_mode,
        );

        info!(
            "Returning {} listings ({} from {}, {} from {}), next page: {}",
            listings.len(),
            primary.listings.len(),
            self.primary.source_name(),
            secondary.listings.len(),
            self.secondary.source_name(),
            primary.has_next_page
        );

        SearchResult {
            listings,
            has_next_page: primary.has_next_page,
            error,
            fetched_at: Utc::now(),
        }
    }
}
