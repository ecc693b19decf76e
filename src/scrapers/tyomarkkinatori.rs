use crate::config::ApiSourceConfig;
use crate::error::{Result, ScrapeError};
use crate::models::SourceId;
use crate::scrapers::fields::{extract_listing, extract_records, FieldRules, API_FIELD_RULES};
use crate::scrapers::traits::ListingSource;
use crate::scrapers::types::{RawListing, SourcePage, SourceQuery};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Työmarkkinatori API client: the secondary source.
///
/// Never fails a search. Network, status and schema problems are logged and
/// produce an empty page.
pub struct TyomarkkinatoriScraper {
    client: Client,
    config: ApiSourceConfig,
    rules: FieldRules,
}

impl TyomarkkinatoriScraper {
    pub fn new(config: ApiSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            config,
            rules: API_FIELD_RULES,
        })
    }

    /// Request parameters; the API counts pages from zero.
    pub fn query_params(query: &SourceQuery<'_>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let text = query.query.trim();
        let location = query.location.trim();

        if !text.is_empty() {
            params.push(("q", text.to_string()));
        }
        if !location.is_empty() {
            params.push(("location", location.to_string()));
        }
        params.push(("page", query.page.saturating_sub(1).to_string()));
        params
    }

    async fn request(&self, query: &SourceQuery<'_>) -> Result<Value> {
        let params = Self::query_params(query);
        debug!("Calling {} with {:?}", self.config.endpoint, params);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScrapeError::Status {
                source_name: self.source_name(),
                status: response.status(),
            });
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes of JSON", body.len());

        serde_json::from_str(&body).map_err(|e| ScrapeError::Schema {
            message: format!("body is not JSON: {}", e),
        })
    }

    /// Turn a response body into listings, skipping unusable records.
    pub fn parse_body(&self, body: &Value) -> Result<Vec<RawListing>> {
        let records = extract_records(body).ok_or_else(|| ScrapeError::Schema {
            message: "no result list in response".to_string(),
        })?;

        let listings: Vec<RawListing> = records
            .iter()
            .filter_map(|record| {
                let listing = extract_listing(record, &self.rules, &self.config.detail_url_base);
                if listing.is_none() {
                    debug!("Skipping API record without title or link");
                }
                listing
            })
            .collect();

        if listings.len() < records.len() {
            debug!(
                "Dropped {} of {} API records",
                records.len() - listings.len(),
                records.len()
            );
        }
        Ok(listings)
    }
}

#[async_trait]
impl ListingSource for TyomarkkinatoriScraper {
    async fn fetch(&self, query: &SourceQuery<'_>) -> Result<SourcePage> {
        info!("Fetching Työmarkkinatori page {}", query.page);

        let listings = self
            .request(query)
            .await
            .and_then(|body| self.parse_body(&body));

        match listings {
            Ok(listings) => {
                info!("Parsed {} listings from Työmarkkinatori", listings.len());
                Ok(SourcePage {
                    listings,
                    has_next_page: false,
                })
            }
            Err(e) => {
                warn!("Työmarkkinatori unavailable, continuing without it: {}", e);
                Ok(SourcePage::default())
            }
        }
    }

    fn source_id(&self) -> SourceId {
        SourceId::ApiSource
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationClassification;
    use serde_json::json;

    fn scraper() -> TyomarkkinatoriScraper {
        TyomarkkinatoriScraper::new(ApiSourceConfig::default()).unwrap()
    }

    #[test]
    fn params_skip_empty_fields_and_use_zero_based_page() {
        let c = LocationClassification {
            is_region: false,
            slug: String::new(),
        };
        let query = SourceQuery {
            query: "",
            location: "",
            page: 1,
            classification: &c,
        };
        assert_eq!(
            TyomarkkinatoriScraper::query_params(&query),
            vec![("page", "0".to_string())]
        );
    }

    #[test]
    fn params_include_keyword_and_location() {
        let c = LocationClassification {
            is_region: false,
            slug: "turku".to_string(),
        };
        let query = SourceQuery {
            query: " myyjä ",
            location: "Turku",
            page: 3,
            classification: &c,
        };
        assert_eq!(
            TyomarkkinatoriScraper::query_params(&query),
            vec![
                ("q", "myyjä".to_string()),
                ("location", "Turku".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn parse_body_drops_untitled_records() {
        let body = json!({"results": [
            {"title": "Myyjä", "company": "K-Market", "city": "Turku", "id": 1},
            {"company": "No Title Oy", "id": 2},
            {"name": "Kokki", "employer": "Ravintola", "url": "https://te.fi/3"}
        ]});
        let listings = scraper().parse_body(&body).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Myyjä");
        assert!(listings[0].url.ends_with("/1"));
        assert_eq!(listings[1].company.as_deref(), Some("Ravintola"));
    }

    #[test]
    fn parse_body_rejects_unknown_shape() {
        let err = scraper().parse_body(&json!({"status": "ok"})).unwrap_err();
        assert!(matches!(err, ScrapeError::Schema { .. }));
    }
}
