use crate::config::MarkupSourceConfig;
use crate::error::{Result, ScrapeError};
use crate::models::SourceId;
use crate::scrapers::markup::{parse_result_page, CardSchema, DUUNITORI_CARDS};
use crate::scrapers::traits::ListingSource;
use crate::scrapers::types::{SourcePage, SourceQuery};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

/// Duunitori scraper: the primary source
pub struct DuunitoriScraper {
    client: Client,
    config: MarkupSourceConfig,
    base: Url,
    schema: CardSchema,
}

impl DuunitoriScraper {
    pub fn new(config: MarkupSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        let base = Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            config,
            base,
            schema: DUUNITORI_CARDS,
        })
    }

    /// Build the result page URL.
    ///
    /// A bare region search (location given, no query text) goes to the
    /// region path; everything else goes to the flat search page.
    pub fn search_url(&self, query: &SourceQuery<'_>) -> Result<Url> {
        let text = query.query.trim();
        let location = query.location.trim();
        let page = query.page.max(1).to_string();

        if !location.is_empty() && text.is_empty() && query.classification.is_region {
            let path = format!(
                "{}/{}",
                self.config.region_path.trim_matches('/'),
                query.classification.slug
            );
            let mut url = self.base.join(&path)?;
            url.query_pairs_mut().append_pair("sivu", &page);
            return Ok(url);
        }

        let mut url = self.base.join(self.config.search_path.trim_matches('/'))?;
        {
            let mut pairs = url.query_pairs_mut();
            if !text.is_empty() {
                pairs.append_pair("haku", text);
            }
            if !location.is_empty() {
                pairs.append_pair("alue", location);
            }
            pairs.append_pair("sivu", &page);
        }
        Ok(url)
    }
}

#[async_trait]
impl ListingSource for DuunitoriScraper {
    async fn fetch(&self, query: &SourceQuery<'_>) -> Result<SourcePage> {
        let url = self.search_url(query)?;
        info!("Fetching Duunitori page {}", query.page);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!("Duunitori returned status: {}", response.status());
            return Err(ScrapeError::Status {
                source_name: self.source_name(),
                status: response.status(),
            });
        }

        let html = response.text().await?;
        debug!("Downloaded {} bytes of HTML", html.len());

        let page = parse_result_page(&html, &self.schema, &self.base, query.page)?;
        info!(
            "Parsed {} listings from Duunitori (next page: {})",
            page.listings.len(),
            page.has_next_page
        );

        let pacing = self.config.pacing();
        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }

        Ok(page)
    }

    fn source_id(&self) -> SourceId {
        SourceId::MarkupSource
    }
}
