use crate::error::Result;
use crate::models::SourceId;
use crate::scrapers::types::{SourcePage, SourceQuery};
use async_trait::async_trait;

/// Common trait for job listing sources
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of listings for the query
    async fn fetch(&self, query: &SourceQuery<'_>) -> Result<SourcePage>;

    fn source_id(&self) -> SourceId;

    /// Get the name of the source
    fn source_name(&self) -> &'static str {
        self.source_id().display_name()
    }
}
