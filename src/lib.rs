pub mod aggregator;
pub mod config;
pub mod error;
pub mod filter;
pub mod location;
pub mod logger;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod scrapers;

pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, MatchMode};
pub use error::{Result, ScrapeError};
pub use models::{Alternate, DedupKey, Listing, SearchRequest, SearchResult, SourceId};
