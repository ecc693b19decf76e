use crate::error::{Result, ScrapeError};
use crate::models::{collapse_whitespace, SourceId};
use crate::scrapers::types::{RawListing, SourcePage};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Where listing data lives inside a result page
#[derive(Debug, Clone)]
pub struct CardSchema {
    /// One element per listing
    pub card: &'static str,
    /// Candidate anchors inside a card
    pub link: &'static str,
    /// Path prefix that marks an anchor as a job-detail link
    pub detail_path: &'static str,
    /// Attribute on the detail anchor carrying the company name
    pub company_attr: &'static str,
    /// Element inside the card holding the location text
    pub location: &'static str,
    /// Glyph removed from the location text
    pub location_separator: char,
    /// Anchors of the pagination controls
    pub pagination: &'static str,
    /// Query parameter carrying the page number in pagination links
    pub page_param: &'static str,
}

pub const DUUNITORI_CARDS: CardSchema = CardSchema {
    card: "div.job-box",
    link: "a[href]",
    detail_path: "/tyopaikat/tyo/",
    company_attr: "data-company",
    location: ".job-box__job-location",
    location_separator: '–',
    pagination: "a.pagination__pagenum, a.pagination__next, .pagination a",
    page_param: "sivu",
};

struct CompiledSchema<'s> {
    schema: &'s CardSchema,
    card: Selector,
    link: Selector,
    location: Selector,
    pagination: Selector,
}

impl<'s> CompiledSchema<'s> {
    fn compile(schema: &'s CardSchema) -> Result<Self> {
        Ok(Self {
            schema,
            card: selector(schema.card)?,
            link: selector(schema.link)?,
            location: selector(schema.location)?,
            pagination: selector(schema.pagination)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Parse listing cards and pagination out of a result page.
///
/// Relative links are resolved against `base`. Cards without a detail
/// anchor or without a title are skipped.
pub fn parse_result_page(
    html: &str,
    schema: &CardSchema,
    base: &Url,
    page: u32,
) -> Result<SourcePage> {
    let compiled = CompiledSchema::compile(schema)?;
    let document = Html::parse_document(html);

    let mut listings = Vec::new();
    for (idx, card) in document.select(&compiled.card).enumerate() {
        match parse_card(card, &compiled, base) {
            Ok(listing) => listings.push(listing),
            Err(e) => debug!("Skipping card {}: {}", idx, e),
        }
    }

    let has_next_page = page
        .checked_add(1)
        .is_some_and(|next| has_page_link(&document, &compiled, base, next));

    Ok(SourcePage {
        listings,
        has_next_page,
    })
}

fn parse_card(card: ElementRef<'_>, compiled: &CompiledSchema<'_>, base: &Url) -> Result<RawListing> {
    let schema = compiled.schema;

    let (anchor, url) = card
        .select(&compiled.link)
        .find_map(|a| {
            let href = a.value().attr("href")?;
            let url = base.join(href).ok()?;
            let is_detail = url.host_str() == base.host_str()
                && url.path().starts_with(schema.detail_path);
            is_detail.then_some((a, url))
        })
        .ok_or_else(|| ScrapeError::MalformedRecord {
            reason: "no job-detail link".to_string(),
        })?;

    let title = collapse_whitespace(&anchor.text().collect::<String>());
    if title.is_empty() {
        return Err(ScrapeError::MalformedRecord {
            reason: format!("empty title for {}", url),
        });
    }

    let company = anchor
        .value()
        .attr(schema.company_attr)
        .map(collapse_whitespace)
        .filter(|c| !c.is_empty());

    let location = card
        .select(&compiled.location)
        .next()
        .map(|el| {
            let text: String = el.text().collect();
            collapse_whitespace(&text.replace(schema.location_separator, " "))
        })
        .filter(|l| !l.is_empty());

    Ok(RawListing {
        source_id: SourceId::MarkupSource,
        title,
        company,
        location,
        url: url.to_string(),
    })
}

fn has_page_link(document: &Html, compiled: &CompiledSchema<'_>, base: &Url, wanted: u32) -> bool {
    let wanted = wanted.to_string();
    document
        .select(&compiled.pagination)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .any(|url| {
            url.query_pairs()
                .any(|(k, v)| k == compiled.schema.page_param && v == wanted.as_str())
        })
}
