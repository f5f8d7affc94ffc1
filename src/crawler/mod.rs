//! Crawler module for the catalogue listing
//!
//! This module contains the crawl half of the batch job:
//! - HTTP fetching of one listing page at a time
//! - Product card extraction behind the `ListingPage` trait
//! - The pagination loop that ties them together

mod driver;
mod extract;
mod fetcher;

pub use driver::{CrawlError, CrawlState, Crawler};
pub use extract::{extract_listing, parse_price, ExtractError, HtmlListing, ListingExtract, ListingPage};
pub use fetcher::{build_http_client, FetchError, PageFetcher};
