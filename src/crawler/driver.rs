//! Crawl driver - pagination loop over the listing pages
//!
//! Pages are fetched strictly one after another, since each page's URL comes
//! from the previous page. The first fetch or extraction failure aborts the
//! run and discards everything collected so far.
//!
//! There is no page limit and no cycle detection: a next-link chain that never
//! ends keeps the loop running. The source catalogue is trusted to be finite.

use crate::config::CrawlerConfig;
use crate::crawler::extract::{extract_listing, ExtractError, HtmlListing, ListingExtract};
use crate::crawler::fetcher::{FetchError, PageFetcher};
use crate::storage::NewBook;
use thiserror::Error;
use url::Url;

/// Errors that abort a crawl run
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to extract books from {url}: {source}")]
    Extract {
        url: Url,
        #[source]
        source: ExtractError,
    },
}

/// Position of the crawl in the pagination chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    /// Next page to fetch
    Crawling(Url),
    /// No next-page link remains
    Done,
}

/// Walks the listing from the root page to the last page
pub struct Crawler {
    fetcher: PageFetcher,
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(fetcher: PageFetcher, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    /// Runs one crawl from the root URL
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<NewBook>)` - Every book found, first page to last, in document order
    /// * `Err(CrawlError)` - A page could not be fetched or extracted
    pub async fn run(&self) -> Result<Vec<NewBook>, CrawlError> {
        let mut books = Vec::new();
        let mut pages = 0usize;
        let mut state = CrawlState::Crawling(self.config.root_url.clone());

        while let CrawlState::Crawling(url) = state {
            let extract = match self.crawl_page(&url).await {
                Ok(extract) => extract,
                Err(e) => {
                    tracing::error!("Aborting crawl at page {}: {}", pages + 1, e);
                    return Err(e);
                }
            };
            pages += 1;
            books.extend(extract.books);

            state = match extract.next_url {
                Some(next) => {
                    tokio::time::sleep(self.config.page_delay).await;
                    CrawlState::Crawling(next)
                }
                None => {
                    tracing::info!("No more pages, stopping the scrape");
                    CrawlState::Done
                }
            };
        }

        tracing::info!("Crawled {} pages, {} books in total", pages, books.len());
        Ok(books)
    }

    async fn crawl_page(&self, url: &Url) -> Result<ListingExtract, CrawlError> {
        let body = self.fetcher.fetch(url).await?;

        // The parsed document is not Send, so it must not live across an await
        let listing = HtmlListing::parse(&body);
        extract_listing(&listing, url).map_err(|source| CrawlError::Extract {
            url: url.clone(),
            source,
        })
    }
}
