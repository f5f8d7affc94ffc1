//! Product card extraction
//!
//! The crawl driver only talks to the [`ListingPage`] trait, so the HTML
//! backend can be swapped without touching the pagination loop.
//! [`HtmlListing`] is the `scraper` implementation.
//!
//! # Listing markup
//!
//! ```html
//! <article class="product_pod">
//!   <h3><a href="..." title="A Light in the Attic">A Light in the ...</a></h3>
//!   <p class="price_color">£51.77</p>
//! </article>
//! ...
//! <li class="next"><a href="catalogue/page-2.html">next</a></li>
//! ```

use crate::storage::NewBook;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Errors raised when a listing page does not have the expected structure
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Product card {index} has no h3 > a[title]")]
    MissingTitle { index: usize },

    #[error("Product card {index} has no price element")]
    MissingPrice { index: usize },

    #[error("Product card {index} has a non-numeric price: '{text}'")]
    InvalidPrice { index: usize, text: String },

    #[error("Next page link '{href}' cannot be resolved: {source}")]
    InvalidNextLink {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// Narrow view of a parsed listing page
pub trait ListingPage {
    /// Handle to one product card
    type Node<'a>
    where
        Self: 'a;

    /// All product cards, in document order
    fn product_nodes(&self) -> Vec<Self::Node<'_>>;

    /// Trimmed title of the card at `index`
    fn extract_title(&self, node: &Self::Node<'_>, index: usize) -> Result<String, ExtractError>;

    /// Numeric price of the card at `index`, currency symbol stripped
    fn extract_price(&self, node: &Self::Node<'_>, index: usize) -> Result<f64, ExtractError>;

    /// Raw `href` of the next-page link, if the page has one
    fn find_next_link(&self) -> Option<String>;
}

/// Records and pagination found on one listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ListingExtract {
    pub books: Vec<NewBook>,
    pub next_url: Option<Url>,
}

/// Extracts every product card and resolves the next-page link
///
/// A malformed card fails the whole page.
///
/// # Arguments
///
/// * `page` - The parsed listing page
/// * `current_url` - URL the page was fetched from, used to resolve the next link
pub fn extract_listing<P: ListingPage>(
    page: &P,
    current_url: &Url,
) -> Result<ListingExtract, ExtractError> {
    let nodes = page.product_nodes();
    tracing::info!("Found {} books on this page", nodes.len());

    let mut books = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let title = page.extract_title(node, index)?;
        let price = page.extract_price(node, index)?;
        books.push(NewBook { title, price });
    }

    let next_url = match page.find_next_link() {
        Some(href) => Some(
            current_url
                .join(href.trim())
                .map_err(|source| ExtractError::InvalidNextLink { href, source })?,
        ),
        None => None,
    };

    Ok(ListingExtract { books, next_url })
}

/// Parses a price string such as `£51.77`
///
/// A leading run of symbol characters (`£`, `$`, `€`) is treated as the
/// currency and dropped. Letters are never stripped, so `Price: 12` fails.
pub fn parse_price(text: &str) -> Option<f64> {
    let number = text
        .trim()
        .trim_start_matches(|c: char| {
            !(c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '.')
        })
        .trim();

    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

struct ListingSelectors {
    product: Selector,
    title_link: Selector,
    price: Selector,
    next_link: Selector,
}

impl ListingSelectors {
    fn new() -> Self {
        Self {
            product: selector("article.product_pod"),
            title_link: selector("h3 a"),
            price: selector("p.price_color"),
            next_link: selector("li.next a[href]"),
        }
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("listing selectors are valid CSS")
}

/// [`ListingPage`] backed by a `scraper` document
pub struct HtmlListing {
    document: Html,
    selectors: ListingSelectors,
}

impl HtmlListing {
    /// Parses an HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            selectors: ListingSelectors::new(),
        }
    }
}

impl ListingPage for HtmlListing {
    type Node<'a> = ElementRef<'a>;

    fn product_nodes(&self) -> Vec<ElementRef<'_>> {
        self.document.select(&self.selectors.product).collect()
    }

    fn extract_title(&self, node: &ElementRef<'_>, index: usize) -> Result<String, ExtractError> {
        node.select(&self.selectors.title_link)
            .next()
            .and_then(|link| link.value().attr("title"))
            .map(|title| title.trim().to_string())
            .ok_or(ExtractError::MissingTitle { index })
    }

    fn extract_price(&self, node: &ElementRef<'_>, index: usize) -> Result<f64, ExtractError> {
        let text = node
            .select(&self.selectors.price)
            .next()
            .map(|element| element.text().collect::<String>())
            .ok_or(ExtractError::MissingPrice { index })?;

        parse_price(&text).ok_or_else(|| ExtractError::InvalidPrice {
            index,
            text: text.trim().to_string(),
        })
    }

    fn find_next_link(&self) -> Option<String> {
        self.document
            .select(&self.selectors.next_link)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string)
    }
}
