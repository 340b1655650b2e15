//! Article listing retrieval
//!
//! Fetches a ScienceDaily category page and turns its "latest news" block
//! into [`Article`] records. All knowledge of the page markup lives in
//! [`parse_listing`].

pub mod client;
pub mod mock;

pub use client::ScienceDailyClient;
pub use mock::MockArticleSource;

use crate::models::{Article, Category, SITE_ORIGIN};
use crate::{Error, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

const HEADLINE_SELECTOR: &str = "div.latest-head > a";
const SUMMARY_CLASS: &str = "latest-summary";

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Listing URL for a category.
    fn category_url(&self, category: Category) -> String;

    /// Fetch up to `max_articles` articles from a listing page.
    ///
    /// A non-success status is reported as [`Error::FetchStatus`].
    async fn fetch_articles(&self, category_url: &str, max_articles: usize)
        -> Result<Vec<Article>>;
}

/// Extract the first `max_articles` headline entries from a listing page.
///
/// Anchors without an `href` or without visible text are skipped. A page with
/// no matching markup yields an empty list.
pub fn parse_listing(html: &str, max_articles: usize) -> Result<Vec<Article>> {
    let document = Html::parse_document(html);
    let headline_selector =
        Selector::parse(HEADLINE_SELECTOR).map_err(|e| Error::Parse(e.to_string()))?;

    let articles: Vec<Article> = document
        .select(&headline_selector)
        .filter_map(|anchor| {
            let title = element_text(&anchor);
            let href = anchor.value().attr("href")?.trim();
            if title.is_empty() || href.is_empty() {
                tracing::debug!("Skipping headline without title or href");
                return None;
            }

            Some(Article {
                title,
                link: format!("{}{}", SITE_ORIGIN, href),
                summary: summary_for(&anchor).unwrap_or_default(),
            })
        })
        .take(max_articles)
        .collect();

    tracing::debug!(count = articles.len(), "Parsed listing page");
    Ok(articles)
}

/// Summary block following the anchor's enclosing `div`.
fn summary_for(anchor: &ElementRef) -> Option<String> {
    let container = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "div")?;

    container
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == "div" && el.value().classes().any(|c| c == SUMMARY_CLASS)
        })
        .map(|el| element_text(&el))
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
