use super::{parse_listing, ArticleSource};
use crate::models::{Article, Category, SITE_ORIGIN};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Browser-like identification; the site rejects obvious bots.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

pub struct ScienceDailyClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ScienceDailyClient {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self {
            client,
            base_url: SITE_ORIGIN.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Fetch listings from somewhere other than the live site. Article links
    /// still point at the live site.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl Default for ScienceDailyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleSource for ScienceDailyClient {
    fn category_url(&self, category: Category) -> String {
        format!("{}{}", self.base_url, category.path())
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch_articles(
        &self,
        category_url: &str,
        max_articles: usize,
    ) -> Result<Vec<Article>> {
        let response = self
            .client
            .get(category_url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch listing page: {}", e);
                e
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Listing page request failed");
            return Err(Error::FetchStatus(status.as_u16()));
        }

        let html = response.text().await?;
        debug!(bytes = html.len(), "Downloaded listing page");

        let articles = parse_listing(&html, max_articles)?;
        info!(count = articles.len(), "Fetched articles");
        Ok(articles)
    }
}
