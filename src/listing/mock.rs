use super::ArticleSource;
use crate::models::{Article, Category, SITE_ORIGIN};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockArticleSource {
    articles: Arc<Mutex<Vec<Article>>>,
    failure_status: Arc<Mutex<Option<u16>>>,
    transport_failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockArticleSource {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(Mutex::new(Vec::new())),
            failure_status: Arc::new(Mutex::new(None)),
            transport_failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_article(self, article: Article) -> Self {
        self.articles.lock().unwrap().push(article);
        self
    }

    pub fn with_articles(self, articles: Vec<Article>) -> Self {
        self.articles.lock().unwrap().extend(articles);
        self
    }

    /// Every fetch fails as if the server answered with `status`.
    pub fn with_failure_status(self, status: u16) -> Self {
        *self.failure_status.lock().unwrap() = Some(status);
        self
    }

    /// Every fetch fails before any response arrives.
    pub fn with_transport_failure(self, message: String) -> Self {
        *self.transport_failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_fetch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(category_url, max_articles)` pairs in call order.
    pub fn get_requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockArticleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleSource for MockArticleSource {
    fn category_url(&self, category: Category) -> String {
        format!("{}{}", SITE_ORIGIN, category.path())
    }

    async fn fetch_articles(
        &self,
        category_url: &str,
        max_articles: usize,
    ) -> Result<Vec<Article>> {
        self.requests
            .lock()
            .unwrap()
            .push((category_url.to_string(), max_articles));

        if let Some(message) = self.transport_failure.lock().unwrap().clone() {
            return Err(Error::Generic(message));
        }

        if let Some(status) = *self.failure_status.lock().unwrap() {
            return Err(Error::FetchStatus(status));
        }

        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .take(max_articles)
            .cloned()
            .collect())
    }
}
