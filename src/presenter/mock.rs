use super::Presenter;
use crate::models::IllustratedArticle;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
    Article(IllustratedArticle),
}

/// Records everything it is asked to show.
#[derive(Clone, Default)]
pub struct MockPresenter {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<PresenterEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn get_warnings(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Warning(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn get_errors(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn get_articles(&self) -> Vec<IllustratedArticle> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Article(article) => Some(article.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: PresenterEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for MockPresenter {
    fn success(&self, message: &str) {
        self.record(PresenterEvent::Success(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.record(PresenterEvent::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.record(PresenterEvent::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(PresenterEvent::Error(message.to_string()));
    }

    fn article(&self, article: &IllustratedArticle) {
        self.record(PresenterEvent::Article(article.clone()));
    }
}
