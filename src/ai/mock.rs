use super::{ChatService, ImageGenerationService};
use crate::models::ImageSize;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A canned reply: either a value or an error message.
type Reply = std::result::Result<String, String>;

fn next_reply(replies: &Mutex<Vec<Reply>>, call_index: usize) -> Option<Reply> {
    let replies = replies.lock().unwrap();
    if replies.is_empty() {
        None
    } else {
        Some(replies[call_index % replies.len()].clone())
    }
}

#[derive(Clone)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<Reply>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_idea_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `(title, summary)` pairs in call order.
    pub fn get_requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn generate_content_idea(&self, title: &str, summary: &str) -> Result<String> {
        let call_index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((title.to_string(), summary.to_string()));
            requests.len() - 1
        };

        match next_reply(&self.responses, call_index) {
            None => Ok(format!("A striking visual about {}", title)),
            Some(Ok(idea)) => Ok(idea),
            Some(Err(message)) => Err(Error::AiProvider(message)),
        }
    }
}

#[derive(Clone)]
pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<Reply>>>,
    requests: Arc<Mutex<Vec<(String, ImageSize)>>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_url_response(self, url: String) -> Self {
        self.responses.lock().unwrap().push(Ok(url));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Prompts received, in call order.
    pub fn get_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }

    pub fn get_sizes(&self) -> Vec<ImageSize> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, size)| *size)
            .collect()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<String> {
        let call_index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((prompt.to_string(), size));
            requests.len() - 1
        };

        match next_reply(&self.responses, call_index) {
            None => Ok(format!("https://mock-images.example.com/{}.png", call_index + 1)),
            Some(Ok(url)) => Ok(url),
            Some(Err(message)) => Err(Error::AiProvider(message)),
        }
    }
}
