use super::client::OpenAiHttpClient;
use super::types::ImageGenerationRequest;
use crate::ai::ImageGenerationService;
use crate::models::ImageSize;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, Duration::from_secs(120), client),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for OpenAiImageClient {
    async fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<String> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.to_string(),
            quality: "standard".to_string(),
            response_format: "url".to_string(),
        };

        let response = self.http.image_generation(request).await?;

        let image = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No image data in OpenAI response".to_string()))?;

        if let Some(revised) = &image.revised_prompt {
            tracing::debug!("Image model revised prompt: {}", revised);
        }

        image
            .url
            .ok_or_else(|| Error::AiProvider("No image URL in OpenAI response".to_string()))
    }
}
