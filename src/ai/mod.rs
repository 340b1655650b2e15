//! AI service integration for content ideas and illustrations
//!
//! Provides interfaces to OpenAI's Chat Completions and Image APIs for turning
//! an article into a short content idea and then into a generated image.

pub mod mock;
pub mod openai;

pub use mock::{MockChatClient, MockImageGenerationClient};
pub use openai::{OpenAiChatClient, OpenAiImageClient};

use crate::models::ImageSize;
use crate::Result;
use async_trait::async_trait;

/// Turns an article into a short creative content idea.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn generate_content_idea(&self, title: &str, summary: &str) -> Result<String>;
}

/// Renders a prompt into an image and returns where it can be downloaded.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<String>;
}
