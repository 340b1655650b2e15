//! Data models and structures
//!
//! Defines the categories that can be scraped, the article records that flow
//! through the pipeline, and the runtime configuration.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Origin every article link is built from.
pub const SITE_ORIGIN: &str = "https://www.sciencedaily.com";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// A ScienceDaily news section with its own listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Physics,
    QuantumPhysics,
    Astrophysics,
    Biology,
    Health,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Physics,
        Category::QuantumPhysics,
        Category::Astrophysics,
        Category::Biology,
        Category::Health,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Physics => "Physics",
            Category::QuantumPhysics => "Quantum Physics",
            Category::Astrophysics => "Astrophysics",
            Category::Biology => "Biology",
            Category::Health => "Health",
        }
    }

    /// Listing path relative to the site origin.
    pub fn path(self) -> &'static str {
        match self {
            Category::Physics => "/news/matter_energy/physics/",
            Category::QuantumPhysics => "/news/matter_energy/quantum_physics/",
            Category::Astrophysics => "/news/space_time/astrophysics/",
            Category::Biology => "/news/plants_animals/biology/",
            Category::Health => "/news/health_medicine/",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(input: &str) -> crate::Result<Self> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        Category::ALL
            .into_iter()
            .find(|category| {
                category.display_name().replace(' ', "").to_lowercase() == normalized
            })
            .ok_or_else(|| crate::Error::Config(format!("Unknown category '{}'", input)))
    }
}

/// One scraped listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            summary: summary.into(),
        }
    }
}

/// Result of asking the chat model for a content idea.
///
/// Failures are kept as data so the pipeline can continue with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIdea {
    Generated(String),
    Placeholder { error: String },
}

impl ContentIdea {
    /// Text that gets embedded into the image prompt.
    pub fn text(&self) -> String {
        match self {
            ContentIdea::Generated(idea) => idea.clone(),
            ContentIdea::Placeholder { error } => format!("[Failed to generate idea: {}]", error),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ContentIdea::Placeholder { .. })
    }
}

impl fmt::Display for ContentIdea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Result of asking the image model for an illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Generated { url: String },
    Failed { error: String },
}

impl ImageOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageOutcome::Generated { url } => Some(url),
            ImageOutcome::Failed { .. } => None,
        }
    }
}

/// An article after the idea and image steps have run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllustratedArticle {
    pub article: Article,
    pub idea: ContentIdea,
    pub image: ImageOutcome,
}

impl IllustratedArticle {
    pub fn new(article: Article, idea: ContentIdea, image: ImageOutcome) -> Self {
        Self {
            article,
            idea,
            image,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.url()
    }
}

/// Output sizes accepted by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    Square,
    Landscape,
    Portrait,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Landscape => "1792x1024",
            ImageSize::Portrait => "1024x1792",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = crate::Error;

    fn from_str(input: &str) -> crate::Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "1024x1024" => Ok(ImageSize::Square),
            "1792x1024" => Ok(ImageSize::Landscape),
            "1024x1792" => Ok(ImageSize::Portrait),
            other => Err(crate::Error::Config(format!(
                "Unsupported image size '{}'. Expected 1024x1024, 1792x1024 or 1024x1792",
                other
            ))),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Not validated upfront; a missing key surfaces as a failed API call.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub chat_model: String,
    pub image_model: String,
    pub sciencedaily_base_url: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let sciencedaily_base_url = non_empty("SCIENCEDAILY_BASE_URL")
            .unwrap_or_else(|| SITE_ORIGIN.to_string())
            .trim_end_matches('/')
            .to_string();
        if !sciencedaily_base_url.starts_with("http://")
            && !sciencedaily_base_url.starts_with("https://")
        {
            return Err(crate::Error::Config(format!(
                "SCIENCEDAILY_BASE_URL must be an http(s) URL, got '{}'",
                sciencedaily_base_url
            )));
        }

        Ok(Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            chat_model: non_empty("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            image_model: non_empty("IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            sciencedaily_base_url,
        })
    }
}
