//! Application orchestration: fetch a category, illustrate each article, report.

use crate::ai::{ChatService, ImageGenerationService, OpenAiChatClient, OpenAiImageClient};
use crate::listing::{ArticleSource, ScienceDailyClient};
use crate::models::{
    Article, Category, Config, ContentIdea, IllustratedArticle, ImageOutcome, ImageSize,
};
use crate::presenter::Presenter;
use crate::{prompts, Error, Result};
use tracing::{info, warn};

/// What a single run produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// The listing page answered with a non-success status.
    FetchFailed(String),
    /// The page was fetched but no articles could be extracted.
    NoArticles,
    Completed(Vec<IllustratedArticle>),
}

/// Coordinates scraping, idea generation, and image generation for one category.
pub struct App {
    source: Box<dyn ArticleSource>,
    chat: Box<dyn ChatService>,
    image_gen: Box<dyn ImageGenerationService>,
    presenter: Box<dyn Presenter>,
    image_size: ImageSize,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub source: Box<dyn ArticleSource>,
    pub chat: Box<dyn ChatService>,
    pub image_gen: Box<dyn ImageGenerationService>,
    pub presenter: Box<dyn Presenter>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, image_size: ImageSize) -> Self {
        Self {
            source: services.source,
            chat: services.chat,
            image_gen: services.image_gen,
            presenter: services.presenter,
            image_size,
        }
    }

    /// Build the live ScienceDaily and OpenAI clients from configuration.
    ///
    /// A missing API key is not fatal here; the hosted calls fail when made and
    /// the run degrades to placeholder ideas and missing images.
    pub fn new(config: &Config, presenter: Box<dyn Presenter>, image_size: ImageSize) -> Self {
        let api_key = config.openai_api_key.clone().unwrap_or_else(|| {
            warn!("OPENAI_API_KEY is not set; idea and image generation will fail");
            String::new()
        });

        // Reuse one HTTP connection pool across clients.
        let http_client = reqwest::Client::new();

        info!("Chat model: {}", config.chat_model);
        info!("Image model: {}", config.image_model);

        Self::with_services(
            AppServices {
                source: Box::new(
                    ScienceDailyClient::new_with_client(http_client.clone())
                        .with_base_url(config.sciencedaily_base_url.clone()),
                ),
                chat: Box::new(
                    OpenAiChatClient::new_with_client(
                        api_key.clone(),
                        config.chat_model.clone(),
                        http_client.clone(),
                    )
                    .with_base_url(config.openai_base_url.clone()),
                ),
                image_gen: Box::new(
                    OpenAiImageClient::new_with_client(
                        api_key,
                        config.image_model.clone(),
                        http_client,
                    )
                    .with_base_url(config.openai_base_url.clone()),
                ),
                presenter,
            },
            image_size,
        )
    }

    /// Fetch up to `count` articles for `category` and illustrate them one at a time.
    ///
    /// A bad listing status is reported and returned as [`RunOutcome::FetchFailed`];
    /// transport errors during the fetch propagate.
    pub async fn run(&self, category: Category, count: usize) -> Result<RunOutcome> {
        let url = self.source.category_url(category);
        info!("Fetching {} articles from {} ({})", count, category, url);

        let articles = match self.source.fetch_articles(&url, count).await {
            Ok(articles) => articles,
            Err(e @ Error::FetchStatus(_)) => {
                let message = e.to_string();
                self.presenter.error(&message);
                return Ok(RunOutcome::FetchFailed(message));
            }
            Err(e) => return Err(e),
        };

        if articles.is_empty() {
            warn!("No articles found at {}", url);
            self.presenter.warning("No articles found.");
            return Ok(RunOutcome::NoArticles);
        }

        self.presenter
            .success(&format!("Fetched {} articles.", articles.len()));

        let total = articles.len();
        let mut illustrated = Vec::with_capacity(total);
        for (index, article) in articles.into_iter().enumerate() {
            info!("[{}/{}] Illustrating: {}", index + 1, total, article.title);
            let item = self.illustrate(article).await;
            self.presenter.article(&item);
            if item.image_url().is_none() {
                self.presenter.info("No image available.");
            }
            illustrated.push(item);
        }

        let with_images = illustrated
            .iter()
            .filter(|item| item.image_url().is_some())
            .count();
        info!(
            "Run complete: {} articles, {} with images",
            illustrated.len(),
            with_images
        );

        Ok(RunOutcome::Completed(illustrated))
    }

    async fn illustrate(&self, article: Article) -> IllustratedArticle {
        let (idea, image) = self
            .generate_image_for_article(&article.title, &article.summary)
            .await;
        IllustratedArticle::new(article, idea, image)
    }

    /// Ask the chat model for a content idea. Never fails: errors become a placeholder.
    pub async fn generate_content_idea(&self, title: &str, summary: &str) -> ContentIdea {
        match self.chat.generate_content_idea(title, summary).await {
            Ok(idea) => {
                info!("Generated idea ({} chars): {}", idea.len(), idea);
                ContentIdea::Generated(idea)
            }
            Err(e) => {
                warn!("Idea generation failed for '{}': {}", title, e);
                ContentIdea::Placeholder {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Content idea wrapped in the fixed image constraints.
    pub async fn generate_prompt(&self, title: &str, summary: &str) -> (ContentIdea, String) {
        let idea = self.generate_content_idea(title, summary).await;
        let prompt = prompts::build_image_prompt(&idea.text());
        (idea, prompt)
    }

    /// Generate an illustration. A failure is shown as one warning and
    /// returned as [`ImageOutcome::Failed`].
    pub async fn generate_image_for_article(
        &self,
        title: &str,
        summary: &str,
    ) -> (ContentIdea, ImageOutcome) {
        let (idea, prompt) = self.generate_prompt(title, summary).await;

        let image = match self.image_gen.generate_image(&prompt, self.image_size).await {
            Ok(url) => {
                info!("Generated image for '{}': {}", title, url);
                ImageOutcome::Generated { url }
            }
            Err(e) => {
                warn!("Image generation failed for '{}': {}", title, e);
                self.presenter
                    .warning(&format!("Image generation failed for: {}\n\n{}", title, e));
                ImageOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        (idea, image)
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppServices, RunOutcome};
    use crate::Error;
    use crate::ai::{MockChatClient, MockImageGenerationClient};
    use crate::listing::MockArticleSource;
    use crate::models::{
        Article, Category, Config, ContentIdea, ImageOutcome, ImageSize, SITE_ORIGIN,
    };
    use crate::presenter::{MockPresenter, PresenterEvent};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Doubles {
        source: MockArticleSource,
        chat: MockChatClient,
        image_gen: MockImageGenerationClient,
        presenter: MockPresenter,
    }

    fn build_test_app(
        source: MockArticleSource,
        chat: MockChatClient,
        image_gen: MockImageGenerationClient,
    ) -> (App, Doubles) {
        let presenter = MockPresenter::new();
        let doubles = Doubles {
            source: source.clone(),
            chat: chat.clone(),
            image_gen: image_gen.clone(),
            presenter: presenter.clone(),
        };
        let app = App::with_services(
            AppServices {
                source: Box::new(source),
                chat: Box::new(chat),
                image_gen: Box::new(image_gen),
                presenter: Box::new(presenter),
            },
            ImageSize::default(),
        );
        (app, doubles)
    }

    fn sample_articles(count: usize) -> Vec<Article> {
        (1..=count)
            .map(|i| {
                Article::new(
                    format!("Story {}", i),
                    format!("{}/releases/{}.htm", SITE_ORIGIN, i),
                    format!("Summary {}", i),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failed_idea_becomes_placeholder() {
        let (app, _) = build_test_app(
            MockArticleSource::new(),
            MockChatClient::new().with_failure("insufficient_quota".to_string()),
            MockImageGenerationClient::new(),
        );

        let idea = app.generate_content_idea("Title", "Summary").await;
        assert!(idea.is_placeholder());
        assert!(idea.text().starts_with("[Failed to generate idea: "));
        assert!(idea.text().contains("insufficient_quota"));
    }

    #[tokio::test]
    async fn test_prompt_embeds_idea_and_constraints() {
        let (app, _) = build_test_app(
            MockArticleSource::new(),
            MockChatClient::new().with_idea_response("Glowing plankton tide".to_string()),
            MockImageGenerationClient::new(),
        );

        let (idea, prompt) = app.generate_prompt("Bioluminescence", "").await;
        assert_eq!(idea, ContentIdea::Generated("Glowing plankton tide".to_string()));
        assert!(prompt.contains("Glowing plankton tide"));
        assert!(prompt.contains("Do not use Text!"));
        assert!(prompt.contains("realistic"));
    }

    #[tokio::test]
    async fn test_placeholder_idea_still_reaches_image_model() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new(),
            MockChatClient::new().with_failure("timeout".to_string()),
            MockImageGenerationClient::new().with_url_response("https://example/img.png".to_string()),
        );

        let (idea, image) = app.generate_image_for_article("Title", "Summary").await;
        assert!(idea.is_placeholder());
        assert_eq!(image.url(), Some("https://example/img.png"));
        assert!(doubles.image_gen.get_prompts()[0].contains("[Failed to generate idea: "));
    }

    #[tokio::test]
    async fn test_image_success_returns_exact_url_without_warning() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new(),
            MockChatClient::new(),
            MockImageGenerationClient::new().with_url_response("https://example/img.png".to_string()),
        );

        let (_, image) = app.generate_image_for_article("Title", "Summary").await;
        assert_eq!(
            image,
            ImageOutcome::Generated {
                url: "https://example/img.png".to_string()
            }
        );
        assert!(doubles.presenter.get_warnings().is_empty());
        assert_eq!(doubles.image_gen.get_sizes(), vec![ImageSize::Square]);
    }

    #[tokio::test]
    async fn test_image_failure_warns_exactly_once() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new(),
            MockChatClient::new(),
            MockImageGenerationClient::new().with_failure("content_policy_violation".to_string()),
        );

        let (_, image) = app.generate_image_for_article("Risky title", "Summary").await;
        assert_eq!(image.url(), None);

        let warnings = doubles.presenter.get_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Image generation failed for: Risky title"));
        assert!(warnings[0].contains("content_policy_violation"));
    }

    #[tokio::test]
    async fn test_run_fetch_status_failure_reports_error() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new().with_failure_status(404),
            MockChatClient::new(),
            MockImageGenerationClient::new(),
        );

        let outcome = app.run(Category::Health, 5).await.unwrap();
        match outcome {
            RunOutcome::FetchFailed(message) => {
                assert_eq!(message, "Request failed with status code: 404")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(doubles.presenter.get_errors().len(), 1);
        assert_eq!(doubles.chat.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_transport_failure_propagates() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new()
                .with_articles(sample_articles(2))
                .with_transport_failure("connection refused".to_string()),
            MockChatClient::new(),
            MockImageGenerationClient::new(),
        );

        let err = app.run(Category::Physics, 2).await.unwrap_err();
        assert!(matches!(err, Error::Generic(ref msg) if msg == "connection refused"));
        assert!(doubles.presenter.get_events().is_empty());
        assert_eq!(doubles.chat.get_call_count(), 0);
        assert_eq!(doubles.image_gen.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_reports_missing_image_as_info() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new().with_articles(sample_articles(2)),
            MockChatClient::new(),
            MockImageGenerationClient::new()
                .with_failure("server error".to_string())
                .with_url_response("https://example/2.png".to_string()),
        );

        app.run(Category::Physics, 2).await.unwrap();

        let events = doubles.presenter.get_events();
        let infos: Vec<&PresenterEvent> = events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Info(_)))
            .collect();
        assert_eq!(
            infos,
            vec![&PresenterEvent::Info("No image available.".to_string())]
        );
        let article_pos = events
            .iter()
            .position(|event| matches!(event, PresenterEvent::Article(a) if a.image_url().is_none()))
            .unwrap();
        assert_eq!(
            events[article_pos + 1],
            PresenterEvent::Info("No image available.".to_string())
        );
    }

    #[tokio::test]
    async fn test_run_with_no_articles_warns() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new(),
            MockChatClient::new(),
            MockImageGenerationClient::new(),
        );

        let outcome = app.run(Category::Biology, 3).await.unwrap();
        assert!(matches!(outcome, RunOutcome::NoArticles));
        assert_eq!(doubles.presenter.get_warnings(), vec!["No articles found."]);
        assert_eq!(doubles.image_gen.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_processes_articles_in_order() {
        let (app, doubles) = build_test_app(
            MockArticleSource::new().with_articles(sample_articles(4)),
            MockChatClient::new(),
            MockImageGenerationClient::new()
                .with_url_response("https://example/1.png".to_string())
                .with_failure("server error".to_string())
                .with_url_response("https://example/3.png".to_string()),
        );

        let outcome = app.run(Category::Physics, 3).await.unwrap();
        let RunOutcome::Completed(items) = outcome else {
            panic!("expected completed run");
        };

        assert_eq!(
            doubles.source.get_requests(),
            vec![(format!("{}/news/matter_energy/physics/", SITE_ORIGIN), 3)]
        );
        assert_eq!(items.len(), 3);
        let titles: Vec<&str> = items.iter().map(|i| i.article.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 1", "Story 2", "Story 3"]);
        assert_eq!(items[0].image_url(), Some("https://example/1.png"));
        assert_eq!(items[1].image_url(), None);
        assert_eq!(items[2].image_url(), Some("https://example/3.png"));

        let chat_titles: Vec<String> = doubles
            .chat
            .get_requests()
            .into_iter()
            .map(|(title, _)| title)
            .collect();
        assert_eq!(chat_titles, vec!["Story 1", "Story 2", "Story 3"]);

        let events = doubles.presenter.get_events();
        assert_eq!(events[0], PresenterEvent::Success("Fetched 3 articles.".to_string()));
        assert_eq!(doubles.presenter.get_articles(), items);
        assert_eq!(doubles.presenter.get_warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_new_wires_live_clients_from_config() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/news/space_time/astrophysics/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<div class=\"latest-head\"><a href=\"/releases/x.htm\">Comet</a></div>\
                 <div class=\"latest-summary\">Bright comet.</div>",
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "A comet tail" } }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "url": "https://example/comet.png" }]
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let config = Config::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "OPENAI_BASE_URL" | "SCIENCEDAILY_BASE_URL" => Some(uri.clone()),
            _ => None,
        })
        .unwrap();

        let presenter = MockPresenter::new();
        let app = App::new(&config, Box::new(presenter.clone()), ImageSize::default());

        let RunOutcome::Completed(items) = app.run(Category::Astrophysics, 5).await.unwrap()
        else {
            panic!("expected completed run");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].article.link, format!("{}/releases/x.htm", SITE_ORIGIN));
        assert_eq!(items[0].idea, ContentIdea::Generated("A comet tail".to_string()));
        assert_eq!(items[0].image_url(), Some("https://example/comet.png"));
        assert!(presenter.get_warnings().is_empty());
    }
}
