use super::Presenter;
use crate::models::IllustratedArticle;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes results to stdout and problems to stderr.
pub struct ConsolePresenter {
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    fn write_to(target: &Mutex<Box<dyn Write + Send>>, text: &str) {
        let mut writer = match target.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{}", text).and_then(|_| writer.flush()) {
            tracing::warn!("Failed to write to console: {}", e);
        }
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Markdown-flavoured block for one article.
pub fn render_article(article: &IllustratedArticle) -> String {
    let mut block = format!(
        "### [{}]({})\n",
        article.article.title, article.article.link
    );
    if !article.article.summary.is_empty() {
        block.push_str(&article.article.summary);
        block.push('\n');
    }
    if let Some(url) = article.image_url() {
        block.push_str(&format!("![{}]({})\n", article.article.title, url));
    }
    block.push_str("---");
    block
}

impl Presenter for ConsolePresenter {
    fn success(&self, message: &str) {
        Self::write_to(&self.out, message);
    }

    fn info(&self, message: &str) {
        Self::write_to(&self.out, message);
    }

    fn warning(&self, message: &str) {
        Self::write_to(&self.err, &format!("warning: {}", message));
    }

    fn error(&self, message: &str) {
        Self::write_to(&self.err, &format!("error: {}", message));
    }

    fn article(&self, article: &IllustratedArticle) {
        Self::write_to(&self.out, &render_article(article));
    }
}
