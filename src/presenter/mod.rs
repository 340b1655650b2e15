//! Presentation of pipeline progress and results
//!
//! The pipeline reports through [`Presenter`] and never depends on how the
//! messages end up in front of the user.

pub mod console;
pub mod mock;

pub use console::ConsolePresenter;
pub use mock::{MockPresenter, PresenterEvent};

use crate::models::IllustratedArticle;

pub trait Presenter: Send + Sync {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    /// Non-fatal problem; the run continues.
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn article(&self, article: &IllustratedArticle);
}
