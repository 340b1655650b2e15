//! CSV export of illustrated articles.

use crate::models::IllustratedArticle;
use crate::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_CSV_FILE_NAME: &str = "sciencedaily_articles.csv";

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    link: &'a str,
    summary: &'a str,
    image_url: Option<&'a str>,
}

impl<'a> From<&'a IllustratedArticle> for CsvRow<'a> {
    fn from(article: &'a IllustratedArticle) -> Self {
        Self {
            title: &article.article.title,
            link: &article.article.link,
            summary: &article.article.summary,
            image_url: article.image_url(),
        }
    }
}

/// Write a header row plus one row per article. Missing images are empty cells.
pub fn write_csv<W: Write>(writer: W, articles: &[IllustratedArticle]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(["title", "link", "summary", "image_url"])?;
    for article in articles {
        csv_writer.serialize(CsvRow::from(article))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(articles: &[IllustratedArticle]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, articles)?;
    Ok(buffer)
}

pub fn save_csv(path: &Path, articles: &[IllustratedArticle]) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        tracing::error!("Failed to create {}: {}", path.display(), e);
        Error::Io(e)
    })?;
    write_csv(file, articles)?;
    tracing::info!(rows = articles.len(), "Saved CSV to {}", path.display());
    Ok(())
}
