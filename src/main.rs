use anyhow::Result;
use clap::Parser;
use sciencedaily_illustrator::app::{App, RunOutcome};
use sciencedaily_illustrator::export::{self, DEFAULT_CSV_FILE_NAME};
use sciencedaily_illustrator::models::{Category, Config, ImageSize};
use sciencedaily_illustrator::presenter::ConsolePresenter;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "sciencedaily-illustrator")]
#[command(about = "Fetch ScienceDaily articles and generate an AI illustration for each")]
struct CliArgs {
    /// Category to fetch, e.g. "physics" or "quantum-physics".
    #[arg(short, long, default_value = "physics", value_parser = parse_category_arg)]
    category: Category,

    /// Number of articles to illustrate.
    #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    count: u8,

    /// Image size: 1024x1024, 1792x1024 or 1024x1792.
    #[arg(long, default_value = "1024x1024", value_parser = parse_size_arg)]
    size: ImageSize,

    /// Where to write the CSV export.
    #[arg(short, long, default_value = DEFAULT_CSV_FILE_NAME)]
    output: PathBuf,

    /// Print the available categories and exit.
    #[arg(long)]
    list_categories: bool,
}

fn parse_category_arg(input: &str) -> std::result::Result<Category, String> {
    input.parse().map_err(|_| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.display_name()).collect();
        format!(
            "Unknown category '{}'. Expected one of: {}",
            input,
            names.join(", ")
        )
    })
}

fn parse_size_arg(input: &str) -> std::result::Result<ImageSize, String> {
    input.parse().map_err(|e: sciencedaily_illustrator::Error| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sciencedaily_illustrator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    if args.list_categories {
        for category in Category::ALL {
            println!("{:<16} {}", category.display_name(), category.path());
        }
        return Ok(());
    }

    info!("Starting sciencedaily-illustrator");

    let config = Config::from_env()?;
    let app = App::new(&config, Box::new(ConsolePresenter::new()), args.size);

    match app.run(args.category, usize::from(args.count)).await {
        Ok(RunOutcome::Completed(articles)) => {
            if let Err(e) = export::save_csv(&args.output, &articles) {
                error!("CSV export failed: {}", e);
                std::process::exit(1);
            }
            println!("Saved {} rows to {}", articles.len(), args.output.display());
            Ok(())
        }
        Ok(RunOutcome::NoArticles) => Ok(()),
        Ok(RunOutcome::FetchFailed(_)) => std::process::exit(1),
        Err(e) => {
            error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}
