use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use airbnb_availability::adapters::artifacts::{run_stamp, write_artifacts};
use airbnb_availability::adapters::webdriver::renderer::WebDriverRenderer;
use airbnb_availability::app::batch::run_batch;
use airbnb_availability::app::scraper::{ListingScraper, listing_targets};
use airbnb_availability::cli::Cli;
use airbnb_availability::config::load_config;
use airbnb_availability::report::{render_console, render_message};

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        binary_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(find_config_path);
    let mut config = load_config(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    cli.apply_overrides(&mut config);

    let window = cli
        .window(chrono::Local::now().date_naive())
        .context("rejecting availability window")?;
    if config.properties.is_empty() {
        tracing::warn!("No properties configured, nothing to scan");
    }
    let targets = listing_targets(&config.base_url, &config.properties, &window)?;

    println!(
        "Start date: {}  |  Window: {} days  |  Headless: {}",
        window.start(),
        window.len_days(),
        config.renderer.headless
    );
    println!("\nGenerated listings for scraping:");
    for target in &targets {
        println!("- {}: {}", target.name, target.url);
    }

    let renderer = WebDriverRenderer::new(config.renderer.clone())
        .context("building WebDriver client")?;
    let scraper = ListingScraper::new(Arc::new(renderer));
    let outcome = run_batch(&scraper, &targets, &window).await;

    println!("\n{}", render_console(&outcome, &window));
    let message = render_message(&outcome);
    println!("\n{message}");

    let saved = write_artifacts(
        Path::new(&config.output.dir),
        &run_stamp(),
        &outcome.results_json()?,
        &message,
    )
    .context("writing artifacts")?;
    println!("\nSaved results  → {}", saved.results_path.display());
    println!("Saved email    → {}", saved.message_path.display());

    Ok(())
}
