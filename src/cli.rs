use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::config::types::Config;
use crate::domain::window::AvailabilityWindow;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Window start date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub start: Option<String>,

    /// Window size in days.
    #[arg(long, default_value_t = 14, allow_negative_numbers = true)]
    pub days: i64,

    /// Run the browser headless: 1/true/yes/y, anything else means headed.
    #[arg(long, value_parser = parse_flag)]
    pub headless: Option<bool>,

    /// Path to the YAML config (property catalog, renderer settings).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the JSON and message artifacts.
    #[arg(long)]
    pub out: Option<String>,

    /// WebDriver endpoint, e.g. a running chromedriver.
    #[arg(long)]
    pub webdriver_url: Option<String>,
}

impl Cli {
    /// Validate the requested window; `today` fills in a missing start date.
    pub fn window(&self, today: NaiveDate) -> Result<AvailabilityWindow> {
        match &self.start {
            Some(start) => AvailabilityWindow::parse(start, self.days),
            None => AvailabilityWindow::new(today, self.days),
        }
    }

    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(headless) = self.headless {
            config.renderer.headless = headless;
        }
        if let Some(out) = &self.out {
            config.output.dir.clone_from(out);
        }
        if let Some(url) = &self.webdriver_url {
            config.renderer.webdriver_url.clone_from(url);
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
pub fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    Ok(matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    ))
}
