use serde::{Deserialize, Serialize};

use crate::domain::property::Property;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Listings to scan, in report order.
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            properties: Vec::new(),
            renderer: RendererConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Browser remote-control settings. Wait values bound each individual wait;
/// `max_month_advances` bounds the calendar paging loop.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RendererConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default)]
    pub browser_binary: Option<String>,
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_window_size")]
    pub window_size: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_overlay_wait")]
    pub overlay_wait_secs: u64,
    #[serde(default = "default_clear_dates_wait")]
    pub clear_dates_wait_secs: u64,
    #[serde(default = "default_calendar_wait")]
    pub calendar_wait_secs: u64,
    #[serde(default = "default_next_month_wait")]
    pub next_month_wait_secs: u64,
    #[serde(default = "default_max_month_advances")]
    pub max_month_advances: u32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            browser_binary: None,
            headless: true,
            user_agent: default_user_agent(),
            window_size: default_window_size(),
            request_timeout_secs: default_request_timeout(),
            overlay_wait_secs: default_overlay_wait(),
            clear_dates_wait_secs: default_clear_dates_wait(),
            calendar_wait_secs: default_calendar_wait(),
            next_month_wait_secs: default_next_month_wait(),
            max_month_advances: default_max_month_advances(),
            poll_interval_ms: default_poll_interval(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.airbnb.com".into()
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 Chrome/123 Safari/537.36".into()
}

fn default_window_size() -> String {
    "1280,900".into()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_overlay_wait() -> u64 {
    1
}

fn default_clear_dates_wait() -> u64 {
    2
}

fn default_calendar_wait() -> u64 {
    15
}

fn default_next_month_wait() -> u64 {
    5
}

fn default_max_month_advances() -> u32 {
    9
}

fn default_poll_interval() -> u64 {
    250
}

fn default_settle_delay() -> u64 {
    300
}

fn default_output_dir() -> String {
    "out".into()
}
