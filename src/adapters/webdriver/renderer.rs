use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::adapters::scraper::calendar_parser::page_has_month;
use crate::adapters::webdriver::client::{Locator, Session, WebDriverClient};
use crate::config::types::RendererConfig;
use crate::error::{AvailabilityError, Result};
use crate::ports::page_renderer::PageRenderer;

/// Consent and promo dialogs that can cover the booking calendar.
const OVERLAY_BUTTONS: &[&str] = &[
    "//button[normalize-space()='Accept']",
    "//button[normalize-space()='OK']",
    "//button[normalize-space()='Got it']",
    "//button[normalize-space()='I agree']",
    "//button[normalize-space()='Dismiss']",
    "//button[@aria-label='Close']",
];

/// Entry points that open the date picker, tried in order.
const CALENDAR_OPENERS: &[&str] = &[
    r#"div[role="application"][aria-label="Calendar"]"#,
    r#"[data-testid="book-it-default"]"#,
    r#"button[aria-label*="Dates"]"#,
    r#"button[aria-label*="Check in"]"#,
];

const CLEAR_DATES_BUTTON: &str = "//button[normalize-space()='Clear dates']";
const DAY_BUTTONS: &str = r#"[role="button"][aria-label]"#;
const NEXT_MONTH_BUTTON: &str = r#"button[aria-label^="Move forward"]"#;
const CLEAR_DATES_SETTLE: Duration = Duration::from_millis(200);

/// Renders listing pages in a browser driven over the WebDriver protocol.
pub struct WebDriverRenderer {
    client: WebDriverClient,
    config: RendererConfig,
}

impl WebDriverRenderer {
    pub fn new(config: RendererConfig) -> Result<Self> {
        let client = WebDriverClient::new(
            &config.webdriver_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self { client, config })
    }

    pub fn capabilities(&self) -> Value {
        let mut args = vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            format!("--window-size={}", self.config.window_size),
            format!("--user-agent={}", self.config.user_agent),
        ];
        if self.config.headless {
            args.insert(0, "--headless=new".to_string());
        }
        let mut chrome_options = json!({ "args": args });
        if let Some(binary) = &self.config.browser_binary {
            chrome_options["binary"] = json!(binary);
        }
        json!({
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": chrome_options,
            }
        })
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }

    async fn render(&self, session: &Session, url: &str, target_month: &str) -> Result<String> {
        session.navigate(url).await?;
        self.dismiss_overlays(session).await;
        self.open_calendar(session).await;
        self.clear_dates(session).await;

        let wait = self.config.calendar_wait_secs;
        if session
            .wait_for_element(
                Locator::Css(DAY_BUTTONS),
                Duration::from_secs(wait),
                self.poll_interval(),
            )
            .await?
            .is_none()
        {
            return Err(AvailabilityError::Timeout {
                what: "calendar day buttons".into(),
                secs: wait,
            });
        }

        self.page_to_month(session, target_month).await?;
        session.page_source().await
    }

    async fn dismiss_overlays(&self, session: &Session) {
        let wait = Duration::from_secs(self.config.overlay_wait_secs);
        for xpath in OVERLAY_BUTTONS {
            let found = session
                .wait_for_element(Locator::XPath(xpath), wait, self.poll_interval())
                .await;
            if let Ok(Some(button)) = found {
                match session.click(&button).await {
                    Ok(()) => debug!(xpath, "Dismissed overlay"),
                    Err(e) => debug!(xpath, error = %e, "Overlay button not clickable"),
                }
            }
        }
    }

    async fn open_calendar(&self, session: &Session) {
        for css in CALENDAR_OPENERS {
            if let Ok(Some(opener)) = session.find_element(Locator::Css(css)).await
                && session.script_click(&opener).await.is_ok()
            {
                debug!(selector = css, "Opened calendar");
                return;
            }
        }
        debug!("No calendar opener found, relying on inline calendar");
    }

    async fn clear_dates(&self, session: &Session) {
        let found = session
            .wait_for_element(
                Locator::XPath(CLEAR_DATES_BUTTON),
                Duration::from_secs(self.config.clear_dates_wait_secs),
                self.poll_interval(),
            )
            .await;
        if let Ok(Some(button)) = found
            && session.script_click(&button).await.is_ok()
        {
            tokio::time::sleep(CLEAR_DATES_SETTLE).await;
        }
    }

    /// Click "next month" until the target month heading shows up, at most
    /// `max_month_advances` reads. Running out of attempts is not an error.
    async fn page_to_month(&self, session: &Session, target_month: &str) -> Result<()> {
        for attempt in 0..self.config.max_month_advances {
            let html = session.page_source().await?;
            if page_has_month(&html, target_month) {
                debug!(target_month, attempt, "Target month visible");
                return Ok(());
            }
            let next = session
                .wait_for_element(
                    Locator::Css(NEXT_MONTH_BUTTON),
                    Duration::from_secs(self.config.next_month_wait_secs),
                    self.poll_interval(),
                )
                .await
                .ok()
                .flatten();
            let Some(next) = next else {
                warn!(target_month, "No next-month button, keeping current calendar page");
                return Ok(());
            };
            if let Err(e) = session.script_click(&next).await {
                warn!(error = %e, "Next-month click failed");
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        }
        warn!(
            target_month,
            attempts = self.config.max_month_advances,
            "Target month not reached"
        );
        Ok(())
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn fetch_snapshot(&self, url: &str, target_month: &str) -> Result<String> {
        let session = self.client.create_session(self.capabilities()).await?;
        info!(url, target_month, session = session.id(), "Rendering listing calendar");

        let result = self.render(&session, url, target_month).await;

        if let Err(e) = session.delete().await {
            warn!(error = %e, "Failed to close WebDriver session");
        }
        result
    }
}
