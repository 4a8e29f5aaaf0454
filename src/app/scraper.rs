use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::scraper::calendar_parser::extract_states;
use crate::domain::availability::ListingResult;
use crate::domain::listing_url::{build_listing_url, placeholder_checkout, with_dates};
use crate::domain::property::Property;
use crate::domain::window::AvailabilityWindow;
use crate::error::Result;
use crate::ports::page_renderer::PageRenderer;

/// A named listing page to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTarget {
    pub name: String,
    pub url: String,
}

/// Turn the property catalog into listing URLs carrying a placeholder stay.
pub fn listing_targets(
    base_url: &str,
    properties: &[Property],
    window: &AvailabilityWindow,
) -> Result<Vec<ListingTarget>> {
    let check_out = placeholder_checkout(window.start());
    properties
        .iter()
        .map(|p| {
            Ok(ListingTarget {
                name: p.name.clone(),
                url: build_listing_url(base_url, &p.id, window.start(), check_out)?,
            })
        })
        .collect()
}

/// Scrapes one listing: snapshot, extract, merge.
pub struct ListingScraper {
    renderer: Arc<dyn PageRenderer>,
}

impl ListingScraper {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }

    pub async fn scrape(&self, url: &str, window: &AvailabilityWindow) -> Result<ListingResult> {
        let page_url = with_dates(url, window.start(), placeholder_checkout(window.start()));
        let target_month = window.start_month_label();

        let html = self.renderer.fetch_snapshot(&page_url, &target_month).await?;
        debug!(url, bytes = html.len(), "Snapshot received");

        let (states, window) = extract_states(&html, window.start(), window.len_days())?;
        let result = ListingResult::new(url.to_string(), &window, states);
        info!(
            url,
            checkins = result.checkins.len(),
            checkouts = result.checkouts.len(),
            ranges = result.ranges.len(),
            "Listing merged"
        );
        Ok(result)
    }
}
