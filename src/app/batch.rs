use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::app::scraper::{ListingScraper, ListingTarget};
use crate::domain::availability::ListingResult;
use crate::domain::window::AvailabilityWindow;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    pub name: String,
    pub error: String,
}

/// Results of one batch, in target order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<(String, ListingResult)>,
    pub failures: Vec<ListingFailure>,
}

impl BatchOutcome {
    /// JSON object keyed by listing name, in scan order.
    pub fn results_json(&self) -> Result<Value> {
        let mut map = Map::new();
        for (name, result) in &self.results {
            map.insert(name.clone(), serde_json::to_value(result)?);
        }
        Ok(Value::Object(map))
    }
}

/// Scrape every target one after another. A failing listing is logged and
/// recorded, and the batch moves on.
pub async fn run_batch(
    scraper: &ListingScraper,
    targets: &[ListingTarget],
    window: &AvailabilityWindow,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for target in targets {
        match scraper.scrape(&target.url, window).await {
            Ok(result) => {
                info!(listing = %target.name, ranges = result.ranges.len(), "✓ listing scraped");
                outcome.results.push((target.name.clone(), result));
            }
            Err(e) => {
                warn!(listing = %target.name, error = %e, "✗ listing failed");
                outcome.failures.push(ListingFailure {
                    name: target.name.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    outcome
}
