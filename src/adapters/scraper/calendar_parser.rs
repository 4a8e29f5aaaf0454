use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::domain::availability::DateStateMap;
use crate::domain::day_state::classify_day_label;
use crate::domain::window::AvailabilityWindow;
use crate::error::Result;

const DAY_CELL_SELECTOR: &str = r#"td[role="button"][aria-label]"#;
const DAY_TEST_ID_SELECTOR: &str = "div[data-testid^='calendar-day-']";
const MONTH_HEADING_SELECTOR: &str = r#"h3[class*="hpipapi"]"#;

/// "<day>, <weekday>, <month> <year>" as it appears in day-cell labels.
static LABEL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}),\s+[A-Za-z]+,\s+([A-Za-z]+)\s+(\d{4})").unwrap()
});

/// Scan a calendar snapshot and map each in-window check-in or checkout-only
/// day to its state. Cells whose date cannot be resolved are dropped; a
/// repeated date keeps the last cell seen.
pub fn extract_window_states(html: &str, window: &AvailabilityWindow) -> DateStateMap {
    let mut states = DateStateMap::new();
    let (Ok(cell_selector), Ok(test_id_selector)) = (
        Selector::parse(DAY_CELL_SELECTOR),
        Selector::parse(DAY_TEST_ID_SELECTOR),
    ) else {
        return states;
    };

    let document = Html::parse_document(html);
    for cell in document.select(&cell_selector) {
        let label = cell.value().attr("aria-label").unwrap_or_default();
        if label.trim().is_empty() {
            continue;
        }
        let state = classify_day_label(label);
        if !state.is_range_relevant() {
            continue;
        }
        let Some(date) = resolve_cell_date(cell, label, &test_id_selector) else {
            debug!(label, "Dropping day cell with unresolvable date");
            continue;
        };
        if window.contains(date) {
            states.insert(date, state);
        }
    }
    states
}

/// Build the window from a start date and length, then extract its states.
pub fn extract_states(
    html: &str,
    start: NaiveDate,
    days: i64,
) -> Result<(DateStateMap, AvailabilityWindow)> {
    let window = AvailabilityWindow::new(start, days)?;
    Ok((extract_window_states(html, &window), window))
}

fn resolve_cell_date(
    cell: ElementRef<'_>,
    label: &str,
    test_id_selector: &Selector,
) -> Option<NaiveDate> {
    cell.select(test_id_selector)
        .next()
        .and_then(|div| div.value().attr("data-testid"))
        .and_then(date_from_test_id)
        .or_else(|| date_from_label(label))
}

/// Parse the trailing `MM/DD/YYYY` segment of an id like `calendar-day-06/03/2025`.
pub fn date_from_test_id(test_id: &str) -> Option<NaiveDate> {
    let tail = test_id.rsplit('-').next()?;
    let mut parts = tail.split('/');
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find "3, Tuesday, June 2025" inside a day-cell label. Abbreviated month
/// names ("Jun") are accepted as well.
pub fn date_from_label(label: &str) -> Option<NaiveDate> {
    let caps = LABEL_DATE.captures(label)?;
    let text = format!("{} {} {}", &caps[1], &caps[2], &caps[3]);
    NaiveDate::parse_from_str(&text, "%d %B %Y").ok()
}

/// True when a month heading in the snapshot contains `month_label` (e.g. "June 2025").
pub fn page_has_month(html: &str, month_label: &str) -> bool {
    let Ok(selector) = Selector::parse(MONTH_HEADING_SELECTOR) else {
        return false;
    };
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .any(|h| h.text().collect::<String>().trim().contains(month_label))
}
